pub mod http;

pub use http::HttpRecommender;
