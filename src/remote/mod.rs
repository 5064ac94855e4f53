pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{EnrichmentProvider, RemoteError};
pub use providers::HttpRecommender;
