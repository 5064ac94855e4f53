//! # Frames
//!
//! A `Frame` is one detail-panel view: the book being displayed plus the
//! similarity score that justified showing it. Frames are value objects —
//! drilling into a related book creates a *new* frame, the old one is
//! pushed onto the navigation history untouched.

use serde::{Deserialize, Serialize};

/// A book as returned by the recommendation API.
///
/// The navigation core treats this as opaque beyond `id` and `title`;
/// the remaining fields exist for the detail panel and the wire format.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Book {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl Book {
    /// Comma-joined author list for display, or a placeholder.
    pub fn author_line(&self) -> String {
        if self.authors.is_empty() {
            String::from("Unknown Author")
        } else {
            self.authors.join(", ")
        }
    }
}

/// One detail-panel view: a book and the match score it was reached with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Frame {
    pub book: Book,
    /// Similarity in `0.0..=1.0`, carried through to the explanation request.
    pub match_score: f64,
}

impl Frame {
    pub fn new(book: Book, match_score: f64) -> Self {
        Self { book, match_score }
    }

    /// Match score as an integer percentage for display.
    pub fn match_percent(&self) -> u8 {
        (self.match_score * 100.0).round().clamp(0.0, 100.0) as u8
    }
}
