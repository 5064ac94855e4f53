//! # Navigation Stack Manager
//!
//! Owns the drill-down path through detail panels: the frame on screen
//! (`current`) and the ordered trail of frames behind it (`history`,
//! oldest first). Invariant: `history` is non-empty only while `current`
//! is present.
//!
//! These operations are synchronous and infallible except for
//! `drill_into`, which is a logic error when no panel is open — the UI
//! never offers a related-item click without an open panel, so hitting
//! that path means the caller lost track of its own state.

use std::fmt;

use log::info;

use crate::core::frame::Frame;

/// Errors from stack operations invoked in an invalid state.
/// These are programmer errors, never user-facing.
#[derive(Debug, PartialEq, Eq)]
pub enum NavError {
    /// `drill_into` called with no open panel.
    NoCurrentFrame,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::NoCurrentFrame => write!(f, "cannot drill down: no panel is open"),
        }
    }
}

impl std::error::Error for NavError {}

/// The navigation state for one panel-open episode.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NavStack {
    /// The frame on screen, `None` while no panel is open.
    pub current: Option<Frame>,
    /// Previously visited frames, oldest first. Empty at the episode root.
    pub history: Vec<Frame>,
}

impl NavStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Frames on the stack including the current one. Zero when closed.
    pub fn depth(&self) -> usize {
        self.history.len() + usize::from(self.current.is_some())
    }

    /// Opens a panel at `frame`, replacing any existing episode entirely.
    pub fn open(&mut self, frame: Frame) {
        info!("nav: open '{}'", frame.book.title);
        self.history.clear();
        self.current = Some(frame);
    }

    /// Pushes the current frame onto history and displays `frame`.
    pub fn drill_into(&mut self, frame: Frame) -> Result<(), NavError> {
        let Some(previous) = self.current.take() else {
            return Err(NavError::NoCurrentFrame);
        };
        info!(
            "nav: drill '{}' -> '{}' (depth {})",
            previous.book.title,
            frame.book.title,
            self.history.len() + 2
        );
        self.history.push(previous);
        self.current = Some(frame);
        Ok(())
    }

    /// Pops the last history entry back into `current`. Returns `false`
    /// (and changes nothing) when there is nothing to go back to — the UI
    /// only shows the back affordance while `history` is non-empty.
    pub fn go_back(&mut self) -> bool {
        match self.history.pop() {
            Some(frame) => {
                info!("nav: back to '{}'", frame.book.title);
                self.current = Some(frame);
                true
            }
            None => false,
        }
    }

    /// Closes the panel entirely, regardless of depth.
    pub fn close_all(&mut self) {
        if self.is_open() {
            info!("nav: close (depth was {})", self.depth());
        }
        self.current = None;
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_frame;

    #[test]
    fn test_open_sets_current_and_clears_history() {
        let mut nav = NavStack::new();
        nav.open(test_frame("A"));
        nav.drill_into(test_frame("B")).unwrap();
        assert_eq!(nav.depth(), 2);

        // A fresh open replaces the whole episode
        nav.open(test_frame("C"));
        assert_eq!(nav.current.as_ref().unwrap().book.title, "C");
        assert!(nav.history.is_empty());
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_drill_grows_stack_by_one() {
        let mut nav = NavStack::new();
        nav.open(test_frame("A"));
        nav.drill_into(test_frame("B")).unwrap();
        nav.drill_into(test_frame("C")).unwrap();
        assert_eq!(nav.current.as_ref().unwrap().book.title, "C");
        assert_eq!(
            nav.history.iter().map(|f| f.book.title.as_str()).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
    }

    #[test]
    fn test_drill_without_current_is_logic_error() {
        let mut nav = NavStack::new();
        assert_eq!(nav.drill_into(test_frame("B")), Err(NavError::NoCurrentFrame));
        assert!(!nav.is_open());
    }

    #[test]
    fn test_go_back_pops_last_history_entry() {
        let mut nav = NavStack::new();
        nav.open(test_frame("A"));
        nav.drill_into(test_frame("B")).unwrap();
        nav.drill_into(test_frame("C")).unwrap();

        assert!(nav.go_back());
        assert_eq!(nav.current.as_ref().unwrap().book.title, "B");
        assert_eq!(nav.history.len(), 1);
        assert_eq!(nav.history[0].book.title, "A");
    }

    #[test]
    fn test_go_back_at_root_is_noop() {
        let mut nav = NavStack::new();
        nav.open(test_frame("A"));
        assert!(!nav.go_back());
        assert_eq!(nav.current.as_ref().unwrap().book.title, "A");
    }

    #[test]
    fn test_close_all_from_any_depth() {
        let mut nav = NavStack::new();
        nav.open(test_frame("A"));
        nav.drill_into(test_frame("B")).unwrap();
        nav.drill_into(test_frame("C")).unwrap();
        nav.close_all();
        assert!(nav.current.is_none());
        assert!(nav.history.is_empty());

        // Closing a closed stack is fine
        nav.close_all();
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    fn test_depth_conservation_over_mixed_sequence() {
        // depth == pushes - pops for any open/drill/back sequence
        let mut nav = NavStack::new();
        nav.open(test_frame("A")); // depth 1
        nav.drill_into(test_frame("B")).unwrap(); // 2
        nav.drill_into(test_frame("C")).unwrap(); // 3
        nav.go_back(); // 2
        nav.drill_into(test_frame("D")).unwrap(); // 3
        nav.go_back(); // 2
        nav.go_back(); // 1
        nav.go_back(); // clamped at the episode root
        assert_eq!(nav.depth(), 1);
    }
}
