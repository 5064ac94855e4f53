//! # Host History Link
//!
//! The navigation core keeps a one-bit correspondence with the host's
//! history mechanism: exactly one entry is recorded per panel-open
//! episode, and a back action (gesture or programmatic) consumes it.
//! The core never talks to the host directly — it goes through this
//! capability trait, so the lockstep rule is testable without a real
//! host environment.

use log::warn;

/// Minimal capability surface of the host's history mechanism.
pub trait HostHistory {
    /// Record the one synthetic entry for a panel-open episode.
    fn record_entry(&mut self);
    /// Consume the recorded entry (native gesture or programmatic back).
    fn go_back(&mut self);
    /// True while an entry is recorded for the open panel.
    fn has_entry(&self) -> bool;
}

/// The terminal host: there is no browser history here, so the "history
/// mechanism" is a counter the key loop consults to decide whether Esc
/// means "native back" (panel entry exists) or "quit" (no entry).
#[derive(Debug, Default)]
pub struct TerminalHistory {
    entries: usize,
}

impl TerminalHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HostHistory for TerminalHistory {
    fn record_entry(&mut self) {
        if self.entries > 0 {
            // One entry per episode; a second record is a lockstep bug.
            warn!("Host history entry recorded while one already exists");
        }
        self.entries += 1;
    }

    fn go_back(&mut self) {
        if self.entries == 0 {
            warn!("Host history go_back with no recorded entry");
            return;
        }
        self.entries -= 1;
    }

    fn has_entry(&self) -> bool {
        self.entries > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, Effect, update};
    use crate::core::state::App;
    use crate::test_support::{test_app, test_frame};

    /// Applies an action and mirrors its history effects onto `host`,
    /// exactly as the run loop does.
    fn dispatch(app: &mut App, host: &mut TerminalHistory, action: Action) {
        match update(app, action) {
            Effect::Enrich { record_entry: true, .. } => host.record_entry(),
            Effect::UnwindEntry => host.go_back(),
            _ => {}
        }
    }

    #[test]
    fn test_one_entry_per_episode() {
        let mut app = test_app();
        let mut host = TerminalHistory::new();

        dispatch(&mut app, &mut host, Action::OpenFrame(test_frame("A")));
        assert!(host.has_entry());

        dispatch(&mut app, &mut host, Action::DrillInto(test_frame("B")));
        dispatch(&mut app, &mut host, Action::DrillInto(test_frame("C")));
        assert!(host.has_entry(), "drilling never records additional entries");

        dispatch(&mut app, &mut host, Action::GoBack);
        assert!(host.has_entry());
    }

    #[test]
    fn test_dismiss_consumes_the_entry() {
        let mut app = test_app();
        let mut host = TerminalHistory::new();

        dispatch(&mut app, &mut host, Action::OpenFrame(test_frame("A")));
        dispatch(&mut app, &mut host, Action::Dismiss);
        assert!(!host.has_entry());
        assert!(!app.nav.is_open());
    }

    #[test]
    fn test_native_back_path_does_not_unwind_twice() {
        let mut app = test_app();
        let mut host = TerminalHistory::new();

        dispatch(&mut app, &mut host, Action::OpenFrame(test_frame("A")));

        // The gesture consumes the entry before the core hears about it.
        host.go_back();
        dispatch(&mut app, &mut host, Action::NativeBack);
        assert!(!host.has_entry());
        assert!(!app.nav.is_open());
    }

    #[test]
    fn test_reopen_records_a_fresh_entry() {
        let mut app = test_app();
        let mut host = TerminalHistory::new();

        dispatch(&mut app, &mut host, Action::OpenFrame(test_frame("A")));
        dispatch(&mut app, &mut host, Action::Dismiss);
        dispatch(&mut app, &mut host, Action::OpenFrame(test_frame("B")));
        assert!(host.has_entry());
    }

    #[test]
    fn test_go_back_on_empty_host_is_guarded() {
        let mut host = TerminalHistory::new();
        host.go_back();
        assert!(!host.has_entry());
    }
}
