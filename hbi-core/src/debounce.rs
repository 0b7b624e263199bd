//! Search input debouncing.
//!
//! The clock is passed in by the caller so the debouncer stays synchronous
//! and deterministic under test.

use std::time::{Duration, Instant};

/// Default quiet period before a search term is applied.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Releases the latest search term once input has been quiet long enough.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    quiet: Duration,
    pending: Option<(String, Instant)>,
    applied: String,
}

impl SearchDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            applied: String::new(),
        }
    }

    /// Record a keystroke. Replaces any term still waiting.
    pub fn submit(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some((term.into(), now));
    }

    /// Release the pending term if the quiet period has elapsed.
    ///
    /// Returns `None` while waiting, or when the term equals the one already
    /// applied.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = matches!(
            &self.pending,
            Some((_, at)) if now.saturating_duration_since(*at) >= self.quiet
        );
        if !ready {
            return None;
        }
        let (term, _) = self.pending.take()?;
        self.release(term)
    }

    /// Release the pending term immediately (e.g. on Enter).
    pub fn flush(&mut self) -> Option<String> {
        let (term, _) = self.pending.take()?;
        self.release(term)
    }

    /// Term currently applied to the table.
    pub fn applied(&self) -> &str {
        &self.applied
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn release(&mut self, term: String) -> Option<String> {
        if term == self.applied {
            return None;
        }
        self.applied = term.clone();
        Some(term)
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_releases_only_latest_term_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::default();

        debouncer.submit("e", start);
        debouncer.submit("el", start + Duration::from_millis(100));
        debouncer.submit("ele", start + Duration::from_millis(200));

        assert_eq!(debouncer.poll(start + Duration::from_millis(300)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(450)),
            Some("ele".to_string())
        );
        assert_eq!(debouncer.applied(), "ele");
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_unchanged_term_is_not_released_again() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(50));

        debouncer.submit("plumb", start);
        assert_eq!(debouncer.flush(), Some("plumb".to_string()));

        debouncer.submit("plumb", start + Duration::from_millis(10));
        assert_eq!(debouncer.poll(start + Duration::from_millis(100)), None);
    }
}
