//! Debounced search input.
//!
//! Time is injected as [`Instant`] so the controllers can be driven from the
//! UI tick and tested without sleeping.

use std::time::{Duration, Instant};

/// Default quiet period before a typed term is committed.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(500);

/// Delays a value until input has been stable for a quiet period.
///
/// Each [`push`](Self::push) replaces any pending value and restarts the
/// window.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Quiet period.
    #[must_use]
    pub const fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Schedules `value` to settle `quiet` after `now`, cancelling any
    /// pending value.
    pub fn push(&mut self, value: T, now: Instant) {
        let deadline = now.checked_add(self.quiet).unwrap_or(now);
        self.pending = Some((value, deadline));
    }

    /// Returns the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if deadline <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Drops the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a value is waiting to settle.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending value.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}

/// Search box state: the live `term` and the committed `debounced_term`.
///
/// `debounced_term` only ever takes a value `term` previously held.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct QueryController {
    term: String,
    debounced_term: String,
    debouncer: Debouncer<String>,
}

impl QueryController {
    /// Creates an empty controller.
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            term: String::new(),
            debounced_term: String::new(),
            debouncer: Debouncer::new(quiet),
        }
    }

    /// Live input.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Last committed input.
    #[must_use]
    pub fn debounced_term(&self) -> &str {
        &self.debounced_term
    }

    /// Whether typed input is still waiting out the quiet period.
    #[must_use]
    pub const fn is_settling(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Replaces the live input.
    pub fn set_term(&mut self, term: impl Into<String>, now: Instant) {
        self.term = term.into();
        self.debouncer.push(self.term.clone(), now);
    }

    /// Appends a character.
    pub fn push_char(&mut self, c: char, now: Instant) {
        self.term.push(c);
        self.debouncer.push(self.term.clone(), now);
    }

    /// Removes the last character. No-op on empty input.
    pub fn pop_char(&mut self, now: Instant) {
        if self.term.pop().is_some() {
            self.debouncer.push(self.term.clone(), now);
        }
    }

    /// Empties the live input.
    pub fn clear(&mut self, now: Instant) {
        if !self.term.is_empty() {
            self.term.clear();
            self.debouncer.push(String::new(), now);
        }
    }

    /// Commits a settled term. Returns `true` when `debounced_term` changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(settled) = self.debouncer.poll(now) else {
            return false;
        };
        self.commit(settled)
    }

    /// Commits the live input immediately. Returns `true` when
    /// `debounced_term` changed.
    pub fn commit_now(&mut self) -> bool {
        self.debouncer.cancel();
        self.commit(self.term.clone())
    }

    fn commit(&mut self, term: String) -> bool {
        if term == self.debounced_term {
            return false;
        }
        self.debounced_term = term;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_debouncer_settles_after_quiet_period() {
        // Arrange
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(500));

        // Act
        debouncer.push("a", t0);

        // Assert
        assert_eq!(debouncer.poll(t0 + ms(499)), None);
        assert_eq!(debouncer.poll(t0 + ms(500)), Some("a"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_debouncer_push_restarts_window() {
        // Arrange
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(500));

        // Act
        debouncer.push(1, t0);
        debouncer.push(2, t0 + ms(300));

        // Assert
        assert_eq!(debouncer.poll(t0 + ms(600)), None);
        assert_eq!(debouncer.deadline(), Some(t0 + ms(800)));
        assert_eq!(debouncer.poll(t0 + ms(800)), Some(2));
    }

    #[test]
    fn test_debouncer_cancel() {
        // Arrange
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(500));
        debouncer.push("x", t0);

        // Act
        debouncer.cancel();

        // Assert
        assert_eq!(debouncer.poll(t0 + ms(1_000)), None);
    }

    #[test]
    fn test_fast_keystrokes_commit_only_final_value() {
        // Arrange
        let t0 = Instant::now();
        let mut query = QueryController::new(DEFAULT_QUIET);
        let mut commits = Vec::new();

        // Act: "bat" then "batman", each keystroke 100ms apart
        for (i, c) in "batman".chars().enumerate() {
            let now = t0 + ms(100 * u64::try_from(i).unwrap_or(0));
            query.push_char(c, now);
            if query.poll(now) {
                commits.push(String::from(query.debounced_term()));
            }
        }
        let end = t0 + ms(500 + 500);
        if query.poll(end) {
            commits.push(String::from(query.debounced_term()));
        }

        // Assert
        assert_eq!(commits, ["batman"]);
        assert_eq!(query.term(), "batman");
    }

    #[test]
    fn test_unchanged_term_does_not_commit() {
        // Arrange
        let t0 = Instant::now();
        let mut query = QueryController::new(ms(500));
        query.set_term("dune", t0);
        assert!(query.poll(t0 + ms(500)));

        // Act: type and delete a character within the window
        query.push_char('x', t0 + ms(600));
        query.pop_char(t0 + ms(700));

        // Assert
        assert!(!query.poll(t0 + ms(1_200)));
        assert_eq!(query.debounced_term(), "dune");
    }

    #[test]
    fn test_commit_now_skips_quiet_period() {
        // Arrange
        let t0 = Instant::now();
        let mut query = QueryController::new(ms(500));
        query.set_term("alien", t0);

        // Act
        let changed = query.commit_now();

        // Assert
        assert!(changed);
        assert_eq!(query.debounced_term(), "alien");
        assert!(!query.is_settling());
        assert!(!query.poll(t0 + ms(500)));
    }

    #[test]
    fn test_clear_commits_empty_term() {
        // Arrange
        let t0 = Instant::now();
        let mut query = QueryController::new(ms(500));
        query.set_term("heat", t0);
        query.commit_now();

        // Act
        query.clear(t0 + ms(10));

        // Assert
        assert_eq!(query.term(), "");
        assert!(query.poll(t0 + ms(510)));
        assert_eq!(query.debounced_term(), "");
    }
}
