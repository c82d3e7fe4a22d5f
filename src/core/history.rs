//! Bounded history of completed state changes.
//!
//! Every activation the machine performs, whether requested directly or
//! through an event, is recorded here. The history is kept for inspection
//! and auditing by the host; it is not used to restore a machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Number of entries a machine keeps unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Record of a single completed state change.
///
/// # Example
///
/// ```rust
/// use waypoint::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "Unread",
///     to: "Read",
///     event: Some("View message".to_string()),
///     timestamp: Utc::now(),
/// };
///
/// assert!(transition.is_event_driven());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition<T> {
    /// The state being left
    pub from: T,
    /// The state being entered
    pub to: T,
    /// Name of the event that caused the change, `None` for direct activation
    pub event: Option<String>,
    /// When the change completed
    pub timestamp: DateTime<Utc>,
}

impl<T> StateTransition<T> {
    pub fn is_event_driven(&self) -> bool {
        self.event.is_some()
    }
}

/// Ordered, bounded history of state changes.
///
/// Once `limit` entries are stored, recording another drops the oldest one.
/// A limit of zero disables recording entirely.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_limit(10);
///
/// history.record(StateTransition {
///     from: 1,
///     to: 2,
///     event: None,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: 2,
///     to: 3,
///     event: Some("advance".to_string()),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&1, &2, &3]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<T> {
    transitions: VecDeque<StateTransition<T>>,
    limit: usize,
}

impl<T> Default for StateHistory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StateHistory<T> {
    /// Create an empty history with [`DEFAULT_HISTORY_LIMIT`].
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an empty history that keeps at most `limit` entries.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append a transition, evicting the oldest entries beyond the limit.
    pub fn record(&mut self, transition: StateTransition<T>) {
        if self.limit == 0 {
            return;
        }
        self.transitions.push_back(transition);
        while self.transitions.len() > self.limit {
            self.transitions.pop_front();
        }
    }

    /// The path of states traversed by the retained entries.
    ///
    /// Starts with the `from` of the oldest retained entry, followed by the
    /// `to` of every entry.
    pub fn get_path(&self) -> Vec<&T> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the oldest and newest retained entries.
    ///
    /// Returns `None` if there are no entries.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained entries, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<T>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition<T>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    fn step(from: TestState, to: TestState) -> StateTransition<TestState> {
        StateTransition {
            from,
            to,
            event: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.limit(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn record_appends_in_order() {
        let mut history = StateHistory::new();
        history.record(step(TestState::Initial, TestState::Processing));
        history.record(step(TestState::Processing, TestState::Complete));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &TestState::Initial);
        assert_eq!(path[1], &TestState::Processing);
        assert_eq!(path[2], &TestState::Complete);
        assert_eq!(history.last().map(|t| &t.to), Some(&TestState::Complete));
    }

    #[test]
    fn oldest_entries_are_evicted_past_the_limit() {
        let mut history = StateHistory::with_limit(2);
        history.record(step(TestState::Initial, TestState::Processing));
        history.record(step(TestState::Processing, TestState::Complete));
        history.record(step(TestState::Complete, TestState::Initial));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get_path(),
            vec![
                &TestState::Processing,
                &TestState::Complete,
                &TestState::Initial
            ]
        );
    }

    #[test]
    fn zero_limit_disables_recording() {
        let mut history = StateHistory::with_limit(0);
        history.record(step(TestState::Initial, TestState::Processing));
        assert!(history.is_empty());
    }

    #[test]
    fn duration_spans_first_to_last() {
        let mut history = StateHistory::new();
        let start = Utc::now();
        history.record(StateTransition {
            from: TestState::Initial,
            to: TestState::Processing,
            event: None,
            timestamp: start,
        });
        history.record(StateTransition {
            from: TestState::Processing,
            to: TestState::Complete,
            event: None,
            timestamp: start + chrono::Duration::milliseconds(25),
        });

        assert_eq!(history.duration(), Some(Duration::from_millis(25)));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let mut history = StateHistory::new();
        history.record(step(TestState::Initial, TestState::Processing));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::with_limit(5);
        history.record(StateTransition {
            from: TestState::Initial,
            to: TestState::Processing,
            event: Some("start".to_string()),
            timestamp: Utc::now(),
        });

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.limit(), 5);
        assert_eq!(deserialized.last(), history.last());
    }
}
