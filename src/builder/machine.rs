//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{Event, State, StateValue, DEFAULT_HISTORY_LIMIT};
use crate::machine::StateMachine;

/// Builder for constructing state machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use waypoint::builder::StateMachineBuilder;
/// use waypoint::{Event, State};
///
/// let mut machine = StateMachineBuilder::new()
///     .initial_value("Locked")
///     .state(State::new("Unlocked"))
///     .event(Event::new("Coin", ["Locked"], "Unlocked"))
///     .event(Event::new("Push", ["Unlocked"], "Locked"))
///     .history_limit(16)
///     .build()
///     .unwrap();
///
/// assert!(machine.fire_event("Coin").is_successful());
/// assert!(machine.is_in_state(&"Unlocked"));
/// ```
pub struct StateMachineBuilder<T: StateValue> {
    initial: Option<State<T>>,
    states: Vec<State<T>>,
    events: Vec<Event<T>>,
    history_limit: usize,
}

impl<T: StateValue> StateMachineBuilder<T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
            events: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: State<T>) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the initial state from a bare value.
    pub fn initial_value(self, value: T) -> Self {
        self.initial(State::new(value))
    }

    /// Add a state.
    pub fn state(mut self, state: State<T>) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple states at once.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = State<T>>,
    {
        self.states.extend(states);
        self
    }

    /// Add an event. Events are validated in `build()`.
    pub fn event(mut self, event: Event<T>) -> Self {
        self.events.push(event);
        self
    }

    /// Add multiple events at once.
    pub fn events<I>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = Event<T>>,
    {
        self.events.extend(events);
        self
    }

    /// Maximum number of history entries to keep; zero disables history.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Build the state machine.
    ///
    /// States are registered before events, so events may refer to any
    /// state added to the builder regardless of call order.
    pub fn build(self) -> Result<StateMachine<T>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut machine = StateMachine::with_states(initial, self.states)
            .with_history_limit(self.history_limit);
        for event in self.events {
            machine.add_event(event)?;
        }

        Ok(machine)
    }
}

impl<T: StateValue> Default for StateMachineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
