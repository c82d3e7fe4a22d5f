//! The state machine: registries, activation and event firing.

use crate::core::{Event, EventName, State, StateHistory, StateTransition, StateValue};
use crate::machine::transition::{EventError, Transition, TransitionError};
use chrono::Utc;
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, trace, warn};

/// A finite-state machine over state values of type `T`.
///
/// The machine owns its registered states and events. States are unique by
/// value and kept in registration order; events are kept in registration
/// order and may share names. The current state is always one of the
/// registered states.
///
/// A machine is meant to be driven from a single thread. Hooks and guards
/// run synchronously inside the call that triggered them.
///
/// # Example
///
/// ```rust
/// use waypoint::{Event, State, StateMachine};
///
/// let mut machine = StateMachine::with_states(
///     State::new("Unread"),
///     [State::new("Read"), State::new("Deleted")],
/// );
///
/// machine
///     .add_event(Event::new("View message", ["Unread"], "Read"))
///     .unwrap();
///
/// let transition = machine.fire_event("View message");
///
/// assert!(transition.is_successful());
/// assert!(machine.is_in_state(&"Read"));
/// assert!(!machine.is_in_state(&"Unread"));
/// ```
#[derive(Debug)]
pub struct StateMachine<T: StateValue> {
    available_states: Vec<State<T>>,
    index: HashMap<T, usize>,
    events: Vec<Event<T>>,
    initial: usize,
    current: usize,
    history: StateHistory<T>,
}

impl<T: StateValue> StateMachine<T> {
    /// Create a machine whose initial and current state is `initial`.
    pub fn new(initial: State<T>) -> Self {
        let mut index = HashMap::new();
        index.insert(initial.value().clone(), 0);
        Self {
            available_states: vec![initial],
            index,
            events: Vec::new(),
            initial: 0,
            current: 0,
            history: StateHistory::new(),
        }
    }

    /// Create a machine from a bare initial value.
    pub fn with_initial_value(value: T) -> Self {
        Self::new(State::new(value))
    }

    /// Create a machine and register `states` after the initial one.
    ///
    /// The initial state may be repeated in `states`; the duplicate is ignored.
    pub fn with_states<I>(initial: State<T>, states: I) -> Self
    where
        I: IntoIterator<Item = State<T>>,
    {
        let mut machine = Self::new(initial);
        machine.add_states(states);
        machine
    }

    /// Keep at most `limit` history entries; zero disables history.
    ///
    /// Replaces the current history, so call it before driving the machine.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = StateHistory::with_limit(limit);
        self
    }

    /// The state the machine was created with.
    pub fn initial_state(&self) -> &State<T> {
        &self.available_states[self.initial]
    }

    /// The registered state the machine is currently in.
    pub fn current_state(&self) -> &State<T> {
        &self.available_states[self.current]
    }

    /// Identity value of the current state.
    pub fn current_value(&self) -> &T {
        self.current_state().value()
    }

    /// Registered states in registration order.
    pub fn available_states(&self) -> &[State<T>] {
        &self.available_states
    }

    /// Registered events in registration order.
    pub fn events(&self) -> &[Event<T>] {
        &self.events
    }

    /// Completed state changes, oldest first.
    pub fn history(&self) -> &StateHistory<T> {
        &self.history
    }

    /// Register a state. A state whose value is already registered is ignored,
    /// keeping the first registration and its hooks.
    pub fn add_state(&mut self, state: State<T>) {
        if self.index.contains_key(state.value()) {
            trace!(value = ?state.value(), "state already registered, ignoring");
            return;
        }
        self.index
            .insert(state.value().clone(), self.available_states.len());
        self.available_states.push(state);
    }

    /// Register several states, skipping values that are already present.
    pub fn add_states<I>(&mut self, states: I)
    where
        I: IntoIterator<Item = State<T>>,
    {
        for state in states {
            self.add_state(state);
        }
    }

    /// Whether a state with `value` is registered.
    pub fn is_state_available(&self, value: &T) -> bool {
        self.index.contains_key(value)
    }

    /// Whether the current state has `value`.
    pub fn is_in_state(&self, value: &T) -> bool {
        self.current_value() == value
    }

    /// The registered state with `value`, if any.
    pub fn state_with_value(&self, value: &T) -> Option<&State<T>> {
        self.index.get(value).map(|&i| &self.available_states[i])
    }

    /// Mutable access to a registered state, for attaching hooks after registration.
    pub fn state_with_value_mut(&mut self, value: &T) -> Option<&mut State<T>> {
        let i = *self.index.get(value)?;
        self.available_states.get_mut(i)
    }

    /// Check `event` against the registered states, accumulating every violation.
    ///
    /// Violations are reported in check order: an empty source list, then
    /// each unregistered source value, then an unregistered destination.
    pub fn validate_event(&self, event: &Event<T>) -> Validation<(), NonEmptyVec<EventError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<EventError>>> = Vec::new();

        // At least one source
        checks.push(if event.source_values().is_empty() {
            Validation::fail(EventError::NoSourceValue {
                event: event.name().to_string(),
                value: None,
            })
        } else {
            Validation::success(())
        });

        // Every source registered
        for value in event.source_values() {
            checks.push(if self.is_state_available(value) {
                Validation::success(())
            } else {
                Validation::fail(EventError::NoSourceValue {
                    event: event.name().to_string(),
                    value: Some(format!("{value:?}")),
                })
            });
        }

        // Destination registered
        checks.push(if self.is_state_available(event.destination_value()) {
            Validation::success(())
        } else {
            Validation::fail(EventError::NoDestinationValue {
                event: event.name().to_string(),
                value: format!("{:?}", event.destination_value()),
            })
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// Register an event.
    ///
    /// Every source value and the destination value must already be
    /// registered states. On failure the event is dropped, the registry is
    /// left untouched, and the first violation is returned.
    pub fn add_event(&mut self, event: Event<T>) -> Result<(), EventError> {
        if let Validation::Failure(violations) = self.validate_event(&event) {
            if let Some(error) = violations.iter().next().cloned() {
                warn!(event = %event.name(), %error, "rejected event registration");
                return Err(error);
            }
        }
        self.events.push(event);
        Ok(())
    }

    /// Register several events independently.
    ///
    /// An invalid event is skipped with a warning and does not stop the
    /// batch. The skipped events' errors are returned in order.
    pub fn add_events<I>(&mut self, events: I) -> Vec<EventError>
    where
        I: IntoIterator<Item = Event<T>>,
    {
        let mut failures = Vec::new();
        for event in events {
            if let Err(error) = self.add_event(event) {
                debug!(event = %error.event_name(), "skipping event in batch");
                failures.push(error);
            }
        }
        failures
    }

    /// All registered events named `name`, in registration order.
    pub fn events_with_name<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Event<T>> + 'a {
        self.events.iter().filter(move |e| e.name() == name)
    }

    /// The first registered event named `name`.
    pub fn event_with_name(&self, name: &str) -> Option<&Event<T>> {
        self.events.iter().find(|e| e.name() == name)
    }

    /// Mutable access to the first registered event named `name`.
    pub fn event_with_name_mut(&mut self, name: &str) -> Option<&mut Event<T>> {
        self.events.iter_mut().find(|e| e.name() == name)
    }

    /// Switch to the registered state with `value`, ignoring events entirely.
    ///
    /// Hooks run in this order: new state's will-enter, old state's
    /// will-exit, the switch, old state's did-exit, new state's did-enter.
    /// Activating an unregistered value does nothing.
    pub fn activate_state(&mut self, value: &T) {
        let Some(&next) = self.index.get(value) else {
            trace!(value = ?value, "ignoring activation of unregistered state");
            return;
        };
        activate(
            &self.available_states,
            &mut self.current,
            &mut self.history,
            next,
            None,
        );
    }

    /// Find the event that would fire for `name` from the current state.
    fn resolve(&self, name: &str) -> Result<usize, TransitionError> {
        let current = self.current_value();
        let mut known = false;
        for (i, event) in self.events.iter().enumerate() {
            if event.name() != name {
                continue;
            }
            if event.has_source(current) {
                return Ok(i);
            }
            known = true;
        }
        if known {
            Err(TransitionError::WrongSourceState)
        } else {
            Err(TransitionError::UnknownEvent)
        }
    }

    /// Describe what firing `event` would do, without firing it.
    ///
    /// Guards are not evaluated and no hooks run, so a successful preview
    /// can still be declined by [`fire_event`](Self::fire_event).
    pub fn possible_transition<E>(&self, event: &E) -> Transition<T>
    where
        E: EventName + ?Sized,
    {
        match self.resolve(event.event_name()) {
            Ok(i) => Transition::Success {
                source: self.current_state().clone(),
                destination: State::new(self.events[i].destination_value().clone()),
            },
            Err(error) => Transition::Error(error),
        }
    }

    /// Whether `event` is registered and lists the current state as a source.
    ///
    /// This is a structural check: the event's guard is not consulted.
    pub fn can_fire_event<E>(&self, event: &E) -> bool
    where
        E: EventName + ?Sized,
    {
        self.resolve(event.event_name()).is_ok()
    }

    /// Fire the event named by `event`.
    ///
    /// Events with that name are tried in registration order. The first one
    /// whose sources include the current state decides the outcome: if its
    /// guard declines, the result is [`TransitionError::TransitionDeclined`]
    /// and later events with the same name are not tried. Otherwise its
    /// will-fire hook runs, the destination state is activated with its
    /// enter/exit hooks, and its did-fire hook runs.
    pub fn fire_event<E>(&mut self, event: &E) -> Transition<T>
    where
        E: EventName + ?Sized,
    {
        let name = event.event_name();
        let i = match self.resolve(name) {
            Ok(i) => i,
            Err(error) => {
                debug!(event = %name, %error, "event cannot fire");
                return Transition::Error(error);
            }
        };

        let event = &self.events[i];
        if !event.passes_guard() {
            debug!(event = %name, "event declined by guard");
            return Transition::Error(TransitionError::TransitionDeclined);
        }

        let source = self.available_states[self.current].clone();
        let destination = State::new(event.destination_value().clone());

        event.fire_will_fire();
        if let Some(&next) = self.index.get(event.destination_value()) {
            activate(
                &self.available_states,
                &mut self.current,
                &mut self.history,
                next,
                Some(name),
            );
        }
        event.fire_did_fire();

        debug!(
            event = %name,
            from = ?source.value(),
            to = ?destination.value(),
            "event fired"
        );
        Transition::Success {
            source,
            destination,
        }
    }
}

/// Switch `current` to `next`, running the enter/exit hooks around the switch.
fn activate<T: StateValue>(
    states: &[State<T>],
    current: &mut usize,
    history: &mut StateHistory<T>,
    next: usize,
    event: Option<&str>,
) {
    let old_state = &states[*current];
    let new_state = &states[next];
    trace!(from = ?old_state.value(), to = ?new_state.value(), "activating state");

    new_state.fire_will_enter();
    old_state.fire_will_exit();

    *current = next;

    old_state.fire_did_exit();
    new_state.fire_did_enter();

    history.record(StateTransition {
        from: old_state.value().clone(),
        to: new_state.value().clone(),
        event: event.map(str::to_string),
        timestamp: Utc::now(),
    });
}
