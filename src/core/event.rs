//! Named events that move the machine between states.

use super::guard::Guard;
use super::state::Callback;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A named transition rule: from any of `source_values` to `destination_value`.
///
/// Events are identified by name alone. Two events with the same name are
/// equal even if their sources or destinations differ, and the machine
/// resolves a name to every registered event carrying it, in registration
/// order. Registering several events under one name is allowed but makes the
/// outcome of firing that name depend on the current state.
///
/// # Example
///
/// ```rust
/// use waypoint::core::Event;
///
/// let view = Event::new("View message", ["Unread"], "Read")
///     .when(|_| true)
///     .on_did_fire(|e| println!("fired {}", e.name()));
///
/// assert_eq!(view.name(), "View message");
/// assert_eq!(view.source_values(), &["Unread"]);
/// assert_eq!(view.destination_value(), &"Read");
/// ```
pub struct Event<T> {
    name: String,
    source_values: Vec<T>,
    destination_value: T,
    /// Guard consulted right before firing; absent means "always fire".
    pub should_fire: Option<Guard<T>>,
    /// Called before the machine activates the destination state.
    pub will_fire: Option<Callback<Event<T>>>,
    /// Called after the destination state has been activated.
    pub did_fire: Option<Callback<Event<T>>>,
}

impl<T> Event<T> {
    /// Create an event without a guard or hooks.
    pub fn new<N, I>(name: N, source_values: I, destination_value: T) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = T>,
    {
        Self {
            name: name.into(),
            source_values: source_values.into_iter().collect(),
            destination_value,
            should_fire: None,
            will_fire: None,
            did_fire: None,
        }
    }

    /// The name the machine resolves this event by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// States from which this event may fire, in declaration order.
    pub fn source_values(&self) -> &[T] {
        &self.source_values
    }

    /// State the machine moves to when this event fires.
    pub fn destination_value(&self) -> &T {
        &self.destination_value
    }

    /// Attach a guard predicate.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Event<T>) -> bool + 'static,
    {
        self.set_should_fire(predicate);
        self
    }

    /// Attach a will-fire hook.
    pub fn on_will_fire<F>(mut self, f: F) -> Self
    where
        F: Fn(&Event<T>) + 'static,
    {
        self.set_will_fire(f);
        self
    }

    /// Attach a did-fire hook.
    pub fn on_did_fire<F>(mut self, f: F) -> Self
    where
        F: Fn(&Event<T>) + 'static,
    {
        self.set_did_fire(f);
        self
    }

    /// Replace the guard.
    pub fn set_should_fire<F>(&mut self, predicate: F)
    where
        F: Fn(&Event<T>) -> bool + 'static,
    {
        self.should_fire = Some(Guard::new(predicate));
    }

    /// Replace the will-fire hook.
    pub fn set_will_fire<F>(&mut self, f: F)
    where
        F: Fn(&Event<T>) + 'static,
    {
        self.will_fire = Some(Rc::new(f));
    }

    /// Replace the did-fire hook.
    pub fn set_did_fire<F>(&mut self, f: F)
    where
        F: Fn(&Event<T>) + 'static,
    {
        self.did_fire = Some(Rc::new(f));
    }

    /// Evaluate the guard. Events without a guard always pass.
    pub fn passes_guard(&self) -> bool {
        self.should_fire.as_ref().is_none_or(|g| g.check(self))
    }

    pub(crate) fn fire_will_fire(&self) {
        if let Some(hook) = &self.will_fire {
            hook(self);
        }
    }

    pub(crate) fn fire_did_fire(&self) {
        if let Some(hook) = &self.did_fire {
            hook(self);
        }
    }
}

impl<T: PartialEq> Event<T> {
    /// Whether `value` is one of this event's source values.
    pub fn has_source(&self, value: &T) -> bool {
        self.source_values.contains(value)
    }
}

impl<T: Clone> Clone for Event<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            source_values: self.source_values.clone(),
            destination_value: self.destination_value.clone(),
            should_fire: self.should_fire.clone(),
            will_fire: self.will_fire.clone(),
            did_fire: self.did_fire.clone(),
        }
    }
}

impl<T> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for Event<T> {}

impl<T> Hash for Event<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T: Debug> Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("source_values", &self.source_values)
            .field("destination_value", &self.destination_value)
            .field("guarded", &self.should_fire.is_some())
            .finish()
    }
}

/// Anything that names an event: a string or an [`Event`] itself.
///
/// Lets [`StateMachine::fire_event`](crate::StateMachine::fire_event) and
/// friends accept either form.
pub trait EventName {
    fn event_name(&self) -> &str;
}

impl EventName for str {
    fn event_name(&self) -> &str {
        self
    }
}

impl EventName for String {
    fn event_name(&self) -> &str {
        self
    }
}

impl<T> EventName for Event<T> {
    fn event_name(&self) -> &str {
        &self.name
    }
}
