//! Builder for constructing events.

use crate::builder::error::BuildError;
use crate::core::{Callback, Event, Guard};
use std::rc::Rc;

/// Builder for constructing events with a fluent API.
///
/// # Example
///
/// ```rust
/// use waypoint::builder::EventBuilder;
///
/// let event = EventBuilder::new()
///     .name("Mark as unread")
///     .from("Read")
///     .from("Deleted")
///     .to("Unread")
///     .build()
///     .unwrap();
///
/// assert_eq!(event.source_values(), &["Read", "Deleted"]);
/// ```
pub struct EventBuilder<T> {
    name: Option<String>,
    sources: Vec<T>,
    destination: Option<T>,
    guard: Option<Guard<T>>,
    will_fire: Option<Callback<Event<T>>>,
    did_fire: Option<Callback<Event<T>>>,
}

impl<T> EventBuilder<T> {
    /// Create a new event builder.
    pub fn new() -> Self {
        Self {
            name: None,
            sources: Vec::new(),
            destination: None,
            guard: None,
            will_fire: None,
            did_fire: None,
        }
    }

    /// Set the event name (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a source value (at least one required).
    pub fn from(mut self, value: T) -> Self {
        self.sources.push(value);
        self
    }

    /// Add several source values.
    pub fn from_any<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        self.sources.extend(values);
        self
    }

    /// Set the destination value (required).
    pub fn to(mut self, value: T) -> Self {
        self.destination = Some(value);
        self
    }

    /// Add a prebuilt guard (optional).
    pub fn guard(mut self, guard: Guard<T>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Event<T>) -> bool + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Attach a will-fire hook (optional).
    pub fn on_will_fire<F>(mut self, f: F) -> Self
    where
        F: Fn(&Event<T>) + 'static,
    {
        self.will_fire = Some(Rc::new(f));
        self
    }

    /// Attach a did-fire hook (optional).
    pub fn on_did_fire<F>(mut self, f: F) -> Self
    where
        F: Fn(&Event<T>) + 'static,
    {
        self.did_fire = Some(Rc::new(f));
        self
    }

    /// Build the event.
    ///
    /// Only checks that the event is complete; whether its values are
    /// registered states is checked when it is added to a machine.
    pub fn build(self) -> Result<Event<T>, BuildError> {
        let name = self.name.ok_or(BuildError::MissingName)?;
        if self.sources.is_empty() {
            return Err(BuildError::MissingSourceValues);
        }
        let destination = self.destination.ok_or(BuildError::MissingDestination)?;

        let mut event = Event::new(name, self.sources, destination);
        event.should_fire = self.guard;
        event.will_fire = self.will_fire;
        event.did_fire = self.did_fire;
        Ok(event)
    }
}

impl<T> Default for EventBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
