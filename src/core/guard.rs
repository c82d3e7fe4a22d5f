//! Guard predicates for vetoing event transitions.
//!
//! A guard is consulted only when an event is actually fired, after the
//! machine has confirmed the event is registered and the current state is one
//! of its sources. Structural checks such as
//! [`StateMachine::can_fire_event`](crate::StateMachine::can_fire_event) never
//! evaluate it.

use super::event::Event;
use std::fmt;
use std::rc::Rc;

/// Predicate that decides whether an otherwise eligible event may fire.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Event, Guard};
///
/// let event = Event::new("Coin", vec!["Locked"], "Unlocked");
///
/// let always = Guard::new(|_: &Event<&str>| true);
/// let never = Guard::new(|_: &Event<&str>| false);
///
/// assert!(always.check(&event));
/// assert!(!never.check(&event));
/// ```
pub struct Guard<T> {
    predicate: Rc<dyn Fn(&Event<T>) -> bool>,
}

impl<T> Guard<T> {
    /// Create a guard from a predicate over the firing event.
    ///
    /// The predicate may capture host state; it runs synchronously on the
    /// thread that fires the event.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Event<T>) -> bool + 'static,
    {
        Guard {
            predicate: Rc::new(predicate),
        }
    }

    /// Evaluate the guard for `event`.
    pub fn check(&self, event: &Event<T>) -> bool {
        (self.predicate)(event)
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Rc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
