//! Waypoint: an embeddable finite-state machine
//!
//! A [`StateMachine`] tracks a current state among a set of registered
//! states, and moves between them when named events fire. Hosts observe and
//! veto transitions through hooks attached to states and events.
//!
//! # Core Concepts
//!
//! - **State**: an identity value with optional will/did enter/exit hooks
//! - **Event**: a named rule from one or more source values to a destination,
//!   with an optional guard and will/did fire hooks
//! - **Transition**: the outcome of firing an event, success or a classified error
//! - **Activation**: a direct state change that bypasses events
//!
//! Everything runs synchronously on the caller's thread. A machine is not
//! meant to be shared between threads; hosts that need that must serialize
//! access themselves.
//!
//! # Example
//!
//! ```rust
//! use waypoint::{Event, State, StateMachine, TransitionError};
//!
//! let mut machine = StateMachine::with_states(
//!     State::new("Unread"),
//!     [State::new("Read"), State::new("Deleted")],
//! );
//!
//! let failures = machine.add_events([
//!     Event::new("View message", ["Unread"], "Read"),
//!     Event::new("Delete message", ["Read", "Unread"], "Deleted"),
//!     Event::new("Mark as unread", ["Read", "Deleted"], "Unread"),
//! ]);
//! assert!(failures.is_empty());
//!
//! assert!(machine.fire_event("View message").is_successful());
//! assert!(machine.fire_event("Mark as unread").is_successful());
//! assert_eq!(
//!     machine.fire_event("Mark as unread").error(),
//!     Some(TransitionError::WrongSourceState)
//! );
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, EventBuilder, StateMachineBuilder};
pub use self::core::{Event, EventName, Guard, State, StateHistory, StateTransition, StateValue};
pub use machine::{EventError, StateMachine, Transition, TransitionError};
