//! The state machine and the outcomes it reports.
//!
//! [`StateMachine`] owns the registered states and events, validates event
//! registration, and runs transitions. Every transition attempt yields a
//! [`Transition`]; registration failures are reported as [`EventError`].

mod state_machine;
mod transition;

pub use state_machine::StateMachine;
pub use transition::{EventError, Transition, TransitionError};
