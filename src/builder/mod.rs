//! Builder API for ergonomic state machine construction.
//!
//! Builders gather states, events and settings up front and validate them
//! once in `build()`. Unlike [`StateMachine::add_events`](crate::StateMachine::add_events),
//! the machine builder is strict: a single invalid event fails the build.

pub mod error;
pub mod event;
pub mod machine;

pub use error::BuildError;
pub use event::EventBuilder;
pub use machine::StateMachineBuilder;
