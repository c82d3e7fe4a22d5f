//! Build errors for state machine and event builders.

use crate::machine::EventError;
use thiserror::Error;

/// Errors that can occur when building state machines and events.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Event name not specified. Call .name(name)")]
    MissingName,

    #[error("Event source values not specified. Call .from(value) at least once")]
    MissingSourceValues,

    #[error("Event destination not specified. Call .to(value)")]
    MissingDestination,

    #[error("Invalid event: {0}")]
    InvalidEvent(#[from] EventError),
}
