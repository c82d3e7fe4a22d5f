//! Transition outcomes and error types.

use crate::core::State;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an event could not move the machine.
///
/// These are ordinary outcomes, returned as data inside
/// [`Transition::Error`], not failures of the machine itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum TransitionError {
    /// The event's guard returned `false`.
    #[error("transition declined by event guard")]
    TransitionDeclined,

    /// No event with the requested name is registered.
    #[error("no event with this name is registered")]
    UnknownEvent,

    /// Events with this name exist, but none lists the current state as a source.
    #[error("current state is not a source of this event")]
    WrongSourceState,

    /// The event's state type does not match the machine's.
    ///
    /// Reserved for hosts that bridge differently typed machines; a
    /// `StateMachine<T>` never produces it.
    #[error("event state type does not match the state machine")]
    WrongEventType,
}

/// Why an event was refused at registration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EventError {
    /// The event has no source values, or one of them is not a registered state.
    ///
    /// `value` holds the offending source value in debug form; it is `None`
    /// when the source list is empty.
    #[error("event '{event}' has no registered source value{}", describe(.value))]
    NoSourceValue {
        event: String,
        value: Option<String>,
    },

    /// The event's destination value is not a registered state.
    #[error("event '{event}' has no registered destination value: {value}")]
    NoDestinationValue { event: String, value: String },
}

impl EventError {
    /// Name of the event that was refused.
    pub fn event_name(&self) -> &str {
        match self {
            Self::NoSourceValue { event, .. } | Self::NoDestinationValue { event, .. } => event,
        }
    }
}

fn describe(value: &Option<String>) -> String {
    match value {
        Some(value) => format!(": {value}"),
        None => " (source list is empty)".to_string(),
    }
}

/// Outcome of firing, or previewing, an event.
///
/// On success, `source` is the state the machine was in before the event and
/// `destination` is a state built from the event's destination value. The
/// destination is a fresh `State` without hooks; compare it by value with the
/// registered state rather than expecting the same instance.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition<T> {
    Success {
        source: State<T>,
        destination: State<T>,
    },
    Error(TransitionError),
}

impl<T> Transition<T> {
    /// Whether the event fired.
    pub fn is_successful(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// State before the transition, on success.
    pub fn source(&self) -> Option<&State<T>> {
        match self {
            Self::Success { source, .. } => Some(source),
            Self::Error(_) => None,
        }
    }

    /// State after the transition, on success.
    pub fn destination(&self) -> Option<&State<T>> {
        match self {
            Self::Success { destination, .. } => Some(destination),
            Self::Error(_) => None,
        }
    }

    /// Why the transition failed, if it did.
    pub fn error(&self) -> Option<TransitionError> {
        match self {
            Self::Success { .. } => None,
            Self::Error(error) => Some(*error),
        }
    }

    /// Convert into a `Result` so callers can use `?`.
    pub fn into_result(self) -> Result<(State<T>, State<T>), TransitionError> {
        match self {
            Self::Success {
                source,
                destination,
            } => Ok((source, destination)),
            Self::Error(error) => Err(error),
        }
    }
}

impl<T> From<TransitionError> for Transition<T> {
    fn from(error: TransitionError) -> Self {
        Self::Error(error)
    }
}
