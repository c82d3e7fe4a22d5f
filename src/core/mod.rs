//! Core building blocks of a state machine.
//!
//! - [`State`]: an identity value with optional enter/exit hooks
//! - [`Event`]: a named rule from a set of source values to one destination
//! - [`Guard`]: a predicate that can veto an eligible event
//! - [`StateHistory`]: a bounded record of completed state changes
//!
//! Nothing in this module touches a machine; the types are assembled and
//! driven by [`StateMachine`](crate::StateMachine).

mod event;
mod guard;
mod history;
mod state;

pub use event::{Event, EventName};
pub use guard::Guard;
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use state::{Callback, State, StateValue};
