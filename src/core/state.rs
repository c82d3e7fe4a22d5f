//! States and the value types that identify them.
//!
//! A [`State`] wraps an identity value together with optional enter and exit
//! hooks. The machine only ever compares states by value; two `State`
//! instances holding equal values are the same state as far as lookup and
//! transitions are concerned.

use std::fmt::{self, Debug};
use std::hash::Hash;
use std::rc::Rc;

/// Shared callback invoked with a reference to the entity it is attached to.
///
/// Callbacks are reference counted so that states and events can be cloned
/// cheaply when the machine needs a snapshot of them during a transition.
/// They are neither `Send` nor `Sync`: a machine lives on one thread.
pub type Callback<A> = Rc<dyn Fn(&A)>;

/// Trait for values that identify states.
///
/// Implemented automatically for every `Clone + Eq + Hash + Debug` type, so
/// strings, integers and plain enums all work out of the box.
///
/// # Example
///
/// ```rust
/// use waypoint::core::StateValue;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Turnstile {
///     Locked,
///     Unlocked,
/// }
///
/// fn assert_state_value<T: StateValue>() {}
/// assert_state_value::<Turnstile>();
/// assert_state_value::<&str>();
/// assert_state_value::<u32>();
/// ```
pub trait StateValue: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> StateValue for T {}

/// A state with an identity value and optional enter/exit hooks.
///
/// Hooks receive a reference to the state being entered or exited. They can
/// be attached at construction with the `on_*` methods or later, including
/// after registration, with the `set_*` methods.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use waypoint::core::State;
///
/// let entered = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&entered);
///
/// let state = State::new("Read").on_did_enter(move |_| flag.set(true));
///
/// assert_eq!(state.value(), &"Read");
/// assert!(state.did_enter.is_some());
/// ```
pub struct State<T> {
    value: T,
    /// Called on the state being entered, before the machine switches to it.
    pub will_enter: Option<Callback<State<T>>>,
    /// Called on the state being entered, after the machine switched to it.
    pub did_enter: Option<Callback<State<T>>>,
    /// Called on the state being left, before the machine switches away.
    pub will_exit: Option<Callback<State<T>>>,
    /// Called on the state being left, after the machine switched away.
    pub did_exit: Option<Callback<State<T>>>,
}

impl<T> State<T> {
    /// Create a state without any hooks.
    pub fn new(value: T) -> Self {
        Self {
            value,
            will_enter: None,
            did_enter: None,
            will_exit: None,
            did_exit: None,
        }
    }

    /// The identity value of this state.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Attach a will-enter hook.
    pub fn on_will_enter<F>(mut self, f: F) -> Self
    where
        F: Fn(&State<T>) + 'static,
    {
        self.set_will_enter(f);
        self
    }

    /// Attach a did-enter hook.
    pub fn on_did_enter<F>(mut self, f: F) -> Self
    where
        F: Fn(&State<T>) + 'static,
    {
        self.set_did_enter(f);
        self
    }

    /// Attach a will-exit hook.
    pub fn on_will_exit<F>(mut self, f: F) -> Self
    where
        F: Fn(&State<T>) + 'static,
    {
        self.set_will_exit(f);
        self
    }

    /// Attach a did-exit hook.
    pub fn on_did_exit<F>(mut self, f: F) -> Self
    where
        F: Fn(&State<T>) + 'static,
    {
        self.set_did_exit(f);
        self
    }

    /// Replace the will-enter hook.
    pub fn set_will_enter<F>(&mut self, f: F)
    where
        F: Fn(&State<T>) + 'static,
    {
        self.will_enter = Some(Rc::new(f));
    }

    /// Replace the did-enter hook.
    pub fn set_did_enter<F>(&mut self, f: F)
    where
        F: Fn(&State<T>) + 'static,
    {
        self.did_enter = Some(Rc::new(f));
    }

    /// Replace the will-exit hook.
    pub fn set_will_exit<F>(&mut self, f: F)
    where
        F: Fn(&State<T>) + 'static,
    {
        self.will_exit = Some(Rc::new(f));
    }

    /// Replace the did-exit hook.
    pub fn set_did_exit<F>(&mut self, f: F)
    where
        F: Fn(&State<T>) + 'static,
    {
        self.did_exit = Some(Rc::new(f));
    }

    pub(crate) fn fire_will_enter(&self) {
        if let Some(hook) = &self.will_enter {
            hook(self);
        }
    }

    pub(crate) fn fire_did_enter(&self) {
        if let Some(hook) = &self.did_enter {
            hook(self);
        }
    }

    pub(crate) fn fire_will_exit(&self) {
        if let Some(hook) = &self.will_exit {
            hook(self);
        }
    }

    pub(crate) fn fire_did_exit(&self) {
        if let Some(hook) = &self.did_exit {
            hook(self);
        }
    }
}

impl<T: Clone> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            will_enter: self.will_enter.clone(),
            did_enter: self.did_enter.clone(),
            will_exit: self.will_exit.clone(),
            did_exit: self.did_exit.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for State<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for State<T> {}

impl<T: Debug> Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("value", &self.value)
            .field("will_enter", &self.will_enter.is_some())
            .field("did_enter", &self.did_enter.is_some())
            .field("will_exit", &self.will_exit.is_some())
            .field("did_exit", &self.did_exit.is_some())
            .finish()
    }
}
