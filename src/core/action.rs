//! # Actions
//!
//! Everything that can change the state becomes an `Action`.
//! The one action that carries data is [`LensSetAction`]: a lens from the
//! whole state down to some substate, plus the replacement value.
//!
//! The reducer never grows. Adding a field to the state means composing a
//! new lens at the call site, not adding a branch here.
//!
//! ```text
//! State + Action  →  reduce()  →  New State
//! ```
//!
//! Actions that do not implement [`StateUpdate`] fall through `reduce`
//! unchanged, so non-lens actions can share the same store.

use std::fmt;

use crate::core::error::LensError;
use crate::core::lens::Lens;

/// Produces new whole-state from old state.
pub trait StateUpdate<S> {
    fn apply(&self, previous: &S) -> Result<S, LensError>;
}

/// Anything that can be dispatched to a `Store<S>`.
pub trait Action<S>: fmt::Debug {
    /// Returns the state-update capability of this action, if it has one.
    fn as_state_update(&self) -> Option<&dyn StateUpdate<S>> {
        None
    }
}

/// Replaces the substate addressed by `lens` with `new_substate`.
pub struct LensSetAction<S, C> {
    lens: Lens<S, C>,
    new_substate: C,
}

impl<S: 'static, C: 'static> LensSetAction<S, C> {
    pub fn new(lens: Lens<S, C>, new_substate: C) -> Self {
        Self { lens, new_substate }
    }

    pub fn lens(&self) -> &Lens<S, C> {
        &self.lens
    }

    pub fn new_substate(&self) -> &C {
        &self.new_substate
    }
}

/// Shorthand for [`LensSetAction::new`].
pub fn make_lens_set_action<S: 'static, C: 'static>(
    lens: Lens<S, C>,
    new_substate: C,
) -> LensSetAction<S, C> {
    LensSetAction::new(lens, new_substate)
}

impl<S, C: fmt::Debug> fmt::Debug for LensSetAction<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LensSetAction")
            .field("lens", &self.lens)
            .field("new_substate", &self.new_substate)
            .finish()
    }
}

impl<S: 'static, C: Clone + 'static> StateUpdate<S> for LensSetAction<S, C> {
    fn apply(&self, previous: &S) -> Result<S, LensError> {
        self.lens.set(previous, self.new_substate.clone())
    }
}

impl<S: 'static, C: Clone + fmt::Debug + 'static> Action<S> for LensSetAction<S, C> {
    fn as_state_update(&self) -> Option<&dyn StateUpdate<S>> {
        Some(self)
    }
}

/// The generic reducer. Applies the action's state update when it has one,
/// and otherwise hands back the state unchanged.
pub fn reduce<S: Clone>(action: &dyn Action<S>, state: &S) -> Result<S, LensError> {
    match action.as_state_update() {
        Some(update) => update.apply(state),
        None => Ok(state.clone()),
    }
}
