//! # Store
//!
//! Holds the current state, runs the reducer, and broadcasts every new
//! state to subscribers.
//!
//! ```text
//!           dispatch(action)
//!  Idle ───────────────────────▶ Dispatching
//!   ▲                               │ reduce(action, state)
//!   │                               │ commit new state
//!   └────── notify subscribers ◀────┘
//! ```
//!
//! Everything runs synchronously on the caller's thread. The store is
//! single-threaded (`Rc`/`RefCell` inside) and is meant to be shared as
//! `Rc<Store<S>>` with the components that need it.
//!
//! ## Invariants
//!
//! 1. A failed reduce commits nothing and notifies no one.
//! 2. `dispatch` from inside a subscriber callback is rejected with
//!    [`StoreError::ReentrantDispatch`].
//! 3. Notification walks a snapshot of the subscriber list taken after the
//!    commit. An observer unsubscribed mid-broadcast is skipped from then on;
//!    every other observer is called exactly once.
//! 4. `subscribe` delivers the current state before returning.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use log::{debug, error, warn};

use crate::core::action::{Action, reduce};
use crate::core::error::{LensError, StoreError};

/// The reducer installed in a store.
pub type Reducer<S> = Box<dyn Fn(&dyn Action<S>, &S) -> Result<S, LensError>>;

type Callback<S> = Rc<RefCell<dyn FnMut(&S)>>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Subscription<S> {
    id: SubscriptionId,
    active: Rc<Cell<bool>>,
    callback: Callback<S>,
}

// derive(Clone) would require S: Clone
impl<S> Clone for Subscription<S> {
    fn clone(&self) -> Self {
        Subscription {
            id: self.id,
            active: Rc::clone(&self.active),
            callback: Rc::clone(&self.callback),
        }
    }
}

/// Marks the store as dispatching for its lifetime.
/// Restores the previous flag on drop, including on unwind out of a subscriber.
struct DispatchGuard<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> DispatchGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        let previous = flag.replace(true);
        Self { flag, previous }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

pub struct Store<S> {
    state: RefCell<Rc<S>>,
    reducer: Reducer<S>,
    subscriptions: RefCell<Vec<Subscription<S>>>,
    next_id: Cell<u64>,
    dispatching: Cell<bool>,
}

impl<S: 'static> Store<S> {
    /// Creates a store with an explicit reducer.
    pub fn new<R>(reducer: R, initial: S) -> Self
    where
        R: Fn(&dyn Action<S>, &S) -> Result<S, LensError> + 'static,
    {
        Self {
            state: RefCell::new(Rc::new(initial)),
            reducer: Box::new(reducer),
            subscriptions: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            dispatching: Cell::new(false),
        }
    }

    /// Creates a store driven by the generic lens reducer.
    pub fn with_lens_reducer(initial: S) -> Self
    where
        S: Clone,
    {
        Self::new(reduce::<S>, initial)
    }

    /// Read-only snapshot of the current state.
    pub fn state(&self) -> Rc<S> {
        Rc::clone(&self.state.borrow())
    }

    pub fn is_dispatching(&self) -> bool {
        self.dispatching.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Reduces `action` against the current state, commits the result and
    /// notifies every subscriber with it.
    pub fn dispatch(&self, action: &dyn Action<S>) -> Result<(), StoreError> {
        if self.dispatching.get() {
            error!("Rejected reentrant dispatch of {:?}", action);
            return Err(StoreError::ReentrantDispatch);
        }
        let _guard = DispatchGuard::enter(&self.dispatching);
        debug!("Dispatching {:?}", action);

        let previous = self.state();
        let next = (self.reducer)(action, &*previous).map_err(|e| {
            warn!("Reducer failed, state unchanged: {}", e);
            StoreError::Lens(e)
        })?;
        let next = Rc::new(next);
        *self.state.borrow_mut() = Rc::clone(&next);

        let snapshot: Vec<Subscription<S>> = self.subscriptions.borrow().clone();
        for subscription in snapshot {
            if subscription.active.get() {
                (&mut *subscription.callback.borrow_mut())(&*next);
            }
        }
        Ok(())
    }

    /// Registers `observer` and immediately calls it with the current state.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: FnMut(&S) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let callback: Callback<S> = Rc::new(RefCell::new(observer));
        self.subscriptions.borrow_mut().push(Subscription {
            id,
            active: Rc::new(Cell::new(true)),
            callback: Rc::clone(&callback),
        });
        debug!("Subscribed {:?} ({} total)", id, self.subscriber_count());

        // the observer may dispatch from here; treat delivery like a broadcast
        let _guard = DispatchGuard::enter(&self.dispatching);
        let current = self.state();
        (&mut *callback.borrow_mut())(&*current);
        id
    }

    /// Removes the observer behind `id`. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.borrow_mut();
        match subscriptions.iter().position(|s| s.id == id) {
            Some(pos) => {
                let removed = subscriptions.remove(pos);
                removed.active.set(false);
                debug!("Unsubscribed {:?} ({} left)", id, subscriptions.len());
                true
            }
            None => false,
        }
    }
}

impl<S> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("subscribers", &self.subscriptions.borrow().len())
            .field("dispatching", &self.dispatching.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::LensSetAction;
    use crate::core::todo::{AppState, Todo};
    use crate::test_support::{home_and_work, home_only};

    #[derive(Debug)]
    struct Ping;

    impl Action<AppState> for Ping {}

    fn complete_first(list: &str, value: bool) -> LensSetAction<AppState, bool> {
        LensSetAction::new(
            AppState::item_lens(list, 0).then(Todo::complete_lens()),
            value,
        )
    }

    fn recorder(store: &Store<AppState>) -> (SubscriptionId, Rc<RefCell<Vec<AppState>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |s: &AppState| sink.borrow_mut().push(s.clone()));
        (id, seen)
    }

    #[test]
    fn test_subscribe_delivers_current_state() {
        let store = Store::with_lens_reducer(home_only());
        let (_, seen) = recorder(&store);
        assert_eq!(*seen.borrow(), vec![home_only()]);
    }

    #[test]
    fn test_dispatch_commits_and_notifies_once() {
        let store = Store::with_lens_reducer(home_only());
        let (_, seen) = recorder(&store);

        store.dispatch(&complete_first("home", true)).unwrap();

        assert!(store.state().todos["home"][0].complete);
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[1], *store.state());
    }

    #[test]
    fn test_notification_order_follows_subscription_order() {
        let store = Store::with_lens_reducer(home_only());
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            store.subscribe(move |_: &AppState| order.borrow_mut().push(tag));
        }
        order.borrow_mut().clear();

        store.dispatch(&Ping).unwrap();
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_failed_reduce_keeps_state_and_skips_notify() {
        let store = Store::with_lens_reducer(home_only());
        let (_, seen) = recorder(&store);

        let err = store.dispatch(&complete_first("work", true)).unwrap_err();

        assert!(matches!(err, StoreError::Lens(LensError::MissingKey { .. })));
        assert_eq!(*store.state(), home_only());
        assert_eq!(seen.borrow().len(), 1);
        assert!(!store.is_dispatching());
    }

    #[test]
    fn test_unknown_action_is_value_equal() {
        let store = Store::with_lens_reducer(home_and_work());
        store.dispatch(&Ping).unwrap();
        assert_eq!(*store.state(), home_and_work());
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let store = Store::with_lens_reducer(home_only());
        let (id, seen) = recorder(&store);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(&complete_first("home", true)).unwrap();

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_reentrant_dispatch_rejected() {
        let store = Rc::new(Store::with_lens_reducer(home_only()));
        let results = Rc::new(RefCell::new(Vec::new()));

        let inner_store = Rc::clone(&store);
        let inner_results = Rc::clone(&results);
        store.subscribe(move |_: &AppState| {
            let result = inner_store.dispatch(&complete_first("home", false));
            inner_results.borrow_mut().push(result);
        });
        store.dispatch(&complete_first("home", true)).unwrap();

        // once at subscribe, once during the outer dispatch
        assert_eq!(
            *results.borrow(),
            vec![
                Err(StoreError::ReentrantDispatch),
                Err(StoreError::ReentrantDispatch)
            ]
        );
        assert!(store.state().todos["home"][0].complete);
        assert!(!store.is_dispatching());
    }

    #[test]
    fn test_unsubscribe_other_mid_broadcast() {
        let store = Rc::new(Store::with_lens_reducer(home_only()));
        let victim_id = Rc::new(Cell::new(None::<SubscriptionId>));

        let killer_store = Rc::clone(&store);
        let killer_target = Rc::clone(&victim_id);
        let killer_calls = Rc::new(Cell::new(0));
        let killer_count = Rc::clone(&killer_calls);
        store.subscribe(move |_: &AppState| {
            killer_count.set(killer_count.get() + 1);
            if let Some(id) = killer_target.get() {
                killer_store.unsubscribe(id);
            }
        });
        let (id, victim_seen) = recorder(&store);
        victim_id.set(Some(id));
        let (_, bystander_seen) = recorder(&store);

        store.dispatch(&Ping).unwrap();

        assert_eq!(killer_calls.get(), 2);
        assert_eq!(victim_seen.borrow().len(), 1);
        assert_eq!(bystander_seen.borrow().len(), 2);
        assert_eq!(store.subscriber_count(), 2);
    }

    #[test]
    fn test_unsubscribe_self_mid_broadcast() {
        let store = Rc::new(Store::with_lens_reducer(home_only()));
        let own_id = Rc::new(Cell::new(None::<SubscriptionId>));
        let calls = Rc::new(Cell::new(0));

        let (_, before_seen) = recorder(&store);
        let self_store = Rc::clone(&store);
        let self_id = Rc::clone(&own_id);
        let self_calls = Rc::clone(&calls);
        let id = store.subscribe(move |_: &AppState| {
            self_calls.set(self_calls.get() + 1);
            if let Some(id) = self_id.get() {
                self_store.unsubscribe(id);
            }
        });
        own_id.set(Some(id));
        let (_, after_seen) = recorder(&store);

        store.dispatch(&Ping).unwrap();
        store.dispatch(&Ping).unwrap();

        assert_eq!(calls.get(), 2);
        assert_eq!(before_seen.borrow().len(), 3);
        assert_eq!(after_seen.borrow().len(), 3);
    }

    #[test]
    fn test_subscribe_during_broadcast_sees_committed_state() {
        let store = Rc::new(Store::with_lens_reducer(home_only()));
        let late_seen = Rc::new(RefCell::new(Vec::new()));

        let outer_store = Rc::clone(&store);
        let outer_seen = Rc::clone(&late_seen);
        let subscribed = Rc::new(Cell::new(false));
        store.subscribe(move |state: &AppState| {
            if state.todos["home"][0].complete && !subscribed.get() {
                subscribed.set(true);
                let sink = Rc::clone(&outer_seen);
                outer_store.subscribe(move |s: &AppState| sink.borrow_mut().push(s.clone()));
            }
        });

        store.dispatch(&complete_first("home", true)).unwrap();

        assert_eq!(late_seen.borrow().len(), 1);
        assert!(late_seen.borrow()[0].todos["home"][0].complete);
    }

    #[test]
    fn test_custom_reducer() {
        let store = Store::new(|_: &dyn Action<u32>, n: &u32| Ok(n + 1), 0u32);
        #[derive(Debug)]
        struct Tick;
        impl Action<u32> for Tick {}

        store.dispatch(&Tick).unwrap();
        store.dispatch(&Tick).unwrap();
        assert_eq!(*store.state(), 2);
    }
}
