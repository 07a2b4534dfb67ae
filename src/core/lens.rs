//! # Lenses
//!
//! A lens is a reified accessor: a `get` that projects a child out of a
//! parent, and a `set` that builds a *new* parent with the child replaced.
//! Neither function touches its input.
//!
//! ```text
//! AppState ──todos──▶ BTreeMap ──key("home")──▶ Vec<Todo> ──index(0)──▶ Todo ──complete──▶ bool
//!          └──────────────────────── composed with `then` ──────────────────────────────────┘
//! ```
//!
//! Lenses are cheap to clone (two `Arc`s) and compose with [`Lens::then`]
//! or [`compose`]. Composition is associative, so a path can be built in
//! any grouping and behaves the same.
//!
//! Every well-behaved lens satisfies:
//!
//! - `get(set(p, c)) == c`
//! - `set(p, get(p)) == p`
//!
//! The factories in [`key`], [`index`] and [`property`] uphold both laws.
//! Lenses built with [`Lens::new`] / [`Lens::try_new`] are only as lawful
//! as the closures passed in.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use crate::core::error::LensError;

pub mod index;
pub mod key;
pub mod property;

pub use index::index;
pub use key::{KeyedCollection, key, key_opt};
pub use property::{NamedFields, property};

type GetFn<P, C> = dyn Fn(&P) -> Result<C, LensError> + Send + Sync;
type SetFn<P, C> = dyn Fn(&P, C) -> Result<P, LensError> + Send + Sync;

/// A composable getter/setter pair from `P` (parent) to `C` (child).
pub struct Lens<P, C> {
    get: Arc<GetFn<P, C>>,
    set: Arc<SetFn<P, C>>,
}

// derive(Clone) would require P: Clone and C: Clone
impl<P, C> Clone for Lens<P, C> {
    fn clone(&self) -> Self {
        Lens {
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
        }
    }
}

impl<P, C> fmt::Debug for Lens<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lens<{}, {}>", type_name::<P>(), type_name::<C>())
    }
}

impl<P: 'static, C: 'static> Lens<P, C> {
    /// Builds a lens from two infallible functions, typically a struct field accessor.
    ///
    /// ```
    /// use lensmith::core::lens::Lens;
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let x = Lens::new(|p: &Point| p.x, |p: &Point, x| Point { x, ..p.clone() });
    /// let moved = x.set(&Point { x: 1, y: 2 }, 5).unwrap();
    /// assert_eq!(moved, Point { x: 5, y: 2 });
    /// ```
    pub fn new<G, S>(get: G, set: S) -> Self
    where
        G: Fn(&P) -> C + Send + Sync + 'static,
        S: Fn(&P, C) -> P + Send + Sync + 'static,
    {
        Self::try_new(move |parent| Ok(get(parent)), move |parent, child| Ok(set(parent, child)))
    }

    /// Builds a lens whose accessors may fail because the parent does not
    /// contain the addressed element.
    pub fn try_new<G, S>(get: G, set: S) -> Self
    where
        G: Fn(&P) -> Result<C, LensError> + Send + Sync + 'static,
        S: Fn(&P, C) -> Result<P, LensError> + Send + Sync + 'static,
    {
        Lens {
            get: Arc::new(get),
            set: Arc::new(set),
        }
    }

    /// Reads the child out of `parent`.
    pub fn get(&self, parent: &P) -> Result<C, LensError> {
        (self.get)(parent)
    }

    /// Returns a new parent with the child replaced. `parent` is left untouched.
    pub fn set(&self, parent: &P, child: C) -> Result<P, LensError> {
        (self.set)(parent, child)
    }

    /// `set(parent, f(get(parent)))`.
    pub fn over<F>(&self, parent: &P, f: F) -> Result<P, LensError>
    where
        F: FnOnce(C) -> C,
    {
        let child = self.get(parent)?;
        self.set(parent, f(child))
    }

    /// Chains `inner` after this lens: `Lens<P, C>` then `Lens<C, D>` gives `Lens<P, D>`.
    pub fn then<D: 'static>(self, inner: Lens<C, D>) -> Lens<P, D> {
        compose(self, inner)
    }
}

/// Sequential composition of two lenses.
///
/// `set` reads the intermediate value through `outer`, replaces the leaf
/// inside it with `inner`, then writes the updated intermediate back
/// through `outer`.
pub fn compose<A, B, C>(outer: Lens<A, B>, inner: Lens<B, C>) -> Lens<A, C>
where
    A: 'static,
    B: 'static,
    C: 'static,
{
    let (outer_get, inner_get) = (outer.clone(), inner.clone());
    Lens::try_new(
        move |parent| inner_get.get(&outer_get.get(parent)?),
        move |parent, child| {
            let middle = outer.get(parent)?;
            let updated = inner.set(&middle, child)?;
            outer.set(parent, updated)
        },
    )
}

/// The unit of composition: views the whole value.
pub fn identity<P: Clone + 'static>() -> Lens<P, P> {
    Lens::new(|parent: &P| parent.clone(), |_, child| child)
}

/// Free-function form of [`Lens::get`].
pub fn get<P: 'static, C: 'static>(lens: &Lens<P, C>, parent: &P) -> Result<C, LensError> {
    lens.get(parent)
}

/// Free-function form of [`Lens::set`].
pub fn set<P: 'static, C: 'static>(lens: &Lens<P, C>, parent: &P, child: C) -> Result<P, LensError> {
    lens.set(parent, child)
}

/// Free-function form of [`Lens::over`].
pub fn over<P, C, F>(lens: &Lens<P, C>, parent: &P, f: F) -> Result<P, LensError>
where
    P: 'static,
    C: 'static,
    F: FnOnce(C) -> C,
{
    lens.over(parent, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Inner {
        value: i32,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Outer {
        label: String,
        inner: Inner,
    }

    fn inner_lens() -> Lens<Outer, Inner> {
        Lens::new(
            |o: &Outer| o.inner.clone(),
            |o: &Outer, inner| Outer { inner, ..o.clone() },
        )
    }

    fn value_lens() -> Lens<Inner, i32> {
        Lens::new(|i: &Inner| i.value, |_: &Inner, value| Inner { value })
    }

    fn sample() -> Outer {
        Outer {
            label: "outer".to_string(),
            inner: Inner { value: 7 },
        }
    }

    #[test]
    fn test_set_leaves_input_untouched() {
        let before = sample();
        let after = inner_lens().set(&before, Inner { value: 1 }).unwrap();
        assert_eq!(before, sample());
        assert_eq!(after.inner.value, 1);
        assert_eq!(after.label, "outer");
    }

    #[test]
    fn test_compose_threads_get_and_set() {
        let lens = inner_lens().then(value_lens());
        assert_eq!(lens.get(&sample()).unwrap(), 7);

        let updated = lens.set(&sample(), 42).unwrap();
        assert_eq!(updated.inner.value, 42);
        assert_eq!(updated.label, "outer");
    }

    #[test]
    fn test_over_applies_function() {
        let lens = compose(inner_lens(), value_lens());
        let doubled = lens.over(&sample(), |v| v * 2).unwrap();
        assert_eq!(doubled.inner.value, 14);
        assert_eq!(over(&lens, &sample(), |v| v + 1).unwrap().inner.value, 8);
    }

    #[test]
    fn test_free_functions_match_methods() {
        let lens = inner_lens().then(value_lens());
        assert_eq!(get(&lens, &sample()).unwrap(), lens.get(&sample()).unwrap());
        assert_eq!(set(&lens, &sample(), 3).unwrap(), lens.set(&sample(), 3).unwrap());
    }

    #[test]
    fn test_identity_is_unit_of_composition() {
        let plain = value_lens();
        let left = identity::<Inner>().then(value_lens());
        let right = value_lens().then(identity::<i32>());
        let data = Inner { value: 5 };

        for lens in [&left, &right] {
            assert_eq!(lens.get(&data).unwrap(), plain.get(&data).unwrap());
            assert_eq!(lens.set(&data, 9).unwrap(), plain.set(&data, 9).unwrap());
        }
    }

    #[test]
    fn test_composed_failure_propagates() {
        let failing: Lens<Inner, i32> = Lens::try_new(
            |_| Err(LensError::PropertyNotFound { name: "value".to_string() }),
            |_, _| Err(LensError::PropertyNotFound { name: "value".to_string() }),
        );
        let lens = inner_lens().then(failing);
        assert!(lens.get(&sample()).is_err());
        assert!(lens.set(&sample(), 1).is_err());
        assert!(lens.over(&sample(), |v| v).is_err());
    }

    #[test]
    fn test_debug_names_types() {
        let rendered = format!("{:?}", value_lens());
        assert!(rendered.starts_with("Lens<"));
        assert!(rendered.contains("i32"));
    }
}
