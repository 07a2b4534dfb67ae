//! Lenses into keyed collections (`HashMap`, `BTreeMap`).

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

use crate::core::error::LensError;
use crate::core::lens::Lens;

/// A mapping a key lens can look into and rebuild.
pub trait KeyedCollection: Clone {
    type Key;
    type Value;

    fn lookup(&self, key: &Self::Key) -> Option<&Self::Value>;
    fn insert_value(&mut self, key: Self::Key, value: Self::Value);
    fn remove_value(&mut self, key: &Self::Key);
}

impl<K, V, H> KeyedCollection for HashMap<K, V, H>
where
    K: Eq + Hash + Clone,
    V: Clone,
    H: BuildHasher + Clone,
{
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn insert_value(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn remove_value(&mut self, key: &K) {
        self.remove(key);
    }
}

impl<K, V> KeyedCollection for BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn insert_value(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn remove_value(&mut self, key: &K) {
        self.remove(key);
    }
}

fn missing<K: Debug>(key: &K) -> LensError {
    LensError::MissingKey {
        key: format!("{key:?}"),
    }
}

/// A lens onto the value stored under `key`.
///
/// An absent key is a composition mistake: both `get` and `set` return
/// [`LensError::MissingKey`] rather than inventing a value. Use [`key_opt`]
/// when absence is an expected state.
pub fn key<M>(key: M::Key) -> Lens<M, M::Value>
where
    M: KeyedCollection + 'static,
    M::Key: Debug + Clone + Send + Sync + 'static,
    M::Value: Clone + 'static,
{
    let set_key = key.clone();
    Lens::try_new(
        move |map: &M| map.lookup(&key).cloned().ok_or_else(|| missing(&key)),
        move |map: &M, value| {
            if map.lookup(&set_key).is_none() {
                return Err(missing(&set_key));
            }
            let mut next = map.clone();
            next.insert_value(set_key.clone(), value);
            Ok(next)
        },
    )
}

/// A lens onto the optional value under `key`. Never fails.
///
/// Setting `Some(v)` inserts or replaces the entry, setting `None` removes it.
pub fn key_opt<M>(key: M::Key) -> Lens<M, Option<M::Value>>
where
    M: KeyedCollection + 'static,
    M::Key: Clone + Send + Sync + 'static,
    M::Value: Clone + 'static,
{
    let set_key = key.clone();
    Lens::new(
        move |map: &M| map.lookup(&key).cloned(),
        move |map: &M, value| {
            let mut next = map.clone();
            match value {
                Some(value) => next.insert_value(set_key.clone(), value),
                None => next.remove_value(&set_key),
            }
            next
        },
    )
}
