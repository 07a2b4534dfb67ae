//! `Vec<T>` lenses

use crate::core::error::LensError;
use crate::core::lens::Lens;

/// A lens that looks at the item at position `index` in a vector.
///
/// `get` and `set` fail with [`LensError::IndexOutOfRange`] outside
/// `[0, len)`. `set` keeps the length and the order of every other item.
pub fn index<V: Clone + 'static>(index: usize) -> Lens<Vec<V>, V> {
    Lens::try_new(
        move |items: &Vec<V>| {
            items.get(index).cloned().ok_or(LensError::IndexOutOfRange {
                index,
                len: items.len(),
            })
        },
        move |items: &Vec<V>, value| {
            if index >= items.len() {
                return Err(LensError::IndexOutOfRange {
                    index,
                    len: items.len(),
                });
            }
            let mut next = items.clone();
            next[index] = value;
            Ok(next)
        },
    )
}
