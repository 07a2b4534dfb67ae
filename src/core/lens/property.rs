//! Named-property lenses for dynamically shaped objects.
//!
//! Value-typed state should use hand-written field lenses. These exist for
//! data whose shape is only known at runtime, e.g. a JSON document.

use std::any::type_name;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::core::error::LensError;
use crate::core::lens::Lens;

/// Dynamic named-field access. Implementors must be cheaply duplicable;
/// the property lens clones before it writes.
pub trait NamedFields: Clone {
    fn get_named_field<V: DeserializeOwned>(&self, name: &str) -> Result<V, LensError>;

    /// Overwrites an existing field in place. Absent names are an error, and
    /// so is a value that would not read back as the same `V`.
    fn set_named_field<V: Serialize + DeserializeOwned>(
        &mut self,
        name: &str,
        value: V,
    ) -> Result<(), LensError>;
}

fn mismatch<V>(name: &str) -> LensError {
    LensError::TypeMismatch {
        name: name.to_string(),
        expected: type_name::<V>().to_string(),
    }
}

fn not_found(name: &str) -> LensError {
    LensError::PropertyNotFound {
        name: name.to_string(),
    }
}

impl NamedFields for Map<String, Value> {
    fn get_named_field<V: DeserializeOwned>(&self, name: &str) -> Result<V, LensError> {
        let raw = self.get(name).ok_or_else(|| not_found(name))?;
        V::deserialize(raw).map_err(|_| mismatch::<V>(name))
    }

    fn set_named_field<V: Serialize + DeserializeOwned>(
        &mut self,
        name: &str,
        value: V,
    ) -> Result<(), LensError> {
        let slot = self.get_mut(name).ok_or_else(|| not_found(name))?;
        // the slot must already hold a V, and the encoding must decode back
        // to one (NaN encodes as null)
        V::deserialize(&*slot).map_err(|_| mismatch::<V>(name))?;
        let encoded = serde_json::to_value(value).map_err(|_| mismatch::<V>(name))?;
        V::deserialize(&encoded).map_err(|_| mismatch::<V>(name))?;
        *slot = encoded;
        Ok(())
    }
}

impl NamedFields for Value {
    fn get_named_field<V: DeserializeOwned>(&self, name: &str) -> Result<V, LensError> {
        match self {
            Value::Object(map) => map.get_named_field(name),
            _ => Err(mismatch::<Map<String, Value>>(name)),
        }
    }

    fn set_named_field<V: Serialize + DeserializeOwned>(
        &mut self,
        name: &str,
        value: V,
    ) -> Result<(), LensError> {
        match self {
            Value::Object(map) => map.set_named_field(name, value),
            _ => Err(mismatch::<Map<String, Value>>(name)),
        }
    }
}

/// A lens onto the property called `name`, typed as `V`.
///
/// `set` duplicates the object and writes into the duplicate.
pub fn property<O, V>(name: impl Into<String>) -> Lens<O, V>
where
    O: NamedFields + 'static,
    V: Serialize + DeserializeOwned + 'static,
{
    let name = name.into();
    let set_name = name.clone();
    Lens::try_new(
        move |object: &O| object.get_named_field(&name),
        move |object: &O, value: V| {
            let mut copy = object.clone();
            copy.set_named_field(&set_name, value)?;
            Ok(copy)
        },
    )
}
