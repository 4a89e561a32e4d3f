//! Dynamically-typed sources.
//!
//! A [`serde_json::Value`] can start a query without knowing its shape up
//! front. [`SourceKind`] classifies it: arrays are ordered sources, objects
//! are unordered sources yielding single-entry objects, and everything else
//! is unsupported.

use std::rc::Rc;

use serde_json::{Map, Value};

use crate::source::{Entries, Sequence, Source};
use crate::traits::{Empty, Producer};

/// The shape of a dynamic source value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A sequence; items are yielded in index order.
    Ordered,
    /// A map; items are single-entry maps.
    Unordered,
    /// Anything else, with the name of the value's type.
    Unsupported(&'static str),
}

impl SourceKind {
    /// Classifies a dynamic value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => SourceKind::Ordered,
            Value::Object(_) => SourceKind::Unordered,
            Value::Null => SourceKind::Unsupported("null"),
            Value::Bool(_) => SourceKind::Unsupported("bool"),
            Value::Number(_) => SourceKind::Unsupported("number"),
            Value::String(_) => SourceKind::Unsupported("string"),
        }
    }

    /// Returns `true` for sequences and maps.
    pub fn is_supported(self) -> bool {
        !matches!(self, SourceKind::Unsupported(_))
    }
}

fn single_entry(key: String, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key, value);
    Value::Object(map)
}

/// Arrays and objects become queries; every other value becomes an empty
/// query.
impl Source for Value {
    type Item = Value;

    fn into_producer(self) -> Rc<dyn Producer<Item = Value>> {
        match self {
            Value::Array(items) => Rc::new(Sequence::<Value>::new(items)),
            Value::Object(map) => {
                let entries: Vec<(String, Value)> = map.into_iter().collect();
                Rc::new(Entries::new(entries, single_entry))
            }
            other => {
                #[cfg(feature = "tracing")]
                tracing::trace!(kind = ?SourceKind::of(&other), "unsupported source, query is empty");
                drop(other);
                Rc::new(Empty::new())
            }
        }
    }
}

impl Source for &Value {
    type Item = Value;

    fn into_producer(self) -> Rc<dyn Producer<Item = Value>> {
        self.clone().into_producer()
    }
}

impl Source for Map<String, Value> {
    type Item = Value;

    fn into_producer(self) -> Rc<dyn Producer<Item = Value>> {
        Value::Object(self).into_producer()
    }
}
