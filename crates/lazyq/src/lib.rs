//! Lazyq - Lazy, composable queries over in-memory collections.
//!
//! Lazyq wraps a sequence or a map in a [`Query`], lets you chain operators
//! onto it, and only does work when a terminal operation asks for results.
//! It supports:
//!
//! - Ordered sources (vectors, arrays, slices, deques) and unordered sources
//!   (hash maps, B-tree maps) yielding single-entry maps
//! - Dynamically-typed sources via [`serde_json::Value`]
//! - Chaining operators: filter, push (append), put_index (insert), skip, take
//! - Terminal operations: first, last, count, for_each, results, any, all
//!
//! # Quick Start
//!
//! ```rust
//! use lazyq::Query;
//!
//! #[derive(Clone)]
//! struct Car {
//!     year: u32,
//!     model: &'static str,
//! }
//!
//! let cars = vec![
//!     Car { year: 2000, model: "m3" },
//!     Car { year: 2006, model: "e46" },
//! ];
//!
//! let recent = Query::from_source(&cars)
//!     .filter(|car| car.year > 2001)
//!     .push(Car { year: 2020, model: "i4" });
//!
//! let models: Vec<&str> = recent.results().iter().map(|c| c.model).collect();
//! assert_eq!(models, vec!["e46", "i4"]);
//! assert_eq!(recent.count(), 2);
//! ```
//!
//! # Execution Model
//!
//! ```text
//! Query::from_source(collection) -> .op() -> .op() -> ... -> .terminal()
//! ```
//!
//! - A query owns one [`Producer`]; each call to it returns a new
//!   [`Cursor`] starting at the beginning.
//! - Chaining methods never pull items. They return a new query whose
//!   producer wraps the previous one.
//! - Every terminal method asks for its own cursor, so calling it twice runs
//!   the chain twice and gives the same answer.
//! - `push` and `put_index` buffer their whole upstream when a cursor is
//!   created, not when the method is called.
//!
//! # Sources
//!
//! | Source | Items |
//! |--------|-------|
//! | `Vec<T>`, `[T; N]`, `&[T]`, `VecDeque<T>` | `T`, in index order |
//! | `HashMap<K, V>`, `BTreeMap<K, V>` | one single-entry map per pair |
//! | `serde_json::Value` array | elements, in index order |
//! | `serde_json::Value` object | one single-entry object per pair |
//! | other `serde_json::Value` | nothing (see [`SourcePolicy`]) |

mod config;
mod cursor;
mod error;
mod op;
mod query;
mod source;
mod traits;
mod value;

// Re-export public API
pub use config::SourcePolicy;
pub use cursor::{Cursor, Pull};
pub use error::{QueryError, Result};
pub use query::Query;
pub use source::Source;
pub use traits::{FnProducer, Producer};
pub use value::SourceKind;
