//! Query builder and executor.
//!
//! The [`Query`] struct holds one producer. Chaining methods wrap it in a
//! new producer and return a new query; terminal methods request a fresh
//! cursor and drive it to produce a concrete result.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::config::SourcePolicy;
use crate::cursor::Cursor;
use crate::error::{QueryError, Result};
use crate::op::{Append, Filter, Insert, Skip, Take};
use crate::source::Source;
use crate::traits::{Empty, FnProducer, Producer};
use crate::value::SourceKind;

/// A lazy, restartable query over a collection.
///
/// Queries are immutable. Every chaining method borrows `self` and returns
/// a new query, so intermediate queries stay usable. Terminal methods each
/// run the whole chain again from the captured source.
///
/// # Example
///
/// ```
/// use lazyq::Query;
///
/// let evens = Query::from_source(vec![1, 2, 3, 4]).filter(|x| x % 2 == 0);
/// let padded = evens.push(10).put_index(0, 0);
///
/// assert_eq!(evens.results(), vec![2, 4]);
/// assert_eq!(padded.results(), vec![0, 2, 4, 10]);
/// assert_eq!(padded.count(), 4);
/// ```
pub struct Query<T> {
    producer: Rc<dyn Producer<Item = T>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Query {
            producer: Rc::clone(&self.producer),
        }
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query").finish_non_exhaustive()
    }
}

impl<T: Clone + 'static> Query<T> {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Creates a query over a collection.
    ///
    /// Owned collections are moved in; borrowed ones are cloned, so the
    /// query never observes later changes to the caller's data.
    pub fn from_source<S>(source: S) -> Self
    where
        S: Source<Item = T>,
    {
        Query {
            producer: source.into_producer(),
        }
    }

    /// Creates a query from a custom producer.
    pub fn from_producer<P>(producer: P) -> Self
    where
        P: Producer<Item = T> + 'static,
    {
        Query {
            producer: Rc::new(producer),
        }
    }

    /// Creates a query from a closure returning a fresh cursor per call.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> Cursor<T> + 'static,
    {
        Query::from_producer(FnProducer::new(f))
    }

    /// Creates a query with no items.
    pub fn empty() -> Self {
        Query::from_producer(Empty::new())
    }

    /// Returns a fresh cursor positioned at the first item.
    pub fn cursor(&self) -> Cursor<T> {
        self.producer.cursor()
    }

    fn chain<P>(&self, producer: P) -> Self
    where
        P: Producer<Item = T> + 'static,
    {
        Query::from_producer(producer)
    }

    // ========================================================================
    // Chaining
    // ========================================================================

    /// Keeps only the items for which `predicate` returns `true`.
    ///
    /// The predicate runs at most once per upstream item, and only while a
    /// cursor is being pulled.
    #[doc(alias = "where")]
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.chain(Filter::new(Rc::clone(&self.producer), Rc::new(predicate)))
    }

    /// Appends one item after the last item.
    ///
    /// Each cursor of the returned query buffers the whole upstream when it
    /// is created. Calling `push` itself pulls nothing.
    #[doc(alias = "append")]
    pub fn push(&self, item: T) -> Self {
        self.chain(Append::new(Rc::clone(&self.producer), item))
    }

    /// Inserts one item at `index`.
    ///
    /// Items before `index` keep their position, the rest shift by one. An
    /// `index` equal to the item count inserts at the end; an `index` past
    /// the count also appends. Like [`push`](Query::push), each cursor
    /// buffers the whole upstream when it is created.
    pub fn put_index(&self, index: usize, item: T) -> Self {
        self.chain(Insert::new(Rc::clone(&self.producer), index, item))
    }

    /// Like [`put_index`](Query::put_index) with a 64-bit position.
    ///
    /// Returns an error if `index` does not fit in `usize`.
    pub fn put_index_u64(&self, index: u64, item: T) -> Result<Self> {
        let index = usize::try_from(index).map_err(|_| QueryError::IndexOverflow { index })?;
        Ok(self.put_index(index, item))
    }

    /// Skips the first `n` items.
    #[doc(alias = "offset")]
    pub fn skip(&self, n: usize) -> Self {
        self.chain(Skip::new(Rc::clone(&self.producer), n))
    }

    /// Yields at most `n` items.
    #[doc(alias = "limit")]
    pub fn take(&self, n: usize) -> Self {
        self.chain(Take::new(Rc::clone(&self.producer), n))
    }

    // ========================================================================
    // Placeholders
    // ========================================================================

    /// Keyed insert. Not implemented.
    ///
    /// The intended semantics of associating `item` under `key` have never
    /// been defined, so this always fails with
    /// [`QueryError::NotImplemented`].
    pub fn put_key(&self, key: &str, item: T) -> Result<Self> {
        let _ = item;
        #[cfg(feature = "tracing")]
        tracing::warn!(key, "put_key called but is not implemented");
        #[cfg(not(feature = "tracing"))]
        let _ = key;
        Err(QueryError::NotImplemented {
            operation: "put_key",
        })
    }

    /// Copies results into a destination. Not implemented.
    pub fn apply_to<D: ?Sized>(&self, dest: &mut D) -> Result<()> {
        let _ = dest;
        #[cfg(feature = "tracing")]
        tracing::warn!("apply_to called but is not implemented");
        Err(QueryError::NotImplemented {
            operation: "apply_to",
        })
    }

    /// Filter-by-example analysis. Not implemented.
    pub fn analyze_with_where(&self, item: T) -> Result<Self> {
        let _ = item;
        #[cfg(feature = "tracing")]
        tracing::warn!("analyze_with_where called but is not implemented");
        Err(QueryError::NotImplemented {
            operation: "analyze_with_where",
        })
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Returns the first item, pulling exactly one from a fresh cursor.
    pub fn first(&self) -> Option<T> {
        self.cursor().pull()
    }

    /// Returns the last item.
    pub fn last(&self) -> Option<T> {
        self.cursor().last()
    }

    /// Calls `action` on every item, in order.
    pub fn for_each<F>(&self, action: F)
    where
        F: FnMut(T),
    {
        self.cursor().for_each(action)
    }

    /// Counts the items without keeping them.
    pub fn count(&self) -> usize {
        self.cursor().count()
    }

    /// Collects every item, in order.
    #[doc(alias = "collect")]
    pub fn results(&self) -> Vec<T> {
        self.cursor().collect()
    }

    /// Returns `true` if any item satisfies `predicate`.
    pub fn any<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.cursor().any(|item| predicate(&item))
    }

    /// Returns `true` if every item satisfies `predicate`.
    ///
    /// An empty query returns `true`.
    pub fn all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.cursor().all(|item| predicate(&item))
    }

    /// Finds the first item satisfying `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.cursor().find(|item| predicate(item))
    }

    /// Finds the first item satisfying `predicate` and returns its index.
    pub fn position<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.cursor().position(|item| predicate(&item))
    }

    /// Returns `true` if the query yields at least one item.
    pub fn has_results(&self) -> bool {
        self.cursor().pull().is_some()
    }

    /// Returns `true` if the query yields no items.
    pub fn is_empty(&self) -> bool {
        !self.has_results()
    }
}

impl Query<Value> {
    /// Creates a query over a dynamic value.
    ///
    /// Arrays yield their elements, objects yield single-entry objects, and
    /// any other value yields nothing.
    ///
    /// ```
    /// use lazyq::Query;
    /// use serde_json::json;
    ///
    /// assert_eq!(Query::from_value(json!([1, 2])).count(), 2);
    /// assert_eq!(Query::from_value(json!(42)).count(), 0);
    /// ```
    pub fn from_value(value: Value) -> Self {
        Query::from_source(value)
    }

    /// Creates a query over a dynamic value, rejecting unsupported shapes.
    pub fn try_from_value(value: Value) -> Result<Self> {
        Query::from_value_with(value, SourcePolicy::Reject)
    }

    /// Creates a query over a dynamic value under the given policy.
    pub fn from_value_with(value: Value, policy: SourcePolicy) -> Result<Self> {
        match SourceKind::of(&value) {
            SourceKind::Unsupported(kind) if !policy.is_permissive() => {
                Err(QueryError::UnsupportedSource { kind })
            }
            _ => Ok(Query::from_source(value)),
        }
    }
}

impl<T: Clone + 'static> IntoIterator for &Query<T> {
    type Item = T;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Cursor<T> {
        self.cursor()
    }
}
