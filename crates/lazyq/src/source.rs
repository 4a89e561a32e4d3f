//! Collections that can start a query.
//!
//! Ordered sources (vectors, arrays, slices, deques) yield their elements in
//! index order. Unordered sources (hash maps, B-tree maps) yield one
//! freshly built single-entry map per item, in the order the entries were
//! snapshotted when the query was created.
//!
//! Owned sources are moved into the query. Borrowed sources are cloned, so
//! later changes to the caller's collection never reach the query.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;

use crate::cursor::{Cursor, IndexCursor, Pull};
use crate::traits::{Empty, Producer};

/// A collection that can be turned into a query producer.
///
/// See [`Query::from_source`](crate::Query::from_source).
pub trait Source {
    /// The type of item the query yields.
    type Item: Clone + 'static;

    /// Captures the collection and returns a producer over it.
    fn into_producer(self) -> Rc<dyn Producer<Item = Self::Item>>;
}

/// Ordered source: elements in index order.
pub(crate) struct Sequence<T> {
    items: Rc<[T]>,
}

impl<T> Sequence<T> {
    pub(crate) fn new(items: impl Into<Rc<[T]>>) -> Self {
        Sequence {
            items: items.into(),
        }
    }
}

impl<T: Clone + 'static> Producer for Sequence<T> {
    type Item = T;

    fn cursor(&self) -> Cursor<T> {
        Cursor::new(IndexCursor::new(Rc::clone(&self.items)))
    }
}

/// Unordered source: one single-entry container per key/value pair.
pub(crate) struct Entries<K, V, M> {
    entries: Rc<[(K, V)]>,
    wrap: fn(K, V) -> M,
}

impl<K, V, M> Entries<K, V, M> {
    pub(crate) fn new(entries: Vec<(K, V)>, wrap: fn(K, V) -> M) -> Self {
        Entries {
            entries: entries.into(),
            wrap,
        }
    }
}

impl<K, V, M> Producer for Entries<K, V, M>
where
    K: Clone + 'static,
    V: Clone + 'static,
    M: 'static,
{
    type Item = M;

    fn cursor(&self) -> Cursor<M> {
        Cursor::new(EntryCursor {
            entries: Rc::clone(&self.entries),
            index: 0,
            wrap: self.wrap,
        })
    }
}

struct EntryCursor<K, V, M> {
    entries: Rc<[(K, V)]>,
    index: usize,
    wrap: fn(K, V) -> M,
}

impl<K: Clone, V: Clone, M> Pull for EntryCursor<K, V, M> {
    type Item = M;

    fn pull(&mut self) -> Option<M> {
        let (key, value) = self.entries.get(self.index)?.clone();
        self.index += 1;
        Some((self.wrap)(key, value))
    }
}

fn sequence<T: Clone + 'static>(items: impl Into<Rc<[T]>>) -> Rc<dyn Producer<Item = T>> {
    Rc::new(Sequence::new(items))
}

impl<T: Clone + 'static> Source for Vec<T> {
    type Item = T;

    fn into_producer(self) -> Rc<dyn Producer<Item = T>> {
        sequence(self)
    }
}

impl<T: Clone + 'static, const N: usize> Source for [T; N] {
    type Item = T;

    fn into_producer(self) -> Rc<dyn Producer<Item = T>> {
        sequence(Vec::from(self))
    }
}

impl<T: Clone + 'static> Source for &[T] {
    type Item = T;

    fn into_producer(self) -> Rc<dyn Producer<Item = T>> {
        sequence(self)
    }
}

impl<T: Clone + 'static> Source for &Vec<T> {
    type Item = T;

    fn into_producer(self) -> Rc<dyn Producer<Item = T>> {
        sequence(self.as_slice())
    }
}

impl<T: Clone + 'static> Source for VecDeque<T> {
    type Item = T;

    fn into_producer(self) -> Rc<dyn Producer<Item = T>> {
        sequence(Vec::from(self))
    }
}

fn single_hash_entry<K, V, S>(key: K, value: V) -> HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    let mut map = HashMap::with_capacity_and_hasher(1, S::default());
    map.insert(key, value);
    map
}

fn single_btree_entry<K: Ord, V>(key: K, value: V) -> BTreeMap<K, V> {
    let mut map = BTreeMap::new();
    map.insert(key, value);
    map
}

impl<K, V, S> Source for HashMap<K, V, S>
where
    K: Clone + Eq + Hash + 'static,
    V: Clone + 'static,
    S: BuildHasher + Default + Clone + 'static,
{
    type Item = HashMap<K, V, S>;

    fn into_producer(self) -> Rc<dyn Producer<Item = Self::Item>> {
        let entries: Vec<(K, V)> = self.into_iter().collect();
        Rc::new(Entries::new(entries, single_hash_entry::<K, V, S>))
    }
}

impl<K, V, S> Source for &HashMap<K, V, S>
where
    K: Clone + Eq + Hash + 'static,
    V: Clone + 'static,
    S: BuildHasher + Default + Clone + 'static,
{
    type Item = HashMap<K, V, S>;

    fn into_producer(self) -> Rc<dyn Producer<Item = Self::Item>> {
        let entries: Vec<(K, V)> = self
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Rc::new(Entries::new(entries, single_hash_entry::<K, V, S>))
    }
}

impl<K, V> Source for BTreeMap<K, V>
where
    K: Clone + Ord + 'static,
    V: Clone + 'static,
{
    type Item = BTreeMap<K, V>;

    fn into_producer(self) -> Rc<dyn Producer<Item = Self::Item>> {
        let entries: Vec<(K, V)> = self.into_iter().collect();
        Rc::new(Entries::new(entries, single_btree_entry::<K, V>))
    }
}

impl<K, V> Source for &BTreeMap<K, V>
where
    K: Clone + Ord + 'static,
    V: Clone + 'static,
{
    type Item = BTreeMap<K, V>;

    fn into_producer(self) -> Rc<dyn Producer<Item = Self::Item>> {
        let entries: Vec<(K, V)> = self
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Rc::new(Entries::new(entries, single_btree_entry::<K, V>))
    }
}

/// `None` is an empty source.
impl<S: Source> Source for Option<S> {
    type Item = S::Item;

    fn into_producer(self) -> Rc<dyn Producer<Item = S::Item>> {
        match self {
            Some(source) => source.into_producer(),
            None => Rc::new(Empty::new()),
        }
    }
}
