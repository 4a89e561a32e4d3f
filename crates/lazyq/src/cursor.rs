//! Single-use pull cursors.
//!
//! A [`Cursor`] is the one-shot handle every query operation drives. It
//! wraps a [`Pull`] state object and is either *active* (the state object
//! still has items) or *exhausted*. Once a pull comes back empty the state
//! object is dropped and every later pull returns `None`.

use std::fmt;
use std::iter::FusedIterator;
use std::rc::Rc;

/// A small state object that yields items one at a time.
///
/// Implementations hold whatever position state they need (an index, a
/// buffer, an upstream cursor) and return `None` once they run out. They do
/// not need to stay exhausted after returning `None`; [`Cursor`] takes care
/// of that.
pub trait Pull {
    /// The type of item produced.
    type Item;

    /// Returns the next item, or `None` at the end of the sequence.
    fn pull(&mut self) -> Option<Self::Item>;
}

enum State<T> {
    Active(Box<dyn Pull<Item = T>>),
    Exhausted,
}

/// A single-use, stateful pull handle over a sequence of items.
///
/// Cursors are created by [`Producer::cursor`](crate::Producer::cursor) and
/// owned by whoever asked for them. They also implement [`Iterator`], so the
/// usual adapters work on them.
///
/// # Example
///
/// ```
/// use lazyq::Query;
///
/// let query = Query::from_source(vec![1, 2]);
/// let mut cursor = query.cursor();
///
/// assert_eq!(cursor.pull(), Some(1));
/// assert_eq!(cursor.pull(), Some(2));
/// assert_eq!(cursor.pull(), None);
/// assert_eq!(cursor.pull(), None);
/// ```
pub struct Cursor<T> {
    state: State<T>,
}

impl<T> Cursor<T> {
    /// Creates an active cursor driven by the given state object.
    pub fn new<P>(pull: P) -> Self
    where
        P: Pull<Item = T> + 'static,
    {
        Cursor {
            state: State::Active(Box::new(pull)),
        }
    }

    /// Creates a cursor that is already exhausted.
    pub fn exhausted() -> Self {
        Cursor {
            state: State::Exhausted,
        }
    }

    /// Pulls the next item.
    ///
    /// Returns `None` when the sequence is done, and keeps returning `None`
    /// on every later call.
    pub fn pull(&mut self) -> Option<T> {
        let next = match &mut self.state {
            State::Active(source) => source.pull(),
            State::Exhausted => return None,
        };
        if next.is_none() {
            self.state = State::Exhausted;
        }
        next
    }

    /// Returns `true` once the cursor has reported the end of its sequence.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, State::Exhausted)
    }
}

impl<T> Iterator for Cursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.pull()
    }
}

impl<T> FusedIterator for Cursor<T> {}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Active(_) => "active",
            State::Exhausted => "exhausted",
        };
        f.debug_struct("Cursor").field("state", &state).finish()
    }
}

/// Walks a shared, immutable slice by index.
pub(crate) struct IndexCursor<T> {
    items: Rc<[T]>,
    index: usize,
}

impl<T> IndexCursor<T> {
    pub(crate) fn new(items: Rc<[T]>) -> Self {
        IndexCursor { items, index: 0 }
    }
}

impl<T: Clone> Pull for IndexCursor<T> {
    type Item = T;

    fn pull(&mut self) -> Option<T> {
        let item = self.items.get(self.index)?.clone();
        self.index += 1;
        Some(item)
    }
}

/// Serves a buffer that was materialized when the cursor was created.
pub(crate) struct BufferCursor<T> {
    items: std::vec::IntoIter<T>,
}

impl<T> BufferCursor<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        BufferCursor {
            items: items.into_iter(),
        }
    }
}

impl<T> Pull for BufferCursor<T> {
    type Item = T;

    fn pull(&mut self) -> Option<T> {
        self.items.next()
    }
}
