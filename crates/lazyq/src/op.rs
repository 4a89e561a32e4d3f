//! Chaining operators.
//!
//! Each operator is a [`Producer`] that captures its upstream producer and
//! builds a new cursor from a fresh upstream cursor on every call. Nothing
//! is pulled until a cursor is requested.
//!
//! - [`Filter`] and the pagination operators pull through lazily, one
//!   upstream item at a time.
//! - [`Append`] and [`Insert`] need the end of the sequence, so they drain
//!   the whole upstream into a buffer when their cursor is created.

use std::rc::Rc;

use crate::cursor::{BufferCursor, Cursor, Pull};
use crate::traits::Producer;

pub(crate) type Upstream<T> = Rc<dyn Producer<Item = T>>;
pub(crate) type Predicate<T> = Rc<dyn Fn(&T) -> bool>;

/// Keeps the items a predicate accepts.
pub(crate) struct Filter<T> {
    upstream: Upstream<T>,
    predicate: Predicate<T>,
}

impl<T> Filter<T> {
    pub(crate) fn new(upstream: Upstream<T>, predicate: Predicate<T>) -> Self {
        Filter {
            upstream,
            predicate,
        }
    }
}

impl<T: 'static> Producer for Filter<T> {
    type Item = T;

    fn cursor(&self) -> Cursor<T> {
        Cursor::new(FilterCursor {
            upstream: self.upstream.cursor(),
            predicate: Rc::clone(&self.predicate),
        })
    }
}

struct FilterCursor<T> {
    upstream: Cursor<T>,
    predicate: Predicate<T>,
}

impl<T> Pull for FilterCursor<T> {
    type Item = T;

    fn pull(&mut self) -> Option<T> {
        loop {
            let item = self.upstream.pull()?;
            if (self.predicate)(&item) {
                return Some(item);
            }
        }
    }
}

/// Adds one item after the last upstream item.
pub(crate) struct Append<T> {
    upstream: Upstream<T>,
    item: T,
}

impl<T> Append<T> {
    pub(crate) fn new(upstream: Upstream<T>, item: T) -> Self {
        Append { upstream, item }
    }
}

impl<T: Clone + 'static> Producer for Append<T> {
    type Item = T;

    fn cursor(&self) -> Cursor<T> {
        let mut items: Vec<T> = self.upstream.cursor().collect();
        #[cfg(feature = "tracing")]
        tracing::trace!(buffered = items.len(), "append drained upstream");
        items.push(self.item.clone());
        Cursor::new(BufferCursor::new(items))
    }
}

/// Inserts one item at a position.
///
/// Positions past the end append. A position equal to the upstream count
/// is an ordinary insert, which also lands at the end.
pub(crate) struct Insert<T> {
    upstream: Upstream<T>,
    index: usize,
    item: T,
}

impl<T> Insert<T> {
    pub(crate) fn new(upstream: Upstream<T>, index: usize, item: T) -> Self {
        Insert {
            upstream,
            index,
            item,
        }
    }
}

impl<T: Clone + 'static> Producer for Insert<T> {
    type Item = T;

    fn cursor(&self) -> Cursor<T> {
        let mut items: Vec<T> = self.upstream.cursor().collect();
        let count = items.len();
        #[cfg(feature = "tracing")]
        tracing::trace!(
            buffered = count,
            index = self.index,
            overflow = self.index > count,
            "insert drained upstream"
        );
        if self.index > count {
            items.push(self.item.clone());
        } else {
            items.insert(self.index, self.item.clone());
        }
        Cursor::new(BufferCursor::new(items))
    }
}

/// Drops the first `n` upstream items.
pub(crate) struct Skip<T> {
    upstream: Upstream<T>,
    n: usize,
}

impl<T> Skip<T> {
    pub(crate) fn new(upstream: Upstream<T>, n: usize) -> Self {
        Skip { upstream, n }
    }
}

impl<T: 'static> Producer for Skip<T> {
    type Item = T;

    fn cursor(&self) -> Cursor<T> {
        Cursor::new(SkipCursor {
            upstream: self.upstream.cursor(),
            remaining: self.n,
        })
    }
}

struct SkipCursor<T> {
    upstream: Cursor<T>,
    remaining: usize,
}

impl<T> Pull for SkipCursor<T> {
    type Item = T;

    fn pull(&mut self) -> Option<T> {
        while self.remaining > 0 {
            self.remaining -= 1;
            self.upstream.pull()?;
        }
        self.upstream.pull()
    }
}

/// Stops after `n` items without pulling further upstream.
pub(crate) struct Take<T> {
    upstream: Upstream<T>,
    n: usize,
}

impl<T> Take<T> {
    pub(crate) fn new(upstream: Upstream<T>, n: usize) -> Self {
        Take { upstream, n }
    }
}

impl<T: 'static> Producer for Take<T> {
    type Item = T;

    fn cursor(&self) -> Cursor<T> {
        if self.n == 0 {
            return Cursor::exhausted();
        }
        Cursor::new(TakeCursor {
            upstream: self.upstream.cursor(),
            remaining: self.n,
        })
    }
}

struct TakeCursor<T> {
    upstream: Cursor<T>,
    remaining: usize,
}

impl<T> Pull for TakeCursor<T> {
    type Item = T;

    fn pull(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.upstream.pull()
    }
}
