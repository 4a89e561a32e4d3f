//! The producer abstraction behind every query.
//!
//! This module provides the [`Producer`] trait, which every source and
//! operator implements, and [`FnProducer`] for closure-based producers.

use crate::cursor::Cursor;

/// A restartable factory of cursors.
///
/// Each call to [`cursor`](Producer::cursor) must return an independent
/// cursor positioned at the start of the sequence. Producers take `&self`,
/// so any state they own is shared by all their cursors and must not change.
///
/// # Manual Implementation
///
/// ```
/// use lazyq::{Cursor, Producer, Pull, Query};
///
/// struct Countdown(u32);
///
/// struct CountdownCursor(u32);
///
/// impl Pull for CountdownCursor {
///     type Item = u32;
///
///     fn pull(&mut self) -> Option<u32> {
///         if self.0 == 0 {
///             return None;
///         }
///         self.0 -= 1;
///         Some(self.0 + 1)
///     }
/// }
///
/// impl Producer for Countdown {
///     type Item = u32;
///
///     fn cursor(&self) -> Cursor<u32> {
///         Cursor::new(CountdownCursor(self.0))
///     }
/// }
///
/// let query = Query::from_producer(Countdown(3));
/// assert_eq!(query.results(), vec![3, 2, 1]);
/// ```
pub trait Producer {
    /// The type of item produced.
    type Item;

    /// Returns a fresh cursor over the whole sequence.
    fn cursor(&self) -> Cursor<Self::Item>;
}

/// A [`Producer`] backed by a closure.
///
/// Created by [`Query::from_fn`](crate::Query::from_fn).
pub struct FnProducer<F> {
    f: F,
}

impl<F> FnProducer<F> {
    /// Wraps a closure that builds a fresh cursor on every call.
    pub fn new(f: F) -> Self {
        FnProducer { f }
    }
}

impl<T, F> Producer for FnProducer<F>
where
    F: Fn() -> Cursor<T>,
{
    type Item = T;

    fn cursor(&self) -> Cursor<T> {
        (self.f)()
    }
}

/// A producer whose cursors are always exhausted.
pub(crate) struct Empty<T> {
    _item: std::marker::PhantomData<fn() -> T>,
}

impl<T> Empty<T> {
    pub(crate) fn new() -> Self {
        Empty {
            _item: std::marker::PhantomData,
        }
    }
}

impl<T> Producer for Empty<T> {
    type Item = T;

    fn cursor(&self) -> Cursor<T> {
        Cursor::exhausted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::BufferCursor;

    #[test]
    fn fn_producer_restarts() {
        let producer = FnProducer::new(|| Cursor::new(BufferCursor::new(vec![1, 2])));

        let first: Vec<i32> = producer.cursor().collect();
        let second: Vec<i32> = producer.cursor().collect();
        assert_eq!(first, vec![1, 2]);
        assert_eq!(first, second);
    }

    #[test]
    fn cursors_are_independent() {
        let producer = FnProducer::new(|| Cursor::new(BufferCursor::new(vec!['a', 'b'])));

        let mut a = producer.cursor();
        let mut b = producer.cursor();
        assert_eq!(a.pull(), Some('a'));
        assert_eq!(a.pull(), Some('b'));
        assert_eq!(b.pull(), Some('a'));
    }

    #[test]
    fn empty_producer() {
        let producer: Empty<String> = Empty::new();
        assert!(producer.cursor().pull().is_none());
        assert!(producer.cursor().is_exhausted());
    }
}
