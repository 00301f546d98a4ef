//! Comparator strategies for [`DynamicPriorityQueue`](crate::DynamicPriorityQueue).
//!
//! The queue is a max-heap under its comparator: the item that compares
//! greatest is the top. Callers that want "smallest first" pass
//! [`MinOrder`] or a reversed closure.

use std::cmp::Ordering;

/// A strict weak ordering over `T`, fixed for the lifetime of a queue.
///
/// Implemented for [`NaturalOrder`], [`MinOrder`], and every
/// `Fn(&T, &T) -> Ordering` closure.
pub trait Compare<T: ?Sized> {
    /// Compare `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Greatest item first, using `T: Ord`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Compare<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Smallest item first, using `T: Ord`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MinOrder;

impl<T: Ord + ?Sized> Compare<T> for MinOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        b.cmp(a)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
