//! Rolling buffer with FIFO eviction.
//!
//! A fixed-capacity window over the most recent values. Once full, every
//! push evicts the oldest entry first, so the buffer always holds the last
//! `capacity` values in insertion order.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Bounded, insertion-ordered queue.
///
/// Invariant: `len() <= capacity()` at all times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingBuffer<T> {
    /// Create an empty buffer holding at most `capacity` values.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a value, evicting the oldest one when full.
    ///
    /// Returns the evicted value, if any. A zero-capacity buffer drops
    /// every value it is given.
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(value);
        }
        let evicted = if self.is_full() {
            self.data.pop_front()
        } else {
            None
        };
        self.data.push_back(value);
        evicted
    }

    /// Maximum number of values retained.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of values currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if the next push will evict.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.data.len() >= self.capacity
    }

    /// Oldest retained value.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.data.front()
    }

    /// Newest value.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.data.back()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.data.iter()
    }

    /// Drop all values. Capacity is kept.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T: Clone> RollingBuffer<T> {
    /// Copy the contents out, oldest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for &'a RollingBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_starts_empty() {
        let buf: RollingBuffer<u32> = RollingBuffer::new(3);
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 3);
        assert!(buf.front().is_none());
    }

    #[test]
    fn test_buffer_evicts_oldest() {
        let mut buf = RollingBuffer::new(3);
        assert_eq!(buf.push(1), None);
        assert_eq!(buf.push(2), None);
        assert_eq!(buf.push(3), None);
        assert!(buf.is_full());

        assert_eq!(buf.push(4), Some(1));
        assert_eq!(buf.to_vec(), vec![2, 3, 4]);
        assert_eq!(buf.front(), Some(&2));
        assert_eq!(buf.back(), Some(&4));
    }

    #[test]
    fn test_buffer_zero_capacity_drops_everything() {
        let mut buf = RollingBuffer::new(0);
        assert_eq!(buf.push("a"), Some("a"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_buffer_clear_keeps_capacity() {
        let mut buf = RollingBuffer::new(5);
        for i in 0..10 {
            buf.push(i);
        }
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 5);
    }

    #[test]
    fn test_buffer_iteration_order() {
        let mut buf = RollingBuffer::new(4);
        for i in 0..6 {
            buf.push(i);
        }
        let seen: Vec<_> = (&buf).into_iter().copied().collect();
        assert_eq!(seen, vec![2, 3, 4, 5]);
    }
}
