//! Fixed-capacity ring buffer.

use std::collections::VecDeque;

/// Keeps the newest `capacity` items; pushing into a full queue evicts the oldest.
#[derive(Debug, Clone)]
pub struct CircularQueue<T> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> CircularQueue<T> {
    /// Creates a queue. A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Append `item`, evicting the oldest entry when full.
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> CircularQueue<T> {
    /// Every item, oldest to newest.
    #[must_use]
    pub fn get_all(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }

    /// The newest `n` items, still oldest to newest.
    #[must_use]
    pub fn get_latest(&self, n: usize) -> Vec<T> {
        let skip = self.items.len().saturating_sub(n);
        self.items.iter().skip(skip).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let mut q = CircularQueue::new(3);
        for i in 1..=5 {
            q.push(i);
        }
        assert_eq!(q.len(), 3);
        assert_eq!(q.get_all(), vec![3, 4, 5]);
    }

    #[test]
    fn get_latest_bounds() {
        let mut q = CircularQueue::new(4);
        q.push('a');
        q.push('b');
        q.push('c');
        assert_eq!(q.get_latest(0), Vec::<char>::new());
        assert_eq!(q.get_latest(2), vec!['b', 'c']);
        assert_eq!(q.get_latest(10), vec!['a', 'b', 'c']);
    }

    #[test]
    fn zero_capacity_holds_one() {
        let mut q = CircularQueue::new(0);
        q.push(1);
        q.push(2);
        assert_eq!(q.capacity(), 1);
        assert_eq!(q.get_all(), vec![2]);
    }

    #[test]
    fn clear_empties() {
        let mut q = CircularQueue::new(2);
        q.push(1);
        q.clear();
        assert!(q.is_empty());
        assert!(q.get_all().is_empty());
    }
}
