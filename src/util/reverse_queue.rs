use std::ops::Index;

use crate::error::{Error, Result};

/// Bounded history queue that is indexed from the most recent element.
///
/// Index `0` is the element that was enqueued last, index `len - 1` the
/// oldest one still retained. Enqueuing into a full queue drops the oldest
/// element.
#[derive(Clone, Debug)]
pub struct ReverseQueue<T> {
    items: Vec<T>,
    /// Physical index of the most recent element.
    start: usize,
    capacity: usize,
}

impl<T> ReverseQueue<T> {
    /// Create a new queue that retains at most `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        Ok(Self {
            items: Vec::with_capacity(capacity),
            start: 0,
            capacity,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    /// Add a new most recent element.
    pub fn enqueue(&mut self, item: T) {
        if self.items.len() < self.capacity {
            // Not wrapped yet so physical order is oldest first
            self.items.push(item);
            self.start = self.items.len() - 1;
        } else {
            self.start = (self.start + 1) % self.capacity;
            self.items[self.start] = item;
        }
    }

    /// Remove and return the oldest element.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }

        let oldest = self.oldest_physical_idx();

        // Restore the unwrapped layout so that `start` stays the last index
        self.items.rotate_left(oldest);
        let item = self.items.remove(0);
        self.start = self.items.len().saturating_sub(1);

        Some(item)
    }

    /// The `idx`-th most recent element.
    pub fn get(&self, idx: usize) -> Option<&T> {
        let len = self.items.len();

        (idx < len).then(|| &self.items[(self.start + len - idx) % len])
    }

    /// Same as [`ReverseQueue::get`] but returns an error on out of bounds
    /// access.
    pub fn try_get(&self, idx: usize) -> Result<&T> {
        self.get(idx).ok_or(Error::IndexOutOfBounds {
            idx,
            len: self.items.len(),
        })
    }

    /// Iterate from the most recent to the oldest element.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        (0..self.items.len()).map(move |i| &self[i])
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.start = 0;
    }

    fn oldest_physical_idx(&self) -> usize {
        (self.start + 1) % self.items.len()
    }
}

impl<T> Index<usize> for ReverseQueue<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &Self::Output {
        match self.get(idx) {
            Some(item) => item,
            None => panic!(
                "index {idx} is out of bounds for ReverseQueue of length {}",
                self.items.len()
            ),
        }
    }
}
