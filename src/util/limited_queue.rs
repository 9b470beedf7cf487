use std::{iter::Chain, ops::Index, slice::Iter};

/// Indexed queue with limited capacity.
///
/// Once full, pushing a new element evicts the oldest one. Indexing starts at
/// the oldest element.
///
/// The backing array lives on the stack so `size_of<T>() * N` should stay
/// small.
#[derive(Clone, Debug)]
pub struct LimitedQueue<T, const N: usize> {
    queue: [T; N],
    /// If the queue is not empty, `end` is the index of the last element.
    /// Otherwise, it has no meaning.
    end: usize,
    /// Amount of elements in the queue. This is equal to `end + 1` if the
    /// queue is not full, or `N` otherwise.
    len: usize,
}

impl<T, const N: usize> LimitedQueue<T, N> {
    const NON_ZERO_CAPACITY: () = assert!(N > 0, "LimitedQueue requires a capacity of at least 1");
}

impl<T, const N: usize> Default for LimitedQueue<T, N>
where
    T: Copy + Default,
{
    fn default() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_ZERO_CAPACITY;

        Self {
            end: N - 1,
            queue: [T::default(); N],
            len: 0,
        }
    }
}

impl<T, const N: usize> LimitedQueue<T, N>
where
    T: Copy + Default,
{
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, const N: usize> LimitedQueue<T, N> {
    pub fn push(&mut self, elem: T) {
        self.end = (self.end + 1) % N;
        self.queue[self.end] = elem;
        self.len += usize::from(self.len < N);
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.end = N - 1;
    }

    pub const fn last(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            Some(&self.queue[self.end])
        }
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        (idx < self.len).then(|| &self.queue[self.physical_idx(idx)])
    }

    /// The elements as two slices, oldest first.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        if self.is_full() {
            (&self.queue[self.end + 1..N], &self.queue[0..=self.end])
        } else {
            (&[], &self.queue[0..self.len])
        }
    }

    /// Iterate over the elements, oldest first.
    pub fn iter(&self) -> Chain<Iter<'_, T>, Iter<'_, T>> {
        let (head, tail) = self.as_slices();

        head.iter().chain(tail)
    }

    const fn physical_idx(&self, idx: usize) -> usize {
        (idx + (self.len == N) as usize * (self.end + 1)) % N
    }
}

impl<T, const N: usize> Index<usize> for LimitedQueue<T, N> {
    type Output = T;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "index {idx} is out of bounds for LimitedQueue of length {}",
            self.len
        );

        &self.queue[self.physical_idx(idx)]
    }
}
