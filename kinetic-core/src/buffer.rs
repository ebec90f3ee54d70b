//! Fixed-Size Circular Buffer
//!
//! ## Overview
//!
//! Ring buffer with a compile-time capacity, used for the motion history and
//! the short sample windows inside detectors. It never allocates: storage is
//! an array of `Option<T>` plus a write position.
//!
//! ## Operations
//!
//! - `push` is O(1) and overwrites the oldest item when full
//! - `last` returns the newest item in O(1)
//! - `window(n)` iterates the newest n items in arrival order
//!
//! ## Memory Layout
//!
//! ```text
//! CircularBuffer<T, 5> after 7 pushes (A..G):
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  F  │  G  │  C  │  D  │  E  │  ← physical slots
//! └─────┴─────┴─────┴─────┴─────┘
//!              ↑
//!              └── write_pos = 2 (also the oldest item when full)
//!
//! Logical view: [C, D, E, F, G]
//! ```
//!
//! Prefer power-of-two capacities; the modulo in `push()` then compiles to a
//! mask.
//!
//! ## Usage Example
//!
//! ```rust
//! use kinetic_core::buffer::CircularBuffer;
//!
//! let mut buf: CircularBuffer<f32, 4> = CircularBuffer::new();
//! for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     buf.push(v);
//! }
//!
//! let recent: Vec<f32> = buf.window(2).copied().collect();
//! assert_eq!(recent, vec![4.0, 5.0]);
//! assert_eq!(buf.last(), Some(&5.0));
//! ```

/// Fixed-size circular buffer
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - logical index 0 is the oldest item
///
/// Not thread-safe; the classifier owns its buffers exclusively.
#[derive(Debug, Clone)]
pub struct CircularBuffer<T: Copy, const N: usize> {
    /// Storage array using Option for uninitialized slots
    data: [Option<T>; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Current number of valid items
    len: usize,
}

impl<T: Copy, const N: usize> CircularBuffer<T, N> {
    /// Creates a new empty circular buffer
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Adds an item, overwriting the oldest when full
    pub fn push(&mut self, item: T) {
        if N == 0 {
            return;
        }

        self.data[self.write_pos] = Some(item);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Compile-time capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Most recent item
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        self.data[idx].as_ref()
    }

    /// Iterate over all items from oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, T, N> {
        CircularBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// Iterate over the newest `n` items (or fewer), oldest first
    pub fn window(&self, n: usize) -> CircularBufferIter<'_, T, N> {
        CircularBufferIter {
            buffer: self,
            index: self.len.saturating_sub(n),
        }
    }

    /// Clear all items
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }

    /// Gets an item by logical index (0 = oldest, len-1 = newest)
    ///
    /// ```text
    /// Physical array:  [D, E, A, B, C]  (write_pos = 2)
    /// Logical view:    [A, B, C, D, E]
    /// logical[i] = physical[(write_pos + i) % N] once full
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            // Buffer not full yet, data starts at 0
            index
        } else {
            // Buffer is full, oldest data is at write_pos
            (self.write_pos + index) % N
        };

        self.data[actual_index].as_ref()
    }
}

/// Iterator over circular buffer contents, oldest first
pub struct CircularBufferIter<'a, T: Copy, const N: usize> {
    buffer: &'a CircularBuffer<T, N>,
    index: usize,
}

impl<'a, T: Copy, const N: usize> Iterator for CircularBufferIter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, T: Copy, const N: usize> ExactSizeIterator for CircularBufferIter<'a, T, N> {}

impl<T: Copy, const N: usize> Default for CircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer() {
        let buffer: CircularBuffer<u32, 5> = CircularBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert!(buffer.last().is_none());
        assert_eq!(buffer.window(3).count(), 0);
    }

    #[test]
    fn circular_overwrite() {
        let mut buffer = CircularBuffer::<u32, 3>::new();

        for i in 0..5 {
            buffer.push(i);
        }

        assert_eq!(buffer.len(), 3);
        assert!(buffer.is_full());

        // 0 and 1 were overwritten
        let values: Vec<u32> = buffer.iter().copied().collect();
        assert_eq!(values, vec![2, 3, 4]);
        assert_eq!(buffer.last(), Some(&4));
    }

    #[test]
    fn window_returns_newest_in_arrival_order() {
        let mut buffer = CircularBuffer::<u32, 4>::new();
        for i in 0..6 {
            buffer.push(i);
        }

        let last_two: Vec<u32> = buffer.window(2).copied().collect();
        assert_eq!(last_two, vec![4, 5]);

        // Asking for more than stored yields everything
        let all: Vec<u32> = buffer.window(10).copied().collect();
        assert_eq!(all, vec![2, 3, 4, 5]);
        assert_eq!(buffer.window(3).len(), 3);
    }

    #[test]
    fn clear_resets() {
        let mut buffer = CircularBuffer::<u32, 4>::new();
        buffer.push(7);
        buffer.push(8);
        buffer.clear();

        assert!(buffer.is_empty());
        buffer.push(9);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![9]);
    }
}
