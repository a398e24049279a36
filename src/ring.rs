/// A physical position inside a ring of fixed capacity.
///
/// The position is always kept in `0..capacity`: advancing onto the physical
/// end wraps back to 0 immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RingIndex {
    pos: usize,
    capacity: usize,
}

impl RingIndex {
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self { pos: 0, capacity }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// number of bytes that can be written before hitting the physical end
    pub(crate) fn contiguous_free(&self) -> usize {
        self.capacity - self.pos
    }

    pub(crate) fn advance(&mut self, count: usize) {
        debug_assert!(count <= self.contiguous_free());
        self.pos = (self.pos + count) % self.capacity;
    }

    /// Physical position of the byte written `distance` bytes before the
    /// current position. `distance` must not exceed the capacity.
    pub(crate) fn behind(&self, distance: usize) -> usize {
        debug_assert!(distance <= self.capacity);
        (self.pos + self.capacity - distance) % self.capacity
    }
}
