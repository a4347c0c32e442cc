/// Error returned when inserting into an [`Accumulator`] that is at capacity
///
/// [`Accumulator`]: crate::Accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("accumulator is full: capacity is {capacity} leaves")]
pub struct TreeFullError {
    pub(crate) capacity: u64,
}

impl TreeFullError {
    /// The capacity of the accumulator that rejected the insert
    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}
