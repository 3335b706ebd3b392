//! Delta engine
//!
//! Turns successive raw (monotonic) hardware readings into per-interval
//! deltas. Counter wraparound and driver-side resets are not detected: a raw
//! value below its predecessor yields the wrapped difference.

use crate::alloc::{HostAllocator, HostBuffer};
use crate::counters::CounterSlot;
use crate::error::HpcResult;

/// Compute `raw - previous` into `out` and advance `previous` to `raw`
///
/// All three slices must have the same length.
pub fn compute_deltas(raw: &[u64], previous: &mut [u64], out: &mut [u64]) {
    debug_assert_eq!(raw.len(), previous.len());
    debug_assert_eq!(raw.len(), out.len());

    for ((&now, before), delta) in raw.iter().zip(previous.iter_mut()).zip(out.iter_mut()) {
        *delta = now.wrapping_sub(*before);
        *before = now;
    }
}

/// Encoded slots of a context together with their previous raw values
///
/// Both arrays are allocated once with the same length and never resized, so
/// slot `i` always pairs with previous value `i`. A scratch array of the same
/// length receives each batched hardware read.
pub struct SlotTable<A: HostAllocator + Clone> {
    slots: HostBuffer<CounterSlot, A>,
    previous: HostBuffer<u64, A>,
    scratch: HostBuffer<u64, A>,
}

impl<A: HostAllocator + Clone> SlotTable<A> {
    /// Allocate a zeroed table for `len` counters
    pub fn with_len(len: usize, allocator: A) -> HpcResult<Self> {
        Ok(Self {
            slots: HostBuffer::new(len, allocator.clone())?,
            previous: HostBuffer::new(len, allocator.clone())?,
            scratch: HostBuffer::new(len, allocator)?,
        })
    }

    /// Number of counters in the table
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the table holds no counters
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Encoded slots, in caller order
    pub fn slots(&self) -> &[CounterSlot] {
        &self.slots
    }

    /// Store the encoded slot for counter `index`
    pub(crate) fn set_slot(&mut self, index: usize, slot: CounterSlot) {
        self.slots[index] = slot;
    }

    /// Raw values seen at the last baseline or query
    pub fn previous_values(&self) -> &[u64] {
        &self.previous
    }

    /// Slots and the scratch array, borrowed together for a batched read
    pub(crate) fn read_target(&mut self) -> (&[CounterSlot], &mut [u64]) {
        (&self.slots, &mut self.scratch)
    }

    /// Adopt the last read as the new baseline
    pub(crate) fn commit_baseline(&mut self) {
        self.previous.copy_from_slice(&self.scratch);
    }

    /// Write deltas of the last read into `out` and adopt it as the baseline
    ///
    /// `out` may be longer than the table; extra elements are left untouched.
    pub(crate) fn commit_deltas(&mut self, out: &mut [u64]) {
        let len = self.len();
        compute_deltas(&self.scratch, &mut self.previous, &mut out[..len]);
    }
}

impl<A: HostAllocator + Clone> std::fmt::Debug for SlotTable<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotTable")
            .field("slots", &self.slots)
            .field("previous", &self.previous)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::tests::CountingAllocator;
    use crate::alloc::SystemAllocator;
    use crate::error::HpcError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deltas_use_previous_reading() {
        let mut previous = vec![10, 100];
        let mut out = vec![0; 2];

        compute_deltas(&[15, 140], &mut previous, &mut out);
        assert_eq!(out, vec![5, 40]);
        assert_eq!(previous, vec![15, 140]);

        compute_deltas(&[15, 200], &mut previous, &mut out);
        assert_eq!(out, vec![0, 60]);
    }

    #[test]
    fn test_reset_wraps_instead_of_panicking() {
        let mut previous = vec![50];
        let mut out = vec![0];
        compute_deltas(&[20], &mut previous, &mut out);
        assert_eq!(out[0], u64::MAX - 29);
        assert_eq!(previous, vec![20]);
    }

    #[test]
    fn test_table_lengths_stay_paired() {
        let mut table = SlotTable::with_len(3, SystemAllocator).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.previous_values().len(), 3);

        table.set_slot(1, CounterSlot::new(2, 9));
        let (slots, scratch) = table.read_target();
        assert_eq!(slots[1], CounterSlot::new(2, 9));
        scratch.copy_from_slice(&[1, 2, 3]);
        table.commit_baseline();
        assert_eq!(table.previous_values(), &[1, 2, 3]);

        let (_, scratch) = table.read_target();
        scratch.copy_from_slice(&[4, 4, 4]);
        let mut out = [0u64; 4];
        table.commit_deltas(&mut out);
        assert_eq!(out, [3, 2, 1, 0]);
    }

    #[test]
    fn test_partial_allocation_is_released() {
        let allocator = CountingAllocator::default();
        allocator.fail_after.set(Some(2));
        let err = SlotTable::with_len(4, &allocator).unwrap_err();
        assert!(matches!(err, HpcError::OutOfHostMemory { .. }));
        assert_eq!(allocator.total.get(), 2);
        assert_eq!(allocator.live.get(), 0);
    }
}
