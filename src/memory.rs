//! Bounds-checked views over owned raw memory.
//!
//! Hardware register blocks are typically mapped as one large contiguous
//! buffer with many logical sub-regions, one per peripheral. [`MemoryView`]
//! gives each consumer a narrow window over a [`MemoryBlock`] that cannot
//! read or write outside its declared range, so no pointer arithmetic leaks
//! into driver code.
//!
//! A view borrows its owner, so the compiler guarantees it can never outlive
//! the buffer it windows into; releasing the buffer while a view exists is a
//! compile error rather than a runtime hazard.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use thiserror_no_std::Error;

/// Error raised when a view construction or access falls outside the valid
/// range. Carries the attempted range and the available length so the caller
/// can diagnose the violation without retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("range {start}..{end} outside buffer of {len} bytes")]
    OutOfRange {
        /// First byte of the attempted access.
        start: usize,
        /// One past the last byte of the attempted access.
        end: usize,
        /// Length of the buffer or view the access was checked against.
        len: usize,
    },
}

/// An owned, fixed-length, zero-initialized byte buffer.
///
/// Stands in for a mapped hardware memory block or a scratch region. The
/// buffer is released exactly once, by `Drop`.
pub struct MemoryBlock {
    bytes: Vec<u8>,
}

impl MemoryBlock {
    /// Allocates `len` bytes, all zero.
    pub fn new(len: usize) -> Self {
        Self {
            bytes: vec![0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Snapshot of the full buffer contents, for inspection.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Bulk-copies `count` bytes from `src[src_offset..]` into the buffer at
    /// `dst_offset`. A `count` of zero is a no-op.
    pub fn copy_from(
        &mut self,
        src: &[u8],
        src_offset: usize,
        dst_offset: usize,
        count: usize,
    ) -> Result<(), MemoryError> {
        check_range(src_offset, count, src.len())?;
        check_range(dst_offset, count, self.bytes.len())?;
        self.bytes[dst_offset..dst_offset + count]
            .copy_from_slice(&src[src_offset..src_offset + count]);
        Ok(())
    }
}

/// A validated, non-owning window over a sub-range of a [`MemoryBlock`].
///
/// Construction checks that the window lies entirely inside the owner; every
/// access is then checked against the window, so no operation can touch
/// bytes outside either bound.
///
/// The `writable` flag records read-only intent for consumers that want to
/// honor it. It is advisory: [`write`](Self::write), [`copy_from`](Self::copy_from)
/// and `IndexMut` succeed regardless of the flag. Bounds are the only
/// hard-enforced contract.
///
/// Overlapping views over one owner are not rejected here; exclusive access
/// is left to the borrow checker (a view holds `&mut` to its owner).
pub struct MemoryView<'a> {
    owner: &'a mut MemoryBlock,
    start: usize,
    len: usize,
    writable: bool,
}

impl<'a> MemoryView<'a> {
    /// Creates a view over `owner[start..start + len]`.
    ///
    /// Fails with [`MemoryError::OutOfRange`] if `len` is zero, `start` is
    /// past the end of the owner, or the window runs past the owner's end.
    pub fn new(
        owner: &'a mut MemoryBlock,
        start: usize,
        len: usize,
        writable: bool,
    ) -> Result<Self, MemoryError> {
        let owner_len = owner.len();
        let fits = len > 0
            && start < owner_len
            && start.checked_add(len).is_some_and(|end| end <= owner_len);
        if !fits {
            return Err(MemoryError::OutOfRange {
                start,
                end: start.saturating_add(len),
                len: owner_len,
            });
        }
        Ok(Self {
            owner,
            start,
            len,
            writable,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Read-only intent declared at construction. Not enforced on writes.
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// The windowed bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.owner.bytes[self.start..self.start + self.len]
    }

    /// Reads the byte at `offset` within the view.
    pub fn read(&self, offset: usize) -> Result<u8, MemoryError> {
        let index = self.checked_index(offset)?;
        Ok(self.owner.bytes[index])
    }

    /// Writes `value` at `offset` within the view.
    pub fn write(&mut self, offset: usize, value: u8) -> Result<(), MemoryError> {
        let index = self.checked_index(offset)?;
        self.owner.bytes[index] = value;
        Ok(())
    }

    /// Bulk-copies `count` bytes from `src[src_offset..]` into the view at
    /// `dst_offset`. A `count` of zero is a no-op.
    pub fn copy_from(
        &mut self,
        src: &[u8],
        src_offset: usize,
        dst_offset: usize,
        count: usize,
    ) -> Result<(), MemoryError> {
        check_range(src_offset, count, src.len())?;
        check_range(dst_offset, count, self.len)?;
        let base = self.start + dst_offset;
        self.owner.bytes[base..base + count]
            .copy_from_slice(&src[src_offset..src_offset + count]);
        Ok(())
    }

    fn checked_index(&self, offset: usize) -> Result<usize, MemoryError> {
        if offset >= self.len {
            return Err(MemoryError::OutOfRange {
                start: offset,
                end: offset + 1,
                len: self.len,
            });
        }
        Ok(self.start + offset)
    }
}

/// Indexing is equivalent to [`MemoryView::read`]; out-of-range offsets
/// panic, per the `Index` contract.
impl Index<usize> for MemoryView<'_> {
    type Output = u8;

    fn index(&self, offset: usize) -> &u8 {
        assert!(offset < self.len, "offset {offset} outside view of {} bytes", self.len);
        &self.owner.bytes[self.start + offset]
    }
}

/// Index-based assignment is equivalent to [`MemoryView::write`], advisory
/// `writable` flag included.
impl IndexMut<usize> for MemoryView<'_> {
    fn index_mut(&mut self, offset: usize) -> &mut u8 {
        assert!(offset < self.len, "offset {offset} outside view of {} bytes", self.len);
        &mut self.owner.bytes[self.start + offset]
    }
}

fn check_range(offset: usize, count: usize, len: usize) -> Result<(), MemoryError> {
    match offset.checked_add(count) {
        Some(end) if end <= len => Ok(()),
        _ => Err(MemoryError::OutOfRange {
            start: offset,
            end: offset.saturating_add(count),
            len,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_block_is_zeroed() {
        let block = MemoryBlock::new(10);
        assert_eq!(block.len(), 10);
        assert_eq!(block.to_vec(), vec![0u8; 10]);
    }

    #[test]
    fn view_exceeding_owner_bounds_is_rejected() {
        let mut owner = MemoryBlock::new(10);
        // (start, len) pairs that violate the construction invariant. The
        // negative-start case of the original design is unrepresentable with
        // usize offsets.
        for (start, len) in [(11, 1), (0, 11), (10, 1), (0, 0)] {
            let result = MemoryView::new(&mut owner, start, len, false);
            assert_eq!(
                result.err(),
                Some(MemoryError::OutOfRange {
                    start,
                    end: start + len,
                    len: 10
                }),
                "view ({start}, {len}) should be rejected"
            );
        }
    }

    #[test]
    fn valid_view_within_owner_succeeds() {
        let mut owner = MemoryBlock::new(10);
        let view = MemoryView::new(&mut owner, 9, 1, true).unwrap();
        assert_eq!(view.len(), 1);
        assert!(view.is_writable());
    }

    #[test]
    fn copy_into_view_lands_at_owner_offset() {
        let mut owner = MemoryBlock::new(10);
        let mut view = MemoryView::new(&mut owner, 2, 4, true).unwrap();
        view.copy_from(&[0x1, 0x2, 0x3, 0x4], 0, 0, 4).unwrap();
        assert_eq!(
            owner.to_vec(),
            vec![0x0, 0x0, 0x1, 0x2, 0x3, 0x4, 0x0, 0x0, 0x0, 0x0]
        );
    }

    #[test]
    fn copy_exceeding_view_bounds_is_rejected() {
        let mut owner = MemoryBlock::new(10);
        let mut view = MemoryView::new(&mut owner, 2, 4, true).unwrap();
        for (dst_offset, count) in [(4, 1), (0, 5)] {
            let src = vec![0u8; count];
            assert!(
                view.copy_from(&src, 0, dst_offset, count).is_err(),
                "copy at {dst_offset} of {count} bytes should be rejected"
            );
        }
    }

    #[test]
    fn copy_of_zero_bytes_is_a_noop() {
        let mut owner = MemoryBlock::new(10);
        let mut view = MemoryView::new(&mut owner, 2, 4, true).unwrap();
        view.copy_from(&[], 0, 0, 0).unwrap();
        assert_eq!(owner.to_vec(), vec![0u8; 10]);
    }

    #[test]
    fn write_maps_to_owner_offset() {
        // The views are created with writable = false: the flag is advisory
        // and writes succeed regardless, matching the documented choice.
        for (offset, expected) in [
            (0, [0x0, 0x0, 0x1, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0]),
            (1, [0x0, 0x0, 0x0, 0x1, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0]),
            (2, [0x0, 0x0, 0x0, 0x0, 0x1, 0x0, 0x0, 0x0, 0x0, 0x0]),
            (3, [0x0, 0x0, 0x0, 0x0, 0x0, 0x1, 0x0, 0x0, 0x0, 0x0]),
        ] {
            let mut owner = MemoryBlock::new(10);
            let mut view = MemoryView::new(&mut owner, 2, 4, false).unwrap();
            view.write(offset, 0x1).unwrap();
            assert_eq!(owner.as_slice(), &expected);
        }
    }

    #[test]
    fn indexed_assignment_matches_write() {
        for offset in 0..4usize {
            let mut owner = MemoryBlock::new(10);
            let mut view = MemoryView::new(&mut owner, 2, 4, false).unwrap();
            view[offset] = 0x1;
            assert_eq!(owner.as_slice()[2 + offset], 0x1);
        }
    }

    #[test]
    fn write_outside_view_is_rejected() {
        let mut owner = MemoryBlock::new(10);
        let mut view = MemoryView::new(&mut owner, 2, 4, false).unwrap();
        assert_eq!(
            view.write(4, 0x1),
            Err(MemoryError::OutOfRange {
                start: 4,
                end: 5,
                len: 4
            })
        );
    }

    #[test]
    #[should_panic(expected = "outside view")]
    fn indexed_assignment_outside_view_panics() {
        let mut owner = MemoryBlock::new(10);
        let mut view = MemoryView::new(&mut owner, 2, 4, false).unwrap();
        view[4] = 0x1;
    }

    fn counting_block() -> MemoryBlock {
        let mut block = MemoryBlock::new(10);
        let content: Vec<u8> = (0..10).collect();
        block.copy_from(&content, 0, 0, 10).unwrap();
        block
    }

    #[test]
    fn read_maps_to_owner_offset() {
        let mut owner = counting_block();
        let view = MemoryView::new(&mut owner, 2, 4, true).unwrap();
        for (offset, expected) in [(0, 0x2), (1, 0x3), (2, 0x4), (3, 0x5)] {
            assert_eq!(view.read(offset).unwrap(), expected);
            assert_eq!(view[offset], expected);
        }
        assert_eq!(view.as_slice(), &[0x2, 0x3, 0x4, 0x5]);
    }

    #[test]
    fn read_outside_view_is_rejected() {
        let mut owner = counting_block();
        let view = MemoryView::new(&mut owner, 2, 4, true).unwrap();
        assert_eq!(
            view.read(4),
            Err(MemoryError::OutOfRange {
                start: 4,
                end: 5,
                len: 4
            })
        );
    }

    #[test]
    #[should_panic(expected = "outside view")]
    fn indexed_read_outside_view_panics() {
        let mut owner = counting_block();
        let view = MemoryView::new(&mut owner, 2, 4, true).unwrap();
        let _ = view[4];
    }

    #[test]
    fn copy_with_source_offset_reads_correct_source_range() {
        let mut owner = MemoryBlock::new(10);
        let mut view = MemoryView::new(&mut owner, 2, 4, true).unwrap();
        view.copy_from(&[0xAA, 0x1, 0x2], 1, 1, 2).unwrap();
        assert_eq!(
            owner.to_vec(),
            vec![0x0, 0x0, 0x0, 0x1, 0x2, 0x0, 0x0, 0x0, 0x0, 0x0]
        );
    }

    #[test]
    fn copy_exceeding_source_bounds_is_rejected() {
        let mut owner = MemoryBlock::new(10);
        let mut view = MemoryView::new(&mut owner, 2, 4, true).unwrap();
        assert!(view.copy_from(&[0x1, 0x2], 1, 0, 2).is_err());
    }

    #[test]
    fn view_with_overflowing_range_is_rejected() {
        let mut owner = MemoryBlock::new(10);
        // start + len wraps usize; must report out-of-range, not wrap past
        // the check and panic in the slice op
        let result = MemoryView::new(&mut owner, 1, usize::MAX, false);
        assert_eq!(
            result.err(),
            Some(MemoryError::OutOfRange {
                start: 1,
                end: usize::MAX,
                len: 10
            })
        );
    }

    #[test]
    fn copy_with_overflowing_range_is_rejected() {
        let mut owner = MemoryBlock::new(10);
        let mut view = MemoryView::new(&mut owner, 2, 4, true).unwrap();
        assert!(view.copy_from(&[0x1, 0x2], 0, usize::MAX - 1, 2).is_err());
        assert_eq!(owner.to_vec(), vec![0u8; 10]);
    }

    #[test]
    fn error_message_names_the_violated_bound() {
        let mut owner = MemoryBlock::new(10);
        let err = MemoryView::new(&mut owner, 11, 1, false).err().unwrap();
        assert_eq!(
            alloc::format!("{err}"),
            "range 11..12 outside buffer of 10 bytes"
        );
    }
}
