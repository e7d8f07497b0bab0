//! Bitboard operations and types.
//!
//! This module provides a [`Bitboard`] type that represents a 64-square Reversi board
//! using a single `u64`, where each bit corresponds to a cell (bit 0 = a1, bit 63 = h8,
//! cell index = row * 8 + col).

/// Newtype wrapper for a 64-bit bitboard (bit 0 = a1, bit 63 = h8).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Bitboard(u64);

impl Bitboard {
    /// An empty bitboard.
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Creates a new bitboard from raw bits.
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Bitboard(bits)
    }

    /// Returns the raw 64-bit value.
    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Creates a bitboard with a single bit set at the given cell.
    ///
    /// # Arguments
    ///
    /// * `cell` - The cell index (0-63).
    ///
    /// # Returns
    ///
    /// A single-bit `Bitboard`, or an empty one when `cell` is out of range.
    #[inline(always)]
    pub const fn cell(cell: usize) -> Self {
        if cell < 64 {
            Bitboard(1 << cell)
        } else {
            Bitboard(0)
        }
    }

    /// Checks whether the bit at the given cell is set.
    ///
    /// Out-of-range cells are reported as not contained.
    #[inline(always)]
    pub const fn contains(self, cell: usize) -> bool {
        self.0 & Bitboard::cell(cell).0 != 0
    }

    /// Returns a new bitboard with the bit at the given cell set.
    #[inline(always)]
    pub const fn set(self, cell: usize) -> Self {
        Bitboard(self.0 | Bitboard::cell(cell).0)
    }

    /// Checks if the bitboard has no bits set.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Counts the number of set bits.
    #[inline(always)]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Removes and returns the lowest set bit.
    ///
    /// # Returns
    ///
    /// A tuple of the lowest set cell index and the bitboard with that bit cleared.
    /// Must not be called on an empty bitboard.
    #[inline(always)]
    pub fn pop_lsb(self) -> (usize, Bitboard) {
        debug_assert!(!self.is_empty());
        let cell = self.0.trailing_zeros() as usize;
        (cell, Bitboard(self.0 & (self.0 - 1)))
    }

    /// Flips the bitboard vertically (swaps ranks 1-8).
    #[inline(always)]
    pub const fn flip_vertical(self) -> Self {
        Bitboard(self.0.swap_bytes())
    }

    /// Flips the bitboard along the a8-h1 anti-diagonal.
    #[inline(always)]
    pub const fn flip_diag_a8h1(self) -> Self {
        const MASK1: u64 = 0xaa00aa00aa00aa00;
        const MASK2: u64 = 0xcccc0000cccc0000;
        const MASK3: u64 = 0xf0f0f0f000000000;

        let mut bits = self.0;
        bits = delta_swap(bits, MASK3, 36);
        bits = delta_swap(bits, MASK2, 18);
        bits = delta_swap(bits, MASK1, 9);
        Bitboard(bits)
    }

    /// Rotates the bitboard 90 degrees clockwise.
    ///
    /// Maps the bit at (row, col) to (col, 7 - row).
    #[inline(always)]
    pub const fn rotate_90_clockwise(self) -> Self {
        self.flip_diag_a8h1().flip_vertical()
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Bitboard;

    #[inline(always)]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline(always)]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl std::ops::Not for Bitboard {
    type Output = Bitboard;

    #[inline(always)]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

/// Swaps bit pairs separated by `delta` positions where `mask` selects the upper bits.
#[inline(always)]
const fn delta_swap(bits: u64, mask: u64, delta: u32) -> u64 {
    let tmp = mask & (bits ^ (bits << delta));
    bits ^ tmp ^ (tmp >> delta)
}

/// An iterator that yields each set bit of a bitboard as an ascending cell index.
pub struct BitboardIterator {
    bitboard: Bitboard,
}

impl BitboardIterator {
    /// Creates a new `BitboardIterator`.
    #[inline(always)]
    pub fn new(bitboard: Bitboard) -> BitboardIterator {
        BitboardIterator { bitboard }
    }
}

impl Iterator for BitboardIterator {
    type Item = usize;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bitboard.is_empty() {
            return None;
        }

        let (cell, rest) = self.bitboard.pop_lsb();
        self.bitboard = rest;
        Some(cell)
    }
}
