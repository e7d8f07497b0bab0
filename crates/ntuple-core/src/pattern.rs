//! Fixed tuple patterns and base-3 feature indexing.
//!
//! The pattern list is order-significant configuration data: both the cell
//! ordering inside each pattern and the ordering of the patterns themselves
//! are part of the `weights.bin` format contract and must never be reordered.

use crate::constants::BOARD_CELLS;

/// Number of tuple patterns in the network.
pub const NUM_PATTERNS: usize = 14;

/// The fixed tuple patterns over a row-major flattened 8x8 board.
///
/// The set covers corners, edges, diagonals, and rows.
pub const PATTERNS: [&[u8]; NUM_PATTERNS] = [
    &[0, 1, 8, 9, 10, 17, 18, 19, 26, 27],
    &[0, 1, 8, 9, 18, 27, 36, 45, 54, 63],
    &[0, 1, 2, 3, 8, 9, 10, 16, 17, 24],
    &[0, 1, 2, 3, 4, 8, 9, 16, 24, 32],
    &[0, 1, 2, 3, 4, 5, 6, 7, 9, 14],
    &[0, 2, 3, 4, 5, 7, 10, 11, 12, 13],
    &[1, 2, 3, 4, 5, 6, 10, 11, 12, 13],
    &[0, 1, 2, 8, 9, 10, 16, 17, 18],
    &[0, 1, 10, 19, 28, 37, 46, 55, 63],
    &[8, 9, 10, 11, 12, 13, 14, 15],
    &[16, 17, 18, 19, 20, 21, 22, 23],
    &[24, 25, 26, 27, 28, 29, 30, 31],
    &[1, 2, 11, 20, 29, 38, 47, 55],
    &[3, 9, 12, 21, 30, 39, 54],
];

/// Returns the weight table length for a tuple of the given size: 3^len.
#[inline]
pub const fn table_size(tuple_len: usize) -> usize {
    3usize.pow(tuple_len as u32)
}

/// Converts tuple cell states into a base-3 table index.
///
/// Folds the pattern's cells in their fixed order: `index = index * 3 + state`,
/// with each state in {0, 1, 2}.
#[inline]
pub fn pattern_index(cells: &[u8; BOARD_CELLS], pattern: &[u8]) -> usize {
    pattern
        .iter()
        .fold(0, |index, &cell| index * 3 + cells[cell as usize] as usize)
}
