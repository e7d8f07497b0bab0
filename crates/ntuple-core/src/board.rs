//! Reversi board representation using bitboards.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::constants::{BOARD_CELLS, BOARD_SIZE};
use crate::disc::Disc;

/// The eight compass directions as (row, col) deltas.
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Represents a Reversi position with one bitboard per color.
///
/// The `Board` struct contains two 64-bit occupancy sets, one for the dark
/// discs and one for the light discs. Each bit corresponds to a cell
/// (cell index = row * 8 + col). The two sets are always disjoint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Bitboard representing the dark discs.
    pub dark: Bitboard,
    /// Bitboard representing the light discs.
    pub light: Bitboard,
}

impl Default for Board {
    /// Creates a board with the standard Reversi starting position.
    ///
    /// The initial position has:
    /// - Dark discs on e4 and d5
    /// - Light discs on d4 and e5
    fn default() -> Self {
        Board {
            dark: Bitboard::new(0x0000000810000000),
            light: Bitboard::new(0x0000001008000000),
        }
    }
}

impl Board {
    /// Creates a new `Board` with the initial Reversi setup.
    pub fn new() -> Board {
        Default::default()
    }

    /// Creates a `Board` from a string representation.
    ///
    /// The string should contain 64 characters for the cells a1 through h8:
    /// 'X' for dark discs, 'O' for light discs, and '-' for empty cells.
    /// Any other character is treated as empty.
    ///
    /// # Arguments
    /// * `board_string` - A string representing the board.
    ///
    /// # Returns
    /// A new `Board` instance.
    pub fn from_string(board_string: &str) -> Board {
        let mut dark = Bitboard::EMPTY;
        let mut light = Bitboard::EMPTY;
        for (cell, c) in board_string.chars().take(BOARD_CELLS).enumerate() {
            if c == Disc::Dark.to_char() {
                dark = dark.set(cell);
            } else if c == Disc::Light.to_char() {
                light = light.set(cell);
            }
        }
        Board { dark, light }
    }

    /// Returns the mover's and the opponent's occupancy sets for a side.
    #[inline(always)]
    fn sides(&self, side: Disc) -> (Bitboard, Bitboard) {
        match side {
            Disc::Dark => (self.dark, self.light),
            Disc::Light => (self.light, self.dark),
        }
    }

    /// Collects the discs flipped by placing a mover disc on `cell`.
    ///
    /// Walks each of the eight directions from the candidate cell, accumulating
    /// a run of opponent discs; the run is committed only when it is terminated
    /// by a mover disc. Returns an empty bitboard for out-of-range or occupied
    /// cells, or when no direction commits a run.
    fn collect_flips(cell: usize, me: Bitboard, opp: Bitboard) -> Bitboard {
        if cell >= BOARD_CELLS {
            return Bitboard::EMPTY;
        }

        if (me | opp).contains(cell) {
            return Bitboard::EMPTY;
        }

        let row = (cell / BOARD_SIZE) as i32;
        let col = (cell % BOARD_SIZE) as i32;
        let mut flips = Bitboard::EMPTY;

        for (dr, dc) in DIRECTIONS {
            let mut r = row + dr;
            let mut c = col + dc;
            let mut line = Bitboard::EMPTY;
            let mut has_opponent = false;

            while (0..BOARD_SIZE as i32).contains(&r) && (0..BOARD_SIZE as i32).contains(&c) {
                let sq = (r * BOARD_SIZE as i32 + c) as usize;
                if opp.contains(sq) {
                    has_opponent = true;
                    line = line.set(sq);
                } else if me.contains(sq) {
                    if has_opponent {
                        flips = flips | line;
                    }
                    break;
                } else {
                    break;
                }
                r += dr;
                c += dc;
            }
        }

        flips
    }

    /// Returns a bitboard of the legal moves for the given side.
    ///
    /// A cell is legal when it is empty and placing a disc there flips at
    /// least one opponent disc in some direction. Never mutates the board.
    pub fn legal_moves(&self, side: Disc) -> Bitboard {
        let (me, opp) = self.sides(side);
        let occupied = me | opp;
        let mut legal = Bitboard::EMPTY;

        for cell in 0..BOARD_CELLS {
            if occupied.contains(cell) {
                continue;
            }
            if !Self::collect_flips(cell, me, opp).is_empty() {
                legal = legal.set(cell);
            }
        }

        legal
    }

    /// Checks if the given side has any legal moves.
    #[inline]
    pub fn has_legal_moves(&self, side: Disc) -> bool {
        !self.legal_moves(side).is_empty()
    }

    /// Places a disc for the given side and flips the captured discs.
    ///
    /// # Arguments
    /// * `cell` - The cell index where the disc is placed.
    /// * `side` - The side making the move.
    ///
    /// # Returns
    /// The bitboard of flipped discs. An empty bitboard means the move was
    /// illegal (out-of-range, occupied, or flipping nothing); the board is
    /// left unchanged in that case and callers must check the result.
    pub fn place(&mut self, cell: usize, side: Disc) -> Bitboard {
        let (me, opp) = self.sides(side);
        let flips = Self::collect_flips(cell, me, opp);
        if flips.is_empty() {
            return Bitboard::EMPTY;
        }

        let next_me = me | Bitboard::cell(cell) | flips;
        let next_opp = opp & !flips;

        match side {
            Disc::Dark => {
                self.dark = next_me;
                self.light = next_opp;
            }
            Disc::Light => {
                self.light = next_me;
                self.dark = next_opp;
            }
        }

        flips
    }

    /// Returns the number of dark and light discs on the board.
    #[inline]
    pub fn count(&self) -> (u32, u32) {
        (self.dark.count(), self.light.count())
    }

    /// Returns the number of empty cells on the board.
    #[inline]
    pub fn empty_count(&self) -> u32 {
        BOARD_CELLS as u32 - self.dark.count() - self.light.count()
    }

    /// Builds the per-cell state array from the mover's viewpoint.
    ///
    /// # Returns
    /// An array of 64 cell states: 0 = empty, 1 = mover's disc, 2 = opponent's
    /// disc. This perspective-relative encoding keeps pattern weights tied to
    /// the side to move rather than to an absolute color.
    pub fn to_array(&self, side: Disc) -> [u8; BOARD_CELLS] {
        let (me, opp) = self.sides(side);
        let mut cells = [0u8; BOARD_CELLS];
        for (cell, state) in cells.iter_mut().enumerate() {
            if me.contains(cell) {
                *state = 1;
            } else if opp.contains(cell) {
                *state = 2;
            }
        }
        cells
    }

    /// Rotates the board 90 degrees clockwise.
    #[inline]
    pub fn rotate_90_clockwise(&self) -> Board {
        Board {
            dark: self.dark.rotate_90_clockwise(),
            light: self.light.rotate_90_clockwise(),
        }
    }
}

impl fmt::Display for Board {
    /// Formats the board as an 8x8 grid of 'X', 'O', and '-' characters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in 0..BOARD_CELLS {
            if cell > 0 && cell % BOARD_SIZE == 0 {
                writeln!(f)?;
            }
            let c = if self.dark.contains(cell) {
                Disc::Dark.to_char()
            } else if self.light.contains(cell) {
                Disc::Light.to_char()
            } else {
                '-'
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
