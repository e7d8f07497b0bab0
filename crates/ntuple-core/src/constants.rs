//! Global constants

/// Width of the Reversi board in cells.
pub const BOARD_SIZE: usize = 8;

/// Number of cells on the Reversi board.
pub const BOARD_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Maximum number of moves either side can play in one game.
///
/// Every move fills exactly one of the 60 initially empty cells.
pub const MAX_GAME_PLIES: usize = 60;
