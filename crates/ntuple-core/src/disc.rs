/// Represents a disc color, which doubles as the side to move.
///
/// Dark always moves first from the standard starting position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disc {
    Dark,
    Light,
}

impl Disc {
    /// Converts the disc to its corresponding character representation.
    ///
    /// # Returns
    ///
    /// * `'X'` for `Disc::Dark`
    /// * `'O'` for `Disc::Light`
    pub fn to_char(self) -> char {
        match self {
            Disc::Dark => 'X',
            Disc::Light => 'O',
        }
    }

    /// Returns the opposite disc.
    pub fn opposite(self) -> Disc {
        match self {
            Disc::Dark => Disc::Light,
            Disc::Light => Disc::Dark,
        }
    }
}
