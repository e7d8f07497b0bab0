//! N-Tuple network position evaluation.
//!
//! The network is an additive evaluation function: one dense weight table per
//! tuple pattern, addressed by the base-3 encoding of the pattern's cell
//! states. Evaluation and updates run over the four rotational symmetries of
//! the position so that learning is shared across equivalent orientations.

use crate::board::Board;
use crate::disc::Disc;
use crate::pattern::{self, PATTERNS};

/// N-Tuple network evaluator with one weight table per pattern.
#[derive(Debug, Clone)]
pub struct NTupleNetwork {
    weights: Vec<Vec<f32>>,
}

impl NTupleNetwork {
    /// Creates a network with all tuple weights initialized to zero.
    pub fn new() -> Self {
        NTupleNetwork {
            weights: PATTERNS
                .iter()
                .map(|p| vec![0.0f32; pattern::table_size(p.len())])
                .collect(),
        }
    }

    /// Returns the weight tables, one per pattern in definition order.
    #[inline]
    pub fn weights(&self) -> &[Vec<f32>] {
        &self.weights
    }

    /// Evaluates a position from the mover's perspective.
    ///
    /// Sums the addressed weight of every (rotation, pattern) pair:
    /// 4 symmetries x 14 patterns = 56 table lookups.
    pub fn evaluate(&self, board: &Board, side: Disc) -> f64 {
        let mut score = 0.0f64;
        for_each_feature(board, side, |table_idx, weight_idx| {
            score += f64::from(self.weights[table_idx][weight_idx]);
        });
        score
    }

    /// Adds a pre-scaled delta to every addressed tuple weight.
    ///
    /// A weight addressed by several symmetries receives the delta once per
    /// occurrence; the multiplicity is intentional, not deduplicated.
    pub fn update(&mut self, board: &Board, side: Disc, delta: f64) {
        let delta = delta as f32;
        for_each_feature(board, side, |table_idx, weight_idx| {
            self.weights[table_idx][weight_idx] += delta;
        });
    }
}

/// Visits the addressed (table, weight index) pair of every pattern under
/// each of the four rotational symmetries of the position.
///
/// Rotating the board and rebuilding the perspective array applies the same
/// cell permutation as rotating the array itself, so the addressed indices
/// match the format contract's (row, col) -> (col, 7 - row) rotation exactly.
fn for_each_feature(board: &Board, side: Disc, mut f: impl FnMut(usize, usize)) {
    let mut rotated = *board;
    for _ in 0..4 {
        let cells = rotated.to_array(side);
        for (table_idx, tuple) in PATTERNS.iter().enumerate() {
            f(table_idx, pattern::pattern_index(&cells, tuple));
        }
        rotated = rotated.rotate_90_clockwise();
    }
}

impl Default for NTupleNetwork {
    fn default() -> Self {
        NTupleNetwork::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::NUM_PATTERNS;

    /// Collects the multiset of addressed weights for a position, the same way
    /// `evaluate` and `update` walk the symmetries.
    fn addressed_indices(board: &Board, side: Disc) -> Vec<(usize, usize)> {
        let mut indices = Vec::new();
        for_each_feature(board, side, |table_idx, weight_idx| {
            indices.push((table_idx, weight_idx));
        });
        indices
    }

    #[test]
    fn test_zero_network_evaluates_to_zero() {
        let network = NTupleNetwork::new();
        assert_eq!(network.evaluate(&Board::new(), Disc::Dark), 0.0);
        assert_eq!(network.evaluate(&Board::new(), Disc::Light), 0.0);

        let mut board = Board::new();
        board.place(19, Disc::Dark);
        assert_eq!(network.evaluate(&board, Disc::Light), 0.0);
    }

    #[test]
    fn test_table_shapes() {
        let network = NTupleNetwork::new();
        assert_eq!(network.weights().len(), NUM_PATTERNS);
        for (table, tuple) in network.weights().iter().zip(PATTERNS) {
            assert_eq!(table.len(), pattern::table_size(tuple.len()));
        }
    }

    #[test]
    fn test_update_then_evaluate_is_count_weighted() {
        let mut network = NTupleNetwork::new();
        let board = Board::new();
        let delta = 0.5f64;

        network.update(&board, Disc::Dark, delta);

        // Each addressed weight holds delta * multiplicity, and evaluation
        // reads it once per occurrence, so the expected total is
        // delta * sum(multiplicity^2) over the addressed index multiset.
        let indices = addressed_indices(&board, Disc::Dark);
        let expected: f64 = indices
            .iter()
            .map(|target| {
                let multiplicity = indices.iter().filter(|i| *i == target).count();
                delta * multiplicity as f64
            })
            .sum();

        let actual = network.evaluate(&board, Disc::Dark);
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn test_update_is_perspective_relative() {
        let mut network = NTupleNetwork::new();
        let mut board = Board::new();
        board.place(19, Disc::Dark);

        network.update(&board, Disc::Dark, 1.0);

        // The same physical position seen from the other side addresses
        // different (complementary) states, so it stays untrained.
        let as_dark = network.evaluate(&board, Disc::Dark);
        let as_light = network.evaluate(&board, Disc::Light);
        assert!(as_dark > 0.0);
        assert_ne!(as_dark, as_light);
    }

    #[test]
    fn test_rotational_symmetries_are_distinct() {
        // A fully distinct cell array has four pairwise distinct rotations;
        // checked through a board whose occupancy breaks all symmetries.
        let board = Board {
            dark: crate::bitboard::Bitboard::new(0x0123456789ABCDEF),
            light: crate::bitboard::Bitboard::EMPTY,
        };
        let mut seen = Vec::new();
        let mut rotated = board;
        for _ in 0..4 {
            let cells = rotated.to_array(Disc::Dark);
            assert!(!seen.contains(&cells));
            seen.push(cells);
            rotated = rotated.rotate_90_clockwise();
        }
    }
}
