//! TD-Lambda self-play training.
//!
//! The trainer plays complete games against itself with epsilon-greedy move
//! selection, recording one (position, mover) snapshot per ply, then walks the
//! episode in reverse applying eligibility-trace weight updates. All
//! randomness comes from a single seeded generator so identical
//! configurations reproduce bit-identical weight tables.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::bitboard::{Bitboard, BitboardIterator};
use crate::board::Board;
use crate::constants::MAX_GAME_PLIES;
use crate::disc::Disc;
use crate::error::{NTupleError, Result};
use crate::eval::NTupleNetwork;

/// Upper bound on the number of legal moves in any Reversi position.
const MAX_MOVES: usize = 34;

/// One self-play game's episode trace: (pre-move position, mover) per ply.
type EpisodeTrace = ArrayVec<(Board, Disc), MAX_GAME_PLIES>;

/// Hyperparameters for TD-Lambda self-play training.
#[derive(Debug, Clone, Copy)]
pub struct TrainerConfig {
    /// Learning rate, `>= 0`.
    pub alpha: f64,
    /// Eligibility trace decay, in `[0, 1]`.
    pub lambda: f64,
    /// Exploration rate for epsilon-greedy selection, in `[0, 1]`.
    pub epsilon: f64,
    /// Seed for the trainer's random source.
    pub seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            alpha: 0.01,
            lambda: 0.7,
            epsilon: 0.1,
            seed: 42,
        }
    }
}

/// Trains an N-Tuple network by epsilon-greedy self-play.
#[derive(Debug)]
pub struct TdLambdaTrainer {
    network: NTupleNetwork,
    alpha: f64,
    lambda: f64,
    epsilon: f64,
    rng: StdRng,
}

impl TdLambdaTrainer {
    /// Creates a trainer owning the given network.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `alpha < 0`, or when `lambda` or
    /// `epsilon` fall outside `[0, 1]`. Values are never clamped.
    pub fn new(network: NTupleNetwork, config: TrainerConfig) -> Result<Self> {
        if config.alpha < 0.0 || !config.alpha.is_finite() {
            return Err(NTupleError::Config(format!(
                "alpha must be >= 0.0, got {}",
                config.alpha
            )));
        }
        if !(0.0..=1.0).contains(&config.lambda) {
            return Err(NTupleError::Config(format!(
                "lambda must be in [0.0, 1.0], got {}",
                config.lambda
            )));
        }
        if !(0.0..=1.0).contains(&config.epsilon) {
            return Err(NTupleError::Config(format!(
                "epsilon must be in [0.0, 1.0], got {}",
                config.epsilon
            )));
        }

        Ok(TdLambdaTrainer {
            network,
            alpha: config.alpha,
            lambda: config.lambda,
            epsilon: config.epsilon,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Returns the network being trained.
    #[inline]
    pub fn network(&self) -> &NTupleNetwork {
        &self.network
    }

    /// Consumes the trainer and returns the trained network.
    pub fn into_network(self) -> NTupleNetwork {
        self.network
    }

    /// Runs repeated self-play games, updating weights after each game.
    pub fn train(&mut self, num_games: u32) -> Result<()> {
        for _ in 0..num_games {
            self.play_one_game()?;
        }
        Ok(())
    }

    /// Plays one self-play game and applies the backward TD-Lambda updates.
    ///
    /// Movers alternate from the canonical opening; a mover without legal
    /// moves passes, and two consecutive passes end the game.
    ///
    /// # Errors
    ///
    /// Returns a training error if a pre-validated legal move produces no
    /// flips - an internal invariant violation, never retried.
    pub fn play_one_game(&mut self) -> Result<()> {
        let mut board = Board::new();
        let mut side = Disc::Dark;
        let mut consecutive_passes = 0;
        let mut trace = EpisodeTrace::new();

        while consecutive_passes < 2 {
            let legal = board.legal_moves(side);
            if legal.is_empty() {
                consecutive_passes += 1;
                side = side.opposite();
                continue;
            }

            consecutive_passes = 0;
            let cell = self.select_move(&board, side, legal);
            trace.push((board, side));
            let flipped = board.place(cell, side);
            if flipped.is_empty() {
                return Err(NTupleError::Train(format!(
                    "selected illegal move: {cell}"
                )));
            }
            side = side.opposite();
        }

        self.update_weights(&trace, &board);
        Ok(())
    }

    /// Selects one legal move by the epsilon-greedy policy.
    ///
    /// With probability epsilon, picks uniformly among the legal moves.
    /// Otherwise evaluates every successor from the mover's own perspective
    /// in ascending cell order and keeps the strictly best one, so the first
    /// seen wins ties.
    fn select_move(&mut self, board: &Board, side: Disc, legal: Bitboard) -> usize {
        debug_assert!(!legal.is_empty());
        let moves: ArrayVec<usize, MAX_MOVES> = BitboardIterator::new(legal).collect();

        if self.rng.random::<f64>() < self.epsilon {
            return moves[self.rng.random_range(0..moves.len())];
        }

        let mut best_move = moves[0];
        let mut best_score = f64::NEG_INFINITY;
        for &cell in &moves {
            let mut next = *board;
            next.place(cell, side);
            let score = self.network.evaluate(&next, side);
            if score > best_score {
                best_score = score;
                best_move = cell;
            }
        }
        best_move
    }

    /// Applies the backward TD-Lambda pass over a finished game.
    ///
    /// The terminal reward is +1/-1/0 from the final disc counts, signed for
    /// the mover of the last trace entry. Walking the trace backwards, each
    /// entry's TD error feeds the decaying cumulative trace and the bootstrap
    /// target for its predecessor is the negated pre-update evaluation; the
    /// negation encodes the alternating zero-sum perspective.
    fn update_weights(&mut self, trace: &EpisodeTrace, final_board: &Board) {
        let Some((_, last_side)) = trace.last() else {
            return;
        };

        let (dark_count, light_count) = final_board.count();
        let reward = match dark_count.cmp(&light_count) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Less => -1.0,
            std::cmp::Ordering::Equal => 0.0,
        };

        let mut next_value = match last_side {
            Disc::Dark => reward,
            Disc::Light => -reward,
        };
        let mut cumulative_td = 0.0f64;

        for (board, side) in trace.iter().rev() {
            let current_value = self.network.evaluate(board, *side);
            let td_error = next_value - current_value;
            cumulative_td = td_error + self.lambda * cumulative_td;
            let delta = self.alpha * cumulative_td;
            self.network.update(board, *side, delta);
            next_value = -current_value;
        }
    }
}
