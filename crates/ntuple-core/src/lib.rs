//! Reversi N-Tuple training core.
//!
//! This crate implements the full training pipeline for a positional Reversi
//! evaluator: a bitboard game engine, an N-Tuple pattern network, a TD-Lambda
//! self-play trainer, and the `weights.bin` binary model codec.

pub mod bitboard;
pub mod board;
pub mod constants;
pub mod disc;
pub mod error;
pub mod eval;
pub mod model;
pub mod pattern;
pub mod trainer;
