//! Chess board representation and rules.
//!
//! A 64-slot arena of piece records with full rules support: castling,
//! en passant (via a one-ply ghost marker), promotion, and check-aware
//! legal move generation. FEN is the snapshot/restore format.
//!
//! # Example
//! ```
//! use chesskit::board::Board;
//!
//! let board = Board::new();
//! let moves = board.generate_legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod apply;
mod error;
mod fen;
mod movegen;
mod san;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use apply::MoveEffects;
pub use error::{FenError, MoveError, MoveParseError, SanError, SquareError};
pub use fen::STARTING_FEN;
pub use state::{Board, PieceRecord};
pub use types::{CastlingRights, Color, Move, MoveList, Piece, Square, WireMove};

pub(crate) use apply::AppliedMove;
