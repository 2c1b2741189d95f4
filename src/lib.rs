pub mod board;
pub mod game;

pub use board::{Board, CastlingRights, Color, Move, Piece, Square, WireMove};
pub use game::{GameLog, GameResult, GameSession, MoveReceipt, RecordedMove, SessionConfig};
