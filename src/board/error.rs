//! Error types for chess board operations.
//!
//! Every error here is a local, recoverable condition: the operation that
//! produced it reports the specific kind and leaves the board untouched.

use std::fmt;

use super::types::{Color, Move, Piece, Square};

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string does not have exactly 6 fields
    WrongFieldCount { found: usize },
    /// Invalid piece character in the layout field
    InvalidPiece { char: char },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Layout field does not have exactly 8 ranks
    WrongRankCount { found: usize },
    /// A rank does not sum to exactly 8 files
    BadFileCount { rank: usize, files: usize },
    /// Half-move clock is not a non-negative integer
    InvalidHalfmoveClock { found: String },
    /// Full-move number is not a positive integer
    InvalidFullmoveNumber { found: String },
    /// A side has no king in the layout field
    MissingKing { color: Color },
    /// A side has more than one king in the layout field
    DuplicateKing { color: Color },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount { found } => {
                write!(f, "FEN must have exactly 6 fields, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN layout must have 8 ranks, found {found}")
            }
            FenError::BadFileCount { rank, files } => {
                write!(f, "Rank {rank} covers {files} files, expected 8")
            }
            FenError::InvalidHalfmoveClock { found } => {
                write!(f, "Invalid half-move clock '{found}'")
            }
            FenError::InvalidFullmoveNumber { found } => {
                write!(f, "Invalid full-move number '{found}'")
            }
            FenError::MissingKing { color } => {
                write!(f, "{color} has no king")
            }
            FenError::DuplicateKing { color } => {
                write!(f, "{color} has more than one king")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for committing a move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The origin square holds no piece
    NoPieceAtOrigin { square: Square },
    /// The destination is not in the origin piece's legal set (also covers
    /// moving a piece of the side not to move, and moving after the game
    /// has been decided)
    IllegalDestination { mv: Move },
    /// A pawn reached the last rank but no promotion piece was supplied
    MissingPromotionChoice { mv: Move },
    /// The supplied promotion piece is not a knight, bishop, rook, or queen
    InvalidPromotionChoice { piece: Piece },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::NoPieceAtOrigin { square } => {
                write!(f, "No piece on {square}")
            }
            MoveError::IllegalDestination { mv } => {
                write!(f, "Illegal move {mv}")
            }
            MoveError::MissingPromotionChoice { mv } => {
                write!(f, "Move {mv} promotes but no piece type was chosen")
            }
            MoveError::InvalidPromotionChoice { piece } => {
                write!(f, "Cannot promote to {:?}", piece)
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// Error type for wire-move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for SAN (Standard Algebraic Notation) parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    /// Empty SAN string
    Empty,
    /// Invalid piece character
    InvalidPiece { char: char },
    /// Invalid square in SAN
    InvalidSquare { notation: String },
    /// Ambiguous move (multiple pieces can reach the target)
    AmbiguousMove { san: String },
    /// No matching legal move found
    NoMatchingMove { san: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanError::Empty => write!(f, "Empty SAN string"),
            SanError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in SAN")
            }
            SanError::InvalidSquare { notation } => {
                write!(f, "Invalid square in SAN '{notation}'")
            }
            SanError::AmbiguousMove { san } => {
                write!(f, "Ambiguous move '{san}'")
            }
            SanError::NoMatchingMove { san } => {
                write!(f, "No legal move matches '{san}'")
            }
            SanError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
        }
    }
}

impl std::error::Error for SanError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_error_field_count() {
        let err = FenError::WrongFieldCount { found: 2 };
        assert!(err.to_string().contains('2'));
        assert!(err.to_string().contains('6'));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let err = FenError::InvalidPiece { char: 'z' };
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn test_fen_error_kings() {
        let err = FenError::MissingKing {
            color: Color::Black,
        };
        assert!(err.to_string().contains("Black"));
        let err = FenError::DuplicateKing {
            color: Color::White,
        };
        assert!(err.to_string().contains("White"));
    }

    #[test]
    fn test_move_error_display() {
        let err = MoveError::NoPieceAtOrigin {
            square: Square(3, 4),
        };
        assert!(err.to_string().contains("e4"));

        let err = MoveError::IllegalDestination {
            mv: Move::new(Square(1, 4), Square(4, 4)),
        };
        assert!(err.to_string().contains("e2e5"));
    }

    #[test]
    fn test_square_error_bounds() {
        let err = SquareError::RankOutOfBounds { rank: 9 };
        assert!(err.to_string().contains('9'));
        let err = SquareError::FileOutOfBounds { file: 10 };
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_san_error_display() {
        let err = SanError::AmbiguousMove {
            san: "Nc3".to_string(),
        };
        assert!(err.to_string().contains("Nc3"));
    }

    #[test]
    fn test_error_equality() {
        let err1 = FenError::WrongFieldCount { found: 2 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
