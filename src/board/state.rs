use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{CastlingRights, Color, Piece, Square};

/// A piece standing on the board.
///
/// `moved` starts false and is set the first time the piece moves; it is
/// what castling eligibility and the pawn double-step privilege key off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PieceRecord {
    pub color: Color,
    pub kind: Piece,
    pub moved: bool,
}

impl PieceRecord {
    #[must_use]
    pub(crate) const fn unmoved(color: Color, kind: Piece) -> Self {
        PieceRecord {
            color,
            kind,
            moved: false,
        }
    }
}

/// Marker for the square a pawn skipped over on a double step.
///
/// Not an arena entry: the ghost lives in its own slot on the board and
/// `parent` points at the real pawn that created it. It is the en-passant
/// target for exactly one ply, and for ray blocking it occupies its square
/// like a piece of the parent's color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub(crate) struct GhostPawn {
    pub square: Square,
    pub parent: Square,
}

/// The full game position: a 64-slot arena of piece records plus side to
/// move, ghost marker, and the half-move/full-move counters.
///
/// Constructors guarantee exactly one king per color; `try_from_fen`
/// rejects layouts that violate this.
#[derive(Clone, Debug)]
pub struct Board {
    squares: [Option<PieceRecord>; 64],
    pub(crate) white_to_move: bool,
    pub(crate) ghost: Option<GhostPawn>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) king_squares: [Square; 2],
}

impl Board {
    /// Standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            board.set(Square(0, file), Some(PieceRecord::unmoved(Color::White, *piece)));
            board.set(Square(7, file), Some(PieceRecord::unmoved(Color::Black, *piece)));
            board.set(
                Square(1, file),
                Some(PieceRecord::unmoved(Color::White, Piece::Pawn)),
            );
            board.set(
                Square(6, file),
                Some(PieceRecord::unmoved(Color::Black, Piece::Pawn)),
            );
        }
        board.king_squares = [Square(0, 4), Square(7, 4)];
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            squares: [None; 64],
            white_to_move: true,
            ghost: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_squares: [Square(0, 4), Square(7, 4)],
        }
    }

    /// The piece on a square, if any. Ghost markers are not reported here.
    #[inline]
    #[must_use]
    pub fn get(&self, sq: Square) -> Option<PieceRecord> {
        self.squares[sq.as_index()]
    }

    /// Write a slot directly. No capture bookkeeping, no counter updates;
    /// those belong to the apply layer, which runs before calling this.
    #[inline]
    pub(crate) fn set(&mut self, sq: Square, occupant: Option<PieceRecord>) {
        self.squares[sq.as_index()] = occupant;
    }

    #[inline]
    pub(crate) fn clear(&mut self, sq: Square) {
        self.squares[sq.as_index()] = None;
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.as_index()].is_none()
    }

    /// Iterate every occupied square with its piece record.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, PieceRecord)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.map(|piece| (Square::from_index(idx), piece)))
    }

    /// Occupied squares of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, PieceRecord)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    #[inline]
    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// The square a pawn may capture onto en passant, while the ghost
    /// marker is alive.
    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.ghost.map(|ghost| ghost.square)
    }

    /// Castling rights, derived from the `moved` flags of each king and
    /// rook still standing on its original square.
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        let mut rights = CastlingRights::none();
        for color in Color::BOTH {
            let back = color.back_rank();
            let king_fresh = matches!(
                self.get(Square(back, 4)),
                Some(PieceRecord {
                    kind: Piece::King,
                    moved: false,
                    color: c,
                }) if c == color
            );
            if !king_fresh {
                continue;
            }
            for (rook_file, kingside) in [(7usize, true), (0usize, false)] {
                let rook_fresh = matches!(
                    self.get(Square(back, rook_file)),
                    Some(PieceRecord {
                        kind: Piece::Rook,
                        moved: false,
                        color: c,
                    }) if c == color
                );
                if rook_fresh {
                    rights.set(color, kingside);
                }
            }
        }
        rights
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                match self.get(Square(rank, file)) {
                    Some(piece) => write!(f, "{} ", piece.kind.to_fen_char(piece.color))?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(f, "{} to move", self.side_to_move())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_layout() {
        let board = Board::new();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(
            board.get(Square(0, 4)),
            Some(PieceRecord::unmoved(Color::White, Piece::King))
        );
        assert_eq!(
            board.get(Square(7, 3)),
            Some(PieceRecord::unmoved(Color::Black, Piece::Queen))
        );
        assert!(board.is_empty(Square(3, 3)));
        assert_eq!(board.king_square(Color::White), Square(0, 4));
        assert_eq!(board.king_square(Color::Black), Square(7, 4));
    }

    #[test]
    fn test_starting_position_rights() {
        let board = Board::new();
        let rights = board.castling_rights();
        for color in Color::BOTH {
            assert!(rights.has(color, true));
            assert!(rights.has(color, false));
        }
    }

    #[test]
    fn test_rights_lost_when_rook_marked_moved() {
        let mut board = Board::new();
        let mut rook = board.get(Square(0, 7)).unwrap();
        rook.moved = true;
        board.set(Square(0, 7), Some(rook));
        let rights = board.castling_rights();
        assert!(!rights.has(Color::White, true));
        assert!(rights.has(Color::White, false));
    }

    #[test]
    fn test_pieces_of_filters_color() {
        let board = Board::new();
        assert_eq!(board.pieces_of(Color::White).count(), 16);
        assert_eq!(board.pieces_of(Color::Black).count(), 16);
    }
}
