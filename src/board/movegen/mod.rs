//! Pseudo-legal generation, the check oracle, and the legality filter.
//!
//! Generation is a pure function of board state: for a fixed position and
//! square, the same set comes back every time. Legality is decided by
//! simulating each candidate on a scratch copy of the position and asking
//! whether the mover's own king ends up attacked; the live position is
//! never touched.

mod kings;
mod knights;
mod pawns;
mod sliders;
mod tables;

use super::state::PieceRecord;
use super::{Board, Color, Move, MoveList, Piece, Square};
use sliders::{BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};

impl Board {
    /// Every destination the piece on `from` reaches by its movement
    /// pattern alone, ignoring whether the king is left in check. Castling
    /// is not generated here; it is validated separately and injected into
    /// the king's legal set.
    pub(crate) fn pseudo_destinations(
        &self,
        from: Square,
        piece: PieceRecord,
        out: &mut Vec<Square>,
    ) {
        match piece.kind {
            Piece::Pawn => self.pawn_destinations(from, piece, out),
            Piece::Knight => self.knight_moves(from, out),
            Piece::Bishop => self.ray_destinations(from, piece.color, &BISHOP_DIRECTIONS, out),
            Piece::Rook => self.ray_destinations(from, piece.color, &ROOK_DIRECTIONS, out),
            Piece::Queen => self.ray_destinations(from, piece.color, &QUEEN_DIRECTIONS, out),
            Piece::King => self.king_moves(from, out),
        }
    }

    /// Check oracle: does any piece of `by` reach `target` by pseudo-legal
    /// movement? Re-derived from scratch on every call rather than kept as
    /// an incremental attack map.
    pub(crate) fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        let mut scratch = Vec::with_capacity(28);
        for (from, piece) in self.pieces_of(by) {
            scratch.clear();
            self.pseudo_destinations(from, piece, &mut scratch);
            if scratch.contains(&target) {
                return true;
            }
        }
        false
    }

    /// Is `color`'s king currently attacked?
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opponent())
    }

    /// The legality-filtered destination set for the piece on `from`.
    ///
    /// Empty when the square is empty or holds a piece of the side not to
    /// move. Candidates that land on a friendly piece or leave the mover's
    /// own king attacked are removed.
    #[must_use]
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let Some(piece) = self.get(from) else {
            return Vec::new();
        };
        if piece.color != self.side_to_move() {
            return Vec::new();
        }

        let mut candidates = Vec::with_capacity(28);
        self.pseudo_destinations(from, piece, &mut candidates);
        if piece.kind == Piece::King {
            self.castling_destinations(from, piece, &mut candidates);
        }

        candidates.retain(|&to| {
            if let Some(target) = self.get(to) {
                if target.color == piece.color {
                    return false;
                }
            }
            !self.leaves_own_king_in_check(Move::new(from, to), piece.color)
        });
        candidates
    }

    /// Simulate the move on a scratch copy with full post-move semantics
    /// (capture removal, ghost expiry, rook co-move, promotion to a stand-in
    /// queen) and test the mover's king square.
    fn leaves_own_king_in_check(&self, mv: Move, mover: Color) -> bool {
        let mut scratch = self.clone();
        scratch.apply_move_unchecked(mv, Some(Piece::Queen));
        scratch.is_in_check(mover)
    }

    /// All legal moves for the side to move.
    #[must_use]
    pub fn generate_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        for (from, _) in self.pieces_of(self.side_to_move()) {
            for to in self.legal_destinations(from) {
                moves.push(Move::new(from, to));
            }
        }
        moves
    }

    /// True when the side to move has at least one legal move. Same
    /// outcome as counting `generate_legal_moves`, with an early exit.
    #[must_use]
    pub fn has_any_legal_move(&self) -> bool {
        self.pieces_of(self.side_to_move())
            .any(|(from, _)| !self.legal_destinations(from).is_empty())
    }
}
