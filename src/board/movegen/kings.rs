use super::super::state::PieceRecord;
use super::super::{Board, Color, Piece, Square};
use super::tables::king_destinations;

impl Board {
    pub(crate) fn king_moves(&self, from: Square, out: &mut Vec<Square>) {
        out.extend_from_slice(king_destinations(from));
    }

    /// Castling destinations for the king on `from`, validated before the
    /// move ever enters the legality filter: king and rook unmoved, the
    /// squares between them empty, and none of the king's origin, transit,
    /// or landing squares attacked.
    pub(crate) fn castling_destinations(
        &self,
        from: Square,
        king: PieceRecord,
        out: &mut Vec<Square>,
    ) {
        if king.moved {
            return;
        }
        let back = king.color.back_rank();
        if from != Square(back, 4) {
            return;
        }
        let enemy = king.color.opponent();
        if self.is_square_attacked(from, enemy) {
            return;
        }

        // Kingside: rook h-file, f/g empty, e-f-g unattacked.
        if self.rook_ready(Square(back, 7), king.color)
            && self.is_empty(Square(back, 5))
            && self.is_empty(Square(back, 6))
            && !self.is_square_attacked(Square(back, 5), enemy)
            && !self.is_square_attacked(Square(back, 6), enemy)
        {
            out.push(Square(back, 6));
        }

        // Queenside: rook a-file, b/c/d empty, e-d-c unattacked (b may be).
        if self.rook_ready(Square(back, 0), king.color)
            && self.is_empty(Square(back, 1))
            && self.is_empty(Square(back, 2))
            && self.is_empty(Square(back, 3))
            && !self.is_square_attacked(Square(back, 3), enemy)
            && !self.is_square_attacked(Square(back, 2), enemy)
        {
            out.push(Square(back, 2));
        }
    }

    fn rook_ready(&self, square: Square, color: Color) -> bool {
        matches!(
            self.get(square),
            Some(PieceRecord {
                kind: Piece::Rook,
                moved: false,
                color: c,
            }) if c == color
        )
    }
}
