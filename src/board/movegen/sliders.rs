use super::super::{Board, Color, Square};

pub(crate) const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ROOK_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const QUEEN_DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

impl Board {
    /// Walk each ray outward from `from`. A ray stops at the first occupied
    /// square; that square is included only when it holds a ghost marker or
    /// an opposing real piece. The ghost blocks exactly like a piece of its
    /// parent's color.
    pub(crate) fn ray_destinations(
        &self,
        from: Square,
        mover: Color,
        directions: &[(isize, isize)],
        out: &mut Vec<Square>,
    ) {
        let ghost_square = self.en_passant_target();
        for &(d_rank, d_file) in directions {
            let mut cursor = from;
            while let Some(next) = cursor.offset(d_rank, d_file) {
                if let Some(piece) = self.get(next) {
                    if piece.color != mover {
                        out.push(next);
                    }
                    break;
                }
                if ghost_square == Some(next) {
                    out.push(next);
                    break;
                }
                out.push(next);
                cursor = next;
            }
        }
    }
}
