use super::super::state::PieceRecord;
use super::super::{Board, Square};

impl Board {
    /// Forward pushes stop the moment any square in the path is occupied
    /// (ghost markers included); diagonals are candidates only against an
    /// opposing real piece or the ghost marker.
    pub(crate) fn pawn_destinations(
        &self,
        from: Square,
        pawn: PieceRecord,
        out: &mut Vec<Square>,
    ) {
        let dir = pawn.color.pawn_direction();
        let ghost_square = self.en_passant_target();

        if let Some(forward) = from.offset(dir, 0) {
            let forward_blocked = !self.is_empty(forward) || ghost_square == Some(forward);
            if !forward_blocked {
                out.push(forward);
                if !pawn.moved {
                    if let Some(double) = forward.offset(dir, 0) {
                        let double_blocked =
                            !self.is_empty(double) || ghost_square == Some(double);
                        if !double_blocked {
                            out.push(double);
                        }
                    }
                }
            }

            for d_file in [-1isize, 1] {
                if let Some(diagonal) = from.offset(dir, d_file) {
                    let capturable = match self.get(diagonal) {
                        Some(target) => target.color != pawn.color,
                        None => ghost_square == Some(diagonal),
                    };
                    if capturable {
                        out.push(diagonal);
                    }
                }
            }
        }
    }
}
