use super::super::{Board, Square};
use super::tables::knight_destinations;

impl Board {
    /// Raw offset-table destinations; friendly occupancy is the legality
    /// filter's concern, not generation's.
    pub(crate) fn knight_moves(&self, from: Square, out: &mut Vec<Square>) {
        out.extend_from_slice(knight_destinations(from));
    }
}
