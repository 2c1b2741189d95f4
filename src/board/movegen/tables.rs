//! Precomputed destination tables for the jumping pieces.
//!
//! Built once on first use; each entry holds the on-board squares a knight
//! or king reaches from that square.

use once_cell::sync::Lazy;

use super::super::Square;

const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn build_table(offsets: &[(isize, isize)]) -> Vec<Vec<Square>> {
    (0..64)
        .map(|idx| {
            let from = Square::from_index(idx);
            offsets
                .iter()
                .filter_map(|&(d_rank, d_file)| from.offset(d_rank, d_file))
                .collect()
        })
        .collect()
}

static KNIGHT_TABLE: Lazy<Vec<Vec<Square>>> = Lazy::new(|| build_table(&KNIGHT_OFFSETS));
static KING_TABLE: Lazy<Vec<Vec<Square>>> = Lazy::new(|| build_table(&KING_OFFSETS));

#[inline]
pub(crate) fn knight_destinations(from: Square) -> &'static [Square] {
    &KNIGHT_TABLE[from.as_index()]
}

#[inline]
pub(crate) fn king_destinations(from: Square) -> &'static [Square] {
    &KING_TABLE[from.as_index()]
}
