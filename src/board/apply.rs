//! The special-move handler: every mutation a committed ply performs on
//! the position, in order, with the side effects collected for visual
//! replay by the caller.

use super::state::{GhostPawn, PieceRecord};
use super::{Board, Color, Move, Piece, Square};

/// What a committed move did to the grid, in terms an external board view
/// can replay: which square emptied, which square gained which piece,
/// whether a rook co-moved, whether a piece was destroyed, and whether a
/// promotion substitution occurred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveEffects {
    /// The origin square, now empty.
    pub vacated: Square,
    /// The destination square and the record now standing on it
    /// (post-promotion kind if a substitution happened).
    pub occupied: Square,
    pub mover: PieceRecord,
    /// A destroyed piece and the square it stood on. For en passant this
    /// square differs from the destination.
    pub captured: Option<(Square, PieceRecord)>,
    /// Rook origin/destination when the move castled.
    pub rook_shift: Option<(Square, Square)>,
    /// The piece type a promoting pawn was replaced with.
    pub promoted_to: Option<Piece>,
}

/// Everything `apply_move_unchecked` decided about the ply, for the commit
/// layer to fold into a move record.
#[derive(Clone, Debug)]
pub(crate) struct AppliedMove {
    /// The mover's pre-move kind.
    pub piece: Piece,
    pub color: Color,
    pub capture: bool,
    pub en_passant: bool,
    pub castle_kingside: bool,
    pub castle_queenside: bool,
    pub effects: MoveEffects,
}

impl Board {
    /// Execute a move that has already passed the legality filter.
    ///
    /// Runs the full before/after hook sequence: en-passant resolution,
    /// capture removal, `moved` flag, ghost lifetime, promotion
    /// substitution, rook co-move, clocks, turn flip. The caller is
    /// responsible for validation; this only trusts that `mv.from` is
    /// occupied and `mv.to` came out of the legal set.
    pub(crate) fn apply_move_unchecked(
        &mut self,
        mv: Move,
        promotion: Option<Piece>,
    ) -> AppliedMove {
        let mover = self.get(mv.from).expect("apply_move 'from' empty");
        let mut ghost_consumed = false;
        let mut en_passant = false;

        // Before commit: resolve the capture, if any. A pawn landing on the
        // live ghost square captures the ghost's parent pawn instead of the
        // (empty) destination.
        let captured = if mover.kind == Piece::Pawn
            && self.ghost.map(|ghost| ghost.square) == Some(mv.to)
        {
            let parent = self.ghost.map(|ghost| ghost.parent).expect("ghost checked");
            let victim = self.get(parent);
            self.clear(parent);
            self.ghost = None;
            ghost_consumed = true;
            en_passant = true;
            victim.map(|piece| (parent, piece))
        } else {
            let victim = self.get(mv.to);
            if victim.is_some() {
                self.clear(mv.to);
            }
            victim.map(|piece| (mv.to, piece))
        };

        // Relocate the mover and clear its first-move privilege.
        self.clear(mv.from);
        let mut placed = mover;
        placed.moved = true;

        let promoting =
            mover.kind == Piece::Pawn && mv.to.rank() == mover.color.pawn_promotion_rank();
        let mut promoted_to = None;
        if promoting {
            let kind = promotion
                .filter(|piece| piece.is_promotable())
                .unwrap_or(Piece::Queen);
            placed.kind = kind;
            promoted_to = Some(kind);
        }

        self.set(mv.to, Some(placed));
        if placed.kind == Piece::King {
            self.king_squares[placed.color.index()] = mv.to;
        }

        // After commit: a surviving ghost from the previous ply expires;
        // a fresh double step plants a new one on the skipped square.
        if !ghost_consumed {
            self.ghost = None;
        }
        if mover.kind == Piece::Pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2 {
            let skipped = Square((mv.from.rank() + mv.to.rank()) / 2, mv.from.file());
            self.ghost = Some(GhostPawn {
                square: skipped,
                parent: mv.to,
            });
        }

        // A king moving two files drags the matching rook with it.
        let mut castle_kingside = false;
        let mut castle_queenside = false;
        let mut rook_shift = None;
        if mover.kind == Piece::King && mv.from.file().abs_diff(mv.to.file()) == 2 {
            let back = mover.color.back_rank();
            let (rook_from, rook_to) = if mv.to.file() == 6 {
                castle_kingside = true;
                (Square(back, 7), Square(back, 5))
            } else {
                castle_queenside = true;
                (Square(back, 0), Square(back, 3))
            };
            if let Some(mut rook) = self.get(rook_from) {
                rook.moved = true;
                self.clear(rook_from);
                self.set(rook_to, Some(rook));
                rook_shift = Some((rook_from, rook_to));
            }
        }

        // Counters and turn handoff.
        if mover.kind == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if mover.color == Color::Black {
            self.fullmove_number += 1;
        }
        self.white_to_move = !self.white_to_move;

        AppliedMove {
            piece: mover.kind,
            color: mover.color,
            capture: captured.is_some(),
            en_passant,
            castle_kingside,
            castle_queenside,
            effects: MoveEffects {
                vacated: mv.from,
                occupied: mv.to,
                mover: placed,
                captured,
                rook_shift,
                promoted_to,
            },
        }
    }
}
