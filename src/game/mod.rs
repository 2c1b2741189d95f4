//! Turn-authority session layer.
//!
//! A [`GameSession`] owns one authoritative [`Board`] plus the derived
//! [`GameLog`]. External collaborators (board view, transport) speak to it
//! through two calls: ask for a piece's legal destinations, and commit a
//! move. Committing returns the recorded ply and a description of the grid
//! side effects to replay visually.
//!
//! The session is deterministic: re-executing the same wire-move sequence
//! from the same FEN always yields an identical board and log, which is the
//! whole replication contract between a host and a mirroring peer.

mod log;

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{
    Board, Color, FenError, Move, MoveEffects, MoveError, Piece, Square, WireMove,
};

pub use self::log::{GameLog, MovePair};

const FLAG_CAPTURE: u8 = 1 << 0;
const FLAG_EN_PASSANT: u8 = 1 << 1;
const FLAG_CASTLE_KINGSIDE: u8 = 1 << 2;
const FLAG_CASTLE_QUEENSIDE: u8 = 1 << 3;
const FLAG_PROMOTION: u8 = 1 << 4;
const FLAG_CHECK: u8 = 1 << 5;
const FLAG_CHECKMATE: u8 = 1 << 6;

/// What happened on a committed ply, as a bitmask.
///
/// CHECK and CHECKMATE are mutually exclusive; checkmate wins.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveFlags(u8);

impl MoveFlags {
    #[must_use]
    pub const fn none() -> Self {
        MoveFlags(0)
    }

    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.0 & FLAG_CAPTURE != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.0 & FLAG_EN_PASSANT != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_castle_kingside(self) -> bool {
        self.0 & FLAG_CASTLE_KINGSIDE != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_castle_queenside(self) -> bool {
        self.0 & FLAG_CASTLE_QUEENSIDE != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.0 & FLAG_PROMOTION != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_check(self) -> bool {
        self.0 & FLAG_CHECK != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_checkmate(self) -> bool {
        self.0 & FLAG_CHECKMATE != 0
    }

    #[inline]
    fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }
}

impl fmt::Debug for MoveFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for (bit, name) in [
            (FLAG_CAPTURE, "capture"),
            (FLAG_EN_PASSANT, "en-passant"),
            (FLAG_CASTLE_KINGSIDE, "O-O"),
            (FLAG_CASTLE_QUEENSIDE, "O-O-O"),
            (FLAG_PROMOTION, "promotion"),
            (FLAG_CHECK, "check"),
            (FLAG_CHECKMATE, "checkmate"),
        ] {
            if self.0 & bit != 0 {
                list.entry(&name);
            }
        }
        list.finish()
    }
}

/// One committed ply. Created once per commit and never mutated afterward.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecordedMove {
    pub mv: Move,
    /// The mover's kind before the move (a promoting ply records Pawn).
    pub piece: Piece,
    pub color: Color,
    pub flags: MoveFlags,
    /// The piece a promoting pawn became.
    pub promotion: Option<Piece>,
    /// 1-based ply number; position in the log.
    pub number: u32,
    /// Standard algebraic notation, disambiguated against the pre-move
    /// position.
    pub san: String,
}

impl RecordedMove {
    /// The wire form a peer needs to replay this ply.
    #[must_use]
    pub fn wire(&self) -> WireMove {
        WireMove {
            from: self.mv.from,
            to: self.mv.to,
            promotion: self.promotion,
        }
    }
}

/// Terminal state of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameResult {
    Undetermined,
    WhiteWin,
    BlackWin,
    Draw,
}

impl GameResult {
    const fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWin,
            Color::Black => GameResult::BlackWin,
        }
    }
}

impl fmt::Display for GameResult {
    /// PGN result token.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Undetermined => write!(f, "*"),
            GameResult::WhiteWin => write!(f, "1-0"),
            GameResult::BlackWin => write!(f, "0-1"),
            GameResult::Draw => write!(f, "1/2-1/2"),
        }
    }
}

/// Session tuning knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Plies without a capture or pawn move before the game is scored a
    /// draw (fifty-move style; 100 plies = fifty full moves).
    pub halfmove_draw_threshold: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            halfmove_draw_threshold: 100,
        }
    }
}

/// Everything a caller gets back from a successful commit.
#[derive(Clone, Debug)]
pub struct MoveReceipt {
    pub record: RecordedMove,
    pub effects: MoveEffects,
}

/// Error from replaying a wire-move sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    Fen(FenError),
    Move { ply: usize, error: MoveError },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Fen(err) => write!(f, "Bad starting FEN: {err}"),
            ReplayError::Move { ply, error } => {
                write!(f, "Move at ply {} rejected: {error}", ply + 1)
            }
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Fen(err) => Some(err),
            ReplayError::Move { error, .. } => Some(error),
        }
    }
}

/// The authoritative game state plus its derived log.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    log: GameLog,
    config: SessionConfig,
}

impl GameSession {
    /// New game from the standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        let board = Board::new();
        let log = GameLog::new(board.to_fen());
        GameSession { board, log, config }
    }

    /// New game from an arbitrary position.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Self::from_fen_with_config(fen, SessionConfig::default())
    }

    pub fn from_fen_with_config(fen: &str, config: SessionConfig) -> Result<Self, FenError> {
        let board = Board::try_from_fen(fen)?;
        let log = GameLog::new(board.to_fen());
        Ok(GameSession { board, log, config })
    }

    /// Rebuild a session by re-executing a committed wire sequence against
    /// the given starting FEN. Identical input always produces an identical
    /// board and log.
    pub fn replay(fen: &str, moves: &[WireMove]) -> Result<Self, ReplayError> {
        Self::replay_with_config(fen, moves, SessionConfig::default())
    }

    pub fn replay_with_config(
        fen: &str,
        moves: &[WireMove],
        config: SessionConfig,
    ) -> Result<Self, ReplayError> {
        let mut session = Self::from_fen_with_config(fen, config).map_err(ReplayError::Fen)?;
        for (ply, wire) in moves.iter().enumerate() {
            session
                .commit(wire.as_move(), wire.promotion)
                .map_err(|error| ReplayError::Move { ply, error })?;
        }
        Ok(session)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    #[must_use]
    pub fn result(&self) -> GameResult {
        self.log.result()
    }

    /// Current position as FEN.
    #[must_use]
    pub fn fen(&self) -> String {
        self.board.to_fen()
    }

    /// Legal destinations for the piece on `from`. Empty when the square
    /// is empty, the piece belongs to the side not to move, or the game is
    /// already decided.
    #[must_use]
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        if self.result() != GameResult::Undetermined {
            return Vec::new();
        }
        self.board.legal_destinations(from)
    }

    /// Validate and commit one ply.
    ///
    /// On any error the board and log are left exactly as they were. On
    /// success the returned receipt carries the sealed move record
    /// (including check/checkmate flags from the game-end evaluation) and
    /// the grid side effects for visual replay.
    pub fn commit(
        &mut self,
        mv: Move,
        promotion: Option<Piece>,
    ) -> Result<MoveReceipt, MoveError> {
        if self.result() != GameResult::Undetermined {
            ::log::debug!("move {mv} rejected: game already decided");
            return Err(MoveError::IllegalDestination { mv });
        }
        let piece = self
            .board
            .get(mv.from)
            .ok_or(MoveError::NoPieceAtOrigin { square: mv.from })?;
        if !self.board.legal_destinations(mv.from).contains(&mv.to) {
            ::log::debug!("move {mv} rejected: not in the legal set");
            return Err(MoveError::IllegalDestination { mv });
        }

        let promoting =
            piece.kind == Piece::Pawn && mv.to.rank() == piece.color.pawn_promotion_rank();
        if promoting {
            match promotion {
                None => return Err(MoveError::MissingPromotionChoice { mv }),
                Some(choice) if !choice.is_promotable() => {
                    return Err(MoveError::InvalidPromotionChoice { piece: choice })
                }
                Some(_) => {}
            }
        }

        // Notation needs the pre-move position for disambiguation.
        let san = self
            .board
            .move_to_san(mv, if promoting { promotion } else { None });

        let applied = self
            .board
            .apply_move_unchecked(mv, if promoting { promotion } else { None });

        let mut flags = MoveFlags::none();
        if applied.capture {
            flags.set(FLAG_CAPTURE);
        }
        if applied.en_passant {
            flags.set(FLAG_EN_PASSANT);
        }
        if applied.castle_kingside {
            flags.set(FLAG_CASTLE_KINGSIDE);
        }
        if applied.castle_queenside {
            flags.set(FLAG_CASTLE_QUEENSIDE);
        }
        if applied.effects.promoted_to.is_some() {
            flags.set(FLAG_PROMOTION);
        }

        // Game-end evaluation for the side now to move.
        let defender = self.board.side_to_move();
        let in_check = self.board.is_in_check(defender);
        let can_move = self.board.has_any_legal_move();
        let mut result = GameResult::Undetermined;
        if !can_move {
            if in_check {
                flags.set(FLAG_CHECKMATE);
                result = GameResult::win_for(applied.color);
            } else {
                result = GameResult::Draw;
            }
        } else {
            if in_check {
                flags.set(FLAG_CHECK);
            }
            if self.board.halfmove_clock() >= self.config.halfmove_draw_threshold {
                result = GameResult::Draw;
            }
        }

        let record = RecordedMove {
            mv,
            piece: applied.piece,
            color: applied.color,
            flags,
            promotion: applied.effects.promoted_to,
            number: self.log.len() as u32 + 1,
            san,
        };

        ::log::debug!(
            "ply {}: {} {} ({})",
            record.number,
            record.color,
            record.san,
            mv
        );
        self.log.append(record.clone());
        if result != GameResult::Undetermined {
            ::log::debug!("game over: {result}");
            self.log.seal(result);
        }

        Ok(MoveReceipt {
            record,
            effects: applied.effects,
        })
    }

    /// Commit a ply received in wire form.
    pub fn commit_wire(&mut self, wire: WireMove) -> Result<MoveReceipt, MoveError> {
        self.commit(wire.as_move(), wire.promotion)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession::new()
    }
}
