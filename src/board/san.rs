//! Standard Algebraic Notation (SAN) support.
//!
//! Emission works from the position *as it stands before the move*, since
//! disambiguation depends on the pre-move legal sets of sibling pieces.
//! Examples: "e4", "Nf3", "Bxc6+", "O-O", "exd6 e.p.", "e8=Q#"

use super::error::SanError;
use super::{Board, Move, Piece, Square, WireMove};

type SanParseResult = (Option<usize>, Option<usize>, bool, Vec<char>, Option<Piece>);

impl Board {
    /// Format a legal move in Standard Algebraic Notation.
    ///
    /// `promotion` is the piece a promoting pawn will become; it is ignored
    /// for every other move.
    #[must_use]
    pub fn move_to_san(&self, mv: Move, promotion: Option<Piece>) -> String {
        let Some(piece) = self.get(mv.from) else {
            return mv.to_string();
        };
        let mut san = String::new();

        let castling = piece.kind == Piece::King && mv.from.file().abs_diff(mv.to.file()) == 2;
        if castling {
            if mv.to.file() == 6 {
                san.push_str("O-O");
            } else {
                san.push_str("O-O-O");
            }
        } else {
            let en_passant = piece.kind == Piece::Pawn && self.en_passant_target() == Some(mv.to);
            let capture = en_passant || self.get(mv.to).is_some();

            if piece.kind != Piece::Pawn {
                san.push(piece.kind.to_char().to_ascii_uppercase());
                let (needs_file, needs_rank) = self.needs_disambiguation(mv, piece.kind);
                if needs_file {
                    san.push((b'a' + mv.from.file() as u8) as char);
                }
                if needs_rank {
                    san.push((b'1' + mv.from.rank() as u8) as char);
                }
            } else if capture {
                // Pawn captures include the origin file.
                san.push((b'a' + mv.from.file() as u8) as char);
            }

            if capture {
                san.push('x');
            }

            san.push_str(&mv.to.to_string());

            if en_passant {
                san.push_str(" e.p.");
            }

            if piece.kind == Piece::Pawn && mv.to.rank() == piece.color.pawn_promotion_rank() {
                let promo = promotion.unwrap_or(Piece::Queen);
                san.push('=');
                san.push(promo.to_char().to_ascii_uppercase());
            }
        }

        // Checkmate wins over check; both are read off the post-move board.
        let mut scratch = self.clone();
        scratch.apply_move_unchecked(mv, promotion);
        if scratch.is_in_check(piece.color.opponent()) {
            if scratch.has_any_legal_move() {
                san.push('+');
            } else {
                san.push('#');
            }
        }

        san
    }

    /// Determine if disambiguation is needed for a piece move: find every
    /// other same-kind, same-color piece whose legal set also contains the
    /// destination, then narrow by shared file/rank.
    /// Returns (`needs_file`, `needs_rank`).
    fn needs_disambiguation(&self, mv: Move, kind: Piece) -> (bool, bool) {
        let color = self.side_to_move();
        let rivals: Vec<Square> = self
            .pieces_of(color)
            .filter(|&(square, piece)| piece.kind == kind && square != mv.from)
            .filter(|&(square, _)| self.legal_destinations(square).contains(&mv.to))
            .map(|(square, _)| square)
            .collect();

        if rivals.is_empty() {
            return (false, false);
        }

        let shares_file = rivals.iter().any(|sq| sq.file() == mv.from.file());
        let shares_rank = rivals.iter().any(|sq| sq.rank() == mv.from.rank());

        match (shares_file, shares_rank) {
            (false, _) => (true, false),    // File disambiguates
            (true, false) => (false, true), // Rank disambiguates
            (true, true) => (true, true),   // Need both
        }
    }

    /// Parse a move in Standard Algebraic Notation against the current
    /// legal move set.
    ///
    /// Accepts notation like "e4", "Nf3", "Bxc6", "Raxd2", "O-O", "e8=Q"
    /// with optional check/annotation suffixes and an optional "e.p."
    /// marker.
    pub fn parse_san(&self, san: &str) -> Result<WireMove, SanError> {
        let san = san.trim();
        if san.is_empty() {
            return Err(SanError::Empty);
        }

        let mut body = san.trim_end_matches(['+', '#', '!', '?']).trim_end();
        if let Some(stripped) = body.strip_suffix("e.p.") {
            body = stripped.trim_end();
        }

        if body == "O-O" || body == "0-0" {
            return self.find_castling_move(true);
        }
        if body == "O-O-O" || body == "0-0-0" {
            return self.find_castling_move(false);
        }

        let chars: Vec<char> = body.chars().collect();
        if chars.is_empty() {
            return Err(SanError::Empty);
        }

        let (kind, rest) = if chars[0].is_ascii_uppercase() {
            let piece =
                Piece::from_char(chars[0]).ok_or(SanError::InvalidPiece { char: chars[0] })?;
            (piece, &chars[1..])
        } else {
            (Piece::Pawn, &chars[..])
        };

        let (disambig_file, disambig_rank, _is_capture, dest_str, promotion) =
            Board::parse_san_move_str(rest)?;

        if dest_str.len() != 2 {
            return Err(SanError::InvalidSquare {
                notation: dest_str.iter().collect(),
            });
        }
        let dest_file = dest_str[0] as usize - 'a' as usize;
        let dest_rank = dest_str[1] as usize - '1' as usize;
        if dest_file >= 8 || dest_rank >= 8 {
            return Err(SanError::InvalidSquare {
                notation: dest_str.iter().collect(),
            });
        }
        let dest = Square(dest_rank, dest_file);

        self.find_san_move(kind, dest, disambig_file, disambig_rank, promotion, san)
    }

    /// Parse SAN components after the piece letter.
    /// Returns (`disambig_file`, `disambig_rank`, `is_capture`, `dest_chars`, promotion)
    fn parse_san_move_str(chars: &[char]) -> Result<SanParseResult, SanError> {
        let mut idx = 0;
        let mut disambig_file = None;
        let mut disambig_rank = None;
        let mut is_capture = false;
        let mut dest = Vec::new();
        let mut promotion = None;

        // Patterns: "e4", "xe4", "exd5", "R1d2", "Raxd2", "e8=Q"
        while idx < chars.len() {
            let c = chars[idx];

            if c == 'x' {
                is_capture = true;
                idx += 1;
            } else if c == '=' {
                idx += 1;
                if idx < chars.len() {
                    let promo_char = chars[idx];
                    let piece = Piece::from_char(promo_char)
                        .ok_or(SanError::InvalidPromotion { char: promo_char })?;
                    if !piece.is_promotable() {
                        return Err(SanError::InvalidPromotion { char: promo_char });
                    }
                    promotion = Some(piece);
                    idx += 1;
                }
            } else if c.is_ascii_lowercase() && idx + 1 < chars.len() {
                // Could be a disambiguation file or the destination file.
                let next = chars[idx + 1];
                if next.is_ascii_digit() {
                    dest.push(c);
                    dest.push(next);
                    idx += 2;
                } else if next == 'x' || next.is_ascii_lowercase() {
                    disambig_file = Some(c as usize - 'a' as usize);
                    idx += 1;
                } else {
                    dest.push(c);
                    idx += 1;
                }
            } else if c.is_ascii_digit() && dest.is_empty() {
                disambig_rank = Some(c as usize - '1' as usize);
                idx += 1;
            } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
                dest.push(c);
                idx += 1;
            } else {
                idx += 1;
            }
        }

        Ok((disambig_file, disambig_rank, is_capture, dest, promotion))
    }

    fn find_castling_move(&self, kingside: bool) -> Result<WireMove, SanError> {
        let king_square = self.king_square(self.side_to_move());
        let target_file = if kingside { 6 } else { 2 };
        let target = Square(king_square.rank(), target_file);
        if self.legal_destinations(king_square).contains(&target) {
            return Ok(WireMove::new(king_square, target));
        }
        Err(SanError::NoMatchingMove {
            san: if kingside { "O-O" } else { "O-O-O" }.to_string(),
        })
    }

    /// Find the unique legal move matching the parsed SAN components.
    fn find_san_move(
        &self,
        kind: Piece,
        dest: Square,
        disambig_file: Option<usize>,
        disambig_rank: Option<usize>,
        promotion: Option<Piece>,
        san: &str,
    ) -> Result<WireMove, SanError> {
        let mut matching: Vec<Move> = Vec::new();

        for mv in &self.generate_legal_moves() {
            if mv.to != dest {
                continue;
            }
            if self.get(mv.from).map(|piece| piece.kind) != Some(kind) {
                continue;
            }
            if let Some(file) = disambig_file {
                if mv.from.file() != file {
                    continue;
                }
            }
            if let Some(rank) = disambig_rank {
                if mv.from.rank() != rank {
                    continue;
                }
            }
            matching.push(*mv);
        }

        match matching.as_slice() {
            [] => Err(SanError::NoMatchingMove {
                san: san.to_string(),
            }),
            [mv] => Ok(WireMove {
                from: mv.from,
                to: mv.to,
                promotion,
            }),
            _ => Err(SanError::AmbiguousMove {
                san: san.to_string(),
            }),
        }
    }
}
