use std::str::FromStr;

use super::error::FenError;
use super::state::{GhostPawn, PieceRecord};
use super::{Board, Color, Piece, Square};

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a position from FEN notation.
    ///
    /// Strict six-field form. Beyond the grid this also caches the king
    /// squares (exactly one king per side, or an error), grants the
    /// first-move privilege to pawns still on their home rank, projects the
    /// castling-rights field onto the king/rook `moved` flags, and
    /// materializes the ghost marker from the en-passant field.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(FenError::WrongFieldCount { found: parts.len() });
        }

        let mut board = Board::empty();

        // Field 1: piece layout, rank 8 down to rank 1.
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        let mut kings: [Vec<Square>; 2] = [Vec::new(), Vec::new()];
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(step) = c.to_digit(10) {
                    file += step as usize;
                    continue;
                }
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let kind = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                if file >= 8 {
                    return Err(FenError::BadFileCount {
                        rank,
                        files: file + 1,
                    });
                }
                let square = Square(rank, file);
                // Only home-rank pawns keep the double-step privilege;
                // kings and rooks regain theirs from the castling field.
                let moved = !(kind == Piece::Pawn && rank == color.pawn_start_rank());
                board.set(square, Some(PieceRecord { color, kind, moved }));
                if kind == Piece::King {
                    kings[color.index()].push(square);
                }
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadFileCount { rank, files: file });
            }
        }
        for color in Color::BOTH {
            match kings[color.index()].as_slice() {
                [] => return Err(FenError::MissingKing { color }),
                [square] => board.king_squares[color.index()] = *square,
                _ => return Err(FenError::DuplicateKing { color }),
            }
        }

        // Field 2: active color.
        match parts[1] {
            "w" => board.white_to_move = true,
            "b" => board.white_to_move = false,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        }

        // Field 3: castling rights, projected onto `moved` flags.
        if parts[2] != "-" {
            for c in parts[2].chars() {
                let (color, rook_file) = match c {
                    'K' => (Color::White, 7),
                    'Q' => (Color::White, 0),
                    'k' => (Color::Black, 7),
                    'q' => (Color::Black, 0),
                    _ => return Err(FenError::InvalidCastling { char: c }),
                };
                let back = color.back_rank();
                board.refresh_first_move(Square(back, 4), color, Piece::King);
                board.refresh_first_move(Square(back, rook_file), color, Piece::Rook);
            }
        }

        // Field 4: en-passant target; rebuild the ghost marker. The parent
        // pawn is searched one rank behind the target first, then one rank
        // in front.
        if parts[3] != "-" {
            let target = Square::from_str(parts[3]).map_err(|_| FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            })?;
            let ghost_color = board.side_to_move().opponent();
            let dir = ghost_color.pawn_direction();
            let parent = [target.offset(-dir, 0), target.offset(dir, 0)]
                .into_iter()
                .flatten()
                .find(|&square| {
                    matches!(
                        board.get(square),
                        Some(PieceRecord {
                            kind: Piece::Pawn,
                            color: c,
                            ..
                        }) if c == ghost_color
                    )
                })
                .ok_or(FenError::InvalidEnPassant {
                    found: parts[3].to_string(),
                })?;
            board.ghost = Some(GhostPawn {
                square: target,
                parent,
            });
        }

        // Fields 5 and 6: clocks.
        board.halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock {
                found: parts[4].to_string(),
            })?;
        board.fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber {
                found: parts[5].to_string(),
            })?;
        if board.fullmove_number == 0 {
            return Err(FenError::InvalidFullmoveNumber {
                found: parts[5].to_string(),
            });
        }

        Ok(board)
    }

    fn refresh_first_move(&mut self, square: Square, color: Color, kind: Piece) {
        if let Some(mut piece) = self.get(square) {
            if piece.color == color && piece.kind == kind {
                piece.moved = false;
                self.set(square, Some(piece));
            }
        }
    }

    /// Convert the position to FEN notation. Ghost squares serialize as
    /// empty in the layout field and reappear in the en-passant field.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some(piece) = self.get(Square(rank, file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.kind.to_fen_char(piece.color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = if self.white_to_move { "w" } else { "b" };
        let castling = self.castling_rights().to_fen_field();
        let ep = self
            .en_passant_target()
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_round_trip() {
        let board = Board::try_from_fen(STARTING_FEN).unwrap();
        assert_eq!(board.to_fen(), STARTING_FEN);
        assert_eq!(Board::new().to_fen(), STARTING_FEN);
    }

    #[test]
    fn test_black_to_move_with_en_passant() {
        let board =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        assert!(!board.white_to_move());
        assert_eq!(board.en_passant_target(), Some(Square(2, 4)));
        // Parent pawn found one rank in front of the target.
        assert_eq!(board.ghost.unwrap().parent, Square(3, 4));
    }

    #[test]
    fn test_round_trip_preserves_en_passant_field() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = Board::try_from_fen(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn test_home_rank_pawns_keep_double_step() {
        let board = Board::try_from_fen(STARTING_FEN).unwrap();
        assert!(!board.get(Square(1, 0)).unwrap().moved);

        let advanced =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/4P3/PPPP1PPP/RNBQKBNR b KQkq - 0 1")
                .unwrap();
        assert!(advanced.get(Square(2, 4)).unwrap().moved);
    }

    #[test]
    fn test_castling_field_projects_onto_flags() {
        let board =
            Board::try_from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w Kq - 0 1").unwrap();
        let rights = board.castling_rights();
        assert!(rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(!rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));
        // 'K' granted but 'Q' withheld: the a1 rook counts as moved.
        assert!(board.get(Square(0, 0)).unwrap().moved);
        assert!(!board.get(Square(0, 7)).unwrap().moved);
    }

    #[test]
    fn test_error_wrong_field_count() {
        let result = Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        assert!(matches!(result, Err(FenError::WrongFieldCount { .. })));
    }

    #[test]
    fn test_error_invalid_piece() {
        let result =
            Board::try_from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidPiece { .. })));
    }

    #[test]
    fn test_error_invalid_side_to_move() {
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidSideToMove { .. })));
    }

    #[test]
    fn test_error_invalid_castling() {
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidCastling { .. })));
    }

    #[test]
    fn test_error_invalid_en_passant() {
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        // Well-formed square, but no parent pawn to attach the ghost to.
        let result = Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - e6 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
    }

    #[test]
    fn test_error_bad_clocks() {
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1");
        assert!(matches!(result, Err(FenError::InvalidHalfmoveClock { .. })));
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0");
        assert!(matches!(
            result,
            Err(FenError::InvalidFullmoveNumber { .. })
        ));
    }

    #[test]
    fn test_error_king_count() {
        let result = Board::try_from_fen("8/8/8/8/8/8/8/K7 w - - 0 1");
        assert!(matches!(
            result,
            Err(FenError::MissingKing {
                color: Color::Black
            })
        ));
        let result = Board::try_from_fen("kk6/8/8/8/8/8/8/K7 w - - 0 1");
        assert!(matches!(
            result,
            Err(FenError::DuplicateKing {
                color: Color::Black
            })
        ));
    }

    #[test]
    fn test_no_castling_rights() {
        let board =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1").unwrap();
        assert!(board.castling_rights().is_empty());
        assert!(board.to_fen().contains(" - "));
    }

    #[test]
    fn test_clock_fields_preserved() {
        let board = Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 42 17").unwrap();
        assert_eq!(board.halfmove_clock(), 42);
        assert_eq!(board.fullmove_number(), 17);
        assert!(board.to_fen().ends_with("42 17"));
    }

    #[test]
    fn test_from_str_trait() {
        let board: Board = STARTING_FEN.parse().unwrap();
        assert!(board.white_to_move());
    }
}
