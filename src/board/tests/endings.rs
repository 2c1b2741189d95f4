//! Checkmate, stalemate, and no-progress draw detection.

use crate::board::{Color, Move, Square};
use crate::game::{GameResult, GameSession, SessionConfig};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn test_fools_mate_is_black_win() {
    let mut session = GameSession::new();
    session.commit(Move::new(sq("f2"), sq("f3")), None).unwrap();
    session.commit(Move::new(sq("e7"), sq("e5")), None).unwrap();
    session.commit(Move::new(sq("g2"), sq("g4")), None).unwrap();
    let receipt = session.commit(Move::new(sq("d8"), sq("h4")), None).unwrap();

    assert_eq!(session.result(), GameResult::BlackWin);
    assert_eq!(receipt.record.san, "Qh4#");
    assert!(receipt.record.flags.is_checkmate());
    assert!(!receipt.record.flags.is_check());

    let board = session.board();
    assert!(board.is_in_check(Color::White));
    assert!(!board.has_any_legal_move());
    assert_eq!(board.generate_legal_moves().len(), 0);
    assert!(session.log().is_sealed());
}

#[test]
fn test_scholars_mate_is_white_win() {
    let mut session = GameSession::new();
    for wire in [
        "e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7",
    ] {
        session.commit_wire(wire.parse().unwrap()).unwrap();
    }
    assert_eq!(session.result(), GameResult::WhiteWin);
    let last = session.log().entries().last().unwrap();
    assert_eq!(last.san, "Qxf7#");
    assert!(last.flags.is_checkmate());
    assert!(last.flags.is_capture());
}

#[test]
fn test_stalemate_is_draw() {
    // Qc7 leaves the cornered king unattacked with nowhere to go.
    let mut session = GameSession::from_fen("k7/8/1K6/8/8/8/8/2Q5 w - - 0 1").unwrap();
    let receipt = session.commit(Move::new(sq("c1"), sq("c7")), None).unwrap();

    assert_eq!(session.result(), GameResult::Draw);
    assert!(!receipt.record.flags.is_check());
    assert!(!receipt.record.flags.is_checkmate());
    assert!(!session.board().is_in_check(Color::Black));
    assert!(!session.board().has_any_legal_move());
}

#[test]
fn test_check_is_not_game_over() {
    let mut session = GameSession::new();
    for wire in ["e2e4", "f7f6", "d1h5"] {
        session.commit_wire(wire.parse().unwrap()).unwrap();
    }
    let last = session.log().entries().last().unwrap();
    assert_eq!(last.san, "Qh5+");
    assert!(last.flags.is_check());
    assert_eq!(session.result(), GameResult::Undetermined);
    // g6 blocks; the game goes on.
    session.commit_wire("g7g6".parse().unwrap()).unwrap();
    assert_eq!(session.result(), GameResult::Undetermined);
}

#[test]
fn test_no_progress_threshold_seals_draw() {
    let config = SessionConfig {
        halfmove_draw_threshold: 6,
    };
    let mut session =
        GameSession::from_fen_with_config("4k3/8/8/8/8/8/8/4K2R w - - 0 1", config).unwrap();
    for wire in ["h1h2", "e8d8", "h2h3", "d8e8", "h3h2"] {
        session.commit_wire(wire.parse().unwrap()).unwrap();
        assert_eq!(session.result(), GameResult::Undetermined);
    }
    session.commit_wire("e8d8".parse().unwrap()).unwrap();
    assert_eq!(session.board().halfmove_clock(), 6);
    assert_eq!(session.result(), GameResult::Draw);
    assert!(session.log().is_sealed());
}

#[test]
fn test_pawn_move_resets_no_progress_clock() {
    let config = SessionConfig {
        halfmove_draw_threshold: 4,
    };
    let mut session =
        GameSession::from_fen_with_config("4k3/8/8/8/8/8/4P3/4K2R w - - 0 1", config).unwrap();
    for wire in ["h1h2", "e8d8", "h2h3"] {
        session.commit_wire(wire.parse().unwrap()).unwrap();
    }
    assert_eq!(session.board().halfmove_clock(), 3);
    session.commit_wire("d8e8".parse().unwrap()).unwrap();
    assert_eq!(session.result(), GameResult::Draw);

    // Same dance, but a pawn push restarts the count before the threshold.
    let mut session =
        GameSession::from_fen_with_config("4k3/8/8/8/8/8/4P3/4K2R w - - 0 1", config).unwrap();
    for wire in ["h1h2", "e8d8", "e2e3", "d8e8"] {
        session.commit_wire(wire.parse().unwrap()).unwrap();
    }
    assert_eq!(session.board().halfmove_clock(), 1);
    assert_eq!(session.result(), GameResult::Undetermined);
}

#[test]
fn test_back_rank_mate() {
    let mut session = GameSession::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    let receipt = session.commit(Move::new(sq("a1"), sq("a8")), None).unwrap();
    assert_eq!(receipt.record.san, "Ra8#");
    assert_eq!(session.result(), GameResult::WhiteWin);
}
