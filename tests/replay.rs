//! Integration tests: a FEN position corpus and the host/peer replay
//! contract.

use serde::Deserialize;

use chesskit::board::{Board, WireMove, STARTING_FEN};
use chesskit::game::{GameResult, GameSession, ReplayError};

#[derive(Deserialize)]
struct PositionSet {
    positions: Vec<Position>,
}

#[derive(Deserialize)]
struct Position {
    name: String,
    fen: String,
    legal_moves: usize,
}

fn wires(moves: &[&str]) -> Vec<WireMove> {
    moves.iter().map(|m| m.parse().unwrap()).collect()
}

#[test]
fn legal_move_count_suite() {
    let data = include_str!("data/positions.json");
    let set: PositionSet = serde_json::from_str(data).expect("invalid positions.json");

    for position in &set.positions {
        let board = Board::try_from_fen(&position.fen)
            .unwrap_or_else(|err| panic!("{}: bad FEN ({err})", position.name));
        assert_eq!(
            board.generate_legal_moves().len(),
            position.legal_moves,
            "legal move count mismatch for '{}' ({})",
            position.name,
            position.fen
        );
    }
}

#[test]
fn position_suite_round_trips_through_fen() {
    let data = include_str!("data/positions.json");
    let set: PositionSet = serde_json::from_str(data).expect("invalid positions.json");

    for position in &set.positions {
        let board = Board::try_from_fen(&position.fen).unwrap();
        let reparsed = Board::try_from_fen(&board.to_fen()).unwrap();
        assert_eq!(
            reparsed.to_fen(),
            board.to_fen(),
            "round trip diverged for '{}'",
            position.name
        );
        assert_eq!(reparsed.castling_rights(), board.castling_rights());
        assert_eq!(reparsed.en_passant_target(), board.en_passant_target());
    }
}

#[test]
fn peer_mirror_reaches_identical_state() {
    // The host plays a short game; the peer re-executes the wire sequence
    // it received and must land on the same position, log, and result.
    let mut host = GameSession::new();
    for wire in wires(&[
        "e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5c6", "d7c6", "e1g1",
    ]) {
        host.commit_wire(wire).unwrap();
    }

    let relayed: Vec<WireMove> = host.log().entries().iter().map(|r| r.wire()).collect();
    let peer = GameSession::replay(STARTING_FEN, &relayed).unwrap();

    assert_eq!(peer.fen(), host.fen());
    assert_eq!(peer.result(), host.result());
    assert_eq!(peer.log().entries(), host.log().entries());
    assert_eq!(peer.log().to_pgn(), host.log().to_pgn());
}

#[test]
fn replay_includes_promotion_choice() {
    let fen = "8/P6k/8/8/8/8/8/K7 w - - 0 1";
    let mut host = GameSession::from_fen(fen).unwrap();
    host.commit_wire("a7a8n".parse().unwrap()).unwrap();

    let relayed: Vec<WireMove> = host.log().entries().iter().map(|r| r.wire()).collect();
    assert_eq!(relayed[0].to_string(), "a7a8n");

    let peer = GameSession::replay(fen, &relayed).unwrap();
    assert_eq!(peer.fen(), host.fen());
    assert!(peer.fen().starts_with("N7/7k"));
}

#[test]
fn replay_rejects_corrupt_sequence_with_ply_index() {
    let err = GameSession::replay(STARTING_FEN, &wires(&["e2e4", "e7e5", "e4e5"])).unwrap_err();
    match err {
        ReplayError::Move { ply, .. } => assert_eq!(ply, 2),
        other => panic!("expected move error, got {other}"),
    }

    let err = GameSession::replay("not a fen", &[]).unwrap_err();
    assert!(matches!(err, ReplayError::Fen(_)));
}

#[test]
fn fools_mate_replay_produces_sealed_log() {
    let moves = wires(&["f2f3", "e7e5", "g2g4", "d8h4"]);
    let session = GameSession::replay(STARTING_FEN, &moves).unwrap();

    assert_eq!(session.result(), GameResult::BlackWin);
    let pgn = session.log().to_pgn();
    assert!(pgn.contains("[Result \"0-1\"]"));
    assert!(pgn.ends_with("1. f3 e5 2. g4 Qh4# 0-1\n"));

    // A sealed game accepts nothing further.
    let mut sealed = session.clone();
    assert!(sealed.commit_wire("a2a3".parse().unwrap()).is_err());
}

#[test]
fn en_passant_survives_fen_relay() {
    // A paused game is handed over as FEN mid-window; the resumed session
    // must still allow the capture.
    let mut host = GameSession::new();
    for wire in wires(&["h2h3", "b7b5", "h3h4", "b5b4", "a2a4"]) {
        host.commit_wire(wire).unwrap();
    }
    let handoff = host.fen();
    assert!(handoff.contains(" a3 "));

    let mut resumed = GameSession::from_fen(&handoff).unwrap();
    let receipt = resumed.commit_wire("b4a3".parse().unwrap()).unwrap();
    assert!(receipt.record.flags.is_en_passant());
    assert!(resumed.board().is_empty("a4".parse().unwrap()));
}
