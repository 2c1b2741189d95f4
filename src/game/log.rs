//! The append-only game log and its PGN-style text form.

use std::collections::BTreeMap;

use crate::board::STARTING_FEN;

use super::{GameResult, RecordedMove};

/// Ordered record of every committed ply plus the terminal result.
///
/// Created at game start, appended once per ply, sealed when the result
/// becomes known. Entries are never rewritten.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameLog {
    initial_fen: String,
    entries: Vec<RecordedMove>,
    result: GameResult,
}

/// One display row: a full move of two plies, White first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePair {
    pub number: u32,
    pub white: String,
    pub black: Option<String>,
}

impl GameLog {
    pub(crate) fn new(initial_fen: String) -> Self {
        GameLog {
            initial_fen,
            entries: Vec::new(),
            result: GameResult::Undetermined,
        }
    }

    pub(crate) fn append(&mut self, record: RecordedMove) {
        self.entries.push(record);
    }

    pub(crate) fn seal(&mut self, result: GameResult) {
        self.result = result;
    }

    /// FEN the game started from.
    #[must_use]
    pub fn initial_fen(&self) -> &str {
        &self.initial_fen
    }

    #[must_use]
    pub fn entries(&self) -> &[RecordedMove] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn result(&self) -> GameResult {
        self.result
    }

    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.result != GameResult::Undetermined
    }

    /// Group plies into numbered move pairs, two per full move with White
    /// first, for scoresheet-style display.
    #[must_use]
    pub fn move_pairs(&self) -> Vec<MovePair> {
        self.entries
            .chunks(2)
            .enumerate()
            .map(|(idx, pair)| MovePair {
                number: idx as u32 + 1,
                white: pair[0].san.clone(),
                black: pair.get(1).map(|record| record.san.clone()),
            })
            .collect()
    }

    /// Render the log as PGN-style text with default tag lines.
    #[must_use]
    pub fn to_pgn(&self) -> String {
        let mut headers = BTreeMap::new();
        headers.insert("Event".to_owned(), "Chess Game".to_owned());
        headers.insert("Site".to_owned(), "Local".to_owned());
        headers.insert("Date".to_owned(), "????.??.??".to_owned());
        headers.insert("Round".to_owned(), "-".to_owned());
        headers.insert("White".to_owned(), "White".to_owned());
        headers.insert("Black".to_owned(), "Black".to_owned());
        self.to_pgn_with_headers(&headers)
    }

    /// Render the log with caller-supplied tag lines. The Result tag and,
    /// for a non-standard start, the SetUp/FEN tags are filled in here.
    #[must_use]
    pub fn to_pgn_with_headers(&self, headers: &BTreeMap<String, String>) -> String {
        let mut headers = headers.clone();
        headers.insert("Result".to_owned(), self.result.to_string());
        if self.initial_fen != STARTING_FEN {
            headers.insert("SetUp".to_owned(), "1".to_owned());
            headers.insert("FEN".to_owned(), self.initial_fen.clone());
        }

        let mut out = String::new();
        for (key, value) in &headers {
            out.push_str(&format!("[{} \"{}\"]\n", key, value.replace('"', "\\\"")));
        }
        out.push('\n');

        let mut movetext: Vec<String> = Vec::with_capacity(self.entries.len() + 1);
        for (ply, record) in self.entries.iter().enumerate() {
            if ply % 2 == 0 {
                movetext.push(format!("{}. {}", ply / 2 + 1, record.san));
            } else {
                movetext.push(record.san.clone());
            }
        }
        movetext.push(self.result.to_string());
        out.push_str(&movetext.join(" "));
        out.push('\n');

        out
    }
}
