//! Match-protocol messages.
//!
//! The host speaks newline-delimited JSON objects tagged by an `action`
//! field. Every request gets exactly one reply line; `init` and `quit` are
//! answered with an empty line. Extra fields (the host sends `board` and
//! `moves` on `init` too) are ignored.

use serde::{Deserialize, Serialize};

/// One transcript entry: `[[p, q], type]`. `type < 0` is a quantum put;
/// `type >= 0` names the index of the pair that a collapse kept.
pub type MoveRecord = ([u8; 2], i8);

/// A request from the host.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Request {
    Init(InitRequest),
    Play(TurnRequest),
    Select(SelectRequest),
    Quit,
}

/// Match setup: our player index and the disc glyphs the board arrays use.
/// Only the classical disc glyphs matter for reconstruction; anything else
/// on a board is an unoccupied cell.
#[derive(Debug, Deserialize)]
pub struct InitRequest {
    pub index: usize,
    pub size: [usize; 2],
    pub names: Vec<String>,
    pub white: String,
    pub black: String,
    #[allow(dead_code)]
    pub quantum: String,
    #[allow(dead_code)]
    pub empty: String,
}

/// Choose a quantum pair for the current position.
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub board: Vec<String>,
    pub moves: Vec<MoveRecord>,
}

/// Choose which endpoint of the announced entanglement collapses.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub board: Vec<String>,
    pub moves: Vec<MoveRecord>,
    pub entanglement: [u8; 2],
}

/// Reply to `play`.
#[derive(Debug, Serialize)]
pub struct PlayResponse {
    pub positions: [u8; 2],
}

/// Reply to `select`.
#[derive(Debug, Serialize)]
pub struct SelectResponse {
    pub select: u8,
}
