//! One match session: transcript replay and turn dispatch.
//!
//! The session owns the solver and the step bookkeeping. Positions are
//! never carried between turns; every request rebuilds the state from the
//! board glyphs and the move transcript the host sends, so the bot cannot
//! drift out of sync with the referee.

use anyhow::{bail, ensure, Context, Result};
use tracing::info;

use mcts::{SearchConfig, Solver};
use reversi_rules::{Color, HistoryEntry, State, CELLS, WIDTH};

use crate::protocol::{
    InitRequest, MoveRecord, PlayResponse, Request, SelectRequest, SelectResponse, TurnRequest,
};

/// Classical disc glyphs keyed by step parity. The host labels the
/// even-step player's disc `black`, which is the `+1` (white) color of the
/// engine's signed encoding.
#[derive(Debug, Clone)]
struct Discs {
    even: String,
    odd: String,
}

/// The reply owed for a request.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// One JSON line.
    Line(String),
    /// The empty line that acknowledges `quit`; the session is over.
    Quit,
}

/// A running match.
pub struct Session {
    solver: Solver,
    discs: Discs,
    /// Step of our next `play`; starts at `4 + index` and advances by two
    /// per own move.
    step: usize,
}

impl Session {
    pub fn new(init: InitRequest, config: SearchConfig) -> Result<Self> {
        ensure!(init.index <= 1, "player index must be 0 or 1, got {}", init.index);
        ensure!(
            init.size == [WIDTH, WIDTH],
            "only {WIDTH}x{WIDTH} boards are supported, got {:?}",
            init.size
        );
        info!(
            index = init.index,
            names = ?init.names,
            "match initialized"
        );
        Ok(Self {
            solver: Solver::new(config),
            discs: Discs {
                even: init.black,
                odd: init.white,
            },
            step: 4 + init.index,
        })
    }

    /// Handle one request and produce its reply line.
    pub fn handle(&mut self, request: Request) -> Result<Reply> {
        match request {
            Request::Init(_) => bail!("unexpected init: the session is already running"),
            Request::Play(play) => self.handle_play(&play),
            Request::Select(select) => self.handle_select(&select),
            Request::Quit => Ok(Reply::Quit),
        }
    }

    fn handle_play(&mut self, play: &TurnRequest) -> Result<Reply> {
        debug_assert_eq!(play.moves.len(), self.step, "transcript out of step");
        let state = self.rebuild_state(&play.board, &play.moves, play.moves.len())?;
        let history = history_from_moves(&play.moves);

        let mv = self
            .solver
            .play(&state, self.step, &history)
            .context("no playable pair")?;
        self.step += 2;

        let response = PlayResponse {
            positions: [mv.p, mv.q],
        };
        Ok(Reply::Line(serde_json::to_string(&response)?))
    }

    fn handle_select(&mut self, select: &SelectRequest) -> Result<Reply> {
        // The last transcript entry is the move that closed the cycle; it
        // stays out of the replayed state and arrives as `entanglement`.
        ensure!(
            !select.moves.is_empty(),
            "select without a pending move in the transcript"
        );
        let state = self.rebuild_state(&select.board, &select.moves, select.moves.len() - 1)?;
        let history = history_from_moves(&select.moves);
        let [p, q] = select.entanglement;

        let chosen = self
            .solver
            .select(&state, p, q, self.step - 1, &history)
            .context("no collapse choice")?;

        let response = SelectResponse { select: chosen };
        Ok(Reply::Line(serde_json::to_string(&response)?))
    }

    /// Rebuild the quantum state from the glyph board and the first
    /// `replay_len` transcript entries.
    ///
    /// Classical stones come from the glyphs (anything that is not one of
    /// the two disc glyphs counts as unoccupied). Edges come from replaying
    /// the quantum puts: entries whose cells are already classical were
    /// resolved by a collapse and are skipped.
    fn rebuild_state(
        &self,
        board: &[String],
        moves: &[MoveRecord],
        replay_len: usize,
    ) -> Result<State> {
        ensure!(
            board.len() == CELLS,
            "board must list {CELLS} cells, got {}",
            board.len()
        );

        let mut state = State::new();
        for (cell, glyph) in board.iter().enumerate() {
            if *glyph == self.discs.even {
                state.force_put_classic(cell, Color::White);
            } else if *glyph == self.discs.odd {
                state.force_put_classic(cell, Color::Black);
            }
        }

        for (step, record) in moves.iter().enumerate().take(replay_len).skip(4) {
            let ([p, q], kind) = *record;
            let (p, q) = (p as usize, q as usize);
            ensure!(p < CELLS && q < CELLS, "move {step} is out of range");
            if state.classic_board().get(p).is_some() || state.classic_board().get(q).is_some() {
                continue;
            }
            if kind < 0 {
                state.put_quantum(p, q, Color::from_step(step));
            }
        }
        Ok(state)
    }
}

/// Canonicalized history of the whole transcript, for the opening probe.
fn history_from_moves(moves: &[MoveRecord]) -> Vec<HistoryEntry> {
    moves
        .iter()
        .map(|&([p, q], kind)| HistoryEntry::new(p, q, kind))
        .collect()
}
