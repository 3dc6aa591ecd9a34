//! Turn-entry façade over the search tree.
//!
//! A [`Solver`] lives for the whole match. It keeps the remaining
//! wall-clock budget, spends a fixed share of it per turn, and answers the
//! two questions the protocol asks: which pair to play, and which end of an
//! announced entanglement to collapse.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

use reversi_rules::{Color, HistoryEntry, State, CELLS};

use crate::config::SearchConfig;
use crate::node::{Move, SearchNode};

/// Errors surfaced by the per-turn entry points.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search finished without a candidate move")]
    NoCandidateMove,
}

/// Ordered corner pairs probed for the second move; the first pair whose
/// cells are both untouched is played.
const SECOND_MOVE_CANDIDATES: [(u8, u8); 6] =
    [(5, 30), (0, 35), (0, 5), (0, 30), (5, 35), (30, 35)];

/// Move chooser with a match-wide time budget.
pub struct Solver {
    config: SearchConfig,
    remaining: Duration,
}

impl Solver {
    pub fn new(config: SearchConfig) -> Self {
        let remaining = config.time_limit;
        Self { config, remaining }
    }

    /// Budget left for the rest of the match.
    pub fn remaining_time(&self) -> Duration {
        self.remaining
    }

    /// Choose a pair of cells to play at `step`.
    ///
    /// The first two moves of each side are openings: step 4 takes the
    /// main-diagonal corners outright, step 5 probes the corner pairs
    /// against the cells the history has already touched. Everything else
    /// is searched.
    pub fn play(
        &mut self,
        state: &State,
        step: usize,
        history: &[HistoryEntry],
    ) -> Result<Move, SearchError> {
        if step == 4 {
            return Ok(Move::new(0, 35));
        }
        if step == 5 {
            let mut used = [false; CELLS];
            for entry in history {
                used[entry.p as usize] = true;
                used[entry.q as usize] = true;
            }
            for &(p, q) in &SECOND_MOVE_CANDIDATES {
                if !used[p as usize] && !used[q as usize] {
                    return Ok(Move::new(p, q));
                }
            }
        }

        let mut root = SearchNode::play_root(state.clone(), Color::from_step(step));
        root.expand();
        self.run(&mut root);
        root.best_move().ok_or(SearchError::NoCandidateMove)
    }

    /// Choose which end of the entangled pair `(p, q)` collapses. `step` is
    /// the step of the move that closed the cycle.
    pub fn select(
        &mut self,
        state: &State,
        p: u8,
        q: u8,
        step: usize,
        _history: &[HistoryEntry],
    ) -> Result<u8, SearchError> {
        let mut root =
            SearchNode::selection_root(state.clone(), Color::from_step(step), Move::new(p, q));
        root.expand();
        self.run(&mut root);
        root.best_move()
            .map(|m| m.p)
            .ok_or(SearchError::NoCandidateMove)
    }

    /// Run simulations in blocks until this turn's slice of the budget is
    /// spent, then charge the elapsed time against the match budget.
    fn run(&mut self, root: &mut SearchNode) {
        let start = Instant::now();
        let deadline = start + self.remaining.mul_f64(self.config.turn_share);
        let elapsed = loop {
            for _ in 0..self.config.playout_block {
                root.update(&self.config);
            }
            let now = Instant::now();
            if now >= deadline {
                break now - start;
            }
        };
        self.remaining = self.remaining.saturating_sub(elapsed);
        debug!(
            playouts = root.playouts(),
            elapsed_ms = elapsed.as_millis() as u64,
            remaining_ms = self.remaining.as_millis() as u64,
            "turn search finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::set_seed;

    /// The four opening stones the host always places.
    fn opening_state() -> State {
        let mut state = State::new();
        state.force_put_classic(15, Color::White);
        state.force_put_classic(20, Color::White);
        state.force_put_classic(14, Color::Black);
        state.force_put_classic(21, Color::Black);
        state
    }

    fn opening_history() -> Vec<HistoryEntry> {
        [15, 14, 20, 21]
            .into_iter()
            .map(|p| HistoryEntry::new(p, p, 0))
            .collect()
    }

    fn solver() -> Solver {
        Solver::new(SearchConfig::for_testing())
    }

    #[test]
    fn first_move_takes_the_diagonal_corners() {
        let mv = solver()
            .play(&opening_state(), 4, &opening_history())
            .unwrap();
        assert_eq!(mv, Move::new(0, 35));
    }

    #[test]
    fn second_move_answers_the_diagonal_with_the_antidiagonal() {
        // Opponent opened (0, 35): the probe settles on (5, 30).
        let mut state = opening_state();
        state.put_quantum(0, 35, Color::White);
        let mut history = opening_history();
        history.push(HistoryEntry::new(0, 35, -1));

        let mv = solver().play(&state, 5, &history).unwrap();
        assert_eq!(mv, Move::new(5, 30));
    }

    #[test]
    fn second_move_falls_back_to_the_free_diagonal() {
        // Opponent took (5, 30) first: the next free candidate is (0, 35).
        let mut state = opening_state();
        state.put_quantum(5, 30, Color::White);
        let mut history = opening_history();
        history.push(HistoryEntry::new(5, 30, -1));

        let mv = solver().play(&state, 5, &history).unwrap();
        assert_eq!(mv, Move::new(0, 35));
    }

    #[test]
    fn second_move_probe_honors_the_candidate_order() {
        // Corners 5 and 35 are taken: (5, 30), (0, 35), (0, 5), (5, 35)
        // all collide, leaving (0, 30).
        let mut state = opening_state();
        state.put_quantum(5, 35, Color::White);
        let mut history = opening_history();
        history.push(HistoryEntry::new(5, 35, -1));

        let mv = solver().play(&state, 5, &history).unwrap();
        assert_eq!(mv, Move::new(0, 30));
    }

    #[test]
    fn forced_last_cell_is_played_as_a_doubled_move() {
        set_seed(5);
        // 35 classical stones, only cell 17 free.
        let mut state = State::new();
        for p in 0..CELLS {
            if p == 17 {
                continue;
            }
            let color = if p % 2 == 0 {
                Color::White
            } else {
                Color::Black
            };
            state.force_put_classic(p, color);
        }

        let mv = solver().play(&state, 35, &[]).unwrap();
        assert_eq!(mv, Move::new(17, 17));
    }

    #[test]
    fn select_returns_one_of_the_announced_endpoints() {
        set_seed(9);
        // Cells 0..=2 empty and chained; the pair (0, 2) closed a cycle.
        let mut state = State::new();
        for p in 3..CELLS {
            let color = if p % 2 == 0 {
                Color::White
            } else {
                Color::Black
            };
            state.force_put_classic(p, color);
        }
        state.put_quantum(0, 1, Color::White);
        state.put_quantum(1, 2, Color::Black);

        let chosen = solver().select(&state, 0, 2, 35, &[]).unwrap();
        assert!(chosen == 0 || chosen == 2);
    }

    #[test]
    fn select_on_a_doubled_pair_returns_that_cell() {
        set_seed(13);
        let mut state = State::new();
        for p in 0..CELLS {
            if p == 17 {
                continue;
            }
            let color = if p % 2 == 0 {
                Color::White
            } else {
                Color::Black
            };
            state.force_put_classic(p, color);
        }

        let chosen = solver().select(&state, 17, 17, 35, &[]).unwrap();
        assert_eq!(chosen, 17);
    }

    #[test]
    fn the_turn_budget_is_charged_against_the_match_budget() {
        set_seed(21);
        let mut solver = Solver::new(SearchConfig::for_testing());
        let before = solver.remaining_time();
        // Step 6 search: no opening shortcut applies.
        let mut state = opening_state();
        state.put_quantum(0, 35, Color::White);
        state.put_quantum(5, 30, Color::Black);
        solver.play(&state, 6, &[]).unwrap();
        assert!(solver.remaining_time() < before);
    }

    #[test]
    fn opening_shortcuts_do_not_consume_budget() {
        let mut solver = Solver::new(SearchConfig::default());
        let before = solver.remaining_time();
        solver.play(&opening_state(), 4, &opening_history()).unwrap();
        assert_eq!(solver.remaining_time(), before);
    }
}
