//! Monte-Carlo tree search for Quantum Reversi.
//!
//! This crate drives move selection for the 6x6 quantum variant. Each
//! search builds a fresh tree for the current turn and runs simulations:
//!
//! 1. **Selection**: descend via UCB1-Tuned to a leaf
//! 2. **Expansion**: enumerate every legal pair / collapse choice once a
//!    leaf has been sampled often enough
//! 3. **Evaluation**: random playouts to the end of the game
//! 4. **Back-propagation**: outcome tallies returned up the recursion
//!
//! There is no learned prior: leaves are evaluated by [`playout::playout`],
//! a random completion of the game over a flattened copy of the quantum
//! state.
//!
//! The [`Solver`] wraps the cycle behind the two per-turn entry points the
//! match protocol needs (`play` chooses a pair of cells, `select` chooses
//! which end of an announced entanglement collapses), metering a wall-clock
//! budget across the whole match and short-circuiting the two opening
//! moves.
//!
//! Playouts draw from a process-wide xorshift128 generator; see [`rng`] for
//! seeding. Given a fixed seed and an identical transcript the search is
//! deterministic.

pub mod config;
pub mod node;
pub mod playout;
pub mod rng;
pub mod solver;

pub use config::SearchConfig;
pub use node::{Move, SearchNode};
pub use playout::playout;
pub use solver::{SearchError, Solver};
