//! Rules of Quantum Reversi on a 6x6 board.
//!
//! The game is ordinary Reversi with one twist: instead of placing a single
//! stone, a move drops a *quantum pair* onto two empty cells. Paired cells
//! form an undirected edge graph; when a move would connect two cells that
//! are already connected, the whole connected component *collapses* into
//! classical stones, applying Reversi flipping as each stone materializes.
//!
//! This crate holds the pure game model:
//!
//! - [`ClassicBoard`] - the classical layer: two 36-bit stone bitmaps with
//!   place-and-flip in all eight directions
//! - [`State`] - the quantum layer: classical board plus the ordered list of
//!   superposition edges, entanglement tests and collapse
//! - [`HistoryEntry`] - one replayed transcript move in canonical form
//!
//! Search and protocol handling live in sibling crates.

mod board;
mod state;

pub use board::{ClassicBoard, Color, Winner, CELLS, FULL_MASK, WIDTH};
pub use state::{Edge, HistoryEntry, State};
