//! Search tree nodes.
//!
//! Every node owns its children outright; back-propagation happens by
//! returning the playout tally up the recursion in [`SearchNode::update`],
//! so there are no parent links. A tree lives for one turn and is dropped
//! wholesale when the turn's move has been extracted.

use reversi_rules::{Color, State, Winner};

use crate::config::SearchConfig;
use crate::playout::playout;

/// A pair of cells. Equal endpoints encode a forced collapse on the single
/// remaining cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub p: u8,
    pub q: u8,
}

impl Move {
    pub fn new(p: u8, q: u8) -> Self {
        Self { p, q }
    }
}

/// Playout outcomes bucketed by winner: black, draw, white.
pub type WinTally = [u32; 3];

/// One node of the search tree.
///
/// `last_color` is the color that produced this node's position;
/// `last_move` is the pair it played (`None` only at the root of a `play`
/// search, where it stands for the opponent's unknown previous move). When
/// `selection` is set, the next action here is choosing which end of
/// `last_move` collapses rather than placing a new pair.
#[derive(Debug, Clone)]
pub struct SearchNode {
    state: State,
    last_color: Color,
    last_move: Option<Move>,
    selection: bool,
    wins: u32,
    playouts: u32,
    children: Vec<SearchNode>,
}

impl SearchNode {
    /// Root for choosing a pair: the side to move is `to_move`, so the
    /// stored last color is its opponent.
    pub fn play_root(state: State, to_move: Color) -> Self {
        Self::child(state, to_move.opponent(), None, false)
    }

    /// Root for choosing a collapse: the referee announced the entangled
    /// pair `pending`, played by `placer`.
    pub fn selection_root(state: State, placer: Color, pending: Move) -> Self {
        Self::child(state, placer, Some(pending), true)
    }

    fn child(state: State, last_color: Color, last_move: Option<Move>, selection: bool) -> Self {
        Self {
            state,
            last_color,
            last_move,
            selection,
            wins: 0,
            playouts: 0,
            children: Vec::new(),
        }
    }

    /// The color that acts next from this node. A `(p, p)` last move was a
    /// collapse choice, which does not consume a turn: the same player
    /// moves again.
    fn next_color(&self) -> Color {
        match self.last_move {
            Some(m) if m.p == m.q => self.last_color,
            _ => self.last_color.opponent(),
        }
    }

    /// Populate the children once. Repeated calls are no-ops, and a node on
    /// a full board stays childless.
    pub fn expand(&mut self) {
        if !self.children.is_empty() {
            return;
        }
        let board = self.state.classic_board();
        if board.is_full() {
            return;
        }

        if self.selection {
            let Some(pending) = self.last_move else {
                debug_assert!(false, "selection node without a pending pair");
                return;
            };
            let chooser = self.last_color.opponent();
            let endpoints = [pending.p, pending.q];
            // A doubled pair is a forced one-cell collapse: a single child.
            let endpoints = if pending.p == pending.q {
                &endpoints[..1]
            } else {
                &endpoints[..]
            };
            for &cell in endpoints {
                let mut next = self.state.clone();
                next.select_entanglement(cell as usize, chooser);
                self.children
                    .push(Self::child(next, chooser, Some(Move::new(cell, cell)), false));
            }
            return;
        }

        let mover = self.next_color();
        let mut empties = [0u8; reversi_rules::CELLS];
        let mut count = 0;
        let mut bits = board.empty_cells();
        while bits != 0 {
            empties[count] = bits.trailing_zeros() as u8;
            count += 1;
            bits &= bits - 1;
        }

        if count == 1 {
            // Forced placement on the last cell.
            let p = empties[0];
            let mut next = self.state.clone();
            next.select_entanglement(p as usize, mover);
            self.children
                .push(Self::child(next, mover, Some(Move::new(p, p)), true));
            return;
        }

        for i in 0..count {
            for j in (i + 1)..count {
                let (p, q) = (empties[i], empties[j]);
                if self.state.test_entanglement(p as usize, q as usize) {
                    // Placing here closes a cycle; the child's action is
                    // the collapse choice, the state is unchanged.
                    self.children.push(Self::child(
                        self.state.clone(),
                        mover,
                        Some(Move::new(p, q)),
                        true,
                    ));
                } else {
                    let mut next = self.state.clone();
                    next.put_quantum(p as usize, q as usize, mover);
                    self.children
                        .push(Self::child(next, mover, Some(Move::new(p, q)), false));
                }
            }
        }
    }

    /// Run one simulation through this subtree and return the outcome
    /// tally.
    ///
    /// Leaves are expanded the first time their playout count reaches the
    /// threshold; a leaf that stays childless (full board, or still below
    /// the threshold) is evaluated by `playouts_per_leaf` random playouts.
    /// Children with no statistics yet are visited in insertion order;
    /// after that, descent follows UCB1-Tuned with this node's own playout
    /// count as the total.
    pub fn update(&mut self, config: &SearchConfig) -> WinTally {
        if self.children.is_empty() && self.playouts == config.expand_threshold {
            self.expand();
        }

        let tally = if self.children.is_empty() {
            let mut tally = [0u32; 3];
            for _ in 0..config.playouts_per_leaf {
                tally[playout(&self.state).index()] += 1;
            }
            tally
        } else if let Some(unvisited) = self.children.iter_mut().find(|c| c.playouts == 0) {
            unvisited.update(config)
        } else {
            let total = self.playouts;
            let mut best = 0;
            let mut best_score = f64::NEG_INFINITY;
            for (i, child) in self.children.iter().enumerate() {
                let score = child.ucb_score(total);
                if score > best_score {
                    best_score = score;
                    best = i;
                }
            }
            self.children[best].update(config)
        };

        self.playouts += config.playouts_per_leaf;
        self.wins += tally[Winner::from(self.last_color).index()];
        tally
    }

    /// UCB1-Tuned score of this node, where `total_playouts` is the
    /// parent's playout count: `r + sqrt(x * min(1/4, r - r^2 + sqrt(2x)))`
    /// with `r` the empirical win rate and `x = ln(total) / n`.
    pub fn ucb_score(&self, total_playouts: u32) -> f64 {
        if self.playouts == 0 {
            return f64::INFINITY;
        }
        let n = f64::from(self.playouts);
        let r = f64::from(self.wins) / n;
        let x = f64::from(total_playouts).ln() / n;
        let y = 0.25f64.min(r - r * r + (2.0 * x).sqrt());
        r + (x * y).sqrt()
    }

    /// The child with the highest empirical win rate, ties resolved to the
    /// earliest-inserted child. UCB plays no part in the final pick.
    pub fn best_move(&self) -> Option<Move> {
        let mut best: Option<(Move, f64)> = None;
        for child in &self.children {
            if child.playouts == 0 {
                continue;
            }
            let rate = f64::from(child.wins) / f64::from(child.playouts);
            let improves = match best {
                Some((_, best_rate)) => rate > best_rate,
                None => true,
            };
            if improves {
                best = child.last_move.map(|m| (m, rate));
            }
        }
        best.map(|(m, _)| m)
    }

    pub fn playouts(&self) -> u32 {
        self.playouts
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn children(&self) -> &[SearchNode] {
        &self.children
    }
}
