//! Random playouts: complete a game from any state and report the winner.
//!
//! This is the hot inner loop of the search. The quantum state is flattened
//! once into a mutable working set (stone bitmaps, an adjacency mask per
//! cell, a bounded edge window, a component label per cell), then moves are
//! played at random until step 36.
//!
//! The working set is deliberately not rebuilt after a collapse. Occupied
//! cells can never be picked again, so stale adjacency bits and component
//! labels are unreachable; edges outside the collapsed component survive
//! through the equal-distance rule below.

use reversi_rules::{Color, Edge, State, Winner, CELLS, FULL_MASK};

use crate::rng;

/// Play random moves from `root` until the board is full and return the
/// winner by stone count.
///
/// Each step picks two distinct empty cells uniformly. If they are in the
/// same component the pick closes a cycle and collapses it: one endpoint is
/// chosen as the anchor at random and placed with the mover's color, then
/// every edge is resolved newest-first by BFS distance from the anchor; the
/// endpoint farther from the anchor is placed with the edge's color. Edges
/// whose endpoints are equidistant (both unreachable, or on the same BFS
/// layer of a ring) are kept. Otherwise the pick becomes a new edge and the
/// two components merge.
pub fn playout(root: &State) -> Winner {
    let mut board = *root.classic_board();
    let mut step = root.step();

    // Adjacency mask per cell and the edge window.
    let mut graph = [0u64; CELLS];
    let mut edges = [Edge {
        u: 0,
        v: 0,
        color: Color::White,
    }; CELLS];
    let mut edges_head = 0usize;
    let mut edges_tail = 0usize;
    for &e in root.edges() {
        edges[edges_tail] = e;
        edges_tail += 1;
        graph[e.u as usize] |= 1u64 << e.v;
        graph[e.v as usize] |= 1u64 << e.u;
    }

    // Label every cell with a representative of its component.
    let mut group: [usize; CELLS] = std::array::from_fn(|i| i);
    let mut queue = [0usize; CELLS];
    for i in 0..CELLS {
        if group[i] != i {
            continue;
        }
        let mut head = 0;
        let mut tail = 0;
        queue[head] = i;
        head += 1;
        while tail < head {
            let u = queue[tail];
            tail += 1;
            let mut bits = graph[u];
            while bits != 0 {
                let v = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                if v != i && group[v] != i {
                    group[v] = i;
                    queue[head] = v;
                    head += 1;
                }
            }
        }
    }

    while step < CELLS {
        let color = Color::from_step(step);

        let unused = FULL_MASK & !board.occupied();
        let mut plist = [0usize; CELLS];
        let mut pcount = 0;
        let mut bits = unused;
        while bits != 0 {
            plist[pcount] = bits.trailing_zeros() as usize;
            pcount += 1;
            bits &= bits - 1;
        }

        // Final cell: a trivial one-cell collapse.
        if pcount == 1 {
            board.put(plist[0], color);
            step += 1;
            continue;
        }

        let k0 = rng::bounded(pcount as u32) as usize;
        let k1 = rng::bounded(pcount as u32 - 1) as usize;
        let p = plist[k0];
        let q = plist[k1 + usize::from(k1 >= k0)];

        if group[p] == group[q] {
            // The pick closes a cycle: collapse around a random anchor.
            let anchor = if rng::bounded(2) != 0 { p } else { q };

            let mut dist = [CELLS; CELLS];
            let mut head = 0;
            let mut tail = 0;
            queue[head] = anchor;
            head += 1;
            dist[anchor] = 0;
            while tail < head {
                let u = queue[tail];
                tail += 1;
                let mut bits = graph[u];
                while bits != 0 {
                    let v = bits.trailing_zeros() as usize;
                    bits &= bits - 1;
                    if dist[v] == CELLS {
                        dist[v] = dist[u] + 1;
                        queue[head] = v;
                        head += 1;
                    }
                }
            }

            let before_head = edges_head;
            edges_head = edges_tail;
            board.put(anchor, color);
            let mut i = edges_tail;
            while i > before_head {
                i -= 1;
                let e = edges[i];
                let du = dist[e.u as usize];
                let dv = dist[e.v as usize];
                if du < dv {
                    board.put(e.v as usize, e.color);
                } else if du > dv {
                    board.put(e.u as usize, e.color);
                } else {
                    edges_head -= 1;
                    edges[edges_head] = e;
                }
            }
        } else {
            // New superposition pair; merge the two components.
            edges[edges_tail] = Edge {
                u: p as u8,
                v: q as u8,
                color,
            };
            edges_tail += 1;
            graph[p] |= 1u64 << q;
            graph[q] |= 1u64 << p;
            let gp = group[p];
            let gq = group[q];
            for label in group.iter_mut() {
                if *label == gq {
                    *label = gp;
                }
            }
        }
        step += 1;
    }

    Winner::from_board(&board)
}
