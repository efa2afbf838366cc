//! Board connectivity graph with permanently severable edges.

use crate::game::{BOARD_SIZE, CELL_COUNT, Cell, Direction};
use std::collections::VecDeque;

/// Number of edges on a fully connected board.
pub const FULL_EDGE_COUNT: usize =
    2 * (BOARD_SIZE as usize) * (BOARD_SIZE as usize - 1);

/// Connectivity between orthogonally adjacent cells.
///
/// Every interior edge is present at setup. Edges can only ever be severed;
/// no operation re-adds one, so the edge set shrinks monotonically over the
/// life of a game. The representation is one direction bitmask per cell,
/// which makes the graph cheap to copy for speculative trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGraph {
    /// Present-edge bitmask per cell, one bit per [`Direction`].
    edges: [u8; CELL_COUNT],
}

/// Bit for a direction in the per-cell mask.
const fn dir_bit(dir: Direction) -> u8 {
    match dir {
        Direction::North => 1,
        Direction::East => 1 << 1,
        Direction::South => 1 << 2,
        Direction::West => 1 << 3,
    }
}

impl BoardGraph {
    /// Create a fully connected board graph.
    #[must_use]
    pub fn new() -> Self {
        let mut edges = [0u8; CELL_COUNT];
        for cell in Cell::all() {
            for dir in Direction::ALL {
                if cell.step(dir).is_some() {
                    edges[cell.index()] |= dir_bit(dir);
                }
            }
        }
        Self { edges }
    }

    /// Rebuild a graph from a fence list (each fence severs one edge).
    ///
    /// Fences that do not name an adjacent pair are ignored, matching the
    /// no-op contract of [`BoardGraph::sever_edge`].
    #[must_use]
    pub fn from_fences(fences: &[(Cell, Cell)]) -> Self {
        let mut graph = Self::new();
        for &(a, b) in fences {
            graph.sever_edge(a, b);
        }
        graph
    }

    /// Whether the edge between two cells is present.
    ///
    /// Returns `false` for non-adjacent pairs.
    #[must_use]
    pub fn has_edge(&self, a: Cell, b: Cell) -> bool {
        a.bearing_to(b)
            .is_some_and(|dir| self.edges[a.index()] & dir_bit(dir) != 0)
    }

    /// Permanently sever the edge between two cells.
    ///
    /// No-op if the cells are not adjacent or the edge is already severed.
    /// This is the only mutation the graph supports.
    pub fn sever_edge(&mut self, a: Cell, b: Cell) {
        if let Some(dir) = a.bearing_to(b) {
            self.edges[a.index()] &= !dir_bit(dir);
            self.edges[b.index()] &= !dir_bit(dir.opposite());
        }
    }

    /// Cells connected to `cell` by a present edge.
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid cells in indices `0..count`.
    #[must_use]
    pub fn neighbours(&self, cell: Cell) -> ([Cell; 4], u8) {
        let mut result = [Cell::new(0, 0); 4];
        let mut count = 0u8;
        let mask = self.edges[cell.index()];
        for dir in Direction::ALL {
            if mask & dir_bit(dir) != 0
                && let Some(n) = cell.step(dir)
            {
                result[count as usize] = n;
                count += 1;
            }
        }
        (result, count)
    }

    /// Number of present edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        // Each edge is recorded in both endpoint masks.
        self.edges
            .iter()
            .map(|mask| mask.count_ones() as usize)
            .sum::<usize>()
            / 2
    }

    /// Shortest path between two cells over present edges, ignoring
    /// occupancy.
    ///
    /// Returns the full cell sequence including both endpoints, or `None`
    /// when the cells are disconnected. Breadth-first, so the result is a
    /// shortest path; no guarantee is made about which shortest path.
    #[must_use]
    pub fn shortest_path(&self, from: Cell, to: Cell) -> Option<Vec<Cell>> {
        if from == to {
            return Some(vec![from]);
        }

        let mut prev: [Option<Cell>; CELL_COUNT] = [None; CELL_COUNT];
        let mut seen = [false; CELL_COUNT];
        seen[from.index()] = true;

        let mut queue = VecDeque::new();
        queue.push_back(from);

        while let Some(cur) = queue.pop_front() {
            let (adj, count) = self.neighbours(cur);
            for &next in &adj[..count as usize] {
                if seen[next.index()] {
                    continue;
                }
                seen[next.index()] = true;
                prev[next.index()] = Some(cur);
                if next == to {
                    // Walk the predecessor chain back to the origin.
                    let mut path = vec![to];
                    let mut walk = to;
                    while let Some(p) = prev[walk.index()] {
                        path.push(p);
                        walk = p;
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(next);
            }
        }

        None
    }
}

impl Default for BoardGraph {
    fn default() -> Self {
        Self::new()
    }
}
