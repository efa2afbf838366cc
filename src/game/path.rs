//! Constrained path finding for piece movement.
//!
//! A movement path must be a straight line or an "L" with exactly one
//! direction change, every consecutive pair of cells must be joined by a
//! present edge, and every cell after the origin must be unoccupied.

use crate::game::{Board, BoardGraph, Cell, Direction};

/// Number of direction changes along a cell sequence.
#[must_use]
pub fn direction_changes(path: &[Cell]) -> usize {
    let mut changes = 0;
    let mut last: Option<Direction> = None;
    for pair in path.windows(2) {
        let Some(dir) = pair[0].bearing_to(pair[1]) else {
            continue;
        };
        if let Some(prev) = last
            && prev != dir
        {
            changes += 1;
        }
        last = Some(dir);
    }
    changes
}

/// Find a legal movement path from `from` to `to`, or `None`.
///
/// Two construction strategies are tried in order, as the movement shape
/// demands at most one bend:
///
/// 1. Direct ray casting: a straight ray when the cells share a file or
///    rank, otherwise the two L-shaped candidates built by intersecting a
///    ray from `from` with a reverse ray from `to`. A candidate survives
///    only if every edge along it is present.
/// 2. Fallback: a plain shortest path over the graph, rejected unless it
///    independently satisfies the one-bend constraint.
///
/// Whatever strategy produced the path, every cell after the origin must be
/// unoccupied. Pure query; nothing is mutated.
#[must_use]
pub fn find_path(graph: &BoardGraph, board: &Board, from: Cell, to: Cell) -> Option<Vec<Cell>> {
    if from == to {
        return None;
    }

    let path = ray_path(graph, from, to).or_else(|| graph.shortest_path(from, to))?;

    if direction_changes(&path) > 1 {
        return None;
    }
    if !path[1..].iter().all(|&cell| board.is_empty(cell)) {
        return None;
    }
    Some(path)
}

/// Direct straight-or-L construction via ray casting.
///
/// Returns `None` when no candidate has all of its edges present; the
/// caller then falls back to a general shortest path.
fn ray_path(graph: &BoardGraph, from: Cell, to: Cell) -> Option<Vec<Cell>> {
    let mut dirs = Vec::with_capacity(2);
    if to.col > from.col {
        dirs.push(Direction::East);
    } else if to.col < from.col {
        dirs.push(Direction::West);
    }
    if to.row > from.row {
        dirs.push(Direction::North);
    } else if to.row < from.row {
        dirs.push(Direction::South);
    }

    match dirs.as_slice() {
        // Shared file or rank: a single straight ray.
        &[dir] => {
            let ray = from.ray(dir);
            let end = ray.iter().position(|&c| c == to)?;
            let mut path = vec![from];
            path.extend_from_slice(&ray[..=end]);
            edges_present(graph, &path).then_some(path)
        }
        // Distinct file and rank: try both bend orders.
        &[first, second] => {
            for pair in [[first, second], [second, first]] {
                // A ray out of `from` and a reverse ray out of `to` cross
                // in exactly one cell, the corner of this L.
                let ray1 = from.ray(pair[0]);
                let ray2 = to.ray(pair[1].opposite());
                let corner = *ray1.iter().find(|c| ray2.contains(c))?;

                let leg1 = ray1.iter().copied().take_while(|&c| c != corner);
                let leg2 = ray2.iter().copied().take_while(|&c| c != corner);

                let mut path = vec![from];
                path.extend(leg1);
                path.push(corner);
                let mut tail: Vec<Cell> = leg2.collect();
                tail.reverse();
                path.extend(tail);
                path.push(to);

                if edges_present(graph, &path) {
                    return Some(path);
                }
            }
            None
        }
        _ => None,
    }
}

/// Whether every consecutive pair along the path is joined by a present edge.
fn edges_present(graph: &BoardGraph, path: &[Cell]) -> bool {
    path.windows(2).all(|pair| graph.has_edge(pair[0], pair[1]))
}
