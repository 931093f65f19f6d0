// SPDX-License-Identifier: MIT OR Apache-2.0

//! Area scoring: stones owned plus enclosed empty territory
//!
//! Territory is computed by flood-filling every maximal empty region of
//! the board exactly once. A region counts toward a color iff every
//! stone bordering the region is of that color; regions with mixed
//! borders (or an all-empty board) score for nobody.

use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::{Board, Color, GroupTracker};

/// Score of `color`: stone count plus enclosed territory.
pub fn score(board: &Board, tracker: &GroupTracker, color: Color) -> i32 {
    let territory = territories(board).remove(&color).unwrap_or(0);
    (tracker.stone_count(color) + territory) as i32
}

/// Territory of every color in one pass over the board.
///
/// The visited-set is shared across regions, so the total work is
/// O(size^2) regardless of how fragmented the empty area is.
pub fn territories(board: &Board) -> BTreeMap<Color, usize> {
    let mut result = BTreeMap::new();
    let mut seen = HashSet::new();

    for start in board.indices() {
        if board.get_index(start) != Color::Empty || seen.contains(&start) {
            continue;
        }
        let (region, borders) = region_and_borders(board, start, &mut seen);
        if borders.len() == 1 {
            if let Some(&owner) = borders.iter().next() {
                *result.entry(owner).or_insert(0) += region;
            }
        }
    }
    result
}

/// BFS over one empty region; returns (region size, bordering colors).
fn region_and_borders(
    board: &Board,
    start: usize,
    global_seen: &mut HashSet<usize>,
) -> (usize, HashSet<Color>) {
    let mut queue = VecDeque::from([start]);
    let mut region = 1;
    let mut borders = HashSet::new();
    global_seen.insert(start);

    while let Some(index) = queue.pop_front() {
        for neighbor in board.neighbor_indices(index) {
            match board.get_index(neighbor) {
                Color::Empty => {
                    if global_seen.insert(neighbor) {
                        region += 1;
                        queue.push_back(neighbor);
                    }
                }
                color => {
                    borders.insert(color);
                }
            }
        }
    }
    (region, borders)
}
