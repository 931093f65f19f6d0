// SPDX-License-Identifier: MIT OR Apache-2.0

//! Incremental stone-chain tracking and capture resolution
//!
//! The tracker maintains, per color, the disjoint sets of 4-connected
//! stones currently on the board. Chains are merged as stones are
//! placed, so liberty questions never need a board-wide flood fill.

use std::collections::{BTreeMap, HashSet};

use crate::{Board, Color};

/// A chain: 1-based board indices of 4-connected same-color stones.
pub type Chain = HashSet<usize>;

/// Per-color chain bookkeeping.
///
/// Invariants (violations are programming defects, not user errors):
/// the union of a color's chains equals exactly that color's cells on
/// the board, and no two chains of the same color are ever adjacent.
#[derive(Debug, Clone, Default)]
pub struct GroupTracker {
    chains: BTreeMap<Color, Vec<Chain>>,
}

impl GroupTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Chains currently owned by `color`.
    pub fn chains(&self, color: Color) -> &[Chain] {
        self.chains.get(&color).map_or(&[], Vec::as_slice)
    }

    /// The chain of `color` containing `index`, if any.
    pub fn chain_at(&self, color: Color, index: usize) -> Option<&Chain> {
        self.chains(color).iter().find(|c| c.contains(&index))
    }

    /// Number of stones `color` has on the board.
    pub fn stone_count(&self, color: Color) -> usize {
        self.chains(color).iter().map(Chain::len).sum()
    }

    /// Absorb a just-placed stone into the chain structure.
    ///
    /// Creates a singleton chain at `index`, then unions it with every
    /// same-color chain that touches one of the stone's neighbors.
    pub fn merge(&mut self, board: &Board, color: Color, index: usize) {
        debug_assert_eq!(board.get_index(index), color, "tracker out of sync with board");

        let mut merged: Chain = HashSet::from([index]);
        let own = self.chains.entry(color).or_default();
        for neighbor in board.neighbor_indices(index) {
            if let Some(pos) = own.iter().position(|c| c.contains(&neighbor)) {
                merged.extend(own.swap_remove(pos));
            }
        }
        own.push(merged);
    }

    /// Count the distinct empty cells adjacent to any member of `chain`.
    ///
    /// Shared liberties are counted once via a seen-set.
    pub fn liberties(board: &Board, chain: &Chain) -> usize {
        let mut seen = HashSet::new();
        for &index in chain {
            for neighbor in board.neighbor_indices(index) {
                if board.get_index(neighbor) == Color::Empty {
                    seen.insert(neighbor);
                }
            }
        }
        seen.len()
    }

    /// Resolve the board after a stone of `placed` landed at `index`.
    ///
    /// The placed stone is merged into its chain first; only then are
    /// the other colors' chains evaluated, so a move that fills an
    /// opponent's last liberty captures it even though the placement
    /// itself momentarily had no liberty. Every captured cell is set
    /// empty on the board and the chain is dropped. Zero-liberty chains
    /// are collected before any removal, so two opponent chains losing
    /// their last liberty to the same stone both die.
    ///
    /// Self-capture of the mover's own chain is left standing; rejecting
    /// it is the validity check's decision.
    ///
    /// Returns the captured indices in ascending order.
    pub fn after_move(&mut self, board: &mut Board, placed: Color, index: usize) -> Vec<usize> {
        self.merge(board, placed, index);

        let mut doomed: Vec<(Color, usize)> = Vec::new();
        for (&color, chains) in &self.chains {
            if color == placed {
                continue;
            }
            for (pos, chain) in chains.iter().enumerate() {
                if Self::liberties(board, chain) == 0 {
                    doomed.push((color, pos));
                }
            }
        }

        let mut captured = Vec::new();
        // remove back-to-front so earlier positions stay valid
        for (color, pos) in doomed.into_iter().rev() {
            let chain = self.chains.get_mut(&color).map(|cs| cs.remove(pos));
            if let Some(chain) = chain {
                for &idx in &chain {
                    debug_assert_eq!(board.get_index(idx), color, "captured cell not owned");
                    board.set_index(idx, Color::Empty);
                }
                captured.extend(chain);
            }
        }
        captured.sort_unstable();
        if !captured.is_empty() {
            tracing::debug!(count = captured.len(), %placed, "stones captured");
        }
        captured
    }
}
