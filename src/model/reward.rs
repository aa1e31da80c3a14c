//! Destination-attributed reward signal.

use log::warn;

use super::grid::GridModel;
use super::types::Cell;

/// Dense per-state reward, broadcast over every `(origin, action)` pair.
///
/// `R(origin, action, destination) = state_rewards[destination]`: reward
/// depends only on where a transition lands.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardModel {
    state_rewards: Vec<f64>,
}

impl RewardModel {
    /// Maps a sparse `(x, y) -> reward` list onto the grid's states.
    ///
    /// Cells without an entry get 0. Entries for cells that are not on the
    /// grid are skipped with a warning rather than rejected, because the
    /// calling layer can transiently submit cells that were just moved or
    /// removed. When a cell appears more than once the last entry wins.
    pub fn new(grid: &GridModel, reward_map: &[((i64, i64), f64)]) -> Self {
        let mut state_rewards = vec![0.0; grid.n_states()];
        for &((x, y), reward) in reward_map {
            let index = Cell::checked(x, y, grid.size())
                .ok()
                .and_then(|cell| grid.index_of(cell));
            match index {
                Some(i) => state_rewards[i] = reward,
                None => warn!("ignoring reward {} for off-grid cell ({}, {})", reward, x, y),
            }
        }
        Self { state_rewards }
    }

    /// Reward for the transition `origin --action--> destination`.
    pub fn reward(&self, _origin: usize, _action: usize, destination: usize) -> f64 {
        self.state_rewards[destination]
    }

    /// Per-state reward in canonical order.
    pub fn state_rewards(&self) -> &[f64] {
        &self.state_rewards
    }

    pub fn min_reward(&self) -> f64 {
        self.state_rewards
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    pub fn max_reward(&self) -> f64 {
        self.state_rewards
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
