//! The static grid-world problem: states, actions, transitions, rewards.
//!
//! A [`GridProblem`] is immutable once built and can be shared by any number
//! of solver runs.

pub mod grid;
pub mod reward;
pub mod types;

pub use grid::{GridModel, TransitionRelation};
pub use reward::RewardModel;
pub use types::{Action, ActionSet, BlockedOrigin, Cell};

use crate::config::MdpConfig;
use crate::error::{ConfigurationError, Result};
use crate::solver::bellman::BellmanBackup;

/// Checks that a discount factor lies in `[0, 1]`. NaN is rejected.
pub(crate) fn check_discount(discount: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&discount) {
        Ok(discount)
    } else {
        Err(ConfigurationError::DiscountOutOfRange(discount))
    }
}

/// A fully specified grid-world MDP.
#[derive(Debug, Clone)]
pub struct GridProblem {
    grid: GridModel,
    rewards: RewardModel,
    discount: f64,
    blocked_origin: BlockedOrigin,
}

impl GridProblem {
    /// Bundles a grid and its rewards with a discount factor.
    pub fn new(
        grid: GridModel,
        rewards: RewardModel,
        discount: f64,
        blocked_origin: BlockedOrigin,
    ) -> Result<Self> {
        Ok(Self {
            grid,
            rewards,
            discount: check_discount(discount)?,
            blocked_origin,
        })
    }

    /// Builds the grid and reward models from raw coordinates.
    ///
    /// The action set and blocked-origin handling come from `config`.
    pub fn build(
        size: usize,
        blocked_cells: &[(i64, i64)],
        reward_map: &[((i64, i64), f64)],
        discount: f64,
        config: &MdpConfig,
    ) -> Result<Self> {
        let grid = GridModel::new(size, blocked_cells, config.action_set)?;
        let rewards = RewardModel::new(&grid, reward_map);
        Self::new(grid, rewards, discount, config.blocked_origin)
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn rewards(&self) -> &RewardModel {
        &self.rewards
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn blocked_origin(&self) -> BlockedOrigin {
        self.blocked_origin
    }

    pub fn n_states(&self) -> usize {
        self.grid.n_states()
    }

    pub fn n_actions(&self) -> usize {
        self.grid.n_actions()
    }

    /// The Bellman operator for this problem.
    pub fn backup(&self) -> BellmanBackup<'_> {
        BellmanBackup::from_parts(
            &self.grid,
            &self.rewards,
            self.discount,
            self.blocked_origin,
        )
    }
}
