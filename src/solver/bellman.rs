//! The one-step Bellman operator shared by both solvers.
//!
//! For every state `s` and action `a`:
//!
//! ```text
//! Q(s, a) = Σ_s' T(s, a, s') · (R(s, a, s') + γ · V(s'))
//! ```
//!
//! Transitions are deterministic, so the sum collapses to the single
//! reachable destination, or to 0 when that destination is blocked.

use crate::error::{ConfigurationError, Result};
use crate::model::grid::GridModel;
use crate::model::reward::RewardModel;
use crate::model::types::BlockedOrigin;

/// How a backup reduces `Q(s, ·)` to a single value per state.
#[derive(Debug, Clone, Copy)]
pub enum Reduce<'p> {
    /// `V(s) = max_a Q(s, a)`; the chosen action is the first argmax.
    Greedy,
    /// `V(s) = Q(s, policy[s])`.
    Policy(&'p [usize]),
}

/// Output of one backup sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Backup {
    pub values: Vec<f64>,
    /// Action index behind each new value: the argmax in greedy mode, the
    /// policy's action otherwise.
    pub actions: Vec<usize>,
}

/// Bellman backup operator bound to one problem.
#[derive(Debug, Clone, Copy)]
pub struct BellmanBackup<'a> {
    grid: &'a GridModel,
    rewards: &'a RewardModel,
    discount: f64,
    blocked_origin: BlockedOrigin,
}

impl<'a> BellmanBackup<'a> {
    /// Creates a backup operator.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::DiscountOutOfRange`] unless `0 <= discount <= 1`.
    /// A discount of exactly 1 is accepted but loses the contraction
    /// guarantee.
    pub fn new(
        grid: &'a GridModel,
        rewards: &'a RewardModel,
        discount: f64,
        blocked_origin: BlockedOrigin,
    ) -> Result<Self> {
        let discount = crate::model::check_discount(discount)?;
        Ok(Self::from_parts(grid, rewards, discount, blocked_origin))
    }

    pub(crate) fn from_parts(
        grid: &'a GridModel,
        rewards: &'a RewardModel,
        discount: f64,
        blocked_origin: BlockedOrigin,
    ) -> Self {
        Self {
            grid,
            rewards,
            discount,
            blocked_origin,
        }
    }

    pub fn grid(&self) -> &'a GridModel {
        self.grid
    }

    pub fn rewards(&self) -> &'a RewardModel {
        self.rewards
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// `Q(state, action)` under `values`.
    pub fn q_value(&self, values: &[f64], state: usize, action: usize) -> f64 {
        match self.grid.transitions().destination(state, action) {
            Some(next) => {
                self.rewards.reward(state, action, next) + self.discount * values[next]
            }
            None => 0.0,
        }
    }

    /// Best action for `state` and its Q-value. Ties go to the lowest index.
    pub fn best_action(&self, values: &[f64], state: usize) -> (usize, f64) {
        let mut best_a = 0;
        let mut best_q = f64::NEG_INFINITY;
        for a in 0..self.grid.n_actions() {
            let q = self.q_value(values, state, a);
            if q > best_q {
                best_q = q;
                best_a = a;
            }
        }
        (best_a, best_q)
    }

    /// Applies one backup sweep to `values`.
    ///
    /// The input is left untouched; the caller decides whether to commit the
    /// returned arrays.
    ///
    /// # Errors
    ///
    /// Fails if `values` (or the policy in [`Reduce::Policy`]) does not have
    /// one entry per state, or if a policy entry is not a valid action.
    pub fn step(&self, values: &[f64], reduce: Reduce<'_>) -> Result<Backup> {
        let n = self.grid.n_states();
        check_values(values, n)?;
        if let Reduce::Policy(policy) = reduce {
            check_policy(policy, n, self.grid.n_actions())?;
        }

        let mut new_values = Vec::with_capacity(n);
        let mut actions = Vec::with_capacity(n);
        for s in 0..n {
            let (a, v) = match reduce {
                Reduce::Greedy => self.best_action(values, s),
                Reduce::Policy(policy) => (policy[s], self.q_value(values, s, policy[s])),
            };
            let v = if self.blocked_origin == BlockedOrigin::Zeroed && self.grid.is_blocked(s) {
                0.0
            } else {
                v
            };
            new_values.push(v);
            actions.push(a);
        }

        Ok(Backup {
            values: new_values,
            actions,
        })
    }
}

/// Checks that `policy` has `n_states` entries, each below `n_actions`.
pub(crate) fn check_values(values: &[f64], n_states: usize) -> Result<()> {
    if values.len() != n_states {
        return Err(ConfigurationError::ValuesLengthMismatch {
            expected: n_states,
            actual: values.len(),
        });
    }
    if let Some((state, &value)) = values.iter().enumerate().find(|&(_, v)| !v.is_finite()) {
        return Err(ConfigurationError::NonFiniteValue { state, value });
    }
    Ok(())
}

pub(crate) fn check_policy(policy: &[usize], n_states: usize, n_actions: usize) -> Result<()> {
    if policy.len() != n_states {
        return Err(ConfigurationError::PolicyLengthMismatch {
            expected: n_states,
            actual: policy.len(),
        });
    }
    if let Some((state, &action)) = policy.iter().enumerate().find(|&(_, &a)| a >= n_actions) {
        return Err(ConfigurationError::InvalidAction {
            state,
            action,
            n_actions,
        });
    }
    Ok(())
}
