//! Dynamic-programming solvers for the grid-world MDP.
//!
//! Both solvers consume an immutable [`GridProblem`] and own a mutable
//! [`Solution`] (values + policy) for the duration of one invocation. Nothing
//! is retained between invocations: callers persist the returned solution
//! and hand it back as a warm start.

pub mod bellman;
pub mod derived;
pub mod policy_iteration;
pub mod value_iteration;

#[cfg(test)]
mod tests;

pub use bellman::{Backup, BellmanBackup, Reduce};
pub use derived::{as_grid, policy_actions, total_reward};
pub use policy_iteration::PolicyIteration;
pub use value_iteration::{Phase, ValueIteration};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::model::GridProblem;

/// Terminal status of an iterative solve.
///
/// Reaching the iteration cap is not a failure: the best current estimate is
/// kept and this flag reports that it may not be a fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Status {
    Converged,
    MaxIterationsReached,
}

impl Status {
    pub fn is_converged(&self) -> bool {
        matches!(self, Status::Converged)
    }
}

/// A value function and a policy, one entry per state in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub values: Vec<f64>,
    /// Action index per state, into the problem's action set.
    pub policy: Vec<usize>,
}

impl Solution {
    /// Zero values and an all-zero-action policy.
    pub fn zeros(problem: &GridProblem) -> Self {
        Self {
            values: vec![0.0; problem.n_states()],
            policy: vec![0; problem.n_states()],
        }
    }

    /// Zero values and a uniformly random policy drawn from `seed`.
    pub fn random(problem: &GridProblem, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let n_actions = problem.n_actions();
        Self {
            values: vec![0.0; problem.n_states()],
            policy: (0..problem.n_states())
                .map(|_| rng.gen_range(0..n_actions))
                .collect(),
        }
    }

    /// Builds a starting point from optional caller-supplied arrays.
    ///
    /// Missing values default to zeros, a missing policy to a random one
    /// drawn from `seed`.
    ///
    /// # Errors
    ///
    /// Length mismatches against the problem's state count, values that
    /// are NaN or infinite, and policy entries that are not valid action
    /// indices.
    pub fn warm_start(
        problem: &GridProblem,
        values: Option<Vec<f64>>,
        policy: Option<Vec<usize>>,
        seed: u64,
    ) -> Result<Self> {
        let mut start = Self::random(problem, seed);
        if let Some(values) = values {
            start.values = values;
        }
        if let Some(policy) = policy {
            start.policy = policy;
        }
        start.check(problem)?;
        Ok(start)
    }

    pub(crate) fn check(&self, problem: &GridProblem) -> Result<()> {
        let n = problem.n_states();
        bellman::check_values(&self.values, n)?;
        bellman::check_policy(&self.policy, n, problem.n_actions())
    }
}

/// Euclidean norm of `a - b`.
pub(crate) fn diff_norm(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

pub(crate) fn check_epsilon(epsilon: f64) -> Result<f64> {
    if epsilon.is_finite() && epsilon > 0.0 {
        Ok(epsilon)
    } else {
        Err(ConfigurationError::InvalidEpsilon(epsilon))
    }
}
