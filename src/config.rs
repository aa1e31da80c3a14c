//! Configuration for the grid-world solvers.

use crate::error::Result;
use crate::model::types::{ActionSet, BlockedOrigin};

/// Solver and model configuration.
///
/// Controls iteration caps, the convergence threshold, and the two semantic
/// switches (action set, blocked-origin handling). The discount belongs to
/// the problem and is passed to [`crate::GridProblem::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct MdpConfig {
    // --- Iteration control ---
    /// Cap on value-iteration sweeps and policy-iteration outer rounds.
    pub max_iterations: usize,
    /// Convergence threshold on the Euclidean norm of a value update.
    pub epsilon: f64,
    /// Cap on sweeps within a single policy evaluation.
    pub evaluation_max_iterations: usize,

    // --- Model semantics ---
    /// Actions available in every state.
    pub action_set: ActionSet,
    /// Valuation of blocked cells as transition origins.
    pub blocked_origin: BlockedOrigin,

    // --- Initialization ---
    /// Seed for the random initial policy used when none is supplied.
    pub seed: u64,
}

impl MdpConfig {
    /// Checks the convergence threshold.
    pub fn validate(&self) -> Result<()> {
        crate::solver::check_epsilon(self.epsilon)?;
        Ok(())
    }
}

impl Default for MdpConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            epsilon: 1e-3,
            evaluation_max_iterations: 100,
            action_set: ActionSet::CardinalWithStay,
            blocked_origin: BlockedOrigin::Unrestricted,
            seed: 42,
        }
    }
}
