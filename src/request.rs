//! Stateless request/response surface for a grid-world front end.
//!
//! Each handler rebuilds the problem from a [`GridWorldRequest`], applies one
//! solver operation to the submitted (or default) values and policy, and
//! returns the updated arrays. Callers persist the output and submit it again
//! with the next request.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::MdpConfig;
use crate::error::Result;
use crate::model::GridProblem;
use crate::solver::{total_reward, PolicyIteration, Solution, Status, ValueIteration};

/// One submitted grid world.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridWorldRequest {
    pub size: usize,
    /// Sparse `[[x, y], reward]` pairs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub state_rewards: Vec<([i64; 2], f64)>,
    /// `[x, y]` cells that cannot be entered.
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocked_states: Vec<[i64; 2]>,
    pub discount: f64,
    /// Warm-start values; zeros when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub values: Option<Vec<f64>>,
    /// Warm-start policy; random when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub policy: Option<Vec<usize>>,
}

/// Values and policy after a solver operation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverOutput {
    pub values: Vec<f64>,
    pub policy: Vec<usize>,
    /// One-step lookahead values for reward-aware display.
    pub total_rewards: Vec<f64>,
    /// Terminal status for iterative operations, `None` for single steps.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<Status>,
    /// Whether a policy improvement left the submitted policy unchanged.
    /// `None` for other operations and when no policy was submitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stable: Option<bool>,
}

impl GridWorldRequest {
    /// Builds the static problem described by this request, with the
    /// request's discount.
    pub fn problem(&self, config: &MdpConfig) -> Result<GridProblem> {
        let blocked: Vec<(i64, i64)> = self.blocked_states.iter().map(|&[x, y]| (x, y)).collect();
        let rewards: Vec<((i64, i64), f64)> = self
            .state_rewards
            .iter()
            .map(|&([x, y], r)| ((x, y), r))
            .collect();
        GridProblem::build(self.size, &blocked, &rewards, self.discount, config)
    }

    /// Starting values and policy, from the request or the defaults.
    pub fn start(&self, problem: &GridProblem, config: &MdpConfig) -> Result<Solution> {
        Solution::warm_start(
            problem,
            self.values.clone(),
            self.policy.clone(),
            config.seed,
        )
    }

    fn prepare(&self, config: &MdpConfig) -> Result<(GridProblem, Solution)> {
        config.validate()?;
        let problem = self.problem(config)?;
        let start = self.start(&problem, config)?;
        Ok((problem, start))
    }
}

fn output(
    problem: &GridProblem,
    solution: Solution,
    status: Option<Status>,
    stable: Option<bool>,
) -> Result<SolverOutput> {
    let total_rewards = total_reward(problem, &solution.values)?;
    Ok(SolverOutput {
        values: solution.values,
        policy: solution.policy,
        total_rewards,
        status,
        stable,
    })
}

/// One greedy backup followed by greedy policy extraction.
pub fn value_iteration_step(
    request: &GridWorldRequest,
    config: &MdpConfig,
) -> Result<SolverOutput> {
    let (problem, start) = request.prepare(config)?;
    let mut vi = ValueIteration::new(&problem, start)?;
    vi.step_once()?;
    vi.extract_policy()?;
    output(&problem, vi.into_solution(), None, None)
}

/// Value iteration to convergence or `config.max_iterations`.
pub fn value_iteration(request: &GridWorldRequest, config: &MdpConfig) -> Result<SolverOutput> {
    let (problem, start) = request.prepare(config)?;
    let mut vi = ValueIteration::new(&problem, start)?;
    let status = vi.run(config.max_iterations, config.epsilon)?;
    output(&problem, vi.into_solution(), Some(status), None)
}

/// One backup under the submitted policy.
pub fn policy_evaluation_step(
    request: &GridWorldRequest,
    config: &MdpConfig,
) -> Result<SolverOutput> {
    let (problem, start) = request.prepare(config)?;
    let mut pi = PolicyIteration::new(&problem, start)?;
    pi.evaluation_step()?;
    output(&problem, pi.into_solution(), None, None)
}

/// Evaluation of the submitted policy to convergence or
/// `config.evaluation_max_iterations`.
pub fn policy_evaluation(request: &GridWorldRequest, config: &MdpConfig) -> Result<SolverOutput> {
    let (problem, start) = request.prepare(config)?;
    let mut pi = PolicyIteration::new(&problem, start)?;
    let status = pi.evaluate(config.evaluation_max_iterations, config.epsilon)?;
    output(&problem, pi.into_solution(), Some(status), None)
}

/// One greedy improvement of the submitted policy.
///
/// Stability is only reported against a submitted policy; comparing with the
/// seeded random fallback would say nothing about the caller's policy.
pub fn policy_improvement(request: &GridWorldRequest, config: &MdpConfig) -> Result<SolverOutput> {
    let (problem, start) = request.prepare(config)?;
    let mut pi = PolicyIteration::new(&problem, start)?;
    let stable = pi.improve()?;
    let stable = request.policy.is_some().then_some(stable);
    output(&problem, pi.into_solution(), None, stable)
}

/// Full policy iteration, capped at `config.max_iterations` rounds.
pub fn policy_iteration(request: &GridWorldRequest, config: &MdpConfig) -> Result<SolverOutput> {
    let (problem, start) = request.prepare(config)?;
    let mut pi = PolicyIteration::new(&problem, start)?
        .with_evaluation(config.evaluation_max_iterations, config.epsilon)?;
    let status = pi.run(config.max_iterations)?;
    output(&problem, pi.into_solution(), Some(status), None)
}
