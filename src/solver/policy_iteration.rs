//! Policy iteration: fixed-policy evaluation alternated with greedy
//! improvement until the policy stops changing.

use log::{debug, trace};

use super::bellman::{BellmanBackup, Reduce};
use super::{check_epsilon, diff_norm, Solution, Status};
use crate::error::Result;
use crate::model::GridProblem;

const DEFAULT_EVALUATION_ITERATIONS: usize = 100;
const DEFAULT_EVALUATION_EPSILON: f64 = 1e-3;

/// Policy-iteration solver over one problem.
#[derive(Debug)]
pub struct PolicyIteration<'a> {
    backup: BellmanBackup<'a>,
    values: Vec<f64>,
    policy: Vec<usize>,
    evaluation_max_iterations: usize,
    evaluation_epsilon: f64,
    deltas: Vec<f64>,
}

impl<'a> PolicyIteration<'a> {
    /// Creates a solver starting from `start`.
    ///
    /// Each evaluation inside [`PolicyIteration::run`] is capped at 100
    /// sweeps with a threshold of `1e-3` unless overridden through
    /// [`PolicyIteration::with_evaluation`].
    pub fn new(problem: &'a GridProblem, start: Solution) -> Result<Self> {
        start.check(problem)?;
        Ok(Self {
            backup: problem.backup(),
            values: start.values,
            policy: start.policy,
            evaluation_max_iterations: DEFAULT_EVALUATION_ITERATIONS,
            evaluation_epsilon: DEFAULT_EVALUATION_EPSILON,
            deltas: Vec::new(),
        })
    }

    /// Sets the evaluation limits used by [`PolicyIteration::run`].
    pub fn with_evaluation(mut self, max_iterations: usize, epsilon: f64) -> Result<Self> {
        self.evaluation_max_iterations = max_iterations;
        self.evaluation_epsilon = check_epsilon(epsilon)?;
        Ok(self)
    }

    /// Applies one backup under the current policy and commits the values.
    ///
    /// Returns the Euclidean norm of the change.
    pub fn evaluation_step(&mut self) -> Result<f64> {
        let next = self.backup.step(&self.values, Reduce::Policy(&self.policy))?;
        let delta = diff_norm(&next.values, &self.values);
        self.values = next.values;
        self.deltas.push(delta);
        Ok(delta)
    }

    /// Evaluates the current policy: repeated fixed-policy backups until a
    /// sweep changes the values by less than `epsilon` or `max_iterations`
    /// sweeps have run.
    pub fn evaluate(&mut self, max_iterations: usize, epsilon: f64) -> Result<Status> {
        let epsilon = check_epsilon(epsilon)?;
        for i in 0..max_iterations {
            let delta = self.evaluation_step()?;
            trace!("policy evaluation sweep {}: delta {}", i + 1, delta);
            if delta < epsilon {
                return Ok(Status::Converged);
            }
        }
        Ok(Status::MaxIterationsReached)
    }

    /// Replaces the policy with the greedy policy for the current values.
    ///
    /// Returns `true` when the new policy is identical to the old one.
    pub fn improve(&mut self) -> Result<bool> {
        let greedy = self.backup.step(&self.values, Reduce::Greedy)?.actions;
        let stable = greedy == self.policy;
        self.policy = greedy;
        Ok(stable)
    }

    /// Alternates evaluation and improvement until the policy is stable or
    /// `max_rounds` rounds have run.
    pub fn run(&mut self, max_rounds: usize) -> Result<Status> {
        let mut status = Status::MaxIterationsReached;
        let mut rounds = 0;
        while rounds < max_rounds {
            rounds += 1;
            let evaluation =
                self.evaluate(self.evaluation_max_iterations, self.evaluation_epsilon)?;
            let stable = self.improve()?;
            trace!(
                "policy iteration round {}: evaluation {:?}, stable {}",
                rounds,
                evaluation,
                stable
            );
            if stable {
                status = Status::Converged;
                break;
            }
        }
        debug!("policy iteration finished: {:?} after {} rounds", status, rounds);
        Ok(status)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn policy(&self) -> &[usize] {
        &self.policy
    }

    /// Norm of the change applied by each evaluation sweep so far.
    pub fn deltas(&self) -> &[f64] {
        &self.deltas
    }

    pub fn into_solution(self) -> Solution {
        Solution {
            values: self.values,
            policy: self.policy,
        }
    }
}
