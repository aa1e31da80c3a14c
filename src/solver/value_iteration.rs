//! Value iteration: greedy Bellman backups to a fixed point.

use log::{debug, trace};

use super::bellman::{BellmanBackup, Reduce};
use super::{check_epsilon, diff_norm, Solution, Status};
use crate::error::Result;
use crate::model::GridProblem;

/// Lifecycle of a [`ValueIteration`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No backup applied yet.
    Idle,
    /// At least one backup applied, no terminal status reached.
    Iterating,
    Converged,
    MaxIterationsReached,
}

/// Value-iteration solver over one problem.
///
/// # Lifecycle
///
/// 1. Build with [`ValueIteration::new`] from a problem and a starting
///    [`Solution`].
/// 2. Either call [`ValueIteration::run`], or drive it one sweep at a time
///    with [`ValueIteration::step_once`] and finish with
///    [`ValueIteration::extract_policy`].
/// 3. Take the result with [`ValueIteration::into_solution`].
#[derive(Debug)]
pub struct ValueIteration<'a> {
    backup: BellmanBackup<'a>,
    values: Vec<f64>,
    policy: Vec<usize>,
    phase: Phase,
    deltas: Vec<f64>,
}

impl<'a> ValueIteration<'a> {
    /// Creates a solver starting from `start`.
    pub fn new(problem: &'a GridProblem, start: Solution) -> Result<Self> {
        start.check(problem)?;
        Ok(Self {
            backup: problem.backup(),
            values: start.values,
            policy: start.policy,
            phase: Phase::Idle,
            deltas: Vec::new(),
        })
    }

    /// Applies one greedy backup and commits the new values.
    ///
    /// Returns the Euclidean norm of the change. The policy is left as is;
    /// call [`ValueIteration::extract_policy`] to refresh it.
    pub fn step_once(&mut self) -> Result<f64> {
        let next = self.backup.step(&self.values, Reduce::Greedy)?;
        let delta = diff_norm(&next.values, &self.values);
        self.values = next.values;
        self.deltas.push(delta);
        self.phase = Phase::Iterating;
        trace!("value iteration sweep {}: delta {}", self.deltas.len(), delta);
        Ok(delta)
    }

    /// Iterates until a sweep changes the values by less than `epsilon`, or
    /// `max_iterations` sweeps have run, then extracts the greedy policy.
    ///
    /// Hitting the cap yields [`Status::MaxIterationsReached`] with the best
    /// current estimate in place.
    pub fn run(&mut self, max_iterations: usize, epsilon: f64) -> Result<Status> {
        let epsilon = check_epsilon(epsilon)?;
        let mut status = Status::MaxIterationsReached;
        for _ in 0..max_iterations {
            if self.step_once()? < epsilon {
                status = Status::Converged;
                break;
            }
        }
        self.extract_policy()?;
        self.phase = match status {
            Status::Converged => Phase::Converged,
            Status::MaxIterationsReached => Phase::MaxIterationsReached,
        };
        debug!(
            "value iteration finished: {:?} after {} sweeps (last delta {:?})",
            status,
            self.deltas.len(),
            self.deltas.last()
        );
        Ok(status)
    }

    /// Replaces the policy with the greedy policy for the current values.
    pub fn extract_policy(&mut self) -> Result<()> {
        self.policy = self.backup.step(&self.values, Reduce::Greedy)?.actions;
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn policy(&self) -> &[usize] {
        &self.policy
    }

    /// Norm of the change applied by each sweep so far.
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
