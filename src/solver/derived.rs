//! Per-state quantities derived from a solution, for display layers.

use crate::error::{ConfigurationError, Result};
use crate::model::types::Action;
use crate::model::{GridModel, GridProblem};

/// One-step lookahead value under the best action:
/// `R(s, a*, s') + γ · V(s')` where `s'` is the destination of `a*`.
///
/// This is not the value function itself: before convergence it differs
/// from `values`, which lets a renderer color cells by reward-aware value.
pub fn total_reward(problem: &GridProblem, values: &[f64]) -> Result<Vec<f64>> {
    let n = problem.n_states();
    if values.len() != n {
        return Err(ConfigurationError::ValuesLengthMismatch {
            expected: n,
            actual: values.len(),
        });
    }
    let backup = problem.backup();
    Ok((0..n).map(|s| backup.best_action(values, s).1).collect())
}

/// Lays a per-state vector out as `grid[x][y]`.
pub fn as_grid<T: Clone>(grid: &GridModel, per_state: &[T]) -> Vec<Vec<T>> {
    per_state
        .chunks(grid.size())
        .map(|column| column.to_vec())
        .collect()
}

/// Resolves policy indices into actions.
///
/// Out-of-range indices map to `None`.
pub fn policy_actions(grid: &GridModel, policy: &[usize]) -> Vec<Option<Action>> {
    policy
        .iter()
        .map(|&a| grid.actions().get(a).copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MdpConfig;
    use crate::model::types::Cell;

    fn problem() -> GridProblem {
        GridProblem::build(2, &[], &[((1, 1), 1.0)], 0.5, &MdpConfig::default()).unwrap()
    }

    #[test]
    fn total_reward_is_one_step_lookahead() {
        let problem = problem();
        let values = vec![0.0, 0.0, 0.0, 0.0];
        // Zero values: only the immediate reward of the best move counts.
        assert_eq!(
            total_reward(&problem, &values).unwrap(),
            vec![0.0, 1.0, 1.0, 1.0]
        );

        let values = vec![1.0, 2.0, 2.0, 2.0];
        assert_eq!(
            total_reward(&problem, &values).unwrap(),
            vec![1.0, 2.0, 2.0, 2.0]
        );
    }

    #[test]
    fn total_reward_checks_length() {
        assert!(total_reward(&problem(), &[0.0; 3]).is_err());
    }

    #[test]
    fn grid_layout_is_x_major() {
        let problem = problem();
        let grid = as_grid(problem.grid(), &[0, 1, 2, 3]);
        assert_eq!(grid, vec![vec![0, 1], vec![2, 3]]);
        let cell = Cell::new(1, 0);
        assert_eq!(grid[cell.x][cell.y], 2);
    }

    #[test]
    fn policy_resolves_to_actions() {
        let problem = problem();
        assert_eq!(
            policy_actions(problem.grid(), &[0, 4, 9]),
            vec![Some(Action::Left), Some(Action::Stay), None]
        );
    }
}
