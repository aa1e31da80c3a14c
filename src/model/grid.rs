//! State enumeration, action set, and the deterministic transition relation.

use std::collections::HashSet;

use super::types::{Action, ActionSet, Cell};
use crate::error::{ConfigurationError, Result};

/// Sparse deterministic transition relation.
///
/// Stores one entry per `(state, action)` pair, laid out row-major by state:
/// `destinations[state * n_actions + action]`. An entry is `None` when the
/// clipped destination is blocked, which is the same as a zero row in the
/// dense `T(s, a, s')` tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRelation {
    n_actions: usize,
    destinations: Vec<Option<usize>>,
}

impl TransitionRelation {
    /// Destination index reached from `state` under `action`, if reachable.
    pub fn destination(&self, state: usize, action: usize) -> Option<usize> {
        self.destinations[state * self.n_actions + action]
    }

    /// Dense view: `T(state, action, next)`, either 1.0 or 0.0.
    pub fn weight(&self, state: usize, action: usize, next: usize) -> f64 {
        match self.destination(state, action) {
            Some(d) if d == next => 1.0,
            _ => 0.0,
        }
    }

    pub fn n_actions(&self) -> usize {
        self.n_actions
    }
}

/// An N×N grid world with optional blocked cells.
///
/// States are enumerated row-major over `x` then `y`, so state index
/// `i = x * size + y`. Every other component relies on this bijection.
#[derive(Debug, Clone)]
pub struct GridModel {
    size: usize,
    action_set: ActionSet,
    states: Vec<Cell>,
    blocked: Vec<bool>,
    transitions: TransitionRelation,
}

impl GridModel {
    /// Builds the grid, its blocked mask, and the transition relation.
    ///
    /// # Arguments
    ///
    /// * `size` - Side length N, must be positive
    /// * `blocked_cells` - Raw `(x, y)` coordinates of impassable cells
    /// * `action_set` - Actions available in every state
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::InvalidSize`] for `size == 0`, and
    /// [`ConfigurationError::CellOutOfRange`] for any blocked cell off the grid.
    pub fn new(size: usize, blocked_cells: &[(i64, i64)], action_set: ActionSet) -> Result<Self> {
        if size == 0 {
            return Err(ConfigurationError::InvalidSize(size));
        }

        let blocked_set = blocked_cells
            .iter()
            .map(|&(x, y)| Cell::checked(x, y, size))
            .collect::<Result<HashSet<_>>>()?;

        let states: Vec<Cell> = (0..size)
            .flat_map(|x| (0..size).map(move |y| Cell::new(x, y)))
            .collect();
        let blocked: Vec<bool> = states.iter().map(|c| blocked_set.contains(c)).collect();

        let actions = action_set.actions();
        let mut destinations = Vec::with_capacity(states.len() * actions.len());
        for cell in &states {
            for &action in actions {
                let next = cell.shifted(action, size);
                let index = next.x * size + next.y;
                destinations.push(if blocked[index] { None } else { Some(index) });
            }
        }

        Ok(Self {
            size,
            action_set,
            states,
            blocked,
            transitions: TransitionRelation {
                n_actions: actions.len(),
                destinations,
            },
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// All cells in canonical order.
    pub fn states(&self) -> &[Cell] {
        &self.states
    }

    pub fn n_states(&self) -> usize {
        self.states.len()
    }

    pub fn actions(&self) -> &'static [Action] {
        self.action_set.actions()
    }

    pub fn n_actions(&self) -> usize {
        self.action_set.len()
    }

    pub fn action_set(&self) -> ActionSet {
        self.action_set
    }

    /// Per-state blocked mask in canonical order.
    pub fn blocked_mask(&self) -> &[bool] {
        &self.blocked
    }

    pub fn is_blocked(&self, state: usize) -> bool {
        self.blocked[state]
    }

    pub fn transitions(&self) -> &TransitionRelation {
        &self.transitions
    }

    /// Canonical index of `cell`, or `None` if it is off the grid.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        (cell.x < self.size && cell.y < self.size).then(|| cell.x * self.size + cell.y)
    }

    pub fn cell(&self, state: usize) -> Cell {
        self.states[state]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_size() {
        let err = GridModel::new(0, &[], ActionSet::Cardinal).unwrap_err();
        assert_eq!(err, ConfigurationError::InvalidSize(0));
    }

    #[test]
    fn rejects_blocked_cell_off_grid() {
        let err = GridModel::new(3, &[(1, 1), (3, 0)], ActionSet::Cardinal).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::CellOutOfRange { x: 3, y: 0, size: 3 }
        );
        assert!(GridModel::new(3, &[(0, -1)], ActionSet::Cardinal).is_err());
    }

    #[test]
    fn enumerates_row_major_over_x_then_y() {
        let grid = GridModel::new(2, &[], ActionSet::Cardinal).unwrap();
        assert_eq!(
            grid.states(),
            &[
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 0),
                Cell::new(1, 1)
            ]
        );
        for (i, &cell) in grid.states().iter().enumerate() {
            assert_eq!(grid.index_of(cell), Some(i));
        }
        assert_eq!(grid.index_of(Cell::new(2, 0)), None);
    }

    #[test]
    fn moves_are_clipped_at_boundaries() {
        let grid = GridModel::new(3, &[], ActionSet::CardinalWithStay).unwrap();
        let t = grid.transitions();
        // (0, 0) is index 0; left and down stay put.
        assert_eq!(t.destination(0, 0), Some(0));
        assert_eq!(t.destination(0, 3), Some(0));
        // right -> (1, 0), up -> (0, 1)
        assert_eq!(t.destination(0, 1), Some(3));
        assert_eq!(t.destination(0, 2), Some(1));
        // stay
        assert_eq!(t.destination(4, 4), Some(4));
    }

    #[test]
    fn never_transitions_into_blocked_cells() {
        let grid = GridModel::new(4, &[(1, 1), (2, 3), (0, 2)], ActionSet::CardinalWithStay)
            .unwrap();
        let t = grid.transitions();
        for s in 0..grid.n_states() {
            for a in 0..grid.n_actions() {
                if let Some(d) = t.destination(s, a) {
                    assert!(!grid.is_blocked(d));
                }
                for next in 0..grid.n_states() {
                    if grid.is_blocked(next) {
                        assert_eq!(t.weight(s, a, next), 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn blocked_origin_still_has_outgoing_moves() {
        let grid = GridModel::new(3, &[(1, 1)], ActionSet::Cardinal).unwrap();
        let center = grid.index_of(Cell::new(1, 1)).unwrap();
        assert!(grid.is_blocked(center));
        assert_eq!(grid.transitions().destination(center, 0), Some(1));
    }

    #[test]
    fn dense_weights_are_deterministic() {
        let grid = GridModel::new(3, &[], ActionSet::Cardinal).unwrap();
        let t = grid.transitions();
        for s in 0..grid.n_states() {
            for a in 0..grid.n_actions() {
                let total: f64 = (0..grid.n_states()).map(|n| t.weight(s, a, n)).sum();
                assert_eq!(total, 1.0);
            }
        }
    }
}
