//! Core types for the grid-world MDP.
//!
//! Defines grid cells, the cardinal movement actions, and the two
//! configuration switches that change solver fixed points.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};

/// A cell on an N×N grid.
///
/// Invariant: `0 <= x, y < N` for the grid the cell belongs to. Cells built
/// through [`Cell::checked`] or enumerated by
/// [`GridModel`](super::grid::GridModel) always satisfy it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    /// Creates a new cell.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Converts raw (possibly negative) coordinates into a cell of a
    /// `size`×`size` grid.
    pub fn checked(x: i64, y: i64, size: usize) -> Result<Self> {
        let in_range = |c: i64| c >= 0 && (c as u64) < size as u64;
        if in_range(x) && in_range(y) {
            Ok(Self::new(x as usize, y as usize))
        } else {
            Err(ConfigurationError::CellOutOfRange { x, y, size })
        }
    }

    /// Applies a movement delta, clipping each axis to `[0, size - 1]`.
    ///
    /// An axis that would leave the grid keeps its coordinate; there is no
    /// wraparound.
    pub fn shifted(&self, action: Action, size: usize) -> Self {
        let (dx, dy) = action.delta();
        let max = size as i64 - 1;
        let x = (self.x as i64 + dx).clamp(0, max);
        let y = (self.y as i64 + dy).clamp(0, max);
        Self::new(x as usize, y as usize)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A deterministic movement on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Stay,
}

impl Action {
    /// Coordinate delta `(dx, dy)` applied by this action.
    pub fn delta(&self) -> (i64, i64) {
        match self {
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
            Action::Up => (0, 1),
            Action::Down => (0, -1),
            Action::Stay => (0, 0),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Left => write!(f, "←"),
            Action::Right => write!(f, "→"),
            Action::Up => write!(f, "↑"),
            Action::Down => write!(f, "↓"),
            Action::Stay => write!(f, "X"),
        }
    }
}

/// Which actions are available in every state.
///
/// The action index stored in a policy is the position in
/// [`ActionSet::actions`], so the order here is part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionSet {
    /// Left, right, up, down.
    Cardinal,
    /// Left, right, up, down, stay.
    #[default]
    CardinalWithStay,
}

impl ActionSet {
    const CARDINAL: [Action; 4] = [Action::Left, Action::Right, Action::Up, Action::Down];
    const WITH_STAY: [Action; 5] = [
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::Stay,
    ];

    /// Actions in index order.
    pub fn actions(&self) -> &'static [Action] {
        match self {
            ActionSet::Cardinal => &Self::CARDINAL,
            ActionSet::CardinalWithStay => &Self::WITH_STAY,
        }
    }

    pub fn len(&self) -> usize {
        self.actions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How a blocked cell is valued when it is the origin of a transition.
///
/// Blocked cells are never reachable as destinations. An agent placed on
/// one can still move out of it under [`BlockedOrigin::Unrestricted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BlockedOrigin {
    /// Blocked origins are backed up like any other state.
    #[default]
    Unrestricted,
    /// Blocked origins always hold a value of zero.
    Zeroed,
}
