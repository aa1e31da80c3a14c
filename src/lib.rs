//! gridmdp - Grid-world Markov Decision Process solvers
//!
//! Models a finite N×N grid with deterministic cardinal movement, blocked
//! cells, and destination-attributed rewards, and solves it with value
//! iteration and policy iteration.
//!
//! ```
//! use gridmdp::{GridProblem, MdpConfig, Solution, Status, ValueIteration};
//!
//! let config = MdpConfig::default();
//! let problem = GridProblem::build(2, &[], &[((1, 1), 1.0)], 0.5, &config).unwrap();
//! let mut solver = ValueIteration::new(&problem, Solution::zeros(&problem)).unwrap();
//!
//! assert_eq!(solver.run(200, 1e-9).unwrap(), Status::Converged);
//! assert!((solver.values()[0] - 1.0).abs() < 1e-6);
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod request;
pub mod solver;

pub use config::MdpConfig;
pub use error::{ConfigurationError, Result};
pub use model::{
    Action, ActionSet, BlockedOrigin, Cell, GridModel, GridProblem, RewardModel,
    TransitionRelation,
};
pub use request::{GridWorldRequest, SolverOutput};
pub use solver::{
    BellmanBackup, PolicyIteration, Reduce, Solution, Status, ValueIteration,
};
