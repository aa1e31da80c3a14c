//! End-to-end solver scenarios.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::config::MdpConfig;
use crate::model::types::{ActionSet, BlockedOrigin};

/// 2×2 grid, reward 1 at (1, 1), γ = 0.5, five actions.
fn two_by_two() -> GridProblem {
    GridProblem::build(2, &[], &[((1, 1), 1.0)], 0.5, &MdpConfig::default()).unwrap()
}

/// 5×5 grid with a partial wall and two rewards.
fn walled() -> GridProblem {
    GridProblem::build(
        5,
        &[(2, 3), (2, 4), (2, 2)],
        &[((3, 3), 1.0), ((0, 0), 2.0)],
        0.9,
        &MdpConfig::default(),
    )
    .unwrap()
}

mod hand_verified {
    use super::*;

    #[test]
    fn value_iteration_matches_exact_fixed_point() {
        let problem = two_by_two();
        let mut vi = ValueIteration::new(&problem, Solution::zeros(&problem)).unwrap();
        assert_eq!(vi.run(200, 1e-10).unwrap(), Status::Converged);

        let expected = [1.0, 2.0, 2.0, 2.0];
        for (v, e) in vi.values().iter().zip(expected) {
            assert_abs_diff_eq!(*v, e, epsilon = 1e-8);
        }
        // (0, 0) heads right toward (1, 1); (1, 1) takes the first action
        // that keeps it in place, which is "right" clipped at the edge.
        assert_eq!(vi.policy(), &[1, 1, 2, 1]);
    }

    #[test]
    fn policy_iteration_agrees_with_value_iteration() {
        let problem = two_by_two();
        let mut vi = ValueIteration::new(&problem, Solution::zeros(&problem)).unwrap();
        vi.run(200, 1e-10).unwrap();

        let mut pi = PolicyIteration::new(&problem, Solution::random(&problem, 7))
            .unwrap()
            .with_evaluation(500, 1e-10)
            .unwrap();
        assert_eq!(pi.run(50).unwrap(), Status::Converged);

        for (a, b) in pi.values().iter().zip(vi.values()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn zero_discount_values_are_best_immediate_reward() {
        let problem =
            GridProblem::build(2, &[], &[((1, 1), 1.0)], 0.0, &MdpConfig::default()).unwrap();
        let mut vi = ValueIteration::new(&problem, Solution::zeros(&problem)).unwrap();
        vi.step_once().unwrap();
        assert_eq!(vi.values(), &[0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn four_action_set_without_stay() {
        let config = MdpConfig {
            action_set: ActionSet::Cardinal,
            ..MdpConfig::default()
        };
        let problem = GridProblem::build(2, &[], &[((1, 1), 1.0)], 0.5, &config).unwrap();
        let mut vi = ValueIteration::new(&problem, Solution::zeros(&problem)).unwrap();
        vi.run(200, 1e-10).unwrap();
        // Clipped self-loops stand in for "stay", so the fixed point is unchanged.
        for (v, e) in vi.values().iter().zip([1.0, 2.0, 2.0, 2.0]) {
            assert_abs_diff_eq!(*v, e, epsilon = 1e-8);
        }
    }
}

mod properties {
    use super::*;

    #[test]
    fn contraction_forgets_initialization() {
        let problem = walled();
        let mut rng = StdRng::seed_from_u64(3);
        let n = problem.n_states();

        let run_from = |values: Vec<f64>| {
            let start = Solution {
                values,
                policy: vec![0; n],
            };
            let mut vi = ValueIteration::new(&problem, start).unwrap();
            assert_eq!(vi.run(1000, 1e-9).unwrap(), Status::Converged);
            vi.into_solution().values
        };

        let a = run_from(vec![0.0; n]);
        let b = run_from((0..n).map(|_| rng.gen_range(-50.0..50.0)).collect());
        assert!(diff_norm(&a, &b) < 1e-6);
    }

    #[test]
    fn converged_values_are_idempotent() {
        let problem = walled();
        let mut vi = ValueIteration::new(&problem, Solution::zeros(&problem)).unwrap();
        let epsilon = 1e-6;
        assert_eq!(vi.run(1000, epsilon).unwrap(), Status::Converged);
        let before = vi.values().to_vec();
        let delta = vi.step_once().unwrap();
        assert!(delta < epsilon);
        assert!(diff_norm(&before, vi.values()) < epsilon);
    }

    #[test]
    fn stable_policy_stays_stable() {
        let problem = walled();
        let mut pi = PolicyIteration::new(&problem, Solution::random(&problem, 11))
            .unwrap()
            .with_evaluation(1000, 1e-9)
            .unwrap();
        assert_eq!(pi.run(100).unwrap(), Status::Converged);
        let policy = pi.policy().to_vec();
        assert!(pi.improve().unwrap());
        assert_eq!(pi.policy(), policy.as_slice());
    }

    #[test]
    fn blocked_cells_are_never_chosen_destinations() {
        let problem = walled();
        let mut vi = ValueIteration::new(&problem, Solution::zeros(&problem)).unwrap();
        vi.run(1000, 1e-6).unwrap();
        let grid = problem.grid();
        for (s, &a) in vi.policy().iter().enumerate() {
            if let Some(d) = grid.transitions().destination(s, a) {
                assert!(!grid.is_blocked(d));
            }
        }
    }

    #[test]
    fn zeroed_blocked_origins_hold_zero() {
        let config = MdpConfig {
            blocked_origin: BlockedOrigin::Zeroed,
            ..MdpConfig::default()
        };
        let problem = GridProblem::build(
            5,
            &[(2, 3), (2, 4), (2, 2)],
            &[((3, 3), 1.0)],
            0.9,
            &config,
        )
        .unwrap();
        let mut vi = ValueIteration::new(&problem, Solution::zeros(&problem)).unwrap();
        vi.run(1000, 1e-6).unwrap();
        for (s, &v) in vi.values().iter().enumerate() {
            if problem.grid().is_blocked(s) {
                assert_eq!(v, 0.0);
            }
        }
    }

    #[test]
    fn unit_discount_is_accepted() {
        let problem =
            GridProblem::build(3, &[], &[((1, 1), -1.0)], 1.0, &MdpConfig::default()).unwrap();
        let mut vi = ValueIteration::new(&problem, Solution::zeros(&problem)).unwrap();
        // Every cell can avoid the penalty forever, so values stay at zero.
        assert_eq!(vi.run(50, 1e-9).unwrap(), Status::Converged);
        assert!(vi.values().iter().all(|&v| v == 0.0));
    }
}

mod warm_start {
    use super::*;
    use crate::error::ConfigurationError;

    #[test]
    fn missing_arrays_default() {
        let problem = two_by_two();
        let start = Solution::warm_start(&problem, None, None, 1).unwrap();
        assert_eq!(start.values, vec![0.0; 4]);
        assert_eq!(start.policy.len(), 4);
        assert!(start.policy.iter().all(|&a| a < problem.n_actions()));
    }

    #[test]
    fn random_policy_is_seeded() {
        let problem = walled();
        assert_eq!(
            Solution::random(&problem, 5),
            Solution::random(&problem, 5)
        );
    }

    #[test]
    fn supplied_arrays_are_kept() {
        let problem = two_by_two();
        let start =
            Solution::warm_start(&problem, Some(vec![1.0; 4]), Some(vec![4, 3, 2, 1]), 1).unwrap();
        assert_eq!(start.values, vec![1.0; 4]);
        assert_eq!(start.policy, vec![4, 3, 2, 1]);
    }

    #[test]
    fn mismatched_arrays_fail() {
        let problem = two_by_two();
        assert_eq!(
            Solution::warm_start(&problem, Some(vec![0.0; 5]), None, 1),
            Err(ConfigurationError::ValuesLengthMismatch {
                expected: 4,
                actual: 5
            })
        );
        assert_eq!(
            Solution::warm_start(&problem, None, Some(vec![0; 3]), 1),
            Err(ConfigurationError::PolicyLengthMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn non_finite_values_fail() {
        let problem = two_by_two();
        assert_eq!(
            Solution::warm_start(&problem, Some(vec![0.0, f64::INFINITY, 0.0, 0.0]), None, 1),
            Err(ConfigurationError::NonFiniteValue {
                state: 1,
                value: f64::INFINITY
            })
        );
        assert!(matches!(
            Solution::warm_start(&problem, Some(vec![0.0, 0.0, 0.0, f64::NAN]), None, 1),
            Err(ConfigurationError::NonFiniteValue { state: 3, .. })
        ));

        let start = Solution {
            values: vec![f64::NEG_INFINITY; 4],
            policy: vec![4; 4],
        };
        assert!(matches!(
            ValueIteration::new(&problem, start),
            Err(ConfigurationError::NonFiniteValue { state: 0, .. })
        ));
    }
}
