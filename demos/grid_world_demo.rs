// Demonstration: solve a walled 10×10 grid with value and policy iteration.
//
// Build/run from this repo root:
//   cargo run --example grid_world_demo -- --discount 0.9 --size 10

use std::env;

use gridmdp::solver::{as_grid, policy_actions, total_reward};
use gridmdp::{GridProblem, MdpConfig, PolicyIteration, Solution, ValueIteration};

fn main() {
    let args: Vec<String> = env::args().collect();
    let discount: f64 = arg_value(&args, "--discount")
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.9);
    let size: usize = arg_value(&args, "--size")
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    if let Err(e) = run(size, discount) {
        eprintln!("error: {}", e);
        std::process::exit(2);
    }
}

fn run(size: usize, discount: f64) -> gridmdp::Result<()> {
    let config = MdpConfig::default();
    let blocked = [
        (2, 3),
        (1, 3),
        (0, 3),
        (4, 8),
        (5, 8),
        (6, 8),
        (5, 2),
        (6, 2),
        (7, 2),
        (8, 2),
        (8, 3),
        (8, 4),
    ];
    let rewards = [((6, 6), 1.0), ((0, 0), 1.0)];
    let problem = GridProblem::build(size, &blocked, &rewards, discount, &config)?;

    let mut vi = ValueIteration::new(&problem, Solution::zeros(&problem))?;
    let status = vi.run(config.max_iterations, config.epsilon)?;
    println!("Value iteration: {:?} after {} sweeps", status, vi.deltas().len());
    print_values(&problem, &total_reward(&problem, vi.values())?);
    print_policy(&problem, vi.policy());

    let start = Solution::random(&problem, config.seed);
    let mut pi = PolicyIteration::new(&problem, start)?
        .with_evaluation(config.evaluation_max_iterations, config.epsilon)?;
    let status = pi.run(config.max_iterations)?;
    println!("Policy iteration: {:?}", status);
    print_policy(&problem, pi.policy());
    Ok(())
}

// Rows are printed top-down by y so that "up" points up.
fn print_values(problem: &GridProblem, per_state: &[f64]) {
    let grid = as_grid(problem.grid(), per_state);
    let size = problem.grid().size();
    for y in (0..size).rev() {
        let row: Vec<String> = (0..size)
            .map(|x| {
                let index = x * size + y;
                if problem.grid().is_blocked(index) {
                    "  ## ".to_string()
                } else {
                    format!("{:5.2}", grid[x][y])
                }
            })
            .collect();
        println!("{}", row.join(" "));
    }
    println!();
}

fn print_policy(problem: &GridProblem, policy: &[usize]) {
    let actions = policy_actions(problem.grid(), policy);
    let size = problem.grid().size();
    for y in (0..size).rev() {
        let row: String = (0..size)
            .map(|x| {
                let index = x * size + y;
                match actions[index] {
                    _ if problem.grid().is_blocked(index) => "#".to_string(),
                    Some(action) => action.to_string(),
                    None => "?".to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("{}", row);
    }
    println!();
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
