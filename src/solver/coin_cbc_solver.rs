// COIN-OR CBC Solver Adapter
// Requires the native Cbc libraries; enabled with the `coin_cbc` feature

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution},
    solver_service::{Result, SolverService},
};
use crate::solver::good_lp_model::{into_domain_solution, trivially_infeasible, GoodLpModel};
use good_lp::{solvers::coin_cbc, SolverModel};
use std::time::Instant;
use tracing::debug;

pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for CoinCbcSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();
        if let Some(solution) = trivially_infeasible(problem, start_time) {
            return Ok(solution);
        }
        let GoodLpModel {
            vars,
            columns,
            objective,
            constraints,
        } = GoodLpModel::build(problem);

        let mut lp_model = vars.minimise(objective).using(coin_cbc::coin_cbc);
        lp_model.set_parameter("log", "0");
        for constraint in constraints {
            lp_model = lp_model.with(constraint);
        }

        debug!(
            problem = %problem.name,
            variables = problem.num_variables(),
            constraints = problem.num_constraints(),
            "handing model to CBC"
        );
        let result = lp_model.solve();
        into_domain_solution(result, problem, &columns, start_time, self.name())
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }
}
