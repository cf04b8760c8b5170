use super::value_objects::{ConstraintType, OptimizationType, SolutionStatus};

/// Continuous decision variable in an optimization problem
#[derive(Debug, Clone)]
pub struct Variable {
    pub lower_bound: f64,
    pub upper_bound: Option<f64>,
    pub name: String,
}

impl Variable {
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            lower_bound: 0.0,
            upper_bound: None,
            name: name.into(),
        }
    }

    pub fn with_bounds(mut self, lower: f64, upper: Option<f64>) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }
}

/// Objective function to minimize or maximize
#[derive(Debug, Clone)]
pub struct ObjectiveFunction {
    pub optimization_type: OptimizationType,
    pub coefficients: Vec<f64>,
}

impl ObjectiveFunction {
    pub fn new(optimization_type: OptimizationType, coefficients: Vec<f64>) -> Self {
        Self {
            optimization_type,
            coefficients,
        }
    }

    pub fn minimize(coefficients: Vec<f64>) -> Self {
        Self::new(OptimizationType::Minimize, coefficients)
    }

    pub fn maximize(coefficients: Vec<f64>) -> Self {
        Self::new(OptimizationType::Maximize, coefficients)
    }

    pub fn num_variables(&self) -> usize {
        self.coefficients.len()
    }

    /// Objective value of an assignment
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(values)
            .map(|(coeff, value)| coeff * value)
            .sum()
    }
}

/// Linear constraint on variables
#[derive(Debug, Clone)]
pub struct Constraint {
    pub constraint_type: ConstraintType,
    pub coefficients: Vec<f64>,
    pub bound: f64,
    pub name: String,
}

impl Constraint {
    pub fn new(constraint_type: ConstraintType, coefficients: Vec<f64>, bound: f64) -> Self {
        Self {
            constraint_type,
            coefficients,
            bound,
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn num_variables(&self) -> usize {
        self.coefficients.len()
    }

    /// Weighted sum of the assignment, the left-hand side of the constraint
    pub fn lhs(&self, values: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(values)
            .map(|(coeff, value)| coeff * value)
            .sum()
    }

    pub fn is_satisfied_by(&self, values: &[f64], tolerance: f64) -> bool {
        self.constraint_type
            .holds(self.lhs(values), self.bound, tolerance)
    }
}

/// Complete linear program
///
/// Variables are declared first with [`OptimizationProblem::add_variable`];
/// constraints and the objective carry one dense coefficient per declared
/// variable, in declaration order.
#[derive(Debug, Clone)]
pub struct OptimizationProblem {
    pub name: String,
    pub description: String,
    pub objective: ObjectiveFunction,
    pub constraints: Vec<Constraint>,
    pub variables: Vec<Variable>,
}

impl OptimizationProblem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            objective: ObjectiveFunction::minimize(Vec::new()),
            constraints: Vec::new(),
            variables: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare a variable and return its column index
    pub fn add_variable(&mut self, variable: Variable) -> usize {
        self.variables.push(variable);
        self.variables.len() - 1
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn set_objective(&mut self, objective: ObjectiveFunction) {
        self.objective = objective;
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// First constraint or bound violated by `values`, if any
    pub fn first_violation(&self, values: &[f64], tolerance: f64) -> Option<String> {
        for (var, &value) in self.variables.iter().zip(values) {
            let below = value < var.lower_bound - tolerance;
            let above = var.upper_bound.is_some_and(|upper| value > upper + tolerance);
            if below || above {
                return Some(format!("bound of variable '{}' ({})", var.name, value));
            }
        }
        self.constraints
            .iter()
            .find(|c| !c.is_satisfied_by(values, tolerance))
            .map(|c| format!("constraint '{}'", c.name))
    }
}

/// Statistics about the solve process
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub solve_time_ms: f64,
    pub num_variables: u32,
    pub num_constraints: u32,
}

/// Solution to an optimization problem
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: SolutionStatus,
    pub optimal_value: Option<f64>,
    pub variable_values: Vec<f64>,
    pub message: String,
    pub statistics: SolverStatistics,
}

impl Solution {
    pub fn new(status: SolutionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            optimal_value: None,
            variable_values: Vec::new(),
            message: message.into(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn optimal(value: f64, variable_values: Vec<f64>) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            optimal_value: Some(value),
            variable_values,
            message: "Optimal solution found".to_string(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn with_statistics(mut self, statistics: SolverStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_var_problem() -> OptimizationProblem {
        let mut problem = OptimizationProblem::new("tiny");
        problem.add_variable(Variable::continuous("x").with_bounds(0.0, Some(1.0)));
        problem.add_variable(Variable::continuous("y"));
        problem.add_constraint(
            Constraint::new(ConstraintType::Equal, vec![1.0, 1.0], 1.0).with_name("sum"),
        );
        problem.set_objective(ObjectiveFunction::minimize(vec![2.0, 3.0]));
        problem
    }

    #[test]
    fn add_variable_returns_column_index() {
        let mut problem = OptimizationProblem::new("p");
        assert_eq!(problem.add_variable(Variable::continuous("a")), 0);
        assert_eq!(problem.add_variable(Variable::continuous("b")), 1);
        assert_eq!(problem.num_variables(), 2);
    }

    #[test]
    fn objective_evaluates_dot_product() {
        let problem = two_var_problem();
        assert_eq!(problem.objective.evaluate(&[0.25, 0.75]), 2.75);
    }

    #[test]
    fn first_violation_reports_constraint_name() {
        let problem = two_var_problem();
        assert_eq!(problem.first_violation(&[0.5, 0.5], 1e-9), None);
        assert_eq!(
            problem.first_violation(&[0.5, 0.0], 1e-9).as_deref(),
            Some("constraint 'sum'")
        );
    }

    #[test]
    fn first_violation_checks_bounds() {
        let problem = two_var_problem();
        let violation = problem.first_violation(&[2.0, -1.0], 1e-9).unwrap();
        assert!(violation.contains("'x'"));
    }

    #[test]
    fn optimal_solution_carries_value() {
        let solution = Solution::optimal(4.0, vec![1.0, 2.0]);
        assert!(solution.is_optimal());
        assert_eq!(solution.optimal_value, Some(4.0));

        let infeasible = Solution::new(SolutionStatus::Infeasible, "no");
        assert!(!infeasible.is_optimal());
        assert!(infeasible.optimal_value.is_none());
    }
}
