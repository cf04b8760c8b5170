// Domain value objects shared by the model, the solvers and the configuration

use std::fmt;
use std::str::FromStr;

/// Type of constraint comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    /// Less than or equal (≤)
    LessThanOrEqual,
    /// Equal (=)
    Equal,
    /// Greater than or equal (≥)
    GreaterThanOrEqual,
}

impl ConstraintType {
    /// Whether `lhs` satisfies the comparison against `bound` within `tolerance`
    pub fn holds(self, lhs: f64, bound: f64, tolerance: f64) -> bool {
        match self {
            ConstraintType::LessThanOrEqual => lhs <= bound + tolerance,
            ConstraintType::Equal => (lhs - bound).abs() <= tolerance,
            ConstraintType::GreaterThanOrEqual => lhs >= bound - tolerance,
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintType::LessThanOrEqual => write!(f, "<="),
            ConstraintType::Equal => write!(f, "=="),
            ConstraintType::GreaterThanOrEqual => write!(f, ">="),
        }
    }
}

/// Direction of optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationType {
    /// Minimize the objective function
    Minimize,
    /// Maximize the objective function
    Maximize,
}

/// Status of the optimization solution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Found optimal solution
    Optimal,
    /// Problem has no feasible solution
    Infeasible,
    /// Objective can be improved infinitely
    Unbounded,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionStatus::Optimal => write!(f, "Optimal"),
            SolutionStatus::Infeasible => write!(f, "Infeasible"),
            SolutionStatus::Unbounded => write!(f, "Unbounded"),
        }
    }
}

/// Solver backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverBackend {
    /// First backend compiled into this build
    #[default]
    Auto,
    /// Pure-Rust microlp through good_lp
    Microlp,
    /// COIN-OR CBC through good_lp
    CoinCbc,
    /// HiGHS
    Highs,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "auto"),
            SolverBackend::Microlp => write!(f, "microlp"),
            SolverBackend::CoinCbc => write!(f, "coin-cbc"),
            SolverBackend::Highs => write!(f, "highs"),
        }
    }
}

impl FromStr for SolverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SolverBackend::Auto),
            "microlp" => Ok(SolverBackend::Microlp),
            "coin-cbc" | "coin_cbc" | "cbc" => Ok(SolverBackend::CoinCbc),
            "highs" => Ok(SolverBackend::Highs),
            other => Err(format!(
                "unknown solver backend '{}' (expected auto, microlp, coin-cbc or highs)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parses_all_spellings() {
        assert_eq!("auto".parse::<SolverBackend>(), Ok(SolverBackend::Auto));
        assert_eq!("MicroLP".parse::<SolverBackend>(), Ok(SolverBackend::Microlp));
        assert_eq!("coin-cbc".parse::<SolverBackend>(), Ok(SolverBackend::CoinCbc));
        assert_eq!("cbc".parse::<SolverBackend>(), Ok(SolverBackend::CoinCbc));
        assert_eq!(" highs ".parse::<SolverBackend>(), Ok(SolverBackend::Highs));
    }

    #[test]
    fn backend_rejects_unknown_name() {
        let err = "cplex".parse::<SolverBackend>().unwrap_err();
        assert!(err.contains("cplex"));
    }

    #[test]
    fn backend_display_round_trips() {
        for backend in [
            SolverBackend::Auto,
            SolverBackend::Microlp,
            SolverBackend::CoinCbc,
            SolverBackend::Highs,
        ] {
            assert_eq!(backend.to_string().parse::<SolverBackend>(), Ok(backend));
        }
    }

    #[test]
    fn constraint_type_tolerance() {
        assert!(ConstraintType::Equal.holds(1.0 + 1e-9, 1.0, 1e-6));
        assert!(!ConstraintType::Equal.holds(1.1, 1.0, 1e-6));
        assert!(ConstraintType::LessThanOrEqual.holds(20.0000001, 20.0, 1e-6));
        assert!(!ConstraintType::GreaterThanOrEqual.holds(4.0, 5.0, 1e-6));
    }
}
