use crate::domain::{
    solver_service::{Result, SolverError, SolverService},
    value_objects::SolverBackend,
};
use std::sync::Arc;

#[cfg(feature = "coin_cbc")]
use crate::solver::CoinCbcSolver;
#[cfg(feature = "highs")]
use crate::solver::HighsSolver;
#[cfg(feature = "microlp")]
use crate::solver::MicrolpSolver;

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create a solver for a specific backend
    pub fn create_from_backend(backend: SolverBackend) -> Result<Arc<dyn SolverService>> {
        match backend {
            SolverBackend::Auto => Self::default_solver(),
            SolverBackend::Microlp => microlp(),
            SolverBackend::CoinCbc => coin_cbc(),
            SolverBackend::Highs => highs(),
        }
    }

    /// Backends compiled into this build, in order of preference
    pub fn available_backends() -> Vec<SolverBackend> {
        [
            (SolverBackend::Highs, cfg!(feature = "highs")),
            (SolverBackend::CoinCbc, cfg!(feature = "coin_cbc")),
            (SolverBackend::Microlp, cfg!(feature = "microlp")),
        ]
        .into_iter()
        .filter_map(|(backend, enabled)| enabled.then_some(backend))
        .collect()
    }

    /// Get the preferred compiled-in solver
    pub fn default_solver() -> Result<Arc<dyn SolverService>> {
        match Self::available_backends().first() {
            Some(&backend) => Self::create_from_backend(backend),
            None => Err(SolverError::SolverNotAvailable(
                "no solver backend compiled in; enable one of the microlp, coin_cbc or highs features"
                    .to_string(),
            )),
        }
    }
}

#[allow(dead_code)]
fn not_compiled(backend: SolverBackend, feature: &str) -> SolverError {
    SolverError::SolverNotAvailable(format!(
        "backend '{}' requires the '{}' feature",
        backend, feature
    ))
}

#[cfg(feature = "microlp")]
fn microlp() -> Result<Arc<dyn SolverService>> {
    Ok(Arc::new(MicrolpSolver::new()))
}

#[cfg(not(feature = "microlp"))]
fn microlp() -> Result<Arc<dyn SolverService>> {
    Err(not_compiled(SolverBackend::Microlp, "microlp"))
}

#[cfg(feature = "coin_cbc")]
fn coin_cbc() -> Result<Arc<dyn SolverService>> {
    Ok(Arc::new(CoinCbcSolver::new()))
}

#[cfg(not(feature = "coin_cbc"))]
fn coin_cbc() -> Result<Arc<dyn SolverService>> {
    Err(not_compiled(SolverBackend::CoinCbc, "coin_cbc"))
}

#[cfg(feature = "highs")]
fn highs() -> Result<Arc<dyn SolverService>> {
    Ok(Arc::new(HighsSolver::new()))
}

#[cfg(not(feature = "highs"))]
fn highs() -> Result<Arc<dyn SolverService>> {
    Err(not_compiled(SolverBackend::Highs, "highs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_picks_first_available_backend() {
        let available = SolverFactory::available_backends();
        match SolverFactory::create_from_backend(SolverBackend::Auto) {
            Ok(solver) => {
                let expected = SolverFactory::create_from_backend(available[0]).unwrap();
                assert_eq!(solver.name(), expected.name());
            }
            Err(err) => {
                assert!(available.is_empty());
                assert!(matches!(err, SolverError::SolverNotAvailable(_)));
            }
        }
    }

    #[cfg(feature = "microlp")]
    #[test]
    fn creates_microlp() {
        let solver = SolverFactory::create_from_backend(SolverBackend::Microlp).unwrap();
        assert_eq!(solver.name(), "microlp");
        assert!(SolverFactory::available_backends().contains(&SolverBackend::Microlp));
    }

    #[cfg(not(feature = "highs"))]
    #[test]
    fn missing_backend_is_reported() {
        let err = SolverFactory::create_from_backend(SolverBackend::Highs)
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            "Solver not available: backend 'highs' requires the 'highs' feature"
        );
    }
}
