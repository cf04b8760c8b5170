// Facility-location view of a solved linear program

use crate::domain::{Matrix, ProblemInstance, SolutionStatus, SolverStatistics};

/// The three objective terms, evaluated at a solution
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostBreakdown {
    pub opening: f64,
    pub allocation: f64,
    pub truck_usage: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.opening + self.allocation + self.truck_usage
    }
}

/// A constraint of the formulation that an allocation does not meet
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeasibilityViolation {
    #[error("customer {customer} is served {served} of its demand, expected 1")]
    Coverage { customer: usize, served: f64 },

    #[error("facility {facility} serves {load} demand but has capacity {capacity}")]
    Capacity {
        facility: usize,
        load: f64,
        capacity: f64,
    },

    #[error("facility {facility} needs {trucks} trucks but may dispatch {limit}")]
    TruckLimit {
        facility: usize,
        trucks: f64,
        limit: usize,
    },

    #[error("allocation is {rows}x{cols}, instance has {facilities} facilities and {customers} customers")]
    Shape {
        rows: usize,
        cols: usize,
        facilities: usize,
        customers: usize,
    },
}

/// Optimal allocation of customers to facilities
#[derive(Debug, Clone)]
pub struct LocationSolution {
    pub objective_value: f64,
    /// `allocation[(f, c)]` is the fraction of customer c's demand served by facility f
    pub allocation: Matrix<f64>,
    pub breakdown: CostBreakdown,
    pub statistics: SolverStatistics,
}

impl LocationSolution {
    pub fn fraction(&self, facility: usize, customer: usize) -> f64 {
        self.allocation[(facility, customer)]
    }

    /// Demand assigned to `facility`
    pub fn load(&self, instance: &ProblemInstance, facility: usize) -> f64 {
        self.allocation
            .row(facility)
            .iter()
            .zip(instance.demand())
            .map(|(x, demand)| x * demand)
            .sum()
    }

    /// Estimated truck trips of `facility`: assigned round-trip distance over
    /// the distance one truck may cover
    pub fn trucks(&self, instance: &ProblemInstance, facility: usize) -> f64 {
        self.routed_distance(instance, facility) / instance.truck_distance_limit()
    }

    fn routed_distance(&self, instance: &ProblemInstance, facility: usize) -> f64 {
        self.allocation
            .row(facility)
            .iter()
            .zip(instance.distance().column(facility))
            .map(|(x, distance)| x * distance)
            .sum()
    }

    /// Recheck coverage, capacity and truck limits against `instance`
    pub fn check_feasibility(
        &self,
        instance: &ProblemInstance,
        tolerance: f64,
    ) -> Result<(), FeasibilityViolation> {
        let (facilities, customers) = (instance.num_facilities(), instance.num_customers());
        if self.allocation.rows() != facilities || self.allocation.cols() != customers {
            return Err(FeasibilityViolation::Shape {
                rows: self.allocation.rows(),
                cols: self.allocation.cols(),
                facilities,
                customers,
            });
        }

        for customer in 0..customers {
            let served: f64 = self.allocation.column(customer).sum();
            if (served - 1.0).abs() > tolerance {
                return Err(FeasibilityViolation::Coverage { customer, served });
            }
        }

        for facility in 0..facilities {
            let load = self.load(instance, facility);
            let capacity = instance.capacity()[facility];
            if load > capacity + tolerance {
                return Err(FeasibilityViolation::Capacity {
                    facility,
                    load,
                    capacity,
                });
            }

            let trucks = self.trucks(instance, facility);
            let limit = instance.max_vehicles_per_facility();
            if trucks > limit as f64 + tolerance {
                return Err(FeasibilityViolation::TruckLimit {
                    facility,
                    trucks,
                    limit,
                });
            }
        }
        Ok(())
    }
}

/// Evaluate the objective terms of an allocation (facility-major)
pub(crate) fn cost_breakdown(instance: &ProblemInstance, allocation: &Matrix<f64>) -> CostBreakdown {
    let mut breakdown = CostBreakdown::default();
    for facility in 0..instance.num_facilities() {
        let row = allocation.row(facility);
        let mut load = 0.0;
        let mut distance = 0.0;
        for (customer, &x) in row.iter().enumerate() {
            load += x * instance.demand()[customer];
            distance += x * instance.distance()[(customer, facility)];
            breakdown.allocation += x * instance.allocation_cost()[(customer, facility)];
        }
        breakdown.opening += instance.opening_cost()[facility] * load / instance.capacity()[facility];
        breakdown.truck_usage +=
            instance.truck_usage_cost() * distance / instance.truck_distance_limit();
    }
    breakdown
}

/// Result of solving a facility-location instance
#[derive(Debug, Clone)]
pub enum LocationOutcome {
    Solved(LocationSolution),
    /// The solver proved there is no optimal allocation
    NoSolution {
        status: SolutionStatus,
        message: String,
    },
}

impl LocationOutcome {
    pub fn objective_value(&self) -> Option<f64> {
        match self {
            LocationOutcome::Solved(solution) => Some(solution.objective_value),
            LocationOutcome::NoSolution { .. } => None,
        }
    }

    pub fn solution(&self) -> Option<&LocationSolution> {
        match self {
            LocationOutcome::Solved(solution) => Some(solution),
            LocationOutcome::NoSolution { .. } => None,
        }
    }

    pub fn status(&self) -> SolutionStatus {
        match self {
            LocationOutcome::Solved(_) => SolutionStatus::Optimal,
            LocationOutcome::NoSolution { status, .. } => *status,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, LocationOutcome::Solved(_))
    }
}
