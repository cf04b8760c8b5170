// Facility-location problem instance

use super::matrix::{Matrix, ShapeError};

/// Instance data violating a shape or sign invariant
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InstanceError {
    #[error("{0} must be at least 1")]
    EmptyDimension(&'static str),

    #[error("{field} has {found} values, expected {expected}")]
    Shape {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{field}[{index}] is negative ({value})")]
    Negative {
        field: &'static str,
        index: usize,
        value: f64,
    },

    #[error("{field}[{index}] is not finite ({value})")]
    NonFinite {
        field: &'static str,
        index: usize,
        value: f64,
    },

    #[error(transparent)]
    Reshape(#[from] ShapeError),
}

/// Raw instance fields, matrices flattened customer-major
#[derive(Debug, Clone, Default)]
pub struct InstanceData {
    pub num_customers: usize,
    pub num_facilities: usize,
    pub allocation_cost: Vec<f64>,
    pub demand: Vec<f64>,
    pub opening_cost: Vec<f64>,
    pub capacity: Vec<f64>,
    pub truck_distance_limit: f64,
    pub truck_usage_cost: f64,
    pub distance: Vec<f64>,
}

/// A validated facility-location instance
///
/// Matrices are indexed `[(customer, facility)]`. Every value is finite and
/// non-negative, and all shapes agree with the customer and facility counts.
/// Zero divisors (`capacity`, `truck_distance_limit`) are allowed here and
/// rejected when a model is formulated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemInstance {
    num_customers: usize,
    num_facilities: usize,
    allocation_cost: Matrix<f64>,
    demand: Vec<f64>,
    opening_cost: Vec<f64>,
    capacity: Vec<f64>,
    max_vehicles_per_facility: usize,
    truck_distance_limit: f64,
    truck_usage_cost: f64,
    distance: Matrix<f64>,
}

impl ProblemInstance {
    pub fn new(data: InstanceData) -> Result<Self, InstanceError> {
        let InstanceData {
            num_customers,
            num_facilities,
            allocation_cost,
            demand,
            opening_cost,
            capacity,
            truck_distance_limit,
            truck_usage_cost,
            distance,
        } = data;

        if num_customers == 0 {
            return Err(InstanceError::EmptyDimension("num_customers"));
        }
        if num_facilities == 0 {
            return Err(InstanceError::EmptyDimension("num_facilities"));
        }

        let cells = num_customers.checked_mul(num_facilities).ok_or(ShapeError {
            rows: num_customers,
            cols: num_facilities,
            found: allocation_cost.len(),
        })?;
        check_values("allocation_cost", &allocation_cost, cells)?;
        check_values("demand", &demand, num_customers)?;
        check_values("opening_cost", &opening_cost, num_facilities)?;
        check_values("capacity", &capacity, num_facilities)?;
        check_values("truck_distance_limit", &[truck_distance_limit], 1)?;
        check_values("truck_usage_cost", &[truck_usage_cost], 1)?;
        check_values("distance", &distance, cells)?;

        Ok(Self {
            num_customers,
            num_facilities,
            allocation_cost: Matrix::reshape(allocation_cost, num_customers, num_facilities)?,
            demand,
            opening_cost,
            capacity,
            // no facility ever serves more than every customer
            max_vehicles_per_facility: num_customers,
            truck_distance_limit,
            truck_usage_cost,
            distance: Matrix::reshape(distance, num_customers, num_facilities)?,
        })
    }

    pub fn num_customers(&self) -> usize {
        self.num_customers
    }

    pub fn num_facilities(&self) -> usize {
        self.num_facilities
    }

    pub fn allocation_cost(&self) -> &Matrix<f64> {
        &self.allocation_cost
    }

    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    pub fn opening_cost(&self) -> &[f64] {
        &self.opening_cost
    }

    pub fn capacity(&self) -> &[f64] {
        &self.capacity
    }

    pub fn max_vehicles_per_facility(&self) -> usize {
        self.max_vehicles_per_facility
    }

    pub fn truck_distance_limit(&self) -> f64 {
        self.truck_distance_limit
    }

    pub fn truck_usage_cost(&self) -> f64 {
        self.truck_usage_cost
    }

    pub fn distance(&self) -> &Matrix<f64> {
        &self.distance
    }

    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }

    pub fn total_capacity(&self) -> f64 {
        self.capacity.iter().sum()
    }
}

fn check_values(field: &'static str, values: &[f64], expected: usize) -> Result<(), InstanceError> {
    if values.len() != expected {
        return Err(InstanceError::Shape {
            field,
            expected,
            found: values.len(),
        });
    }
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(InstanceError::NonFinite {
                field,
                index,
                value,
            });
        }
        if value < 0.0 {
            return Err(InstanceError::Negative {
                field,
                index,
                value,
            });
        }
    }
    Ok(())
}
