#![cfg(feature = "microlp")]

use std::io::Write;
use std::sync::Arc;

use approx::assert_abs_diff_eq;
use facloc::{
    parse_instance_str, run, FormulationError, Formulator, InstanceData, LocationOutcome,
    MicrolpSolver, ProblemInstance, RunConfig, SolutionStatus, SolverBackend,
};

const EPS: f64 = 1e-6;

fn solve(data: InstanceData) -> LocationOutcome {
    let instance = ProblemInstance::new(data).unwrap();
    Formulator::new(instance, Arc::new(MicrolpSolver::new()))
        .solve()
        .unwrap()
}

fn scenario() -> InstanceData {
    InstanceData {
        num_customers: 2,
        num_facilities: 2,
        allocation_cost: vec![1.0, 2.0, 2.0, 1.0],
        demand: vec![10.0, 10.0],
        opening_cost: vec![5.0, 5.0],
        capacity: vec![20.0, 20.0],
        truck_distance_limit: 100.0,
        truck_usage_cost: 1.0,
        distance: vec![1.0, 1.0, 1.0, 1.0],
    }
}

#[test]
fn each_customer_goes_to_its_cheaper_facility() {
    let outcome = solve(scenario());
    let solution = outcome.solution().expect("scenario is feasible");

    assert_abs_diff_eq!(solution.fraction(0, 0), 1.0, epsilon = EPS);
    assert_abs_diff_eq!(solution.fraction(1, 1), 1.0, epsilon = EPS);
    assert_abs_diff_eq!(solution.fraction(0, 1), 0.0, epsilon = EPS);
    assert_abs_diff_eq!(solution.fraction(1, 0), 0.0, epsilon = EPS);

    // 2.5 + 2.5 opening, 1 + 1 allocation, 0.01 + 0.01 trucks
    assert_abs_diff_eq!(solution.objective_value, 7.02, epsilon = EPS);
    assert_abs_diff_eq!(solution.breakdown.opening, 5.0, epsilon = EPS);
    assert_abs_diff_eq!(solution.breakdown.allocation, 2.0, epsilon = EPS);
    assert_abs_diff_eq!(solution.breakdown.truck_usage, 0.02, epsilon = EPS);
}

#[test]
fn capacity_forces_a_split() {
    let data = InstanceData {
        num_customers: 2,
        num_facilities: 2,
        allocation_cost: vec![0.0, 5.0, 0.0, 5.0],
        demand: vec![10.0, 10.0],
        opening_cost: vec![0.0, 0.0],
        capacity: vec![15.0, 100.0],
        truck_distance_limit: 10.0,
        truck_usage_cost: 0.0,
        distance: vec![0.0; 4],
    };
    let instance = ProblemInstance::new(data.clone()).unwrap();
    let outcome = solve(data);
    let solution = outcome.solution().unwrap();

    // half a customer has to move to the expensive facility
    assert_abs_diff_eq!(solution.objective_value, 2.5, epsilon = EPS);
    assert_abs_diff_eq!(solution.load(&instance, 0), 15.0, epsilon = EPS);
    solution.check_feasibility(&instance, EPS).unwrap();
}

#[test]
fn truck_limit_caps_a_far_facility() {
    // one customer, so each facility may dispatch a single truck
    let data = InstanceData {
        num_customers: 1,
        num_facilities: 2,
        allocation_cost: vec![0.0, 9.0],
        demand: vec![4.0],
        opening_cost: vec![0.0, 0.0],
        capacity: vec![10.0, 10.0],
        truck_distance_limit: 10.0,
        truck_usage_cost: 0.0,
        distance: vec![30.0, 0.0],
    };
    let instance = ProblemInstance::new(data.clone()).unwrap();
    let outcome = solve(data);
    let solution = outcome.solution().unwrap();

    assert_abs_diff_eq!(solution.fraction(0, 0), 1.0 / 3.0, epsilon = EPS);
    assert_abs_diff_eq!(solution.fraction(1, 0), 2.0 / 3.0, epsilon = EPS);
    assert_abs_diff_eq!(solution.objective_value, 6.0, epsilon = EPS);
    assert_abs_diff_eq!(solution.trucks(&instance, 0), 1.0, epsilon = EPS);
}

#[test]
fn solved_models_respect_every_constraint() {
    let data = InstanceData {
        num_customers: 4,
        num_facilities: 3,
        allocation_cost: vec![
            3.0, 7.0, 2.0, //
            6.0, 1.0, 4.0, //
            5.0, 5.0, 5.0, //
            2.0, 8.0, 9.0,
        ],
        demand: vec![12.0, 7.0, 9.0, 15.0],
        opening_cost: vec![40.0, 25.0, 60.0],
        capacity: vec![20.0, 18.0, 30.0],
        truck_distance_limit: 25.0,
        truck_usage_cost: 3.5,
        distance: vec![
            10.0, 40.0, 22.0, //
            31.0, 8.0, 17.0, //
            25.0, 19.0, 12.0, //
            6.0, 50.0, 44.0,
        ],
    };
    let instance = ProblemInstance::new(data.clone()).unwrap();
    let outcome = solve(data);
    let solution = outcome.solution().expect("total capacity covers demand");

    solution.check_feasibility(&instance, EPS).unwrap();
    for f in 0..instance.num_facilities() {
        for c in 0..instance.num_customers() {
            let x = solution.fraction(f, c);
            assert!((-EPS..=1.0 + EPS).contains(&x), "x[{}][{}] = {}", f, c, x);
        }
    }
    assert_abs_diff_eq!(
        solution.objective_value,
        solution.breakdown.total(),
        epsilon = 1e-6
    );
}

#[test]
fn insufficient_capacity_has_no_solution() {
    let outcome = solve(InstanceData {
        capacity: vec![5.0, 5.0],
        ..scenario()
    });
    assert_eq!(outcome.objective_value(), None);
    assert_eq!(outcome.status(), SolutionStatus::Infeasible);
}

#[test]
fn zero_capacity_is_rejected_before_solving() {
    let instance = ProblemInstance::new(InstanceData {
        capacity: vec![0.0, 40.0],
        ..scenario()
    })
    .unwrap();
    let result = Formulator::new(instance, Arc::new(MicrolpSolver::new())).solve();
    assert!(matches!(result, Err(FormulationError::DegenerateInstance(_))));
}

#[test]
fn parsed_file_solves_end_to_end() {
    let text = "2 2\n1 2 2 1\n10 10\n5 5\n20 20\n100 1\n1 1 1 1\n";
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();

    let config = RunConfig::new(file.path()).with_backend(SolverBackend::Microlp);
    let outcome = run(&config).unwrap();
    assert_abs_diff_eq!(outcome.objective_value().unwrap(), 7.02, epsilon = EPS);

    // the same text in memory gives the same instance
    let formulator = Formulator::from_file(file.path(), Arc::new(MicrolpSolver::new())).unwrap();
    assert_eq!(formulator.instance(), &parse_instance_str(text).unwrap());
}
