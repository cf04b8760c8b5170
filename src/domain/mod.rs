// Domain module: problem instance, LP model and the solver contract

pub mod instance;
pub mod matrix;
pub mod models;
pub mod solver_service;
pub mod value_objects;

pub use instance::*;
pub use matrix::*;
pub use models::*;
pub use solver_service::*;
pub use value_objects::*;
