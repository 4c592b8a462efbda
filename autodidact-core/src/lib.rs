pub mod errors;
pub mod filters;
pub mod focus;
pub mod generator;
pub mod models;
pub mod planner;
pub mod repo;
pub mod scheduler;
pub mod stats;

pub use errors::*;
pub use filters::*;
pub use focus::*;
pub use generator::*;
pub use models::*;
pub use planner::*;
pub use repo::*;
pub use scheduler::*;
pub use stats::*;
