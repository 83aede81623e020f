pub mod duration;
pub mod errors;
pub mod estimator;
pub mod models;
pub mod scheduler;

pub use duration::*;
pub use errors::*;
pub use estimator::*;
pub use models::*;
pub use scheduler::*;
