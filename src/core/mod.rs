pub mod batch;
pub mod executor;
pub mod locator;
pub mod planner;
pub mod probe;
pub mod resolver;
pub mod types;
