pub mod physics;
pub mod evaluation;
pub mod generation;
pub mod metrics;
