pub mod traits;
pub mod evolution;
pub mod physics;
pub mod reporting;
pub mod manager;
pub mod bridge;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use physics::PhysicsConfig;
pub use reporting::ReportingConfig;
pub use bridge::ConfigBridge;
