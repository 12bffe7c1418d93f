pub mod model;

pub use model::{PhysicsModel, PhysicsParameters};
