pub mod trajectory;

pub use trajectory::TrajectoryRunner;
