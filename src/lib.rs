//! Genetic search for open-loop cart-pole (inverted pendulum) control sequences.
//!
//! A population of variable-length control sequences is replayed through a
//! discrete-time cart-pole model; fitness is the number of steps the pole
//! stays up and the cart stays on the track. Each generation the bottom slice
//! of the ranked population is replaced by single-point crossover children of
//! the survivors, occasionally mutated.

pub mod config;
pub mod engines;
pub mod error;
pub mod services;
pub mod types;
pub mod visual;

pub use error::{InvpendError, Result};
