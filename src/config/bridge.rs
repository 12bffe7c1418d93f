use crate::config::manager::AppConfig;
use crate::engines::generation::evolution_engine::EvolutionConfig as EngineEvolutionConfig;
use crate::engines::physics::PhysicsParameters;
use std::time::Duration;

pub struct ConfigBridge;

impl ConfigBridge {
    pub fn to_physics_parameters(config: &AppConfig) -> PhysicsParameters {
        PhysicsParameters {
            gravity: config.physics.gravity,
            rod_length: config.physics.rod_length,
            position_limit: config.physics.position_limit,
        }
    }

    /// Convert AppConfig to the engine's runtime configuration
    pub fn to_engine_config(config: &AppConfig) -> EngineEvolutionConfig {
        let frame_delay = config
            .reporting
            .frame_delay_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::try_from_secs_f64(config.physics.dt).unwrap_or(Duration::ZERO));

        EngineEvolutionConfig {
            population_size: config.evolution.population_size,
            generations: config.evolution.num_generations,
            mutation_rate: config.evolution.mutation_rate,
            replacement_divisor: config.evolution.replacement_divisor,
            step_range: config.evolution.min_steps..=config.evolution.max_steps,
            dt: config.physics.dt,
            physics: Self::to_physics_parameters(config),
            trace: config.reporting.trace,
            display_every: config.reporting.display_every,
            frame_delay,
            seed: config.evolution.seed,
        }
    }
}
