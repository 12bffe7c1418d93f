use super::traits::{ConfigSection, ConfigManifest, FieldManifest};
use crate::error::InvpendError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    /// `None` runs until stopped externally.
    pub num_generations: Option<usize>,
    /// A child is mutated with probability `1 / mutation_rate`.
    pub mutation_rate: u32,
    /// The bottom `population_size / replacement_divisor` genomes are replaced each generation.
    pub replacement_divisor: usize,
    pub min_steps: usize,
    pub max_steps: usize,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            num_generations: None,
            mutation_rate: 20,
            replacement_divisor: 5,
            min_steps: 2,
            max_steps: 99,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), InvpendError> {
        if self.population_size == 0 {
            return Err(InvpendError::Configuration(
                "Population size must be positive".to_string()
            ));
        }
        if self.num_generations == Some(0) {
            return Err(InvpendError::Configuration(
                "Generation limit must be positive (omit it to run unbounded)".to_string()
            ));
        }
        if self.mutation_rate == 0 {
            return Err(InvpendError::Configuration(
                "Mutation rate denominator must be positive".to_string()
            ));
        }
        if self.replacement_divisor < 2 {
            return Err(InvpendError::Configuration(
                "Replacement divisor must be at least 2".to_string()
            ));
        }
        if self.min_steps == 0 || self.min_steps > self.max_steps {
            return Err(InvpendError::Configuration(format!(
                "Genome length range [{}, {}] is invalid",
                self.min_steps, self.max_steps
            )));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Evolution".to_string(),
            fields: vec![
                FieldManifest::new(
                    "population_size",
                    "integer",
                    serde_json::json!(1000),
                    Some(1.0),
                    None,
                    "Number of genomes in the population",
                ),
                FieldManifest::new(
                    "num_generations",
                    "integer?",
                    serde_json::Value::Null,
                    Some(1.0),
                    None,
                    "Generations to run; unset means unbounded",
                ),
                FieldManifest::new(
                    "mutation_rate",
                    "integer",
                    serde_json::json!(20),
                    Some(1.0),
                    None,
                    "Each child mutates one step with probability 1/mutation_rate",
                ),
                FieldManifest::new(
                    "replacement_divisor",
                    "integer",
                    serde_json::json!(5),
                    Some(2.0),
                    None,
                    "Bottom N/replacement_divisor genomes are bred anew",
                ),
                FieldManifest::new(
                    "min_steps",
                    "integer",
                    serde_json::json!(2),
                    Some(1.0),
                    None,
                    "Shortest random genome",
                ),
                FieldManifest::new(
                    "max_steps",
                    "integer",
                    serde_json::json!(99),
                    Some(1.0),
                    None,
                    "Longest random genome",
                ),
                FieldManifest::new(
                    "seed",
                    "integer?",
                    serde_json::Value::Null,
                    None,
                    None,
                    "RNG seed; unset draws a fresh one",
                ),
            ],
        }
    }
}
