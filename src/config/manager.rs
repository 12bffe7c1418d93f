use super::{
    evolution::EvolutionConfig,
    physics::PhysicsConfig,
    reporting::ReportingConfig,
    traits::{ConfigManifest, ConfigSection},
};
use crate::error::InvpendError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Prefix for environment overrides, e.g. `INVPEND__EVOLUTION__POPULATION_SIZE=200`.
pub const ENV_PREFIX: &str = "INVPEND";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub physics: PhysicsConfig,
    pub reporting: ReportingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), InvpendError> {
        self.evolution.validate()?;
        self.physics.validate()?;
        self.reporting.validate()?;
        Ok(())
    }

    pub fn manifests(&self) -> Vec<ConfigManifest> {
        vec![
            self.evolution.to_manifest(),
            self.physics.to_manifest(),
            self.reporting.to_manifest(),
        ]
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), InvpendError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| InvpendError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| InvpendError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        *self.write() = config;
        Ok(())
    }

    /// Defaults, then the optional TOML file, then `INVPEND__*` environment variables.
    pub fn load_layered<P: AsRef<Path>>(&self, path: Option<P>) -> Result<(), InvpendError> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(
                ::config::File::from(path.as_ref()).format(::config::FileFormat::Toml),
            );
        }

        let config: AppConfig = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;

        *self.write() = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), InvpendError> {
        let toml_str = self.to_toml()?;

        std::fs::write(path, toml_str)
            .map_err(|e| InvpendError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, InvpendError> {
        toml::to_string_pretty(&*self.read())
            .map_err(|e| InvpendError::Configuration(format!("Failed to serialize: {}", e)))
    }

    pub fn get(&self) -> AppConfig {
        self.read().clone()
    }

    /// Applies `f` and keeps the result only if it validates.
    pub fn update<F>(&self, f: F) -> Result<(), InvpendError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        candidate.validate()?;
        *self.write() = candidate;
        Ok(())
    }

    // Writers swap in a whole validated AppConfig, so a poisoned lock still holds a usable value.
    fn read(&self) -> RwLockReadGuard<'_, AppConfig> {
        self.config.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AppConfig> {
        self.config.write().unwrap_or_else(|e| e.into_inner())
    }
}
