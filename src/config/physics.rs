use super::traits::{require_positive, ConfigSection, ConfigManifest, FieldManifest};
use crate::error::InvpendError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub dt: f64,
    pub rod_length: f64,
    pub position_limit: f64,
    pub gravity: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            rod_length: 2.0,
            position_limit: 10.0,
            gravity: 10.0,
        }
    }
}

impl ConfigSection for PhysicsConfig {
    fn section_name() -> &'static str {
        "physics"
    }

    fn validate(&self) -> Result<(), InvpendError> {
        require_positive("physics", "dt", self.dt)?;
        require_positive("physics", "rod_length", self.rod_length)?;
        require_positive("physics", "position_limit", self.position_limit)?;
        require_positive("physics", "gravity", self.gravity)?;
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Physics".to_string(),
            fields: vec![
                FieldManifest::new("dt", "float", serde_json::json!(0.1), Some(0.0), None,
                    "Integration timestep in seconds"),
                FieldManifest::new("rod_length", "float", serde_json::json!(2.0), Some(0.0), None,
                    "Pole length"),
                FieldManifest::new("position_limit", "float", serde_json::json!(10.0), Some(0.0), None,
                    "Cart fails once |x| exceeds this"),
                FieldManifest::new("gravity", "float", serde_json::json!(10.0), Some(0.0), None,
                    "Gravitational acceleration"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_values() {
        let bad_dt = PhysicsConfig { dt: 0.0, ..Default::default() };
        assert!(bad_dt.validate().is_err());

        let bad_rod = PhysicsConfig { rod_length: -2.0, ..Default::default() };
        assert!(bad_rod.validate().is_err());

        let nan_limit = PhysicsConfig { position_limit: f64::NAN, ..Default::default() };
        assert!(nan_limit.validate().is_err());
    }
}
