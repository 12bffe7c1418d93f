use super::traits::{ConfigSection, ConfigManifest, FieldManifest};
use crate::error::InvpendError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Print every step of the slot-0 genome each generation.
    pub trace: bool,
    /// Print `gen/max/avg` after each evaluation.
    pub stats: bool,
    /// Replay slot 0 through the visualizer every N generations.
    pub display_every: Option<usize>,
    /// Delay between drawn frames; defaults to the physics timestep.
    pub frame_delay_ms: Option<u64>,
}

impl ConfigSection for ReportingConfig {
    fn section_name() -> &'static str {
        "reporting"
    }

    fn validate(&self) -> Result<(), InvpendError> {
        if self.display_every == Some(0) {
            return Err(InvpendError::Configuration(
                "Display period must be positive".to_string()
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Reporting".to_string(),
            fields: vec![
                FieldManifest::new("trace", "bool", serde_json::json!(false), None, None,
                    "Per-step trace of the first genome"),
                FieldManifest::new("stats", "bool", serde_json::json!(false), None, None,
                    "Per-generation max/avg fitness"),
                FieldManifest::new("display_every", "integer?", serde_json::Value::Null, Some(1.0), None,
                    "Animate the first genome every N generations"),
                FieldManifest::new("frame_delay_ms", "integer?", serde_json::Value::Null, Some(0.0), None,
                    "Milliseconds between animation frames"),
            ],
        }
    }
}
