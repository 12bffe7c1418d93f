use invpend::config::{AppConfig, ConfigBridge, ConfigManager};
use invpend::error::InvpendError;
use std::path::PathBuf;
use std::time::Duration;

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("invpend-{}-{}.toml", name, std::process::id()))
}

#[test]
fn test_save_then_load_round_trip() {
    let path = scratch_file("round-trip");
    let manager = ConfigManager::new();
    manager
        .update(|c| {
            c.evolution.population_size = 250;
            c.evolution.num_generations = Some(40);
            c.evolution.seed = Some(7);
            c.physics.rod_length = 5.0;
            c.reporting.stats = true;
        })
        .unwrap();
    manager.save_to_file(&path).unwrap();

    let loaded = ConfigManager::new();
    loaded.load_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.get(), manager.get());
}

#[test]
fn test_invalid_file_is_a_configuration_error() {
    let path = scratch_file("invalid");
    std::fs::write(&path, "[physics]\ndt = -0.5\n").unwrap();

    let manager = ConfigManager::new();
    let result = manager.load_from_file(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(InvpendError::Configuration(_))));
    assert_eq!(manager.get(), AppConfig::default());
}

#[test]
fn test_missing_file_is_reported() {
    let manager = ConfigManager::new();
    let result = manager.load_from_file(scratch_file("does-not-exist"));
    assert!(matches!(result, Err(InvpendError::Configuration(_))));
}

#[test]
fn test_layered_load_applies_file_then_environment() {
    let path = scratch_file("layered");
    std::fs::write(
        &path,
        "[evolution]\npopulation_size = 300\nmutation_rate = 10\n\n[physics]\nrod_length = 4.0\n",
    )
    .unwrap();
    std::env::set_var("INVPEND__EVOLUTION__MUTATION_RATE", "7");

    let manager = ConfigManager::new();
    let result = manager.load_layered(Some(&path));
    std::env::remove_var("INVPEND__EVOLUTION__MUTATION_RATE");
    std::fs::remove_file(&path).ok();
    result.unwrap();

    let config = manager.get();
    assert_eq!(config.evolution.population_size, 300);
    assert_eq!(config.evolution.mutation_rate, 7);
    assert_eq!(config.physics.rod_length, 4.0);
    assert_eq!(config.physics.dt, 0.1);
    assert_eq!(config.evolution.num_generations, None);
}

#[test]
fn test_bridge_builds_engine_config() {
    let mut config = AppConfig::default();
    config.evolution.min_steps = 5;
    config.evolution.max_steps = 20;
    config.reporting.display_every = Some(3);

    let engine = ConfigBridge::to_engine_config(&config);
    assert_eq!(engine.population_size, 1000);
    assert_eq!(engine.step_range, 5..=20);
    assert_eq!(engine.mutation_rate, 20);
    assert_eq!(engine.physics.position_limit, 10.0);
    assert_eq!(engine.display_every, Some(3));
    assert_eq!(engine.frame_delay, Duration::from_millis(100));

    config.reporting.frame_delay_ms = Some(0);
    assert_eq!(ConfigBridge::to_engine_config(&config).frame_delay, Duration::ZERO);
}

#[test]
fn test_manifests_cover_all_sections() {
    let manifests = AppConfig::default().manifests();
    let sections: Vec<_> = manifests.iter().map(|m| m.section.as_str()).collect();
    assert_eq!(sections, vec!["Evolution", "Physics", "Reporting"]);

    let json = serde_json::to_value(&manifests).unwrap();
    assert_eq!(json[0]["fields"][0]["name"], "population_size");
}
