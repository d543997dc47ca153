//! Fire propagation tuning loaded from data/config/fire.toml with built-in
//! defaults, clamping, and env overrides. Malformed or missing options fall
//! back to defaults and are logged; loading never fails the caller.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Recognized options for the fire engine. Any key absent from the file takes
/// its default; an unparseable file yields the full default set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FireCfg {
    pub enabled: bool,
    /// Seconds between propagation cycles.
    pub check_interval_secs: f32,
    /// Flat damage applied to each burning cell per cycle, unless the block
    /// declares a per-material override.
    pub fire_damage: i32,
    /// Re-ignition cooldown after an extinguish, in world-time units.
    pub smoke_duration_secs: u64,
    /// Strength of the heat/activity notification on ignition; 0 disables it.
    pub heat_strength: f32,
    /// Default visual cue identifiers (blocks may override per material).
    pub fire_cue: String,
    pub smoke_cue: String,
    /// Flammability allow-lists consulted when a block carries no explicit tag.
    pub material_ids: Vec<String>,
    pub material_damage_categories: Vec<String>,
    pub material_surface_categories: Vec<String>,
}

impl Default for FireCfg {
    fn default() -> Self {
        Self {
            enabled: true,
            check_interval_secs: 120.0,
            fire_damage: 1,
            smoke_duration_secs: 60,
            heat_strength: 0.0,
            fire_cue: "fire_embers".to_string(),
            smoke_cue: "smoke_plume".to_string(),
            material_ids: vec!["wood".to_string()],
            material_damage_categories: vec!["organic".to_string()],
            material_surface_categories: vec!["plant".to_string()],
        }
    }
}

fn data_root() -> PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

fn clamp(mut cfg: FireCfg) -> FireCfg {
    if cfg.check_interval_secs < 0.1 {
        cfg.check_interval_secs = 0.1;
    }
    if cfg.fire_damage < 0 {
        cfg.fire_damage = 0;
    }
    cfg
}

fn apply_env(mut cfg: FireCfg) -> FireCfg {
    if let Some(v) = std::env::var("FIRE_ENABLED").ok().and_then(|v| v.parse().ok()) {
        cfg.enabled = v;
    }
    if let Some(v) = std::env::var("FIRE_CHECK_INTERVAL").ok().and_then(|v| v.parse().ok()) {
        cfg.check_interval_secs = v;
    }
    if let Some(v) = std::env::var("FIRE_DAMAGE").ok().and_then(|v| v.parse().ok()) {
        cfg.fire_damage = v;
    }
    if let Some(v) = std::env::var("FIRE_SMOKE_DURATION").ok().and_then(|v| v.parse().ok()) {
        cfg.smoke_duration_secs = v;
    }
    cfg
}

/// Load the fire config from the default location, falling back to defaults.
pub fn load_default() -> Result<FireCfg> {
    let path = data_root().join("config/fire.toml");
    if !path.is_file() {
        return Ok(apply_env(clamp(FireCfg::default())));
    }
    let txt = std::fs::read_to_string(&path)
        .with_context(|| format!("read {}", path.display()))?;
    let parsed = match toml::from_str::<FireCfg>(&txt) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("fire config unparseable, using defaults: {e}");
            FireCfg::default()
        }
    };
    Ok(apply_env(clamp(parsed)))
}
