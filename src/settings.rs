use std::path::Path;

use crate::config::serialization::LoadError;
use crate::scene::store::clamp_spawn_half_extent;

/// Tunables for the editing session. Every field has a default so a partial
/// JSON file is enough to override a single value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    /// Half-size of the cube around the origin new objects spawn in.
    pub spawn_half_extent: f32,
    /// Frames to wait before the drag controller queries the registry.
    pub attach_delay_ticks: u32,
    /// Radians per second of idle rotation.
    pub idle_spin_speed: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub camera_fov_deg: f32,
    pub orbit_sensitivity: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            spawn_half_extent: 2.0,
            attach_delay_ticks: 1,
            idle_spin_speed: 0.4,
            bob_amplitude: 0.15,
            bob_frequency: 0.8,
            camera_fov_deg: 50.0,
            orbit_sensitivity: 0.005,
        }
    }
}

pub fn load_settings(path: &Path) -> Result<EditorSettings, LoadError> {
    let json = std::fs::read_to_string(path)?;
    parse_settings(&json)
}

/// Out-of-range spawn extents are clamped so the store and the camera
/// framing agree on a usable value.
pub fn parse_settings(json: &str) -> Result<EditorSettings, LoadError> {
    let mut settings: EditorSettings = serde_json::from_str(json)?;
    settings.spawn_half_extent = clamp_spawn_half_extent(settings.spawn_half_extent);
    Ok(settings)
}
