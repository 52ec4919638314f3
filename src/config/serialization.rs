use crate::config::{RawSceneConfig, SceneConfig};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Reads a backend-style world seed. Branch completeness is checked later,
/// when the seed is installed into a `ConfigCell`.
pub fn load_scene_config_from_file(path: &Path) -> Result<RawSceneConfig> {
    let json = std::fs::read_to_string(path)?;
    parse_scene_config(&json)
}

pub fn parse_scene_config(json: &str) -> Result<RawSceneConfig> {
    let raw: RawSceneConfig = serde_json::from_str(json)?;
    Ok(raw)
}

pub fn scene_config_to_json(config: &SceneConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use crate::config::{
        BackgroundConfig, LightAnimation, LightConfig, SceneConfig, SceneType, Theme,
    };

    const SEED: &str = r##"{
        "type": "torus-knot",
        "day": {
            "mainObjectColor": "#ffaa00",
            "material": { "materialType": "physical", "clearcoat": 0.5 },
            "background": { "type": "gradient", "topColor": "#88ccff", "bottomColor": "#ffffff", "exponent": 0.5 },
            "lights": [
                { "type": "ambient", "color": "#ffffff", "intensity": 0.4 },
                { "type": "point", "color": "#ffeecc", "intensity": 1.5, "position": [1, 2, 3], "animation": "pulse" }
            ],
            "torusKnot": { "p": 2, "q": 5, "radius": 1.2, "tube": 0.3, "tubularSegments": 200, "radialSegments": 20 },
            "extras": { "fieldDensity": 3 }
        },
        "night": {
            "mainObjectColor": "#5500ff",
            "background": { "type": "stars", "radius": 100, "depth": 50, "count": 4000, "factor": 4, "saturation": 0, "fade": true, "speed": 1 }
        }
    }"##;

    #[test]
    fn test_seed_with_both_themes_installs() {
        let raw = super::parse_scene_config(SEED).unwrap();
        let config = SceneConfig::try_from(raw).unwrap();
        assert_eq!(config.scene_type, SceneType::TorusKnot);
        assert_eq!(config.day.material.clearcoat, 0.5);
        assert_eq!(config.day.material.roughness, 0.4);
        assert_eq!(config.day.torus_knot.as_ref().unwrap().q, 5);
        assert_eq!(config.day.extras.get("fieldDensity").unwrap(), 3);
        assert!(config.night.lights.is_empty());
        assert!(config.night.torus_knot.is_none());

        match &config.day.lights[1] {
            LightConfig::Point {
                decay, animation, ..
            } => {
                assert_eq!(*decay, 2.0);
                assert_eq!(*animation, LightAnimation::Pulse);
            }
            other => panic!("Expected point light, got {:?}", other),
        }
        assert!(matches!(
            config.theme(Theme::Day).background,
            BackgroundConfig::Gradient { .. }
        ));
    }

    #[test]
    fn test_seed_missing_night_parses_but_does_not_install() {
        let json = r##"{ "type": "cube", "day": { "mainObjectColor": "#fff", "background": { "type": "void", "color": "#000" } } }"##;
        let raw = super::parse_scene_config(json).unwrap();
        assert!(raw.night.is_none());
        assert!(SceneConfig::try_from(raw).is_err());
    }

    #[test]
    fn test_config_json_uses_backend_keys() {
        let json = super::scene_config_to_json(&SceneConfig::default()).unwrap();
        assert!(json.contains("\"mainObjectColor\""));
        assert!(json.contains("\"type\": \"sphere\""));
        assert!(!json.contains("torusKnot"));
    }

    #[test]
    fn test_load_from_file_roundtrip() {
        let mut path = std::env::temp_dir();
        path.push(format!("worldview_roundtrip_seed_{}.json", std::process::id()));
        std::fs::write(&path, SEED).unwrap();

        let raw = super::load_scene_config_from_file(&path).unwrap();
        assert_eq!(raw.scene_type, SceneType::TorusKnot);

        let _ = std::fs::remove_file(path);
    }
}
