//! Themed scene configuration shared by the renderer and the property panel.

pub mod color;
pub mod patch;
pub mod serialization;

use color::is_hex_color;

pub use patch::{create_updater, CommitFn, ConfigCell, ConfigUpdater, LoadState};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }
}

/// Centerpiece variant of the world. Distinct from the user-object catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SceneType {
    #[default]
    Sphere,
    Cube,
    Torus,
    TorusKnot,
    Icosahedron,
    Octahedron,
    Dodecahedron,
    Crystal,
    Fragments,
    Field,
}

impl SceneType {
    pub const ALL: [SceneType; 10] = [
        SceneType::Sphere,
        SceneType::Cube,
        SceneType::Torus,
        SceneType::TorusKnot,
        SceneType::Icosahedron,
        SceneType::Octahedron,
        SceneType::Dodecahedron,
        SceneType::Crystal,
        SceneType::Fragments,
        SceneType::Field,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SceneType::Sphere => "sphere",
            SceneType::Cube => "cube",
            SceneType::Torus => "torus",
            SceneType::TorusKnot => "torus-knot",
            SceneType::Icosahedron => "icosahedron",
            SceneType::Octahedron => "octahedron",
            SceneType::Dodecahedron => "dodecahedron",
            SceneType::Crystal => "crystal",
            SceneType::Fragments => "fragments",
            SceneType::Field => "field",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum MaterialType {
    #[default]
    Standard,
    Physical,
    Basic,
    Phong,
    Toon,
    Lambert,
}

impl MaterialType {
    pub const ALL: [MaterialType; 6] = [
        MaterialType::Standard,
        MaterialType::Physical,
        MaterialType::Basic,
        MaterialType::Phong,
        MaterialType::Toon,
        MaterialType::Lambert,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MaterialType::Standard => "standard",
            MaterialType::Physical => "physical",
            MaterialType::Basic => "basic",
            MaterialType::Phong => "phong",
            MaterialType::Toon => "toon",
            MaterialType::Lambert => "lambert",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    pub fn is_pbr(self) -> bool {
        matches!(self, MaterialType::Standard | MaterialType::Physical)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum GradientMap {
    #[default]
    ThreeTone,
    FiveTone,
}

impl GradientMap {
    pub fn as_str(self) -> &'static str {
        match self {
            GradientMap::ThreeTone => "threeTone",
            GradientMap::FiveTone => "fiveTone",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [GradientMap::ThreeTone, GradientMap::FiveTone]
            .into_iter()
            .find(|map| map.as_str() == name)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaterialConfig {
    pub material_type: MaterialType,
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub ior: f32,
    pub thickness: f32,
    pub transmission: f32,
    pub specular_intensity: f32,
    pub shininess: f32,
    pub specular_color: String,
    pub gradient_map: GradientMap,
    pub wireframe: bool,
    pub transparent: bool,
    pub opacity: f32,
    pub emissive: String,
    pub emissive_intensity: f32,
    pub flat_shading: bool,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            material_type: MaterialType::Standard,
            roughness: 0.4,
            metalness: 0.2,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            ior: 1.5,
            thickness: 0.0,
            transmission: 0.0,
            specular_intensity: 1.0,
            shininess: 30.0,
            specular_color: "#111111".to_string(),
            gradient_map: GradientMap::ThreeTone,
            wireframe: false,
            transparent: false,
            opacity: 1.0,
            emissive: "#000000".to_string(),
            emissive_intensity: 0.0,
            flat_shading: false,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum LightAnimation {
    #[default]
    None,
    Orbit,
    Pulse,
    Flicker,
}

impl LightAnimation {
    pub const ALL: [LightAnimation; 4] = [
        LightAnimation::None,
        LightAnimation::Orbit,
        LightAnimation::Pulse,
        LightAnimation::Flicker,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LightAnimation::None => "none",
            LightAnimation::Orbit => "orbit",
            LightAnimation::Pulse => "pulse",
            LightAnimation::Flicker => "flicker",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|anim| anim.as_str() == name)
    }
}

fn default_decay() -> f32 {
    2.0
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LightConfig {
    Ambient {
        color: String,
        intensity: f32,
    },
    Directional {
        color: String,
        intensity: f32,
        position: [f32; 3],
        #[serde(default)]
        cast_shadow: bool,
    },
    Point {
        color: String,
        intensity: f32,
        position: [f32; 3],
        #[serde(default)]
        distance: f32,
        #[serde(default = "default_decay")]
        decay: f32,
        #[serde(default)]
        animation: LightAnimation,
    },
    Hemisphere {
        sky_color: String,
        ground_color: String,
        intensity: f32,
    },
}

impl LightConfig {
    pub fn kind_name(&self) -> &'static str {
        match self {
            LightConfig::Ambient { .. } => "ambient",
            LightConfig::Directional { .. } => "directional",
            LightConfig::Point { .. } => "point",
            LightConfig::Hemisphere { .. } => "hemisphere",
        }
    }

    pub fn intensity(&self) -> f32 {
        match self {
            LightConfig::Ambient { intensity, .. }
            | LightConfig::Directional { intensity, .. }
            | LightConfig::Point { intensity, .. }
            | LightConfig::Hemisphere { intensity, .. } => *intensity,
        }
    }

    fn colors(&self) -> Vec<(&'static str, &str)> {
        match self {
            LightConfig::Ambient { color, .. }
            | LightConfig::Directional { color, .. }
            | LightConfig::Point { color, .. } => vec![("color", color.as_str())],
            LightConfig::Hemisphere {
                sky_color,
                ground_color,
                ..
            } => vec![
                ("skyColor", sky_color.as_str()),
                ("groundColor", ground_color.as_str()),
            ],
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum EnvironmentPreset {
    #[default]
    Sunset,
    Dawn,
    Night,
    Warehouse,
    Forest,
    Apartment,
    Studio,
    City,
    Park,
    Lobby,
}

impl EnvironmentPreset {
    pub const ALL: [EnvironmentPreset; 10] = [
        EnvironmentPreset::Sunset,
        EnvironmentPreset::Dawn,
        EnvironmentPreset::Night,
        EnvironmentPreset::Warehouse,
        EnvironmentPreset::Forest,
        EnvironmentPreset::Apartment,
        EnvironmentPreset::Studio,
        EnvironmentPreset::City,
        EnvironmentPreset::Park,
        EnvironmentPreset::Lobby,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EnvironmentPreset::Sunset => "sunset",
            EnvironmentPreset::Dawn => "dawn",
            EnvironmentPreset::Night => "night",
            EnvironmentPreset::Warehouse => "warehouse",
            EnvironmentPreset::Forest => "forest",
            EnvironmentPreset::Apartment => "apartment",
            EnvironmentPreset::Studio => "studio",
            EnvironmentPreset::City => "city",
            EnvironmentPreset::Park => "park",
            EnvironmentPreset::Lobby => "lobby",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.as_str() == name)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BackgroundConfig {
    Sky {
        sun_position: [f32; 3],
        turbidity: f32,
        rayleigh: f32,
        mie_coefficient: f32,
        mie_directional_g: f32,
    },
    Stars {
        radius: f32,
        depth: f32,
        count: u32,
        factor: f32,
        saturation: f32,
        fade: bool,
        speed: f32,
    },
    Sparkles {
        count: u32,
        size: f32,
        speed: f32,
        opacity: f32,
        color: String,
        scale: f32,
    },
    Color {
        color: String,
    },
    Gradient {
        top_color: String,
        bottom_color: String,
        exponent: f32,
    },
    Noise {
        color_a: String,
        color_b: String,
        scale: f32,
        speed: f32,
    },
    Plasma {
        color_a: String,
        color_b: String,
        speed: f32,
        intensity: f32,
    },
    Aurora {
        color_a: String,
        color_b: String,
        speed: f32,
        intensity: f32,
    },
    Sunset {
        sky_color: String,
        horizon_color: String,
        sun_color: String,
        intensity: f32,
    },
    Void {
        color: String,
    },
    Fog {
        color: String,
        near: f32,
        far: f32,
    },
    Environment {
        preset: EnvironmentPreset,
        blur: f32,
        intensity: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackgroundKind {
    Sky,
    Stars,
    Sparkles,
    Color,
    Gradient,
    Noise,
    Plasma,
    Aurora,
    Sunset,
    Void,
    Fog,
    Environment,
}

impl BackgroundKind {
    pub const ALL: [BackgroundKind; 12] = [
        BackgroundKind::Sky,
        BackgroundKind::Stars,
        BackgroundKind::Sparkles,
        BackgroundKind::Color,
        BackgroundKind::Gradient,
        BackgroundKind::Noise,
        BackgroundKind::Plasma,
        BackgroundKind::Aurora,
        BackgroundKind::Sunset,
        BackgroundKind::Void,
        BackgroundKind::Fog,
        BackgroundKind::Environment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BackgroundKind::Sky => "sky",
            BackgroundKind::Stars => "stars",
            BackgroundKind::Sparkles => "sparkles",
            BackgroundKind::Color => "color",
            BackgroundKind::Gradient => "gradient",
            BackgroundKind::Noise => "noise",
            BackgroundKind::Plasma => "plasma",
            BackgroundKind::Aurora => "aurora",
            BackgroundKind::Sunset => "sunset",
            BackgroundKind::Void => "void",
            BackgroundKind::Fog => "fog",
            BackgroundKind::Environment => "environment",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Fresh background of this kind, seeded with `tint` where the variant
    /// carries a primary color.
    pub fn default_config(self, tint: &str) -> BackgroundConfig {
        let tint = tint.to_string();
        match self {
            BackgroundKind::Sky => BackgroundConfig::Sky {
                sun_position: [100.0, 20.0, 100.0],
                turbidity: 8.0,
                rayleigh: 2.0,
                mie_coefficient: 0.005,
                mie_directional_g: 0.8,
            },
            BackgroundKind::Stars => BackgroundConfig::Stars {
                radius: 100.0,
                depth: 50.0,
                count: 5000,
                factor: 4.0,
                saturation: 0.0,
                fade: true,
                speed: 1.0,
            },
            BackgroundKind::Sparkles => BackgroundConfig::Sparkles {
                count: 100,
                size: 2.0,
                speed: 0.3,
                opacity: 1.0,
                color: tint,
                scale: 10.0,
            },
            BackgroundKind::Color => BackgroundConfig::Color { color: tint },
            BackgroundKind::Gradient => BackgroundConfig::Gradient {
                top_color: tint,
                bottom_color: "#000000".to_string(),
                exponent: 0.6,
            },
            BackgroundKind::Noise => BackgroundConfig::Noise {
                color_a: tint,
                color_b: "#000000".to_string(),
                scale: 1.0,
                speed: 0.2,
            },
            BackgroundKind::Plasma => BackgroundConfig::Plasma {
                color_a: tint,
                color_b: "#1a0033".to_string(),
                speed: 0.5,
                intensity: 1.0,
            },
            BackgroundKind::Aurora => BackgroundConfig::Aurora {
                color_a: "#00ff99".to_string(),
                color_b: tint,
                speed: 0.3,
                intensity: 1.0,
            },
            BackgroundKind::Sunset => BackgroundConfig::Sunset {
                sky_color: "#ff7e5f".to_string(),
                horizon_color: "#feb47b".to_string(),
                sun_color: "#fff1c1".to_string(),
                intensity: 1.0,
            },
            BackgroundKind::Void => BackgroundConfig::Void { color: tint },
            BackgroundKind::Fog => BackgroundConfig::Fog {
                color: tint,
                near: 5.0,
                far: 40.0,
            },
            BackgroundKind::Environment => BackgroundConfig::Environment {
                preset: EnvironmentPreset::Sunset,
                blur: 0.0,
                intensity: 1.0,
            },
        }
    }
}

impl BackgroundConfig {
    pub fn kind(&self) -> BackgroundKind {
        match self {
            BackgroundConfig::Sky { .. } => BackgroundKind::Sky,
            BackgroundConfig::Stars { .. } => BackgroundKind::Stars,
            BackgroundConfig::Sparkles { .. } => BackgroundKind::Sparkles,
            BackgroundConfig::Color { .. } => BackgroundKind::Color,
            BackgroundConfig::Gradient { .. } => BackgroundKind::Gradient,
            BackgroundConfig::Noise { .. } => BackgroundKind::Noise,
            BackgroundConfig::Plasma { .. } => BackgroundKind::Plasma,
            BackgroundConfig::Aurora { .. } => BackgroundKind::Aurora,
            BackgroundConfig::Sunset { .. } => BackgroundKind::Sunset,
            BackgroundConfig::Void { .. } => BackgroundKind::Void,
            BackgroundConfig::Fog { .. } => BackgroundKind::Fog,
            BackgroundConfig::Environment { .. } => BackgroundKind::Environment,
        }
    }

    /// Color most representative of the background, used when switching kinds.
    pub fn primary_color(&self) -> Option<&str> {
        match self {
            BackgroundConfig::Sparkles { color, .. }
            | BackgroundConfig::Color { color }
            | BackgroundConfig::Void { color }
            | BackgroundConfig::Fog { color, .. } => Some(color.as_str()),
            BackgroundConfig::Gradient { top_color, .. } => Some(top_color.as_str()),
            BackgroundConfig::Noise { color_a, .. }
            | BackgroundConfig::Plasma { color_a, .. } => Some(color_a.as_str()),
            BackgroundConfig::Aurora { color_b, .. } => Some(color_b.as_str()),
            BackgroundConfig::Sunset { sky_color, .. } => Some(sky_color.as_str()),
            BackgroundConfig::Sky { .. }
            | BackgroundConfig::Stars { .. }
            | BackgroundConfig::Environment { .. } => None,
        }
    }

    fn colors(&self) -> Vec<(&'static str, &str)> {
        match self {
            BackgroundConfig::Sparkles { color, .. }
            | BackgroundConfig::Color { color }
            | BackgroundConfig::Void { color }
            | BackgroundConfig::Fog { color, .. } => vec![("color", color.as_str())],
            BackgroundConfig::Gradient {
                top_color,
                bottom_color,
                ..
            } => vec![
                ("topColor", top_color.as_str()),
                ("bottomColor", bottom_color.as_str()),
            ],
            BackgroundConfig::Noise {
                color_a, color_b, ..
            }
            | BackgroundConfig::Plasma {
                color_a, color_b, ..
            }
            | BackgroundConfig::Aurora {
                color_a, color_b, ..
            } => vec![("colorA", color_a.as_str()), ("colorB", color_b.as_str())],
            BackgroundConfig::Sunset {
                sky_color,
                horizon_color,
                sun_color,
                ..
            } => vec![
                ("skyColor", sky_color.as_str()),
                ("horizonColor", horizon_color.as_str()),
                ("sunColor", sun_color.as_str()),
            ],
            BackgroundConfig::Sky { .. }
            | BackgroundConfig::Stars { .. }
            | BackgroundConfig::Environment { .. } => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorusKnotParams {
    pub p: u32,
    pub q: u32,
    pub radius: f32,
    pub tube: f32,
    pub tubular_segments: u32,
    pub radial_segments: u32,
}

impl Default for TorusKnotParams {
    fn default() -> Self {
        Self {
            p: 2,
            q: 3,
            radius: 1.0,
            tube: 0.3,
            tubular_segments: 128,
            radial_segments: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorusParams {
    pub radius: f32,
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
    pub arc: f32,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            tube: 0.4,
            radial_segments: 16,
            tubular_segments: 64,
            arc: std::f32::consts::TAU,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SphereParams {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 64,
            height_segments: 32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolyhedronParams {
    pub radius: f32,
    pub detail: u32,
}

impl Default for PolyhedronParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            detail: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CubeParams {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for CubeParams {
    fn default() -> Self {
        Self {
            width: 1.5,
            height: 1.5,
            depth: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneThemeConfig {
    pub main_object_color: String,
    #[serde(default)]
    pub material: MaterialConfig,
    pub background: BackgroundConfig,
    #[serde(default)]
    pub lights: Vec<LightConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torus_knot: Option<TorusKnotParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torus: Option<TorusParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sphere: Option<SphereParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyhedron: Option<PolyhedronParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cube: Option<CubeParams>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extras: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("scene config is missing the {0:?} theme")]
    MissingTheme(Theme),
    #[error("invalid color for {field}: {value:?}")]
    InvalidColor { field: String, value: String },
    #[error("{field} out of range: {value}")]
    OutOfRange { field: String, value: f32 },
    #[error("scene config has not been loaded yet")]
    NotLoaded,
}

fn check_color(field: String, value: &str) -> Result<(), ConfigError> {
    if is_hex_color(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidColor {
            field,
            value: value.to_string(),
        })
    }
}

fn check_range(field: &str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

fn check_positive(field: &str, value: f32) -> Result<(), ConfigError> {
    check_range(field, value, f32::MIN_POSITIVE, f32::MAX)
}

impl SceneThemeConfig {
    /// Shape check run before a branch is handed to the renderer or panel.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_color("mainObjectColor".to_string(), &self.main_object_color)?;

        let material = &self.material;
        check_range("material.roughness", material.roughness, 0.0, 1.0)?;
        check_range("material.metalness", material.metalness, 0.0, 1.0)?;
        check_range("material.opacity", material.opacity, 0.0, 1.0)?;
        check_range("material.clearcoat", material.clearcoat, 0.0, 1.0)?;
        check_range("material.ior", material.ior, 1.0, 2.333)?;
        check_range("material.shininess", material.shininess, 0.0, 1000.0)?;
        check_color("material.emissive".to_string(), &material.emissive)?;
        check_color("material.specularColor".to_string(), &material.specular_color)?;

        for (index, light) in self.lights.iter().enumerate() {
            for (name, value) in light.colors() {
                check_color(format!("lights[{}].{}", index, name), value)?;
            }
            check_range(
                &format!("lights[{}].intensity", index),
                light.intensity(),
                0.0,
                f32::MAX,
            )?;
        }

        for (name, value) in self.background.colors() {
            check_color(format!("background.{}", name), value)?;
        }
        if let BackgroundConfig::Fog { near, far, .. } = &self.background {
            check_range("background.far", *far, *near, f32::MAX)?;
        }

        if let Some(knot) = &self.torus_knot {
            check_positive("torusKnot.radius", knot.radius)?;
            check_positive("torusKnot.tube", knot.tube)?;
        }
        if let Some(torus) = &self.torus {
            check_positive("torus.radius", torus.radius)?;
            check_positive("torus.tube", torus.tube)?;
        }
        if let Some(sphere) = &self.sphere {
            check_positive("sphere.radius", sphere.radius)?;
        }
        if let Some(poly) = &self.polyhedron {
            check_positive("polyhedron.radius", poly.radius)?;
        }
        if let Some(cube) = &self.cube {
            check_positive("cube.width", cube.width)?;
            check_positive("cube.height", cube.height)?;
            check_positive("cube.depth", cube.depth)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneConfig {
    #[serde(rename = "type")]
    pub scene_type: SceneType,
    pub day: SceneThemeConfig,
    pub night: SceneThemeConfig,
}

impl SceneConfig {
    pub fn theme(&self, theme: Theme) -> &SceneThemeConfig {
        match theme {
            Theme::Day => &self.day,
            Theme::Night => &self.night,
        }
    }

    pub fn theme_mut(&mut self, theme: Theme) -> &mut SceneThemeConfig {
        match theme {
            Theme::Day => &mut self.day,
            Theme::Night => &mut self.night,
        }
    }

    /// Returns the themed branch only if it passes the shape check.
    pub fn ready_theme(&self, theme: Theme) -> Result<&SceneThemeConfig, ConfigError> {
        let branch = self.theme(theme);
        branch.validate()?;
        Ok(branch)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.day.validate()?;
        self.night.validate()
    }
}

/// Config as it arrives from the backend, before both branches are known.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawSceneConfig {
    #[serde(rename = "type", default)]
    pub scene_type: SceneType,
    #[serde(default)]
    pub day: Option<SceneThemeConfig>,
    #[serde(default)]
    pub night: Option<SceneThemeConfig>,
}

impl TryFrom<RawSceneConfig> for SceneConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSceneConfig) -> Result<Self, Self::Error> {
        let day = raw.day.ok_or(ConfigError::MissingTheme(Theme::Day))?;
        let night = raw.night.ok_or(ConfigError::MissingTheme(Theme::Night))?;
        let config = SceneConfig {
            scene_type: raw.scene_type,
            day,
            night,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let day = SceneThemeConfig {
            main_object_color: "#4f8cff".to_string(),
            material: MaterialConfig::default(),
            background: BackgroundConfig::Sky {
                sun_position: [100.0, 20.0, 100.0],
                turbidity: 8.0,
                rayleigh: 2.0,
                mie_coefficient: 0.005,
                mie_directional_g: 0.8,
            },
            lights: vec![
                LightConfig::Ambient {
                    color: "#ffffff".to_string(),
                    intensity: 0.5,
                },
                LightConfig::Directional {
                    color: "#ffffff".to_string(),
                    intensity: 1.0,
                    position: [5.0, 5.0, 5.0],
                    cast_shadow: true,
                },
            ],
            torus_knot: None,
            torus: None,
            sphere: Some(SphereParams::default()),
            polyhedron: None,
            cube: None,
            extras: serde_json::Map::new(),
        };
        let night = SceneThemeConfig {
            main_object_color: "#c084fc".to_string(),
            material: MaterialConfig {
                emissive: "#2a0a4a".to_string(),
                emissive_intensity: 0.4,
                ..MaterialConfig::default()
            },
            background: BackgroundKind::Stars.default_config("#000000"),
            lights: vec![
                LightConfig::Ambient {
                    color: "#223366".to_string(),
                    intensity: 0.2,
                },
                LightConfig::Point {
                    color: "#c084fc".to_string(),
                    intensity: 2.0,
                    position: [2.0, 3.0, 2.0],
                    distance: 0.0,
                    decay: 2.0,
                    animation: LightAnimation::Orbit,
                },
            ],
            torus_knot: None,
            torus: None,
            sphere: Some(SphereParams::default()),
            polyhedron: None,
            cube: None,
            extras: serde_json::Map::new(),
        };
        Self {
            scene_type: SceneType::Sphere,
            day,
            night,
        }
    }
}
