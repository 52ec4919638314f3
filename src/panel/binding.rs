//! Typed paths from a panel control into a theme branch.

use crate::config::{
    BackgroundConfig, BackgroundKind, ConfigError, EnvironmentPreset, GradientMap, LightAnimation,
    LightConfig, MaterialType, SceneThemeConfig,
};
use crate::panel::ControlValue;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BindingError {
    #[error("{key} expects a {expected} value")]
    TypeMismatch { key: String, expected: &'static str },
    #[error("{key} has no section to write into")]
    MissingSection { key: String },
    #[error("{key} does not apply to the current variant")]
    NotOnVariant { key: String },
    #[error("{value:?} is not a valid option for {key}")]
    UnknownOption { key: String, value: String },
    #[error("{value} is outside the range of {key}")]
    OutOfRange { key: String, value: String },
    #[error("edit rejected: {0}")]
    Rejected(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialField {
    Kind,
    Roughness,
    Metalness,
    Clearcoat,
    ClearcoatRoughness,
    Ior,
    Thickness,
    Transmission,
    SpecularIntensity,
    Shininess,
    SpecularColor,
    GradientMap,
    Wireframe,
    Transparent,
    Opacity,
    Emissive,
    EmissiveIntensity,
    FlatShading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightField {
    Color,
    Intensity,
    Position,
    CastShadow,
    Distance,
    Decay,
    Animation,
    SkyColor,
    GroundColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackgroundField {
    Kind,
    Color,
    SunPosition,
    Turbidity,
    Rayleigh,
    MieCoefficient,
    MieDirectionalG,
    Radius,
    Depth,
    Count,
    Factor,
    Saturation,
    Fade,
    Speed,
    Size,
    Opacity,
    Scale,
    TopColor,
    BottomColor,
    Exponent,
    ColorA,
    ColorB,
    Intensity,
    SkyColor,
    HorizonColor,
    SunColor,
    Near,
    Far,
    Preset,
    Blur,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryField {
    TorusKnotP,
    TorusKnotQ,
    TorusKnotRadius,
    TorusKnotTube,
    TorusKnotTubularSegments,
    TorusKnotRadialSegments,
    TorusRadius,
    TorusTube,
    TorusRadialSegments,
    TorusTubularSegments,
    TorusArc,
    SphereRadius,
    SphereWidthSegments,
    SphereHeightSegments,
    PolyhedronRadius,
    PolyhedronDetail,
    CubeWidth,
    CubeHeight,
    CubeDepth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    MainObjectColor,
    Material(MaterialField),
    Light { index: usize, field: LightField },
    Background(BackgroundField),
    Geometry(GeometryField),
}

impl MaterialField {
    fn name(self) -> &'static str {
        match self {
            MaterialField::Kind => "materialType",
            MaterialField::Roughness => "roughness",
            MaterialField::Metalness => "metalness",
            MaterialField::Clearcoat => "clearcoat",
            MaterialField::ClearcoatRoughness => "clearcoatRoughness",
            MaterialField::Ior => "ior",
            MaterialField::Thickness => "thickness",
            MaterialField::Transmission => "transmission",
            MaterialField::SpecularIntensity => "specularIntensity",
            MaterialField::Shininess => "shininess",
            MaterialField::SpecularColor => "specularColor",
            MaterialField::GradientMap => "gradientMap",
            MaterialField::Wireframe => "wireframe",
            MaterialField::Transparent => "transparent",
            MaterialField::Opacity => "opacity",
            MaterialField::Emissive => "emissive",
            MaterialField::EmissiveIntensity => "emissiveIntensity",
            MaterialField::FlatShading => "flatShading",
        }
    }
}

impl LightField {
    fn name(self) -> &'static str {
        match self {
            LightField::Color => "color",
            LightField::Intensity => "intensity",
            LightField::Position => "position",
            LightField::CastShadow => "castShadow",
            LightField::Distance => "distance",
            LightField::Decay => "decay",
            LightField::Animation => "animation",
            LightField::SkyColor => "skyColor",
            LightField::GroundColor => "groundColor",
        }
    }
}

impl BackgroundField {
    fn name(self) -> &'static str {
        match self {
            BackgroundField::Kind => "type",
            BackgroundField::Color => "color",
            BackgroundField::SunPosition => "sunPosition",
            BackgroundField::Turbidity => "turbidity",
            BackgroundField::Rayleigh => "rayleigh",
            BackgroundField::MieCoefficient => "mieCoefficient",
            BackgroundField::MieDirectionalG => "mieDirectionalG",
            BackgroundField::Radius => "radius",
            BackgroundField::Depth => "depth",
            BackgroundField::Count => "count",
            BackgroundField::Factor => "factor",
            BackgroundField::Saturation => "saturation",
            BackgroundField::Fade => "fade",
            BackgroundField::Speed => "speed",
            BackgroundField::Size => "size",
            BackgroundField::Opacity => "opacity",
            BackgroundField::Scale => "scale",
            BackgroundField::TopColor => "topColor",
            BackgroundField::BottomColor => "bottomColor",
            BackgroundField::Exponent => "exponent",
            BackgroundField::ColorA => "colorA",
            BackgroundField::ColorB => "colorB",
            BackgroundField::Intensity => "intensity",
            BackgroundField::SkyColor => "skyColor",
            BackgroundField::HorizonColor => "horizonColor",
            BackgroundField::SunColor => "sunColor",
            BackgroundField::Near => "near",
            BackgroundField::Far => "far",
            BackgroundField::Preset => "preset",
            BackgroundField::Blur => "blur",
        }
    }
}

impl GeometryField {
    fn path(self) -> &'static str {
        match self {
            GeometryField::TorusKnotP => "torusKnot.p",
            GeometryField::TorusKnotQ => "torusKnot.q",
            GeometryField::TorusKnotRadius => "torusKnot.radius",
            GeometryField::TorusKnotTube => "torusKnot.tube",
            GeometryField::TorusKnotTubularSegments => "torusKnot.tubularSegments",
            GeometryField::TorusKnotRadialSegments => "torusKnot.radialSegments",
            GeometryField::TorusRadius => "torus.radius",
            GeometryField::TorusTube => "torus.tube",
            GeometryField::TorusRadialSegments => "torus.radialSegments",
            GeometryField::TorusTubularSegments => "torus.tubularSegments",
            GeometryField::TorusArc => "torus.arc",
            GeometryField::SphereRadius => "sphere.radius",
            GeometryField::SphereWidthSegments => "sphere.widthSegments",
            GeometryField::SphereHeightSegments => "sphere.heightSegments",
            GeometryField::PolyhedronRadius => "polyhedron.radius",
            GeometryField::PolyhedronDetail => "polyhedron.detail",
            GeometryField::CubeWidth => "cube.width",
            GeometryField::CubeHeight => "cube.height",
            GeometryField::CubeDepth => "cube.depth",
        }
    }
}

impl Binding {
    /// Dotted path of the bound field, as it appears in the backend JSON.
    pub fn key(&self) -> String {
        match self {
            Binding::MainObjectColor => "mainObjectColor".to_string(),
            Binding::Material(field) => format!("material.{}", field.name()),
            Binding::Light { index, field } => format!("lights.{}.{}", index, field.name()),
            Binding::Background(field) => format!("background.{}", field.name()),
            Binding::Geometry(field) => field.path().to_string(),
        }
    }

    /// Writes `value` into `target`, then re-runs the shape check so an edit
    /// can never leave the branch unrenderable.
    pub fn write(
        &self,
        target: &mut SceneThemeConfig,
        value: ControlValue,
    ) -> Result<(), BindingError> {
        let key = self.key();
        match self {
            Binding::MainObjectColor => target.main_object_color = color(&key, value)?,
            Binding::Material(field) => write_material(&key, *field, target, value)?,
            Binding::Light { index, field } => {
                let light = target
                    .lights
                    .get_mut(*index)
                    .ok_or_else(|| BindingError::MissingSection { key: key.clone() })?;
                write_light(&key, *field, light, value)?;
            }
            Binding::Background(field) => write_background(&key, *field, target, value)?,
            Binding::Geometry(field) => write_geometry(&key, *field, target, value)?,
        }
        target.validate()?;
        Ok(())
    }
}

fn color(key: &str, value: ControlValue) -> Result<String, BindingError> {
    match value {
        ControlValue::Color(color) => Ok(color),
        _ => Err(mismatch(key, "color")),
    }
}

fn number(key: &str, value: ControlValue) -> Result<f32, BindingError> {
    match value {
        ControlValue::Number(number) => Ok(number),
        ControlValue::Integer(integer) => Ok(integer as f32),
        _ => Err(mismatch(key, "number")),
    }
}

fn integer(key: &str, value: ControlValue) -> Result<u32, BindingError> {
    match value {
        ControlValue::Integer(integer) => {
            u32::try_from(integer).map_err(|_| out_of_range(key, integer.to_string()))
        }
        ControlValue::Number(number) => {
            let rounded = number.round();
            if rounded.is_finite() && (0.0..=u32::MAX as f32).contains(&rounded) {
                Ok(rounded as u32)
            } else {
                Err(out_of_range(key, number.to_string()))
            }
        }
        _ => Err(mismatch(key, "non-negative integer")),
    }
}

fn toggle(key: &str, value: ControlValue) -> Result<bool, BindingError> {
    match value {
        ControlValue::Toggle(flag) => Ok(flag),
        _ => Err(mismatch(key, "toggle")),
    }
}

fn choice(key: &str, value: ControlValue) -> Result<String, BindingError> {
    match value {
        ControlValue::Choice(choice) => Ok(choice),
        _ => Err(mismatch(key, "choice")),
    }
}

fn vector3(key: &str, value: ControlValue) -> Result<[f32; 3], BindingError> {
    match value {
        ControlValue::Vector3(vector) => Ok(vector),
        _ => Err(mismatch(key, "vector3")),
    }
}

fn mismatch(key: &str, expected: &'static str) -> BindingError {
    BindingError::TypeMismatch {
        key: key.to_string(),
        expected,
    }
}

pub(crate) fn out_of_range(key: &str, value: String) -> BindingError {
    BindingError::OutOfRange {
        key: key.to_string(),
        value,
    }
}

fn unknown_option(key: &str, value: String) -> BindingError {
    BindingError::UnknownOption {
        key: key.to_string(),
        value,
    }
}

fn write_material(
    key: &str,
    field: MaterialField,
    target: &mut SceneThemeConfig,
    value: ControlValue,
) -> Result<(), BindingError> {
    let material = &mut target.material;
    match field {
        MaterialField::Kind => {
            let name = choice(key, value)?;
            material.material_type =
                MaterialType::from_name(&name).ok_or_else(|| unknown_option(key, name))?;
        }
        MaterialField::GradientMap => {
            let name = choice(key, value)?;
            material.gradient_map =
                GradientMap::from_name(&name).ok_or_else(|| unknown_option(key, name))?;
        }
        MaterialField::SpecularColor => material.specular_color = color(key, value)?,
        MaterialField::Emissive => material.emissive = color(key, value)?,
        MaterialField::Wireframe => material.wireframe = toggle(key, value)?,
        MaterialField::Transparent => material.transparent = toggle(key, value)?,
        MaterialField::FlatShading => material.flat_shading = toggle(key, value)?,
        MaterialField::Roughness => material.roughness = number(key, value)?,
        MaterialField::Metalness => material.metalness = number(key, value)?,
        MaterialField::Clearcoat => material.clearcoat = number(key, value)?,
        MaterialField::ClearcoatRoughness => material.clearcoat_roughness = number(key, value)?,
        MaterialField::Ior => material.ior = number(key, value)?,
        MaterialField::Thickness => material.thickness = number(key, value)?,
        MaterialField::Transmission => material.transmission = number(key, value)?,
        MaterialField::SpecularIntensity => material.specular_intensity = number(key, value)?,
        MaterialField::Shininess => material.shininess = number(key, value)?,
        MaterialField::Opacity => material.opacity = number(key, value)?,
        MaterialField::EmissiveIntensity => material.emissive_intensity = number(key, value)?,
    }
    Ok(())
}

fn write_light(
    key: &str,
    field: LightField,
    light: &mut LightConfig,
    value: ControlValue,
) -> Result<(), BindingError> {
    let not_on_variant = || BindingError::NotOnVariant {
        key: key.to_string(),
    };
    match (light, field) {
        (
            LightConfig::Ambient { color: slot, .. }
            | LightConfig::Directional { color: slot, .. }
            | LightConfig::Point { color: slot, .. },
            LightField::Color,
        )
        | (LightConfig::Hemisphere { sky_color: slot, .. }, LightField::SkyColor)
        | (LightConfig::Hemisphere { ground_color: slot, .. }, LightField::GroundColor) => {
            *slot = color(key, value)?
        }
        (
            LightConfig::Ambient { intensity: slot, .. }
            | LightConfig::Directional { intensity: slot, .. }
            | LightConfig::Point { intensity: slot, .. }
            | LightConfig::Hemisphere { intensity: slot, .. },
            LightField::Intensity,
        )
        | (LightConfig::Point { distance: slot, .. }, LightField::Distance)
        | (LightConfig::Point { decay: slot, .. }, LightField::Decay) => {
            *slot = number(key, value)?
        }
        (
            LightConfig::Directional { position: slot, .. }
            | LightConfig::Point { position: slot, .. },
            LightField::Position,
        ) => *slot = vector3(key, value)?,
        (LightConfig::Directional { cast_shadow, .. }, LightField::CastShadow) => {
            *cast_shadow = toggle(key, value)?
        }
        (LightConfig::Point { animation, .. }, LightField::Animation) => {
            let name = choice(key, value)?;
            *animation =
                LightAnimation::from_name(&name).ok_or_else(|| unknown_option(key, name))?;
        }
        _ => return Err(not_on_variant()),
    }
    Ok(())
}

fn write_background(
    key: &str,
    field: BackgroundField,
    target: &mut SceneThemeConfig,
    value: ControlValue,
) -> Result<(), BindingError> {
    if field == BackgroundField::Kind {
        let name = choice(key, value)?;
        let kind = BackgroundKind::from_name(&name).ok_or_else(|| unknown_option(key, name))?;
        if kind != target.background.kind() {
            target.background = kind.default_config(&target.main_object_color);
        }
        return Ok(());
    }

    let not_on_variant = || BindingError::NotOnVariant {
        key: key.to_string(),
    };
    use BackgroundConfig as B;
    use BackgroundField as F;
    match (&mut target.background, field) {
        (
            B::Sparkles { color: slot, .. }
            | B::Color { color: slot }
            | B::Void { color: slot }
            | B::Fog { color: slot, .. },
            F::Color,
        )
        | (B::Gradient { top_color: slot, .. }, F::TopColor)
        | (B::Gradient { bottom_color: slot, .. }, F::BottomColor)
        | (
            B::Noise { color_a: slot, .. }
            | B::Plasma { color_a: slot, .. }
            | B::Aurora { color_a: slot, .. },
            F::ColorA,
        )
        | (
            B::Noise { color_b: slot, .. }
            | B::Plasma { color_b: slot, .. }
            | B::Aurora { color_b: slot, .. },
            F::ColorB,
        )
        | (B::Sunset { sky_color: slot, .. }, F::SkyColor)
        | (B::Sunset { horizon_color: slot, .. }, F::HorizonColor)
        | (B::Sunset { sun_color: slot, .. }, F::SunColor) => *slot = color(key, value)?,

        (B::Sky { sun_position, .. }, F::SunPosition) => *sun_position = vector3(key, value)?,

        (B::Stars { count: slot, .. } | B::Sparkles { count: slot, .. }, F::Count) => {
            *slot = integer(key, value)?
        }

        (B::Stars { fade, .. }, F::Fade) => *fade = toggle(key, value)?,

        (B::Environment { preset, .. }, F::Preset) => {
            let name = choice(key, value)?;
            *preset =
                EnvironmentPreset::from_name(&name).ok_or_else(|| unknown_option(key, name))?;
        }

        (B::Sky { turbidity: slot, .. }, F::Turbidity)
        | (B::Sky { rayleigh: slot, .. }, F::Rayleigh)
        | (B::Sky { mie_coefficient: slot, .. }, F::MieCoefficient)
        | (B::Sky { mie_directional_g: slot, .. }, F::MieDirectionalG)
        | (B::Stars { radius: slot, .. }, F::Radius)
        | (B::Stars { depth: slot, .. }, F::Depth)
        | (B::Stars { factor: slot, .. }, F::Factor)
        | (B::Stars { saturation: slot, .. }, F::Saturation)
        | (
            B::Stars { speed: slot, .. }
            | B::Sparkles { speed: slot, .. }
            | B::Noise { speed: slot, .. }
            | B::Plasma { speed: slot, .. }
            | B::Aurora { speed: slot, .. },
            F::Speed,
        )
        | (B::Sparkles { size: slot, .. }, F::Size)
        | (B::Sparkles { opacity: slot, .. }, F::Opacity)
        | (B::Sparkles { scale: slot, .. } | B::Noise { scale: slot, .. }, F::Scale)
        | (B::Gradient { exponent: slot, .. }, F::Exponent)
        | (
            B::Plasma { intensity: slot, .. }
            | B::Aurora { intensity: slot, .. }
            | B::Sunset { intensity: slot, .. }
            | B::Environment { intensity: slot, .. },
            F::Intensity,
        )
        | (B::Fog { near: slot, .. }, F::Near)
        | (B::Fog { far: slot, .. }, F::Far)
        | (B::Environment { blur: slot, .. }, F::Blur) => *slot = number(key, value)?,

        _ => return Err(not_on_variant()),
    }
    Ok(())
}

fn write_geometry(
    key: &str,
    field: GeometryField,
    target: &mut SceneThemeConfig,
    value: ControlValue,
) -> Result<(), BindingError> {
    let missing = || BindingError::MissingSection {
        key: key.to_string(),
    };
    use GeometryField as G;
    match field {
        G::TorusKnotP
        | G::TorusKnotQ
        | G::TorusKnotRadius
        | G::TorusKnotTube
        | G::TorusKnotTubularSegments
        | G::TorusKnotRadialSegments => {
            let params = target.torus_knot.as_mut().ok_or_else(missing)?;
            match field {
                G::TorusKnotP => params.p = integer(key, value)?,
                G::TorusKnotQ => params.q = integer(key, value)?,
                G::TorusKnotRadius => params.radius = number(key, value)?,
                G::TorusKnotTube => params.tube = number(key, value)?,
                G::TorusKnotTubularSegments => params.tubular_segments = integer(key, value)?,
                _ => params.radial_segments = integer(key, value)?,
            }
        }
        G::TorusRadius
        | G::TorusTube
        | G::TorusRadialSegments
        | G::TorusTubularSegments
        | G::TorusArc => {
            let params = target.torus.as_mut().ok_or_else(missing)?;
            match field {
                G::TorusRadius => params.radius = number(key, value)?,
                G::TorusTube => params.tube = number(key, value)?,
                G::TorusRadialSegments => params.radial_segments = integer(key, value)?,
                G::TorusTubularSegments => params.tubular_segments = integer(key, value)?,
                _ => params.arc = number(key, value)?,
            }
        }
        G::SphereRadius | G::SphereWidthSegments | G::SphereHeightSegments => {
            let params = target.sphere.as_mut().ok_or_else(missing)?;
            match field {
                G::SphereRadius => params.radius = number(key, value)?,
                G::SphereWidthSegments => params.width_segments = integer(key, value)?,
                _ => params.height_segments = integer(key, value)?,
            }
        }
        G::PolyhedronRadius | G::PolyhedronDetail => {
            let params = target.polyhedron.as_mut().ok_or_else(missing)?;
            match field {
                G::PolyhedronRadius => params.radius = number(key, value)?,
                _ => params.detail = integer(key, value)?,
            }
        }
        G::CubeWidth | G::CubeHeight | G::CubeDepth => {
            let params = target.cube.as_mut().ok_or_else(missing)?;
            match field {
                G::CubeWidth => params.width = number(key, value)?,
                G::CubeHeight => params.height = number(key, value)?,
                _ => params.depth = number(key, value)?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SceneConfig, TorusKnotParams};

    fn day() -> SceneThemeConfig {
        SceneConfig::default().day
    }

    #[test]
    fn keys_follow_backend_paths() {
        assert_eq!(Binding::MainObjectColor.key(), "mainObjectColor");
        assert_eq!(
            Binding::Material(MaterialField::ClearcoatRoughness).key(),
            "material.clearcoatRoughness"
        );
        assert_eq!(
            Binding::Light {
                index: 2,
                field: LightField::GroundColor
            }
            .key(),
            "lights.2.groundColor"
        );
        assert_eq!(Binding::Background(BackgroundField::Kind).key(), "background.type");
        assert_eq!(
            Binding::Geometry(GeometryField::TorusKnotTubularSegments).key(),
            "torusKnot.tubularSegments"
        );
    }

    #[test]
    fn writes_land_on_the_bound_field() {
        let mut theme = day();
        Binding::Material(MaterialField::Roughness)
            .write(&mut theme, ControlValue::Number(0.9))
            .unwrap();
        Binding::MainObjectColor
            .write(&mut theme, ControlValue::Color("#123456".to_string()))
            .unwrap();
        assert_eq!(theme.material.roughness, 0.9);
        assert_eq!(theme.main_object_color, "#123456");
    }

    #[test]
    fn mismatched_value_is_rejected() {
        let mut theme = day();
        let err = Binding::Material(MaterialField::Wireframe)
            .write(&mut theme, ControlValue::Number(1.0))
            .unwrap_err();
        assert!(matches!(err, BindingError::TypeMismatch { .. }));
    }

    #[test]
    fn invalid_result_is_rejected_by_shape_check() {
        let mut theme = day();
        let err = Binding::MainObjectColor
            .write(&mut theme, ControlValue::Color("teal".to_string()))
            .unwrap_err();
        assert!(matches!(err, BindingError::Rejected(_)));
    }

    #[test]
    fn light_field_must_exist_on_variant() {
        let mut theme = day();
        let ambient = theme
            .lights
            .iter()
            .position(|light| matches!(light, LightConfig::Ambient { .. }))
            .unwrap();
        let err = Binding::Light {
            index: ambient,
            field: LightField::Position,
        }
        .write(&mut theme, ControlValue::Vector3([1.0, 2.0, 3.0]))
        .unwrap_err();
        assert!(matches!(err, BindingError::NotOnVariant { .. }));

        let err = Binding::Light {
            index: 99,
            field: LightField::Color,
        }
        .write(&mut theme, ControlValue::Color("#ffffff".to_string()))
        .unwrap_err();
        assert!(matches!(err, BindingError::MissingSection { .. }));
    }

    #[test]
    fn background_kind_switch_installs_defaults() {
        let mut theme = day();
        Binding::Background(BackgroundField::Kind)
            .write(&mut theme, ControlValue::Choice("fog".to_string()))
            .unwrap();
        assert_eq!(theme.background.kind(), BackgroundKind::Fog);
        Binding::Background(BackgroundField::Far)
            .write(&mut theme, ControlValue::Number(80.0))
            .unwrap();
        match theme.background {
            BackgroundConfig::Fog { far, .. } => assert_eq!(far, 80.0),
            ref other => panic!("expected fog, got {:?}", other),
        }
    }

    #[test]
    fn geometry_write_needs_its_section() {
        let mut theme = day();
        theme.torus_knot = None;
        let err = Binding::Geometry(GeometryField::TorusKnotP)
            .write(&mut theme, ControlValue::Integer(4))
            .unwrap_err();
        assert!(matches!(err, BindingError::MissingSection { .. }));

        theme.torus_knot = Some(TorusKnotParams::default());
        Binding::Geometry(GeometryField::TorusKnotP)
            .write(&mut theme, ControlValue::Integer(4))
            .unwrap();
        assert_eq!(theme.torus_knot.unwrap().p, 4);
    }

    #[test]
    fn integers_that_do_not_fit_are_rejected_not_truncated() {
        let mut theme = day();
        theme.torus_knot = Some(TorusKnotParams::default());
        let before = theme.clone();

        for value in [
            ControlValue::Integer(4_294_967_297),
            ControlValue::Integer(-1),
            ControlValue::Number(f32::INFINITY),
        ] {
            let err = Binding::Geometry(GeometryField::TorusKnotP)
                .write(&mut theme, value)
                .unwrap_err();
            assert!(matches!(err, BindingError::OutOfRange { .. }));
        }
        assert_eq!(theme, before);
    }
}
