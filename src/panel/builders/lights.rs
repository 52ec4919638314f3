use super::{folder, BuildContext, INTENSITY, POSITION};
use crate::config::{LightAnimation, LightConfig, SceneThemeConfig};
use crate::panel::binding::LightField;
use crate::panel::{Binding, WidgetNode};

/// One folder per light. A branch without lights contributes nothing.
pub(super) fn build(ctx: &BuildContext, branch: &SceneThemeConfig) -> Option<WidgetNode> {
    if branch.lights.is_empty() {
        return None;
    }
    let folders = branch
        .lights
        .iter()
        .enumerate()
        .map(|(index, light)| light_folder(ctx, index, light))
        .collect();
    Some(folder("lights", "Lights", folders))
}

fn light_folder(ctx: &BuildContext, index: usize, light: &LightConfig) -> WidgetNode {
    let bind = |field| Binding::Light { index, field };
    let children = match light {
        LightConfig::Ambient { color, intensity } => vec![
            ctx.color(bind(LightField::Color), "Color", color),
            ctx.number(bind(LightField::Intensity), "Intensity", *intensity, INTENSITY),
        ],
        LightConfig::Directional {
            color,
            intensity,
            position,
            cast_shadow,
        } => vec![
            ctx.color(bind(LightField::Color), "Color", color),
            ctx.vector3(bind(LightField::Position), "Position", *position, POSITION),
            ctx.number(bind(LightField::Intensity), "Intensity", *intensity, INTENSITY),
            ctx.toggle(bind(LightField::CastShadow), "Cast Shadow", *cast_shadow),
        ],
        LightConfig::Point {
            color,
            intensity,
            position,
            distance,
            decay,
            animation,
        } => vec![
            ctx.color(bind(LightField::Color), "Color", color),
            ctx.vector3(bind(LightField::Position), "Position", *position, POSITION),
            ctx.number(bind(LightField::Intensity), "Intensity", *intensity, INTENSITY),
            ctx.number(bind(LightField::Distance), "Distance", *distance, (0.0, 100.0, 0.5)),
            ctx.number(bind(LightField::Decay), "Decay", *decay, (0.0, 5.0, 0.1)),
            ctx.choice(
                bind(LightField::Animation),
                "Animation",
                animation.as_str(),
                LightAnimation::ALL.iter().map(|preset| preset.as_str()),
            ),
        ],
        LightConfig::Hemisphere {
            sky_color,
            ground_color,
            intensity,
        } => vec![
            ctx.color(bind(LightField::SkyColor), "Sky Color", sky_color),
            ctx.color(bind(LightField::GroundColor), "Ground Color", ground_color),
            ctx.number(bind(LightField::Intensity), "Intensity", *intensity, INTENSITY),
        ],
    };

    let label = format!("Light {} ({})", index + 1, light.kind_name());
    folder(&format!("lights.{}", index), &label, children)
}
