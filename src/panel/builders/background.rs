use super::{folder, BuildContext, INTENSITY, SPEED, UNIT};
use crate::config::{BackgroundConfig, BackgroundKind, EnvironmentPreset, SceneThemeConfig};
use crate::panel::binding::BackgroundField as F;
use crate::panel::{Binding, WidgetNode};

/// Type selector plus the fields of the active background variant only.
pub(super) fn build(ctx: &BuildContext, branch: &SceneThemeConfig) -> WidgetNode {
    let bind = Binding::Background;
    let background = &branch.background;

    let mut children = vec![ctx.choice(
        bind(F::Kind),
        "Type",
        background.kind().as_str(),
        BackgroundKind::ALL.iter().map(|kind| kind.as_str()),
    )];

    match background {
        BackgroundConfig::Sky {
            sun_position,
            turbidity,
            rayleigh,
            mie_coefficient,
            mie_directional_g,
        } => children.extend([
            ctx.vector3(bind(F::SunPosition), "Sun Position", *sun_position, (-500.0, 500.0, 1.0)),
            ctx.number(bind(F::Turbidity), "Turbidity", *turbidity, (0.0, 20.0, 0.1)),
            ctx.number(bind(F::Rayleigh), "Rayleigh", *rayleigh, (0.0, 4.0, 0.01)),
            ctx.number(
                bind(F::MieCoefficient),
                "Mie Coefficient",
                *mie_coefficient,
                (0.0, 0.1, 0.001),
            ),
            ctx.number(
                bind(F::MieDirectionalG),
                "Mie Directional G",
                *mie_directional_g,
                UNIT,
            ),
        ]),
        BackgroundConfig::Stars {
            radius,
            depth,
            count,
            factor,
            saturation,
            fade,
            speed,
        } => children.extend([
            ctx.number(bind(F::Radius), "Radius", *radius, (1.0, 500.0, 1.0)),
            ctx.number(bind(F::Depth), "Depth", *depth, (1.0, 200.0, 1.0)),
            ctx.integer(bind(F::Count), "Count", *count, (0, 20_000)),
            ctx.number(bind(F::Factor), "Factor", *factor, (0.0, 20.0, 0.1)),
            ctx.number(bind(F::Saturation), "Saturation", *saturation, UNIT),
            ctx.toggle(bind(F::Fade), "Fade", *fade),
            ctx.number(bind(F::Speed), "Speed", *speed, SPEED),
        ]),
        BackgroundConfig::Sparkles {
            count,
            size,
            speed,
            opacity,
            color,
            scale,
        } => children.extend([
            ctx.integer(bind(F::Count), "Count", *count, (0, 2_000)),
            ctx.number(bind(F::Size), "Size", *size, (0.1, 20.0, 0.1)),
            ctx.number(bind(F::Speed), "Speed", *speed, SPEED),
            ctx.number(bind(F::Opacity), "Opacity", *opacity, UNIT),
            ctx.color(bind(F::Color), "Color", color),
            ctx.number(bind(F::Scale), "Scale", *scale, (0.1, 50.0, 0.1)),
        ]),
        BackgroundConfig::Color { color } | BackgroundConfig::Void { color } => {
            children.push(ctx.color(bind(F::Color), "Color", color));
        }
        BackgroundConfig::Gradient {
            top_color,
            bottom_color,
            exponent,
        } => children.extend([
            ctx.color(bind(F::TopColor), "Top Color", top_color),
            ctx.color(bind(F::BottomColor), "Bottom Color", bottom_color),
            ctx.number(bind(F::Exponent), "Exponent", *exponent, (0.0, 5.0, 0.05)),
        ]),
        BackgroundConfig::Noise {
            color_a,
            color_b,
            scale,
            speed,
        } => children.extend([
            ctx.color(bind(F::ColorA), "Color A", color_a),
            ctx.color(bind(F::ColorB), "Color B", color_b),
            ctx.number(bind(F::Scale), "Scale", *scale, (0.1, 10.0, 0.1)),
            ctx.number(bind(F::Speed), "Speed", *speed, SPEED),
        ]),
        BackgroundConfig::Plasma {
            color_a,
            color_b,
            speed,
            intensity,
        }
        | BackgroundConfig::Aurora {
            color_a,
            color_b,
            speed,
            intensity,
        } => children.extend([
            ctx.color(bind(F::ColorA), "Color A", color_a),
            ctx.color(bind(F::ColorB), "Color B", color_b),
            ctx.number(bind(F::Speed), "Speed", *speed, SPEED),
            ctx.number(bind(F::Intensity), "Intensity", *intensity, INTENSITY),
        ]),
        BackgroundConfig::Sunset {
            sky_color,
            horizon_color,
            sun_color,
            intensity,
        } => children.extend([
            ctx.color(bind(F::SkyColor), "Sky Color", sky_color),
            ctx.color(bind(F::HorizonColor), "Horizon Color", horizon_color),
            ctx.color(bind(F::SunColor), "Sun Color", sun_color),
            ctx.number(bind(F::Intensity), "Intensity", *intensity, INTENSITY),
        ]),
        BackgroundConfig::Fog { color, near, far } => children.extend([
            ctx.color(bind(F::Color), "Color", color),
            ctx.number(bind(F::Near), "Near", *near, (0.0, 100.0, 0.5)),
            ctx.number(bind(F::Far), "Far", *far, (1.0, 500.0, 1.0)),
        ]),
        BackgroundConfig::Environment {
            preset,
            blur,
            intensity,
        } => children.extend([
            ctx.choice(
                bind(F::Preset),
                "Preset",
                preset.as_str(),
                EnvironmentPreset::ALL.iter().map(|preset| preset.as_str()),
            ),
            ctx.number(bind(F::Blur), "Blur", *blur, UNIT),
            ctx.number(bind(F::Intensity), "Intensity", *intensity, INTENSITY),
        ]),
    }

    folder("background", "Background", children)
}

#[cfg(test)]
mod tests {
    use crate::config::{BackgroundKind, SceneConfig, Theme};
    use crate::panel::{describe, PanelTab};

    #[test]
    fn only_the_active_variant_fields_are_shown() {
        let mut config = SceneConfig::default();
        config.day.background = BackgroundKind::Gradient.default_config("#ffffff");
        let tree = describe(&config, Theme::Day, PanelTab::Background, None);

        assert!(tree.control("background.type").is_some());
        assert!(tree.control("background.topColor").is_some());
        assert!(tree.control("background.exponent").is_some());
        assert!(tree.control("background.turbidity").is_none());
        assert_eq!(tree.folder("background").unwrap().children.len(), 4);
    }

    #[test]
    fn every_background_kind_builds() {
        for kind in BackgroundKind::ALL {
            let mut config = SceneConfig::default();
            config.day.background = kind.default_config("#336699");
            let tree = describe(&config, Theme::Day, PanelTab::Background, None);
            assert!(!tree.loading, "{:?}", kind);
            assert!(tree.control_count() >= 2, "{:?}", kind);
        }
    }
}
