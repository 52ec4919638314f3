use super::{folder, BuildContext, INTENSITY, UNIT};
use crate::config::{GradientMap, MaterialType, SceneThemeConfig};
use crate::panel::binding::MaterialField as M;
use crate::panel::{Binding, WidgetNode};

/// Kind selector followed by the fields that kind actually supports.
pub(super) fn build(ctx: &BuildContext, branch: &SceneThemeConfig) -> WidgetNode {
    let material = &branch.material;
    let kind = material.material_type;
    let bind = Binding::Material;

    let mut children = vec![ctx.choice(
        bind(M::Kind),
        "Type",
        kind.as_str(),
        MaterialType::ALL.iter().map(|kind| kind.as_str()),
    )];

    if kind.is_pbr() {
        children.push(ctx.number(bind(M::Roughness), "Roughness", material.roughness, UNIT));
        children.push(ctx.number(bind(M::Metalness), "Metalness", material.metalness, UNIT));
    }

    match kind {
        MaterialType::Physical => {
            children.extend([
                ctx.number(bind(M::Clearcoat), "Clearcoat", material.clearcoat, UNIT),
                ctx.number(
                    bind(M::ClearcoatRoughness),
                    "Clearcoat Roughness",
                    material.clearcoat_roughness,
                    UNIT,
                ),
                ctx.number(bind(M::Ior), "IOR", material.ior, (1.0, 2.333, 0.01)),
                ctx.number(bind(M::Thickness), "Thickness", material.thickness, (0.0, 10.0, 0.1)),
                ctx.number(bind(M::Transmission), "Transmission", material.transmission, UNIT),
                ctx.number(
                    bind(M::SpecularIntensity),
                    "Specular Intensity",
                    material.specular_intensity,
                    UNIT,
                ),
            ]);
        }
        MaterialType::Phong => {
            children.push(ctx.number(
                bind(M::Shininess),
                "Shininess",
                material.shininess,
                (0.0, 1000.0, 1.0),
            ));
            children.push(ctx.color(
                bind(M::SpecularColor),
                "Specular Color",
                &material.specular_color,
            ));
        }
        MaterialType::Toon => {
            children.push(ctx.choice(
                bind(M::GradientMap),
                "Gradient Map",
                material.gradient_map.as_str(),
                [GradientMap::ThreeTone, GradientMap::FiveTone]
                    .iter()
                    .map(|map| map.as_str()),
            ));
        }
        MaterialType::Standard | MaterialType::Basic | MaterialType::Lambert => {}
    }

    children.push(ctx.toggle(bind(M::Wireframe), "Wireframe", material.wireframe));
    children.push(ctx.toggle(bind(M::Transparent), "Transparent", material.transparent));
    children.push(ctx.number(bind(M::Opacity), "Opacity", material.opacity, UNIT));

    // Unlit material: no emissive term.
    if kind != MaterialType::Basic {
        children.push(ctx.color(bind(M::Emissive), "Emissive", &material.emissive));
        children.push(ctx.number(
            bind(M::EmissiveIntensity),
            "Emissive Intensity",
            material.emissive_intensity,
            INTENSITY,
        ));
    }
    if kind != MaterialType::Basic && kind != MaterialType::Toon {
        children.push(ctx.toggle(bind(M::FlatShading), "Flat Shading", material.flat_shading));
    }

    folder("material", "Material", children)
}
