use super::{folder, BuildContext};
use crate::config::{SceneThemeConfig, SceneType};
use crate::panel::binding::GeometryField as G;
use crate::panel::{Binding, WidgetNode};

/// Geometry parameters for the centerpiece, when the branch carries the
/// section its type reads from.
pub(super) fn build(
    ctx: &BuildContext,
    scene_type: SceneType,
    branch: &SceneThemeConfig,
) -> Option<WidgetNode> {
    let bind = Binding::Geometry;
    match scene_type {
        SceneType::TorusKnot => {
            let params = branch.torus_knot.as_ref()?;
            Some(folder(
                "torusKnot",
                "Torus Knot",
                vec![
                    ctx.integer(bind(G::TorusKnotP), "P", params.p, (1, 20)),
                    ctx.integer(bind(G::TorusKnotQ), "Q", params.q, (1, 20)),
                    ctx.number(bind(G::TorusKnotRadius), "Radius", params.radius, (0.1, 5.0, 0.1)),
                    ctx.number(bind(G::TorusKnotTube), "Tube", params.tube, (0.01, 2.0, 0.01)),
                    ctx.integer(
                        bind(G::TorusKnotTubularSegments),
                        "Tubular Segments",
                        params.tubular_segments,
                        (3, 512),
                    ),
                    ctx.integer(
                        bind(G::TorusKnotRadialSegments),
                        "Radial Segments",
                        params.radial_segments,
                        (3, 64),
                    ),
                ],
            ))
        }
        SceneType::Torus => {
            let params = branch.torus.as_ref()?;
            Some(folder(
                "torus",
                "Torus",
                vec![
                    ctx.number(bind(G::TorusRadius), "Radius", params.radius, (0.1, 5.0, 0.1)),
                    ctx.number(bind(G::TorusTube), "Tube", params.tube, (0.01, 2.0, 0.01)),
                    ctx.integer(
                        bind(G::TorusRadialSegments),
                        "Radial Segments",
                        params.radial_segments,
                        (3, 64),
                    ),
                    ctx.integer(
                        bind(G::TorusTubularSegments),
                        "Tubular Segments",
                        params.tubular_segments,
                        (3, 256),
                    ),
                    ctx.number(bind(G::TorusArc), "Arc", params.arc, (0.1, std::f32::consts::TAU, 0.01)),
                ],
            ))
        }
        SceneType::Sphere | SceneType::Field => {
            let params = branch.sphere.as_ref()?;
            Some(folder(
                "sphere",
                "Sphere",
                vec![
                    ctx.number(bind(G::SphereRadius), "Radius", params.radius, (0.1, 5.0, 0.1)),
                    ctx.integer(
                        bind(G::SphereWidthSegments),
                        "Width Segments",
                        params.width_segments,
                        (3, 128),
                    ),
                    ctx.integer(
                        bind(G::SphereHeightSegments),
                        "Height Segments",
                        params.height_segments,
                        (2, 128),
                    ),
                ],
            ))
        }
        SceneType::Cube | SceneType::Fragments => {
            let params = branch.cube.as_ref()?;
            Some(folder(
                "cube",
                "Cube",
                vec![
                    ctx.number(bind(G::CubeWidth), "Width", params.width, (0.1, 5.0, 0.1)),
                    ctx.number(bind(G::CubeHeight), "Height", params.height, (0.1, 5.0, 0.1)),
                    ctx.number(bind(G::CubeDepth), "Depth", params.depth, (0.1, 5.0, 0.1)),
                ],
            ))
        }
        SceneType::Icosahedron
        | SceneType::Octahedron
        | SceneType::Dodecahedron
        | SceneType::Crystal => {
            let params = branch.polyhedron.as_ref()?;
            Some(folder(
                "polyhedron",
                "Polyhedron",
                vec![
                    ctx.number(bind(G::PolyhedronRadius), "Radius", params.radius, (0.1, 5.0, 0.1)),
                    ctx.integer(bind(G::PolyhedronDetail), "Detail", params.detail, (0, 5)),
                ],
            ))
        }
    }
}
