//! Deterministic geometry and material descriptors for proxies. The concrete
//! renderer turns these into buffers; identical inputs always produce
//! identical descriptors so proxies are only rebuilt when something changed.

use crate::config::color::parse_hex_color;
use crate::config::{MaterialType, SceneThemeConfig, SceneType};
use crate::scene::{GeometryKind, ObjectMaterialKind, SceneObject};

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryDescriptor {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
        arc: f32,
    },
    TorusKnot {
        p: u32,
        q: u32,
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
    },
    /// Platonic solid with the given face count (4, 8, 12 or 20).
    Polyhedron { faces: u32, radius: f32, detail: u32 },
    Plane { width: f32, height: f32 },
    Ring {
        inner_radius: f32,
        outer_radius: f32,
        theta_segments: u32,
    },
}

impl GeometryDescriptor {
    pub fn for_object(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Box => GeometryDescriptor::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            GeometryKind::Sphere => GeometryDescriptor::Sphere {
                radius: 0.5,
                width_segments: 32,
                height_segments: 16,
            },
            GeometryKind::Cylinder => GeometryDescriptor::Cylinder {
                radius_top: 0.5,
                radius_bottom: 0.5,
                height: 1.0,
                radial_segments: 32,
            },
            GeometryKind::Cone => GeometryDescriptor::Cone {
                radius: 0.5,
                height: 1.0,
                radial_segments: 32,
            },
            GeometryKind::Torus => GeometryDescriptor::Torus {
                radius: 0.4,
                tube: 0.15,
                radial_segments: 16,
                tubular_segments: 48,
                arc: std::f32::consts::TAU,
            },
            GeometryKind::Dodecahedron => GeometryDescriptor::Polyhedron {
                faces: 12,
                radius: 0.5,
                detail: 0,
            },
            GeometryKind::Icosahedron => GeometryDescriptor::Polyhedron {
                faces: 20,
                radius: 0.5,
                detail: 0,
            },
            GeometryKind::Octahedron => GeometryDescriptor::Polyhedron {
                faces: 8,
                radius: 0.5,
                detail: 0,
            },
            GeometryKind::Tetrahedron => GeometryDescriptor::Polyhedron {
                faces: 4,
                radius: 0.5,
                detail: 0,
            },
            GeometryKind::Plane => GeometryDescriptor::Plane {
                width: 1.0,
                height: 1.0,
            },
            GeometryKind::Ring => GeometryDescriptor::Ring {
                inner_radius: 0.25,
                outer_radius: 0.5,
                theta_segments: 32,
            },
            GeometryKind::TorusKnot => GeometryDescriptor::TorusKnot {
                p: 2,
                q: 3,
                radius: 0.4,
                tube: 0.12,
                tubular_segments: 64,
                radial_segments: 8,
            },
        }
    }

    /// Centerpiece geometry. Variants whose visuals come from dedicated
    /// generators fall back to a representative base shape.
    pub fn for_centerpiece(scene_type: SceneType, theme: &SceneThemeConfig) -> Self {
        match scene_type {
            SceneType::Sphere | SceneType::Field => {
                let params = theme.sphere.clone().unwrap_or_default();
                GeometryDescriptor::Sphere {
                    radius: params.radius,
                    width_segments: params.width_segments,
                    height_segments: params.height_segments,
                }
            }
            SceneType::Cube | SceneType::Fragments => {
                let params = theme.cube.clone().unwrap_or_default();
                GeometryDescriptor::Box {
                    width: params.width,
                    height: params.height,
                    depth: params.depth,
                }
            }
            SceneType::Torus => {
                let params = theme.torus.clone().unwrap_or_default();
                GeometryDescriptor::Torus {
                    radius: params.radius,
                    tube: params.tube,
                    radial_segments: params.radial_segments,
                    tubular_segments: params.tubular_segments,
                    arc: params.arc,
                }
            }
            SceneType::TorusKnot => {
                let params = theme.torus_knot.clone().unwrap_or_default();
                GeometryDescriptor::TorusKnot {
                    p: params.p,
                    q: params.q,
                    radius: params.radius,
                    tube: params.tube,
                    tubular_segments: params.tubular_segments,
                    radial_segments: params.radial_segments,
                }
            }
            SceneType::Icosahedron | SceneType::Octahedron | SceneType::Dodecahedron
            | SceneType::Crystal => {
                let params = theme.polyhedron.clone().unwrap_or_default();
                let faces = match scene_type {
                    SceneType::Octahedron | SceneType::Crystal => 8,
                    SceneType::Dodecahedron => 12,
                    _ => 20,
                };
                GeometryDescriptor::Polyhedron {
                    faces,
                    radius: params.radius,
                    detail: params.detail,
                }
            }
        }
    }

    /// Radius of a sphere around the local origin enclosing the shape.
    pub fn bounding_radius(&self) -> f32 {
        match self {
            GeometryDescriptor::Box {
                width,
                height,
                depth,
            } => 0.5 * (width * width + height * height + depth * depth).sqrt(),
            GeometryDescriptor::Sphere { radius, .. }
            | GeometryDescriptor::Polyhedron { radius, .. } => *radius,
            GeometryDescriptor::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => {
                let r = radius_top.max(*radius_bottom);
                (r * r + 0.25 * height * height).sqrt()
            }
            GeometryDescriptor::Cone { radius, height, .. } => {
                (radius * radius + 0.25 * height * height).sqrt()
            }
            GeometryDescriptor::Torus { radius, tube, .. }
            | GeometryDescriptor::TorusKnot { radius, tube, .. } => radius + tube,
            GeometryDescriptor::Plane { width, height } => {
                0.5 * (width * width + height * height).sqrt()
            }
            GeometryDescriptor::Ring { outer_radius, .. } => *outer_radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDescriptor {
    pub kind: MaterialType,
    pub base_color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub wireframe: bool,
    pub transparent: bool,
    pub opacity: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

const FALLBACK_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const HOVER_EMISSIVE_INTENSITY: f32 = 0.35;

fn color_or_fallback(value: &str) -> [f32; 3] {
    parse_hex_color(value).unwrap_or_else(|| {
        log::warn!("unparseable color {:?}; rendering white", value);
        FALLBACK_COLOR
    })
}

impl MaterialDescriptor {
    pub fn for_object(object: &SceneObject) -> Self {
        let material = &object.material;
        let kind = match material.kind {
            ObjectMaterialKind::Standard => MaterialType::Standard,
            ObjectMaterialKind::Physical => MaterialType::Physical,
            ObjectMaterialKind::Basic => MaterialType::Basic,
        };
        Self {
            kind,
            base_color: color_or_fallback(&object.color),
            metalness: material.metalness,
            roughness: material.roughness,
            wireframe: material.wireframe,
            transparent: material.transparent,
            opacity: material.opacity,
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
        }
    }

    pub fn for_centerpiece(theme: &SceneThemeConfig) -> Self {
        let material = &theme.material;
        Self {
            kind: material.material_type,
            base_color: color_or_fallback(&theme.main_object_color),
            metalness: material.metalness,
            roughness: material.roughness,
            wireframe: material.wireframe,
            transparent: material.transparent,
            opacity: material.opacity,
            emissive: color_or_fallback(&material.emissive),
            emissive_intensity: material.emissive_intensity,
        }
    }

    /// Hover highlight: glow in the object's own color.
    pub fn highlighted(&self) -> Self {
        Self {
            emissive: self.base_color,
            emissive_intensity: self.emissive_intensity.max(HOVER_EMISSIVE_INTENSITY),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SceneConfig, TorusKnotParams};
    use crate::scene::{ObjectMaterial, GEOMETRY_CATALOG};

    #[test]
    fn every_catalog_entry_has_positive_bounds() {
        for entry in GEOMETRY_CATALOG {
            let geometry = GeometryDescriptor::for_object(entry.kind);
            assert!(geometry.bounding_radius() > 0.0, "{:?}", entry.kind);
        }
    }

    #[test]
    fn centerpiece_uses_themed_params_when_present() {
        let mut theme = SceneConfig::default().day;
        theme.torus_knot = Some(TorusKnotParams {
            p: 3,
            q: 7,
            ..TorusKnotParams::default()
        });
        match GeometryDescriptor::for_centerpiece(SceneType::TorusKnot, &theme) {
            GeometryDescriptor::TorusKnot { p, q, .. } => assert_eq!((p, q), (3, 7)),
            other => panic!("expected torus knot, got {:?}", other),
        }
    }

    #[test]
    fn object_material_is_derived_deterministically() {
        let object = SceneObject {
            id: "x".to_string(),
            kind: GeometryKind::Sphere,
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            color: "#ff0000".to_string(),
            material: ObjectMaterial {
                kind: ObjectMaterialKind::Basic,
                ..ObjectMaterial::default()
            },
        };
        let a = MaterialDescriptor::for_object(&object);
        let b = MaterialDescriptor::for_object(&object);
        assert_eq!(a, b);
        assert_eq!(a.kind, MaterialType::Basic);
        assert_eq!(a.base_color, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn highlight_only_changes_emissive() {
        let base = MaterialDescriptor::for_centerpiece(&SceneConfig::default().day);
        let lit = base.highlighted();
        assert_eq!(lit.base_color, base.base_color);
        assert_eq!(lit.emissive, base.base_color);
        assert!(lit.emissive_intensity >= HOVER_EMISSIVE_INTENSITY);
    }
}
