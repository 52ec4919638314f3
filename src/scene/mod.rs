pub mod notify;
pub mod store;

pub use notify::{LogNotifier, NoticeLevel, Notifier};
pub use store::{SceneObjectStore, SceneObjectStoreState};

/// Stable identifier of a user-added object.
pub type ObjectId = String;

/// Catalog of shapes a user can add. Serialized in kebab-case
/// (`"torus-knot"`), which is also what `from_name` accepts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum GeometryKind {
    Box,
    Sphere,
    Cylinder,
    Cone,
    Torus,
    Dodecahedron,
    Icosahedron,
    Octahedron,
    Tetrahedron,
    Plane,
    Ring,
    TorusKnot,
}

impl GeometryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GeometryKind::Box => "box",
            GeometryKind::Sphere => "sphere",
            GeometryKind::Cylinder => "cylinder",
            GeometryKind::Cone => "cone",
            GeometryKind::Torus => "torus",
            GeometryKind::Dodecahedron => "dodecahedron",
            GeometryKind::Icosahedron => "icosahedron",
            GeometryKind::Octahedron => "octahedron",
            GeometryKind::Tetrahedron => "tetrahedron",
            GeometryKind::Plane => "plane",
            GeometryKind::Ring => "ring",
            GeometryKind::TorusKnot => "torus-knot",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        GEOMETRY_CATALOG
            .iter()
            .map(|entry| entry.kind)
            .find(|kind| kind.as_str() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryEntry {
    pub kind: GeometryKind,
    pub display_name: &'static str,
}

pub const GEOMETRY_CATALOG: [GeometryEntry; 12] = [
    GeometryEntry { kind: GeometryKind::Box, display_name: "Box" },
    GeometryEntry { kind: GeometryKind::Sphere, display_name: "Sphere" },
    GeometryEntry { kind: GeometryKind::Cylinder, display_name: "Cylinder" },
    GeometryEntry { kind: GeometryKind::Cone, display_name: "Cone" },
    GeometryEntry { kind: GeometryKind::Torus, display_name: "Torus" },
    GeometryEntry { kind: GeometryKind::Dodecahedron, display_name: "Dodecahedron" },
    GeometryEntry { kind: GeometryKind::Icosahedron, display_name: "Icosahedron" },
    GeometryEntry { kind: GeometryKind::Octahedron, display_name: "Octahedron" },
    GeometryEntry { kind: GeometryKind::Tetrahedron, display_name: "Tetrahedron" },
    GeometryEntry { kind: GeometryKind::Plane, display_name: "Plane" },
    GeometryEntry { kind: GeometryKind::Ring, display_name: "Ring" },
    GeometryEntry { kind: GeometryKind::TorusKnot, display_name: "Torus Knot" },
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ObjectMaterialKind {
    #[default]
    Standard,
    Physical,
    Basic,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMaterial {
    pub kind: ObjectMaterialKind,
    pub metalness: f32,
    pub roughness: f32,
    pub wireframe: bool,
    pub transparent: bool,
    pub opacity: f32,
}

impl Default for ObjectMaterial {
    fn default() -> Self {
        Self {
            kind: ObjectMaterialKind::Standard,
            metalness: 0.1,
            roughness: 0.5,
            wireframe: false,
            transparent: false,
            opacity: 1.0,
        }
    }
}

/// A user-added shape instance.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub color: String,
    pub material: ObjectMaterial,
}

/// Fields to shallow-merge into an existing object. `None` leaves a field
/// as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectPatch {
    pub kind: Option<GeometryKind>,
    pub position: Option<[f32; 3]>,
    pub rotation: Option<[f32; 3]>,
    pub scale: Option<[f32; 3]>,
    pub color: Option<String>,
    pub material: Option<ObjectMaterial>,
}

impl ObjectPatch {
    pub fn position(position: [f32; 3]) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(self, object: &mut SceneObject) {
        if let Some(kind) = self.kind {
            object.kind = kind;
        }
        if let Some(position) = self.position {
            object.position = position;
        }
        if let Some(rotation) = self.rotation {
            object.rotation = rotation;
        }
        if let Some(scale) = self.scale {
            object.scale = scale;
        }
        if let Some(color) = self.color {
            object.color = color;
        }
        if let Some(material) = self.material {
            object.material = material;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object() -> SceneObject {
        SceneObject {
            id: "a".to_string(),
            kind: GeometryKind::Box,
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            color: "#ffffff".to_string(),
            material: ObjectMaterial::default(),
        }
    }

    #[test]
    fn catalog_names_round_trip() {
        for entry in GEOMETRY_CATALOG {
            assert_eq!(GeometryKind::from_name(entry.kind.as_str()), Some(entry.kind));
        }
        assert_eq!(GeometryKind::from_name("teapot"), None);
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut target = object();
        ObjectPatch {
            color: Some("#000000".to_string()),
            scale: Some([2.0, 2.0, 2.0]),
            ..ObjectPatch::default()
        }
        .apply_to(&mut target);

        assert_eq!(target.color, "#000000");
        assert_eq!(target.scale, [2.0, 2.0, 2.0]);
        assert_eq!(target.position, [0.0; 3]);
        assert_eq!(target.kind, GeometryKind::Box);
    }

    #[test]
    fn serialized_type_uses_catalog_name() {
        let mut target = object();
        target.kind = GeometryKind::TorusKnot;
        let json = serde_json::to_string(&target).unwrap();
        assert!(json.contains("\"type\":\"torus-knot\""));
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(ObjectPatch::default().is_empty());
        assert!(!ObjectPatch::position([1.0, 0.0, 0.0]).is_empty());
    }
}
