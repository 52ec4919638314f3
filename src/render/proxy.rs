use crate::interaction::ListenerId;
use crate::render::geometry::{GeometryDescriptor, MaterialDescriptor};
use crate::scene::ObjectId;
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::collections::{BTreeMap, HashMap};

/// Name given to the themed centerpiece proxy.
pub const MAIN_OBJECT_NAME: &str = "main-object";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProxyHandle(u32);

impl ProxyHandle {
    pub fn raw(self) -> u32 {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn test(raw: u32) -> Self {
        Self(raw)
    }
}

/// Translation, XYZ euler rotation in radians, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.translation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProxyState {
    #[default]
    Idle,
    Hovered,
    Dragging,
}

/// Renderable stand-in for a scene object or the centerpiece.
///
/// `anchor` is the logical position; the displayed transform adds the idle
/// bob on top of it.
#[derive(Debug, Clone)]
pub struct ProxyNode {
    pub handle: ProxyHandle,
    pub name: String,
    pub object_id: Option<ObjectId>,
    pub anchor: Vec3,
    pub base_rotation: Vec3,
    pub transform: Transform,
    pub geometry: GeometryDescriptor,
    pub material: MaterialDescriptor,
    pub state: ProxyState,
    /// Set by the drag bridge; suspends idle animation.
    pub being_dragged: bool,
    pub selected: bool,
    pub drag_listener: Option<ListenerId>,
    pub spin: f32,
    pub bob_time: f32,
    pub bob_offset: f32,
}

impl ProxyNode {
    fn new(
        handle: ProxyHandle,
        name: String,
        object_id: Option<ObjectId>,
        geometry: GeometryDescriptor,
        material: MaterialDescriptor,
    ) -> Self {
        Self {
            handle,
            name,
            object_id,
            anchor: Vec3::ZERO,
            base_rotation: Vec3::ZERO,
            transform: Transform::default(),
            geometry,
            material,
            state: ProxyState::Idle,
            being_dragged: false,
            selected: false,
            drag_listener: None,
            spin: 0.0,
            bob_time: 0.0,
            bob_offset: 0.0,
        }
    }

    pub fn is_main(&self) -> bool {
        self.object_id.is_none()
    }

    pub fn is_dragging(&self) -> bool {
        self.being_dragged || self.state == ProxyState::Dragging
    }

    pub fn position(&self) -> Vec3 {
        self.anchor
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.anchor = position;
        self.refresh_transform();
    }

    pub fn refresh_transform(&mut self) {
        self.transform.translation = self.anchor + Vec3::Y * self.bob_offset;
        self.transform.rotation = self.base_rotation + Vec3::Y * self.spin;
    }

    /// Material as it should be drawn this frame.
    pub fn display_material(&self) -> MaterialDescriptor {
        match self.state {
            ProxyState::Hovered | ProxyState::Dragging => self.material.highlighted(),
            ProxyState::Idle => self.material.clone(),
        }
    }

    /// World-space bounding sphere radius.
    pub fn pick_radius(&self) -> f32 {
        self.geometry.bounding_radius() * self.transform.scale.abs().max_element()
    }
}

/// Explicit object-id to proxy mapping.
#[derive(Debug, Default)]
pub struct ProxyRegistry {
    nodes: BTreeMap<ProxyHandle, ProxyNode>,
    by_object: HashMap<ObjectId, ProxyHandle>,
    main: Option<ProxyHandle>,
    next_handle: u32,
}

impl ProxyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> ProxyHandle {
        self.next_handle += 1;
        ProxyHandle(self.next_handle)
    }

    pub fn insert_object(
        &mut self,
        object_id: &str,
        geometry: GeometryDescriptor,
        material: MaterialDescriptor,
    ) -> ProxyHandle {
        if let Some(stale) = self.remove_object(object_id) {
            log::warn!("replacing existing proxy for {}", stale.name);
        }
        let handle = self.allocate();
        let node = ProxyNode::new(
            handle,
            object_id.to_string(),
            Some(object_id.to_string()),
            geometry,
            material,
        );
        self.nodes.insert(handle, node);
        self.by_object.insert(object_id.to_string(), handle);
        handle
    }

    pub fn insert_main(
        &mut self,
        geometry: GeometryDescriptor,
        material: MaterialDescriptor,
    ) -> ProxyHandle {
        self.remove_main();
        let handle = self.allocate();
        let node = ProxyNode::new(handle, MAIN_OBJECT_NAME.to_string(), None, geometry, material);
        self.nodes.insert(handle, node);
        self.main = Some(handle);
        handle
    }

    pub fn remove_object(&mut self, object_id: &str) -> Option<ProxyNode> {
        let handle = self.by_object.remove(object_id)?;
        self.nodes.remove(&handle)
    }

    pub fn remove_main(&mut self) -> Option<ProxyNode> {
        let handle = self.main.take()?;
        self.nodes.remove(&handle)
    }

    pub fn get(&self, handle: ProxyHandle) -> Option<&ProxyNode> {
        self.nodes.get(&handle)
    }

    pub fn get_mut(&mut self, handle: ProxyHandle) -> Option<&mut ProxyNode> {
        self.nodes.get_mut(&handle)
    }

    pub fn handle_for(&self, object_id: &str) -> Option<ProxyHandle> {
        self.by_object.get(object_id).copied()
    }

    pub fn main_handle(&self) -> Option<ProxyHandle> {
        self.main
    }

    pub fn object_ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.by_object.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProxyNode> {
        self.nodes.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ProxyNode> {
        self.nodes.values_mut()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn any_being_dragged(&self) -> bool {
        self.nodes.values().any(ProxyNode::is_dragging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::scene::GeometryKind;

    fn geometry() -> GeometryDescriptor {
        GeometryDescriptor::for_object(GeometryKind::Box)
    }

    fn material() -> MaterialDescriptor {
        MaterialDescriptor::for_centerpiece(&SceneConfig::default().day)
    }

    #[test]
    fn transform_matrix_places_origin_at_translation() {
        let transform = Transform {
            translation: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(0.3, 0.2, 0.1),
            scale: Vec3::splat(2.0),
        };
        let origin = transform.matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn registry_maps_objects_and_main_separately() {
        let mut registry = ProxyRegistry::new();
        let a = registry.insert_object("a", geometry(), material());
        let main = registry.insert_main(geometry(), material());

        assert_ne!(a, main);
        assert_eq!(registry.handle_for("a"), Some(a));
        assert_eq!(registry.main_handle(), Some(main));
        assert!(registry.get(main).unwrap().is_main());
        assert_eq!(registry.len(), 2);

        assert!(registry.remove_object("a").is_some());
        assert_eq!(registry.handle_for("a"), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn reinserting_an_object_replaces_its_proxy() {
        let mut registry = ProxyRegistry::new();
        let first = registry.insert_object("a", geometry(), material());
        let second = registry.insert_object("a", geometry(), material());
        assert_ne!(first, second);
        assert!(registry.get(first).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn bob_offsets_display_but_not_anchor() {
        let mut registry = ProxyRegistry::new();
        let handle = registry.insert_main(geometry(), material());
        let node = registry.get_mut(handle).unwrap();
        node.set_position(Vec3::new(1.0, 0.0, 0.0));
        node.bob_offset = 0.25;
        node.refresh_transform();

        assert_eq!(node.position(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(node.transform.translation, Vec3::new(1.0, 0.25, 0.0));
    }

    #[test]
    fn drag_flag_is_visible_to_registry() {
        let mut registry = ProxyRegistry::new();
        let handle = registry.insert_object("a", geometry(), material());
        assert!(!registry.any_being_dragged());
        registry.get_mut(handle).unwrap().being_dragged = true;
        assert!(registry.any_being_dragged());
    }
}
