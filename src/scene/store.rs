//! Authoritative model of user-added objects.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    GeometryEntry, GeometryKind, NoticeLevel, Notifier, ObjectId, ObjectMaterial, ObjectPatch,
    SceneObject, GEOMETRY_CATALOG,
};

const DEFAULT_TINT: &str = "#ffffff";

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObjectStoreState {
    pub objects: Vec<SceneObject>,
    pub selected_object_id: Option<ObjectId>,
    pub is_adding_object: bool,
    pub available_geometries: &'static [GeometryEntry],
}

impl Default for SceneObjectStoreState {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            selected_object_id: None,
            is_adding_object: false,
            available_geometries: &GEOMETRY_CATALOG,
        }
    }
}

/// Largest spawn half-extent the store accepts.
pub const MAX_SPAWN_HALF_EXTENT: f32 = 1.0e4;

/// Maps any configured half-extent onto `0..=MAX_SPAWN_HALF_EXTENT`;
/// non-finite values spawn at the origin.
pub fn clamp_spawn_half_extent(extent: f32) -> f32 {
    if extent.is_finite() {
        extent.abs().min(MAX_SPAWN_HALF_EXTENT)
    } else {
        log::warn!("spawn half-extent {} is not finite; spawning at the origin", extent);
        0.0
    }
}

pub struct SceneObjectStore {
    state: SceneObjectStoreState,
    revision: u64,
    next_sequence: u64,
    spawn_half_extent: f32,
    default_tint: String,
    rng: StdRng,
    notifier: Option<Box<dyn Notifier>>,
}

impl SceneObjectStore {
    pub fn new(spawn_half_extent: f32) -> Self {
        Self::with_rng(spawn_half_extent, StdRng::from_os_rng())
    }

    /// Deterministic spawn positions, for tests and scripted sessions.
    pub fn seeded(spawn_half_extent: f32, seed: u64) -> Self {
        Self::with_rng(spawn_half_extent, StdRng::seed_from_u64(seed))
    }

    fn with_rng(spawn_half_extent: f32, rng: StdRng) -> Self {
        Self {
            state: SceneObjectStoreState::default(),
            revision: 0,
            next_sequence: 0,
            spawn_half_extent: clamp_spawn_half_extent(spawn_half_extent),
            default_tint: DEFAULT_TINT.to_string(),
            rng,
            notifier: None,
        }
    }

    pub fn with_catalog(mut self, catalog: &'static [GeometryEntry]) -> Self {
        self.state.available_geometries = catalog;
        self
    }

    pub fn set_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifier = Some(notifier);
    }

    /// Tint applied to objects created from now on; follows the themed
    /// main-object color.
    pub fn set_default_tint(&mut self, color: &str) {
        self.default_tint = color.to_string();
    }

    pub fn state(&self) -> &SceneObjectStoreState {
        &self.state
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.state.objects
    }

    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.state.objects.iter().find(|object| object.id == id)
    }

    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.state
            .objects
            .iter()
            .map(|object| object.id.clone())
            .collect()
    }

    pub fn selected_object_id(&self) -> Option<&str> {
        self.state.selected_object_id.as_deref()
    }

    /// The selected object, if the selection refers to a live object.
    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.selected_object_id().and_then(|id| self.object(id))
    }

    pub fn is_adding_object(&self) -> bool {
        self.state.is_adding_object
    }

    pub fn available_geometries(&self) -> &'static [GeometryEntry] {
        self.state.available_geometries
    }

    /// Bumped on every state transition.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn add_object(&mut self, kind: GeometryKind) -> Option<ObjectId> {
        let Some(entry) = self
            .state
            .available_geometries
            .iter()
            .find(|entry| entry.kind == kind)
        else {
            log::warn!("geometry {:?} is not in the catalog; ignoring add", kind);
            return None;
        };
        let display_name = entry.display_name;

        let id = self.generate_id();
        let extent = self.spawn_half_extent;
        let position = if extent > 0.0 {
            [
                self.rng.random_range(-extent..=extent),
                self.rng.random_range(-extent..=extent),
                self.rng.random_range(-extent..=extent),
            ]
        } else {
            [0.0; 3]
        };

        self.state.objects.push(SceneObject {
            id: id.clone(),
            kind,
            position,
            rotation: [0.0; 3],
            scale: [1.0; 3],
            color: self.default_tint.clone(),
            material: ObjectMaterial::default(),
        });
        self.state.selected_object_id = Some(id.clone());
        self.state.is_adding_object = false;
        self.revision += 1;

        log::debug!("added {} {} at {:?}", display_name, id, position);
        self.notify(NoticeLevel::Success, &format!("{} added", display_name));
        Some(id)
    }

    /// String entry point used by UI callers; unknown names are a no-op.
    pub fn add_object_by_name(&mut self, name: &str) -> Option<ObjectId> {
        match GeometryKind::from_name(name) {
            Some(kind) => self.add_object(kind),
            None => {
                log::warn!("unknown geometry type {:?}; ignoring add", name);
                None
            }
        }
    }

    pub fn remove_object(&mut self, id: &str) -> Option<SceneObject> {
        let Some(index) = self.state.objects.iter().position(|object| object.id == id) else {
            log::debug!("remove of unknown object {} ignored", id);
            return None;
        };
        let removed = self.state.objects.remove(index);
        if self.state.selected_object_id.as_deref() == Some(id) {
            self.state.selected_object_id = None;
        }
        self.revision += 1;
        self.notify(NoticeLevel::Info, "Object removed");
        Some(removed)
    }

    /// Shallow-merges `patch` in place. Returns whether an object matched.
    pub fn update_object(&mut self, id: &str, patch: ObjectPatch) -> bool {
        let Some(object) = self.state.objects.iter_mut().find(|object| object.id == id) else {
            log::debug!("update of unknown object {} ignored", id);
            return false;
        };
        patch.apply_to(object);
        self.revision += 1;
        true
    }

    /// Selecting an id that does not exist yet is allowed; it resolves once
    /// the object is added.
    pub fn select_object(&mut self, id: Option<&str>) {
        if let Some(id) = id {
            if self.object(id).is_none() {
                log::debug!("selecting {} before it exists", id);
            }
        }
        let next = id.map(str::to_string);
        if self.state.selected_object_id != next {
            self.state.selected_object_id = next;
            self.revision += 1;
        }
    }

    pub fn clear_objects(&mut self) {
        let had_objects = !self.state.objects.is_empty();
        if !had_objects && self.state.selected_object_id.is_none() {
            return;
        }
        self.state.objects.clear();
        self.state.selected_object_id = None;
        self.revision += 1;
        if had_objects {
            self.notify(NoticeLevel::Info, "All objects cleared");
        }
    }

    pub fn toggle_add_mode(&mut self) {
        self.state.is_adding_object = !self.state.is_adding_object;
        self.revision += 1;
    }

    fn generate_id(&mut self) -> ObjectId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        self.next_sequence += 1;
        format!("obj-{:x}-{}", millis, self.next_sequence)
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        if let Some(notifier) = &self.notifier {
            notifier.notify(level, message);
        }
    }
}
