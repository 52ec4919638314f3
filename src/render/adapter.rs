use crate::config::{SceneThemeConfig, SceneType};
use crate::interaction::{InteractionArbiter, InteractionMode};
use crate::render::geometry::{GeometryDescriptor, MaterialDescriptor};
use crate::render::pick::{pick_proxy, PickHit, Ray};
use crate::render::proxy::{ProxyHandle, ProxyRegistry, ProxyState};
use crate::scene::{ObjectId, ObjectPatch, SceneObjectStore};
use crate::settings::EditorSettings;
use glam::Vec3;
use std::collections::HashSet;
use std::f32::consts::TAU;

/// Pointer input in world space. `hit` is the intersection with whatever
/// surface the host resolved under the pointer, when there is one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: u32,
    pub ray: Ray,
    pub hit: Option<Vec3>,
}

impl PointerEvent {
    pub fn new(pointer_id: u32, ray: Ray, hit: Option<Vec3>) -> Self {
        Self {
            pointer_id,
            ray,
            hit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    pub spin_speed: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
}

impl From<&EditorSettings> for AnimationSettings {
    fn from(settings: &EditorSettings) -> Self {
        Self {
            spin_speed: settings.idle_spin_speed,
            bob_amplitude: settings.bob_amplitude,
            bob_frequency: settings.bob_frequency,
        }
    }
}

#[derive(Debug, Clone)]
struct PointerCapture {
    pointer_id: u32,
    handle: ProxyHandle,
    object_id: ObjectId,
    offset: Vec3,
}

/// Keeps one proxy per scene object plus the themed centerpiece, and turns
/// pointer gestures on those proxies into store updates.
#[derive(Debug)]
pub struct ObjectRenderAdapter {
    registry: ProxyRegistry,
    capture: Option<PointerCapture>,
    gesture_consumed: bool,
    animation: AnimationSettings,
}

impl ObjectRenderAdapter {
    pub fn new(animation: AnimationSettings) -> Self {
        Self {
            registry: ProxyRegistry::new(),
            capture: None,
            gesture_consumed: false,
            animation,
        }
    }

    pub fn registry(&self) -> &ProxyRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ProxyRegistry {
        &mut self.registry
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    pub fn captured_handle(&self) -> Option<ProxyHandle> {
        self.capture.as_ref().map(|capture| capture.handle)
    }

    /// Creates missing proxies, refreshes existing ones from the store and
    /// releases proxies whose objects are gone. A `None` centerpiece (config
    /// still loading) removes the main proxy.
    pub fn sync(
        &mut self,
        store: &SceneObjectStore,
        centerpiece: Option<(SceneType, &SceneThemeConfig)>,
        arbiter: &mut InteractionArbiter,
    ) {
        let mut seen: HashSet<&str> = HashSet::new();
        let selected = store.selected_object_id();

        for object in store.objects() {
            seen.insert(object.id.as_str());
            let geometry = GeometryDescriptor::for_object(object.kind);
            let material = MaterialDescriptor::for_object(object);

            let handle = match self.registry.handle_for(&object.id) {
                Some(handle) => handle,
                None => {
                    log::debug!("creating proxy for {}", object.id);
                    self.registry
                        .insert_object(&object.id, geometry.clone(), material.clone())
                }
            };
            let Some(node) = self.registry.get_mut(handle) else {
                continue;
            };
            if node.geometry != geometry {
                node.geometry = geometry;
            }
            if node.material != material {
                node.material = material;
            }
            node.anchor = Vec3::from_array(object.position);
            node.base_rotation = Vec3::from_array(object.rotation);
            node.transform.scale = Vec3::from_array(object.scale);
            node.selected = selected == Some(object.id.as_str());
            node.refresh_transform();
        }

        let stale: Vec<ObjectId> = self
            .registry
            .object_ids()
            .filter(|id| !seen.contains(id.as_str()))
            .cloned()
            .collect();
        for id in stale {
            if self
                .capture
                .as_ref()
                .is_some_and(|capture| capture.object_id == id)
            {
                self.invalidate_capture(arbiter);
            }
            if let Some(node) = self.registry.remove_object(&id) {
                if node.is_dragging() {
                    arbiter.release(InteractionMode::ObjectDrag(node.handle));
                }
                log::debug!("released proxy for {}", id);
            }
        }

        match centerpiece {
            Some((scene_type, theme)) => {
                let geometry = GeometryDescriptor::for_centerpiece(scene_type, theme);
                let material = MaterialDescriptor::for_centerpiece(theme);
                let existing = self
                    .registry
                    .main_handle()
                    .and_then(|handle| self.registry.get_mut(handle));
                match existing {
                    Some(node) => {
                        if node.geometry != geometry {
                            node.geometry = geometry;
                        }
                        if node.material != material {
                            node.material = material;
                        }
                    }
                    None => {
                        self.registry.insert_main(geometry, material);
                        log::info!("centerpiece proxy created ({})", scene_type.as_str());
                    }
                }
            }
            None => {
                if let Some(node) = self.registry.remove_main() {
                    if node.is_dragging() {
                        arbiter.release(InteractionMode::ObjectDrag(node.handle));
                    }
                    log::info!("centerpiece proxy released while configuration loads");
                }
            }
        }
    }

    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        pick_proxy(&self.registry, ray)
    }

    /// Starts a new pointer gesture; clears the consumed marker of the
    /// previous one.
    pub fn begin_gesture(&mut self) {
        self.gesture_consumed = false;
    }

    /// Marks the current gesture as handled by some proxy.
    pub fn mark_consumed(&mut self) {
        self.gesture_consumed = true;
    }

    pub fn pointer_enter(&mut self, handle: ProxyHandle, drag_enabled: bool) {
        if drag_enabled {
            return;
        }
        if let Some(node) = self.registry.get_mut(handle) {
            if node.state == ProxyState::Idle {
                node.state = ProxyState::Hovered;
            }
        }
    }

    pub fn pointer_leave(&mut self, handle: ProxyHandle, drag_enabled: bool) {
        if drag_enabled {
            return;
        }
        if let Some(node) = self.registry.get_mut(handle) {
            if node.state == ProxyState::Hovered {
                node.state = ProxyState::Idle;
            }
        }
    }

    /// Returns whether the event was consumed. Only user objects are handled
    /// here; the centerpiece is moved through the drag bridge.
    pub fn pointer_down(
        &mut self,
        handle: ProxyHandle,
        event: &PointerEvent,
        drag_enabled: bool,
        store: &mut SceneObjectStore,
        arbiter: &mut InteractionArbiter,
    ) -> bool {
        let Some(node) = self.registry.get(handle) else {
            return false;
        };
        let Some(object_id) = node.object_id.clone() else {
            return false;
        };
        let position = node.position();

        self.gesture_consumed = true;
        store.select_object(Some(&object_id));

        if !drag_enabled {
            return true;
        }
        if self.capture.is_some() {
            log::debug!("pointer {} ignored; another pointer owns the drag", event.pointer_id);
            return true;
        }
        let Some(hit) = event.hit else {
            log::debug!("pointer down on {} without a surface hit", object_id);
            return true;
        };
        if !arbiter.try_acquire(InteractionMode::ObjectDrag(handle)) {
            log::debug!("drag of {} refused; camera navigation active", object_id);
            return true;
        }

        if let Some(node) = self.registry.get_mut(handle) {
            node.state = ProxyState::Dragging;
        }
        self.capture = Some(PointerCapture {
            pointer_id: event.pointer_id,
            handle,
            object_id,
            offset: hit - position,
        });
        true
    }

    /// Moves the captured object to the pointer hit minus the recorded
    /// offset. Returns whether the store was updated.
    pub fn pointer_move(
        &mut self,
        event: &PointerEvent,
        store: &mut SceneObjectStore,
        arbiter: &mut InteractionArbiter,
    ) -> bool {
        let Some(capture) = self.capture.as_ref() else {
            return false;
        };
        if capture.pointer_id != event.pointer_id {
            return false;
        }
        let Some(hit) = event.hit else {
            return false;
        };
        let position = hit - capture.offset;
        let handle = capture.handle;

        if !store.update_object(&capture.object_id, ObjectPatch::position(position.to_array())) {
            self.invalidate_capture(arbiter);
            return false;
        }
        match self.registry.get_mut(handle) {
            Some(node) => {
                node.set_position(position);
                true
            }
            None => {
                self.invalidate_capture(arbiter);
                false
            }
        }
    }

    pub fn pointer_up(&mut self, pointer_id: u32, arbiter: &mut InteractionArbiter) -> bool {
        if !self
            .capture
            .as_ref()
            .is_some_and(|capture| capture.pointer_id == pointer_id)
        {
            return false;
        }
        self.release_capture(arbiter);
        true
    }

    /// Drops the capture without writing to the store again.
    pub fn invalidate_capture(&mut self, arbiter: &mut InteractionArbiter) {
        if self.capture.is_some() {
            log::debug!("pointer capture invalidated");
            self.release_capture(arbiter);
        }
    }

    fn release_capture(&mut self, arbiter: &mut InteractionArbiter) {
        let Some(capture) = self.capture.take() else {
            return;
        };
        if let Some(node) = self.registry.get_mut(capture.handle) {
            node.state = ProxyState::Idle;
        }
        arbiter.release(InteractionMode::ObjectDrag(capture.handle));
    }

    /// Deselects unless a proxy already consumed this gesture. Returns
    /// whether the selection was cleared.
    pub fn click_empty_space(&mut self, store: &mut SceneObjectStore) -> bool {
        if self.gesture_consumed {
            return false;
        }
        if store.selected_object_id().is_some() {
            store.select_object(None);
        }
        true
    }

    /// Idle spin for every proxy and bob for the centerpiece, skipped for
    /// proxies being dragged.
    pub fn animate(&mut self, dt: f32) {
        let animation = self.animation;
        for node in self.registry.iter_mut() {
            if node.is_dragging() {
                continue;
            }
            node.spin = (node.spin + animation.spin_speed * dt).rem_euclid(TAU);
            if node.is_main() {
                node.bob_time += dt;
                node.bob_offset =
                    animation.bob_amplitude * (TAU * animation.bob_frequency * node.bob_time).sin();
            }
            node.refresh_transform();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::scene::GeometryKind;

    fn setup() -> (ObjectRenderAdapter, SceneObjectStore, InteractionArbiter) {
        let adapter = ObjectRenderAdapter::new(AnimationSettings::from(&EditorSettings::default()));
        let store = SceneObjectStore::seeded(2.0, 11);
        (adapter, store, InteractionArbiter::default())
    }

    fn event_at(pointer_id: u32, hit: Vec3) -> PointerEvent {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        PointerEvent::new(pointer_id, Ray::through(eye, hit), Some(hit))
    }

    #[test]
    fn sync_creates_refreshes_and_releases_proxies() {
        let (mut adapter, mut store, mut arbiter) = setup();
        let config = SceneConfig::default();
        let a = store.add_object(GeometryKind::Box).unwrap();
        let b = store.add_object(GeometryKind::Sphere).unwrap();

        adapter.sync(&store, Some((config.scene_type, &config.day)), &mut arbiter);
        assert_eq!(adapter.registry().len(), 3);
        let handle_a = adapter.registry().handle_for(&a).unwrap();
        assert!(!adapter.registry().get(handle_a).unwrap().selected);
        let handle_b = adapter.registry().handle_for(&b).unwrap();
        assert!(adapter.registry().get(handle_b).unwrap().selected);

        store.update_object(&a, ObjectPatch::position([1.0, 1.0, 1.0]));
        store.remove_object(&b);
        adapter.sync(&store, Some((config.scene_type, &config.day)), &mut arbiter);

        assert_eq!(adapter.registry().handle_for(&a), Some(handle_a));
        assert_eq!(
            adapter.registry().get(handle_a).unwrap().position(),
            Vec3::ONE
        );
        assert!(adapter.registry().handle_for(&b).is_none());
    }

    #[test]
    fn loading_config_removes_centerpiece() {
        let (mut adapter, store, mut arbiter) = setup();
        let config = SceneConfig::default();
        adapter.sync(&store, Some((config.scene_type, &config.night)), &mut arbiter);
        assert!(adapter.registry().main_handle().is_some());
        adapter.sync(&store, None, &mut arbiter);
        assert!(adapter.registry().main_handle().is_none());
    }

    #[test]
    fn hover_without_drag_mode_never_touches_store() {
        let (mut adapter, mut store, mut arbiter) = setup();
        let id = store.add_object(GeometryKind::Box).unwrap();
        adapter.sync(&store, None, &mut arbiter);
        let handle = adapter.registry().handle_for(&id).unwrap();
        let revision = store.revision();

        adapter.pointer_enter(handle, false);
        assert_eq!(adapter.registry().get(handle).unwrap().state, ProxyState::Hovered);
        adapter.pointer_leave(handle, false);
        assert_eq!(adapter.registry().get(handle).unwrap().state, ProxyState::Idle);
        assert_eq!(store.revision(), revision);

        adapter.pointer_enter(handle, true);
        assert_eq!(adapter.registry().get(handle).unwrap().state, ProxyState::Idle);
    }

    #[test]
    fn press_and_release_without_moving_keeps_position_and_selects() {
        let (mut adapter, mut store, mut arbiter) = setup();
        let id = store.add_object(GeometryKind::Box).unwrap();
        store.add_object(GeometryKind::Cone).unwrap();
        adapter.sync(&store, None, &mut arbiter);
        let handle = adapter.registry().handle_for(&id).unwrap();
        let before = store.object(&id).unwrap().position;
        let hit = Vec3::from_array(before) + Vec3::new(0.1, 0.2, 0.3);

        assert!(adapter.pointer_down(handle, &event_at(1, hit), true, &mut store, &mut arbiter));
        assert_eq!(adapter.registry().get(handle).unwrap().state, ProxyState::Dragging);
        assert!(!arbiter.navigation_enabled());
        assert!(adapter.pointer_up(1, &mut arbiter));

        assert_eq!(store.object(&id).unwrap().position, before);
        assert_eq!(store.selected_object_id(), Some(id.as_str()));
        assert_eq!(adapter.registry().get(handle).unwrap().state, ProxyState::Idle);
        assert!(arbiter.navigation_enabled());
    }

    #[test]
    fn pointer_move_follows_hit_minus_offset() {
        let (mut adapter, mut store, mut arbiter) = setup();
        let id = store.add_object(GeometryKind::Box).unwrap();
        store.update_object(&id, ObjectPatch::position([0.0, 0.0, 0.0]));
        adapter.sync(&store, None, &mut arbiter);
        let handle = adapter.registry().handle_for(&id).unwrap();

        adapter.pointer_down(handle, &event_at(1, Vec3::new(0.5, 0.0, 0.0)), true, &mut store, &mut arbiter);
        assert!(!adapter.pointer_move(&event_at(2, Vec3::new(5.0, 0.0, 0.0)), &mut store, &mut arbiter));
        assert!(adapter.pointer_move(&event_at(1, Vec3::new(1.5, 1.0, 0.0)), &mut store, &mut arbiter));

        assert_eq!(store.object(&id).unwrap().position, [1.0, 1.0, 0.0]);
        assert_eq!(adapter.registry().get(handle).unwrap().position(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn removal_mid_drag_stops_store_writes() {
        let (mut adapter, mut store, mut arbiter) = setup();
        let id = store.add_object(GeometryKind::Box).unwrap();
        adapter.sync(&store, None, &mut arbiter);
        let handle = adapter.registry().handle_for(&id).unwrap();
        adapter.pointer_down(handle, &event_at(1, Vec3::ZERO), true, &mut store, &mut arbiter);

        store.remove_object(&id);
        let revision = store.revision();
        assert!(!adapter.pointer_move(&event_at(1, Vec3::ONE), &mut store, &mut arbiter));
        assert!(!adapter.is_capturing());
        assert_eq!(store.revision(), revision);
        assert!(arbiter.navigation_enabled());
    }

    #[test]
    fn empty_click_deselects_unless_consumed() {
        let (mut adapter, mut store, mut arbiter) = setup();
        let id = store.add_object(GeometryKind::Box).unwrap();
        adapter.sync(&store, None, &mut arbiter);
        let handle = adapter.registry().handle_for(&id).unwrap();

        adapter.begin_gesture();
        adapter.pointer_down(handle, &event_at(1, Vec3::ZERO), false, &mut store, &mut arbiter);
        assert!(!adapter.click_empty_space(&mut store));
        assert!(store.selected_object_id().is_some());

        adapter.begin_gesture();
        assert!(adapter.click_empty_space(&mut store));
        assert!(store.selected_object_id().is_none());
    }

    #[test]
    fn animation_pauses_while_dragged() {
        let (mut adapter, store, mut arbiter) = setup();
        let config = SceneConfig::default();
        adapter.sync(&store, Some((config.scene_type, &config.day)), &mut arbiter);
        let main = adapter.registry().main_handle().unwrap();

        adapter.animate(0.25);
        let spun = adapter.registry().get(main).unwrap().spin;
        assert!(spun > 0.0);

        adapter.registry_mut().get_mut(main).unwrap().being_dragged = true;
        adapter.animate(0.25);
        let node = adapter.registry().get(main).unwrap();
        assert_eq!(node.spin, spun);

        adapter.registry_mut().get_mut(main).unwrap().being_dragged = false;
        adapter.animate(0.25);
        assert!(adapter.registry().get(main).unwrap().spin > spun);
    }
}
