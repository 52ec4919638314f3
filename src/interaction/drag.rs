//! Drag-to-transform bridge: a single drag controller attached to every
//! draggable proxy while drag mode is on. Moves keep the grabbed point at a
//! constant camera-space depth and write user-object positions back to the
//! store in the same call.

use crate::interaction::{InteractionArbiter, InteractionMode};
use crate::render::adapter::PointerEvent;
use crate::render::camera::OrbitCamera;
use crate::render::proxy::{ProxyHandle, ProxyRegistry};
use crate::scene::{ObjectId, ObjectPatch, SceneObjectStore};
use glam::Vec3;

/// Identifies one attachment of the drag controller. Each rebuild gets a new
/// id so stale registrations are easy to spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Snapshot of what the controller was built against.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DraggableSet {
    objects: Vec<(ObjectId, Option<ProxyHandle>)>,
    main: Option<ProxyHandle>,
}

impl DraggableSet {
    fn collect(object_ids: &[ObjectId], registry: &ProxyRegistry) -> Self {
        let mut objects: Vec<(ObjectId, Option<ProxyHandle>)> = object_ids
            .iter()
            .map(|id| (id.clone(), registry.handle_for(id)))
            .collect();
        objects.sort();
        Self {
            objects,
            main: registry.main_handle(),
        }
    }

    fn targets(&self) -> Vec<ProxyHandle> {
        self.objects
            .iter()
            .filter_map(|(_, handle)| *handle)
            .chain(self.main)
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    pointer_id: u32,
    handle: ProxyHandle,
    depth: f32,
    offset: Vec3,
}

#[derive(Debug)]
struct DragController {
    id: ListenerId,
    targets: Vec<ProxyHandle>,
    active: Option<ActiveDrag>,
}

#[derive(Debug)]
pub struct DragBridge {
    enabled: bool,
    attach_delay: u32,
    pending: Option<u32>,
    draggable: Option<DraggableSet>,
    controller: Option<DragController>,
    next_listener: u64,
}

impl DragBridge {
    pub fn new(attach_delay_ticks: u32) -> Self {
        Self {
            enabled: false,
            attach_delay: attach_delay_ticks,
            pending: None,
            draggable: None,
            controller: None,
            next_listener: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn has_controller(&self) -> bool {
        self.controller.is_some()
    }

    pub fn listener_id(&self) -> Option<ListenerId> {
        self.controller.as_ref().map(|controller| controller.id)
    }

    pub fn targets(&self) -> &[ProxyHandle] {
        self.controller
            .as_ref()
            .map(|controller| controller.targets.as_slice())
            .unwrap_or(&[])
    }

    pub fn handles(&self, handle: ProxyHandle) -> bool {
        self.targets().contains(&handle)
    }

    pub fn active_handle(&self) -> Option<ProxyHandle> {
        self.controller
            .as_ref()
            .and_then(|controller| controller.active)
            .map(|active| active.handle)
    }

    pub fn is_dragging(&self) -> bool {
        self.active_handle().is_some()
    }

    /// Turning drag mode off cancels any drag in progress and detaches the
    /// controller.
    pub fn set_enabled(
        &mut self,
        enabled: bool,
        registry: &mut ProxyRegistry,
        arbiter: &mut InteractionArbiter,
    ) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.draggable = None;
        self.pending = None;
        if !enabled {
            self.teardown(registry, arbiter);
            log::info!("drag mode disabled");
        } else {
            log::info!("drag mode enabled");
        }
    }

    /// Per-frame update, called after proxies are synced. Rebuilds the
    /// controller when the draggable set changed, after the attach delay.
    pub fn tick(
        &mut self,
        object_ids: &[ObjectId],
        registry: &mut ProxyRegistry,
        arbiter: &mut InteractionArbiter,
    ) {
        if !self.enabled {
            return;
        }
        let current = DraggableSet::collect(object_ids, registry);
        if self.draggable.as_ref() != Some(&current) {
            self.teardown(registry, arbiter);
            self.draggable = Some(current);
            self.pending = Some(self.attach_delay);
        }

        match self.pending {
            Some(0) => {
                self.pending = None;
                self.attach(registry);
            }
            Some(remaining) => self.pending = Some(remaining - 1),
            None => {}
        }
    }

    fn attach(&mut self, registry: &mut ProxyRegistry) {
        let targets = self
            .draggable
            .as_ref()
            .map(DraggableSet::targets)
            .unwrap_or_default();
        if targets.is_empty() {
            log::info!("drag mode on, nothing draggable yet");
            return;
        }

        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        for handle in &targets {
            if let Some(node) = registry.get_mut(*handle) {
                node.drag_listener = Some(id);
            }
        }
        log::info!(
            "drag controller {} attached to {} proxies",
            id.raw(),
            targets.len()
        );
        self.controller = Some(DragController {
            id,
            targets,
            active: None,
        });
    }

    fn teardown(&mut self, registry: &mut ProxyRegistry, arbiter: &mut InteractionArbiter) {
        self.cancel(registry, arbiter);
        let Some(controller) = self.controller.take() else {
            return;
        };
        for node in registry.iter_mut() {
            if node.drag_listener == Some(controller.id) {
                node.drag_listener = None;
            }
        }
        log::debug!("drag controller {} detached", controller.id.raw());
    }

    pub fn drag_start(
        &mut self,
        handle: ProxyHandle,
        event: &PointerEvent,
        camera: &OrbitCamera,
        registry: &mut ProxyRegistry,
        store: &mut SceneObjectStore,
        arbiter: &mut InteractionArbiter,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(controller) = self.controller.as_mut() else {
            return false;
        };
        if controller.active.is_some() || !controller.targets.contains(&handle) {
            return false;
        }
        let Some(node) = registry.get_mut(handle) else {
            return false;
        };
        if node.drag_listener != Some(controller.id) {
            return false;
        }
        if !arbiter.try_acquire(InteractionMode::ObjectDrag(handle)) {
            log::debug!("drag of {} refused; camera navigation active", node.name);
            return false;
        }

        let position = node.position();
        let depth = camera.view_depth(position);
        let Some(grab) = camera.point_at_depth(&event.ray, depth) else {
            arbiter.release(InteractionMode::ObjectDrag(handle));
            return false;
        };
        node.being_dragged = true;
        let object_id = node.object_id.clone();
        controller.active = Some(ActiveDrag {
            pointer_id: event.pointer_id,
            handle,
            depth,
            offset: position - grab,
        });

        if let Some(id) = object_id {
            store.select_object(Some(&id));
        }
        true
    }

    /// Moves the dragged node and, for user objects, writes the new position
    /// to the store before returning.
    pub fn drag_move(
        &mut self,
        event: &PointerEvent,
        camera: &OrbitCamera,
        registry: &mut ProxyRegistry,
        store: &mut SceneObjectStore,
        arbiter: &mut InteractionArbiter,
    ) -> bool {
        let Some(active) = self.controller.as_ref().and_then(|controller| controller.active)
        else {
            return false;
        };
        if active.pointer_id != event.pointer_id {
            return false;
        }
        let Some(point) = camera.point_at_depth(&event.ray, active.depth) else {
            return false;
        };
        let position = point + active.offset;

        let Some(object_id) = registry.get(active.handle).map(|node| node.object_id.clone())
        else {
            self.cancel(registry, arbiter);
            return false;
        };

        // Store first: a failed write leaves the proxy where it was.
        if let Some(id) = object_id {
            if !store.update_object(&id, ObjectPatch::position(position.to_array())) {
                self.cancel(registry, arbiter);
                return false;
            }
        }
        if let Some(node) = registry.get_mut(active.handle) {
            node.set_position(position);
        }
        true
    }

    pub fn drag_end(
        &mut self,
        pointer_id: u32,
        registry: &mut ProxyRegistry,
        arbiter: &mut InteractionArbiter,
    ) -> bool {
        let owns_pointer = self
            .controller
            .as_ref()
            .and_then(|controller| controller.active)
            .is_some_and(|active| active.pointer_id == pointer_id);
        if !owns_pointer {
            return false;
        }
        self.cancel(registry, arbiter);
        true
    }

    /// Ends any drag in progress without a final store write.
    pub fn cancel(&mut self, registry: &mut ProxyRegistry, arbiter: &mut InteractionArbiter) {
        let Some(active) = self
            .controller
            .as_mut()
            .and_then(|controller| controller.active.take())
        else {
            return;
        };
        if let Some(node) = registry.get_mut(active.handle) {
            node.being_dragged = false;
        }
        arbiter.release(InteractionMode::ObjectDrag(active.handle));
    }
}
