use crate::render::proxy::ProxyHandle;
use std::collections::BTreeSet;

/// What a controller wants exclusive use of the pointer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    CameraNav,
    ObjectDrag(ProxyHandle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArbiterState {
    Idle,
    CameraNav,
    ObjectDrag,
}

/// Decides which of camera navigation and object dragging owns the current
/// gesture. The two never hold at the same time.
#[derive(Debug, Default)]
pub struct InteractionArbiter {
    camera_held: bool,
    drags: BTreeSet<ProxyHandle>,
}

impl InteractionArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ArbiterState {
        if !self.drags.is_empty() {
            ArbiterState::ObjectDrag
        } else if self.camera_held {
            ArbiterState::CameraNav
        } else {
            ArbiterState::Idle
        }
    }

    pub fn try_acquire(&mut self, mode: InteractionMode) -> bool {
        match mode {
            InteractionMode::CameraNav => {
                if !self.drags.is_empty() {
                    return false;
                }
                self.camera_held = true;
                true
            }
            InteractionMode::ObjectDrag(handle) => {
                if self.camera_held {
                    return false;
                }
                self.drags.insert(handle);
                true
            }
        }
    }

    pub fn release(&mut self, mode: InteractionMode) {
        match mode {
            InteractionMode::CameraNav => self.camera_held = false,
            InteractionMode::ObjectDrag(handle) => {
                self.drags.remove(&handle);
            }
        }
    }

    /// Read by the camera every frame.
    pub fn navigation_enabled(&self) -> bool {
        self.drags.is_empty()
    }

    pub fn is_dragging(&self, handle: ProxyHandle) -> bool {
        self.drags.contains(&handle)
    }
}
