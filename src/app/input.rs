use crate::render::proxy::ProxyHandle;
use glam::Vec2;

/// Canvas pointer bookkeeping between events.
#[derive(Default, Debug, Clone, Copy)]
pub struct PointerInput {
    pub position: Option<Vec2>,
    pub primary_down: bool,
    pub hovered: Option<ProxyHandle>,
    /// Camera-space depth of the grab point while the render adapter holds
    /// a pointer capture.
    pub capture_depth: Option<f32>,
}

impl PointerInput {
    /// Records a new hover target and returns the (left, entered) pair when
    /// it changed.
    pub fn set_hovered(
        &mut self,
        next: Option<ProxyHandle>,
    ) -> Option<(Option<ProxyHandle>, Option<ProxyHandle>)> {
        if self.hovered == next {
            return None;
        }
        let previous = std::mem::replace(&mut self.hovered, next);
        Some((previous, next))
    }

    /// Pointer delta since the last recorded position.
    pub fn move_to(&mut self, position: Vec2) -> Vec2 {
        let delta = self
            .position
            .map(|last| position - last)
            .unwrap_or(Vec2::ZERO);
        self.position = Some(position);
        delta
    }
}
