use glam::Vec2;

pub struct EguiFrameOutput {
    pub clipped_primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
    pub wants_pointer_input: bool,
    pub wants_keyboard_input: bool,
}

/// Owns the egui context for the property panel. The embedding host feeds
/// raw input and draws the tessellated output.
pub struct EguiHost {
    context: egui::Context,
    pointer_claimed: bool,
}

impl EguiHost {
    pub fn new() -> Self {
        Self {
            context: egui::Context::default(),
            pointer_claimed: false,
        }
    }

    pub fn context(&self) -> &egui::Context {
        &self.context
    }

    /// Whether the panel wanted the pointer on its last frame. Canvas presses
    /// are ignored while it does.
    pub fn pointer_claimed(&self) -> bool {
        self.pointer_claimed
    }

    /// Runs one panel frame over `viewport` (logical pixels) unless the host
    /// already set a screen rect.
    pub fn run_ui<F>(&mut self, mut raw_input: egui::RawInput, viewport: Vec2, run_ui: F) -> EguiFrameOutput
    where
        F: FnMut(&egui::Context),
    {
        if raw_input.screen_rect.is_none() {
            raw_input.screen_rect = Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(viewport.x, viewport.y),
            ));
        }
        let full_output = self.context.run(raw_input, run_ui);
        let pixels_per_point = self.context.pixels_per_point();
        let clipped_primitives = self
            .context
            .tessellate(full_output.shapes, pixels_per_point);

        self.pointer_claimed = self.context.wants_pointer_input();
        EguiFrameOutput {
            clipped_primitives,
            textures_delta: full_output.textures_delta,
            pixels_per_point,
            wants_pointer_input: self.pointer_claimed,
            wants_keyboard_input: self.context.wants_keyboard_input(),
        }
    }
}

impl Default for EguiHost {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_becomes_screen_rect() {
        let mut host = EguiHost::new();
        let mut seen = None;
        let output = host.run_ui(egui::RawInput::default(), Vec2::new(640.0, 480.0), |ctx| {
            seen = Some(ctx.screen_rect());
        });
        let rect = seen.unwrap();
        assert_eq!(rect.width(), 640.0);
        assert_eq!(rect.height(), 480.0);
        assert!(!output.wants_pointer_input);
        assert!(!host.pointer_claimed());
    }
}
