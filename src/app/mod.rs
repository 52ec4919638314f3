//! Editing session: owns the object store and the live scene config, and
//! drives the render adapter, drag bridge, camera and property panel from
//! host input. The host (window loop, renderer) feeds pointer events in
//! screen pixels and calls `tick` once per frame.

mod egui_host;
mod input;
mod timing;

pub use egui_host::{EguiFrameOutput, EguiHost};
pub use timing::FrameTiming;

use crate::config::serialization::{load_scene_config_from_file, LoadError};
use crate::config::{ConfigCell, ConfigError, LoadState, RawSceneConfig, SceneConfig, Theme};
use crate::interaction::{DragBridge, InteractionArbiter};
use crate::panel::{EguiPanel, PanelEngine, PanelTab};
use crate::render::adapter::{AnimationSettings, ObjectRenderAdapter, PointerEvent};
use crate::render::camera::OrbitCamera;
use crate::render::pick::Ray;
use crate::scene::{GeometryKind, ObjectId, SceneObjectStore};
use crate::settings::EditorSettings;
use glam::{Vec2, Vec3};
use input::PointerInput;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to read world seed: {0}")]
    Load(#[from] LoadError),
    #[error("world seed rejected: {0}")]
    Config(#[from] ConfigError),
}

/// Discrete editor actions coming from toolbars, menus or scripts.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    AddObject(GeometryKind),
    RemoveObject(ObjectId),
    SelectObject(Option<ObjectId>),
    ClearObjects,
    ToggleAddMode,
    SetTheme(Theme),
    ToggleTheme,
    SetTab(PanelTab),
    SetDragEnabled(bool),
    ResetConfig,
    LoadWorld(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    None,
    Added(ObjectId),
    Message(String),
}

pub struct EditorSession {
    settings: EditorSettings,
    store: SceneObjectStore,
    config: ConfigCell,
    world_default: Option<SceneConfig>,
    adapter: ObjectRenderAdapter,
    bridge: DragBridge,
    arbiter: InteractionArbiter,
    camera: OrbitCamera,
    panel: PanelEngine<EguiPanel>,
    egui: EguiHost,
    timing: FrameTiming,
    input: PointerInput,
    viewport: Vec2,
    theme: Theme,
    tab: PanelTab,
    drag_enabled: bool,
}

impl EditorSession {
    pub fn new(settings: EditorSettings) -> Self {
        let store = SceneObjectStore::new(settings.spawn_half_extent);
        Self::with_store(settings, store)
    }

    /// Deterministic spawn positions, for scripted runs and tests.
    pub fn seeded(settings: EditorSettings, seed: u64) -> Self {
        let store = SceneObjectStore::seeded(settings.spawn_half_extent, seed);
        Self::with_store(settings, store)
    }

    fn with_store(settings: EditorSettings, store: SceneObjectStore) -> Self {
        let viewport = Vec2::new(1280.0, 720.0);
        let mut camera =
            OrbitCamera::from_bounds(Vec3::ZERO, Vec3::splat(settings.spawn_half_extent))
                .with_fov(settings.camera_fov_deg)
                .with_sensitivity(settings.orbit_sensitivity);
        camera.aspect = viewport.x / viewport.y;

        Self {
            adapter: ObjectRenderAdapter::new(AnimationSettings::from(&settings)),
            bridge: DragBridge::new(settings.attach_delay_ticks),
            settings,
            store,
            config: ConfigCell::new(),
            world_default: None,
            arbiter: InteractionArbiter::new(),
            camera,
            panel: PanelEngine::new(EguiPanel::new()),
            egui: EguiHost::new(),
            timing: FrameTiming::new("worldview".to_string()),
            input: PointerInput::default(),
            viewport,
            theme: Theme::Day,
            tab: PanelTab::All,
            drag_enabled: false,
        }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn store(&self) -> &SceneObjectStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SceneObjectStore {
        &mut self.store
    }

    pub fn config(&self) -> &ConfigCell {
        &self.config
    }

    pub fn adapter(&self) -> &ObjectRenderAdapter {
        &self.adapter
    }

    pub fn bridge(&self) -> &DragBridge {
        &self.bridge
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn panel(&self) -> &PanelEngine<EguiPanel> {
        &self.panel
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn tab(&self) -> PanelTab {
        self.tab
    }

    pub fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    /// Read by the renderer's camera every frame.
    pub fn navigation_enabled(&self) -> bool {
        self.arbiter.navigation_enabled()
    }

    /// Installs a backend-supplied config. It also becomes the target of
    /// `reset_config`. An incomplete config leaves the session loading.
    pub fn install_config(&mut self, raw: RawSceneConfig) -> Result<(), ConfigError> {
        self.config.install_raw(raw)?;
        self.world_default = self.config.snapshot().map(|config| (*config).clone());
        Ok(())
    }

    /// Switches to the world described by the seed at `path`. User objects
    /// belong to the previous world and are cleared once the new config is
    /// in place. A seed that cannot be read or fails the shape check leaves
    /// the current world untouched.
    pub fn load_world(&mut self, path: &Path) -> Result<(), SessionError> {
        let raw = match load_scene_config_from_file(path) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("could not read world seed {}: {}", path.display(), err);
                return Err(err.into());
            }
        };
        let config = match SceneConfig::try_from(raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("world seed {} rejected: {}", path.display(), err);
                return Err(err.into());
            }
        };
        self.config.replace(config.clone());
        self.world_default = Some(config);
        self.store.clear_objects();
        log::info!("world loaded from {}", path.display());
        Ok(())
    }

    /// Drops panel edits and returns to the config the world was loaded with.
    pub fn reset_config(&mut self) -> bool {
        match &self.world_default {
            Some(config) => {
                self.config.replace(config.clone());
                true
            }
            None => {
                log::debug!("reset requested before any world was loaded");
                false
            }
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            log::info!("theme switched to {}", theme.as_str());
            self.theme = theme;
        }
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggled());
    }

    pub fn set_tab(&mut self, tab: PanelTab) {
        self.tab = tab;
    }

    /// Turning drag mode off mid-drag cancels the drag and releases any
    /// pointer capture.
    pub fn set_drag_enabled(&mut self, enabled: bool) {
        if self.drag_enabled == enabled {
            return;
        }
        self.drag_enabled = enabled;
        self.bridge
            .set_enabled(enabled, self.adapter.registry_mut(), &mut self.arbiter);
        self.adapter.invalidate_capture(&mut self.arbiter);
        self.input.capture_depth = None;
        if enabled {
            // Hover visuals only exist while drag mode is off.
            if let Some(handle) = self.input.hovered.take() {
                self.adapter.pointer_leave(handle, false);
            }
        }
    }

    pub fn set_viewport(&mut self, size: Vec2) {
        self.viewport = size.max(Vec2::ONE);
        self.camera.aspect = self.viewport.x / self.viewport.y;
    }

    pub fn apply(&mut self, command: SessionCommand) -> CommandOutcome {
        match command {
            SessionCommand::AddObject(kind) => match self.store.add_object(kind) {
                Some(id) => CommandOutcome::Added(id),
                None => CommandOutcome::None,
            },
            SessionCommand::RemoveObject(id) => {
                self.store.remove_object(&id);
                CommandOutcome::None
            }
            SessionCommand::SelectObject(id) => {
                self.store.select_object(id.as_deref());
                CommandOutcome::None
            }
            SessionCommand::ClearObjects => {
                self.store.clear_objects();
                CommandOutcome::None
            }
            SessionCommand::ToggleAddMode => {
                self.store.toggle_add_mode();
                CommandOutcome::None
            }
            SessionCommand::SetTheme(theme) => {
                self.set_theme(theme);
                CommandOutcome::None
            }
            SessionCommand::ToggleTheme => {
                self.toggle_theme();
                CommandOutcome::None
            }
            SessionCommand::SetTab(tab) => {
                self.set_tab(tab);
                CommandOutcome::None
            }
            SessionCommand::SetDragEnabled(enabled) => {
                self.set_drag_enabled(enabled);
                CommandOutcome::None
            }
            SessionCommand::ResetConfig => {
                if self.reset_config() {
                    CommandOutcome::Message("Scene configuration reset".to_string())
                } else {
                    CommandOutcome::Message("No world loaded".to_string())
                }
            }
            SessionCommand::LoadWorld(path) => match self.load_world(&path) {
                Ok(()) => CommandOutcome::Message(format!("Loaded {}", path.display())),
                Err(err) => CommandOutcome::Message(err.to_string()),
            },
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.timing.update(now);
        self.frame(self.timing.frame_dt);
    }

    /// One frame: re-derive proxies from the store and config, let the drag
    /// bridge follow the draggable set, animate, and rebuild the panel if its
    /// inputs moved.
    pub fn frame(&mut self, dt: f32) {
        let snapshot = self.config.snapshot();
        let theme = self.theme;
        let centerpiece = snapshot.as_deref().and_then(|config| match config.ready_theme(theme) {
            Ok(branch) => Some((config.scene_type, branch)),
            Err(err) => {
                log::debug!("centerpiece withheld: {}", err);
                None
            }
        });
        if let Some((_, branch)) = centerpiece {
            self.store.set_default_tint(&branch.main_object_color);
        }

        self.adapter.sync(&self.store, centerpiece, &mut self.arbiter);
        if !self.adapter.is_capturing() {
            self.input.capture_depth = None;
        }
        let object_ids = self.store.object_ids();
        self.bridge
            .tick(&object_ids, self.adapter.registry_mut(), &mut self.arbiter);
        self.adapter.animate(dt);
        self.panel.sync(&self.config, self.theme, self.tab);
    }

    fn ray_at(&self, screen: Vec2) -> Ray {
        let ndc = Vec2::new(
            screen.x / self.viewport.x * 2.0 - 1.0,
            1.0 - screen.y / self.viewport.y * 2.0,
        );
        self.camera.ray_through_ndc(ndc)
    }

    /// Screen position of a world point, for overlays and scripted input.
    pub fn screen_position(&self, world: Vec3) -> Option<Vec2> {
        let ndc = self.camera.world_to_ndc(world)?;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    /// Returns whether a proxy consumed the press. Unconsumed presses start
    /// camera navigation; presses on empty space also clear the selection.
    pub fn pointer_down(&mut self, pointer_id: u32, screen: Vec2) -> bool {
        if self.egui.pointer_claimed() {
            log::trace!("press at {:?} belongs to the panel", screen);
            return false;
        }
        self.input.move_to(screen);
        self.input.primary_down = true;
        let ray = self.ray_at(screen);
        self.adapter.begin_gesture();

        let Some(hit) = self.adapter.pick(&ray) else {
            self.adapter.click_empty_space(&mut self.store);
            self.camera.begin_orbit(&mut self.arbiter);
            return false;
        };
        let event = PointerEvent::new(pointer_id, ray, Some(hit.point));

        if self.drag_enabled
            && self.bridge.handles(hit.handle)
            && self.bridge.drag_start(
                hit.handle,
                &event,
                &self.camera,
                self.adapter.registry_mut(),
                &mut self.store,
                &mut self.arbiter,
            )
        {
            self.adapter.mark_consumed();
            return true;
        }

        let was_capturing = self.adapter.is_capturing();
        let consumed = self.adapter.pointer_down(
            hit.handle,
            &event,
            self.drag_enabled,
            &mut self.store,
            &mut self.arbiter,
        );
        if !was_capturing && self.adapter.is_capturing() {
            self.input.capture_depth = Some(self.camera.view_depth(hit.point));
        }
        if !consumed {
            self.camera.begin_orbit(&mut self.arbiter);
        }
        consumed
    }

    /// Routes a move to whichever gesture owns the pointer: a bridge drag, an
    /// adapter capture, a camera orbit, or plain hover tracking. Returns
    /// whether anything moved.
    pub fn pointer_move(&mut self, pointer_id: u32, screen: Vec2) -> bool {
        let delta = self.input.move_to(screen);
        let ray = self.ray_at(screen);

        if self.bridge.is_dragging() {
            let event = PointerEvent::new(pointer_id, ray, None);
            return self.bridge.drag_move(
                &event,
                &self.camera,
                self.adapter.registry_mut(),
                &mut self.store,
                &mut self.arbiter,
            );
        }

        if let Some(depth) = self.input.capture_depth {
            let hit = self.camera.point_at_depth(&ray, depth);
            let event = PointerEvent::new(pointer_id, ray, hit);
            return self
                .adapter
                .pointer_move(&event, &mut self.store, &mut self.arbiter);
        }

        if self.input.primary_down && self.camera.is_orbiting() {
            return self.camera.orbit(delta, &self.arbiter);
        }

        let hovered = self.adapter.pick(&ray).map(|hit| hit.handle);
        if let Some((left, entered)) = self.input.set_hovered(hovered) {
            if let Some(handle) = left {
                self.adapter.pointer_leave(handle, self.drag_enabled);
            }
            if let Some(handle) = entered {
                self.adapter.pointer_enter(handle, self.drag_enabled);
            }
        }
        false
    }

    pub fn pointer_up(&mut self, pointer_id: u32) -> bool {
        self.input.primary_down = false;
        self.camera.end_orbit(&mut self.arbiter);
        let dragged = self
            .bridge
            .drag_end(pointer_id, self.adapter.registry_mut(), &mut self.arbiter);
        let captured = self.adapter.pointer_up(pointer_id, &mut self.arbiter);
        if captured {
            self.input.capture_depth = None;
        }
        dragged || captured
    }

    pub fn zoom(&mut self, delta: f32) -> bool {
        self.camera.zoom(delta, &self.arbiter)
    }

    /// Draws the property panel and forwards this frame's edits to the
    /// mounted tree. The next `frame` rebuilds the tree from the committed
    /// config.
    pub fn run_panel_frame(&mut self, raw_input: egui::RawInput) -> EguiFrameOutput {
        let mut edits = Vec::new();
        let mut tab = self.tab;
        let theme = self.theme;
        let loading = self.config.load_state() == LoadState::Loading;
        let panel = &self.panel;

        let output = self.egui.run_ui(raw_input, self.viewport, |ctx| {
            egui::SidePanel::right("scene_properties").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for candidate in PanelTab::ALL {
                        ui.selectable_value(&mut tab, candidate, candidate.label());
                    }
                });
                if !loading {
                    ui.label(format!("Editing the {} theme", theme.as_str()));
                }
                ui.separator();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    edits = panel.toolkit().show(ui);
                });
            });
        });

        let delivered = self.panel.toolkit().dispatch(edits);
        if delivered > 0 {
            log::debug!("{} panel edits committed", delivered);
        }
        self.set_tab(tab);
        output
    }

    /// Detaches everything that holds on to proxies or the panel.
    pub fn shutdown(&mut self) {
        self.set_drag_enabled(false);
        self.camera.end_orbit(&mut self.arbiter);
        self.panel.teardown();
        log::info!(
            "session closed with {} objects, {} panel rebuilds",
            self.store.objects().len(),
            self.panel.rebuild_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::serialization::scene_config_to_json;
    use crate::panel::{ControlKind, ControlValue};
    use crate::render::proxy::ProxyState;
    use crate::scene::ObjectPatch;

    fn session() -> EditorSession {
        let mut session = EditorSession::seeded(EditorSettings::default(), 7);
        session.set_viewport(Vec2::new(800.0, 600.0));
        let raw = crate::config::serialization::parse_scene_config(
            &scene_config_to_json(&SceneConfig::default()).unwrap(),
        )
        .unwrap();
        session.install_config(raw).unwrap();
        session.frame(0.016);
        session
    }

    /// Adds an object and parks it where the pointer can reach it without
    /// the centerpiece in the way.
    fn add_at(session: &mut EditorSession, kind: GeometryKind, position: [f32; 3]) -> ObjectId {
        let id = session.store_mut().add_object(kind).unwrap();
        session
            .store_mut()
            .update_object(&id, ObjectPatch::position(position));
        session.frame(0.016);
        id
    }

    fn screen_of(session: &EditorSession, id: &str) -> Vec2 {
        let position = Vec3::from_array(session.store().object(id).unwrap().position);
        session.screen_position(position).unwrap()
    }

    fn position_of(session: &EditorSession, id: &str) -> Vec3 {
        Vec3::from_array(session.store().object(id).unwrap().position)
    }

    const EMPTY: Vec2 = Vec2::new(4.0, 4.0);

    /// Per-test seed path; tests run in parallel inside one process.
    fn seed_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("worldview_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn first_frame_mounts_panel_and_centerpiece() {
        let session = session();
        assert!(session.adapter().registry().main_handle().is_some());
        assert!(session.panel().is_mounted());
        let tree = session.panel().toolkit().tree().unwrap();
        assert_eq!(tree.theme, Theme::Day);
        assert!(!tree.loading);
    }

    #[test]
    fn session_without_config_stays_loading() {
        let mut session = EditorSession::seeded(EditorSettings::default(), 1);
        session.frame(0.016);
        assert!(session.adapter().registry().main_handle().is_none());
        assert!(session.panel().toolkit().tree().unwrap().loading);
        assert!(!session.reset_config());
    }

    #[test]
    fn theme_toggle_rebuilds_panel_without_touching_day() {
        let mut session = session();
        let day = session.config().snapshot().unwrap().day.clone();
        let rebuilds = session.panel().rebuild_count();

        session.toggle_theme();
        session.frame(0.016);
        assert_eq!(session.panel().rebuild_count(), rebuilds + 1);
        let tree = session.panel().toolkit().tree().unwrap();
        assert_eq!(tree.theme, Theme::Night);

        tree.control("mainObjectColor")
            .unwrap()
            .change(ControlValue::Color("#ff00ff".to_string()));
        session.frame(0.016);

        let config = session.config().snapshot().unwrap();
        assert_eq!(config.night.main_object_color, "#ff00ff");
        assert_eq!(config.day, day);
        match &session
            .panel()
            .toolkit()
            .tree()
            .unwrap()
            .control("mainObjectColor")
            .unwrap()
            .kind
        {
            ControlKind::Color { value } => assert_eq!(value, "#ff00ff"),
            other => panic!("expected color control, got {:?}", other),
        }
    }

    #[test]
    fn bridge_drag_round_trip_keeps_depth_and_blocks_navigation() {
        let mut session = session();
        let id = add_at(&mut session, GeometryKind::Sphere, [0.0, 0.0, 3.0]);
        session.set_drag_enabled(true);
        session.frame(0.016);
        session.frame(0.016);
        assert!(session.bridge().has_controller());

        let start = position_of(&session, &id);
        let grab = screen_of(&session, &id);
        assert!(session.pointer_down(1, grab));
        assert!(!session.navigation_enabled());
        assert!(!session.zoom(1.0));

        for step in 1..=4 {
            assert!(session.pointer_move(1, grab + Vec2::new(10.0 * step as f32, 0.0)));
        }
        assert!(session.pointer_up(1));
        assert!(session.navigation_enabled());

        let end = position_of(&session, &id);
        assert!((end - start).length() > 0.1);
        let camera = session.camera();
        assert!((camera.view_depth(end) - camera.view_depth(start)).abs() < 1e-3);
        assert_eq!(session.store().selected_object_id(), Some(id.as_str()));

        let handle = session.adapter().registry().handle_for(&id).unwrap();
        assert!(!session.adapter().registry().get(handle).unwrap().is_dragging());
    }

    #[test]
    fn press_and_release_without_moves_keeps_position() {
        let mut session = session();
        let id = add_at(&mut session, GeometryKind::Box, [0.0, 0.0, 3.0]);
        session.store_mut().select_object(None);
        session.set_drag_enabled(true);
        session.frame(0.016);
        session.frame(0.016);

        let start = position_of(&session, &id);
        let grab = screen_of(&session, &id);
        assert!(session.pointer_down(1, grab));
        assert!(session.pointer_up(1));

        assert_eq!(position_of(&session, &id), start);
        assert_eq!(session.store().selected_object_id(), Some(id.as_str()));
    }

    #[test]
    fn hover_with_drag_off_never_writes_the_store() {
        let mut session = session();
        let id = add_at(&mut session, GeometryKind::Box, [0.0, 0.0, 3.0]);
        let handle = session.adapter().registry().handle_for(&id).unwrap();
        let revision = session.store().revision();

        session.pointer_move(0, screen_of(&session, &id));
        assert_eq!(
            session.adapter().registry().get(handle).unwrap().state,
            ProxyState::Hovered
        );
        session.pointer_move(0, EMPTY);
        assert_eq!(
            session.adapter().registry().get(handle).unwrap().state,
            ProxyState::Idle
        );
        assert_eq!(session.store().revision(), revision);
    }

    #[test]
    fn empty_press_deselects_and_orbits() {
        let mut session = session();
        let id = add_at(&mut session, GeometryKind::Box, [0.0, 0.0, 3.0]);
        assert_eq!(session.store().selected_object_id(), Some(id.as_str()));
        let yaw = session.camera().yaw;

        assert!(!session.pointer_down(0, EMPTY));
        assert_eq!(session.store().selected_object_id(), None);
        assert!(session.pointer_move(0, EMPTY + Vec2::new(40.0, 0.0)));
        session.pointer_up(0);
        assert!(session.camera().yaw != yaw);
        assert!(!session.camera().is_orbiting());
    }

    #[test]
    fn object_press_with_drag_off_selects_without_orbit() {
        let mut session = session();
        let id = add_at(&mut session, GeometryKind::Box, [0.0, 0.0, 3.0]);
        session.store_mut().select_object(None);

        assert!(session.pointer_down(0, screen_of(&session, &id)));
        assert_eq!(session.store().selected_object_id(), Some(id.as_str()));
        assert!(!session.camera().is_orbiting());
        session.pointer_up(0);
    }

    #[test]
    fn disabling_drag_mid_drag_cancels_cleanly() {
        let mut session = session();
        let id = add_at(&mut session, GeometryKind::Box, [0.0, 0.0, 3.0]);
        session.set_drag_enabled(true);
        session.frame(0.016);
        session.frame(0.016);

        let grab = screen_of(&session, &id);
        session.pointer_down(1, grab);
        session.pointer_move(1, grab + Vec2::new(15.0, 5.0));
        let moved = position_of(&session, &id);

        session.set_drag_enabled(false);
        assert!(session.navigation_enabled());
        assert!(!session.bridge().is_dragging());
        assert!(!session.pointer_move(1, grab + Vec2::new(60.0, 5.0)));
        assert_eq!(position_of(&session, &id), moved);
    }

    #[test]
    fn centerpiece_drag_leaves_store_untouched() {
        let mut session = session();
        session.set_drag_enabled(true);
        session.frame(0.016);
        session.frame(0.016);
        let revision = session.store().revision();

        let grab = session.screen_position(Vec3::ZERO).unwrap();
        assert!(session.pointer_down(2, grab));
        assert!(session.pointer_move(2, grab + Vec2::new(0.0, -30.0)));
        session.pointer_up(2);

        let main = session.adapter().registry().main_handle().unwrap();
        let node = session.adapter().registry().get(main).unwrap();
        assert!(node.position().length() > 0.05);
        assert_eq!(session.store().revision(), revision);
    }

    #[test]
    fn headless_panel_frame_keeps_tree_and_tab() {
        let mut session = session();
        session.set_tab(PanelTab::Lights);
        session.frame(0.016);

        let output = session.run_panel_frame(egui::RawInput::default());
        assert!(!output.wants_pointer_input);
        assert_eq!(session.tab(), PanelTab::Lights);
        let tree = session.panel().toolkit().tree().unwrap();
        assert!(tree.folder("lights").is_some());
        assert!(tree.folder("material").is_none());
    }

    #[test]
    fn reset_restores_loaded_config() {
        let mut session = session();
        session
            .panel()
            .toolkit()
            .tree()
            .unwrap()
            .control("material.roughness")
            .unwrap()
            .change(ControlValue::Number(0.95));
        assert_eq!(
            session.config().snapshot().unwrap().day.material.roughness,
            0.95
        );

        assert_eq!(
            session.apply(SessionCommand::ResetConfig),
            CommandOutcome::Message("Scene configuration reset".to_string())
        );
        assert_eq!(
            session.config().snapshot().unwrap().day.material.roughness,
            SceneConfig::default().day.material.roughness
        );
    }

    #[test]
    fn load_world_replaces_config_and_clears_objects() {
        let mut session = session();
        session.apply(SessionCommand::AddObject(GeometryKind::Cone));

        let mut config = SceneConfig::default();
        config.day.main_object_color = "#abcdef".to_string();
        let path = seed_path("load_world_seed");
        std::fs::write(&path, scene_config_to_json(&config).unwrap()).unwrap();

        session.load_world(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(session.store().objects().is_empty());
        assert_eq!(
            session.config().snapshot().unwrap().day.main_object_color,
            "#abcdef"
        );
    }

    #[test]
    fn missing_world_seed_keeps_current_config() {
        let mut session = session();
        let revision = session.config().revision();
        let path = seed_path("missing_seed");

        assert!(matches!(
            session.load_world(&path),
            Err(SessionError::Load(LoadError::Io(_)))
        ));
        assert_eq!(session.config().revision(), revision);
        assert_eq!(session.config().load_state(), LoadState::Ready);
    }

    #[test]
    fn invalid_world_seed_keeps_current_world() {
        let mut session = session();
        let id = add_at(&mut session, GeometryKind::Box, [0.0, 0.0, 3.0]);
        let revision = session.config().revision();

        let mut seed: serde_json::Value =
            serde_json::from_str(&scene_config_to_json(&SceneConfig::default()).unwrap()).unwrap();
        seed.as_object_mut().unwrap().remove("night");
        let path = seed_path("seed_without_night");
        std::fs::write(&path, seed.to_string()).unwrap();

        let result = session.load_world(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            result,
            Err(SessionError::Config(ConfigError::MissingTheme(Theme::Night)))
        ));

        session.frame(0.016);
        assert_eq!(session.config().revision(), revision);
        assert_eq!(session.config().load_state(), LoadState::Ready);
        assert!(session.adapter().registry().main_handle().is_some());
        assert!(!session.panel().toolkit().tree().unwrap().loading);
        assert!(session.store().object(&id).is_some());
    }

    #[test]
    fn removing_an_object_releases_its_proxy_and_drag_target() {
        let mut session = session();
        let a = add_at(&mut session, GeometryKind::Box, [0.0, 0.0, 3.0]);
        let b = add_at(&mut session, GeometryKind::Torus, [1.5, 0.0, -1.5]);
        session.set_drag_enabled(true);
        session.frame(0.016);
        session.frame(0.016);
        let listener = session.bridge().listener_id();
        assert_eq!(session.bridge().targets().len(), 3);

        session.apply(SessionCommand::RemoveObject(a.clone()));
        session.frame(0.016);
        session.frame(0.016);
        assert!(session.adapter().registry().handle_for(&a).is_none());
        assert_eq!(session.bridge().targets().len(), 2);
        assert_ne!(session.bridge().listener_id(), listener);
        assert_eq!(session.store().selected_object_id(), Some(b.as_str()));
    }
}
