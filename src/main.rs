//! Worldview - headless editing session
//!
//! Loads editor settings and an optional world seed, then drives one
//! scripted editing pass: objects are added, one is dragged through screen
//! space, the centerpiece color is edited from the panel and the theme is
//! switched. Useful as a smoke run of the whole editing core without a
//! window.

use glam::{Vec2, Vec3};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use worldview::app::{CommandOutcome, EditorSession, SessionCommand};
use worldview::config::serialization::{parse_scene_config, scene_config_to_json};
use worldview::config::SceneConfig;
use worldview::panel::ControlValue;
use worldview::scene::GeometryKind;
use worldview::settings::{load_settings, EditorSettings};

const SETTINGS_ENV: &str = "WORLDVIEW_SETTINGS";
const FRAME: Duration = Duration::from_millis(16);

fn settings_from_env() -> EditorSettings {
    let Some(path) = std::env::var_os(SETTINGS_ENV).map(PathBuf::from) else {
        return EditorSettings::default();
    };
    match load_settings(&path) {
        Ok(settings) => {
            log::info!("settings loaded from {}", path.display());
            settings
        }
        Err(err) => {
            log::warn!(
                "ignoring settings file {}: {}; using defaults",
                path.display(),
                err
            );
            EditorSettings::default()
        }
    }
}

fn install_world(session: &mut EditorSession, seed: Option<&Path>) {
    if let Some(path) = seed {
        if let Err(err) = session.load_world(path) {
            log::error!("world seed {} unusable: {}", path.display(), err);
        } else {
            return;
        }
    }
    let raw = scene_config_to_json(&SceneConfig::default())
        .and_then(|json| parse_scene_config(&json));
    match raw {
        Ok(raw) => {
            if let Err(err) = session.install_config(raw) {
                log::error!("built-in world rejected: {}", err);
            }
        }
        Err(err) => log::error!("built-in world could not be encoded: {}", err),
    }
}

fn advance(session: &mut EditorSession, clock: &mut Instant, frames: u32) {
    for _ in 0..frames {
        *clock += FRAME;
        session.tick(*clock);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Worldview editing session");

    let seed = std::env::args_os().nth(1).map(PathBuf::from);
    let mut session = EditorSession::new(settings_from_env());
    session.set_viewport(Vec2::new(1280.0, 720.0));
    install_world(&mut session, seed.as_deref());

    let mut clock = Instant::now();
    advance(&mut session, &mut clock, 1);

    let mut added = Vec::new();
    for kind in [GeometryKind::Box, GeometryKind::Torus, GeometryKind::Cone] {
        if let CommandOutcome::Added(id) = session.apply(SessionCommand::AddObject(kind)) {
            added.push(id);
        }
    }

    session.apply(SessionCommand::SetDragEnabled(true));
    advance(&mut session, &mut clock, 2);

    if let Some(id) = added.first() {
        let grab = session
            .store()
            .object(id)
            .and_then(|object| session.screen_position(Vec3::from_array(object.position)));
        match grab {
            Some(grab) if session.pointer_down(1, grab) => {
                for step in 1..=10 {
                    session.pointer_move(1, grab + Vec2::new(6.0 * step as f32, -3.0 * step as f32));
                    advance(&mut session, &mut clock, 1);
                }
                session.pointer_up(1);
                if let Some(object) = session.store().object(id) {
                    log::info!("dragged {} to {:?}", id, object.position);
                }
            }
            _ => log::warn!("{} not under the pointer; drag skipped", id),
        }
    }

    let edited = session
        .panel()
        .toolkit()
        .tree()
        .and_then(|tree| tree.control("mainObjectColor"))
        .map(|control| control.change(ControlValue::Color("#ff8800".to_string())))
        .unwrap_or(false);
    if !edited {
        log::warn!("panel not ready; color edit skipped");
    }

    session.apply(SessionCommand::ToggleTheme);
    advance(&mut session, &mut clock, 3);

    if let Some(config) = session.config().snapshot() {
        log::info!(
            "{} centerpiece; day color {}, night color {}",
            config.scene_type.as_str(),
            config.day.main_object_color,
            config.night.main_object_color
        );
    }
    log::info!(
        "{} objects, selected {:?}, {} proxies, panel showing {} controls",
        session.store().objects().len(),
        session.store().selected_object_id(),
        session.adapter().registry().len(),
        session
            .panel()
            .toolkit()
            .tree()
            .map(|tree| tree.control_count())
            .unwrap_or(0)
    );

    session.shutdown();
}
