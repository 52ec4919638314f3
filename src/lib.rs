//! World viewer editing core: the user object store, the themed scene
//! configuration, render proxies with drag interaction, and the property
//! panel that edits the configuration live.

pub mod app;
pub mod config;
pub mod interaction;
pub mod panel;
pub mod render;
pub mod scene;
pub mod settings;
