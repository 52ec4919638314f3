//! Copy-mutate-commit updates on the shared scene configuration.
//!
//! Widgets capture an updater at build time. The updater never touches the
//! snapshot it was created from: every `apply` clones the snapshot into a
//! draft, lets the caller mutate it and hands the finished draft to the
//! commit callback. The session's commit callback refuses drafts built on a
//! superseded revision, so a widget outliving its tree cannot clobber newer
//! state.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::{ConfigError, RawSceneConfig, SceneConfig};

pub type CommitFn = Rc<dyn Fn(SceneConfig)>;

#[derive(Clone)]
pub struct ConfigUpdater {
    base: Rc<SceneConfig>,
    commit: CommitFn,
}

pub fn create_updater(current: Rc<SceneConfig>, commit: CommitFn) -> ConfigUpdater {
    ConfigUpdater {
        base: current,
        commit,
    }
}

impl ConfigUpdater {
    pub fn base(&self) -> &SceneConfig {
        &self.base
    }

    pub fn apply<F>(&self, mutator: F)
    where
        F: FnOnce(&mut SceneConfig),
    {
        let mut draft = (*self.base).clone();
        mutator(&mut draft);
        (self.commit)(draft);
    }

    /// Like `apply`, but a failing mutator commits nothing.
    pub fn try_apply<F, E>(&self, mutator: F) -> Result<(), E>
    where
        F: FnOnce(&mut SceneConfig) -> Result<(), E>,
    {
        let mut draft = (*self.base).clone();
        mutator(&mut draft)?;
        (self.commit)(draft);
        Ok(())
    }
}

impl std::fmt::Debug for ConfigUpdater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigUpdater")
            .field("scene_type", &self.base.scene_type)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

#[derive(Default)]
struct CellState {
    current: Option<Rc<SceneConfig>>,
    revision: u64,
    discarded_writes: u64,
}

/// Single-writer holder of the live config. Readers get committed `Rc`
/// snapshots; writers go through `updater()`.
#[derive(Clone, Default)]
pub struct ConfigCell {
    inner: Rc<RefCell<CellState>>,
}

impl ConfigCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SceneConfig) -> Self {
        let cell = Self::new();
        cell.replace(config);
        cell
    }

    pub fn load_state(&self) -> LoadState {
        if self.inner.borrow().current.is_some() {
            LoadState::Ready
        } else {
            LoadState::Loading
        }
    }

    pub fn snapshot(&self) -> Option<Rc<SceneConfig>> {
        self.inner.borrow().current.clone()
    }

    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }

    pub fn discarded_writes(&self) -> u64 {
        self.inner.borrow().discarded_writes
    }

    /// Wholesale replacement on world change or reset.
    pub fn replace(&self, config: SceneConfig) {
        let mut state = self.inner.borrow_mut();
        state.current = Some(Rc::new(config));
        state.revision += 1;
        log::info!("scene config replaced (revision {})", state.revision);
    }

    pub fn mark_loading(&self) {
        let mut state = self.inner.borrow_mut();
        state.current = None;
        state.revision += 1;
    }

    /// Installs a backend-supplied config. An incomplete or malformed one
    /// leaves the cell loading.
    pub fn install_raw(&self, raw: RawSceneConfig) -> Result<(), ConfigError> {
        match SceneConfig::try_from(raw) {
            Ok(config) => {
                self.replace(config);
                Ok(())
            }
            Err(err) => {
                log::warn!("scene config not ready: {}", err);
                self.mark_loading();
                Err(err)
            }
        }
    }

    pub fn updater(&self) -> Option<ConfigUpdater> {
        let (base, base_revision) = {
            let state = self.inner.borrow();
            (state.current.clone()?, state.revision)
        };
        let weak: Weak<RefCell<CellState>> = Rc::downgrade(&self.inner);
        let commit: CommitFn = Rc::new(move |draft: SceneConfig| {
            let Some(inner) = weak.upgrade() else {
                log::debug!("config write after session teardown ignored");
                return;
            };
            let mut state = inner.borrow_mut();
            if state.revision != base_revision {
                state.discarded_writes += 1;
                log::debug!(
                    "discarding stale config write (base revision {}, current {})",
                    base_revision,
                    state.revision
                );
                return;
            }
            state.current = Some(Rc::new(draft));
            state.revision += 1;
        });
        Some(create_updater(base, commit))
    }
}
