//! Teardown-and-rebuild driver for the retained property panel.

use crate::config::{ConfigCell, Theme};
use crate::panel::{describe, PanelTab, WidgetTree};

/// Everything a mounted tree depends on. Any change means a full rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RebuildKey {
    pub config_revision: u64,
    pub theme: Theme,
    pub tab: PanelTab,
}

/// A retained widget toolkit that can only be handed a whole tree.
pub trait WidgetToolkit {
    fn mount(&mut self, tree: WidgetTree);
    fn unmount(&mut self);
}

pub struct PanelEngine<T: WidgetToolkit> {
    toolkit: T,
    key: Option<RebuildKey>,
    rebuilds: u64,
}

impl<T: WidgetToolkit> PanelEngine<T> {
    pub fn new(toolkit: T) -> Self {
        Self {
            toolkit,
            key: None,
            rebuilds: 0,
        }
    }

    /// Rebuilds the mounted tree if the config revision, theme or tab moved
    /// since the last mount. Returns whether a rebuild happened.
    ///
    /// Takes `&mut self`, so a change handler firing during a rebuild cannot
    /// start another one; its commit only bumps the revision and is picked up
    /// by the next `sync`.
    pub fn sync(&mut self, cell: &ConfigCell, theme: Theme, tab: PanelTab) -> bool {
        let key = RebuildKey {
            config_revision: cell.revision(),
            theme,
            tab,
        };
        if self.key == Some(key) {
            return false;
        }

        if self.key.take().is_some() {
            self.toolkit.unmount();
        }

        let tree = match cell.snapshot() {
            Some(config) => describe(&config, theme, tab, cell.updater()),
            None => WidgetTree::loading(theme, tab),
        };
        log::debug!(
            "panel rebuilt for {} theme, {} tab (revision {}, {} controls)",
            theme.as_str(),
            tab.label(),
            key.config_revision,
            tree.control_count()
        );
        self.toolkit.mount(tree);
        self.key = Some(key);
        self.rebuilds += 1;
        true
    }

    /// Unmounts the current tree; the next `sync` rebuilds from scratch.
    pub fn teardown(&mut self) {
        if self.key.take().is_some() {
            self.toolkit.unmount();
        }
    }

    pub fn key(&self) -> Option<RebuildKey> {
        self.key
    }

    pub fn is_mounted(&self) -> bool {
        self.key.is_some()
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }
}
