//! Property panel: a pure description of the controls for one theme branch,
//! rebuilt wholesale whenever the config, theme or tab changes, and mounted
//! into a retained widget toolkit.

pub mod binding;
pub mod builders;
pub mod egui_panel;
pub mod engine;

pub use binding::{Binding, BindingError};
pub use builders::describe;
pub use egui_panel::EguiPanel;
pub use engine::{PanelEngine, RebuildKey, WidgetToolkit};

use crate::config::Theme;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelTab {
    #[default]
    All,
    Material,
    Lights,
    Background,
    Object,
}

impl PanelTab {
    pub const ALL: [PanelTab; 5] = [
        PanelTab::All,
        PanelTab::Material,
        PanelTab::Lights,
        PanelTab::Background,
        PanelTab::Object,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PanelTab::All => "All",
            PanelTab::Material => "Material",
            PanelTab::Lights => "Lights",
            PanelTab::Background => "Background",
            PanelTab::Object => "Object",
        }
    }

    pub fn shows(self, section: PanelTab) -> bool {
        self == PanelTab::All || self == section
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Color { value: String },
    Number { value: f32, min: f32, max: f32, step: f32 },
    Integer { value: i64, min: i64, max: i64 },
    Toggle { value: bool },
    Choice { value: String, options: Vec<String> },
    Vector3 { value: [f32; 3], min: f32, max: f32, step: f32 },
}

impl ControlKind {
    /// Whether `value` lies inside the range this control declares. Kinds
    /// without a range admit anything; type mismatches are left to the
    /// binding.
    pub fn admits(&self, value: &ControlValue) -> bool {
        let within = |v: f32, min: f32, max: f32| v.is_finite() && (min..=max).contains(&v);
        match (self, value) {
            (ControlKind::Number { min, max, .. }, ControlValue::Number(v)) => {
                within(*v, *min, *max)
            }
            (ControlKind::Number { min, max, .. }, ControlValue::Integer(v)) => {
                within(*v as f32, *min, *max)
            }
            (ControlKind::Integer { min, max, .. }, ControlValue::Integer(v)) => {
                (*min..=*max).contains(v)
            }
            (ControlKind::Integer { min, max, .. }, ControlValue::Number(v)) => {
                within(v.round(), *min as f32, *max as f32)
            }
            (ControlKind::Vector3 { min, max, .. }, ControlValue::Vector3(v)) => {
                v.iter().all(|c| within(*c, *min, *max))
            }
            _ => true,
        }
    }
}

/// A value reported by the toolkit when the user edits a control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlValue {
    Color(String),
    Number(f32),
    Integer(i64),
    Toggle(bool),
    Choice(String),
    Vector3([f32; 3]),
}

pub type ChangeHandler = Rc<dyn Fn(ControlValue)>;

#[derive(Clone)]
pub struct Control {
    pub key: String,
    pub label: String,
    pub kind: ControlKind,
    pub binding: Binding,
    handler: Option<ChangeHandler>,
}

impl Control {
    pub fn new(
        label: impl Into<String>,
        kind: ControlKind,
        binding: Binding,
        handler: Option<ChangeHandler>,
    ) -> Self {
        Self {
            key: binding.key(),
            label: label.into(),
            kind,
            binding,
            handler,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.handler.is_some()
    }

    /// Forwards an edit to the handler created when the tree was built.
    pub fn change(&self, value: ControlValue) -> bool {
        match &self.handler {
            Some(handler) => {
                handler(value);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Control")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("interactive", &self.is_interactive())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Folder {
    pub key: String,
    pub label: String,
    pub children: Vec<WidgetNode>,
}

#[derive(Debug, Clone)]
pub enum WidgetNode {
    Folder(Folder),
    Control(Control),
    Message(String),
}

pub const LOADING_MESSAGE: &str = "Loading scene configuration...";

#[derive(Debug, Clone)]
pub struct WidgetTree {
    pub theme: Theme,
    pub tab: PanelTab,
    pub loading: bool,
    pub root: Vec<WidgetNode>,
}

impl WidgetTree {
    pub fn loading(theme: Theme, tab: PanelTab) -> Self {
        Self {
            theme,
            tab,
            loading: true,
            root: vec![WidgetNode::Message(LOADING_MESSAGE.to_string())],
        }
    }

    pub fn controls(&self) -> Vec<&Control> {
        let mut out = Vec::new();
        collect_controls(&self.root, &mut out);
        out
    }

    pub fn control(&self, key: &str) -> Option<&Control> {
        self.controls().into_iter().find(|control| control.key == key)
    }

    pub fn folder(&self, key: &str) -> Option<&Folder> {
        find_folder(&self.root, key)
    }

    pub fn control_count(&self) -> usize {
        self.controls().len()
    }
}

fn collect_controls<'a>(nodes: &'a [WidgetNode], out: &mut Vec<&'a Control>) {
    for node in nodes {
        match node {
            WidgetNode::Folder(folder) => collect_controls(&folder.children, out),
            WidgetNode::Control(control) => out.push(control),
            WidgetNode::Message(_) => {}
        }
    }
}

fn find_folder<'a>(nodes: &'a [WidgetNode], key: &str) -> Option<&'a Folder> {
    nodes.iter().find_map(|node| match node {
        WidgetNode::Folder(folder) if folder.key == key => Some(folder),
        WidgetNode::Folder(folder) => find_folder(&folder.children, key),
        _ => None,
    })
}
