//! egui mount adapter for the panel description.
//!
//! egui redraws every frame, but the panel still treats it as a retained
//! toolkit: the mounted tree is only replaced through `mount`/`unmount`,
//! and edits are collected during `show` and forwarded afterwards so no
//! commit happens while the tree is being drawn.

use crate::config::color::{parse_hex_color, to_hex_color};
use crate::panel::engine::WidgetToolkit;
use crate::panel::{Control, ControlKind, ControlValue, WidgetNode, WidgetTree};

#[derive(Default)]
pub struct EguiPanel {
    tree: Option<WidgetTree>,
    mounts: u64,
    unmounts: u64,
}

impl EguiPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> Option<&WidgetTree> {
        self.tree.as_ref()
    }

    pub fn mount_count(&self) -> u64 {
        self.mounts
    }

    pub fn unmount_count(&self) -> u64 {
        self.unmounts
    }

    /// Draws the mounted tree and returns the edits made this frame, keyed
    /// by control key.
    pub fn show(&self, ui: &mut egui::Ui) -> Vec<(String, ControlValue)> {
        let mut edits = Vec::new();
        match &self.tree {
            Some(tree) => show_nodes(ui, &tree.root, &mut edits),
            None => {
                ui.label("No panel mounted");
            }
        }
        edits
    }

    /// Forwards collected edits to the handlers of the mounted tree. Returns
    /// how many reached a handler.
    pub fn dispatch(&self, edits: Vec<(String, ControlValue)>) -> usize {
        let Some(tree) = &self.tree else {
            return 0;
        };
        let mut delivered = 0;
        for (key, value) in edits {
            match tree.control(&key) {
                Some(control) if control.change(value) => delivered += 1,
                Some(_) => log::debug!("{} is display-only", key),
                None => log::debug!("edit for unknown control {} dropped", key),
            }
        }
        delivered
    }
}

impl WidgetToolkit for EguiPanel {
    fn mount(&mut self, tree: WidgetTree) {
        self.tree = Some(tree);
        self.mounts += 1;
    }

    fn unmount(&mut self) {
        self.tree = None;
        self.unmounts += 1;
    }
}

fn show_nodes(ui: &mut egui::Ui, nodes: &[WidgetNode], edits: &mut Vec<(String, ControlValue)>) {
    for node in nodes {
        match node {
            WidgetNode::Folder(folder) => {
                egui::CollapsingHeader::new(folder.label.as_str())
                    .id_salt(folder.key.as_str())
                    .default_open(true)
                    .show(ui, |ui| show_nodes(ui, &folder.children, edits));
            }
            WidgetNode::Control(control) => {
                if let Some(value) = show_control(ui, control) {
                    edits.push((control.key.clone(), value));
                }
            }
            WidgetNode::Message(message) => {
                ui.label(message.as_str());
            }
        }
    }
}

fn show_control(ui: &mut egui::Ui, control: &Control) -> Option<ControlValue> {
    let label = control.label.as_str();
    ui.add_enabled_ui(control.is_interactive(), |ui| match &control.kind {
        ControlKind::Color { value } => ui
            .horizontal(|ui| {
                let mut rgb = parse_hex_color(value).unwrap_or([1.0, 1.0, 1.0]);
                let changed = ui.color_edit_button_rgb(&mut rgb).changed();
                ui.label(label);
                changed.then(|| ControlValue::Color(to_hex_color(rgb)))
            })
            .inner,
        ControlKind::Number {
            value,
            min,
            max,
            step,
        } => {
            let mut number = *value;
            let response = ui.add(
                egui::Slider::new(&mut number, *min..=*max)
                    .step_by(f64::from(*step))
                    .text(label),
            );
            response.changed().then_some(ControlValue::Number(number))
        }
        ControlKind::Integer { value, min, max } => {
            let mut integer = *value;
            let response = ui.add(egui::Slider::new(&mut integer, *min..=*max).text(label));
            response.changed().then_some(ControlValue::Integer(integer))
        }
        ControlKind::Toggle { value } => {
            let mut flag = *value;
            ui.checkbox(&mut flag, label)
                .changed()
                .then_some(ControlValue::Toggle(flag))
        }
        ControlKind::Choice { value, options } => {
            let mut selected = value.clone();
            egui::ComboBox::from_id_salt(control.key.as_str())
                .selected_text(selected.as_str())
                .show_ui(ui, |ui| {
                    for option in options {
                        ui.selectable_value(&mut selected, option.clone(), option.as_str());
                    }
                });
            ui.label(label);
            (selected != *value).then_some(ControlValue::Choice(selected))
        }
        ControlKind::Vector3 {
            value,
            min,
            max,
            step,
        } => ui
            .horizontal(|ui| {
                let mut vector = *value;
                let mut changed = false;
                for component in vector.iter_mut() {
                    changed |= ui
                        .add(
                            egui::DragValue::new(component)
                                .speed(f64::from(*step))
                                .range(*min..=*max),
                        )
                        .changed();
                }
                ui.label(label);
                changed.then_some(ControlValue::Vector3(vector))
            })
            .inner,
    })
    .inner
}
