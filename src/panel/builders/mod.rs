mod background;
mod lights;
mod main_object;
mod material;
mod object_specific;

use crate::config::{ConfigUpdater, SceneConfig, Theme};
use crate::panel::binding::out_of_range;
use crate::panel::{
    Binding, ChangeHandler, Control, ControlKind, ControlValue, Folder, PanelTab, WidgetNode,
    WidgetTree,
};
use std::rc::Rc;

/// Builds the widget description for `config[theme]` on `tab`. Without an
/// updater the controls are display-only. A branch that fails the shape
/// check yields the loading tree.
pub fn describe(
    config: &SceneConfig,
    theme: Theme,
    tab: PanelTab,
    updater: Option<ConfigUpdater>,
) -> WidgetTree {
    let branch = match config.ready_theme(theme) {
        Ok(branch) => branch,
        Err(err) => {
            log::warn!("{} theme not ready for the panel: {}", theme.as_str(), err);
            return WidgetTree::loading(theme, tab);
        }
    };

    let ctx = BuildContext { theme, updater };
    let mut root = Vec::new();
    if tab.shows(PanelTab::Object) {
        root.push(main_object::build(&ctx, branch));
        if let Some(folder) = object_specific::build(&ctx, config.scene_type, branch) {
            root.push(folder);
        }
    }
    if tab.shows(PanelTab::Material) {
        root.push(material::build(&ctx, branch));
    }
    if tab.shows(PanelTab::Lights) {
        if let Some(folder) = lights::build(&ctx, branch) {
            root.push(folder);
        }
    }
    if tab.shows(PanelTab::Background) {
        root.push(background::build(&ctx, branch));
    }

    WidgetTree {
        theme,
        tab,
        loading: false,
        root,
    }
}

/// Shared state for the section builders: which branch edits go to and how
/// they are committed.
struct BuildContext {
    theme: Theme,
    updater: Option<ConfigUpdater>,
}

impl BuildContext {
    /// Edits outside the control's declared range are refused before they
    /// reach the config.
    fn handler(&self, binding: Binding, kind: &ControlKind) -> Option<ChangeHandler> {
        let updater = self.updater.clone()?;
        let theme = self.theme;
        let kind = kind.clone();
        Some(Rc::new(move |value: ControlValue| {
            let result = if kind.admits(&value) {
                updater.try_apply(|draft| binding.write(draft.theme_mut(theme), value))
            } else {
                Err(out_of_range(&binding.key(), format!("{:?}", value)))
            };
            if let Err(err) = result {
                log::warn!("panel edit ignored: {}", err);
            }
        }))
    }

    fn control(&self, binding: Binding, label: &str, kind: ControlKind) -> WidgetNode {
        let handler = self.handler(binding, &kind);
        WidgetNode::Control(Control::new(label, kind, binding, handler))
    }

    fn color(&self, binding: Binding, label: &str, value: &str) -> WidgetNode {
        self.control(
            binding,
            label,
            ControlKind::Color {
                value: value.to_string(),
            },
        )
    }

    fn number(
        &self,
        binding: Binding,
        label: &str,
        value: f32,
        (min, max, step): (f32, f32, f32),
    ) -> WidgetNode {
        self.control(
            binding,
            label,
            ControlKind::Number {
                value,
                min,
                max,
                step,
            },
        )
    }

    fn integer(&self, binding: Binding, label: &str, value: u32, (min, max): (i64, i64)) -> WidgetNode {
        self.control(
            binding,
            label,
            ControlKind::Integer {
                value: i64::from(value),
                min,
                max,
            },
        )
    }

    fn toggle(&self, binding: Binding, label: &str, value: bool) -> WidgetNode {
        self.control(binding, label, ControlKind::Toggle { value })
    }

    fn choice<'a>(
        &self,
        binding: Binding,
        label: &str,
        value: &str,
        options: impl IntoIterator<Item = &'a str>,
    ) -> WidgetNode {
        self.control(
            binding,
            label,
            ControlKind::Choice {
                value: value.to_string(),
                options: options.into_iter().map(str::to_string).collect(),
            },
        )
    }

    fn vector3(
        &self,
        binding: Binding,
        label: &str,
        value: [f32; 3],
        (min, max, step): (f32, f32, f32),
    ) -> WidgetNode {
        self.control(
            binding,
            label,
            ControlKind::Vector3 {
                value,
                min,
                max,
                step,
            },
        )
    }
}

fn folder(key: &str, label: &str, children: Vec<WidgetNode>) -> WidgetNode {
    WidgetNode::Folder(Folder {
        key: key.to_string(),
        label: label.to_string(),
        children,
    })
}

/// Common slider ranges.
const UNIT: (f32, f32, f32) = (0.0, 1.0, 0.01);
const INTENSITY: (f32, f32, f32) = (0.0, 10.0, 0.1);
const SPEED: (f32, f32, f32) = (0.0, 5.0, 0.05);
const POSITION: (f32, f32, f32) = (-50.0, 50.0, 0.1);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigCell, MaterialType, SceneType, TorusKnotParams};
    use crate::panel::LOADING_MESSAGE;

    fn config_with(material_type: MaterialType) -> SceneConfig {
        let mut config = SceneConfig::default();
        config.day.material.material_type = material_type;
        config
    }

    #[test]
    fn standard_material_has_no_clearcoat_but_physical_does() {
        let standard = describe(&config_with(MaterialType::Standard), Theme::Day, PanelTab::All, None);
        assert!(standard.control("material.roughness").is_some());
        assert!(standard.control("material.clearcoat").is_none());

        let physical = describe(&config_with(MaterialType::Physical), Theme::Day, PanelTab::All, None);
        assert!(physical.control("material.clearcoat").is_some());
        assert!(physical.control("material.transmission").is_some());
    }

    #[test]
    fn material_gating_per_kind() {
        let phong = describe(&config_with(MaterialType::Phong), Theme::Day, PanelTab::Material, None);
        assert!(phong.control("material.shininess").is_some());
        assert!(phong.control("material.roughness").is_none());

        let toon = describe(&config_with(MaterialType::Toon), Theme::Day, PanelTab::Material, None);
        assert!(toon.control("material.gradientMap").is_some());
        assert!(toon.control("material.shininess").is_none());

        let basic = describe(&config_with(MaterialType::Basic), Theme::Day, PanelTab::Material, None);
        assert!(basic.control("material.wireframe").is_some());
        assert!(basic.control("material.emissive").is_none());
    }

    #[test]
    fn tabs_select_sections() {
        let config = SceneConfig::default();
        let lights = describe(&config, Theme::Day, PanelTab::Lights, None);
        assert!(lights.folder("lights").is_some());
        assert!(lights.folder("material").is_none());
        assert!(lights.control("mainObjectColor").is_none());

        let all = describe(&config, Theme::Day, PanelTab::All, None);
        for key in ["mainObject", "material", "lights", "background", "sphere"] {
            assert!(all.folder(key).is_some(), "missing folder {}", key);
        }
    }

    #[test]
    fn invalid_branch_builds_loading_tree() {
        let mut config = SceneConfig::default();
        config.night.main_object_color = "nope".to_string();

        let night = describe(&config, Theme::Night, PanelTab::All, None);
        assert!(night.loading);
        assert_eq!(night.control_count(), 0);
        assert!(matches!(&night.root[0], WidgetNode::Message(m) if m == LOADING_MESSAGE));

        let day = describe(&config, Theme::Day, PanelTab::All, None);
        assert!(!day.loading);
    }

    #[test]
    fn object_section_follows_centerpiece_type() {
        let mut config = SceneConfig::default();
        config.scene_type = SceneType::TorusKnot;
        let tree = describe(&config, Theme::Day, PanelTab::Object, None);
        assert!(tree.folder("torusKnot").is_none());

        config.day.torus_knot = Some(TorusKnotParams::default());
        let tree = describe(&config, Theme::Day, PanelTab::Object, None);
        match &tree.control("torusKnot.p").unwrap().kind {
            ControlKind::Integer { min, max, .. } => assert_eq!((*min, *max), (1, 20)),
            other => panic!("expected integer control, got {:?}", other),
        }
        assert!(tree.control("torusKnot.tubularSegments").is_some());
        assert!(tree.control("sphere.radius").is_none());
    }

    #[test]
    fn handler_commits_into_the_bound_theme_only() {
        let cell = ConfigCell::with_config(SceneConfig::default());
        let snapshot = cell.snapshot().unwrap();
        let tree = describe(&snapshot, Theme::Night, PanelTab::All, cell.updater());

        let control = tree.control("mainObjectColor").unwrap();
        assert!(control.change(ControlValue::Color("#00ff00".to_string())));

        let committed = cell.snapshot().unwrap();
        assert_eq!(committed.night.main_object_color, "#00ff00");
        assert_eq!(committed.day, snapshot.day);
        assert_eq!(snapshot.night.main_object_color, "#c084fc");
    }

    #[test]
    fn rejected_edit_commits_nothing() {
        let cell = ConfigCell::with_config(SceneConfig::default());
        let snapshot = cell.snapshot().unwrap();
        let tree = describe(&snapshot, Theme::Day, PanelTab::All, cell.updater());
        let revision = cell.revision();

        tree.control("material.roughness")
            .unwrap()
            .change(ControlValue::Toggle(true));
        assert_eq!(cell.revision(), revision);
    }

    #[test]
    fn edits_outside_declared_range_commit_nothing() {
        let mut config = SceneConfig::default();
        config.scene_type = SceneType::TorusKnot;
        config.day.torus_knot = Some(TorusKnotParams::default());
        let cell = ConfigCell::with_config(config);
        let snapshot = cell.snapshot().unwrap();
        let tree = describe(&snapshot, Theme::Day, PanelTab::All, cell.updater());
        let revision = cell.revision();

        tree.control("torusKnot.tubularSegments")
            .unwrap()
            .change(ControlValue::Integer(0));
        tree.control("torusKnot.p")
            .unwrap()
            .change(ControlValue::Integer(4_294_967_297));
        tree.control("material.roughness")
            .unwrap()
            .change(ControlValue::Number(1.5));
        assert_eq!(cell.revision(), revision);
        assert_eq!(cell.snapshot().unwrap().day, snapshot.day);

        tree.control("torusKnot.tubularSegments")
            .unwrap()
            .change(ControlValue::Integer(200));
        let committed = cell.snapshot().unwrap();
        assert_eq!(
            committed.day.torus_knot.as_ref().unwrap().tubular_segments,
            200
        );
    }

    #[test]
    fn display_only_without_updater() {
        let tree = describe(&SceneConfig::default(), Theme::Day, PanelTab::All, None);
        let control = tree.control("mainObjectColor").unwrap();
        assert!(!control.is_interactive());
        assert!(!control.change(ControlValue::Color("#000000".to_string())));
    }
}
