use super::{folder, BuildContext};
use crate::config::SceneThemeConfig;
use crate::panel::{Binding, WidgetNode};

pub(super) fn build(ctx: &BuildContext, branch: &SceneThemeConfig) -> WidgetNode {
    folder(
        "mainObject",
        "Main Object",
        vec![ctx.color(Binding::MainObjectColor, "Color", &branch.main_object_color)],
    )
}
