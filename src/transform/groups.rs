//! Synthesizes container widgets for design-tool groups.
//!
//! Groups exist independently of geometric containment, so before the tree
//! builder runs, each group becomes a real widget whose bounding box is the
//! union of all transitive members. Parent groups are created before their
//! subgroups, and z-indexes are reassigned so every container renders just
//! before its first member. The containment walk then nests the members
//! inside it naturally.

use std::collections::BTreeMap;

use log::debug;

use crate::error::TransformError;
use crate::geom;
use crate::model::{Model, Props, Resize, Widget, WidgetKind};

/// Ensure every group referenced from `screen_id` has a synthetic container
/// widget registered in the model and the screen's child list.
pub(crate) fn add_group_wrappers(model: &mut Model, screen_id: &str) -> Result<(), TransformError> {
    let Some(screen) = model.screens.get(screen_id) else {
        return Ok(());
    };
    let screen_name = screen.name.clone();

    // Render-order snapshot of the screen's widgets before any insertion
    let mut widgets = Vec::with_capacity(screen.children.len());
    for id in &screen.children {
        widgets.push(
            model
                .widgets
                .get(id)
                .ok_or_else(|| TransformError::unknown_widget(&screen_name, id))?,
        );
    }
    let ordered: Vec<String> = geom::ordered_widgets(widgets)
        .into_iter()
        .map(|w| w.id.clone())
        .collect();

    // At most one container per group id per screen
    let mut created: BTreeMap<String, String> = BTreeMap::new();
    let mut order: Vec<String> = Vec::with_capacity(ordered.len());

    for widget_id in &ordered {
        if let Some(group_id) = model.get_group(widget_id).map(|g| g.id.clone()) {
            create_group_container(&group_id, model, &mut created, &mut order, screen_id)?;
        }
        order.push(widget_id.clone());
    }

    // Reassign z so group containers precede their first member
    for (i, widget_id) in order.iter().enumerate() {
        if let Some(widget) = model.widgets.get_mut(widget_id) {
            widget.z = i as i32;
        }
    }
    Ok(())
}

/// Create the container for one group, creating any uncreated parent group
/// first so ancestors always precede descendants in the order list.
fn create_group_container(
    group_id: &str,
    model: &mut Model,
    created: &mut BTreeMap<String, String>,
    order: &mut Vec<String>,
    screen_id: &str,
) -> Result<(), TransformError> {
    if created.contains_key(group_id) {
        return Ok(());
    }

    if let Some(parent_id) = model.get_parent_group(group_id).map(|g| g.id.clone()) {
        create_group_container(&parent_id, model, created, order, screen_id)?;
    }

    let Some(group) = model.groups.get(group_id).cloned() else {
        return Ok(());
    };
    debug!("create group container for '{}'", group.name);

    let members = model.all_group_children(&group);
    let member_widgets: Vec<&Widget> = members
        .iter()
        .filter_map(|id| model.widgets.get(id))
        .collect();
    let bounds = geom::bounding_box(member_widgets.into_iter())
        .ok_or_else(|| TransformError::empty_group(group_id))?;

    let mut container = Widget::new(
        format!("gc{}", group.id),
        WidgetKind::Box,
        group.name.clone(),
        bounds.x,
        bounds.y,
        bounds.w,
        bounds.h,
    );
    container.is_group = true;
    container.style = group.style.clone().unwrap_or_default();
    container.props = Props {
        resize: Some(
            group
                .props
                .as_ref()
                .and_then(|p| p.resize)
                .unwrap_or_else(Resize::default),
        ),
        ..Props::default()
    };

    let container_id = container.id.clone();
    model.widgets.insert(container_id.clone(), container);
    if let Some(screen) = model.screens.get_mut(screen_id) {
        screen.children.push(container_id.clone());
    }
    created.insert(group_id.to_string(), container_id.clone());

    // The container goes into the order list now; the member that triggered
    // the creation follows right after, which yields the right z-order.
    order.push(container_id);
    Ok(())
}
