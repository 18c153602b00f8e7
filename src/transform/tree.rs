//! Containment walk: absolute widget lists become a nested tree.
//!
//! Widgets are visited in render order. Each widget becomes the child of the
//! topmost earlier widget whose box fully contains it, or of the screen when
//! no such widget exists. Viewport-fixed widgets leave the flow entirely and
//! are collected on the screen root as `fixed_children`.

use std::collections::BTreeMap;

use crate::error::TransformError;
use crate::geom;
use crate::model::{Model, Screen, Widget};
use crate::transform::node::{Action, Node};
use crate::transform::IdGen;

/// Build the tree for one screen. Coordinates become parent-relative; fixed
/// elements stay screen-relative.
pub(crate) fn build_screen_tree(
    screen: &Screen,
    model: &Model,
    actions: &BTreeMap<String, Vec<Action>>,
    ids: &mut IdGen,
) -> Result<Node, TransformError> {
    let mut widgets: Vec<&Widget> = Vec::with_capacity(screen.children.len());
    for id in &screen.children {
        widgets.push(
            model
                .widgets
                .get(id)
                .ok_or_else(|| TransformError::unknown_widget(&screen.name, id))?,
        );
    }
    let ordered = geom::ordered_widgets(widgets);

    // Walk in render order; earlier widgets are parent candidates for later
    // ones, most recent candidate first.
    let mut candidates: Vec<&Widget> = Vec::new();
    let mut children_of: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut roots: Vec<String> = Vec::new();
    let mut fixed: Vec<&Widget> = Vec::new();
    let mut by_id: BTreeMap<&str, &Widget> = BTreeMap::new();

    for widget in ordered {
        by_id.insert(widget.id.as_str(), widget);
        if widget.style.fixed {
            fixed.push(widget);
            continue;
        }
        match candidates
            .iter()
            .find(|parent| geom::is_contained_in_box(widget, **parent))
        {
            Some(parent) => children_of
                .entry(parent.id.clone())
                .or_default()
                .push(widget.id.clone()),
            None => roots.push(widget.id.clone()),
        }
        candidates.insert(0, widget);
    }

    let mut root = Node::from_screen(screen, ids.next_clone());
    for id in &roots {
        root.children
            .push(build_node(id, screen.x, screen.y, &by_id, &children_of, model, actions, ids));
    }
    for widget in fixed {
        root.fixed_children
            .push(build_fixed(widget, screen, model, actions, ids));
    }
    Ok(root)
}

/// Clone one widget into a node with parent-relative coordinates and recurse
/// into the children the containment walk assigned to it.
fn build_node(
    widget_id: &str,
    parent_x: i32,
    parent_y: i32,
    by_id: &BTreeMap<&str, &Widget>,
    children_of: &BTreeMap<String, Vec<String>>,
    model: &Model,
    actions: &BTreeMap<String, Vec<Action>>,
    ids: &mut IdGen,
) -> Node {
    // Ids in by_id come from the resolved widget list, so the lookup holds.
    let widget = by_id[widget_id];
    let mut node = Node::from_widget(widget, ids.next_clone());
    node.x -= parent_x;
    node.y -= parent_y;
    node.group = model.get_group(widget_id).map(|g| g.id.clone());
    if let Some(widget_actions) = actions.get(widget_id) {
        node.actions = widget_actions.clone();
    }
    if let Some(child_ids) = children_of.get(widget_id) {
        for child_id in child_ids {
            node.children.push(build_node(
                child_id, widget.x, widget.y, by_id, children_of, model, actions, ids,
            ));
        }
    }
    node
}

/// Clone a viewport-fixed widget. Elements resting on the screen bottom are
/// treated as bottom bars and get a bottom offset for responsive scaling.
fn build_fixed(
    widget: &Widget,
    screen: &Screen,
    model: &Model,
    actions: &BTreeMap<String, Vec<Action>>,
    ids: &mut IdGen,
) -> Node {
    let mut node = Node::from_widget(widget, ids.next_clone());
    node.x -= screen.x;
    node.y -= screen.y;
    node.group = model.get_group(&widget.id).map(|g| g.id.clone());
    if let Some(widget_actions) = actions.get(&widget.id) {
        node.actions = widget_actions.clone();
    }
    if geom::is_at_bottom(&node, screen.h) {
        node.props.resize_mut().down = true;
    }
    if node.props.is_pinned_down() {
        node.bottom = Some(geom::distance_from_screen_bottom(&node, screen.h));
    }
    node
}
