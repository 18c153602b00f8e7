//! Name deduplication, CSS identity, and output widget typing.
//!
//! Element names become CSS class names downstream, so they must be unique
//! per screen and free of whitespace. The output type (`qtype`) picks the
//! component the code generator instantiates for each node.

use crate::model::{Model, WidgetKind};
use crate::transform::node::Node;

/// Collapse every whitespace run into a single underscore
pub(crate) fn escape_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_whitespace = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}

/// Make screen names globally unique and widget names unique per screen.
/// The first occurrence keeps its name; later ones get their list position
/// as a suffix. Every rename is reported as a warning.
pub(crate) fn fix_names(model: &mut Model, warnings: &mut Vec<String>) {
    let screen_ids: Vec<String> = model.screens.keys().cloned().collect();

    let mut seen = std::collections::BTreeSet::new();
    for (j, screen_id) in screen_ids.iter().enumerate() {
        let Some(screen) = model.screens.get_mut(screen_id) else {
            continue;
        };
        if !seen.insert(screen.name.clone()) {
            warnings.push(format!("Fix double screen name:{}", screen.name));
            screen.name = format!("{}_{}", screen.name, j);
        }
    }

    for screen_id in &screen_ids {
        let Some(screen) = model.screens.get(screen_id) else {
            continue;
        };
        let screen_name = screen.name.clone();
        let children = screen.children.clone();

        let mut seen = std::collections::BTreeSet::new();
        for (i, widget_id) in children.iter().enumerate() {
            let Some(widget) = model.widgets.get_mut(widget_id) else {
                continue;
            };
            if !seen.insert(widget.name.clone()) {
                warnings.push(format!(
                    "Fix double widget name: {} in screen {}",
                    widget.name, screen_name
                ));
                widget.name = format!("{}_{}", widget.name, i);
            }
        }
    }
}

/// Assign the CSS class and selector of every node in a screen tree. The
/// screen root is scoped under the shared screen class; everything below is
/// scoped under the screen's own class.
pub(crate) fn assign_css_names(node: &mut Node, screen_name: &str, is_root: bool) {
    let name = escape_spaces(&node.name);
    node.css_selector = if is_root {
        format!(".qux-screen.{}", name)
    } else {
        format!(".{} .{}", escape_spaces(screen_name), name)
    };
    node.css_class = name;

    for child in &mut node.children {
        assign_css_names(child, screen_name, false);
    }
    for child in &mut node.fixed_children {
        assign_css_names(child, screen_name, false);
    }
}

/// Resolve the output component of every node in a screen tree
pub(crate) fn assign_widget_types(node: &mut Node, warnings: &mut Vec<String>) {
    node.qtype = Some(widget_type_of(node, warnings));
    for child in &mut node.children {
        assign_widget_types(child, warnings);
    }
    for child in &mut node.fixed_children {
        assign_widget_types(child, warnings);
    }
}

fn widget_type_of(node: &Node, warnings: &mut Vec<String>) -> String {
    if let Some(custom) = &node.props.custom_component {
        return custom.clone();
    }
    if node.has_children() {
        if node.kind == WidgetKind::Repeater {
            return "qRepeater".to_string();
        }
        return "qContainer".to_string();
    }
    if node.kind.is_supported() {
        return format!("q{}", node.kind.as_str());
    }
    warnings.push(format!("Not supported widget type: {}", node.kind.as_str()));
    "qBox".to_string()
}
