//! Single-label merging.
//!
//! A box holding exactly one label usually is a labeled box, not a nested
//! layout. The label collapses into its parent: the text properties move up,
//! the label's offsets become padding, and the parent turns into a plain
//! labeled box.

use crate::model::WidgetKind;
use crate::transform::node::{Node, TransformResult};

/// Style keys that travel with the label text when it merges into its parent
const TEXT_PROPERTIES: [&str; 9] = [
    "color",
    "textDecoration",
    "textAlign",
    "fontFamily",
    "fontSize",
    "fontStyle",
    "fontWeight",
    "letterSpacing",
    "lineHeight",
];

/// Merge lone label children into their parents across all screens
pub(crate) fn attach_single_labels(result: &mut TransformResult) {
    for screen in &mut result.screens {
        for child in &mut screen.children {
            attach_in_node(child);
        }
    }
}

fn attach_in_node(node: &mut Node) {
    if node.props.label.is_none()
        && node.children.len() == 1
        && node.children[0].kind == WidgetKind::Label
    {
        let child = node.children.remove(0);
        node.props.label = child.props.label.clone();
        node.kind = WidgetKind::Box;
        node.qtype = Some("qBox".to_string());
        for key in TEXT_PROPERTIES {
            if let Some(value) = child.style.other.get(key) {
                node.style.other.insert(key.to_string(), value.clone());
            }
        }
        node.style.padding_top = Some(child.y);
        node.style.padding_left = Some(child.x);
        node.style.padding_bottom = Some(node.h - child.h);
    } else {
        for child in &mut node.children {
            attach_in_node(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Screen, Widget};
    use serde_json::json;

    fn node(id: &str, kind: WidgetKind, x: i32, y: i32, w: i32, h: i32) -> Node {
        let widget = Widget::new(id, kind, id.to_uppercase(), x, y, w, h);
        Node::from_widget(&widget, 0)
    }

    fn result_with(children: Vec<Node>) -> TransformResult {
        let mut screen = Node::from_screen(&Screen::new("s1", "Home", 400, 600), 0);
        screen.children = children;
        TransformResult {
            id: "m1".into(),
            name: "App".into(),
            templates: Vec::new(),
            warnings: Vec::new(),
            screens: vec![screen],
        }
    }

    #[test]
    fn test_lone_label_merges_into_box() {
        let mut label = node("lbl", WidgetKind::Label, 10, 5, 80, 20);
        label.props.label = Some("Hello".into());
        label
            .style
            .other
            .insert("color".into(), json!("#333333"));
        let mut parent = node("box", WidgetKind::Box, 0, 0, 100, 40);
        parent.qtype = Some("qContainer".to_string());
        parent.children.push(label);

        let mut result = result_with(vec![parent]);
        attach_single_labels(&mut result);

        let merged = &result.screens[0].children[0];
        assert!(merged.children.is_empty());
        assert_eq!(merged.kind, WidgetKind::Box);
        assert_eq!(merged.qtype.as_deref(), Some("qBox"));
        assert_eq!(merged.props.label.as_deref(), Some("Hello"));
        assert_eq!(merged.style.other["color"], json!("#333333"));
        assert_eq!(merged.style.padding_top, Some(5));
        assert_eq!(merged.style.padding_left, Some(10));
        assert_eq!(merged.style.padding_bottom, Some(20));
    }

    #[test]
    fn test_parent_with_own_label_keeps_child() {
        let label = node("lbl", WidgetKind::Label, 10, 5, 80, 20);
        let mut parent = node("box", WidgetKind::Box, 0, 0, 100, 40);
        parent.props.label = Some("Existing".into());
        parent.children.push(label);

        let mut result = result_with(vec![parent]);
        attach_single_labels(&mut result);

        let parent = &result.screens[0].children[0];
        assert_eq!(parent.children.len(), 1);
        assert_eq!(parent.props.label.as_deref(), Some("Existing"));
    }

    #[test]
    fn test_two_children_block_the_merge() {
        let mut parent = node("box", WidgetKind::Box, 0, 0, 100, 40);
        parent.children.push(node("lbl", WidgetKind::Label, 0, 0, 40, 20));
        parent.children.push(node("ico", WidgetKind::Icon, 50, 0, 20, 20));

        let mut result = result_with(vec![parent]);
        attach_single_labels(&mut result);
        assert_eq!(result.screens[0].children[0].children.len(), 2);
    }

    #[test]
    fn test_merge_reaches_nested_containers() {
        let mut label = node("lbl", WidgetKind::Label, 2, 2, 40, 16);
        label.props.label = Some("Deep".into());
        let mut inner = node("inner", WidgetKind::Box, 10, 10, 50, 20);
        inner.children.push(label);
        let mut outer = node("outer", WidgetKind::Box, 0, 0, 100, 40);
        outer.children.push(inner);
        outer.children.push(node("ico", WidgetKind::Icon, 70, 10, 20, 20));

        let mut result = result_with(vec![outer]);
        attach_single_labels(&mut result);

        let inner = &result.screens[0].children[0].children[0];
        assert!(inner.children.is_empty());
        assert_eq!(inner.props.label.as_deref(), Some("Deep"));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut label = node("lbl", WidgetKind::Label, 10, 5, 80, 20);
        label.props.label = Some("Hello".into());
        let mut parent = node("box", WidgetKind::Box, 0, 0, 100, 40);
        parent.children.push(label);

        let mut result = result_with(vec![parent]);
        attach_single_labels(&mut result);
        let once = result.clone();
        attach_single_labels(&mut result);
        assert_eq!(once, result);
    }

    #[test]
    fn test_single_non_label_child_still_recurses() {
        let mut label = node("lbl", WidgetKind::Label, 2, 2, 40, 16);
        label.props.label = Some("Inner".into());
        let mut box_node = node("box", WidgetKind::Box, 5, 5, 60, 24);
        box_node.children.push(label);
        let mut outer = node("outer", WidgetKind::Icon, 0, 0, 100, 40);
        outer.children.push(box_node);

        let mut result = result_with(vec![outer]);
        attach_single_labels(&mut result);

        // the outer element keeps its single non-label child, but the merge
        // still happens one level further down
        let outer = &result.screens[0].children[0];
        assert_eq!(outer.children.len(), 1);
        assert_eq!(outer.children[0].props.label.as_deref(), Some("Inner"));
        assert!(outer.children[0].children.is_empty());
    }
}
