//! Sibling ordering, flow gaps, and responsive pin propagation.
//!
//! Each container's children are sorted into their flow order and annotated
//! with the gap to the previous sibling. Row members additionally exchange
//! responsive pins with their container so resizing behaves like the
//! absolute design did.

use log::debug;

use crate::geom::{self, HasBounds};
use crate::transform::node::{ContainerKind, Node, WrapOffsets};

/// Order the children of `node` and compute their flow offsets, recursively.
/// With `relative` set, positions are rewritten to sibling gaps; otherwise
/// the gaps land in `left`/`top` and positions stay container-relative.
pub(crate) fn resolve_offsets(node: &mut Node, relative: bool) {
    match node.container {
        ContainerKind::Wrap => resolve_wrapped(node),
        ContainerKind::Row => resolve_row(node, relative),
        ContainerKind::Column => resolve_column(node, relative),
    }

    for child in &mut node.children {
        if child.has_children() {
            resolve_offsets(child, relative);
        }
    }
}

/// Wrapped container: children sort in reading order and carry inferred wrap
/// spacing instead of per-sibling gaps.
fn resolve_wrapped(node: &mut Node) {
    node.children.sort_by(|a, b| {
        if geom::is_overlapping_y(a, b) {
            a.x.cmp(&b.x)
        } else {
            a.y.cmp(&b.y)
        }
    });

    if node.is_group {
        // A group container hugs its members, so the first child offset is 0.
        // Guess the spacing from the gap between the first two columns and
        // the first two rows instead.
        let mut right = 10;
        let mut bottom = 10;
        {
            let rows = geom::partition_rows(&node.children);
            if rows.len() > 1 && rows[0].len() > 1 {
                let first = rows[0][0].bounds();
                right = rows[0][1].bounds().x - first.right();
                bottom = rows[1][0].bounds().y - first.bottom();
            } else {
                debug!("cannot guess wrap offsets for '{}'", node.name);
            }
        }
        node.style.padding_top = Some(0);
        node.style.padding_bottom = Some(0);
        node.style.padding_left = Some(0);
        node.style.padding_right = Some(0);
        for child in &mut node.children {
            child.wrap_offsets = Some(WrapOffsets {
                x: 0,
                y: 0,
                right,
                bottom,
            });
        }
    } else if let Some(first) = node.children.first() {
        // Half the first child's offset becomes container padding, the rest
        // margin on the children.
        let x = (f64::from(first.x) / 2.0).round() as i32;
        let y = (f64::from(first.y) / 2.0).round() as i32;
        node.style.padding_top = Some(y);
        node.style.padding_bottom = Some(y);
        node.style.padding_left = Some(x);
        node.style.padding_right = Some(x);
        for child in &mut node.children {
            child.wrap_offsets = Some(WrapOffsets {
                x,
                y,
                right: 0,
                bottom: 0,
            });
        }
    }
}

/// Row container: children render left to right with gaps to the previous
/// sibling's trailing edge.
fn resolve_row(node: &mut Node, relative: bool) {
    node.children.sort_by_key(|c| c.x);

    let mut last = 0;
    for child in &mut node.children {
        let gap = child.x - last;
        last = child.x + child.w;
        child.abs_x = Some(child.x);
        if relative {
            child.x = gap;
        } else {
            child.left = Some(gap);
        }
    }

    if node.props.resize.is_some() {
        merge_responsive(node);
    }
}

/// Push the first child's left pin and the last child's right pin up to the
/// container, and stop members behind a right-pinned sibling from growing.
fn merge_responsive(node: &mut Node) {
    let first_pinned_left = node
        .children
        .first()
        .is_some_and(|c| c.props.is_pinned_left());
    let last_pinned_right = node
        .children
        .last()
        .is_some_and(|c| c.props.is_pinned_right());
    let resize = node.props.resize_mut();
    resize.left = first_pinned_left;
    resize.right = last_pinned_right;

    let mut previous_pinned_right = false;
    for child in &mut node.children {
        child.can_grow = Some(true);
        if previous_pinned_right {
            child.props.resize_mut().left = true;
            child.can_grow = Some(false);
        }
        previous_pinned_right = child.props.is_pinned_right();
    }
}

fn resolve_column(node: &mut Node, relative: bool) {
    node.children.sort_by_key(|c| c.y);

    let mut last = 0;
    for child in &mut node.children {
        let gap = child.y - last;
        last = child.y + child.h;
        if relative {
            child.y = gap;
        } else {
            child.top = Some(gap);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Screen, Widget, WidgetKind};
    use crate::transform::node::Node;

    fn node(id: &str, x: i32, y: i32, w: i32, h: i32) -> Node {
        let widget = Widget::new(id, WidgetKind::Button, id.to_uppercase(), x, y, w, h);
        Node::from_widget(&widget, 0)
    }

    fn screen_with(children: Vec<Node>) -> Node {
        let mut root = Node::from_screen(&Screen::new("s1", "Home", 400, 600), 0);
        root.children = children;
        root
    }

    #[test]
    fn test_column_gaps() {
        let mut root = screen_with(vec![node("b", 0, 100, 50, 30), node("a", 0, 20, 50, 30)]);
        resolve_offsets(&mut root, false);
        assert_eq!(root.children[0].id, "a");
        assert_eq!(root.children[0].top, Some(20));
        assert_eq!(root.children[1].top, Some(50));
        // absolute positions untouched
        assert_eq!(root.children[1].y, 100);
    }

    #[test]
    fn test_column_relative_rewrites_y() {
        let mut root = screen_with(vec![node("a", 0, 20, 50, 30), node("b", 0, 100, 50, 30)]);
        resolve_offsets(&mut root, true);
        assert_eq!(root.children[0].y, 20);
        assert_eq!(root.children[1].y, 50);
        assert_eq!(root.children[1].top, None);
    }

    #[test]
    fn test_row_gaps_and_abs_x() {
        let mut row = node("r0", 0, 0, 200, 30);
        row.container = ContainerKind::Row;
        row.children = vec![node("b", 120, 0, 60, 30), node("a", 10, 0, 60, 30)];
        let mut root = screen_with(vec![row]);
        resolve_offsets(&mut root, false);

        let row = &root.children[0];
        assert_eq!(row.children[0].id, "a");
        assert_eq!(row.children[0].left, Some(10));
        assert_eq!(row.children[0].abs_x, Some(10));
        assert_eq!(row.children[1].left, Some(50));
        assert_eq!(row.children[1].abs_x, Some(120));
    }

    #[test]
    fn test_row_pin_propagation() {
        let mut row = node("r0", 0, 0, 300, 30);
        row.container = ContainerKind::Row;
        row.props.resize_mut();
        let mut a = node("a", 0, 0, 60, 30);
        a.props.resize_mut().left = true;
        let mut b = node("b", 100, 0, 60, 30);
        b.props.resize_mut().right = true;
        let c = node("c", 200, 0, 60, 30);
        row.children = vec![a, b, c];
        let mut root = screen_with(vec![row]);
        resolve_offsets(&mut root, false);

        let row = &root.children[0];
        assert!(row.props.is_pinned_left());
        // last child is not right-pinned
        assert!(!row.props.is_pinned_right());
        assert_eq!(row.children[0].can_grow, Some(true));
        assert_eq!(row.children[1].can_grow, Some(true));
        // c sits behind a right-pinned sibling
        assert_eq!(row.children[2].can_grow, Some(false));
        assert!(row.children[2].props.is_pinned_left());
    }

    #[test]
    fn test_wrapped_padding_from_first_child() {
        let mut wrap = node("box", 0, 0, 300, 200);
        wrap.container = ContainerKind::Wrap;
        wrap.children = vec![node("a", 20, 10, 50, 30), node("b", 80, 10, 50, 30)];
        let mut root = screen_with(vec![wrap]);
        resolve_offsets(&mut root, false);

        let wrap = &root.children[0];
        assert_eq!(wrap.style.padding_left, Some(10));
        assert_eq!(wrap.style.padding_top, Some(5));
        let offsets = wrap.children[0].wrap_offsets.expect("offsets set");
        assert_eq!((offsets.x, offsets.y), (10, 5));
        assert_eq!((offsets.right, offsets.bottom), (0, 0));
    }

    #[test]
    fn test_wrapped_group_guesses_gaps() {
        let mut wrap = node("gc1", 0, 0, 300, 200);
        wrap.container = ContainerKind::Wrap;
        wrap.is_group = true;
        wrap.children = vec![
            node("a", 0, 0, 50, 30),
            node("b", 65, 0, 50, 30),
            node("c", 0, 45, 50, 30),
        ];
        let mut root = screen_with(vec![wrap]);
        resolve_offsets(&mut root, false);

        let wrap = &root.children[0];
        assert_eq!(wrap.style.padding_left, Some(0));
        let offsets = wrap.children[0].wrap_offsets.expect("offsets set");
        assert_eq!(offsets.right, 15);
        assert_eq!(offsets.bottom, 15);
        assert_eq!((offsets.x, offsets.y), (0, 0));
    }

    #[test]
    fn test_wrapped_reading_order() {
        let mut wrap = node("box", 0, 0, 300, 200);
        wrap.container = ContainerKind::Wrap;
        wrap.children = vec![
            node("c", 0, 50, 40, 30),
            node("b", 60, 0, 40, 30),
            node("a", 0, 5, 40, 30),
        ];
        let mut root = screen_with(vec![wrap]);
        resolve_offsets(&mut root, false);

        let ids: Vec<&str> = root.children[0]
            .children
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
