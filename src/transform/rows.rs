//! Row clustering and row container synthesis.
//!
//! Children of a container are clustered into visual rows by pairwise
//! Y-overlap, then each cluster is replaced by a synthesized row container
//! so that the tree flows as a column of rows. Wrapped and grid containers
//! keep their flat child lists.

use crate::geom::{self, HasBounds};
use crate::model::{Resize, Widget, WidgetKind};
use crate::transform::config::TransformConfig;
use crate::transform::node::{ContainerKind, Node};
use crate::transform::IdGen;

/// Cluster the children of `node` into rows. Two children share a row when
/// their Y-intervals overlap; overlap chains merge transitively. A child
/// overlapping nothing still gets its own row, except when the container has
/// a single child, which stays flat so it can later merge with its parent.
pub(crate) fn assign_rows(node: &mut Node) {
    if !node.has_children() {
        return;
    }
    node.children.sort_by_key(|c| c.y);

    let bounds: Vec<geom::Bounds> = node.children.iter().map(|c| c.bounds()).collect();
    let mut next_row: u32 = 1;
    for i in 0..node.children.len() {
        for j in (i + 1)..node.children.len() {
            if geom::is_overlapping_y(&bounds[i], &bounds[j]) {
                match (node.children[i].row, node.children[j].row) {
                    (Some(row), _) => node.children[j].row = Some(row),
                    (None, Some(row)) => node.children[i].row = Some(row),
                    (None, None) => {
                        node.children[i].row = Some(next_row);
                        node.children[j].row = Some(next_row);
                        next_row += 1;
                    }
                }
            }
        }
    }
    if node.children.len() > 1 {
        for child in &mut node.children {
            if child.row.is_none() {
                child.row = Some(next_row);
                next_row += 1;
            }
        }
    }

    for child in &mut node.children {
        assign_rows(child);
    }
}

/// Replace each row cluster under `node` with a synthesized row container
/// and recurse into the rest of the tree.
pub(crate) fn insert_row_containers(node: &mut Node, config: &TransformConfig, ids: &mut IdGen) {
    if node.is_wrapped() || node.is_grid() || !config.has_rows() {
        // Flat children; positioning treats the container as wrapping.
        if node.kind != WidgetKind::Screen {
            node.container = ContainerKind::Wrap;
        }
        for child in &mut node.children {
            if child.has_children() {
                insert_row_containers(child, config, ids);
            }
        }
        return;
    }

    let children = std::mem::take(&mut node.children);
    let mut new_children: Vec<Node> = Vec::with_capacity(children.len());
    let mut open_rows: Vec<(u32, usize)> = Vec::new();

    for child in children {
        match child.row {
            Some(row) => {
                match open_rows.iter().find(|(r, _)| *r == row) {
                    Some(&(_, index)) => new_children[index].children.push(child),
                    None => {
                        let mut container = create_row_container(ids);
                        container.children.push(child);
                        open_rows.push((row, new_children.len()));
                        new_children.push(container);
                    }
                }
            }
            None => new_children.push(child),
        }
    }

    for (_, index) in open_rows {
        finish_row_container(&mut new_children[index]);
    }
    node.children = new_children;

    // Recurse into the members of each synthesized container directly so a
    // fresh container is never re-clustered against its own members.
    for child in &mut node.children {
        if child.kind == WidgetKind::Row {
            for member in &mut child.children {
                if member.has_children() {
                    insert_row_containers(member, config, ids);
                }
            }
        } else if child.has_children() {
            insert_row_containers(child, config, ids);
        }
    }
}

fn create_row_container(ids: &mut IdGen) -> Node {
    let n = ids.next_row();
    let widget = Widget::new(
        format!("r{}", n),
        WidgetKind::Row,
        format!("Row {}", n + 1),
        0,
        0,
        0,
        0,
    );
    let mut container = Node::from_widget(&widget, ids.next_clone());
    container.container = ContainerKind::Row;
    container
}

/// Size the container to the union of its members and re-base the members
/// onto it. The container keeps a fixed width only when every member does.
fn finish_row_container(container: &mut Node) {
    if let Some(bounds) = geom::bounding_box(container.children.iter()) {
        container.x = bounds.x;
        container.y = bounds.y;
        container.w = bounds.w;
        container.h = bounds.h;
        for member in &mut container.children {
            member.x -= bounds.x;
            member.y -= bounds.y;
        }
    }
    let all_fixed = container
        .children
        .iter()
        .all(|m| m.props.is_fixed_horizontal());
    container.props.resize = Some(Resize {
        fixed_horizontal: all_fixed,
        ..Resize::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Screen;

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
    fn test_overlapping_children_share_a_row() {
        let mut root = screen_with(vec![
            node("a", 0, 10, 50, 20),
            node("b", 60, 15, 50, 20),
            node("c", 0, 100, 50, 20),
        ]);
        assign_rows(&mut root);
        assert_eq!(root.children[0].row, root.children[1].row);
        assert!(root.children[2].row.is_some());
        assert_ne!(root.children[0].row, root.children[2].row);
    }

    #[test]
    fn test_overlap_chain_merges() {
        // a overlaps b, b overlaps c, a does not overlap c
        let mut root = screen_with(vec![
            node("a", 0, 0, 50, 20),
            node("b", 60, 15, 50, 20),
            node("c", 120, 30, 50, 20),
        ]);
        assign_rows(&mut root);
        let row = root.children[0].row;
        assert!(row.is_some());
        assert_eq!(root.children[1].row, row);
        assert_eq!(root.children[2].row, row);
    }

    #[test]
    fn test_lone_child_stays_unclustered() {
        let mut box_node = node("box", 0, 0, 200, 100);
        box_node.children.push(node("only", 10, 10, 50, 20));
        let mut root = screen_with(vec![box_node]);
        assign_rows(&mut root);
        assert!(root.children[0].children[0].row.is_none());
    }

    #[test]
    fn test_each_non_overlapping_child_gets_a_row() {
        let mut root = screen_with(vec![node("a", 0, 0, 50, 20), node("b", 0, 40, 50, 20)]);
        assign_rows(&mut root);
        assert!(root.children[0].row.is_some());
        assert!(root.children[1].row.is_some());
        assert_ne!(root.children[0].row, root.children[1].row);
    }

    #[test]
    fn test_row_containers_replace_clusters() {
        let mut root = screen_with(vec![
            node("a", 10, 10, 50, 20),
            node("b", 70, 12, 50, 20),
            node("c", 10, 100, 50, 20),
        ]);
        assign_rows(&mut root);
        let mut ids = IdGen::new();
        insert_row_containers(&mut root, &TransformConfig::default(), &mut ids);

        assert_eq!(root.children.len(), 2);
        let first = &root.children[0];
        assert_eq!(first.kind, WidgetKind::Row);
        assert_eq!(first.container, ContainerKind::Row);
        assert_eq!(first.children.len(), 2);
        // container spans its members, members re-based onto it
        assert_eq!((first.x, first.y, first.w, first.h), (10, 10, 110, 22));
        assert_eq!((first.children[0].x, first.children[0].y), (0, 0));
        assert_eq!((first.children[1].x, first.children[1].y), (60, 2));

        let second = &root.children[1];
        assert_eq!(second.kind, WidgetKind::Row);
        assert_eq!(second.children.len(), 1);
        assert_eq!(second.children[0].id, "c");
    }

    #[test]
    fn test_row_container_naming() {
        let mut root = screen_with(vec![node("a", 0, 0, 50, 20), node("b", 0, 40, 50, 20)]);
        assign_rows(&mut root);
        let mut ids = IdGen::new();
        insert_row_containers(&mut root, &TransformConfig::default(), &mut ids);
        assert_eq!(root.children[0].id, "r0");
        assert_eq!(root.children[0].name, "Row 1");
        assert_eq!(root.children[1].id, "r1");
        assert_eq!(root.children[1].name, "Row 2");
    }

    #[test]
    fn test_wrapped_container_keeps_children_flat() {
        let mut box_node = node("box", 0, 0, 300, 100);
        box_node.style.wrap = true;
        box_node.children.push(node("a", 10, 10, 50, 20));
        box_node.children.push(node("b", 70, 12, 50, 20));
        let mut root = screen_with(vec![box_node]);
        assign_rows(&mut root);
        let mut ids = IdGen::new();
        insert_row_containers(&mut root, &TransformConfig::default(), &mut ids);

        // the lone wrapped box stays flat under the screen
        let wrapped = &root.children[0];
        assert_eq!(wrapped.id, "box");
        assert_eq!(wrapped.container, ContainerKind::Wrap);
        assert_eq!(wrapped.children.len(), 2);
        assert!(wrapped.children.iter().all(|c| c.kind != WidgetKind::Row));
    }

    #[test]
    fn test_grid_config_disables_rows() {
        let mut box_node = node("box", 0, 0, 300, 100);
        box_node.children.push(node("a", 10, 10, 50, 20));
        let mut root = screen_with(vec![box_node, node("c", 0, 200, 50, 20)]);
        assign_rows(&mut root);
        let mut ids = IdGen::new();
        let config = TransformConfig::new().with_grid(true);
        insert_row_containers(&mut root, &config, &mut ids);

        // no substitution anywhere; non-screen containers become wrapping
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.container, ContainerKind::Column);
        assert_eq!(root.children[0].container, ContainerKind::Wrap);
    }

    #[test]
    fn test_fixed_width_propagates_to_container() {
        let mut a = node("a", 0, 0, 50, 20);
        a.props.resize_mut().fixed_horizontal = true;
        let mut b = node("b", 60, 5, 50, 20);
        b.props.resize_mut().fixed_horizontal = true;
        let mut root = screen_with(vec![a, b]);
        assign_rows(&mut root);
        let mut ids = IdGen::new();
        insert_row_containers(&mut root, &TransformConfig::default(), &mut ids);
        assert!(root.children[0].props.is_fixed_horizontal());
    }
}
