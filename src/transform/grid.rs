//! Grid inference: derive row and column tracks from child edges.
//!
//! Every container with children gets a grid. The edges of the container and
//! of each child become boundary lines; each line's length runs to the next
//! line or to the container edge. Children are then mapped onto the lines as
//! spans so the code generator can emit CSS grid placement.

use std::collections::BTreeMap;

use crate::transform::node::{Grid, GridLine, GridSpan, Node};

/// Attach grid metadata to `node` and every descendant container.
pub(crate) fn add_grids(node: &mut Node) {
    if let Some(grid) = compute_grid(node) {
        for child in &mut node.children {
            child.grid_span = Some(child_span(child, &grid));
        }
        node.grid = Some(grid);
    }
    for child in &mut node.children {
        add_grids(child);
    }
}

struct LineBuilder {
    v: i32,
    fixed: bool,
    start: Vec<String>,
    end: Vec<String>,
}

/// Collect the boundary lines of both axes, or `None` for leaf nodes
fn compute_grid(node: &Node) -> Option<Grid> {
    if !node.has_children() {
        return None;
    }

    let mut columns: BTreeMap<i32, LineBuilder> = BTreeMap::new();
    let mut rows: BTreeMap<i32, LineBuilder> = BTreeMap::new();

    add_line(&mut columns, 0, &node.id, true);
    add_line(&mut columns, node.w, &node.id, false);
    add_line(&mut rows, 0, &node.id, true);
    add_line(&mut rows, node.h, &node.id, false);
    for child in &node.children {
        add_line(&mut columns, child.x, &child.id, true);
        add_line(&mut columns, child.x + child.w, &child.id, false);
        add_line(&mut rows, child.y, &child.id, true);
        add_line(&mut rows, child.y + child.h, &child.id, false);
    }

    let mut columns = finish_lines(columns, node.w);
    let mut rows = finish_lines(rows, node.h);
    set_fixed_lines(node, &mut columns, &mut rows);

    Some(Grid { rows, columns })
}

fn add_line(lines: &mut BTreeMap<i32, LineBuilder>, v: i32, id: &str, start: bool) {
    let line = lines.entry(v).or_insert_with(|| LineBuilder {
        v,
        fixed: false,
        start: Vec::new(),
        end: Vec::new(),
    });
    if start {
        line.start.push(id.to_string());
    } else {
        line.end.push(id.to_string());
    }
}

/// Lines in coordinate order, each with the length to the next line. Lines
/// with no extent, like a child edge beyond the container, are dropped.
fn finish_lines(lines: BTreeMap<i32, LineBuilder>, extent: i32) -> Vec<GridLine> {
    let builders: Vec<LineBuilder> = lines.into_values().collect();
    let mut result = Vec::with_capacity(builders.len());
    for (i, builder) in builders.iter().enumerate() {
        let l = match builders.get(i + 1) {
            Some(next) => next.v - builder.v,
            None => extent - builder.v,
        };
        if l > 0 {
            result.push(GridLine {
                v: builder.v,
                l,
                fixed: builder.fixed,
                start: builder.start.clone(),
                end: builder.end.clone(),
            });
        }
    }
    result
}

/// Mark the tracks that keep their absolute size under resize: the tracks a
/// size-fixed child covers, and the nearest track outside each pinned edge.
fn set_fixed_lines(node: &Node, columns: &mut [GridLine], rows: &mut [GridLine]) {
    for child in &node.children {
        if child.props.is_fixed_horizontal() {
            for column in columns.iter_mut() {
                if column.v >= child.x && column.v < child.x + child.w {
                    column.fixed = true;
                }
            }
        }
        if child.props.is_pinned_left() {
            if let Some(before) = columns.iter_mut().rev().find(|c| c.v < child.x) {
                before.fixed = true;
            }
        }
        if child.props.is_pinned_right() {
            if let Some(after) = columns.iter_mut().find(|c| c.v >= child.x + child.w) {
                after.fixed = true;
            }
        }
        if child.props.is_fixed_vertical() {
            for row in rows.iter_mut() {
                if row.v >= child.y && row.v < child.y + child.h {
                    row.fixed = true;
                }
            }
        }
        if child.props.is_pinned_up() {
            if let Some(above) = rows.iter_mut().rev().find(|r| r.v < child.y) {
                above.fixed = true;
            }
        }
        if child.props.is_pinned_down() {
            if let Some(below) = rows.iter_mut().find(|r| r.v >= child.y + child.h) {
                below.fixed = true;
            }
        }
    }
}

/// Map a child onto the grid lines by exact edge coordinates. An edge that
/// matches no line leaves the default full-extent span on that side.
fn child_span(child: &Node, grid: &Grid) -> GridSpan {
    let mut span = GridSpan {
        column_start: 0,
        column_end: grid.columns.len(),
        row_start: 0,
        row_end: grid.rows.len(),
    };
    for (i, column) in grid.columns.iter().enumerate() {
        if column.v == child.x {
            span.column_start = i;
        } else if column.v == child.x + child.w {
            span.column_end = i;
        }
    }
    for (i, row) in grid.rows.iter().enumerate() {
        if row.v == child.y {
            span.row_start = i;
        }
        if row.v == child.y + child.h {
            span.row_end = i;
        }
    }
    span
}
