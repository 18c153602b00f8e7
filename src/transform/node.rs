//! Output tree types produced by the transformer.
//!
//! A [`Node`] is a clone of a widget (or screen) enriched with the derived
//! layout structure: real parent/child relations, container kind, grid
//! metadata, CSS identity, and the resolved output widget type (`qtype`).
//! The tree owns its children; no parent back-references are stored, the
//! passes carry parent context through recursion instead.

use serde::Serialize;

use crate::geom::{Bounds, HasBounds};
use crate::model::{is_false, Props, Screen, Style, Template, Widget, WidgetKind};

/// How a container lays out its children. Decided once during row
/// clustering and dispatched by pattern matching afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// Children flow top to bottom (the default)
    #[default]
    Column,
    /// Children flow left to right
    Row,
    /// Children wrap; padding and wrap offsets are inferred
    Wrap,
}

/// One grid boundary line along one axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridLine {
    /// Coordinate along the axis, relative to the container
    pub v: i32,
    /// Length to the next line, or to the container edge for the last line
    pub l: i32,
    /// Whether this track keeps its absolute size under resize
    pub fixed: bool,
    /// Ids of the elements whose span starts at this line
    pub start: Vec<String>,
    /// Ids of the elements whose span ends at this line
    pub end: Vec<String>,
}

/// Grid metadata of a container: boundary lines on both axes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub rows: Vec<GridLine>,
    pub columns: Vec<GridLine>,
}

/// A child's placement in its parent's grid, as line indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpan {
    pub column_start: usize,
    pub column_end: usize,
    pub row_start: usize,
    pub row_end: usize,
}

/// Inferred spacing of a child inside a wrapped container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapOffsets {
    pub x: i32,
    pub y: i32,
    pub right: i32,
    pub bottom: i32,
}

/// A navigation action embedded from a design-tool transition line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Id of the originating line
    pub line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Target screen id
    pub screen: String,
    /// Target screen name
    pub screen_name: String,
}

/// One element of the derived layout tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    /// Monotonic clone counter, unique per transform run. Tracing only,
    /// never used for identity logic.
    #[serde(rename = "_id")]
    pub trace_id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    /// Position relative to the parent node
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub z: i32,
    pub style: Style,
    pub props: Props,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shared_css_classes: Vec<String>,
    /// Row cluster id, meaningful only between clustering and container
    /// synthesis
    #[serde(skip)]
    pub row: Option<u32>,
    pub container: ContainerKind,
    #[serde(skip_serializing_if = "is_false")]
    pub is_group: bool,
    /// Id of the design-tool group this element belongs to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_span: Option<GridSpan>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub css_class: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub css_selector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qtype: Option<String>,
    /// Absolute x inside the row container, preserved when `left` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abs_x: Option<i32>,
    /// Gap to the previous row sibling's trailing edge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<i32>,
    /// Gap to the previous column sibling's trailing edge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<i32>,
    /// Offset from the screen bottom for pinned-down fixed elements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<i32>,
    /// Whether this row member may claim freed horizontal space
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_grow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_offsets: Option<WrapOffsets>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    pub children: Vec<Node>,
    /// Viewport-fixed elements, kept out of the flow tree (screen roots only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixed_children: Vec<Node>,
}

impl Node {
    /// Clone a widget into a tree node. Coordinates stay absolute until the
    /// caller re-bases them onto the chosen parent.
    pub fn from_widget(widget: &Widget, trace_id: u64) -> Self {
        Self {
            id: widget.id.clone(),
            trace_id,
            name: widget.name.clone(),
            kind: widget.kind.clone(),
            x: widget.x,
            y: widget.y,
            w: widget.w,
            h: widget.h,
            z: widget.z,
            style: widget.style.clone(),
            props: widget.props.clone(),
            template: widget.template.clone(),
            shared_css_classes: widget.shared_css_classes.clone(),
            row: None,
            container: ContainerKind::default(),
            is_group: widget.is_group,
            group: None,
            grid: None,
            grid_span: None,
            css_class: String::new(),
            css_selector: String::new(),
            qtype: None,
            abs_x: None,
            left: None,
            top: None,
            bottom: None,
            can_grow: None,
            wrap_offsets: None,
            actions: Vec::new(),
            children: Vec::new(),
            fixed_children: Vec::new(),
        }
    }

    /// Clone a screen into the root node of its tree
    pub fn from_screen(screen: &Screen, trace_id: u64) -> Self {
        Self {
            id: screen.id.clone(),
            trace_id,
            name: screen.name.clone(),
            kind: WidgetKind::Screen,
            x: screen.x,
            y: screen.y,
            w: screen.w,
            h: screen.h,
            z: 0,
            style: screen.style.clone(),
            props: screen.props.clone(),
            template: None,
            shared_css_classes: Vec::new(),
            row: None,
            container: ContainerKind::default(),
            is_group: false,
            group: None,
            grid: None,
            grid_span: None,
            css_class: String::new(),
            css_selector: String::new(),
            qtype: None,
            abs_x: None,
            left: None,
            top: None,
            bottom: None,
            can_grow: None,
            wrap_offsets: None,
            actions: Vec::new(),
            children: Vec::new(),
            fixed_children: Vec::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether the designer flagged this container as wrapping
    pub fn is_wrapped(&self) -> bool {
        self.style.wrap
    }

    /// Whether the designer flagged this container as a CSS grid
    pub fn is_grid(&self) -> bool {
        self.props.grid
    }
}

impl HasBounds for Node {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.w, self.h)
    }
}

/// The derived output of one transform run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResult {
    pub id: String,
    pub name: String,
    pub templates: Vec<Template>,
    /// Human-readable warnings, for display only
    pub warnings: Vec<String>,
    pub screens: Vec<Node>,
}
