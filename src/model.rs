//! Input data model for the design-tool export format.
//!
//! A [`Model`] arrives as JSON from the visual design tool, already expanded
//! by template inheritance. Widgets are placed with absolute design-space
//! coordinates; the transformer works on a copy of the model and returns a
//! derived [`TransformResult`](crate::transform::node::TransformResult).
//!
//! All maps are `BTreeMap` keyed by id so that iteration order, and with it
//! screen order, warning order, and synthesized ids, is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(crate) fn is_false(b: &bool) -> bool {
    !*b
}

/// The widget kinds the code generator understands, plus the kinds the
/// pipeline synthesizes (`Row`, `Screen`) and a catch-all for anything a
/// newer design-tool version may emit.
///
/// Unrecognized kinds round-trip through [`WidgetKind::Other`] and are
/// downgraded to a generic box during typing, with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WidgetKind {
    Button,
    Box,
    Label,
    Container,
    Icon,
    Image,
    CheckBox,
    RadioBox,
    RadioBox2,
    TextBox,
    Password,
    TextArea,
    Repeater,
    RadioGroup,
    CheckBoxGroup,
    ToggleButton,
    Switch,
    DropDown,
    MobileDropDown,
    Stepper,
    HSlider,
    Date,
    DateDropDown,
    SegmentButton,
    Rating,
    IconToggle,
    LabeledIconToggle,
    TypeAheadTextBox,
    Table,
    Paging,
    BarChart,
    PieChart,
    MultiRingChart,
    RingChart,
    Vector,
    /// Synthesized row container
    Row,
    /// Screen root
    Screen,
    /// Anything else the design tool emits
    Other(String),
}

impl WidgetKind {
    /// The design-tool name of this kind
    pub fn as_str(&self) -> &str {
        match self {
            Self::Button => "Button",
            Self::Box => "Box",
            Self::Label => "Label",
            Self::Container => "Container",
            Self::Icon => "Icon",
            Self::Image => "Image",
            Self::CheckBox => "CheckBox",
            Self::RadioBox => "RadioBox",
            Self::RadioBox2 => "RadioBox2",
            Self::TextBox => "TextBox",
            Self::Password => "Password",
            Self::TextArea => "TextArea",
            Self::Repeater => "Repeater",
            Self::RadioGroup => "RadioGroup",
            Self::CheckBoxGroup => "CheckBoxGroup",
            Self::ToggleButton => "ToggleButton",
            Self::Switch => "Switch",
            Self::DropDown => "DropDown",
            Self::MobileDropDown => "MobileDropDown",
            Self::Stepper => "Stepper",
            Self::HSlider => "HSlider",
            Self::Date => "Date",
            Self::DateDropDown => "DateDropDown",
            Self::SegmentButton => "SegmentButton",
            Self::Rating => "Rating",
            Self::IconToggle => "IconToggle",
            Self::LabeledIconToggle => "LabeledIconToggle",
            Self::TypeAheadTextBox => "TypeAheadTextBox",
            Self::Table => "Table",
            Self::Paging => "Paging",
            Self::BarChart => "BarChart",
            Self::PieChart => "PieChart",
            Self::MultiRingChart => "MultiRingChart",
            Self::RingChart => "RingChart",
            Self::Vector => "Vector",
            Self::Row => "row",
            Self::Screen => "Screen",
            Self::Other(name) => name,
        }
    }

    /// Whether a leaf widget of this kind maps to a dedicated output tag.
    ///
    /// Synthesized kinds and unrecognized kinds are not supported as leaves;
    /// they fall back to a generic box.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Row | Self::Screen | Self::Other(_))
    }
}

impl From<String> for WidgetKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Button" => Self::Button,
            "Box" => Self::Box,
            "Label" => Self::Label,
            "Container" => Self::Container,
            "Icon" => Self::Icon,
            "Image" => Self::Image,
            "CheckBox" => Self::CheckBox,
            "RadioBox" => Self::RadioBox,
            "RadioBox2" => Self::RadioBox2,
            "TextBox" => Self::TextBox,
            "Password" => Self::Password,
            "TextArea" => Self::TextArea,
            "Repeater" => Self::Repeater,
            "RadioGroup" => Self::RadioGroup,
            "CheckBoxGroup" => Self::CheckBoxGroup,
            "ToggleButton" => Self::ToggleButton,
            "Switch" => Self::Switch,
            "DropDown" => Self::DropDown,
            "MobileDropDown" => Self::MobileDropDown,
            "Stepper" => Self::Stepper,
            "HSlider" => Self::HSlider,
            "Date" => Self::Date,
            "DateDropDown" => Self::DateDropDown,
            "SegmentButton" => Self::SegmentButton,
            "Rating" => Self::Rating,
            "IconToggle" => Self::IconToggle,
            "LabeledIconToggle" => Self::LabeledIconToggle,
            "TypeAheadTextBox" => Self::TypeAheadTextBox,
            "Table" => Self::Table,
            "Paging" => Self::Paging,
            "BarChart" => Self::BarChart,
            "PieChart" => Self::PieChart,
            "MultiRingChart" => Self::MultiRingChart,
            "RingChart" => Self::RingChart,
            "Vector" => Self::Vector,
            "row" => Self::Row,
            "Screen" => Self::Screen,
            _ => Self::Other(s),
        }
    }
}

impl From<WidgetKind> for String {
    fn from(kind: WidgetKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Responsive resize behavior of a widget: which container edges it is
/// pinned to and whether its extent is fixed under resize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resize {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fixed_horizontal: bool,
    pub fixed_vertical: bool,
}

/// Widget properties consumed by the pipeline. Anything the pipeline does
/// not read is carried through untouched in `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Props {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize: Option<Resize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub databinding: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Marks a container laid out as a CSS grid by the designer
    #[serde(skip_serializing_if = "is_false")]
    pub grid: bool,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl Props {
    /// The resize block, lazily initialized with neutral defaults
    pub fn resize_mut(&mut self) -> &mut Resize {
        self.resize.get_or_insert_with(Resize::default)
    }

    pub fn is_pinned_left(&self) -> bool {
        self.resize.is_some_and(|r| r.left)
    }

    pub fn is_pinned_right(&self) -> bool {
        self.resize.is_some_and(|r| r.right)
    }

    pub fn is_pinned_up(&self) -> bool {
        self.resize.is_some_and(|r| r.up)
    }

    pub fn is_pinned_down(&self) -> bool {
        self.resize.is_some_and(|r| r.down)
    }

    pub fn is_fixed_horizontal(&self) -> bool {
        self.resize.is_some_and(|r| r.fixed_horizontal)
    }

    pub fn is_fixed_vertical(&self) -> bool {
        self.resize.is_some_and(|r| r.fixed_vertical)
    }

    /// Whether a non-empty data binding is present
    pub fn has_databinding(&self) -> bool {
        self.databinding.as_ref().is_some_and(|b| !b.is_empty())
    }
}

/// CSS-like style of a widget. The properties the pipeline reads or writes
/// are typed; everything else flows through `other` for the downstream CSS
/// generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    /// Pinned to the viewport instead of flowing with the container
    #[serde(skip_serializing_if = "is_false")]
    pub fixed: bool,
    /// Marks a container whose children wrap instead of forming rows
    #[serde(skip_serializing_if = "is_false")]
    pub wrap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<i32>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// A widget placed on a screen with absolute design-space coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    /// Render order; higher z renders on top
    #[serde(default)]
    pub z: i32,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub props: Props,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// CSS classes shared through a template, filled by the template pass
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_css_classes: Vec<String>,
    /// True only on synthesized group containers
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_group: bool,
}

impl Widget {
    pub fn new(
        id: impl Into<String>,
        kind: WidgetKind,
        name: impl Into<String>,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            x,
            y,
            w,
            h,
            z: 0,
            style: Style::default(),
            props: Props::default(),
            template: None,
            shared_css_classes: Vec::new(),
            is_group: false,
        }
    }
}

/// A screen: a widget-like root with an ordered child list of widget ids
/// in render (z) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    pub w: i32,
    pub h: i32,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub children: Vec<String>,
}

impl Screen {
    pub fn new(id: impl Into<String>, name: impl Into<String>, w: i32, h: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x: 0,
            y: 0,
            w,
            h,
            style: Style::default(),
            props: Props::default(),
            children: Vec::new(),
        }
    }
}

/// A design-tool group: a named set of widgets (and subgroups) independent
/// of geometric containment. Groups form a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    /// Direct member widget ids
    #[serde(default)]
    pub children: Vec<String>,
    /// Direct subgroup ids
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,
}

/// A reusable template. The pipeline only assigns its CSS identity and
/// copies `verticalAlign` down to referencing widgets; everything else is
/// passed through for the code generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub style: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_selector: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// A transition line between a widget and a target (usually a screen)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelLine {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

/// The complete design model as exported by the design tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub templates: BTreeMap<String, Template>,
    #[serde(default)]
    pub widgets: BTreeMap<String, Widget>,
    #[serde(default)]
    pub screens: BTreeMap<String, Screen>,
    #[serde(default)]
    pub groups: BTreeMap<String, Group>,
    #[serde(default)]
    pub lines: BTreeMap<String, ModelLine>,
}

impl Model {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            templates: BTreeMap::new(),
            widgets: BTreeMap::new(),
            screens: BTreeMap::new(),
            groups: BTreeMap::new(),
            lines: BTreeMap::new(),
        }
    }

    /// Parse a model from the design tool's JSON export
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The group a widget directly belongs to, if any
    pub fn get_group(&self, widget_id: &str) -> Option<&Group> {
        self.groups
            .values()
            .find(|g| g.children.iter().any(|c| c == widget_id))
    }

    /// The parent group of a group, if any
    pub fn get_parent_group(&self, group_id: &str) -> Option<&Group> {
        self.groups
            .values()
            .find(|g| g.groups.iter().any(|c| c == group_id))
    }

    /// All transitive member widget ids of a group, direct members first,
    /// then subgroup members in subgroup order.
    pub fn all_group_children(&self, group: &Group) -> Vec<String> {
        let mut members = group.children.clone();
        for sub_id in &group.groups {
            if let Some(sub) = self.groups.get(sub_id) {
                members.extend(self.all_group_children(sub));
            }
        }
        members
    }
}
