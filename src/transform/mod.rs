//! The transform pipeline.
//!
//! [`Transformer`] turns an absolute-coordinate design [`Model`] into a
//! hierarchical layout tree. The passes run in a fixed order: model fixes
//! (data bindings, horizontal fixing, name deduplication), action and
//! template embedding, then per screen the containment tree, row clustering,
//! row containers, flow offsets, grids, CSS identity and widget typing, and
//! finally single-label merging over the whole result.

pub mod config;
pub mod node;

mod grid;
mod groups;
mod labels;
mod naming;
mod position;
mod rows;
mod tree;

use std::collections::BTreeMap;

use log::warn;

use crate::error::TransformError;
use crate::model::{Model, Template, Widget, WidgetKind};

pub use config::TransformConfig;
pub use node::{Node, TransformResult};

/// Counters for ids synthesized during one transform run. Scoped to the run
/// so repeated transforms of the same model yield identical output.
pub(crate) struct IdGen {
    row: u32,
    clone: u64,
}

impl IdGen {
    pub(crate) fn new() -> Self {
        Self { row: 0, clone: 0 }
    }

    pub(crate) fn next_row(&mut self) -> u32 {
        let n = self.row;
        self.row += 1;
        n
    }

    pub(crate) fn next_clone(&mut self) -> u64 {
        let n = self.clone;
        self.clone += 1;
        n
    }
}

/// Runs the transform pipeline over a design model
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    config: TransformConfig,
}

impl Transformer {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    /// Transform a design model into its layout tree. The input model is
    /// left untouched; all passes run on a working copy.
    pub fn transform(&self, model: &Model) -> Result<TransformResult, TransformError> {
        let mut model = model.clone();
        let mut warnings = Vec::new();

        add_default_databinding(&mut model);
        fix_horizontal(&mut model);
        naming::fix_names(&mut model, &mut warnings);
        let actions = collect_actions(&model);
        let templates = apply_template_classes(&mut model);

        let mut ids = IdGen::new();
        let mut screens = Vec::with_capacity(model.screens.len());
        let screen_ids: Vec<String> = model.screens.keys().cloned().collect();
        for screen_id in &screen_ids {
            groups::add_group_wrappers(&mut model, screen_id)?;
            let Some(screen) = model.screens.get(screen_id).cloned() else {
                continue;
            };

            let mut root = tree::build_screen_tree(&screen, &model, &actions, &mut ids)?;
            rows::assign_rows(&mut root);
            rows::insert_row_containers(&mut root, &self.config, &mut ids);
            position::resolve_offsets(&mut root, false);
            grid::add_grids(&mut root);
            root.x = 0;
            root.y = 0;
            naming::assign_css_names(&mut root, &screen.name, true);
            naming::assign_widget_types(&mut root, &mut warnings);
            screens.push(root);
        }

        let mut result = TransformResult {
            id: model.id.clone(),
            name: model.name.clone(),
            templates,
            warnings,
            screens,
        };
        if self.config.remove_single_labels {
            labels::attach_single_labels(&mut result);
        }

        for warning in &result.warnings {
            warn!("{}", warning);
        }
        Ok(result)
    }
}

/// Give every screen widget without a data binding a default one derived
/// from the screen and widget names. Radio buttons bind to their form group
/// so they stay mutually exclusive.
fn add_default_databinding(model: &mut Model) {
    let screen_ids: Vec<String> = model.screens.keys().cloned().collect();
    for screen_id in &screen_ids {
        let Some(screen) = model.screens.get(screen_id) else {
            continue;
        };
        let screen_name = screen.name.clone();
        let children = screen.children.clone();
        for widget_id in &children {
            let Some(widget) = model.widgets.get_mut(widget_id) else {
                continue;
            };
            if !widget.props.has_databinding() {
                let binding = default_databinding(&screen_name, widget);
                let mut databinding = BTreeMap::new();
                databinding.insert("default".to_string(), binding);
                widget.props.databinding = Some(databinding);
            }
        }
    }
}

fn default_databinding(screen_name: &str, widget: &Widget) -> String {
    if widget.kind == WidgetKind::RadioBox2 {
        if let Some(form_group) = &widget.props.form_group {
            return naming::escape_spaces(&format!("{}.{}", screen_name, form_group));
        }
    }
    naming::escape_spaces(&format!("{}.{}", screen_name, widget.name))
}

/// Widgets that render with an intrinsic width keep it under resize
fn fix_horizontal(model: &mut Model) {
    for widget in model.widgets.values_mut() {
        if matches!(widget.kind, WidgetKind::Switch | WidgetKind::Stepper) {
            widget.props.resize_mut().fixed_horizontal = true;
        }
    }
}

/// Transition lines whose target is a screen become navigation actions,
/// grouped by source widget.
fn collect_actions(model: &Model) -> BTreeMap<String, Vec<node::Action>> {
    let mut actions: BTreeMap<String, Vec<node::Action>> = BTreeMap::new();
    for line in model.lines.values() {
        if let Some(screen) = model.screens.get(&line.to) {
            actions.entry(line.from.clone()).or_default().push(node::Action {
                line: line.id.clone(),
                event: line.event.clone(),
                screen: screen.id.clone(),
                screen_name: screen.name.clone(),
            });
        }
    }
    actions
}

/// Assign each template its CSS identity and record it on every widget that
/// references the template. A template's vertical alignment is copied to
/// widgets that do not set their own.
fn apply_template_classes(model: &mut Model) -> Vec<Template> {
    let mut templates: Vec<Template> = model.templates.values().cloned().collect();
    for template in &mut templates {
        let css_class = format!("qux-template-{}", naming::escape_spaces(&template.name));
        template.css_selector = Some(format!(".{}", css_class));
        template.css_class = Some(css_class.clone());

        for widget in model.widgets.values_mut() {
            if widget.template.as_deref() == Some(template.id.as_str()) {
                widget.shared_css_classes.push(css_class.clone());
                if widget.style.vertical_align.is_none() {
                    if let Some(align) = &template.style.vertical_align {
                        widget.style.vertical_align = Some(align.clone());
                    }
                }
            }
        }
    }
    templates
}
