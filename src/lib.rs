//! quxflow - Transforms absolute design models into flow layout trees
//!
//! This library takes the JSON export of a visual design tool, where every
//! widget carries absolute coordinates, and derives a hierarchical tree with
//! real parent/child relations, rows, flow offsets, responsive hints, and
//! grid metadata suitable for code generation.
//!
//! # Example
//!
//! ```rust
//! use quxflow::{transform, Model};
//!
//! let model = Model::from_json(r#"{
//!     "id": "m1",
//!     "name": "App",
//!     "screens": {
//!         "s1": { "id": "s1", "name": "Home", "w": 400, "h": 600,
//!                 "children": ["w1"] }
//!     },
//!     "widgets": {
//!         "w1": { "id": "w1", "type": "Button", "name": "Go",
//!                 "x": 10, "y": 20, "w": 100, "h": 40 }
//!     }
//! }"#).unwrap();
//!
//! let result = transform(&model).unwrap();
//! assert_eq!(result.screens.len(), 1);
//! assert_eq!(result.screens[0].children.len(), 1);
//! ```

pub mod error;
pub mod geom;
pub mod model;
pub mod transform;

pub use error::TransformError;
pub use model::{Model, Screen, Widget, WidgetKind};
pub use transform::config::ConfigError;
pub use transform::node::{ContainerKind, Node, TransformResult};
pub use transform::{TransformConfig, Transformer};

/// Transform a design model with the default configuration
pub fn transform(model: &Model) -> Result<TransformResult, TransformError> {
    transform_with_config(model, TransformConfig::default())
}

/// Transform a design model with a custom configuration
///
/// # Example
///
/// ```rust
/// use quxflow::{transform_with_config, Model, TransformConfig};
///
/// let model = Model::new("m1", "App");
/// let config = TransformConfig::new().with_grid(true);
/// let result = transform_with_config(&model, config).unwrap();
/// assert!(result.screens.is_empty());
/// ```
pub fn transform_with_config(
    model: &Model,
    config: TransformConfig,
) -> Result<TransformResult, TransformError> {
    Transformer::new(config).transform(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(model: &mut Model, screen_id: &str, widget: Widget) {
        if let Some(screen) = model.screens.get_mut(screen_id) {
            screen.children.push(widget.id.clone());
        }
        model.widgets.insert(widget.id.clone(), widget);
    }

    #[test]
    fn test_transform_empty_model() {
        let model = Model::new("m1", "Empty");
        let result = transform(&model).unwrap();
        assert_eq!(result.id, "m1");
        assert!(result.screens.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_transform_stacked_widgets_get_rows() {
        let mut model = Model::new("m1", "App");
        model
            .screens
            .insert("s1".into(), Screen::new("s1", "Home", 400, 600));
        add(
            &mut model,
            "s1",
            Widget::new("a", WidgetKind::Button, "Top", 10, 10, 100, 40),
        );
        add(
            &mut model,
            "s1",
            Widget::new("b", WidgetKind::Button, "Bottom", 10, 100, 100, 40),
        );

        let result = transform(&model).unwrap();
        let screen = &result.screens[0];
        assert_eq!(screen.children.len(), 2);
        assert!(screen
            .children
            .iter()
            .all(|c| c.kind == WidgetKind::Row));
    }

    #[test]
    fn test_transform_screen_at_origin() {
        let mut model = Model::new("m1", "App");
        let mut screen = Screen::new("s1", "Home", 400, 600);
        screen.x = 100;
        screen.y = 50;
        model.screens.insert("s1".into(), screen);

        let result = transform(&model).unwrap();
        assert_eq!((result.screens[0].x, result.screens[0].y), (0, 0));
    }

    #[test]
    fn test_transform_is_deterministic() {
        let mut model = Model::new("m1", "App");
        model
            .screens
            .insert("s1".into(), Screen::new("s1", "Home", 400, 600));
        add(
            &mut model,
            "s1",
            Widget::new("a", WidgetKind::Button, "A", 10, 10, 100, 40),
        );

        let first = transform(&model).unwrap();
        let second = transform(&model).unwrap();
        assert_eq!(first, second);
    }
}
