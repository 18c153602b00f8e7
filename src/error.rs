//! Error types for the transform pipeline

use thiserror::Error;

/// Fatal structural errors raised while transforming a model.
///
/// Recoverable conditions (unsupported widget kinds, duplicate names) never
/// surface here; they downgrade behavior and append a warning string to the
/// [`TransformResult`](crate::transform::node::TransformResult) instead.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A screen's child list references a widget id that does not exist
    /// in the model's widget map.
    #[error("screen '{screen}' references unknown widget '{widget}'")]
    UnknownWidget { screen: String, widget: String },

    /// A design-tool group has no member widget that resolves in the model,
    /// so no container bounding box can be derived for it.
    #[error("group '{group}' has no resolvable member widgets")]
    EmptyGroup { group: String },
}

impl TransformError {
    /// Create an unknown widget error
    pub fn unknown_widget(screen: impl Into<String>, widget: impl Into<String>) -> Self {
        Self::UnknownWidget {
            screen: screen.into(),
            widget: widget.into(),
        }
    }

    /// Create an empty group error
    pub fn empty_group(group: impl Into<String>) -> Self {
        Self::EmptyGroup {
            group: group.into(),
        }
    }
}
