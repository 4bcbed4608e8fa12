/// Convenience result type used across the crate.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Top-level error taxonomy used by tree and layout APIs.
///
/// Every variant except [`LayoutError::Scene`] and [`LayoutError::Other`] is a
/// precondition violation: the caller broke the protocol and the tree state was left
/// untouched by the rejected call.
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    /// The referenced node id is stale or was never issued by this tree.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// A child was inserted while it still had a parent.
    #[error("child already has a parent: {0}")]
    ChildAlreadyParented(String),

    /// A child index was past the end of the child list.
    #[error("child index out of bounds: {0}")]
    ChildIndexOutOfBounds(String),

    /// The insertion would make a node its own ancestor.
    #[error("cycle: {0}")]
    Cycle(String),

    /// A mutation reached a node holding a layout the host never acknowledged.
    #[error("unseen layout: {0}")]
    UnseenLayout(String),

    /// The layout acknowledgment was called with no layout pending.
    #[error("no pending layout: {0}")]
    NoPendingLayout(String),

    /// A content-sized node needs measuring but has no measurement callback.
    #[error("missing measure: {0}")]
    MissingMeasure(String),

    /// A measurement callback returned a non-finite size.
    #[error("invalid measurement: {0}")]
    InvalidMeasurement(String),

    /// Errors while loading or validating a JSON scene.
    #[error("scene error: {0}")]
    Scene(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayoutError {
    /// Build a [`LayoutError::UnknownNode`] value.
    pub fn unknown_node(msg: impl Into<String>) -> Self {
        Self::UnknownNode(msg.into())
    }

    /// Build a [`LayoutError::ChildAlreadyParented`] value.
    pub fn child_already_parented(msg: impl Into<String>) -> Self {
        Self::ChildAlreadyParented(msg.into())
    }

    /// Build a [`LayoutError::ChildIndexOutOfBounds`] value.
    pub fn child_index_out_of_bounds(msg: impl Into<String>) -> Self {
        Self::ChildIndexOutOfBounds(msg.into())
    }

    /// Build a [`LayoutError::Cycle`] value.
    pub fn cycle(msg: impl Into<String>) -> Self {
        Self::Cycle(msg.into())
    }

    /// Build a [`LayoutError::UnseenLayout`] value.
    pub fn unseen_layout(msg: impl Into<String>) -> Self {
        Self::UnseenLayout(msg.into())
    }

    /// Build a [`LayoutError::NoPendingLayout`] value.
    pub fn no_pending_layout(msg: impl Into<String>) -> Self {
        Self::NoPendingLayout(msg.into())
    }

    /// Build a [`LayoutError::MissingMeasure`] value.
    pub fn missing_measure(msg: impl Into<String>) -> Self {
        Self::MissingMeasure(msg.into())
    }

    /// Build a [`LayoutError::InvalidMeasurement`] value.
    pub fn invalid_measurement(msg: impl Into<String>) -> Self {
        Self::InvalidMeasurement(msg.into())
    }

    /// Build a [`LayoutError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Returns `true` for errors caused by the caller breaking a tree or layout protocol.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, Self::Scene(_) | Self::Other(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
