//! Error types.

use thiserror::Error;

/// Structural problems found while validating a model before a rebuild.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("node {node} references child {child}, but the model has {len} nodes")]
    ChildOutOfRange { node: usize, child: usize, len: usize },

    #[error("node {node} references surface {surf}, but the model has {len} surfaces")]
    SurfOutOfRange { node: usize, surf: usize, len: usize },

    #[error("node {node} references point {point}, but the model has {len} points")]
    VertexOutOfRange { node: usize, point: usize, len: usize },

    #[error("surface {surf} references point {point}, but the model has {len} points")]
    SurfPointOutOfRange { surf: usize, point: usize, len: usize },

    #[error("surface {surf} references vector {vector}, but the model has {len} vectors")]
    SurfVectorOutOfRange { surf: usize, vector: usize, len: usize },

    #[error("node {node} is reachable more than once from the root")]
    SharedNode { node: usize },
}

/// Failure loading a [`RebuildConfig`](crate::RebuildConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid rebuild configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
}
