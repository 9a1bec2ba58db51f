// File: crates/chartkit-core/src/error.rs
// Summary: Error type shared by config parsing, role validation and chart templates.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    /// Every required role that has no column mapping, reported together.
    #[error("missing required column roles: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("column '{name}' mapped to role '{role}' is not present in the data")]
    UnknownColumn { role: String, name: String },

    #[error("dataset is empty")]
    EmptyData,

    #[error("column '{0}' has no numeric values")]
    NoNumericValues(String),

    #[error("computed plot area is not positive ({width:.1} x {height:.1})")]
    NonPositiveLayout { width: f32, height: f32 },

    #[error("unknown chart kind '{0}'")]
    UnknownKind(String),

    #[error("invalid chart configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
