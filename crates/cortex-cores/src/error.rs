//! Error types for core capability resolution.

use std::collections::BTreeSet;

use crate::arch::FpuPrecision;

/// Errors that can occur while resolving a core descriptor.
///
/// Every variant describes a static configuration defect; none of them are
/// retryable.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Alias string not present in the alias table.
    #[error("unknown core alias '{alias}'")]
    UnknownAlias { alias: String },

    /// Factory input is neither a core name string nor a field mapping.
    #[error("invalid core input: expected a core name string or a field mapping, found {found}")]
    InvalidInputType { found: String },

    /// Requested FPU precision is not supported by the core.
    #[error("{}", capability_message(.name, .requested, .supported))]
    CapabilityError {
        /// The core the FPU was requested for.
        name: String,
        /// The precision that was asked for.
        requested: FpuPrecision,
        /// Everything the core does support (possibly nothing).
        supported: BTreeSet<FpuPrecision>,
    },

    /// Field mapping has neither `name` nor its legacy spelling `core`.
    #[error("core field mapping is missing the required 'name' field")]
    MissingName,

    /// A field and its legacy spelling were both given.
    #[error("core fields '{field}' and '{legacy}' are mutually exclusive")]
    ConflictingField { field: String, legacy: String },

    /// A field holds a value of the wrong type.
    #[error("core field '{field}' must be {expected}, found {found}")]
    InvalidFieldType {
        field: String,
        expected: String,
        found: String,
    },

    /// Field mapping contains a key the factory does not understand.
    #[error("unknown core field '{field}'")]
    UnknownField { field: String },

    /// Textual FPU precision is not a known tag.
    #[error("unknown FPU precision '{value}' (expected single_precision or double_precision)")]
    UnknownPrecision { value: String },

    /// Textual architecture family is not a known tag.
    #[error("unknown architecture family '{value}' (expected v6m, v7a, v7m or v8m)")]
    UnknownArchitecture { value: String },

    /// JSON fragment could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML fragment could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

fn capability_message(
    name: &str,
    requested: &FpuPrecision,
    supported: &BTreeSet<FpuPrecision>,
) -> String {
    if supported.is_empty() {
        return format!("core '{name}' has no hardware floating-point support");
    }
    let supported: Vec<&str> = supported.iter().map(|p| p.as_str()).collect();
    format!(
        "core '{name}' does not support {requested} floating point; supported precisions: {}",
        supported.join(", ")
    )
}

/// Result type for core resolution.
pub type Result<T> = std::result::Result<T, CoreError>;
