//! Architecture model.
//!
//! Defines the instruction-set families and floating-point precisions a
//! Cortex core can be described with, plus the table that places each
//! canonical core in its family.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Instruction-set generation of a core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchitectureFamily {
    /// ARMv6-M (Cortex-M0, M0+, M1).
    V6m,
    /// ARMv7-A (application profile).
    V7a,
    /// ARMv7-M / ARMv7E-M (Cortex-M3, M4, M7).
    V7m,
    /// ARMv8-M baseline and mainline (Cortex-M23, M33).
    V8m,
}

impl ArchitectureFamily {
    /// All families, in declaration order.
    pub const ALL: [ArchitectureFamily; 4] = [Self::V6m, Self::V7a, Self::V7m, Self::V8m];

    /// Textual tag (e.g. `"v7m"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V6m => "v6m",
            Self::V7a => "v7a",
            Self::V7m => "v7m",
            Self::V8m => "v8m",
        }
    }
}

impl fmt::Display for ArchitectureFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchitectureFamily {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| CoreError::UnknownArchitecture { value: s.into() })
    }
}

/// Precision of a hardware floating-point unit.
///
/// Ordered single before double; diagnostics list supported precisions in
/// this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FpuPrecision {
    SinglePrecision,
    DoublePrecision,
}

impl FpuPrecision {
    /// All precisions, in order.
    pub const ALL: [FpuPrecision; 2] = [Self::SinglePrecision, Self::DoublePrecision];

    /// Textual tag (e.g. `"single_precision"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SinglePrecision => "single_precision",
            Self::DoublePrecision => "double_precision",
        }
    }
}

impl fmt::Display for FpuPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FpuPrecision {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|precision| precision.as_str() == s)
            .ok_or_else(|| CoreError::UnknownPrecision { value: s.into() })
    }
}

/// Canonical core name → architecture family.
const CORE_FAMILIES: &[(&str, ArchitectureFamily)] = &[
    ("Cortex-M0", ArchitectureFamily::V6m),
    ("Cortex-M0+", ArchitectureFamily::V6m),
    ("Cortex-M1", ArchitectureFamily::V6m),
    ("Cortex-M3", ArchitectureFamily::V7m),
    ("Cortex-M4", ArchitectureFamily::V7m),
    ("Cortex-M7", ArchitectureFamily::V7m),
    ("Cortex-M23", ArchitectureFamily::V8m),
    ("Cortex-M33", ArchitectureFamily::V8m),
    ("Cortex-A9", ArchitectureFamily::V7a),
];

/// Architecture family of a canonical core, if the core is known.
pub fn family_of(name: &str) -> Option<ArchitectureFamily> {
    CORE_FAMILIES
        .iter()
        .find(|(core, _)| *core == name)
        .map(|&(_, family)| family)
}

/// Canonical core names with a known architecture family.
pub fn known_cores() -> impl Iterator<Item = &'static str> {
    CORE_FAMILIES.iter().map(|&(core, _)| core)
}
