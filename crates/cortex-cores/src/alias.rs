//! Alias table.
//!
//! The only place legacy and marketing core names (e.g. `"Cortex-M4F"`,
//! `"Cortex-M33FD-NS"`) are translated into a canonical core name plus
//! field overrides.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::arch::FpuPrecision::{self, DoublePrecision as DP, SinglePrecision as SP};
use crate::error::{CoreError, Result};

/// (alias, canonical core, fpu override, trustzone override)
// TrustZone on the Cortex-M23/M33 entries follows board convention; not every
// part in those families ships with it.
const BUILTIN_ALIASES: &[(&str, &str, Option<FpuPrecision>, Option<bool>)] = &[
    ("Cortex-M0", "Cortex-M0", None, None),
    ("Cortex-M0+", "Cortex-M0+", None, None),
    ("Cortex-M1", "Cortex-M1", None, None),
    ("Cortex-M3", "Cortex-M3", None, None),
    ("Cortex-M4", "Cortex-M4", None, None),
    ("Cortex-M4F", "Cortex-M4", Some(SP), None),
    ("Cortex-M7", "Cortex-M7", None, None),
    ("Cortex-M7F", "Cortex-M7", Some(SP), None),
    ("Cortex-M7FD", "Cortex-M7", Some(DP), None),
    ("Cortex-A9", "Cortex-A9", Some(DP), Some(false)),
    ("Cortex-M23-NS", "Cortex-M23", None, Some(true)),
    ("Cortex-M23", "Cortex-M23", None, Some(true)),
    ("Cortex-M33-NS", "Cortex-M33", None, Some(true)),
    ("Cortex-M33", "Cortex-M33", None, Some(true)),
    ("Cortex-M33F-NS", "Cortex-M33", Some(SP), Some(true)),
    ("Cortex-M33F", "Cortex-M33", Some(SP), Some(true)),
    ("Cortex-M33FD-NS", "Cortex-M33", Some(DP), Some(true)),
    ("Cortex-M33FD", "Cortex-M33", Some(DP), Some(true)),
];

static BUILTIN: LazyLock<AliasTable> = LazyLock::new(|| {
    BUILTIN_ALIASES.iter().fold(
        AliasTable::empty(),
        |table, &(alias, canonical, fpu, trustzone)| {
            table.with_alias(
                alias,
                AliasSpec {
                    canonical_name: canonical.into(),
                    fpu,
                    trustzone,
                },
            )
        },
    )
});

/// Construction spec an alias expands to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasSpec {
    /// Canonical core name passed to descriptor construction.
    pub canonical_name: String,
    /// FPU precision override; `None` leaves the FPU disabled.
    pub fpu: Option<FpuPrecision>,
    /// TrustZone override; `None` means no TrustZone.
    pub trustzone: Option<bool>,
}

impl AliasSpec {
    /// Spec for `canonical_name` with no overrides.
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            fpu: None,
            trustzone: None,
        }
    }

    /// Override the FPU precision.
    pub fn with_fpu(mut self, fpu: FpuPrecision) -> Self {
        self.fpu = Some(fpu);
        self
    }

    /// Override the TrustZone flag.
    pub fn with_trustzone(mut self, trustzone: bool) -> Self {
        self.trustzone = Some(trustzone);
        self
    }
}

/// Read-only mapping from alias to [`AliasSpec`]. Lookup is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, AliasSpec>,
}

impl AliasTable {
    /// The process-wide built-in table, covering every supported device
    /// family name.
    pub fn builtin() -> &'static AliasTable {
        &BUILTIN
    }

    /// A table with no aliases.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add (or replace) an alias.
    pub fn with_alias(mut self, alias: impl Into<String>, spec: AliasSpec) -> Self {
        self.entries.insert(alias.into(), spec);
        self
    }

    /// Look up an alias.
    pub fn resolve(&self, alias: &str) -> Result<&AliasSpec> {
        self.entries
            .get(alias)
            .ok_or_else(|| CoreError::UnknownAlias {
                alias: alias.into(),
            })
    }

    /// Whether `alias` is in the table.
    pub fn contains(&self, alias: &str) -> bool {
        self.entries.contains_key(alias)
    }

    /// All aliases, sorted.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no aliases.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
