//! Capability matrix.
//!
//! Maps a canonical core name to the FPU precisions it implements and the
//! toolchain variant string (the `-mfpu` name) for each.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use crate::arch::FpuPrecision;

/// (core, precision, toolchain FPU variant)
const BUILTIN_FPUS: &[(&str, FpuPrecision, &str)] = &[
    ("Cortex-M4", FpuPrecision::SinglePrecision, "fpv4-sp-d16"),
    ("Cortex-M7", FpuPrecision::SinglePrecision, "fpv5-sp-d16"),
    ("Cortex-M7", FpuPrecision::DoublePrecision, "fpv5-d16"),
    ("Cortex-M33", FpuPrecision::SinglePrecision, "fpv5-sp-d16"),
    ("Cortex-M33", FpuPrecision::DoublePrecision, "fpv5-d16"),
    ("Cortex-A9", FpuPrecision::DoublePrecision, "vfpv3"),
];

static BUILTIN: LazyLock<CapabilityMatrix> = LazyLock::new(|| {
    BUILTIN_FPUS
        .iter()
        .fold(CapabilityMatrix::empty(), |matrix, &(core, precision, variant)| {
            matrix.with_variant(core, precision, variant)
        })
});

/// Read-only table of FPU variants per core.
///
/// Absence is never an error here: a missing core simply supports no
/// precision at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityMatrix {
    cores: BTreeMap<String, BTreeMap<FpuPrecision, String>>,
}

impl CapabilityMatrix {
    /// The process-wide built-in matrix.
    pub fn builtin() -> &'static CapabilityMatrix {
        &BUILTIN
    }

    /// A matrix with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add (or replace) the variant string for `(name, precision)`.
    pub fn with_variant(
        mut self,
        name: impl Into<String>,
        precision: FpuPrecision,
        variant: impl Into<String>,
    ) -> Self {
        self.cores
            .entry(name.into())
            .or_default()
            .insert(precision, variant.into());
        self
    }

    /// Toolchain variant string for `precision` on `name`, if supported.
    pub fn lookup_variant(&self, name: &str, precision: FpuPrecision) -> Option<&str> {
        self.cores.get(name)?.get(&precision).map(String::as_str)
    }

    /// Every precision `name` supports (empty for cores without an FPU).
    pub fn supported_precisions(&self, name: &str) -> BTreeSet<FpuPrecision> {
        self.cores
            .get(name)
            .map(|variants| variants.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Cores with at least one FPU entry, sorted by name.
    pub fn cores(&self) -> impl Iterator<Item = &str> {
        self.cores.keys().map(String::as_str)
    }
}
