//! Core descriptor.
//!
//! The validated, immutable capability description handed to the toolchain
//! flag generator. Construction checks the requested FPU precision against
//! a [`CapabilityMatrix`] and applies the DSP default policy.

use std::fmt;

use serde::Serialize;

use crate::arch::{self, ArchitectureFamily, FpuPrecision};
use crate::error::{CoreError, Result};
use crate::matrix::CapabilityMatrix;

/// The only core whose DSP extension is on unless told otherwise.
pub const DSP_DEFAULT_CORE: &str = "Cortex-M4";

/// Optional arguments to [`CoreDescriptor::construct`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoreOptions {
    /// Stored verbatim; never checked against the core.
    pub trustzone: bool,
    /// Requested FPU precision; `None` means software floating point.
    pub fpu: Option<FpuPrecision>,
    /// Explicit DSP setting; `None` applies the default policy.
    pub dsp: Option<bool>,
}

impl CoreOptions {
    /// Set the TrustZone flag.
    pub fn trustzone(mut self, trustzone: bool) -> Self {
        self.trustzone = trustzone;
        self
    }

    /// Request an FPU precision.
    pub fn fpu(mut self, fpu: FpuPrecision) -> Self {
        self.fpu = Some(fpu);
        self
    }

    /// Set DSP explicitly, bypassing the default policy.
    pub fn dsp(mut self, dsp: bool) -> Self {
        self.dsp = Some(dsp);
        self
    }
}

/// Resolved hardware capabilities of one core.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CoreDescriptor {
    name: String,
    arch: Option<ArchitectureFamily>,
    trustzone: bool,
    fpu: Option<String>,
    dsp: bool,
}

impl CoreDescriptor {
    /// Construct a descriptor against the built-in capability matrix.
    pub fn construct(name: impl Into<String>, options: CoreOptions) -> Result<Self> {
        Self::construct_with(CapabilityMatrix::builtin(), name, options)
    }

    /// Construct a descriptor against `matrix`.
    ///
    /// Fails with [`CoreError::CapabilityError`] when an FPU precision is
    /// requested that `matrix` does not list for `name`. Leaving the FPU
    /// off is legal for every core, known or not.
    pub fn construct_with(
        matrix: &CapabilityMatrix,
        name: impl Into<String>,
        options: CoreOptions,
    ) -> Result<Self> {
        let name = name.into();

        let fpu = match options.fpu {
            Some(precision) => match matrix.lookup_variant(&name, precision) {
                Some(variant) => Some(variant.to_owned()),
                None => {
                    return Err(CoreError::CapabilityError {
                        supported: matrix.supported_precisions(&name),
                        name,
                        requested: precision,
                    });
                }
            },
            None => None,
        };

        let dsp = match options.dsp {
            Some(dsp) => dsp,
            None => {
                let dsp = name == DSP_DEFAULT_CORE;
                tracing::trace!(core = %name, dsp, "applied default DSP policy");
                dsp
            }
        };

        Ok(Self {
            arch: arch::family_of(&name),
            name,
            trustzone: options.trustzone,
            fpu,
            dsp,
        })
    }

    /// Canonical core name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Architecture family, when the core is one the family table knows.
    pub fn arch(&self) -> Option<ArchitectureFamily> {
        self.arch
    }

    /// TrustZone flag, exactly as supplied.
    pub fn trustzone(&self) -> bool {
        self.trustzone
    }

    /// Toolchain FPU variant string, or `None` for software floating point.
    pub fn fpu(&self) -> Option<&str> {
        self.fpu.as_deref()
    }

    /// Whether the DSP extension is enabled.
    pub fn dsp(&self) -> bool {
        self.dsp
    }
}

impl fmt::Display for CoreDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(arch) = self.arch {
            write!(f, " ({arch})")?;
        }
        write!(f, " fpu={}", self.fpu.as_deref().unwrap_or("none"))?;
        write!(f, " dsp={} trustzone={}", self.dsp, self.trustzone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_matrix() -> CapabilityMatrix {
        CapabilityMatrix::empty().with_variant("fake_core", FpuPrecision::SinglePrecision, "fake_fpu")
    }

    #[test]
    fn cortex_m4_default_dsp() {
        let core = CoreDescriptor::construct("Cortex-M4", CoreOptions::default()).unwrap();
        assert!(core.dsp());
        assert_eq!(core.arch(), Some(ArchitectureFamily::V7m));
    }

    #[test]
    fn cortex_m4_overridden_dsp() {
        let core = CoreDescriptor::construct("Cortex-M4", CoreOptions::default().dsp(false)).unwrap();
        assert!(!core.dsp());
    }

    #[test]
    fn dsp_defaults_off_elsewhere() {
        for name in ["Cortex-M7", "Cortex-M33", "Cortex-M0", "fake_core"] {
            let core = CoreDescriptor::construct(name, CoreOptions::default()).unwrap();
            assert!(!core.dsp(), "{name}");
        }
        let core = CoreDescriptor::construct("Cortex-M33", CoreOptions::default().dsp(true)).unwrap();
        assert!(core.dsp());
    }

    #[test]
    fn invalid_fpu_lists_supported() {
        let err = CoreDescriptor::construct_with(
            &fake_matrix(),
            "fake_core",
            CoreOptions::default().fpu(FpuPrecision::DoublePrecision),
        )
        .unwrap_err();
        match &err {
            CoreError::CapabilityError {
                name,
                requested,
                supported,
            } => {
                assert_eq!(name, "fake_core");
                assert_eq!(*requested, FpuPrecision::DoublePrecision);
                assert!(supported.contains(&FpuPrecision::SinglePrecision));
            }
            other => panic!("expected CapabilityError, got {other:?}"),
        }
        assert!(err.to_string().contains("single_precision"));
    }

    #[test]
    fn fpu_on_core_without_fpu() {
        for precision in FpuPrecision::ALL {
            let err = CoreDescriptor::construct("Cortex-M0", CoreOptions::default().fpu(precision))
                .unwrap_err();
            assert!(matches!(err, CoreError::CapabilityError { .. }));
            assert!(err.to_string().contains("no hardware floating-point support"));
        }
    }

    #[test]
    fn disabled_fpu() {
        let core = CoreDescriptor::construct_with(&fake_matrix(), "fake_core", CoreOptions::default())
            .unwrap();
        assert!(core.fpu().is_none());
    }

    #[test]
    fn valid_core() {
        let core = CoreDescriptor::construct_with(
            &fake_matrix(),
            "fake_core",
            CoreOptions::default()
                .trustzone(true)
                .fpu(FpuPrecision::SinglePrecision)
                .dsp(true),
        )
        .unwrap();
        assert_eq!(core.name(), "fake_core");
        assert_eq!(core.fpu(), Some("fake_fpu"));
        assert!(core.trustzone());
        assert!(core.dsp());
        assert_eq!(core.arch(), None);
    }

    #[test]
    fn trustzone_is_not_cross_checked() {
        let core = CoreDescriptor::construct("Cortex-M0", CoreOptions::default().trustzone(true))
            .unwrap();
        assert!(core.trustzone());
    }

    #[test]
    fn display_and_serialize() {
        let core = CoreDescriptor::construct(
            "Cortex-M4",
            CoreOptions::default().fpu(FpuPrecision::SinglePrecision),
        )
        .unwrap();
        assert_eq!(
            core.to_string(),
            "Cortex-M4 (v7m) fpu=fpv4-sp-d16 dsp=true trustzone=false"
        );
        let json = serde_json::to_value(&core).unwrap();
        assert_eq!(json["name"], "Cortex-M4");
        assert_eq!(json["arch"], "v7m");
        assert_eq!(json["fpu"], "fpv4-sp-d16");
        assert_eq!(json["dsp"], true);
        assert_eq!(json["trustzone"], false);
    }
}
