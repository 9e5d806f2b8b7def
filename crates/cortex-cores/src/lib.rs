//! Capability resolution for embedded Cortex cores.
//!
//! Turns a symbolic core identifier from a device description into a
//! validated, immutable [`CoreDescriptor`] that a toolchain flag generator
//! can consume:
//! - **Alias table:** legacy and marketing names → canonical core + overrides
//! - **Capability matrix:** which FPU precisions each core implements
//! - **Descriptor construction:** FPU validation and the DSP default policy
//! - **Factory:** the single entry point, over alias strings or field mappings
//!
//! All tables are process-wide constants; resolution performs no I/O.

pub mod alias;
pub mod arch;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod matrix;

pub use alias::{AliasSpec, AliasTable};
pub use arch::{ArchitectureFamily, FpuPrecision};
pub use descriptor::{CoreDescriptor, CoreOptions};
pub use error::{CoreError, Result};
pub use factory::{from_input, CoreFactory, CoreFields, CoreInput};
pub use matrix::CapabilityMatrix;
