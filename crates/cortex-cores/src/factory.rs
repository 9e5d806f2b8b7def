//! Core factory: the entry point used by the build orchestrator.
//!
//! Accepts either an alias string or a structured field mapping (as parsed
//! from a device description) and turns it into a [`CoreDescriptor`].
//!
//! Loosely-typed values from JSON or TOML device descriptions are first
//! converted into the [`CoreInput`] tagged union, so the resolution logic
//! never inspects runtime types. Conversion borrows the caller's value and
//! leaves it untouched.

use crate::alias::AliasTable;
use crate::arch::FpuPrecision;
use crate::descriptor::{CoreDescriptor, CoreOptions};
use crate::error::{CoreError, Result};
use crate::matrix::CapabilityMatrix;

/// Structured core description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreFields {
    /// Canonical core name (or an alias string, taken literally).
    pub name: String,
    pub fpu: Option<FpuPrecision>,
    pub trustzone: Option<bool>,
    pub dsp: Option<bool>,
}

impl CoreFields {
    /// Fields naming `name` with nothing else set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Request an FPU precision.
    pub fn with_fpu(mut self, fpu: FpuPrecision) -> Self {
        self.fpu = Some(fpu);
        self
    }

    /// Set the TrustZone flag.
    pub fn with_trustzone(mut self, trustzone: bool) -> Self {
        self.trustzone = Some(trustzone);
        self
    }

    /// Set DSP explicitly, bypassing the default policy.
    pub fn with_dsp(mut self, dsp: bool) -> Self {
        self.dsp = Some(dsp);
        self
    }

    fn options(&self) -> CoreOptions {
        CoreOptions {
            trustzone: self.trustzone.unwrap_or(false),
            fpu: self.fpu,
            dsp: self.dsp,
        }
    }
}

/// The two accepted input shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreInput {
    /// A legacy or marketing core name, resolved through the alias table.
    Alias(String),
    /// Explicit fields, passed straight to descriptor construction.
    Fields(CoreFields),
}

impl CoreInput {
    /// Convert a JSON value from a device description.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        input_from_value(value)
    }

    /// Convert a TOML value from a device description.
    pub fn from_toml(value: &toml::Value) -> Result<Self> {
        input_from_value(value)
    }
}

impl From<&str> for CoreInput {
    fn from(alias: &str) -> Self {
        Self::Alias(alias.into())
    }
}

impl From<String> for CoreInput {
    fn from(alias: String) -> Self {
        Self::Alias(alias)
    }
}

impl From<CoreFields> for CoreInput {
    fn from(fields: CoreFields) -> Self {
        Self::Fields(fields)
    }
}

/// A loosely-typed device description value.
pub trait DescriptionValue {
    /// Type name used in diagnostics.
    fn type_name(&self) -> &'static str;
    fn as_text(&self) -> Option<&str>;
    fn as_flag(&self) -> Option<bool>;
    /// Whether the value stands for "not supplied".
    fn is_absent(&self) -> bool;
    /// Key/value pairs, if the value is a mapping.
    fn entries(&self) -> Option<Vec<(&str, &Self)>>;
}

impl DescriptionValue for serde_json::Value {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    fn as_text(&self) -> Option<&str> {
        self.as_str()
    }

    fn as_flag(&self) -> Option<bool> {
        self.as_bool()
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn entries(&self) -> Option<Vec<(&str, &Self)>> {
        self.as_object()
            .map(|map| map.iter().map(|(k, v)| (k.as_str(), v)).collect())
    }
}

impl DescriptionValue for toml::Value {
    fn type_name(&self) -> &'static str {
        self.type_str()
    }

    fn as_text(&self) -> Option<&str> {
        self.as_str()
    }

    fn as_flag(&self) -> Option<bool> {
        self.as_bool()
    }

    // TOML has no null.
    fn is_absent(&self) -> bool {
        false
    }

    fn entries(&self) -> Option<Vec<(&str, &Self)>> {
        self.as_table()
            .map(|table| table.iter().map(|(k, v)| (k.as_str(), v)).collect())
    }
}

fn input_from_value<V: DescriptionValue>(value: &V) -> Result<CoreInput> {
    if let Some(alias) = value.as_text() {
        return Ok(CoreInput::Alias(alias.into()));
    }
    match value.entries() {
        Some(entries) => fields_from_entries(entries).map(CoreInput::Fields),
        None => Err(CoreError::InvalidInputType {
            found: value.type_name().into(),
        }),
    }
}

fn fields_from_entries<V: DescriptionValue>(entries: Vec<(&str, &V)>) -> Result<CoreFields> {
    let mut name = None;
    let mut legacy_name = None;
    let mut trustzone = None;
    let mut legacy_trustzone = None;
    let mut fpu = None;
    let mut dsp = None;

    for (key, value) in entries {
        match key {
            "name" => name = text_field(key, value)?,
            "core" => legacy_name = text_field(key, value)?,
            "fpu" => fpu = precision_field(value)?,
            "trustzone" => trustzone = flag_field(key, value)?,
            "tz" => legacy_trustzone = flag_field(key, value)?,
            "dsp" => dsp = flag_field(key, value)?,
            other => {
                return Err(CoreError::UnknownField {
                    field: other.into(),
                })
            }
        }
    }

    let name = prefer_field("name", name, "core", legacy_name)?
        .filter(|name| !name.trim().is_empty())
        .ok_or(CoreError::MissingName)?;
    let trustzone = prefer_field("trustzone", trustzone, "tz", legacy_trustzone)?;

    Ok(CoreFields {
        name,
        fpu,
        trustzone,
        dsp,
    })
}

fn prefer_field<T>(
    field: &str,
    value: Option<T>,
    legacy: &str,
    legacy_value: Option<T>,
) -> Result<Option<T>> {
    match (value, legacy_value) {
        (Some(_), Some(_)) => Err(CoreError::ConflictingField {
            field: field.into(),
            legacy: legacy.into(),
        }),
        (value, legacy_value) => Ok(value.or(legacy_value)),
    }
}

fn invalid_type<V: DescriptionValue>(field: &str, expected: &str, value: &V) -> CoreError {
    CoreError::InvalidFieldType {
        field: field.into(),
        expected: expected.into(),
        found: value.type_name().into(),
    }
}

fn text_field<V: DescriptionValue>(field: &str, value: &V) -> Result<Option<String>> {
    if value.is_absent() {
        return Ok(None);
    }
    value
        .as_text()
        .map(|text| Some(text.to_owned()))
        .ok_or_else(|| invalid_type(field, "a string", value))
}

fn flag_field<V: DescriptionValue>(field: &str, value: &V) -> Result<Option<bool>> {
    if value.is_absent() {
        return Ok(None);
    }
    value
        .as_flag()
        .map(Some)
        .ok_or_else(|| invalid_type(field, "a boolean", value))
}

fn precision_field<V: DescriptionValue>(value: &V) -> Result<Option<FpuPrecision>> {
    if value.is_absent() {
        return Ok(None);
    }
    match value.as_text() {
        Some("none") => Ok(None),
        Some(text) => text.parse::<FpuPrecision>().map(Some),
        None => Err(invalid_type("fpu", "a precision name", value)),
    }
}

/// Resolves [`CoreInput`] against an alias table and a capability matrix.
#[derive(Debug, Clone, Copy)]
pub struct CoreFactory<'a> {
    aliases: &'a AliasTable,
    matrix: &'a CapabilityMatrix,
}

impl CoreFactory<'static> {
    /// Factory over the built-in tables.
    pub fn builtin() -> Self {
        Self::new(AliasTable::builtin(), CapabilityMatrix::builtin())
    }
}

impl Default for CoreFactory<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> CoreFactory<'a> {
    /// Factory over caller-supplied tables.
    pub fn new(aliases: &'a AliasTable, matrix: &'a CapabilityMatrix) -> Self {
        Self { aliases, matrix }
    }

    /// Resolve either input shape into a descriptor.
    pub fn resolve(&self, input: &CoreInput) -> Result<CoreDescriptor> {
        match input {
            CoreInput::Alias(alias) => self.resolve_alias(alias),
            CoreInput::Fields(fields) => self.resolve_fields(fields),
        }
    }

    /// Expand an alias and construct the descriptor it names.
    pub fn resolve_alias(&self, alias: &str) -> Result<CoreDescriptor> {
        let spec = self.aliases.resolve(alias)?;
        tracing::debug!(
            alias,
            core = %spec.canonical_name,
            fpu = ?spec.fpu,
            trustzone = ?spec.trustzone,
            "resolved core alias"
        );
        let options = CoreOptions {
            trustzone: spec.trustzone.unwrap_or(false),
            fpu: spec.fpu,
            dsp: None,
        };
        CoreDescriptor::construct_with(self.matrix, spec.canonical_name.as_str(), options)
    }

    /// Construct a descriptor from explicit fields.
    pub fn resolve_fields(&self, fields: &CoreFields) -> Result<CoreDescriptor> {
        tracing::debug!(core = %fields.name, "constructing core from fields");
        CoreDescriptor::construct_with(self.matrix, fields.name.as_str(), fields.options())
    }

    /// Resolve a JSON value (an alias string or an object).
    pub fn resolve_json(&self, value: &serde_json::Value) -> Result<CoreDescriptor> {
        self.resolve(&CoreInput::from_json(value)?)
    }

    /// Resolve a TOML value (an alias string or a table).
    pub fn resolve_toml(&self, value: &toml::Value) -> Result<CoreDescriptor> {
        self.resolve(&CoreInput::from_toml(value)?)
    }

    /// Parse a JSON fragment (a quoted alias or an object) and resolve it.
    pub fn resolve_json_str(&self, text: &str) -> Result<CoreDescriptor> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        self.resolve_json(&value)
    }

    /// Parse a TOML document of core fields and resolve it.
    pub fn resolve_toml_str(&self, text: &str) -> Result<CoreDescriptor> {
        let value: toml::Value = toml::from_str(text)?;
        self.resolve_toml(&value)
    }
}

/// Resolve `input` against the built-in tables.
pub fn from_input(input: &CoreInput) -> Result<CoreDescriptor> {
    CoreFactory::builtin().resolve(input)
}
