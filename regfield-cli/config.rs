use std::collections::HashSet;

use regfield::{Field, FieldKind, RangeSpec, StorageOf};

use crate::error::{CliError, Result};

/// A named field whose position is only known at run time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub range: RangeSpec,
    /// Read and written as `true`/`false` instead of a number.
    pub flag: bool,
}

impl FieldSpec {
    /// Parse a field spec for a `width`-bit register
    ///
    /// Accepted forms:
    /// - `name=bit` - a flag at `bit`
    /// - `name=lo:hi` - an integer field covering `lo..=hi`
    pub fn parse(input: &str, width: u32) -> Result<Self> {
        let (name, position) = input
            .split_once('=')
            .ok_or_else(|| CliError::ParseError(format!("expected NAME=BITS, got '{input}'")))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(CliError::ParseError(format!("missing field name in '{input}'")));
        }

        let (range, flag) = match position.split_once(':') {
            Some((lo, hi)) => (
                RangeSpec::new(parse_bit(lo)?, parse_bit(hi)?, width)?,
                false,
            ),
            None => (RangeSpec::single(parse_bit(position)?, width)?, true),
        };

        Ok(Self {
            name: name.to_string(),
            range,
            flag,
        })
    }

    /// The runtime spec of a declared field
    pub fn of<F: Field>() -> Self {
        Self {
            name: F::NAME.to_string(),
            range: RangeSpec::of::<F>(),
            flag: <F::Kind as FieldKind<StorageOf<F>>>::SINGLE_BIT,
        }
    }
}

/// A value to store into a named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub field: String,
    pub value: u64,
}

impl Assignment {
    /// Parse `name=value`. Flags also accept `true` and `false`.
    pub fn parse(input: &str) -> Result<Self> {
        let (field, value) = input
            .split_once('=')
            .ok_or_else(|| CliError::ParseError(format!("expected NAME=VALUE, got '{input}'")))?;

        let value = match value.trim() {
            "true" => 1,
            "false" => 0,
            other => parse_number(other)?,
        };

        Ok(Self {
            field: field.trim().to_string(),
            value,
        })
    }
}

/// A validated register width, starting value, field set and assignment list.
///
/// Only built through [`InspectConfig::new`], so the value always fits the
/// width and every field belongs to a register of that width.
#[derive(Debug, Clone)]
pub struct InspectConfig {
    width: u32,
    value: u64,
    fields: Vec<FieldSpec>,
    assignments: Vec<Assignment>,
}

impl InspectConfig {
    /// Build a configuration from already-parsed fields and assignments
    ///
    /// Field names must be unique and every assignment must name a field.
    /// Overlapping fields are accepted but logged.
    pub fn new(
        width: u32,
        value: u64,
        fields: Vec<FieldSpec>,
        assignments: Vec<Assignment>,
    ) -> Result<Self> {
        if !regfield::storage::is_supported_width(width) {
            return Err(regfield::RegisterError::UnsupportedWidth(width).into());
        }
        check_value_fits(value, width)?;

        let mut names = HashSet::new();
        for field in &fields {
            if field.range.width() != width {
                return Err(CliError::ConfigError(format!(
                    "field {} was declared for a {}-bit register, not {width}-bit",
                    field.name,
                    field.range.width()
                )));
            }
            if !names.insert(field.name.as_str()) {
                return Err(CliError::ConfigError(format!(
                    "field {} is declared twice",
                    field.name
                )));
            }
        }

        for (i, first) in fields.iter().enumerate() {
            for second in &fields[i + 1..] {
                if first.range.overlaps(&second.range) {
                    tracing::warn!(
                        "Fields {} ({}) and {} ({}) overlap",
                        first.name,
                        first.range,
                        second.name,
                        second.range
                    );
                }
            }
        }

        for assignment in &assignments {
            if !names.contains(assignment.field.as_str()) {
                return Err(CliError::UnknownField(assignment.field.clone()));
            }
        }

        Ok(Self {
            width,
            value,
            fields,
            assignments,
        })
    }

    /// Build a configuration from raw command-line strings
    pub fn from_args(
        width: u32,
        value: u64,
        preset: Vec<FieldSpec>,
        field_args: &[String],
        set_args: &[String],
    ) -> Result<Self> {
        let mut fields = preset;
        for arg in field_args {
            fields.push(FieldSpec::parse(arg, width)?);
        }

        let assignments = set_args
            .iter()
            .map(|arg| Assignment::parse(arg))
            .collect::<Result<Vec<_>>>()?;

        Self::new(width, value, fields, assignments)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Fails unless `value` is representable in `width` bits.
pub(crate) fn check_value_fits(value: u64, width: u32) -> Result<()> {
    if width < u64::BITS && value >> width != 0 {
        return Err(CliError::ConfigError(format!(
            "initial value {value:#x} does not fit in {width} bits"
        )));
    }
    Ok(())
}

/// Parse a number written in decimal, `0x` hex or `0b` binary
///
/// Underscores between digits are ignored.
pub fn parse_number(input: &str) -> Result<u64> {
    let cleaned: String = input.trim().chars().filter(|&c| c != '_').collect();

    let parsed = if let Some(hex) = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16)
    } else if let Some(bin) = cleaned
        .strip_prefix("0b")
        .or_else(|| cleaned.strip_prefix("0B"))
    {
        u64::from_str_radix(bin, 2)
    } else {
        cleaned.parse::<u64>()
    };

    parsed.map_err(|e| CliError::ParseError(format!("invalid number '{input}': {e}")))
}

fn parse_bit(input: &str) -> Result<u32> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|e| CliError::ParseError(format!("invalid bit position '{input}': {e}")))
}
