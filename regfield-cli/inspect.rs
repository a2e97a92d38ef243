//! Decoding and encoding raw register values against runtime field specs

use std::fmt;

use regfield::{RangeSpec, RegisterError, RegisterShape, RegisterValue, Storage};

use crate::config::{check_value_fits, FieldSpec, InspectConfig};
use crate::error::{CliError, Result};

/// The value of one field in a decoded register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReading {
    pub name: String,
    pub range: RangeSpec,
    pub flag: bool,
    pub value: u64,
}

impl fmt::Display for FieldReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = self.range.to_string();
        if self.flag {
            write!(f, "{:<16} {:<14} {}", self.name, range, self.value != 0)
        } else {
            write!(
                f,
                "{:<16} {:<14} {} ({:#x})",
                self.name, range, self.value, self.value
            )
        }
    }
}

/// Read every configured field out of the configured value
pub fn decode(config: &InspectConfig) -> Result<Vec<FieldReading>> {
    check_value_fits(config.value(), config.width())?;
    match config.width() {
        8 => decode_as::<u8>(config),
        16 => decode_as::<u16>(config),
        32 => decode_as::<u32>(config),
        64 => decode_as::<u64>(config),
        other => Err(RegisterError::UnsupportedWidth(other).into()),
    }
}

/// Apply the configured assignments, in order, to the configured value
pub fn encode(config: &InspectConfig) -> Result<u64> {
    check_value_fits(config.value(), config.width())?;
    match config.width() {
        8 => encode_as::<u8>(config),
        16 => encode_as::<u16>(config),
        32 => encode_as::<u32>(config),
        64 => encode_as::<u64>(config),
        other => Err(RegisterError::UnsupportedWidth(other).into()),
    }
}

/// Render a raw value as zero-padded binary of the register's width
pub fn format_binary(raw: u64, width: u32) -> String {
    format!("{:0width$b}", raw, width = width as usize)
}

fn decode_as<T>(config: &InspectConfig) -> Result<Vec<FieldReading>>
where
    T: Storage + RegisterShape<Value = T>,
{
    let register = RegisterValue::<T>::new(T::from_u64_truncating(config.value()));
    tracing::debug!("Decoding {}-bit value {:#x}", T::BITS, register);

    config
        .fields()
        .iter()
        .map(|field| {
            let value = register
                .get_range(&field.range)
                .map_err(|source| field_error(field, source))?;
            tracing::debug!("Field {} ({}) = {:#x}", field.name, field.range, value);
            Ok(FieldReading {
                name: field.name.clone(),
                range: field.range,
                flag: field.flag,
                value,
            })
        })
        .collect()
}

fn encode_as<T>(config: &InspectConfig) -> Result<u64>
where
    T: Storage + RegisterShape<Value = T>,
{
    let mut register = RegisterValue::<T>::new(T::from_u64_truncating(config.value()));

    for assignment in config.assignments() {
        let field = config
            .field(&assignment.field)
            .ok_or_else(|| CliError::UnknownField(assignment.field.clone()))?;

        register
            .set_range(&field.range, assignment.value)
            .map_err(|source| field_error(field, source))?;
        tracing::debug!(
            "Set {} ({}) to {:#x}, register is now {:#x}",
            field.name,
            field.range,
            assignment.value,
            register
        );
    }

    Ok(register.raw().to_u64())
}

fn field_error(field: &FieldSpec, source: RegisterError) -> CliError {
    CliError::Field {
        name: field.name.clone(),
        source,
    }
}
