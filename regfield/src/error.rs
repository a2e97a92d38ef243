//! Errors reported when a field access is rejected at run time
//!
//! Ranges and literal values that are known while compiling are checked by
//! const evaluation instead and never reach these types.

use std::borrow::Cow;

pub type Result<T> = std::result::Result<T, RegisterError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    #[error("Value {value} does not fit in field {field} (max {max})")]
    OutOfRange {
        field: Cow<'static, str>,
        value: u64,
        max: u64,
    },

    #[error("Invalid bit range {lowest}..={highest} for a {width}-bit register")]
    InvalidRange { lowest: u32, highest: u32, width: u32 },

    #[error("Unsupported register width: {0} bits")]
    UnsupportedWidth(u32),

    #[error("Bit range was declared for a {found}-bit register, not {expected}-bit")]
    WidthMismatch { expected: u32, found: u32 },
}
