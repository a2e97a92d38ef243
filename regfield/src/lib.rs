//! # regfield
//!
//! Compile-time checked bit ranges and typed field access for hardware
//! registers.
//!
//! A register is described by its storage type (`u8` to `u64`) and a set of
//! fields, each a contiguous range of bits. Field masks, sizes and maximum
//! values are constants computed while compiling, and malformed ranges are
//! compile errors. At run time a [`RegisterValue`] reads and writes fields
//! without disturbing the bits around them.
//!
//! ## Usage
//!
//! ```
//! use regfield::{register_fields, BaseAddressRange, RegisterAddress, RegisterValue};
//!
//! type Peripheral = BaseAddressRange<0x0000_0000, 0x0000_1000>;
//! type Control = RegisterAddress<u32, Peripheral, 0x5>;
//!
//! register_fields! {
//!     Control => {
//!         pub flag Status = 0;
//!         pub field Mode = 1..=6;
//!         pub field Count = 7..=31;
//!     }
//! }
//!
//! let mut control = RegisterValue::<Control>::default();
//! control.set::<Status>(true)?;
//! control.set::<Mode>(29)?;
//! control.set_const::<Count, 6645>();
//!
//! assert!(control.get::<Status>());
//! assert_eq!(control.get::<Mode>(), 29);
//! assert_eq!(control.get::<Count>(), 6645);
//!
//! // Values that do not fit are refused rather than truncated.
//! assert!(control.set::<Mode>(64).is_err());
//! # Ok::<(), regfield::RegisterError>(())
//! ```

// Macros (must be first for visibility)
#[macro_use]
pub mod macros;

pub mod address;
pub mod error;
pub mod mask;
pub mod range;
pub mod register;
pub mod storage;
pub mod value;

pub use address::{AddressRange, BaseAddressRange, RegisterAddress};
pub use error::{RegisterError, Result};
pub use mask::{Mask, Shift};
pub use range::{
    Bit, Bits, Field, FieldKind, FieldLayout, FieldValue, Flag, Integer, RangeSpec, StorageOf,
};
pub use register::{Register, RegisterShape};
pub use storage::Storage;
pub use value::RegisterValue;
