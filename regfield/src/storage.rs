//! Unsigned integer types that can hold a register value

use core::fmt::{Binary, Debug, Display, LowerHex, UpperHex};
use core::hash::Hash;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Shl, Shr};

mod sealed {
    pub trait Sealed {}
}

/// Storage type of a register: one of `u8`, `u16`, `u32` or `u64`.
///
/// All arithmetic on a register value happens in its storage type, so a shift
/// that moves bits past the top of the register drops them exactly as the
/// hardware would.
pub trait Storage:
    Copy
    + Debug
    + Default
    + Display
    + Binary
    + LowerHex
    + UpperHex
    + Eq
    + Ord
    + Hash
    + BitAnd<Output = Self>
    + BitAndAssign
    + BitOr<Output = Self>
    + BitOrAssign
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + sealed::Sealed
{
    /// Width of the type in bits.
    const BITS: u32;

    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;

    /// Widens the value to `u64`. Never loses bits.
    fn to_u64(self) -> u64;

    /// Narrows a `u64`, keeping only the low `Self::BITS` bits.
    fn from_u64_truncating(value: u64) -> Self;
}

macro_rules! impl_storage {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Storage for $ty {
                const BITS: u32 = <$ty>::BITS;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MAX: Self = <$ty>::MAX;

                #[inline]
                fn to_u64(self) -> u64 {
                    self as u64
                }

                #[inline]
                fn from_u64_truncating(value: u64) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_storage!(u8, u16, u32, u64);

/// Checks that `width` names one of the supported storage types.
pub const fn is_supported_width(width: u32) -> bool {
    matches!(width, 8 | 16 | 32 | 64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(<u8 as Storage>::BITS, 8);
        assert_eq!(<u16 as Storage>::BITS, 16);
        assert_eq!(<u32 as Storage>::BITS, 32);
        assert_eq!(<u64 as Storage>::BITS, 64);
    }

    #[test]
    fn test_truncating_narrowing() {
        assert_eq!(u8::from_u64_truncating(0x1FF), 0xFF);
        assert_eq!(u16::from_u64_truncating(0x1_2345), 0x2345);
        assert_eq!(u32::from_u64_truncating(u64::MAX), u32::MAX);
        assert_eq!(u64::from_u64_truncating(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_supported_widths() {
        for width in [8, 16, 32, 64] {
            assert!(is_supported_width(width));
        }
        assert!(!is_supported_width(0));
        assert!(!is_supported_width(24));
        assert!(!is_supported_width(128));
    }
}
