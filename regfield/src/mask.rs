//! Mask generation and mask placement
//!
//! Everything here is a `const fn`, so masks for declared fields are computed
//! while compiling. A violated precondition panics during const evaluation,
//! which turns the declaration into a compile error instead of a wrong mask.
//!
//! Values are carried as `u64`, the widest supported storage type, and are
//! always truncated to the register width so the result is the same as doing
//! the arithmetic in the register's own storage type.

use core::marker::PhantomData;

use crate::storage::Storage;

/// Widest register supported, in bits.
pub const MAX_WIDTH: u32 = u64::BITS;

/// Value with the low `size` bits set, or `None` if `size` exceeds `width`.
pub const fn checked_low_bits(size: u32, width: u32) -> Option<u64> {
    if width > MAX_WIDTH || size > width {
        return None;
    }
    if size == 0 {
        Some(0)
    } else {
        // Shifting right keeps the full-width case away from a shift by 64.
        Some(u64::MAX >> (MAX_WIDTH - size))
    }
}

/// Value with the low `size` bits set.
///
/// # Panics
///
/// Panics if `size > width` or `width` is wider than [`MAX_WIDTH`]. In a
/// const context this is a compile error.
pub const fn low_bits(size: u32, width: u32) -> u64 {
    match checked_low_bits(size, width) {
        Some(mask) => mask,
        None => panic!("mask size exceeds register width"),
    }
}

/// `value << shift` computed in a `width`-bit register, or `None` if `shift`
/// is not smaller than `width`.
pub const fn checked_shift_left(value: u64, shift: u32, width: u32) -> Option<u64> {
    if width > MAX_WIDTH || shift >= width {
        return None;
    }
    let register = low_bits(width, width);
    Some(((value & register) << shift) & register)
}

/// `value << shift` computed in a `width`-bit register. Bits shifted past the
/// top of the register are dropped.
///
/// # Panics
///
/// Panics if `shift >= width`. In a const context this is a compile error.
pub const fn shift_left(value: u64, shift: u32, width: u32) -> u64 {
    match checked_shift_left(value, shift, width) {
        Some(shifted) => shifted,
        None => panic!("shift exceeds register width"),
    }
}

/// Compile-time mask with the low `SIZE` bits of `T` set.
///
/// ```
/// use regfield::Mask;
///
/// assert_eq!(Mask::<u32, 20>::RAW, 0xF_FFFF);
/// assert_eq!(Mask::<u64, 64>::value(), u64::MAX);
/// ```
///
/// A mask wider than its storage type does not build:
///
/// ```compile_fail
/// use regfield::Mask;
///
/// let _ = Mask::<u16, 17>::RAW;
/// ```
pub struct Mask<T, const SIZE: u32>(PhantomData<T>);

impl<T: Storage, const SIZE: u32> Mask<T, SIZE> {
    /// The mask widened to `u64`.
    pub const RAW: u64 = low_bits(SIZE, T::BITS);

    /// The mask in the storage type.
    #[inline]
    pub fn value() -> T {
        T::from_u64_truncating(Self::RAW)
    }
}

/// Compile-time `VALUE << SHIFT` in storage type `T`.
///
/// ```
/// use regfield::Shift;
///
/// assert_eq!(Shift::<u64, 1, 33>::RAW, 1 << 33);
/// assert_eq!(Shift::<u8, 0xFF, 4>::value(), 0xF0);
/// ```
///
/// ```compile_fail
/// use regfield::Shift;
///
/// let _ = Shift::<u32, 1, 32>::RAW;
/// ```
pub struct Shift<T, const VALUE: u64, const SHIFT: u32>(PhantomData<T>);

impl<T: Storage, const VALUE: u64, const SHIFT: u32> Shift<T, VALUE, SHIFT> {
    /// The shifted value widened to `u64`.
    pub const RAW: u64 = shift_left(VALUE, SHIFT, T::BITS);

    /// The shifted value in the storage type.
    #[inline]
    pub fn value() -> T {
        T::from_u64_truncating(Self::RAW)
    }
}
