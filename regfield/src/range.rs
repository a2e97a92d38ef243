//! Bit ranges within a register
//!
//! A field is a contiguous run of bits `[LOWEST_BIT, HIGHEST_BIT]` inside a
//! register shape. Fields are declared as types implementing [`Field`], so
//! their mask, size and maximum value are constants computed and validated
//! while compiling. [`RangeSpec`] carries the same information for ranges that
//! are only known at run time.
//!
//! Whether a field reads as an integer or as a `bool` is decided by its
//! [`Field::Kind`], never by its width: `Bits<R, 3, 3>` is a one-bit integer
//! field, `Bit<R, 3>` is a flag.

use core::fmt;
use core::marker::PhantomData;
use std::borrow::Cow;

use crate::error::{RegisterError, Result};
use crate::mask::{low_bits, shift_left};
use crate::register::RegisterShape;
use crate::storage::{is_supported_width, Storage};

mod sealed {
    pub trait Sealed {}
    pub trait SealedLayout {}
}

/// Number of bits in `[lowest, highest]`, asserting the range fits a
/// `width`-bit register.
///
/// # Panics
///
/// Panics if either bound lies outside the register or the bounds are out of
/// order. In a const context this is a compile error.
pub const fn range_size(lowest: u32, highest: u32, width: u32) -> u32 {
    assert!(
        lowest < width,
        "first bit of bit range is outside the register"
    );
    assert!(
        highest < width,
        "last bit of bit range is outside the register"
    );
    assert!(lowest <= highest, "bit range is out of order");
    highest - lowest + 1
}

/// Mask with bits `lowest..=highest` set.
pub const fn range_mask(lowest: u32, highest: u32, width: u32) -> u64 {
    shift_left(low_bits(range_size(lowest, highest, width), width), lowest, width)
}

/// Largest value representable in `[lowest, highest]`.
pub const fn range_max(lowest: u32, highest: u32, width: u32) -> u64 {
    low_bits(range_size(lowest, highest, width), width)
}

/// How the bits of a field are presented to callers.
pub trait FieldKind<T: Storage>: sealed::Sealed {
    /// Type produced by `get` and accepted by `set`.
    type Value: Copy + fmt::Debug;

    /// Set when fields of this kind must be exactly one bit wide.
    const SINGLE_BIT: bool;

    /// Converts field bits, already shifted down to bit 0, to a value.
    fn decode(bits: T) -> Self::Value;

    /// Converts a value to field bits starting at bit 0. The result may exceed
    /// the field's maximum; callers check before writing.
    fn encode(value: Self::Value) -> T;
}

/// Field kind for unsigned integer fields of any width, including width 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integer {}

/// Field kind for single-bit fields read and written as `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {}

impl sealed::Sealed for Integer {}
impl sealed::Sealed for Flag {}

impl<T: Storage> FieldKind<T> for Integer {
    type Value = T;
    const SINGLE_BIT: bool = false;

    #[inline]
    fn decode(bits: T) -> T {
        bits
    }

    #[inline]
    fn encode(value: T) -> T {
        value
    }
}

impl<T: Storage> FieldKind<T> for Flag {
    type Value = bool;
    const SINGLE_BIT: bool = true;

    #[inline]
    fn decode(bits: T) -> bool {
        bits != T::ZERO
    }

    #[inline]
    fn encode(value: bool) -> T {
        if value {
            T::ONE
        } else {
            T::ZERO
        }
    }
}

/// Storage type of the register a field belongs to.
pub type StorageOf<F> = <<F as Field>::Register as RegisterShape>::Value;

/// Value type produced and accepted by a field.
pub type FieldValue<F> = <<F as Field>::Kind as FieldKind<StorageOf<F>>>::Value;

/// A named range of bits inside a register shape.
///
/// Implementors provide the register, the kind and the bounds. Size, mask and
/// maximum are derived by [`FieldLayout`], which cannot be implemented or
/// overridden outside this crate. Evaluating them for a malformed range fails
/// to compile, and every accessor evaluates them.
///
/// ```compile_fail
/// use regfield::{Bits, RegisterValue};
///
/// // Bit 32 does not exist in a u32.
/// let value = RegisterValue::<u32>::new(0);
/// let _ = value.get::<Bits<u32, 7, 32>>();
/// ```
///
/// ```compile_fail
/// use regfield::{Bits, RegisterValue};
///
/// // Bounds out of order.
/// let value = RegisterValue::<u32>::new(0);
/// let _ = value.get::<Bits<u32, 6, 1>>();
/// ```
///
/// ```compile_fail
/// use regfield::{Field, Flag, RegisterValue};
///
/// // A flag spanning four bits.
/// struct WideFlag;
///
/// impl Field for WideFlag {
///     type Register = u32;
///     type Kind = Flag;
///     const NAME: &'static str = "WideFlag";
///     const LOWEST_BIT: u32 = 0;
///     const HIGHEST_BIT: u32 = 3;
/// }
///
/// let value = RegisterValue::<u32>::new(0b0100);
/// let _ = value.get::<WideFlag>();
/// ```
pub trait Field {
    type Register: RegisterShape;
    type Kind: FieldKind<<Self::Register as RegisterShape>::Value>;

    /// Name used in error messages.
    const NAME: &'static str;

    const LOWEST_BIT: u32;
    const HIGHEST_BIT: u32;

    /// Label used when a write to this field is refused.
    fn label() -> Cow<'static, str> {
        Cow::Borrowed(Self::NAME)
    }
}

/// Constants derived from a [`Field`]'s bounds.
///
/// Implemented for every field by a blanket impl, so the values always follow
/// from `LOWEST_BIT`, `HIGHEST_BIT` and the register width.
///
/// ```compile_fail
/// use regfield::{Field, FieldLayout, Integer};
///
/// struct Widened;
///
/// impl Field for Widened {
///     type Register = u32;
///     type Kind = Integer;
///     const NAME: &'static str = "Widened";
///     const LOWEST_BIT: u32 = 1;
///     const HIGHEST_BIT: u32 = 6;
/// }
///
/// impl FieldLayout for Widened {
///     const WIDTH: u32 = 32;
///     const SIZE: u32 = 32;
///     const MASK: u64 = 0xFFFF_FFFF;
///     const MAX: u64 = 0xFFFF_FFFF;
/// }
/// ```
pub trait FieldLayout: Field + sealed::SealedLayout {
    /// Width of the owning register in bits.
    const WIDTH: u32;

    /// Number of bits in the field.
    const SIZE: u32;

    /// Mask selecting the field's bits in place.
    const MASK: u64;

    /// Largest value the field can hold.
    const MAX: u64;
}

impl<F: Field> sealed::SealedLayout for F {}

impl<F: Field> FieldLayout for F {
    const WIDTH: u32 = <StorageOf<F> as Storage>::BITS;

    const SIZE: u32 = {
        let size = range_size(F::LOWEST_BIT, F::HIGHEST_BIT, Self::WIDTH);
        assert!(
            size == 1 || !<F::Kind as FieldKind<StorageOf<F>>>::SINGLE_BIT,
            "flag fields must be exactly one bit wide"
        );
        size
    };

    const MASK: u64 = shift_left(low_bits(Self::SIZE, Self::WIDTH), F::LOWEST_BIT, Self::WIDTH);

    const MAX: u64 = low_bits(Self::SIZE, Self::WIDTH);
}

/// Integer field covering bits `LO..=HI` of register shape `R`.
pub struct Bits<R, const LO: u32, const HI: u32>(PhantomData<R>);

impl<R: RegisterShape, const LO: u32, const HI: u32> Field for Bits<R, LO, HI> {
    type Register = R;
    type Kind = Integer;

    const NAME: &'static str = "Bits";
    const LOWEST_BIT: u32 = LO;
    const HIGHEST_BIT: u32 = HI;

    fn label() -> Cow<'static, str> {
        Cow::Owned(format!("bits {LO}..={HI}"))
    }
}

/// Flag field at bit `BIT` of register shape `R`.
pub struct Bit<R, const BIT: u32>(PhantomData<R>);

impl<R: RegisterShape, const BIT: u32> Field for Bit<R, BIT> {
    type Register = R;
    type Kind = Flag;

    const NAME: &'static str = "Bit";
    const LOWEST_BIT: u32 = BIT;
    const HIGHEST_BIT: u32 = BIT;

    fn label() -> Cow<'static, str> {
        Cow::Owned(format!("bit {BIT}"))
    }
}

/// A bit range validated at run time.
///
/// Used where field positions come from input rather than from declarations.
/// Bounds are checked once by [`RangeSpec::new`]; every accessor can then rely
/// on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeSpec {
    lowest: u32,
    highest: u32,
    width: u32,
}

impl RangeSpec {
    /// Creates a range covering `lowest..=highest` of a `width`-bit register.
    pub fn new(lowest: u32, highest: u32, width: u32) -> Result<Self> {
        if !is_supported_width(width) {
            return Err(RegisterError::UnsupportedWidth(width));
        }
        if lowest > highest || highest >= width {
            return Err(RegisterError::InvalidRange {
                lowest,
                highest,
                width,
            });
        }
        Ok(Self {
            lowest,
            highest,
            width,
        })
    }

    /// Creates a single-bit range.
    pub fn single(bit: u32, width: u32) -> Result<Self> {
        Self::new(bit, bit, width)
    }

    /// The range covered by a declared field.
    pub fn of<F: Field>() -> Self {
        // Evaluating the mask runs the field's range checks.
        let _ = <F as FieldLayout>::MASK;
        Self {
            lowest: F::LOWEST_BIT,
            highest: F::HIGHEST_BIT,
            width: <F as FieldLayout>::WIDTH,
        }
    }

    pub fn lowest(&self) -> u32 {
        self.lowest
    }

    pub fn highest(&self) -> u32 {
        self.highest
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn size(&self) -> u32 {
        self.highest - self.lowest + 1
    }

    pub fn is_single_bit(&self) -> bool {
        self.lowest == self.highest
    }

    pub fn mask(&self) -> u64 {
        shift_left(low_bits(self.size(), self.width), self.lowest, self.width)
    }

    pub fn max(&self) -> u64 {
        low_bits(self.size(), self.width)
    }

    /// Whether the two ranges share at least one bit.
    pub fn overlaps(&self, other: &RangeSpec) -> bool {
        self.lowest <= other.highest && other.lowest <= self.highest
    }

    /// Reads this range out of a raw register value.
    pub fn extract(&self, raw: u64) -> u64 {
        (raw & self.mask()) >> self.lowest
    }

    /// Returns `raw` with this range replaced by `value`. Bits outside the
    /// range are left as they were.
    pub fn insert(&self, raw: u64, value: u64) -> Result<u64> {
        if value > self.max() {
            return Err(RegisterError::OutOfRange {
                field: self.to_string().into(),
                value,
                max: self.max(),
            });
        }
        let mask = self.mask();
        Ok((raw & !mask) | ((value << self.lowest) & mask))
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_bit() {
            write!(f, "bit {}", self.lowest)
        } else {
            write!(f, "bits {}..={}", self.lowest, self.highest)
        }
    }
}
