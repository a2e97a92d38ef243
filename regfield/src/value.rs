//! In-memory register values and typed field access

use core::fmt;
use core::marker::PhantomData;

use crate::error::{RegisterError, Result};
use crate::range::{Field, FieldKind, FieldLayout, Flag, Integer, RangeSpec};
use crate::register::RegisterShape;
use crate::storage::Storage;

/// The raw value of one register of shape `R`.
///
/// Fields are read with [`get`](Self::get) and written with
/// [`set`](Self::set). A write clears the field's bits and then ORs in the
/// new value, so bits outside the field are never touched.
///
/// # Example
///
/// ```
/// use regfield::{Bit, Bits, RegisterValue};
///
/// type Status = Bit<u32, 0>;
/// type Low = Bits<u32, 1, 6>;
///
/// let mut value = RegisterValue::<u32>::default();
/// value.set::<Status>(true)?.set::<Low>(29)?;
///
/// assert!(value.get::<Status>());
/// assert_eq!(value.get::<Low>(), 29);
/// assert_eq!(value.raw(), (29 << 1) | 1);
///
/// // 64 does not fit in six bits; the register is left as it was.
/// assert!(value.set::<Low>(64).is_err());
/// assert_eq!(value.get::<Low>(), 29);
/// # Ok::<(), regfield::RegisterError>(())
/// ```
pub struct RegisterValue<R: RegisterShape> {
    raw: R::Value,
    shape: PhantomData<fn() -> R>,
}

impl<R: RegisterShape> RegisterValue<R> {
    pub fn new(raw: R::Value) -> Self {
        Self {
            raw,
            shape: PhantomData,
        }
    }

    pub fn raw(&self) -> R::Value {
        self.raw
    }

    pub fn raw_mut(&mut self) -> &mut R::Value {
        &mut self.raw
    }

    pub fn into_raw(self) -> R::Value {
        self.raw
    }

    /// Reads field `F`. Flag fields return `bool`, integer fields return the
    /// register's storage type.
    pub fn get<F>(&self) -> <F::Kind as FieldKind<R::Value>>::Value
    where
        F: Field<Register = R>,
    {
        <F::Kind as FieldKind<R::Value>>::decode(self.extract::<F>())
    }

    /// Reads integer field `F` narrowed to `U`.
    ///
    /// Narrowing keeps the low bits of the field; the caller picks a `U` wide
    /// enough for the field.
    pub fn get_as<F, U>(&self) -> U
    where
        F: Field<Register = R, Kind = Integer>,
        U: Storage,
    {
        U::from_u64_truncating(self.extract::<F>().to_u64())
    }

    /// Reads flag field `F`.
    pub fn flag<F>(&self) -> bool
    where
        F: Field<Register = R, Kind = Flag>,
    {
        self.extract::<F>() != R::Value::ZERO
    }

    /// Writes field `F`.
    ///
    /// Fails with [`RegisterError::OutOfRange`] when the value does not fit in
    /// the field. A failed write leaves the register unchanged.
    pub fn set<F>(&mut self, value: <F::Kind as FieldKind<R::Value>>::Value) -> Result<&mut Self>
    where
        F: Field<Register = R>,
    {
        let bits = <F::Kind as FieldKind<R::Value>>::encode(value);
        let max = <F as FieldLayout>::MAX;
        if bits.to_u64() > max {
            let field = F::label();
            tracing::debug!("Rejected write of {} to field {} (max {})", bits, field, max);
            return Err(RegisterError::OutOfRange {
                field,
                value: bits.to_u64(),
                max,
            });
        }
        self.insert::<F>(bits);
        Ok(self)
    }

    /// Writes a value known while compiling to integer field `F`.
    ///
    /// A `VALUE` larger than the field's maximum does not build.
    ///
    /// ```
    /// use regfield::{Bits, RegisterValue};
    ///
    /// let mut value = RegisterValue::<u32>::default();
    /// value.set_const::<Bits<u32, 7, 31>, 33554431>();
    /// assert_eq!(value.raw(), 0xFFFF_FF80);
    /// ```
    ///
    /// ```compile_fail
    /// use regfield::{Bits, RegisterValue};
    ///
    /// let mut value = RegisterValue::<u32>::default();
    /// value.set_const::<Bits<u32, 7, 31>, 33554432>();
    /// ```
    pub fn set_const<F, const VALUE: u64>(&mut self) -> &mut Self
    where
        F: Field<Register = R, Kind = Integer>,
    {
        const {
            assert!(VALUE <= <F as FieldLayout>::MAX, "value does not fit in the bit range");
        }
        self.insert::<F>(R::Value::from_u64_truncating(VALUE));
        self
    }

    /// Writes flag field `F`. Cannot fail.
    pub fn set_flag<F>(&mut self, on: bool) -> &mut Self
    where
        F: Field<Register = R, Kind = Flag>,
    {
        self.insert::<F>(<Flag as FieldKind<R::Value>>::encode(on));
        self
    }

    /// Reads a range validated at run time.
    pub fn get_range(&self, range: &RangeSpec) -> Result<u64> {
        self.check_width(range)?;
        Ok(range.extract(self.raw.to_u64()))
    }

    /// Writes a range validated at run time. Leaves the register unchanged on
    /// error.
    pub fn set_range(&mut self, range: &RangeSpec, value: u64) -> Result<&mut Self> {
        self.check_width(range)?;
        let raw = range.insert(self.raw.to_u64(), value)?;
        self.raw = R::Value::from_u64_truncating(raw);
        Ok(self)
    }

    fn check_width(&self, range: &RangeSpec) -> Result<()> {
        if range.width() != R::Value::BITS {
            return Err(RegisterError::WidthMismatch {
                expected: R::Value::BITS,
                found: range.width(),
            });
        }
        Ok(())
    }

    fn extract<F: Field<Register = R>>(&self) -> R::Value {
        let mask = R::Value::from_u64_truncating(<F as FieldLayout>::MASK);
        (self.raw & mask) >> F::LOWEST_BIT
    }

    fn insert<F: Field<Register = R>>(&mut self, bits: R::Value) {
        let mask = R::Value::from_u64_truncating(<F as FieldLayout>::MASK);
        self.raw &= !mask;
        self.raw |= (bits << F::LOWEST_BIT) & mask;
    }
}

impl<R: RegisterShape> Default for RegisterValue<R> {
    fn default() -> Self {
        Self::new(R::Value::ZERO)
    }
}

impl<R: RegisterShape> Clone for RegisterValue<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: RegisterShape> Copy for RegisterValue<R> {}

impl<R: RegisterShape> PartialEq for RegisterValue<R> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<R: RegisterShape> Eq for RegisterValue<R> {}

impl<R: RegisterShape> fmt::Debug for RegisterValue<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegisterValue({:#x})", self.raw)
    }
}

impl<R: RegisterShape> fmt::Binary for RegisterValue<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.raw, f)
    }
}

impl<R: RegisterShape> fmt::LowerHex for RegisterValue<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.raw, f)
    }
}

impl<R: RegisterShape> fmt::UpperHex for RegisterValue<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.raw, f)
    }
}
