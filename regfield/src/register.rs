//! Register shapes and registers bound to a reader/writer pair

use core::ops::{Deref, DerefMut};

use crate::storage::Storage;
use crate::value::RegisterValue;

/// Describes a kind of register: the storage type holding its value and,
/// optionally, where it lives.
///
/// Every storage type is a shape on its own, so `u32` can be used directly
/// for an unaddressed 32-bit register. [`RegisterAddress`](crate::RegisterAddress)
/// is a shape that also carries an address.
///
/// # Example
///
/// ```
/// use regfield::RegisterShape;
///
/// struct ControlRegister;
///
/// impl RegisterShape for ControlRegister {
///     type Value = u16;
/// }
///
/// assert_eq!(ControlRegister::LOCATION, None);
/// ```
pub trait RegisterShape {
    /// The storage type of the register's value.
    type Value: Storage;

    /// Address of the register, for shapes that have one.
    const LOCATION: Option<u64> = None;
}

macro_rules! impl_register_shape {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RegisterShape for $ty {
                type Value = $ty;
            }
        )*
    };
}

impl_register_shape!(u8, u16, u32, u64);

/// A register value bound to functions that read and write the real
/// register.
///
/// The cached value is only exchanged with the outside world by
/// [`read`](Self::read) and [`write`](Self::write); field accesses through
/// `Deref` work on the cache.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use regfield::{Bits, Register};
///
/// let hardware = Cell::new(0x0000_00F0u32);
/// let mut register = Register::<u32, _, _>::new(|| hardware.get(), |raw| hardware.set(raw));
///
/// register.read();
/// register.set::<Bits<u32, 0, 3>>(0xA)?;
/// register.write();
///
/// assert_eq!(hardware.get(), 0x0000_00FA);
/// # Ok::<(), regfield::RegisterError>(())
/// ```
pub struct Register<R, Rd, Wr>
where
    R: RegisterShape,
{
    value: RegisterValue<R>,
    reader: Rd,
    writer: Wr,
}

impl<R, Rd, Wr> Register<R, Rd, Wr>
where
    R: RegisterShape,
    Rd: FnMut() -> R::Value,
    Wr: FnMut(R::Value),
{
    /// Create a register whose cached value starts at zero
    pub fn new(reader: Rd, writer: Wr) -> Self {
        Self::with_initial(reader, writer, R::Value::ZERO)
    }

    /// Create a register with a given cached value
    pub fn with_initial(reader: Rd, writer: Wr, initial: R::Value) -> Self {
        Self {
            value: RegisterValue::new(initial),
            reader,
            writer,
        }
    }

    /// Replace the cached value with the register's current contents
    pub fn read(&mut self) -> &mut Self {
        let raw = (self.reader)();
        tracing::debug!("Register read: {} = {:#x}", Location(R::LOCATION), raw);
        *self.value.raw_mut() = raw;
        self
    }

    /// Push the cached value to the register
    pub fn write(&mut self) -> &mut Self {
        let raw = self.value.raw();
        tracing::debug!("Register write: {} = {:#x}", Location(R::LOCATION), raw);
        (self.writer)(raw);
        self
    }

    /// Replace the cached value and push it to the register
    pub fn write_value(&mut self, raw: R::Value) -> &mut Self {
        *self.value.raw_mut() = raw;
        self.write()
    }

    /// The cached value
    pub fn value(&self) -> &RegisterValue<R> {
        &self.value
    }
}

impl<R: RegisterShape, Rd, Wr> Deref for Register<R, Rd, Wr> {
    type Target = RegisterValue<R>;

    fn deref(&self) -> &RegisterValue<R> {
        &self.value
    }
}

impl<R: RegisterShape, Rd, Wr> DerefMut for Register<R, Rd, Wr> {
    fn deref_mut(&mut self) -> &mut RegisterValue<R> {
        &mut self.value
    }
}

struct Location(Option<u64>);

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            Some(address) => write!(f, "0x{address:X}"),
            None => f.write_str("<unaddressed>"),
        }
    }
}
