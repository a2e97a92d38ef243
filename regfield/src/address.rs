//! Register address bookkeeping
//!
//! A block of registers occupies a base address range; each register sits at
//! a fixed offset inside it. Both are checked while compiling.

use core::marker::PhantomData;

use crate::register::RegisterShape;
use crate::storage::Storage;

/// A half-open range of addresses `[BEGIN, END)` assigned to one block of
/// registers.
pub trait AddressRange {
    const BEGIN: u64;
    const END: u64;

    /// Number of addresses in the range.
    const SIZE: u64 = Self::END - Self::BEGIN;
}

/// Base address range `[START, STOP)`.
///
/// ```
/// use regfield::{AddressRange, BaseAddressRange};
///
/// type Peripheral = BaseAddressRange<0x4000_0000, 0x4000_1000>;
/// assert_eq!(Peripheral::SIZE, 0x1000);
/// ```
///
/// ```compile_fail
/// use regfield::{AddressRange, BaseAddressRange};
///
/// let _ = BaseAddressRange::<0x1000, 0x1000>::SIZE;
/// ```
pub struct BaseAddressRange<const START: u64, const STOP: u64>;

impl<const START: u64, const STOP: u64> AddressRange for BaseAddressRange<START, STOP> {
    const BEGIN: u64 = {
        assert!(START < STOP, "address range is malformed");
        START
    };
    const END: u64 = STOP;
}

/// A register of storage type `T` at offset `AT` within base range `B`.
///
/// ```
/// use regfield::{BaseAddressRange, RegisterAddress, RegisterShape};
///
/// type Block = BaseAddressRange<0x0000, 0x1000>;
/// type Status = RegisterAddress<u32, Block, 0x5>;
///
/// assert_eq!(Status::ADDRESS, 0x5);
/// assert_eq!(Status::SIZE, 4);
/// assert_eq!(<Status as RegisterShape>::LOCATION, Some(0x5));
/// ```
///
/// ```compile_fail
/// use regfield::{BaseAddressRange, RegisterAddress};
///
/// type Block = BaseAddressRange<0x0000, 0x1000>;
/// let _ = RegisterAddress::<u32, Block, 0x1000>::ADDRESS;
/// ```
pub struct RegisterAddress<T, B, const AT: u64>(PhantomData<(T, B)>);

impl<T: Storage, B: AddressRange, const AT: u64> RegisterAddress<T, B, AT> {
    /// Start of the base range.
    pub const BASE: u64 = B::BEGIN;

    /// Offset from the start of the base range.
    pub const OFFSET: u64 = AT;

    /// Absolute address of the register.
    pub const ADDRESS: u64 = match B::BEGIN.checked_add(AT) {
        Some(address) => {
            assert!(
                address < B::END,
                "register address is outside of its base range"
            );
            address
        }
        None => panic!("register address overflows the address space"),
    };

    /// Size of the register in bytes.
    pub const SIZE: usize = (T::BITS / 8) as usize;
}

impl<T: Storage, B: AddressRange, const AT: u64> RegisterShape for RegisterAddress<T, B, AT> {
    type Value = T;

    const LOCATION: Option<u64> = Some(Self::ADDRESS);
}

#[cfg(test)]
mod tests {
    use super::*;

    type Block = BaseAddressRange<0x4000_0000, 0x4000_1000>;
    type First = RegisterAddress<u32, Block, 0x0>;
    type Last = RegisterAddress<u8, Block, 0xFFF>;
    type Wide = RegisterAddress<u64, Block, 0x10>;

    #[test]
    fn test_base_range() {
        assert_eq!(Block::BEGIN, 0x4000_0000);
        assert_eq!(Block::END, 0x4000_1000);
        assert_eq!(Block::SIZE, 0x1000);
    }

    #[test]
    fn test_register_addresses() {
        assert_eq!(First::BASE, 0x4000_0000);
        assert_eq!(First::OFFSET, 0);
        assert_eq!(First::ADDRESS, 0x4000_0000);
        assert_eq!(Last::ADDRESS, 0x4000_0FFF);
        assert_eq!(Wide::ADDRESS, 0x4000_0010);
    }

    #[test]
    fn test_register_sizes() {
        assert_eq!(First::SIZE, 4);
        assert_eq!(Last::SIZE, 1);
        assert_eq!(Wide::SIZE, 8);
    }

    #[test]
    fn test_shape_location() {
        assert_eq!(<Wide as RegisterShape>::LOCATION, Some(0x4000_0010));
    }
}
