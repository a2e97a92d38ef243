//! Properties that must hold for every range of every supported width.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use regfield::mask::{low_bits, shift_left};
use regfield::{Bit, Bits, Field, FieldLayout, Flag, Integer, RangeSpec, RegisterShape, RegisterValue, Storage, StorageOf};

fn range_for(width: u32, a: u8, b: u8) -> RangeSpec {
    let a = u32::from(a) % width;
    let b = u32::from(b) % width;
    RangeSpec::new(a.min(b), a.max(b), width).unwrap()
}

fn set_then_get<T>(raw: u64, a: u8, b: u8, value: u64) -> bool
where
    T: Storage + RegisterShape<Value = T>,
{
    let range = range_for(T::BITS, a, b);
    let value = value & range.max();

    let mut register = RegisterValue::<T>::new(T::from_u64_truncating(raw));
    let before = register.raw().to_u64();
    register.set_range(&range, value).unwrap();
    let after = register.raw().to_u64();

    register.get_range(&range).unwrap() == value && before & !range.mask() == after & !range.mask()
}

fn oversized_value_is_refused<T>(raw: u64, a: u8, b: u8, excess: u64) -> TestResult
where
    T: Storage + RegisterShape<Value = T>,
{
    let range = range_for(T::BITS, a, b);
    let Some(value) = range.max().checked_add(1 + excess % 1024) else {
        return TestResult::discard();
    };

    let mut register = RegisterValue::<T>::new(T::from_u64_truncating(raw));
    let before = register.raw();
    let refused = register.set_range(&range, value).is_err();

    TestResult::from_bool(refused && register.raw() == before)
}

fn disjoint_ranges_are_independent<T>(raw: u64, ranges: (u8, u8, u8, u8), value: u64) -> TestResult
where
    T: Storage + RegisterShape<Value = T>,
{
    let first = range_for(T::BITS, ranges.0, ranges.1);
    let second = range_for(T::BITS, ranges.2, ranges.3);
    if first.overlaps(&second) {
        return TestResult::discard();
    }

    let mut register = RegisterValue::<T>::new(T::from_u64_truncating(raw));
    let untouched = register.get_range(&second).unwrap();
    register.set_range(&first, value & first.max()).unwrap();

    TestResult::from_bool(register.get_range(&second).unwrap() == untouched)
}

fn typed_set_then_get<F>(raw: u64, value: u64) -> bool
where
    F: Field<Kind = Integer>,
{
    let mask = <F as FieldLayout>::MASK;
    let value = value & <F as FieldLayout>::MAX;

    let mut register = RegisterValue::<F::Register>::new(<StorageOf<F> as Storage>::from_u64_truncating(raw));
    let before = register.raw().to_u64();
    if register.set::<F>(<StorageOf<F> as Storage>::from_u64_truncating(value)).is_err() {
        return false;
    }
    let after = register.raw().to_u64();

    register.get::<F>().to_u64() == value && before & !mask == after & !mask
}

fn typed_oversized_value_is_refused<F>(raw: u64, excess: u64) -> TestResult
where
    F: Field<Kind = Integer>,
{
    let limit = <StorageOf<F> as Storage>::MAX.to_u64();
    let Some(value) = <F as FieldLayout>::MAX.checked_add(1 + excess % 1024) else {
        return TestResult::discard();
    };
    if value > limit {
        // Full-width fields have no unrepresentable value in their own storage.
        return TestResult::discard();
    }

    let mut register = RegisterValue::<F::Register>::new(<StorageOf<F> as Storage>::from_u64_truncating(raw));
    let before = register.raw();
    let refused = register.set::<F>(<StorageOf<F> as Storage>::from_u64_truncating(value)).is_err();

    TestResult::from_bool(refused && register.raw() == before)
}

fn typed_flag_round_trip<F>(raw: u64, on: bool) -> bool
where
    F: Field<Kind = Flag>,
{
    let mask = <F as FieldLayout>::MASK;

    let mut register = RegisterValue::<F::Register>::new(<StorageOf<F> as Storage>::from_u64_truncating(raw));
    let before = register.raw().to_u64();
    if register.set::<F>(on).is_err() {
        return false;
    }
    let after = register.raw().to_u64();

    register.get::<F>() == on && before & !mask == after & !mask
}

// Boundary and interior ranges for each width, exercised through the typed
// accessors so the read-modify-write happens in the register's own storage.
macro_rules! typed_field_properties {
    ($($module:ident: $ty:ty => [$(($lo:literal, $hi:literal)),+], flags [$($bit:literal),+];)+) => {
        $(
            mod $module {
                use super::*;

                #[quickcheck]
                fn prop_set_then_get(raw: u64, value: u64) -> bool {
                    true $(&& typed_set_then_get::<Bits<$ty, $lo, $hi>>(raw, value))+
                }

                #[quickcheck]
                fn prop_oversized_value_is_refused(raw: u64, excess: u64) -> bool {
                    $(
                        let result = typed_oversized_value_is_refused::<Bits<$ty, $lo, $hi>>(raw, excess);
                        if result.is_failure() {
                            return false;
                        }
                    )+
                    true
                }

                #[quickcheck]
                fn prop_flag_round_trip(raw: u64, on: bool) -> bool {
                    true $(&& typed_flag_round_trip::<Bit<$ty, $bit>>(raw, on))+
                }
            }
        )+
    };
}

typed_field_properties! {
    typed_u8: u8 => [(0, 0), (0, 7), (7, 7), (2, 5), (0, 6)], flags [0, 7];
    typed_u16: u16 => [(0, 0), (0, 15), (15, 15), (4, 11), (1, 15)], flags [0, 15];
    typed_u32: u32 => [(0, 0), (0, 31), (31, 31), (1, 6), (7, 31)], flags [0, 31];
    typed_u64: u64 => [(0, 0), (0, 63), (63, 63), (33, 33), (34, 63), (16, 47)], flags [0, 33, 63];
}

#[test]
fn test_typed_set_refuses_one_past_max() {
    let mut value = RegisterValue::<u8>::new(0xA5);
    assert!(value.set::<Bits<u8, 0, 6>>(0x80).is_err());
    assert!(value.set::<Bits<u8, 7, 7>>(2).is_err());
    assert_eq!(value.raw(), 0xA5);

    let mut value = RegisterValue::<u64>::new(u64::MAX);
    assert!(value.set::<Bits<u64, 34, 63>>(1 << 30).is_err());
    assert_eq!(value.raw(), u64::MAX);
}

#[test]
fn test_mask_has_exactly_size_low_bits() {
    for width in [8, 16, 32, 64] {
        for size in 0..=width {
            let mask = low_bits(size, width);
            assert_eq!(mask.count_ones(), size, "size {size} width {width}");
            assert_eq!(mask.trailing_ones(), size, "size {size} width {width}");
        }
    }
}

#[test]
fn test_range_mask_placement() {
    for width in [8u32, 16, 32, 64] {
        for lo in 0..width {
            for hi in lo..width {
                let range = RangeSpec::new(lo, hi, width).unwrap();
                let expected = (lo..=hi).fold(0u64, |mask, bit| mask | 1 << bit);
                assert_eq!(range.mask(), expected);
                assert_eq!(range.size(), hi - lo + 1);
                assert_eq!(range.max(), low_bits(hi - lo + 1, width));
            }
        }
    }
}

#[quickcheck]
fn prop_shift_matches_native_u8(value: u8, shift: u32) -> bool {
    let shift = shift % 8;
    shift_left(u64::from(value), shift, 8) == u64::from(value << shift)
}

#[quickcheck]
fn prop_shift_matches_native_u16(value: u16, shift: u32) -> bool {
    let shift = shift % 16;
    shift_left(u64::from(value), shift, 16) == u64::from(value << shift)
}

#[quickcheck]
fn prop_shift_matches_native_u32(value: u64, shift: u32) -> bool {
    let shift = shift % 32;
    shift_left(value, shift, 32) == u64::from((value as u32) << shift)
}

#[quickcheck]
fn prop_shift_matches_native_u64(value: u64, shift: u32) -> bool {
    let shift = shift % 64;
    shift_left(value, shift, 64) == value << shift
}

#[quickcheck]
fn prop_set_then_get_u8(raw: u64, a: u8, b: u8, value: u64) -> bool {
    set_then_get::<u8>(raw, a, b, value)
}

#[quickcheck]
fn prop_set_then_get_u16(raw: u64, a: u8, b: u8, value: u64) -> bool {
    set_then_get::<u16>(raw, a, b, value)
}

#[quickcheck]
fn prop_set_then_get_u32(raw: u64, a: u8, b: u8, value: u64) -> bool {
    set_then_get::<u32>(raw, a, b, value)
}

#[quickcheck]
fn prop_set_then_get_u64(raw: u64, a: u8, b: u8, value: u64) -> bool {
    set_then_get::<u64>(raw, a, b, value)
}

#[quickcheck]
fn prop_oversized_value_is_refused_u16(raw: u64, a: u8, b: u8, excess: u64) -> TestResult {
    oversized_value_is_refused::<u16>(raw, a, b, excess)
}

#[quickcheck]
fn prop_oversized_value_is_refused_u64(raw: u64, a: u8, b: u8, excess: u64) -> TestResult {
    oversized_value_is_refused::<u64>(raw, a, b, excess)
}

#[quickcheck]
fn prop_disjoint_ranges_are_independent_u32(raw: u64, ranges: (u8, u8, u8, u8), value: u64) -> TestResult {
    disjoint_ranges_are_independent::<u32>(raw, ranges, value)
}

#[quickcheck]
fn prop_disjoint_ranges_are_independent_u64(raw: u64, ranges: (u8, u8, u8, u8), value: u64) -> TestResult {
    disjoint_ranges_are_independent::<u64>(raw, ranges, value)
}
