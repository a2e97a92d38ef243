//! Declarative macros for describing register layouts

/// Declare the fields of a register shape
///
/// Each entry becomes a zero-sized type implementing [`Field`](crate::Field).
/// `flag` entries read and write `bool`; `field` entries read and write the
/// register's storage type, even when they are one bit wide. The field's name
/// is used in error messages.
///
/// Every range is validated where it is declared: a malformed range does not
/// build, whether or not the field is used.
///
/// # Example
/// ```
/// use regfield::{register_fields, RegisterValue};
///
/// register_fields! {
///     u32 => {
///         /// Set while the unit is busy
///         pub flag Busy = 0;
///         pub field Prescaler = 1..=6;
///         pub field Reload = 7..=31;
///     }
/// }
///
/// let mut value = RegisterValue::<u32>::default();
/// value.set::<Busy>(true)?;
/// value.set::<Prescaler>(29)?;
///
/// assert!(value.get::<Busy>());
/// assert_eq!(value.get::<Prescaler>(), 29);
///
/// let err = value.set::<Reload>(1 << 25).unwrap_err();
/// assert_eq!(err.to_string(), "Value 33554432 does not fit in field Reload (max 33554431)");
/// # Ok::<(), regfield::RegisterError>(())
/// ```
///
/// ```compile_fail
/// regfield::register_fields! {
///     u16 => {
///         field TooHigh = 8..=16;
///     }
/// }
/// ```
#[macro_export]
macro_rules! register_fields {
    (@field $register:ty;) => {};

    (
        @field $register:ty;
        $(#[$meta:meta])*
        $vis:vis flag $name:ident = $bit:literal;
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Field for $name {
            type Register = $register;
            type Kind = $crate::Flag;

            const NAME: &'static str = stringify!($name);
            const LOWEST_BIT: u32 = $bit;
            const HIGHEST_BIT: u32 = $bit;
        }

        const _: u64 = <$name as $crate::FieldLayout>::MASK;

        $crate::register_fields!(@field $register; $($rest)*);
    };

    (
        @field $register:ty;
        $(#[$meta:meta])*
        $vis:vis field $name:ident = $lo:literal ..= $hi:literal;
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Field for $name {
            type Register = $register;
            type Kind = $crate::Integer;

            const NAME: &'static str = stringify!($name);
            const LOWEST_BIT: u32 = $lo;
            const HIGHEST_BIT: u32 = $hi;
        }

        const _: u64 = <$name as $crate::FieldLayout>::MASK;

        $crate::register_fields!(@field $register; $($rest)*);
    };

    ($register:ty => { $($body:tt)* }) => {
        $crate::register_fields!(@field $register; $($body)*);
    };
}
