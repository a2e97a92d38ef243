//! Built-in register layouts
//!
//! Each layout is declared with `register_fields!`, so its ranges are checked
//! while compiling, and then converted to runtime [`FieldSpec`]s for the
//! inspection commands.

use regfield::{register_fields, BaseAddressRange, RegisterAddress, RegisterShape, Storage};

use crate::config::FieldSpec;

/// Demo register block
pub type DemoBlock = BaseAddressRange<0x0000_0000, 0x0000_1000>;

/// Demo register: a 32-bit register at offset 5 of the demo block
pub type DemoRegister = RegisterAddress<u32, DemoBlock, 0x0000_0005>;

register_fields! {
    DemoRegister => {
        pub flag Status = 0;
        pub field TestRange1 = 1..=6;
        pub field TestRange2 = 7..=31;
    }
}

/// Model-specific register space
pub type MsrSpace = BaseAddressRange<0x0000_0000, 0x1_0000_0000>;

/// Core Performance Event Select register 0 (IA32_PERFEVTSEL0)
///
/// ## Register Format
///
/// | Bits   | Field        | Description                    |
/// |--------|--------------|--------------------------------|
/// | 0-7    | EventSelect  | Event select                   |
/// | 8-15   | Umask        | Unit mask                      |
/// | 16     | Usr          | User mode                      |
/// | 17     | Os           | OS mode                        |
/// | 18     | Edge         | Edge detect                    |
/// | 19     | Pc           | Pin control                    |
/// | 20     | Int          | APIC interrupt enable          |
/// | 21     | AnyThread    | Any thread                     |
/// | 22     | Enable       | Enable counter                 |
/// | 23     | Invert       | Invert counter mask            |
/// | 24-31  | Cmask        | Counter mask                   |
pub type PerfEvtSel0 = RegisterAddress<u64, MsrSpace, 0x186>;

pub mod perfevtsel {
    use super::PerfEvtSel0;
    use regfield::register_fields;

    register_fields! {
        PerfEvtSel0 => {
            pub field EventSelect = 0..=7;
            pub field Umask = 8..=15;
            pub flag Usr = 16;
            pub flag Os = 17;
            pub flag Edge = 18;
            pub flag Pc = 19;
            pub flag Int = 20;
            pub flag AnyThread = 21;
            pub flag Enable = 22;
            pub flag Invert = 23;
            pub field Cmask = 24..=31;
        }
    }
}

/// Names of the built-in layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LayoutName {
    Demo,
    Perfevtsel,
}

/// A register layout usable by the inspection commands
#[derive(Debug, Clone)]
pub struct Layout {
    pub name: LayoutName,
    pub description: &'static str,
    pub width: u32,
    pub address: Option<u64>,
    pub fields: Vec<FieldSpec>,
}

impl LayoutName {
    pub fn all() -> Vec<LayoutName> {
        vec![LayoutName::Demo, LayoutName::Perfevtsel]
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayoutName::Demo => "demo",
            LayoutName::Perfevtsel => "perfevtsel",
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            LayoutName::Demo => Layout {
                name: *self,
                description: "Demo register with a status bit and two integer fields",
                width: <<DemoRegister as RegisterShape>::Value as Storage>::BITS,
                address: DemoRegister::LOCATION,
                fields: vec![
                    FieldSpec::of::<Status>(),
                    FieldSpec::of::<TestRange1>(),
                    FieldSpec::of::<TestRange2>(),
                ],
            },
            LayoutName::Perfevtsel => {
                use perfevtsel::*;
                Layout {
                    name: *self,
                    description: "Core Performance Event Select (IA32_PERFEVTSEL0)",
                    width: <<PerfEvtSel0 as RegisterShape>::Value as Storage>::BITS,
                    address: PerfEvtSel0::LOCATION,
                    fields: vec![
                        FieldSpec::of::<EventSelect>(),
                        FieldSpec::of::<Umask>(),
                        FieldSpec::of::<Usr>(),
                        FieldSpec::of::<Os>(),
                        FieldSpec::of::<Edge>(),
                        FieldSpec::of::<Pc>(),
                        FieldSpec::of::<Int>(),
                        FieldSpec::of::<AnyThread>(),
                        FieldSpec::of::<Enable>(),
                        FieldSpec::of::<Invert>(),
                        FieldSpec::of::<Cmask>(),
                    ],
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regfield::RegisterValue;

    #[test]
    fn test_demo_layout() {
        let layout = LayoutName::Demo.layout();
        assert_eq!(layout.width, 32);
        assert_eq!(layout.address, Some(0x5));

        let names: Vec<_> = layout.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Status", "TestRange1", "TestRange2"]);
        assert!(layout.fields[0].flag);
        assert!(!layout.fields[1].flag);
        assert_eq!(layout.fields[2].range.max(), 33_554_431);
    }

    #[test]
    fn test_perfevtsel_layout_has_no_overlaps() {
        let layout = LayoutName::Perfevtsel.layout();
        assert_eq!(layout.width, 64);
        assert_eq!(layout.address, Some(0x186));

        for (i, first) in layout.fields.iter().enumerate() {
            for second in &layout.fields[i + 1..] {
                assert!(
                    !first.range.overlaps(&second.range),
                    "{} overlaps {}",
                    first.name,
                    second.name
                );
            }
        }
    }

    #[test]
    fn test_perfevtsel_fields() {
        use perfevtsel::*;

        let mut evtsel = RegisterValue::<PerfEvtSel0>::default();
        evtsel.set::<EventSelect>(0x3C).unwrap();
        evtsel.set_flag::<Usr>(true);
        evtsel.set_flag::<Os>(true);
        evtsel.set_flag::<Enable>(true);

        assert_eq!(evtsel.raw(), 0x3C | 1 << 16 | 1 << 17 | 1 << 22);
        assert_eq!(evtsel.get::<Umask>(), 0);
        assert!(!evtsel.get::<AnyThread>());
        assert!(evtsel.set::<Cmask>(0x100).is_err());
    }

    #[test]
    fn test_layout_names() {
        for name in LayoutName::all() {
            assert_eq!(name.layout().name, name);
        }
        assert_eq!(LayoutName::Perfevtsel.name(), "perfevtsel");
    }
}
