pub mod config;
pub mod demo;
pub mod error;
pub mod inspect;
pub mod layouts;

pub use config::{Assignment, FieldSpec, InspectConfig};
pub use error::{CliError, Result};
pub use layouts::{Layout, LayoutName};
