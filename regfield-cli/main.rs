use anyhow::Context;
use clap::{Parser, Subcommand};

use regfield_cli::config::parse_number;
use regfield_cli::inspect::{decode, encode, format_binary};
use regfield_cli::{demo, InspectConfig, LayoutName};

#[derive(Parser, Debug)]
#[command(name = "regfield")]
#[command(about = "Inspect and build register values from bit field descriptions")]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(
        short,
        long,
        global = true,
        help = "Enable verbose logging (shows every register and field access)"
    )]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Program the demo register and print its fields
    Demo,

    /// Print the fields of a raw register value
    Decode {
        #[command(flatten)]
        register: RegisterArgs,
    },

    /// Store field values into a raw register value
    Encode {
        #[command(flatten)]
        register: RegisterArgs,

        #[arg(
            long = "set",
            help = "Field assignment NAME=VALUE, applied in order (flags accept true/false)",
            action = clap::ArgAction::Append
        )]
        assignments: Vec<String>,
    },

    /// List the built-in register layouts
    Layouts,
}

#[derive(clap::Args, Debug)]
struct RegisterArgs {
    #[arg(
        long,
        default_value_t = 32,
        help = "Register width in bits (8, 16, 32 or 64); ignored with --layout"
    )]
    width: u32,

    #[arg(
        long,
        default_value = "0",
        value_parser = parse_value,
        help = "Raw register value (decimal, 0x hex or 0b binary)"
    )]
    value: u64,

    #[arg(
        long = "field",
        help = "Field spec NAME=BIT for a flag or NAME=LO:HI for an integer field",
        action = clap::ArgAction::Append
    )]
    fields: Vec<String>,

    #[arg(long, value_enum, help = "Start from a built-in register layout")]
    layout: Option<LayoutName>,
}

impl RegisterArgs {
    fn into_config(self, assignments: &[String]) -> regfield_cli::Result<InspectConfig> {
        let (width, preset) = match self.layout {
            Some(name) => {
                let layout = name.layout();
                tracing::info!("Using layout {}: {}", name.name(), layout.description);
                (layout.width, layout.fields)
            }
            None => (self.width, Vec::new()),
        };

        InspectConfig::from_args(width, self.value, preset, &self.fields, assignments)
    }
}

fn parse_value(input: &str) -> Result<u64, String> {
    parse_number(input).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup logging based on verbose flag
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt().with_max_level(log_level).init();

    match args.command {
        Command::Demo => {
            let report = demo::run().context("demo run failed")?;
            println!("{report}");
        }
        Command::Decode { register } => {
            let config = register.into_config(&[])?;
            println!(
                "Raw value = {} ({:#x})",
                format_binary(config.value(), config.width()),
                config.value()
            );
            for reading in decode(&config)? {
                println!("{reading}");
            }
        }
        Command::Encode {
            register,
            assignments,
        } => {
            let config = register.into_config(&assignments)?;
            let raw = encode(&config)?;
            println!(
                "Raw value = {} ({:#x})",
                format_binary(raw, config.width()),
                raw
            );
        }
        Command::Layouts => {
            for name in LayoutName::all() {
                let layout = name.layout();
                let address = layout
                    .address
                    .map(|address| format!("{address:#x}"))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<12} {:>2}-bit  address {:<8} {}",
                    name.name(),
                    layout.width,
                    address,
                    layout.description
                );
                for field in &layout.fields {
                    let kind = if field.flag { "flag" } else { "integer" };
                    println!("    {:<16} {:<14} {}", field.name, field.range.to_string(), kind);
                }
            }
        }
    }

    Ok(())
}
