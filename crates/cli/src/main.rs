//! Gen-ISA register region decoder CLI.
//!
//! This binary exposes the decoder from the command line. It provides:
//! 1. **Addresses:** Print every channel's register and byte offsets (text or JSON).
//! 2. **Map:** Render the register byte occupancy grid of a region.
//! 3. **Info:** Show the normalized fields of a descriptor.

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use genreg_core::addressing::{Address, RegisterMap, generate_with};
use genreg_core::config::{Config, GeneratorConfig, PartitionPolicy};
use genreg_core::isa::{RegisterRegion, parse_region};

#[derive(Parser, Debug)]
#[command(
    name = "genreg",
    author,
    version,
    about = "Decode Gen-ISA register regions into per-channel addresses",
    long_about = "Decode Gen-ISA register region descriptors into the register and byte offsets each SIMD channel touches.\n\nExamples:\n  genreg addresses 'r4.1<16;8,2>:w' --simd 16\n  genreg addresses 'r6.3<0;1,0>:f' --simd 1 --format json\n  genreg map 'r1.7<16;8,1>:b' --simd 16\n  genreg info 'r6.0<1>:w'"
)]
struct Cli {
    /// JSON configuration file (register size, partition policy, log filter).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Drop trailing channels instead of failing when the SIMD width is not a multiple of the region width.
    #[arg(long, global = true)]
    truncate: bool,

    /// Log filter (e.g. `debug`, `genreg_core=trace`). `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the register and byte offsets of every channel.
    Addresses {
        /// Region descriptor, e.g. `r4.1<16;8,2>:w`.
        descriptor: String,

        /// SIMD width (channel count) of the instruction.
        #[arg(short, long)]
        simd: u32,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Render which channel touches each byte of each register.
    Map {
        /// Region descriptor, e.g. `r1.7<16;8,1>:b`.
        descriptor: String,

        /// SIMD width (channel count) of the instruction.
        #[arg(short, long)]
        simd: u32,
    },

    /// Show the normalized fields of a descriptor.
    Info {
        /// Region descriptor, e.g. `r6.0<1>:w`.
        descriptor: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// JSON document printed by `addresses --format json`.
#[derive(Serialize, Debug)]
struct AddressReport<'a> {
    descriptor: &'a str,
    region: RegisterRegion,
    bytes: u32,
    simd_width: u32,
    addresses: Vec<Address>,
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        }),
        None => Config::default(),
    };

    init_tracing(cli.log.as_deref().unwrap_or(&config.general.log_filter));

    let mut generator = config.generator();
    if cli.truncate {
        generator.partition = PartitionPolicy::Truncate;
    }
    debug!(?generator, "decoder configuration");

    if let Err(e) = run(cli.command, &generator) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Installs the stderr `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_filter`.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Dispatches one subcommand.
///
/// # Arguments
///
/// * `command` - The parsed subcommand.
/// * `generator` - Register size and partition policy.
fn run(command: Commands, generator: &GeneratorConfig) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Addresses {
            descriptor,
            simd,
            format,
        } => cmd_addresses(&descriptor, simd, format, generator),
        Commands::Map { descriptor, simd } => cmd_map(&descriptor, simd, generator),
        Commands::Info { descriptor } => cmd_info(&descriptor),
    }
}

fn cmd_addresses(
    descriptor: &str,
    simd_width: u32,
    format: OutputFormat,
    generator: &GeneratorConfig,
) -> Result<(), Box<dyn Error>> {
    let region = parse_region(descriptor)?;
    let addresses = generate_with(simd_width, &region, generator)?;

    match format {
        OutputFormat::Text => {
            let label = simd_width.saturating_sub(1).to_string().len();
            for (channel, address) in addresses.enumerate() {
                println!("ch{channel:>label$}  {address}");
            }
        }
        OutputFormat::Json => {
            let report = AddressReport {
                descriptor,
                region,
                bytes: region.bytes(),
                simd_width,
                addresses: addresses.collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn cmd_map(
    descriptor: &str,
    simd_width: u32,
    generator: &GeneratorConfig,
) -> Result<(), Box<dyn Error>> {
    let region = parse_region(descriptor)?;
    let addresses = generate_with(simd_width, &region, generator)?;
    let map = RegisterMap::from_addresses(addresses, generator.register_bytes);

    println!("{region}  simd {simd_width}");
    print!("{map}");
    println!(
        "{} register(s) touched, {} bytes each",
        map.footprint(),
        map.register_bytes()
    );
    Ok(())
}

fn cmd_info(descriptor: &str) -> Result<(), Box<dyn Error>> {
    let region = parse_region(descriptor)?;
    let ty = region.eu_type();

    println!("region      {region}");
    println!("register    {}", region.reg_num());
    println!("subregister {}", region.sub_reg_num());
    println!("vertical    {}", region.vertical());
    println!("width       {}", region.width());
    println!("horizontal  {}", region.horizontal());
    println!(
        "type        {ty} ({}, {} byte(s))",
        if ty.is_float() { "float" } else { "integer" },
        ty.bytes()
    );
    println!("broadcast   {}", if region.is_broadcast() { "yes" } else { "no" });
    Ok(())
}
