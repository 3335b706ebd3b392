//! Command-line interface for gpuhpc

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::debug;

use gpuhpc::{
    collect_samples, describe_device, AdrenoCounter, Counter, CounterDevice, HostAllocator, HpcError,
    MaliBifrostCounter, MaliCounter, MaliValhallCounter, Sample, SamplerConfig, SamplingContext, Verbosity,
};

#[derive(Parser)]
#[command(name = "gpuhpc")]
#[command(version = gpuhpc::VERSION)]
#[command(about = "Sample hardware performance counters of mobile GPUs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log output (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List available GPU devices
    Devices,

    /// Identify the GPU behind a device node
    Info {
        /// Specific device path (auto-detect if not specified)
        #[arg(short, long)]
        device: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the counters of a counter set
    Counters {
        /// Counter set to list
        #[arg(long, value_enum)]
        vendor: CounterSet,
    },

    /// Sample counters and print per-interval deltas
    Sample {
        /// Counter set the names belong to
        #[arg(long, value_enum)]
        vendor: CounterSet,

        /// Counter names (repeatable)
        #[arg(short, long = "counter", required = true)]
        counters: Vec<String>,

        /// Specific device path (auto-detect if not specified)
        #[arg(short, long)]
        device: Option<PathBuf>,

        /// JSON sampler configuration
        #[arg(long, env = "GPUHPC_CONFIG")]
        config: Option<PathBuf>,

        /// Milliseconds between samples
        #[arg(short, long)]
        interval: Option<u64>,

        /// Number of samples
        #[arg(short = 'n', long)]
        samples: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CounterSet {
    Adreno,
    Mali,
    MaliBifrost,
    MaliValhall,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Devices => {
            let devices = gpuhpc::scan_devices();
            if devices.is_empty() {
                println!("No GPU devices found.");
            } else {
                println!("Found {} GPU device(s):", devices.len());
                for device in devices {
                    println!("  {}", device);
                }
            }
        }

        Commands::Info { device, format } => {
            let path = match device {
                Some(path) => path,
                None => gpuhpc::device::find_gpu_device().context("no GPU device found")?,
            };
            let info = describe_device(&path).with_context(|| format!("cannot identify {path}"))?;
            match format {
                OutputFormat::Text => {
                    println!("Device:      {}", info.path);
                    println!("Vendor:      {}", info.vendor);
                    println!("Hardware id: {:#x}", info.hardware_id);
                    println!("Generation:  {}", info.generation);
                    println!("Supported:   {}", if info.supported { "yes" } else { "no" });
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
            }
        }

        Commands::Counters { vendor } => {
            let names: Vec<&'static str> = match vendor {
                CounterSet::Adreno => AdrenoCounter::ALL.iter().map(|c| c.hardware_name()).collect(),
                CounterSet::Mali => MaliCounter::ALL.iter().map(|c| c.hardware_name()).collect(),
                CounterSet::MaliBifrost => MaliBifrostCounter::ALL.iter().map(|c| c.hardware_name()).collect(),
                CounterSet::MaliValhall => MaliValhallCounter::ALL.iter().map(|c| c.hardware_name()).collect(),
            };
            for name in names {
                println!("{}", name);
            }
        }

        Commands::Sample {
            vendor,
            counters,
            device,
            config,
            interval,
            samples,
            format,
        } => {
            let mut config = match config {
                Some(path) => SamplerConfig::from_json_file(&path)
                    .with_context(|| format!("cannot load config {}", path.display()))?,
                None => SamplerConfig::default(),
            };
            if device.is_some() {
                config.device_path = device;
            }
            if let Some(interval) = interval {
                config.interval_ms = interval;
            }
            if let Some(samples) = samples {
                config.samples = samples;
            }
            if cli.verbose > 0 {
                config.verbosity = Verbosity::from_occurrences(cli.verbose);
            }
            config.validate()?;
            debug!("sampling with {:?}", config);

            let device = config.device_path.clone();
            let device = device.as_deref();
            match vendor {
                CounterSet::Adreno => {
                    let counters = parse_counters::<AdrenoCounter>(&counters)?;
                    let ctx = gpuhpc::open_adreno_context(&counters, device)?;
                    run_sampling(ctx, &counters, &config, format)?;
                }
                CounterSet::Mali => {
                    let counters = parse_counters::<MaliCounter>(&counters)?;
                    let ctx = gpuhpc::open_mali_context(&counters, device)?;
                    run_sampling(ctx, &counters, &config, format)?;
                }
                CounterSet::MaliBifrost => {
                    let counters = parse_counters::<MaliBifrostCounter>(&counters)?;
                    let ctx = gpuhpc::open_mali_context(&counters, device)?;
                    run_sampling(ctx, &counters, &config, format)?;
                }
                CounterSet::MaliValhall => {
                    let counters = parse_counters::<MaliValhallCounter>(&counters)?;
                    let ctx = gpuhpc::open_mali_context(&counters, device)?;
                    run_sampling(ctx, &counters, &config, format)?;
                }
            }
        }

        Commands::Version => {
            println!("gpuhpc v{}", gpuhpc::version());
            println!("Hardware performance counter sampling for Mali and Adreno GPUs");
        }
    }

    Ok(())
}

fn parse_counters<C>(names: &[String]) -> Result<Vec<C>>
where
    C: FromStr<Err = HpcError>,
{
    if names.is_empty() {
        bail!("at least one --counter is required");
    }
    names
        .iter()
        .map(|name| C::from_str(name).map_err(anyhow::Error::from))
        .collect()
}

fn run_sampling<C, D, A>(
    mut ctx: SamplingContext<C, D, A>,
    counters: &[C],
    config: &SamplerConfig,
    format: OutputFormat,
) -> Result<()>
where
    C: Counter,
    D: CounterDevice,
    A: HostAllocator + Clone,
{
    if config.verbosity.is_at_least(Verbosity::Detailed) {
        println!("Generation: {} (id {:#x})", ctx.generation(), ctx.hardware_id());
        for (counter, slot) in counters.iter().zip(ctx.slots()) {
            println!("  {} -> {}", counter.name(), slot);
        }
    }

    let samples = collect_samples(&mut ctx, counters, config);
    ctx.destroy()?;
    let samples = samples?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&samples)?),
        OutputFormat::Text if config.verbosity == Verbosity::Minimal => {
            if let Some(last) = samples.last() {
                print_sample(last);
            }
        }
        OutputFormat::Text => {
            for sample in &samples {
                print_sample(sample);
            }
        }
    }
    Ok(())
}

fn print_sample(sample: &Sample) {
    println!("[{}]", sample.timestamp.format("%H:%M:%S%.3f"));
    for (name, delta) in &sample.values {
        println!("  {:<48} {:>16}", name, delta);
    }
}
