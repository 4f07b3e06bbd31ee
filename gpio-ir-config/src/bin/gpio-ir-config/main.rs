use clap::{Args, Parser, Subcommand};
use gpio_ir::{
    config::{Settings, Variant},
    extractor::{self, Sample},
};
use gpio_ir_common::{math, params};
use gpio_ir_config::{
    parser::parse_number,
    pretty_parse,
    replay::{self, parse_trace},
    ConfigFileError,
};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

use anyhow::{anyhow, Result};

/// Check GPIO remote control settings and replay register traces
#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a driver config file
    Check(CheckArgs),
    /// Decode raw register values without debouncing
    Decode(DecodeArgs),
    /// Run a recorded register trace through the driver
    Replay(ReplayArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// Also show the register masks and sample period
    #[clap(long, short)]
    verbose: bool,

    /// driver config file
    file: PathBuf,
}

#[derive(Args)]
struct DecodeArgs {
    /// driver config file
    file: PathBuf,

    /// Register values, decimal or 0x prefixed hex
    #[clap(required = true)]
    raw: Vec<String>,
}

#[derive(Args)]
struct ReplayArgs {
    /// Also show suppressed, locked and failed samples
    #[clap(long, short)]
    verbose: bool,

    /// driver config file
    file: PathBuf,

    /// Trace file of `<time_ms> <raw>` lines
    trace: PathBuf,
}

fn file_error(file: &Path, err: ConfigFileError) -> anyhow::Error {
    if err.span.is_none() {
        anyhow!("Invalid \"{}\"!\n    {}", file.display(), err)
    } else {
        anyhow!("")
    }
}

fn load_settings(file: &Path) -> Result<Settings> {
    let src = fs::read_to_string(file)
        .map_err(|err| file_error(file, ConfigFileError::from(err)))?;
    let config = pretty_parse(file, &src).map_err(|err| file_error(file, err))?;
    config
        .validate()
        .map_err(|err| anyhow!("Invalid \"{}\"!\n    {}", file.display(), err))
}

fn variant_name(variant: Variant) -> &'static str {
    match variant {
        Variant::Polled => params::VARIANT_POLLED,
        Variant::Interrupt => params::VARIANT_INTERRUPT,
    }
}

fn check(args: &CheckArgs, out: &mut impl Write) -> Result<()> {
    let settings = load_settings(&args.file)?;
    let mask = settings.mask();

    writeln!(out, "variant:     {}", variant_name(settings.variant()))?;
    writeln!(out, "minor:       {}", settings.minor())?;
    writeln!(out, "mask:        {:#x}", mask.mask())?;
    writeln!(out, "pre-shift:   {}", mask.pre_shift())?;
    writeln!(out, "code length: {}", settings.code_length())?;
    match settings.sample_rate() {
        Some(rate) => writeln!(
            out,
            "gap:         {}ms (minimum {}ms)",
            settings.gap().as_millis(),
            math::min_poll_gap_ms(rate)
        )?,
        None => writeln!(out, "gap:         {}ms", settings.gap().as_millis())?,
    }
    if args.verbose {
        writeln!(out, "gpio mask:   {:#x}", mask.gpio_mask())?;
        writeln!(out, "lock mask:   {:#x}", settings.lock_mask())?;
        writeln!(out, "xor mask:    {:#x}", settings.xor_mask())?;
        if let Some(period) = settings.sample_period() {
            writeln!(out, "sample every {}ms", period.as_millis())?;
        }
    }
    Ok(())
}

fn decode(args: &DecodeArgs, out: &mut impl Write) -> Result<()> {
    let settings = load_settings(&args.file)?;

    for text in &args.raw {
        let raw = parse_number(text)
            .and_then(|raw| u32::try_from(raw).ok())
            .ok_or_else(|| anyhow!("Invalid register value {text:?}"))?;
        match extractor::decode(&settings, raw) {
            Some(code) => writeln!(out, "{code:#x}")?,
            None => writeln!(out, "locked")?,
        }
    }
    Ok(())
}

fn replay_trace(args: &ReplayArgs, out: &mut impl Write) -> Result<()> {
    let settings = load_settings(&args.file)?;
    let src = fs::read_to_string(&args.trace)
        .map_err(|err| file_error(&args.trace, ConfigFileError::from(err)))?;
    let trace = parse_trace(&src).map_err(|err| {
        let (line, col, _) = err.line_col_slice(&src);
        anyhow!(
            "Invalid trace \"{}\" at {}:{}\n    {}",
            args.trace.display(),
            line,
            col,
            err.message
        )
    })?;

    for r in replay::replay(settings, &trace) {
        match r.sample {
            Sample::Code(code) => writeln!(out, "{} {code:#x}", r.time_ms)?,
            _ if !args.verbose => {}
            Sample::Suppressed(code) => writeln!(out, "{} {code:#x} suppressed", r.time_ms)?,
            Sample::Locked => writeln!(out, "{} locked", r.time_ms)?,
            Sample::ReadFailed => writeln!(out, "{} read failed", r.time_ms)?,
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = run(&cli);

    if let Err(message) = result {
        eprintln!("{message}");
        process::exit(1);
    };
}

fn run(cli: &Cli) -> Result<()> {
    let mut out = io::stdout().lock();

    match &cli.command {
        Commands::Check(args) => check(args, &mut out),
        Commands::Decode(args) => decode(args, &mut out),
        Commands::Replay(args) => replay_trace(args, &mut out),
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod test;
