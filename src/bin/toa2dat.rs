//! toa2dat CLI - convert a TOA file into a binned time series
//!
//! Reads times of arrival from a text or raw-binary source, bins them into
//! a fixed-width series, and writes the result as a raw array of f32
//! counts. Series parameters come from the command line, a PRESTO-style
//! `.inf` descriptor, or both (explicit flags win).

use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use toaseries::{convert, ConvertError, EpochUnit, SeriesConfig, ToaFormat};
use toaseries::{DEFAULT_BLOCK_LEN, TOASERIES_VERSION};

/// toa2dat - TOA to time series converter
#[derive(Parser)]
#[command(name = "toa2dat")]
#[command(version = TOASERIES_VERSION)]
#[command(about = "Bin times of arrival into an evenly sampled time series", long_about = None)]
struct Cli {
    /// Input TOA file
    source: PathBuf,

    /// Output time-series file
    #[arg(short, long)]
    output: PathBuf,

    /// Input format
    #[arg(long, default_value = "text")]
    format: FormatArg,

    /// Width of each output bin in seconds
    #[arg(long)]
    bin_width: Option<f64>,

    /// Number of output bins
    #[arg(long)]
    num_bins: Option<u64>,

    /// Reference epoch, in the same unit as the TOAs
    #[arg(long)]
    epoch: Option<f64>,

    /// Unit of the TOAs and the epoch
    #[arg(long, default_value = "mjd-days")]
    epoch_unit: EpochUnitArg,

    /// Read series defaults from a .inf descriptor file
    #[arg(long)]
    inf: Option<PathBuf>,

    /// Output block capacity in bins (memory bound, not a result knob)
    #[arg(long, default_value_t = DEFAULT_BLOCK_LEN)]
    block_len: usize,

    /// Print the conversion report as JSON to stdout
    #[arg(long)]
    json: bool,

    /// Suppress the human-readable summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// One ASCII value per line; # lines and blank lines ignored
    Text,
    /// Raw IEEE single-precision records
    Float32,
    /// Raw IEEE double-precision records
    Float64,
}

impl From<FormatArg> for ToaFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => ToaFormat::Text,
            FormatArg::Float32 => ToaFormat::Float32,
            FormatArg::Float64 => ToaFormat::Float64,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EpochUnitArg {
    /// Modified Julian Date days (pulsar convention)
    MjdDays,
    /// Seconds
    Seconds,
}

impl From<EpochUnitArg> for EpochUnit {
    fn from(arg: EpochUnitArg) -> Self {
        match arg {
            EpochUnitArg::MjdDays => EpochUnit::MjdDays,
            EpochUnitArg::Seconds => EpochUnit::Seconds,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let diag = CliError::from(e);
            eprintln!(
                "{}",
                serde_json::to_string(&diag).unwrap_or_else(|_| diag.message.clone())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ConvertError> {
    let config = SeriesConfig {
        source: cli.source,
        sink: cli.output,
        format: cli.format.into(),
        bin_width: cli.bin_width,
        num_bins: cli.num_bins,
        epoch: cli.epoch,
        epoch_unit: cli.epoch_unit.into(),
        descriptor: cli.inf,
        block_len: cli.block_len,
    };

    if !cli.quiet && atty::is(atty::Stream::Stderr) {
        eprintln!("toa2dat {} - TOA to time series converter", TOASERIES_VERSION);
    }

    let report = convert(&config)?;

    if !cli.quiet {
        eprintln!("Read {} TOAs from '{}'.", report.total_toas, report.source);
        if report.skipped_lines > 0 {
            eprintln!("Skipped {} unparsable lines.", report.skipped_lines);
        }
        eprintln!(
            "Wrote {} bins of {} s in {} blocks to '{}'.",
            report.num_bins, report.bin_width, report.blocks_written, report.sink
        );
        eprintln!(
            "Placed {} TOAs, dropped {} outside the series.",
            report.placed, report.dropped
        );
    }

    if cli.json {
        let mut stdout = std::io::stdout();
        let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        writeln!(stdout, "{}", json)?;
    }

    Ok(())
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<ConvertError> for CliError {
    fn from(e: ConvertError) -> Self {
        let hint = match &e {
            ConvertError::File { .. } => Some("Check file paths and permissions".to_string()),
            ConvertError::Format(_) => {
                Some("Check that --format matches the source layout".to_string())
            }
            ConvertError::Config(_) => {
                Some("Supply --bin-width and --num-bins, or point --inf at a descriptor".to_string())
            }
            ConvertError::Io(_) => None,
        };
        CliError {
            code: e.code().to_string(),
            message: e.to_string(),
            hint,
        }
    }
}
