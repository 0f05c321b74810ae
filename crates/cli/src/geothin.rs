//! geothin - Spatially thin coordinate records
//!
//! A command line tool that reads two-column coordinate files and keeps a
//! subset of points in which no two retained points are closer than a
//! minimum distance.

use clap::{ArgAction, Parser, ValueEnum};
use geothin_core::error::{Result, ThinError};
use geothin_core::{
    Coordinates, DistanceMetric, MetricKind, PrecisionMode, RestartPolicy, RetentionMask,
    Selection, ThinParams, TrialSelector, read_delimited,
};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output type for the thinning result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum OutputType {
    /// Retained coordinate rows of the best trial (default)
    #[default]
    Points,
    /// One 1/0 flag per input point, one column per returned mask
    Mask,
    /// 0-based indices of retained points in the best trial
    Indices,
    /// JSON document with every returned mask
    Json,
}

/// Distance metric names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum MetricArg {
    /// Great-circle distance; coordinates are lon/lat degrees
    #[default]
    Haversine,
    /// Straight-line distance in coordinate units
    Euclidean,
}

impl From<MetricArg> for MetricKind {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Haversine => MetricKind::GreatCircle,
            MetricArg::Euclidean => MetricKind::Planar,
        }
    }
}

/// Grid cell size derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum PrecisionArg {
    /// thin-dist / 111.32 for every metric
    #[default]
    Degrees,
    /// thin-dist / 111.32 for haversine, thin-dist for euclidean
    Native,
}

impl From<PrecisionArg> for PrecisionMode {
    fn from(arg: PrecisionArg) -> Self {
        match arg {
            PrecisionArg::Degrees => PrecisionMode::Degrees,
            PrecisionArg::Native => PrecisionMode::MetricNative,
        }
    }
}

/// Starting point of each trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum RestartArg {
    /// Start from the best mask so far
    #[default]
    FromBest,
    /// Start from the full point set
    FromFull,
}

impl From<RestartArg> for RestartPolicy {
    fn from(arg: RestartArg) -> Self {
        match arg {
            RestartArg::FromBest => RestartPolicy::FromBest,
            RestartArg::FromFull => RestartPolicy::FromFull,
        }
    }
}

/// Keep a subset of points in which no two retained points are closer than
/// a minimum distance.
#[derive(Parser, Debug)]
#[command(name = "geothin")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Coordinate files with x/lon in the first column and y/lat in the
    /// second; "-" or none reads stdin
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    // === Thinning options ===
    /// Minimum distance between retained points (km for haversine)
    #[arg(short = 't', long = "thin-dist")]
    thin_dist: f64,

    /// Number of randomized trials
    #[arg(short = 'n', long, default_value = "10")]
    trials: usize,

    /// Return every trial's mask instead of only the best
    #[arg(long = "all-trials", action = ArgAction::SetTrue)]
    all_trials: bool,

    /// Distance metric
    #[arg(short = 'm', long, value_enum, default_value = "haversine")]
    metric: MetricArg,

    /// Sphere radius for the haversine metric
    #[arg(short = 'r', long, default_value = "6371.0")]
    radius: f64,

    /// Seed for the cell visitation order (any integer)
    #[arg(short = 's', long, default_value = "42", allow_negative_numbers = true)]
    seed: i64,

    /// How the grid cell size is derived from the distance
    #[arg(long, value_enum, default_value = "degrees")]
    precision: PrecisionArg,

    /// Starting mask of each trial
    #[arg(long, value_enum, default_value = "from-best")]
    restart: RestartArg,

    // === Input options ===
    /// Field delimiter
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Skip the first non-comment line of each file
    #[arg(long, action = ArgAction::SetTrue)]
    header: bool,

    // === Output options ===
    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 'O', long = "output-type", value_enum, default_value = "points")]
    output_type: OutputType,

    /// Print per-trial retained counts to stderr
    #[arg(long, action = ArgAction::SetTrue)]
    stats: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    n: usize,
    retained: usize,
    trial_counts: &'a [usize],
    masks: Vec<&'a [bool]>,
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Build ThinParams from command line arguments.
fn build_params(args: &Args) -> Result<ThinParams> {
    ThinParams::builder(args.thin_dist)
        .trials(args.trials)
        .collect_all(args.all_trials)
        .metric(DistanceMetric::resolve(args.metric.into(), args.radius))
        .precision(args.precision.into())
        .restart(args.restart.into())
        .seed(args.seed as u64)
        .build()
}

/// Read and concatenate every input source.
fn read_inputs(args: &Args) -> Result<Coordinates> {
    if args.files.is_empty() {
        return read_delimited(io::stdin().lock(), args.delimiter, args.header);
    }

    let mut points = Coordinates::default();
    for path in &args.files {
        let chunk = if path.as_os_str() == "-" {
            read_delimited(io::stdin().lock(), args.delimiter, args.header)?
        } else {
            let file = File::open(path)?;
            read_delimited(BufReader::new(file), args.delimiter, args.header)?
        };
        debug!(path = %path.display(), points = chunk.len(), "read input");
        points.extend(chunk);
    }

    Ok(points)
}

fn write_points<W: Write>(writer: &mut W, points: &Coordinates, delimiter: char) -> io::Result<()> {
    for [x, y] in points.iter() {
        writeln!(writer, "{x}{delimiter}{y}")?;
    }
    Ok(())
}

/// Write one row per point with a 1/0 flag for each mask.
fn write_masks<W: Write>(writer: &mut W, masks: &[RetentionMask], n: usize) -> io::Result<()> {
    for idx in 0..n {
        let row: Vec<&str> = masks
            .iter()
            .map(|m| if m.is_retained(idx) { "1" } else { "0" })
            .collect();
        writeln!(writer, "{}", row.join(","))?;
    }
    Ok(())
}

fn write_output<W: Write>(
    writer: &mut W,
    args: &Args,
    points: &Coordinates,
    selection: &Selection,
    trial_counts: &[usize],
) -> Result<()> {
    let masks: Vec<RetentionMask> = selection.clone().into_masks();
    let best = selection
        .best()
        .cloned()
        .unwrap_or_else(|| RetentionMask::all_retained(points.len()));

    match args.output_type {
        OutputType::Points => write_points(writer, &best.apply(points)?, args.delimiter)?,
        OutputType::Mask => write_masks(writer, &masks, points.len())?,
        OutputType::Indices => {
            for idx in best.retained_indices() {
                writeln!(writer, "{idx}")?;
            }
        }
        OutputType::Json => {
            let doc = JsonOutput {
                n: points.len(),
                retained: best.retained_count(),
                trial_counts,
                masks: masks.iter().map(RetentionMask::as_slice).collect(),
            };
            serde_json::to_writer(&mut *writer, &doc)
                .map_err(|e| ThinError::Io(io::Error::other(e)))?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let params = build_params(args)?;
    let points = read_inputs(args)?;
    points.validate_finite()?;

    let mut selector = TrialSelector::new(&points, &params);
    let selection = selector.run();

    if args.stats {
        for (trial, count) in selector.trial_counts().iter().enumerate() {
            eprintln!("trial {trial}: {count}/{} retained", points.len());
        }
    }

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        Box::new(BufWriter::new(File::create(&args.outfile)?))
    };
    write_output(&mut output, args, &points, &selection, selector.trial_counts())?;
    output.flush()?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
