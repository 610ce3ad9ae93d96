//! zonescan tool
//!
//! Builds, inspects and queries zone maps for column files.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};
use zonescan::block::read_positions;
use zonescan::{
    AtomicPredicate, CompareOp, Config, OverrunPolicy, PredicateRange, Record, Result, ScanPaths,
    ZoneMap, ZoneMapBuilder, ZoneScanError, ZonemapScan,
};

/// zonescan
#[derive(Parser, Debug)]
#[command(name = "zonescan")]
#[command(about = "Zone-map pruned range scans over sorted column files")]
#[command(version)]
struct Args {
    /// Data directory (holds column_store/ and zone_maps/)
    #[arg(short, long, default_value = "./data")]
    data_dir: String,

    /// I/O block size in bytes
    #[arg(short, long, default_value = "4096")]
    block_size: usize,

    /// Element type of the column
    #[arg(short = 't', long = "type", value_enum, default_value = "i32")]
    column_type: ColumnType,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColumnType {
    I32,
    I64,
    U32,
    U64,
    F64,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the zone map of a sorted column
    BuildZonemap {
        /// Column file name under column_store/
        column: String,

        /// Number of rows in the column
        #[arg(short, long)]
        num_rows: u64,
    },

    /// Scan a column with zone-map pruning
    Scan {
        /// Column file name under column_store/
        column: String,

        /// Output position file
        #[arg(short, long)]
        output: PathBuf,

        /// Predicate range such as ">=7,<=9" or "<1990" (repeat for OR)
        #[arg(short, long = "range", required = true)]
        ranges: Vec<String>,

        /// Positions from an earlier filter stage
        #[arg(long)]
        position_input: Option<PathBuf>,

        /// Stop instead of failing when a candidate block is past end of data
        #[arg(long)]
        stop_early: bool,

        /// Report the number of data block reads
        #[arg(short, long)]
        verbose: bool,

        /// Print qualifying positions after the scan
        #[arg(long)]
        print: bool,
    },

    /// Print every zone of a column's zone map
    DumpZonemap {
        /// Column file name under column_store/
        column: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,zonescan=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();
    tracing::debug!("zonescan v{}", zonescan::VERSION);

    let result = match args.column_type {
        ColumnType::I32 => run::<i32>(&args),
        ColumnType::I64 => run::<i64>(&args),
        ColumnType::U32 => run::<u32>(&args),
        ColumnType::U64 => run::<u64>(&args),
        ColumnType::F64 => run::<f64>(&args),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run<T>(args: &Args) -> Result<()>
where
    T: Record + PartialOrd + FromStr + Display,
{
    let mut config = Config::builder()
        .data_dir(&args.data_dir)
        .block_size_bytes(args.block_size)
        .build();

    match &args.command {
        Commands::BuildZonemap { column, num_rows } => {
            config.num_rows = *num_rows;
            let summary = ZoneMapBuilder::<T>::build_column(&config, column)?;
            tracing::info!(
                "Built {} zones over {} rows -> {}",
                summary.zones_written,
                summary.rows_seen,
                config.zonemap_path(column).display()
            );
        }
        Commands::Scan {
            column,
            output,
            ranges,
            position_input,
            stop_early,
            verbose,
            print,
        } => {
            if *stop_early {
                config.overrun_policy = OverrunPolicy::StopEarly;
            }
            config.report_io = *verbose;

            let ranges = ranges
                .iter()
                .map(|text| parse_range::<T>(text))
                .collect::<Result<Vec<_>>>()?;

            let mut paths = ScanPaths::for_column(&config, column, output.clone());
            if let Some(input) = position_input {
                paths = paths.with_position_input(input.clone());
            }

            let mut scan = ZonemapScan::<T>::open(&paths, &config)?;
            let stats = scan.process_filter(&ranges)?;
            tracing::info!(
                "{} positions from {} of {} blocks ({} pruned)",
                stats.qualifying_positions,
                stats.data_block_reads,
                stats.zones,
                stats.blocks_pruned()
            );

            if *print {
                for position in read_positions(output, config.block_size_bytes)? {
                    println!("{}", position);
                }
            }
        }
        Commands::DumpZonemap { column } => {
            let zones = ZoneMap::<T>::load(&config.zonemap_path(column), config.block_size_bytes)?;
            for zone in zones.iter() {
                println!("{}\t{}\t{}", zone.block_index, zone.min, zone.max);
            }
        }
    }
    Ok(())
}

/// Parse `"<op><value>[,<op><value>]"` into a predicate range
fn parse_range<T: PartialOrd + FromStr>(text: &str) -> Result<PredicateRange<T>> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [only] => Ok(PredicateRange::new(parse_atomic(only)?, AtomicPredicate::Always)),
        [lower, upper] => Ok(PredicateRange::new(parse_atomic(lower)?, parse_atomic(upper)?)),
        _ => Err(ZoneScanError::Predicate(format!(
            "expected one or two comparisons, got {:?}",
            text
        ))),
    }
}

fn parse_atomic<T: FromStr>(text: &str) -> Result<AtomicPredicate<T>> {
    // Two-character operators first so "<=" is not read as "<"
    const OPS: [(&str, CompareOp); 7] = [
        ("<=", CompareOp::Le),
        (">=", CompareOp::Ge),
        ("==", CompareOp::Eq),
        ("!=", CompareOp::Ne),
        ("<", CompareOp::Lt),
        (">", CompareOp::Gt),
        ("=", CompareOp::Eq),
    ];

    for (symbol, op) in OPS {
        if let Some(rest) = text.strip_prefix(symbol) {
            let operand = rest.trim().parse::<T>().map_err(|_| {
                ZoneScanError::Predicate(format!("invalid operand in {:?}", text))
            })?;
            return Ok(AtomicPredicate::new(op, operand));
        }
    }

    Err(ZoneScanError::Predicate(format!(
        "missing comparison operator in {:?}",
        text
    )))
}
