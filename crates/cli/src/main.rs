// neoscan CLI - explore NEO close approaches from the NASA data sets

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use neoscan_engine::database::NeoDatabase;
use neoscan_engine::filter::QueryOptions;
use neoscan_io::{csv as csv_io, json as json_io, DataError};

use exit_codes::{EXIT_ERROR, EXIT_IO, EXIT_PARSE, EXIT_SUCCESS, EXIT_USAGE};

/// Default number of results printed by `query` when no limit is given.
const DEFAULT_PRINT_LIMIT: usize = 10;

#[derive(Parser)]
#[command(name = "neoscan")]
#[command(about = "Explore near-Earth objects and their close approaches")]
#[command(version)]
struct Cli {
    /// NEO source CSV
    #[arg(long, global = true, default_value = "data/neos.csv")]
    neofile: PathBuf,

    /// Close-approach source JSON
    #[arg(long, global = true, default_value = "data/cad.json")]
    cadfile: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a single NEO by designation or by name
    #[command(after_help = "\
Examples:
  neoscan inspect --designation 433
  neoscan inspect -d 2025AB --verbose
  neoscan inspect --name Eros")]
    Inspect {
        /// Primary designation (exact, case-sensitive)
        #[arg(long, short = 'd', conflicts_with = "name")]
        designation: Option<String>,

        /// IAU name (exact)
        #[arg(long, short = 'n')]
        name: Option<String>,

        /// Also list every close approach of the matched NEO
        #[arg(long, short = 'v')]
        verbose: bool,
    },

    /// Filter close approaches; print them or export to CSV/JSON
    #[command(after_help = "\
Examples:
  neoscan query --date 2025-01-03
  neoscan query --start-date 2020-01-01 --end-date 2020-12-31 --hazardous
  neoscan query --max-distance 0.05 --min-velocity 20 --limit 5
  neoscan query --min-diameter 1 --outfile results.csv
  neoscan query --not-hazardous --outfile results.json")]
    Query {
        /// Approaches on exactly this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Approaches on or after this date
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Approaches on or before this date
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Minimum approach distance (au)
        #[arg(long)]
        min_distance: Option<f64>,

        /// Maximum approach distance (au)
        #[arg(long)]
        max_distance: Option<f64>,

        /// Minimum relative velocity (km/s)
        #[arg(long)]
        min_velocity: Option<f64>,

        /// Maximum relative velocity (km/s)
        #[arg(long)]
        max_velocity: Option<f64>,

        /// Minimum NEO diameter (km); NEOs with unknown diameter never match
        #[arg(long)]
        min_diameter: Option<f64>,

        /// Maximum NEO diameter (km); NEOs with unknown diameter never match
        #[arg(long)]
        max_diameter: Option<f64>,

        /// Only potentially hazardous NEOs
        #[arg(long, conflicts_with = "not_hazardous")]
        hazardous: bool,

        /// Only non-hazardous NEOs
        #[arg(long)]
        not_hazardous: bool,

        /// Maximum number of results (0 = no limit; default 10 when printing,
        /// no limit when exporting)
        #[arg(long, short = 'l')]
        limit: Option<usize>,

        /// Write results to this file (.csv or .json) instead of printing
        #[arg(long, short = 'o')]
        outfile: Option<PathBuf>,

        /// Suppress stderr notes
        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

struct CliError {
    code: u8,
    message: String,
}

impl CliError {
    fn error(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into() }
    }

    fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into() }
    }

    fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into() }
    }
}

impl From<DataError> for CliError {
    fn from(err: DataError) -> Self {
        let code = match err {
            DataError::Io(_) => EXIT_IO,
            DataError::Parse(_) | DataError::MissingFields(_) => EXIT_PARSE,
        };
        Self { code, message: err.to_string() }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("neoscan: {}", e.message);
            ExitCode::from(e.code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let db = load_database(&cli.neofile, &cli.cadfile)?;

    match cli.command {
        Commands::Inspect { designation, name, verbose } => {
            cmd_inspect(&db, designation, name, verbose)
        }
        Commands::Query {
            date,
            start_date,
            end_date,
            min_distance,
            max_distance,
            min_velocity,
            max_velocity,
            min_diameter,
            max_diameter,
            hazardous,
            not_hazardous,
            limit,
            outfile,
            quiet,
        } => {
            let opts = QueryOptions {
                date,
                start_date,
                end_date,
                min_distance,
                max_distance,
                min_velocity,
                max_velocity,
                min_diameter,
                max_diameter,
                hazardous: match (hazardous, not_hazardous) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
                ..QueryOptions::default()
            };
            cmd_query(&db, &opts, limit, outfile, quiet)
        }
    }
}

fn load_database(neofile: &Path, cadfile: &Path) -> Result<NeoDatabase, CliError> {
    let neos = csv_io::load_neos(neofile)?;
    let approaches = json_io::load_approaches(cadfile)?;
    Ok(NeoDatabase::new(neos, approaches))
}

fn cmd_inspect(
    db: &NeoDatabase,
    designation: Option<String>,
    name: Option<String>,
    verbose: bool,
) -> Result<(), CliError> {
    let found = match (&designation, &name) {
        (Some(d), _) => db.get_neo_by_designation(d),
        (None, Some(n)) => db.get_neo_by_name(n),
        (None, None) => {
            return Err(CliError::usage("provide --designation or --name"));
        }
    };

    let Some(neo) = found else {
        return Err(CliError::error("no matching NEO found"));
    };

    println!("{neo}");
    if verbose {
        for &id in &neo.approaches {
            println!("- {}", db.approach(id).summary(neo));
        }
    }
    Ok(())
}

fn cmd_query(
    db: &NeoDatabase,
    opts: &QueryOptions,
    limit: Option<usize>,
    outfile: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    if !quiet && db.orphan_count() > 0 {
        eprintln!(
            "note: {} close approaches matched no loaded NEO and were skipped",
            db.orphan_count()
        );
    }

    let filters = opts.build();

    match outfile {
        None => {
            let limit = match limit {
                Some(0) => usize::MAX,
                Some(n) => n,
                None => DEFAULT_PRINT_LIMIT,
            };
            let mut shown = 0usize;
            for approach in db.query(&filters).take(limit) {
                if let Some(neo) = db.neo_of(approach) {
                    println!("{}", approach.summary(neo));
                    shown += 1;
                }
            }
            if !quiet {
                eprintln!("{shown} close approaches shown");
            }
            Ok(())
        }
        Some(path) => {
            let limit = match limit {
                Some(0) | None => usize::MAX,
                Some(n) => n,
            };
            let results: Vec<_> = db
                .query(&filters)
                .take(limit)
                .filter_map(|a| db.neo_of(a).map(|neo| (a, neo)))
                .collect();
            let written = results.len();

            match path.extension().and_then(|e| e.to_str()) {
                Some("csv") => csv_io::write_csv(results, &path).map_err(CliError::io)?,
                Some("json") => json_io::write_json(results, &path).map_err(CliError::io)?,
                _ => {
                    return Err(CliError::usage(format!(
                        "cannot infer output format from {}; use a .csv or .json extension",
                        path.display()
                    )));
                }
            }

            if !quiet {
                eprintln!("wrote {} close approaches to {}", written, path.display());
            }
            Ok(())
        }
    }
}
