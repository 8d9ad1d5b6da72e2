//! halflife-cli — Command-line access to the isotope table and decay engine.
//!
//! Lists catalogued isotopes and prints decay curves as CSV or JSON, either
//! for a catalogued isotope or for an explicit half-life.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use halflife_core::constants::{
    CATALOG_DELIMITER, DEFAULT_INITIAL_NUCLEI, DEFAULT_MAX_HALF_LIVES, DEFAULT_SAMPLE_COUNT,
    HALF_LIFE_COLUMN_ALIAS, NAME_COLUMN,
};
use halflife_core::{DecaySeries, IsotopeCatalog};
use serde::Serialize;

/// Halflife command-line interface.
#[derive(Parser)]
#[command(name = "halflife-cli")]
#[command(version, about = "Radioactive decay curves for catalogued isotopes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the isotope table.
    Isotopes(IsotopesArgs),
    /// Print the decay curve of one isotope.
    Decay(DecayArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Args)]
struct IsotopesArgs {
    /// Semicolon-delimited isotope table (default: built-in table).
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value = "csv")]
    format: Format,
}

#[derive(Args)]
struct DecayArgs {
    /// Catalogued isotope name (e.g. Plutonium-239).
    #[arg(short, long, required_unless_present = "half_life", conflicts_with = "half_life")]
    isotope: Option<String>,

    /// Explicit half-life in years.
    #[arg(long)]
    half_life: Option<f64>,

    /// Semicolon-delimited isotope table (default: built-in table).
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Nuclei at t = 0.
    #[arg(long, default_value_t = DEFAULT_INITIAL_NUCLEI)]
    n0: f64,

    /// Number of half-lives to span.
    #[arg(long, default_value_t = DEFAULT_MAX_HALF_LIVES)]
    max_half_lives: f64,

    /// Number of time points.
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_COUNT)]
    samples: usize,

    /// Output format.
    #[arg(long, value_enum, default_value = "csv")]
    format: Format,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Isotopes(args) => list_isotopes(args, &mut out),
        Commands::Decay(args) => print_decay(args, &mut out),
    }
}

/// List every catalogued isotope.
fn list_isotopes(args: IsotopesArgs, out: &mut impl Write) -> Result<()> {
    let catalog = IsotopeCatalog::load_or_builtin(args.file.as_deref())
        .context("Cannot load isotope table")?;
    match args.format {
        Format::Csv => {
            writeln!(out, "{NAME_COLUMN}{CATALOG_DELIMITER}{HALF_LIFE_COLUMN_ALIAS}")?;
            for iso in &catalog {
                writeln!(out, "{}{CATALOG_DELIMITER}{}", iso.name, iso.half_life)?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, catalog.isotopes())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct DecayOutput<'a> {
    isotope: Option<&'a str>,
    half_life: f64,
    n0: f64,
    max_half_lives: f64,
    times: Vec<f64>,
    quantities: Vec<f64>,
}

/// Compute and print one decay curve.
fn print_decay(args: DecayArgs, out: &mut impl Write) -> Result<()> {
    let half_life = match (&args.isotope, args.half_life) {
        (Some(name), _) => {
            let catalog = IsotopeCatalog::load_or_builtin(args.file.as_deref())
                .context("Cannot load isotope table")?;
            match catalog.get(name) {
                Some(iso) => iso.half_life,
                None => bail!("Unknown isotope: {name}"),
            }
        }
        (None, Some(h)) => h,
        (None, None) => bail!("Either --isotope or --half-life is required"),
    };

    let series = halflife_decay::compute_decay(half_life, args.n0, args.max_half_lives, args.samples)
        .context("Cannot compute decay curve")?;

    match args.format {
        Format::Csv => write_csv(&series, out)?,
        Format::Json => {
            let (times, quantities) = series.into_columns();
            let output = DecayOutput {
                isotope: args.isotope.as_deref(),
                half_life,
                n0: args.n0,
                max_half_lives: args.max_half_lives,
                times,
                quantities,
            };
            serde_json::to_writer_pretty(&mut *out, &output)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_csv(series: &DecaySeries, out: &mut impl Write) -> Result<()> {
    writeln!(out, "time{CATALOG_DELIMITER}quantity")?;
    for p in series {
        writeln!(out, "{}{CATALOG_DELIMITER}{}", p.time, p.quantity)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn run(argv: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(argv)?;
        let mut buf = Vec::new();
        match cli.command {
            Commands::Isotopes(args) => list_isotopes(args, &mut buf)?,
            Commands::Decay(args) => print_decay(args, &mut buf)?,
        }
        Ok(String::from_utf8(buf)?)
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn decay_csv_three_points() {
        let out = run(&[
            "halflife-cli", "decay", "--half-life", "10", "--n0", "1000",
            "--max-half-lives", "2", "--samples", "3",
        ])
        .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "time;quantity");
        assert_eq!(lines[1], "0;1000");
        assert!(lines[2].starts_with("10;"));
        assert!(lines[3].starts_with("20;"));
    }

    #[test]
    fn decay_json_for_catalogued_isotope() {
        let out = run(&["halflife-cli", "decay", "--isotope", "Plutonium-239", "--format", "json"]).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["isotope"], "Plutonium-239");
        assert_eq!(v["half_life"], 24110.0);
        assert_eq!(v["times"].as_array().unwrap().len(), DEFAULT_SAMPLE_COUNT);
    }

    #[test]
    fn decay_rejects_unknown_isotope() {
        let e = run(&["halflife-cli", "decay", "--isotope", "Kryptonite-1"]).unwrap_err();
        assert!(e.to_string().contains("Unknown isotope"));
    }

    #[test]
    fn decay_rejects_invalid_parameters() {
        assert!(run(&["halflife-cli", "decay", "--half-life", "0"]).is_err());
        assert!(run(&["halflife-cli", "decay", "--half-life", "1", "--samples", "1"]).is_err());
    }

    #[test]
    fn decay_requires_a_source() {
        assert!(Cli::try_parse_from(["halflife-cli", "decay"]).is_err());
        assert!(Cli::try_parse_from([
            "halflife-cli", "decay", "--isotope", "Carbon-14", "--half-life", "3"
        ])
        .is_err());
    }

    #[test]
    fn isotopes_lists_builtin_table() {
        let out = run(&["halflife-cli", "isotopes"]).unwrap();
        assert!(out.starts_with("Isotope;Half-life (years)\n"));
        assert!(out.contains("Lead-202;52500\n"));
    }

    #[test]
    fn isotopes_from_missing_file_fails() {
        let e = run(&["halflife-cli", "isotopes", "--file", "/nonexistent/isotopes.csv"]).unwrap_err();
        assert!(e.to_string().contains("Cannot load isotope table"));
    }

    #[test]
    fn isotopes_json() {
        let out = run(&["halflife-cli", "isotopes", "--format", "json"]).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(v.as_array().unwrap().iter().any(|i| i["name"] == "Carbon-14"));
    }
}
