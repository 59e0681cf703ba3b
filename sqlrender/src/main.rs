//! # sqlrender
//!
//! A CLI for rendering query results in the formats people paste into
//! tickets, spreadsheets and scripts.
//!
//! ## Overview
//!
//! sqlrender is built on top of sqlrenderlib. It reads a result dump (the
//! column names and rows a query returned, as JSON), renders it in one
//! format, and writes the bytes to standard output or a file.
//!
//! ## Usage
//!
//! ```bash
//! # Render a dump as an ASCII table
//! sqlrender result.json
//!
//! # Read the dump from standard input, write CSV to a file
//! cat result.json | sqlrender --format csv --output result.csv
//!
//! # XML carries the query text
//! sqlrender result.json --format xml --sql "SELECT id, name FROM users"
//!
//! # Workbooks wider than 26 columns
//! sqlrender result.json --format xlsx --sheet-addressing extended -o out.xlsx
//! ```
//!
//! Set `RUST_LOG=debug` to trace what is rendered.

mod dump;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use sqlrenderlib::{ColumnAddressing, Format, RenderOptions, RendererRegistry};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::dump::ResultDump;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("sqlrender")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Render query results as table, markdown, HTML, CSV, JSON, YAML, XML, XLSX or plain text")
        .arg(
            Arg::new("input")
                .help("Result dump to render (JSON); reads standard input when omitted or '-'"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .default_value("table")
                .value_parser(Format::ALL.map(|f| f.as_str()))
                .help("Output format"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write output to a file instead of standard output"),
        )
        .arg(
            Arg::new("no-header")
                .long("no-header")
                .action(ArgAction::SetTrue)
                .help("Omit the column-name header row"),
        )
        .arg(
            Arg::new("sql")
                .long("sql")
                .default_value("")
                .help("Query text recorded in XML output"),
        )
        .arg(
            Arg::new("sheet-addressing")
                .long("sheet-addressing")
                .default_value("letters")
                .value_parser(["letters", "extended"])
                .help("Spreadsheet column addressing: 'letters' writes columns A-Z only"),
        )
}

/// Build render options from matches
fn build_options(matches: &ArgMatches) -> Result<RenderOptions, anyhow::Error> {
    let addressing = matches
        .get_one::<String>("sheet-addressing")
        .map(|s| s.parse::<ColumnAddressing>())
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?
        .unwrap_or_default();

    let statement = matches
        .get_one::<String>("sql")
        .cloned()
        .unwrap_or_default();

    Ok(RenderOptions::new()
        .include_header(!matches.get_flag("no-header"))
        .statement(statement)
        .sheet_addressing(addressing))
}

/// Read the result dump from a file or standard input
fn read_dump(matches: &ArgMatches) -> Result<ResultDump, anyhow::Error> {
    match matches.get_one::<String>("input").map(|s| s.as_str()) {
        Some(path) if path != "-" => {
            let file = File::open(path).with_context(|| format!("cannot open '{}'", path))?;
            ResultDump::read(BufReader::new(file))
        }
        _ => ResultDump::read(io::stdin().lock()),
    }
}

fn run(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let format = matches
        .get_one::<String>("format")
        .map(|s| s.as_str())
        .unwrap_or("table");
    let options = build_options(matches)?;
    let rs = read_dump(matches)?.into_result_set()?;

    let bytes = RendererRegistry::with_defaults().render(format, &rs, &options)?;

    match matches.get_one::<String>("output") {
        Some(path) => {
            std::fs::write(path, &bytes).with_context(|| format!("cannot write '{}'", path))?;
            debug!(path = path.as_str(), bytes = bytes.len(), "wrote output file");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let matches = build_command().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
