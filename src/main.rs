use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{Level, info};

use transport_catalogue::pipeline;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// Answer stat and route requests against a bus catalogue.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Request document; stdin when omitted.
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Indent JSON output.
    #[arg(long)]
    pretty: bool,

    /// Log more to stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let now = std::time::Instant::now();
    let stdout = BufWriter::new(io::stdout().lock());

    match &cli.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            run(cli.format, BufReader::new(file), stdout, cli.pretty)?;
        }
        None => run(cli.format, io::stdin().lock(), stdout, cli.pretty)?,
    }

    info!(elapsed = ?now.elapsed(), "Done");
    Ok(())
}

fn run(format: Format, reader: impl io::BufRead, writer: impl io::Write, pretty: bool) -> anyhow::Result<()> {
    match format {
        Format::Json => pipeline::run_json(reader, writer, pretty),
        Format::Text => pipeline::run_text(reader, writer),
    }
}
