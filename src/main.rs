use anyhow::Context;
use clap::Parser;
use log::{Level, LevelFilter, Log};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::PathBuf;

use logtweaks::adapter::DEFAULT_UNIT;
use logtweaks::formatter::{DEFAULT_PATTERN, DEFAULT_TIME_FORMAT};
use logtweaks::{ColourChoice, ColouringHandler, IndentingAdapter, LogConfig, TerminalSink};

static LEVEL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\[?(?P<level>trace|debug|info|warning|warn|error|err|critical|fatal)\]?:?(?:\s+|$)")
        .unwrap()
});

#[derive(Parser)]
#[command(name = "logtweaks")]
#[command(about = "Log lines of text through a colouring, indenting logger")]
#[command(version)]
struct Args {
    /// Input file (default: stdin)
    #[arg(value_name = "FILE")]
    input_file: Option<PathBuf>,

    /// Level for lines without a recognised level prefix
    #[arg(short = 'l', long, default_value = "info")]
    level: Level,

    /// Take each line's level from a leading token such as "ERROR:" or "[warn]"
    #[arg(long)]
    detect_levels: bool,

    /// Record format, e.g. "[%(levelname)-5s] %(message)s"
    #[arg(long = "format", default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// chrono format used for %(asctime)s
    #[arg(long, default_value = DEFAULT_TIME_FORMAT)]
    time_format: String,

    /// Initial indentation depth
    #[arg(long, default_value_t = 0)]
    indent: usize,

    /// Text inserted once per indentation level
    #[arg(long, default_value = DEFAULT_UNIT)]
    indent_unit: String,

    /// Force colored output
    #[arg(long)]
    color: bool,

    /// Disable colored output
    #[arg(long, conflicts_with = "color")]
    no_color: bool,

    /// Output file (default: stderr)
    #[arg(short = 'o', long = "output")]
    output_file: Option<PathBuf>,
}

/// Split a recognised level token off the front of `line`
fn split_level(line: &str) -> Option<(Level, &str)> {
    let caps = LEVEL_PREFIX.captures(line)?;
    let level = match caps["level"].to_lowercase().as_str() {
        "trace" => Level::Trace,
        "debug" => Level::Debug,
        "info" => Level::Info,
        "warn" | "warning" => Level::Warn,
        _ => Level::Error, // error, err, critical, fatal
    };
    let rest = &line[caps.get(0)?.end()..];
    Some((level, rest))
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = LogConfig {
        colour: ColourChoice::from_flags(args.color, args.no_color),
        pattern: args.pattern,
        time_format: args.time_format,
        indent_unit: args.indent_unit,
    };

    // Set up output
    let sink: Box<dyn TerminalSink> = if let Some(output_path) = &args.output_file {
        let file = File::create(output_path).with_context(|| {
            format!("Failed to create output file '{}'", output_path.display())
        })?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(io::stderr())
    };

    let handler = ColouringHandler::from_config(sink, &config).context("Invalid --format")?;
    handler
        .init(LevelFilter::Trace)
        .context("Failed to install logger")?;

    let mut logger = IndentingAdapter::new(log::logger())
        .with_unit(config.indent_unit.clone())
        .with_target("logtweaks");
    for _ in 0..args.indent {
        logger.indent();
    }

    // Set up input
    let input: Box<dyn BufRead> = if let Some(input_path) = &args.input_file {
        let file = File::open(input_path).with_context(|| {
            format!("Failed to open input file '{}'", input_path.display())
        })?;
        Box::new(BufReader::new(file))
    } else {
        Box::new(BufReader::new(io::stdin()))
    };

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let (level, message) = if args.detect_levels {
            split_level(&line).unwrap_or((args.level, line.as_str()))
        } else {
            (args.level, line.as_str())
        };
        logger.log_at(level, message);
    }

    logger.flush();
    Ok(())
}
