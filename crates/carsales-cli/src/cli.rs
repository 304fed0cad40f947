use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use carsales_model::{parse_count, parse_threshold, AnalyzerConfig};
use clap::{Parser, Subcommand};

use crate::render::{write_view, OutputFormat};
use crate::session::{run_interactive, Session, View};

#[derive(Debug, Parser)]
#[command(name = "carsales")]
#[command(about = "Generate synthetic car sales data and explore totals, rankings and top performers.")]
pub struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// JSON config file (categories, defaultCount, defaultThreshold, maxCount).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Seed for data generation. Without it every run produces different data.
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate one table and print every view of it.
    Demo(DemoArgs),
    /// Read commands from stdin, one per line (`help` lists them).
    Session,
}

#[derive(Debug, Parser)]
struct DemoArgs {
    /// Number of salespeople (defaults to the configured count).
    #[arg(long, allow_hyphen_values = true)]
    count: Option<String>,

    /// Total sales threshold for the top performer view (defaults to the configured threshold).
    #[arg(long, allow_hyphen_values = true)]
    threshold: Option<String>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    run_with_args(args)
}

pub fn run_with_args(args: Args) -> Result<()> {
    let config = match args.config.as_deref() {
        Some(path) => load_config(path)?,
        None => AnalyzerConfig::default(),
    };
    log::debug!("config: {config:?}");

    let mut session = Session::new(config, args.seed);
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let result = match args.command {
        Command::Demo(demo) => run_demo(&mut session, &demo, &mut handle, args.format),
        Command::Session => {
            let stdin = io::stdin();
            run_interactive(&mut session, stdin.lock(), &mut handle, args.format)
                .map_err(anyhow::Error::from)
        }
    };

    match result {
        // A downstream consumer closing the pipe early (`carsales demo | head`) is not an error.
        Err(err) if is_broken_pipe(&err) => Ok(()),
        other => other,
    }
}

pub fn load_config(path: &Path) -> Result<AnalyzerConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    AnalyzerConfig::from_json_str(&text).with_context(|| format!("load config {}", path.display()))
}

fn run_demo<W: Write>(
    session: &mut Session,
    args: &DemoArgs,
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let count = match args.count.as_deref() {
        Some(input) => parse_count(input)?,
        None => session.config().default_count,
    };
    let threshold = match args.threshold.as_deref() {
        Some(input) => parse_threshold(input)?,
        None => session.config().default_threshold,
    };

    session.generate(count)?;
    write_view(out, format, View::Sales, &session.sales_view()?)?;
    write_view(out, format, View::EntityTotals, &session.totals_view()?)?;
    write_view(out, format, View::CategoryTotals, &session.categories_view()?)?;
    write_view(out, format, View::Rankings, &session.rankings_view()?)?;
    write_view(out, format, View::Filtered, &session.filter_view(threshold)?)?;
    out.flush()?;
    Ok(())
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
    })
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default `warn` level.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
