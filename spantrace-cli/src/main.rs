use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use spantrace::{Profiler, ProfilerConfig};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

mod record;
mod summary;

#[derive(Parser)]
#[command(name = "spantrace")]
#[command(about = "record and inspect chrome trace span files")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print per-name duration statistics for a trace array
    Summary {
        #[arg(help = "trace file (json array format)")]
        trace: PathBuf,

        #[arg(long, default_value_t = 20, help = "number of span names to show")]
        top: usize,
    },
    /// Record a demo workload into a trace file
    Record {
        #[arg(short, long, help = "profiler configuration file (toml format)")]
        config: Option<PathBuf>,

        #[arg(short, long, help = "output file, overrides the configured path")]
        output: Option<PathBuf>,

        #[arg(long, default_value_t = 4, help = "number of worker threads")]
        workers: usize,

        #[arg(long, default_value_t = 100, help = "iterations per worker")]
        iterations: u32,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match args.command {
        Command::Summary { trace, top } => {
            let file = File::open(&trace)
                .with_context(|| format!("failed to open trace path={}", trace.display()))?;
            let mut summary = summary::Summary::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to parse trace path={}", trace.display()))?;
            summary.truncate(top);
            println!("{summary}");
        }
        Command::Record {
            config,
            output,
            workers,
            iterations,
        } => {
            let config = match config {
                Some(path) => ProfilerConfig::load(&path)
                    .with_context(|| format!("failed to load config path={}", path.display()))?,
                None => ProfilerConfig::default(),
            };
            let output = output.unwrap_or_else(|| config.output_path.clone());
            let profiler = Profiler::with_config(config);

            match record::record_demo(&profiler, &output, workers, iterations)? {
                Some(report) => tracing::info!(
                    session = %report.name,
                    spans = report.spans,
                    path = %report.output_path.display(),
                    "trace written"
                ),
                None => tracing::info!("profiling disabled at build time, nothing written"),
            }
        }
    }

    Ok(())
}
