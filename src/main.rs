//! Tangle CLI entry point

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "tangle")]
#[command(about = "Query and reshape extracted dependency graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List dependency cycles in a document
    Cycles(commands::CyclesArgs),
    /// Compute bounded reachability around selected nodes
    Closure(commands::ClosureArgs),
    /// Summarize dependencies at a chosen granularity
    Summarize(commands::SummarizeArgs),
    /// Print element and link counts
    Metrics(commands::MetricsArgs),
    /// Re-encode a document as XML or JSON
    Export(commands::ExportArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; reports go to stdout, so logs stay on stderr
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "tangle={log_level},tangle_core={log_level},tangle_report={log_level}"
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Tangle v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Cycles(args) => commands::cycles(args),
        Commands::Closure(args) => commands::closure(args),
        Commands::Summarize(args) => commands::summarize(args),
        Commands::Metrics(args) => commands::metrics(args),
        Commands::Export(args) => commands::export(args),
    }
}
