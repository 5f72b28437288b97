//! graphrev CLI: the `graphrev` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use support::GlobalArgs;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_ENV: &str = "GRAPHREV_LOG";

fn level_from_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Logs go to stderr so `--json` output stays machine-readable.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_from_verbosity(verbose).into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let globals = GlobalArgs {
        config: cli.config,
        store: cli.store,
        actor: cli.actor,
    };

    match cli.command {
        Commands::Read {
            revision,
            dataset,
            mode,
            json,
        } => commands::read::run(&globals, revision, dataset, mode, json),

        Commands::List {
            record,
            dataset,
            detail,
            json,
        } => commands::list::run(&globals, record, dataset, detail, json),

        Commands::Diff {
            left,
            right,
            dataset,
            triples,
            json,
        } => commands::diff::run(&globals, left, right, dataset, triples, json),

        Commands::Status {
            revision,
            status,
            dataset,
            json,
        } => commands::status::run(&globals, revision, status, dataset, json),

        Commands::Delete {
            revision,
            dataset,
            mode,
            json,
        } => commands::delete::run(&globals, revision, dataset, mode, json),

        Commands::Import { file, json } => commands::import::run(&globals, file, json),

        Commands::Export { graph, output } => commands::export::run(&globals, graph, output),
    }
}
