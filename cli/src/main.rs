//! wordvec command-line entry point
//!
//! Loads one pretrained vector backend and answers queries against it,
//! printing JSON on stdout. Logs go to stderr.

mod commands;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "wordvec")]
#[command(about = "Query pretrained GloVe, word2vec and FastText vectors")]
#[command(version)]
struct Cli {
    /// Log debug output
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: commands::Command,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_filter = if cli.verbose {
        "wordvec=debug,wordvec_cli=debug"
    } else {
        "wordvec=info,wordvec_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = commands::run(cli.command, &mut stdout) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
