//! rastar — build road graphs and answer shortest-route queries.
//!
//! ```text
//! rastar build  map.csv map.bin --comment-lines 3
//! rastar info   map.bin
//! rastar route  map.bin 240949599 771979683 --solution solution.dat
//! rastar route  map.bin --from-coord 41.387,2.170 --to-coord 41.403,2.174
//! ```
//!
//! # Exit codes
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | success                                         |
//! | 1    | any other failure (I/O, malformed file, …)      |
//! | 2    | bad command line                                |
//! | 3    | start node not in the graph                     |
//! | 4    | target node not in the graph                    |
//! | 5    | no route (target unreachable or budget spent)   |

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use ra_search::{Endpoint, SearchError};

#[cfg(feature = "parallel")]
mod batch;
mod build_graph;
mod info;
mod route;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a delimited node/way export into a binary graph file.
    Build(build_graph::BuildArgs),
    /// Print size and degree statistics of a binary graph file.
    Info(info::InfoArgs),
    /// Find the shortest route between two nodes.
    #[command(visible_alias = "r")]
    Route(route::RouteArgs),
    /// Route many start/target pairs in parallel.
    #[cfg(feature = "parallel")]
    Batch(batch::BatchArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Build(args) => build_graph::run(args),
        Commands::Info(args)  => info::run(args),
        Commands::Route(args) => route::run(args),
        #[cfg(feature = "parallel")]
        Commands::Batch(args) => batch::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<SearchError>() {
        Some(SearchError::NodeNotFound { endpoint: Endpoint::Start, .. }) => 3,
        Some(SearchError::NodeNotFound { endpoint: Endpoint::Target, .. }) => 4,
        Some(SearchError::NoPathFound { .. } | SearchError::BudgetExhausted { .. }) => 5,
        _ => 1,
    }
}
