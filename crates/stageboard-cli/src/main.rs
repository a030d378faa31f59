mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::item::ItemSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "stageboard",
    about = "Pipeline boards and revenue for creators, coaches, podcasters and freelancers",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .stageboard/)
    #[arg(long, global = true, env = "STAGEBOARD_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Base URL of a remote item store; overrides the configured store
    #[arg(long, global = true, env = "STAGEBOARD_REMOTE")]
    remote: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize stageboard in the current project
    Init {
        /// Default niche: creator, coach, podcaster or freelancer
        #[arg(long)]
        niche: Option<String>,
    },

    /// Show a niche's stage vocabulary and status mapping
    Stages {
        /// Niche name (default: config default_niche)
        niche: Option<String>,
    },

    /// Manage items
    Item {
        #[command(subcommand)]
        subcommand: ItemSubcommand,
    },

    /// Move an item to another stage
    Move { id: String, stage: String },

    /// Show the pipeline board
    Board {
        #[arg(long)]
        niche: Option<String>,
    },

    /// Revenue metrics and the monthly series
    Revenue {
        #[arg(long)]
        niche: Option<String>,
        /// month, quarter, ytd or custom
        #[arg(long, default_value = "month")]
        window: String,
        /// Custom window start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Custom window end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Chart this calendar year in full
        #[arg(long)]
        year: Option<i32>,
    },

    /// Serve the item CRUD and dashboard API
    Serve {
        /// Port to listen on (default: server.port from config; 0 = OS-assigned)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let remote = cli.remote.as_deref();

    let result = match cli.command {
        Commands::Init { niche } => cmd::init::run(&root, niche.as_deref(), cli.json),
        Commands::Stages { niche } => cmd::stages::run(&root, niche.as_deref(), cli.json),
        Commands::Item { subcommand } => cmd::open_store(&root, remote)
            .and_then(|store| cmd::item::run(&root, store.as_ref(), subcommand, cli.json)),
        Commands::Move { id, stage } => cmd::open_store(&root, remote)
            .and_then(|store| cmd::move_item::run(store.as_ref(), &id, &stage, cli.json)),
        Commands::Board { niche } => cmd::open_store(&root, remote).and_then(|store| {
            cmd::board::run(&root, store.as_ref(), niche.as_deref(), cli.json)
        }),
        Commands::Revenue {
            niche,
            window,
            from,
            to,
            year,
        } => cmd::open_store(&root, remote).and_then(|store| {
            let args = cmd::revenue::RevenueArgs {
                niche: niche.as_deref(),
                window: &window,
                from: from.as_deref(),
                to: to.as_deref(),
                year,
            };
            cmd::revenue::run(&root, store.as_ref(), args, cli.json)
        }),
        Commands::Serve { port } => cmd::serve::run(&root, port),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
