//! CLI frontend for spla, the Splatoon random draw tool.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "spla",
    about = "spla — random rule, stage, and weapon draws for Splatoon",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// JSON file holding cached catalogs, filters, and the roster
    #[arg(long, global = true, default_value = "spla-store.json")]
    pub store: PathBuf,

    /// Read catalogs from <DIR>/{rule,stage,weapon}.json instead of the network
    #[arg(long, global = true)]
    pub catalog_dir: Option<PathBuf>,

    /// Session config file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// RNG seed for reproducible draws
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Display locale (e.g. ja_JP, en_US)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a rule, a stage, weapons for every member, or all of them
    Draw {
        /// What to draw: rule, stage, weapon, or all
        #[arg(default_value = "all")]
        target: String,
    },

    /// List a catalog and which items the filter allows
    Catalog {
        /// Catalog kind: rule, stage, or weapon
        kind: String,
    },

    /// Show or change the filter for one catalog
    Filter {
        /// Catalog kind: rule, stage, or weapon
        kind: String,

        /// Allow every item
        #[arg(long, conflicts_with_all = ["none", "keys"])]
        all: bool,

        /// Clear the filter (an empty filter allows every item)
        #[arg(long, conflicts_with = "keys")]
        none: bool,

        /// Allow only these item keys
        keys: Vec<String>,
    },

    /// Show or change the roster
    Roster {
        /// Number of members
        #[arg(short, long)]
        count: Option<u32>,

        /// Rename a member, e.g. --name 2=Ika (repeatable)
        #[arg(short, long = "name", value_name = "INDEX=NAME")]
        names: Vec<String>,

        /// Split members into two teams: on or off
        #[arg(short, long)]
        teams: Option<String>,
    },

    /// Drop cached catalogs and fetch them again
    Refresh,

    /// Start an interactive session
    Session,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(default)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.opts.verbose);
    let opts = &cli.opts;

    let result = match cli.command {
        Commands::Draw { target } => commands::draw::run(opts, &target).await,
        Commands::Catalog { kind } => commands::catalog::run(opts, &kind).await,
        Commands::Filter {
            kind,
            all,
            none,
            keys,
        } => commands::filter::run(opts, &kind, all, none, &keys).await,
        Commands::Roster {
            count,
            names,
            teams,
        } => commands::roster::run(opts, count, &names, teams.as_deref()).await,
        Commands::Refresh => commands::refresh::run(opts).await,
        Commands::Session => commands::session::run(opts).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
