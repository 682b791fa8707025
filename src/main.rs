use anyhow::Result;
use clap::{Parser, Subcommand};
use statusdex::index::build::{build_index_auto, update_index_auto, update_index_with_config};
use statusdex::index::stats::show_stats;
use statusdex::index::types::IndexConfig;
use statusdex::output;
use statusdex::query::SearchOptions;
use statusdex::query::executor::search_index_with_config;
use statusdex::query::scan::scan_search_with_config;
use statusdex::utils::{AppConfig, find_workspace_root, index_file_path, remove_index};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "statusdex")]
#[command(about = "Incremental ticket and keyword index for status-reporting workspaces")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log progress details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Distinct free-text tokens indexed per file
    #[arg(long, global = true)]
    token_limit: Option<usize>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from scratch
    Index {
        /// Workspace path (auto-detects the workspace root)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update the index, re-reading only changed files
    Update {
        /// Workspace path (auto-detects the workspace root)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search the index
    Search {
        /// Query text (ticket codes and/or keywords)
        #[arg(required = true)]
        query: Vec<String>,

        /// Workspace path
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Maximum number of results (1-20)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Update the index before searching
        #[arg(short, long)]
        refresh: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search by scanning the workspace directly, without the index
    Scan {
        /// Query text (ticket codes and/or keywords)
        #[arg(required = true)]
        query: Vec<String>,

        /// Workspace path
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Maximum number of results (1-20)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show index statistics
    Stats {
        /// Workspace path
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Delete the index file
    Remove {
        /// Workspace path
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut app_config = AppConfig::load()?;
    if let Some(limit) = cli.token_limit {
        app_config.index.token_limit = limit;
    }
    let config = &app_config.index;
    let color = !cli.no_color;

    match cli.command {
        Commands::Index { path, json } => {
            let summary = build_index_auto(&path, config, !json)?;
            if json {
                output::print_json(&summary)?;
            } else {
                output::print_build_summary(&summary)?;
            }
        }
        Commands::Update { path, json } => {
            let summary = update_index_auto(&path, config, !json)?;
            if json {
                output::print_json(&summary)?;
            } else {
                output::print_update_summary(&summary)?;
            }
        }
        Commands::Search {
            query,
            path,
            limit,
            refresh,
            json,
        } => {
            let root = find_workspace_root(&path, config)?;
            if refresh {
                update_index_with_config(&root, config, false)?;
            } else {
                warn_if_unindexed(&root, config);
            }
            let options = SearchOptions {
                limit: Some(limit.unwrap_or(app_config.search_limit)),
            };
            let results = search_index_with_config(&root, &query.join(" "), &options, config)?;
            if json {
                output::print_json(&results)?;
            } else {
                output::print_results(&results, color)?;
            }
        }
        Commands::Scan {
            query,
            path,
            limit,
            json,
        } => {
            let root = find_workspace_root(&path, config)?;
            let options = SearchOptions {
                limit: Some(limit.unwrap_or(app_config.search_limit)),
            };
            let results = scan_search_with_config(&root, &query.join(" "), &options, config)?;
            if json {
                output::print_json(&results)?;
            } else {
                output::print_results(&results, color)?;
            }
        }
        Commands::Stats { path } => {
            let root = find_workspace_root(&path, config)?;
            show_stats(&root, config)?;
        }
        Commands::Remove { path } => {
            let root = find_workspace_root(&path, config)?;
            if remove_index(&root, config)? {
                println!("Removed index for: {}", root.display());
            } else {
                println!("No index found for: {}", root.display());
            }
        }
    }

    Ok(())
}

fn warn_if_unindexed(root: &Path, config: &IndexConfig) {
    if !index_file_path(root, config).exists() {
        eprintln!("No index found. Run 'statusdex index' first, or pass --refresh.");
    }
}
