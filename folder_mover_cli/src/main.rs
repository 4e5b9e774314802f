use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use folder_mover_cli::config::{self, AppConfig, ConfigManager};
use folder_mover_cli::orchestrators::SnapshotBackend;
use folder_mover_cli::orchestrators::discover_orchestrator::{DiscoverOptions, DiscoverOrchestrator};
use folder_mover_cli::orchestrators::filter_orchestrator::{exclude_folders, filter_document};
use folder_mover_cli::orchestrators::replicate_orchestrator::{
    ReplicateOptions, ReplicateOrchestrator,
};
use folder_mover_cli::output::OutputFormat;
use folder_mover_cli::terminal;
use folder_mover_core::document;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folder-mover")]
#[command(author, version, about = "Discover, export and replicate analytics folder trees", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Use this configuration file instead of the default one
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover every root folder tree of the account
    Discover {
        /// Write the document to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Disable progress display
        #[arg(long)]
        no_progress: bool,
    },

    /// Remove top-level folders from a document
    Filter {
        /// Document to read
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Folder id to exclude (can be specified multiple times)
        #[arg(short = 'e', long = "exclude", value_name = "ID")]
        exclude: Vec<String>,

        /// Write the result to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Recreate the folders of a document under a destination folder
    Replicate {
        /// Document to read
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        replication: ReplicationArgs,
    },

    /// Discover, filter and replicate in one run
    Migrate {
        /// Folder id to exclude, in addition to replication.excluded_folder_ids
        #[arg(short = 'e', long = "exclude", value_name = "ID")]
        exclude: Vec<String>,

        /// Also write the filtered document to this file
        #[arg(long, value_name = "FILE")]
        save_document: Option<PathBuf>,

        #[command(flatten)]
        replication: ReplicationArgs,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
struct ReplicationArgs {
    /// Destination folder ARN (defaults to replication.destination_folder_arn)
    #[arg(long, value_name = "ARN")]
    destination: Option<String>,

    /// Print the replication plan without creating anything
    #[arg(long)]
    dry_run: bool,

    /// Do not ask for confirmation
    #[arg(short, long)]
    yes: bool,

    /// Disable progress display
    #[arg(long)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Interactive setup for account, snapshot and destination
    Init {
        /// Reconfigure even if already set up
        #[arg(short, long)]
        force: bool,
    },

    /// Get a configuration value
    Get {
        /// Configuration key (e.g., account.region)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., replication.folder_id_prefix)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("folder_mover_core", log::LevelFilter::Debug)
            .filter_module("folder_mover_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let mut manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };

    match cli.command {
        Commands::Discover {
            output,
            format,
            no_progress,
        } => {
            let (config, ui) = load_config(&manager)?;
            let backend = SnapshotBackend::open(&config).await?;
            let options = DiscoverOptions {
                output,
                format,
                show_progress: ui.progress_allowed && !no_progress,
                use_color: ui.use_color,
            };
            DiscoverOrchestrator::new(&backend, options).run().await?;
        }
        Commands::Filter {
            input,
            exclude,
            output,
        } => {
            let (_, ui) = load_config(&manager)?;
            filter_document(&input, output.as_deref(), &exclude, ui.use_color).await?;
        }
        Commands::Replicate { input, replication } => {
            let (config, ui) = load_config(&manager)?;
            let folders = document::read_document(&input)
                .await
                .with_context(|| format!("Failed to read document {}", input.display()))?;
            let backend = SnapshotBackend::open(&config).await?;
            let options = replicate_options(&config, replication, ui)?;
            ReplicateOrchestrator::new(&backend, options)
                .replicate(&folders)
                .await?;
        }
        Commands::Migrate {
            exclude,
            save_document,
            replication,
        } => {
            let (config, ui) = load_config(&manager)?;
            migrate_command(&config, ui, exclude, save_document, replication).await?;
        }
        Commands::Config { command } => {
            config_command(&mut manager, command)?;
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

/// Terminal capabilities allowed by configuration
#[derive(Clone, Copy)]
struct Ui {
    use_color: bool,
    progress_allowed: bool,
}

fn load_config(manager: &ConfigManager) -> Result<(AppConfig, Ui)> {
    let config = manager.load().context("Failed to load configuration")?;
    if !config.output.color_enabled {
        colored::control::set_override(false);
    }
    let ui = Ui {
        use_color: config.output.color_enabled && terminal::supports_ansi(),
        progress_allowed: config.output.progress_enabled
            && terminal::should_show_progress_by_default(),
    };
    Ok((config, ui))
}

async fn migrate_command(
    config: &AppConfig,
    ui: Ui,
    exclude: Vec<String>,
    save_document: Option<PathBuf>,
    replication: ReplicationArgs,
) -> Result<()> {
    let backend = SnapshotBackend::open(config).await?;
    let options = replicate_options(config, replication, ui)?;

    let discovered = DiscoverOrchestrator::new(
        &backend,
        DiscoverOptions {
            show_progress: options.show_progress,
            use_color: ui.use_color,
            ..Default::default()
        },
    )
    .discover()
    .await?;

    let excluded = config.excluded_folder_ids(exclude);
    let folders = exclude_folders(discovered, &excluded, ui.use_color).kept;

    if let Some(path) = save_document {
        document::write_document(&path, &folders)
            .await
            .with_context(|| format!("Failed to write document {}", path.display()))?;
        eprintln!("Saved document to {}", path.display());
    }

    ReplicateOrchestrator::new(&backend, options)
        .replicate(&folders)
        .await?;
    Ok(())
}

fn replicate_options(config: &AppConfig, args: ReplicationArgs, ui: Ui) -> Result<ReplicateOptions> {
    Ok(ReplicateOptions {
        destination_arn: config.destination(args.destination)?,
        folder_id_prefix: config.replication.folder_id_prefix.clone(),
        dry_run: args.dry_run,
        assume_yes: args.yes,
        show_progress: ui.progress_allowed && !args.no_progress,
        use_color: ui.use_color,
    })
}

fn config_command(manager: &mut ConfigManager, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init { force } => {
            config::interactive_init(manager, force)?;
        }
        ConfigCommand::Get { key } => {
            let value = manager.get(&key)?;
            println!("{value}");
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list()?;
            eprintln!("{}", "Configuration:".bold().blue());
            eprintln!("Config file: {}", manager.get_config_path().display());
            eprintln!();

            let mut sections: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
            for (key, value) in items {
                let (section, rest) = key.split_once('.').unwrap_or(("general", key.as_str()));
                sections
                    .entry(section.to_string())
                    .or_default()
                    .push((rest.to_string(), value));
            }

            for (section, items) in sections {
                println!("[{}]", section.yellow());
                for (key, value) in items {
                    println!("  {} = {}", key.cyan(), value);
                }
                println!();
            }
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
