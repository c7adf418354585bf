use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use gallery_cli::config::{AppConfig, ConfigManager, get_config};
use gallery_cli::error::{CliError, CliResult, ExitCode};
use gallery_cli::orchestrators::{ScanOptions, ScanOrchestrator};
use gallery_cli::output::{OutputFormat, create_formatter};
use gallery_cli::terminal;
use gallery_core::FileId;

#[derive(Parser)]
#[command(name = "gallery")]
#[command(author, version, about = "Gallery - Media discovery for photo galleries", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover media files under a directory
    Scan {
        /// Directory to scan
        path: PathBuf,

        /// Accepted MIME type (can be specified multiple times, defaults to the configured types)
        #[arg(short = 't', long = "type", value_name = "MIME")]
        media_types: Vec<String>,

        /// Feature to enable, e.g. native_svg or external_shares (can be specified multiple times)
        #[arg(short = 'F', long = "feature", value_name = "NAME")]
        features: Vec<String>,

        /// Maximum folder levels below PATH to enter
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,

        /// Output format (defaults to output.default_format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Disable progress display
        #[arg(long)]
        no_progress: bool,

        /// Abort when the scan takes longer than this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Describe a single file by identifier
    Info {
        /// Directory the file lives under
        root: PathBuf,

        /// File identifier, as printed by `scan`
        id: FileId,

        /// Output format (defaults to output.default_format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
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

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., discovery.marker_name)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., discovery.marker_name)
        key: String,

        /// Value to set (lists are comma separated)
        value: String,
    },

    /// List all configuration values
    List,

    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("gallery_core", log::LevelFilter::Debug)
            .filter_module("gallery_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if !terminal::supports_ansi() {
        colored::control::set_override(false);
    }

    let exit_code = match run(cli.command).await {
        Ok(()) => ExitCode::Success,
        Err(error) => {
            eprint!("{}", error.format_for_user(cli.debug));
            error.exit_code()
        }
    };

    std::process::exit(exit_code as i32);
}

async fn run(command: Commands) -> CliResult<()> {
    match command {
        Commands::Scan {
            path,
            media_types,
            features,
            max_depth,
            format,
            no_progress,
            timeout,
        } => {
            let mut config = get_config()?;
            config.apply_cli_overrides(max_depth);
            let format = resolve_format(format, &config)?;
            let show_progress = !no_progress
                && config.output.progress_enabled
                && terminal::should_show_progress_by_default();

            let options = ScanOptions {
                media_types,
                features,
                show_progress,
                timeout: timeout.map(Duration::from_secs),
            };
            scan_command(config, path, format, options).await
        }
        Commands::Info { root, id, format } => {
            let config = get_config()?;
            let format = resolve_format(format, &config)?;
            info_command(config, root, id, format).await
        }
        Commands::Config { command } => config_command(command),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

/// Pick the format from the command line, falling back to the configuration
fn resolve_format(format: Option<OutputFormat>, config: &AppConfig) -> CliResult<OutputFormat> {
    match format {
        Some(format) => Ok(format),
        None => OutputFormat::from_string(&config.output.default_format)
            .map_err(|e| CliError::misuse(&format!("output.default_format: {e}"))),
    }
}

async fn scan_command(
    config: AppConfig,
    path: PathBuf,
    format: OutputFormat,
    options: ScanOptions,
) -> CliResult<()> {
    log::debug!("Starting scan of {}", path.display());

    let use_color = terminal::should_use_color(config.output.color_enabled);
    let orchestrator = ScanOrchestrator::new(config.discovery)?;
    let report = orchestrator.scan(&path, options).await?;

    let formatter = create_formatter(format, use_color);
    let output = formatter.format_batch(&report.media)?;
    if !output.is_empty() {
        println!("{}", output.trim_end());
    }

    if format == OutputFormat::Text && terminal::is_interactive() {
        if report.media.is_empty() {
            eprintln!("{}", "No media files found.".yellow());
        }
        eprintln!(
            "\n{} {} in {:.2}s",
            "Found".bold().green(),
            report.stats.summary(),
            report.elapsed.as_secs_f64()
        );
    }

    Ok(())
}

async fn info_command(
    config: AppConfig,
    root: PathBuf,
    id: FileId,
    format: OutputFormat,
) -> CliResult<()> {
    log::debug!("Looking up {id} under {}", root.display());

    let use_color = terminal::should_use_color(config.output.color_enabled);
    let media = ScanOrchestrator::new(config.discovery)?
        .info(&root, id)
        .await?;

    let formatter = create_formatter(format, use_color);
    println!("{}", formatter.format_single(&media)?.trim_end());

    Ok(())
}

fn config_command(command: ConfigCommand) -> CliResult<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            manager
                .set(&key, &value)
                .map_err(|e| CliError::misuse(&format!("{e:#}")))?;
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

            // Group items by section
            let mut sections: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
            for (key, value) in items {
                let (section, name) = key.split_once('.').unwrap_or(("general", key.as_str()));
                sections
                    .entry(section.to_string())
                    .or_default()
                    .push((name.to_string(), value));
            }

            for (section, items) in sections {
                println!("[{}]", section.yellow());
                for (key, value) in items {
                    println!("  {} = {}", key.cyan(), value);
                }
                println!();
            }
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
