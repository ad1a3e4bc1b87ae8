//! Standardizer CLI - command-line interface for naming enforcement
//!
//! CDD Principle: Application Layer - CLI coordinates user interactions with domain services
//! - Resolves the config file from flag, environment, or conventional locations
//! - Handles external concerns like printing and process exit codes
//! - Keeps the library free of terminal and process concerns

use clap::{Parser, Subcommand, ValueEnum};
use standardizer::{
    locate_config, EntryKind, OutputFormat, ReportFormatter, ReportOptions, Standardizer,
    StandardizerConfig, StandardizerError, StandardizerResult, CONFIG_ENV_VAR,
};
use std::path::{Path, PathBuf};
use std::process;

/// Standardizer - directory and file naming enforcement
#[derive(Parser)]
#[command(name = "standardizer")]
#[command(version)]
#[command(about = "Validate directory and file names in a source tree against a naming policy")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the search directory and report naming issues (default)
    Check {
        /// Override baseConfig.searchDirectory
        #[arg(long)]
        root: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormatArg,

        /// Maximum number of issues to list in the banner
        #[arg(long)]
        max_issues: Option<usize>,
    },

    /// Validate configuration file
    ValidateConfig {
        /// Configuration file to validate
        config_file: Option<PathBuf>,
    },

    /// Show the effective naming rules
    Rules,
}

#[derive(Copy, Clone, ValueEnum, PartialEq, Debug)]
enum OutputFormatArg {
    Human,
    Json,
    Github,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Github => OutputFormat::GitHub,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match run_command(cli) {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_command(cli: Cli) -> StandardizerResult<i32> {
    let use_colors = !cli.no_color;

    match cli.command {
        None => run_check(cli.config, None, OutputFormatArg::Json, None, use_colors),
        Some(Commands::Check {
            root,
            format,
            max_issues,
        }) => run_check(cli.config, root, format, max_issues, use_colors),
        Some(Commands::ValidateConfig { config_file }) => {
            run_validate_config(config_file.or(cli.config))
        }
        Some(Commands::Rules) => run_list_rules(cli.config),
    }
}

fn load_config(config_path: Option<PathBuf>) -> StandardizerResult<StandardizerConfig> {
    let path = locate_config(config_path, Path::new("."));
    StandardizerConfig::load_from_file(path)
}

fn run_check(
    config_path: Option<PathBuf>,
    root: Option<PathBuf>,
    format: OutputFormatArg,
    max_issues: Option<usize>,
    use_colors: bool,
) -> StandardizerResult<i32> {
    let mut config = load_config(config_path)?;
    if let Some(root) = root {
        config.base_config.search_directory = root;
    }

    let standardizer = Standardizer::new_with_config(config)?.with_report_formatter(
        ReportFormatter::new(ReportOptions {
            use_colors,
            max_issues,
        }),
    );

    match standardizer.check() {
        Ok(summary) => {
            println!("{}", standardizer.format_report(&summary, format.into())?);
            Ok(0)
        }
        Err(err @ StandardizerError::IssuesFound { .. }) => {
            let summary = err.summary().cloned().unwrap_or_default();
            let formatter = standardizer.report_formatter();

            match format {
                OutputFormatArg::Json => {
                    // Keep stdout parseable; the banner goes to stderr
                    eprint!("{}", formatter.format_issue_banner(&summary));
                    eprint!("{}", formatter.format_failure_footer(&err));
                    println!("{}", standardizer.format_report(&summary, format.into())?);
                }
                OutputFormatArg::Human | OutputFormatArg::Github => {
                    print!("{}", standardizer.format_report(&summary, format.into())?);
                    eprint!("{}", formatter.format_failure_footer(&err));
                }
            }

            Ok(1)
        }
        Err(err) => Err(err),
    }
}

fn run_validate_config(config_path: Option<PathBuf>) -> StandardizerResult<i32> {
    let config_path = locate_config(config_path, Path::new("."));

    println!("Validating configuration: {}", config_path.display());

    match StandardizerConfig::load_from_file(&config_path) {
        Ok(config) => {
            let standardizer = Standardizer::new_with_config(config)?;
            let config = standardizer.config();
            println!("✅ Configuration is valid");

            println!("📊 Configuration summary:");
            println!(
                "  Search directory: {}",
                config.base_config.search_directory.display()
            );
            println!("  Ignore case: {}", config.base_config.ignore_case);
            println!("  Ignored directories: {}", config.ignore_directories.len());
            println!("  Ignored file patterns: {}", config.ignore_formats.len());
            println!(
                "  Extension overrides: {}",
                config.file_type_specific_naming.len()
            );

            let skipped = standardizer.policy().skipped_patterns();
            if !skipped.is_empty() {
                println!("⚠️  Skipped {} invalid pattern(s):", skipped.len());
                for pattern in skipped {
                    println!("  - {}: {}", pattern.pattern, pattern.reason);
                }
            }

            Ok(0)
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {}", e);
            Ok(1)
        }
    }
}

fn run_list_rules(config_path: Option<PathBuf>) -> StandardizerResult<i32> {
    let standardizer = Standardizer::new_with_config(load_config(config_path)?)?;
    let policy = standardizer.policy();

    println!("📋 Effective Naming Rules\n");

    println!(
        "📂 directories: {} (e.g. '{}')",
        policy.directory_rule().describe(),
        policy.example_valid_name(EntryKind::Directory, None)
    );
    println!(
        "📄 files: {} (e.g. '{}')",
        policy.file_rule().describe(),
        policy.example_valid_name(EntryKind::File, Some(".txt"))
    );

    for (extension, rule) in policy.extension_rules() {
        println!(
            "  {}: {} (e.g. '{}')",
            extension,
            rule.describe(),
            policy.example_valid_name(EntryKind::File, Some(extension))
        );
    }

    Ok(0)
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
