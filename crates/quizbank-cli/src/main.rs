//! Quizbank CLI - Turn the KCNA exam-prep PDF into a JSON question bank

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Quizbank - Turn the KCNA exam-prep PDF into a JSON question bank
#[derive(Parser)]
#[command(name = "quizbank")]
#[command(author = "Lalo Morales <lalomorales22@github.com>")]
#[command(version)]
#[command(about = "Turn the KCNA exam-prep PDF into a JSON question bank", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ./quizbank.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default config file in the user config directory
    Init,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Build a question bank from the Quizzes and Solutions parts
    Build {
        /// Source PDF
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// pdftotext dump (created from the PDF when missing)
        #[arg(long)]
        text: Option<PathBuf>,

        /// Output JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on the first unexpected line layout
        #[arg(long)]
        strict: bool,
    },

    /// Fill options and answer indices into an existing question set
    Fill {
        /// Source PDF
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// pdftotext dump (created from the PDF when missing)
        #[arg(long)]
        text: Option<PathBuf>,

        /// Question set to fill
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Output JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on the first unexpected line layout
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizbank=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizbank=info,warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(config_path),
        },
        Commands::Build {
            pdf,
            text,
            output,
            strict,
        } => commands::build::run(
            config_path,
            commands::build::BuildArgs {
                pdf,
                text,
                output,
                strict,
            },
        ),
        Commands::Fill {
            pdf,
            text,
            source,
            output,
            strict,
        } => commands::fill::run(
            config_path,
            commands::fill::FillArgs {
                pdf,
                text,
                source,
                output,
                strict,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
