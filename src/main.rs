use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use neuralflow::{DeviceType, InputMode, LightingCondition, NoiseLevel, WorkMode};

mod cli;

#[derive(Parser)]
#[command(name = "neuralflow")]
#[command(about = "Neural Flow - adaptive voice, gesture and keyboard input")]
#[command(version)]
struct Cli {
    /// Directory to look for .neuralflow/config.toml in (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Path to the config file (overrides lookup)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: type commands, simulate voice and gestures
    Repl,

    /// Extract the command intent from a phrase and print it as JSON
    Extract {
        /// The phrase to interpret
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Current task, used for context enhancement
        #[arg(long)]
        task: Option<String>,
    },

    /// Recommend an input mode for a described context
    Recommend {
        /// The user is in a meeting
        #[arg(long)]
        meeting: bool,

        /// Ambient noise: quiet, moderate, loud, very_loud
        #[arg(long, default_value = "quiet")]
        noise: NoiseLevel,

        /// Device: desktop, laptop, tablet, mobile
        #[arg(long, default_value = "desktop")]
        device: DeviceType,

        /// Lighting: bright, normal, dim, dark
        #[arg(long, default_value = "normal")]
        lighting: LightingCondition,

        /// Work mode: focus, collaboration, research, creative, administrative
        #[arg(long, default_value = "focus")]
        work: WorkMode,

        /// Available modes besides keyboard and mouse (comma separated)
        #[arg(long, value_delimiter = ',')]
        modes: Vec<InputMode>,

        /// Preferred modes, most preferred first (comma separated)
        #[arg(long, value_delimiter = ',')]
        prefer: Vec<InputMode>,
    },

    /// Initialize a new .neuralflow/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Determine the working directory
    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Some(Commands::Init { force }) => {
            cli::init::init_command(&work_dir, cli.config, force).await?;
        }
        Some(Commands::Extract { text, task }) => {
            let config = cli::load_config(&work_dir, cli.config.as_deref())?;
            cli::extract::extract_command(&config, &text.join(" "), task)?;
        }
        Some(Commands::Recommend {
            meeting,
            noise,
            device,
            lighting,
            work,
            modes,
            prefer,
        }) => {
            let config = cli::load_config(&work_dir, cli.config.as_deref())?;
            let scenario = cli::recommend::Scenario {
                meeting,
                noise,
                device,
                lighting,
                work,
                modes,
                prefer,
            };
            cli::recommend::recommend_command(&config, scenario)?;
        }
        Some(Commands::Repl) | None => {
            let config = cli::load_config(&work_dir, cli.config.as_deref())?;
            cli::repl::repl_command(config).await?;
        }
    }

    Ok(())
}
