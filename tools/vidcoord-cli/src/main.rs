//! vidcoord CLI: map clicks on paused video frames to intrinsic pixels.
//!
//! Usage:
//!   vidcoord map [OPTIONS]        Map one display-space click
//!   vidcoord replay <SCRIPT>      Replay a JSONL notification script
//!   vidcoord source <INPUT>       Resolve a URL or file into a player src
//!   vidcoord config init|show     Write or print the configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vidcoord_common::config::{AppConfig, LoggingConfig, MarkerProjection};

mod commands;

#[derive(Parser)]
#[command(
    name = "vidcoord",
    about = "Record clicks on paused video frames in intrinsic video pixels",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/vidcoord/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProjectionArg {
    Letterboxed,
    Stretched,
}

impl From<ProjectionArg> for MarkerProjection {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::Letterboxed => MarkerProjection::Letterboxed,
            ProjectionArg::Stretched => MarkerProjection::Stretched,
        }
    }
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

#[derive(Subcommand)]
enum Commands {
    /// Map one click from display space to intrinsic pixels
    Map {
        /// Intrinsic video size, e.g. 1920x1080
        #[arg(long)]
        intrinsic: String,

        /// Display box size, e.g. 640x480
        #[arg(long = "box")]
        display_box: String,

        /// Display box origin, e.g. 0,0
        #[arg(long, default_value = "0,0")]
        origin: String,

        /// Pointer position, e.g. 100,100
        #[arg(long)]
        at: String,
    },

    /// Replay a JSONL notification script through a session
    Replay {
        /// Path to the script (one notification per line)
        script: PathBuf,

        /// Frame rate assumed for frame index estimation
        #[arg(long)]
        frame_rate: Option<f64>,

        /// Marker projection mode
        #[arg(long, value_enum)]
        projection: Option<ProjectionArg>,

        /// Fall back to the display box size when no intrinsic size is known
        #[arg(long)]
        allow_display_fallback: bool,

        /// Print every transition, not just deliveries
        #[arg(long)]
        trace: bool,
    },

    /// Resolve a URL or local file into a player src
    Source {
        /// URL or file path
        input: String,

        /// Print the full data URL instead of a summary
        #[arg(long)]
        full: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    vidcoord_common::logging::init_logging(&LoggingConfig {
        level,
        json: cli.json_logs || config.logging.json,
    });

    match cli.command {
        Commands::Map {
            intrinsic,
            display_box,
            origin,
            at,
        } => commands::map::run(&intrinsic, &display_box, &origin, &at),
        Commands::Replay {
            script,
            frame_rate,
            projection,
            allow_display_fallback,
            trace,
        } => {
            if let Some(rate) = frame_rate {
                config.annotator.assumed_frame_rate = rate;
            }
            if let Some(projection) = projection {
                config.annotator.projection = projection.into();
            }
            config.annotator.allow_display_fallback |= allow_display_fallback;
            commands::replay::run(script, config.annotator, trace)
        }
        Commands::Source { input, full } => commands::source::run(&input, full),
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => commands::config::init(cli.config, force),
            ConfigAction::Show => commands::config::show(&config),
        },
    }
}
