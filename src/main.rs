// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use beatsplit::app_config::{self, Config};
use beatsplit::{Controller, NumberingMode, NumberingScheme};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for NumberingMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliNumbering {
    /// 01, 02, 03 ...
    PerLevel,
    /// 0100, 0200, 0300 ...
    Flat,
}

impl From<CliNumbering> for NumberingMode {
    fn from(cli_numbering: CliNumbering) -> Self {
        match cli_numbering {
            CliNumbering::PerLevel => NumberingMode::PerLevel,
            CliNumbering::Flat => NumberingMode::Flat,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split the master document into Acts/Scenes/Beats directories
    Split {
        /// Master document (defaults to the configured master file)
        #[arg(value_name = "MASTER")]
        master: Option<PathBuf>,

        /// Output directory (defaults to the configured split directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Numbering convention for directory and file prefixes
        #[arg(short, long, value_enum)]
        numbering: Option<CliNumbering>,

        /// Fail on scene or beat markers without a parent
        #[arg(long)]
        strict: bool,
    },

    /// Merge the split directories back into the master document
    Merge {
        /// Split directory (defaults to the configured split directory)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Master document to rebuild; its header and trailing comment are kept
        #[arg(short, long)]
        master: Option<PathBuf>,
    },

    /// Remove blank lines and use underscores in names before merging
    Prep {
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Use spaces in names, space out paragraphs and shorten 4-digit prefixes
    Reformat {
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Generate shell completions for beatsplit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// beatsplit - split a screenplay master into Acts/Scenes/Beats and back
#[derive(Parser, Debug)]
#[command(name = "beatsplit")]
#[command(version)]
#[command(about = "Split a screenplay master file into Acts/Scenes/Beats directories and merge them back")]
#[command(long_about = "beatsplit turns a master screenplay into numbered directories and beat files, and rebuilds the master from them.

EXAMPLES:
    beatsplit split                             # master.fountain -> split_files/
    beatsplit split draft.fountain -o beats     # Split a specific file
    beatsplit split --numbering flat            # Use 0100, 0200, ... prefixes
    beatsplit reformat                          # Spaces in names, spaced paragraphs
    beatsplit prep                              # Undo reformat before merging
    beatsplit merge                             # split_files/ -> master.fountain
    beatsplit completions bash > beatsplit.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in beatsplit.json by default. You can specify a
    different config file with --config. If the config file doesn't exist, a
    default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "beatsplit.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    // Initialize the logger at trace and narrow it with set_max_level below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "beatsplit", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(cmd_log_level) = &cli.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config = load_config(&cli)?;
    run(cli.command, config, Path::new(&cli.config_path))
}

fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = Path::new(&cli.config_path);
    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", cli.config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    // Command line log level wins over the configured one
    match &cli.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(level_filter(&config.log_level)),
    }

    Ok(config)
}

fn run(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Split {
            master,
            output,
            numbering,
            strict,
        } => {
            if let Some(numbering) = numbering {
                config.layout.numbering = NumberingScheme::from_mode(numbering.into());
            }
            config.strict |= strict;

            let master = master.unwrap_or_else(|| PathBuf::from(&config.master_file));
            let output = output.unwrap_or_else(|| PathBuf::from(&config.split_dir));
            let controller = Controller::with_config(config)?.protect(config_path);

            let summary = controller
                .split(&master, &output)
                .with_context(|| format!("Split of {:?} failed", master))?;
            info!(
                "Done! {} act(s), {} scene(s), {} beat(s) written to {:?}",
                summary.acts, summary.scenes, summary.beats, output
            );
        }
        Commands::Merge { dir, master } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(&config.split_dir));
            let master = master.unwrap_or_else(|| PathBuf::from(&config.master_file));
            let controller = Controller::with_config(config)?;

            let summary = controller
                .merge(&dir, &master)
                .with_context(|| format!("Merge of {:?} failed", dir))?;
            info!("Done! {} line(s) written to {:?}", summary.lines_written, master);
        }
        Commands::Prep { dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(&config.split_dir));
            Controller::with_config(config)?.prep(&dir)?;
        }
        Commands::Reformat { dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(&config.split_dir));
            Controller::with_config(config)?.reformat(&dir)?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
