use std::{
    io,
    path::{Path, PathBuf},
};

mod list;
mod shell;
mod show;
mod terminal;

use advisor::{Config, CourseIndex, domain::CONFIG_FILE_NAME, storage};
use anyhow::Context;
use clap::ArgAction;
use list::List;
use shell::Shell;
use show::Show;
use terminal::Style;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a configuration file (defaults to ./advisor.toml if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Menu(Menu::default()))
            .run(self.config.as_deref())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout belongs to the menu
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Browse the catalogue from an interactive menu (default)
    Menu(Menu),

    /// List every course in alphanumeric order
    List(List),

    /// Show a single course and its prerequisites
    Show(Show),

    /// Write a default configuration file
    Init(Init),
}

impl Command {
    fn run(self, config_path: Option<&Path>) -> anyhow::Result<()> {
        match self {
            Self::Menu(command) => command.run(&load_config(config_path)?)?,
            Self::List(command) => command.run(&load_config(config_path)?)?,
            Self::Show(command) => command.run(&load_config(config_path)?)?,
            Self::Init(command) => {
                command.run(config_path.unwrap_or_else(|| Path::new(CONFIG_FILE_NAME)))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, clap::Parser)]
pub struct Menu {
    /// Catalogue file to load before the menu is shown
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,
}

impl Menu {
    #[instrument(level = "debug", skip(config))]
    fn run(self, config: &Config) -> anyhow::Result<()> {
        let mut index = CourseIndex::new();
        let stdin = io::stdin();
        let stdout = io::stdout();

        let mut shell = Shell::new(
            stdin.lock(),
            stdout.lock(),
            &mut index,
            config,
            Style::detect(),
        );

        if let Some(path) = &self.load {
            shell.load(path).context("failed to write to stdout")?;
        }

        shell.run().context("menu session failed")?;
        Ok(())
    }
}

#[derive(Debug, Default, clap::Parser)]
pub struct Init {
    /// Overwrite an existing configuration file
    #[arg(long)]
    force: bool,
}

impl Init {
    #[instrument]
    fn run(self, path: &Path) -> anyhow::Result<()> {
        if path.exists() && !self.force {
            anyhow::bail!(
                "Configuration already exists at {} (use --force to overwrite)",
                path.display()
            );
        }

        Config::default()
            .save(path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", path.display()))?;

        println!("Wrote default configuration to {}", path.display());
        Ok(())
    }
}

/// Resolves the configuration.
///
/// An explicitly requested file must exist. Otherwise `advisor.toml` in the
/// working directory is used if present, and the defaults if not.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let path = Path::new(CONFIG_FILE_NAME);
            if !path.exists() {
                tracing::debug!("no configuration file, using defaults");
                return Ok(Config::default());
            }
            path
        }
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    Config::load(path).map_err(anyhow::Error::msg)
}

/// Loads a catalogue file into a fresh index for the one-shot commands.
fn load_index(file: &Path, config: &Config) -> anyhow::Result<CourseIndex> {
    let mut index = CourseIndex::new();
    let report = storage::load_path(file, &mut index, config)
        .with_context(|| format!("failed to load catalogue {}", file.display()))?;

    if report.skipped > 0 {
        tracing::info!(skipped = report.skipped, "some lines were not course records");
    }

    Ok(index)
}
