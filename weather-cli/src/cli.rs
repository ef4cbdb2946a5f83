use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use weatherdash_core::{CityStore, Config, Dashboard, FileStore, provider};

use crate::{configure, session, terminal::TerminalRenderer};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Weather and air quality for the cities you track")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show every tracked city, then keep prompting for changes (default).
    Dashboard,

    /// Show every tracked city once and exit.
    Show {
        /// Include humidity and wind on every card.
        #[arg(long)]
        expanded: bool,
    },

    /// Start tracking a city.
    Add {
        /// City name as you would type it into a search box.
        city: String,
    },

    /// Stop tracking a city.
    Remove {
        city: String,
    },

    /// Print tracked cities and their coordinates without fetching anything.
    List,

    /// Edit the configuration interactively.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };
        let config = Config::load_from(&config_path)?;

        match self.command.unwrap_or(Command::Dashboard) {
            Command::Configure => configure::run(config, &config_path)?,
            Command::List => {
                let store = open_store(&config)?;
                if store.cities().is_empty() {
                    println!("No cities tracked yet. Try `weatherdash add <city>`.");
                }
                for city in store.cities() {
                    println!("{:<24} {:>9.4} {:>10.4}", city.name, city.latitude, city.longitude);
                }
            }
            Command::Show { expanded } => {
                let mut dash = open_dashboard(&config)?;
                dash.renderer_mut().set_expand_all(expanded);
                dash.start().await;
                if dash.cities().is_empty() {
                    println!("No cities tracked yet. Try `weatherdash add <city>`.");
                } else if dash.renderer().board().is_empty() {
                    println!("Could not fetch conditions for any tracked city.");
                }
            }
            Command::Add { city } => {
                let mut dash = open_dashboard(&config)?;
                // The notice is already on screen; the error only sets the exit status.
                dash.add_city(&city).await?;
            }
            Command::Remove { city } => {
                let mut dash = open_dashboard(&config)?;
                if !dash.remove_city(&city).await? {
                    println!("'{city}' is not on the dashboard.");
                }
            }
            Command::Dashboard => {
                let mut dash = open_dashboard(&config)?;
                let replay = dash.replay();
                session::run(&mut dash, replay).await?;
            }
        }

        Ok(())
    }
}

fn open_store(config: &Config) -> anyhow::Result<CityStore> {
    let dir = config.resolved_data_dir().context("Failed to locate data directory")?;
    tracing::debug!(dir = %dir.display(), "opening city store");
    Ok(CityStore::open(Box::new(FileStore::new(dir))))
}

fn open_dashboard(config: &Config) -> anyhow::Result<Dashboard<TerminalRenderer>> {
    Ok(Dashboard::new(
        provider::geocoder_from_config(config),
        provider::conditions_from_config(config),
        open_store(config)?,
        TerminalRenderer::new(&config.display),
    ))
}
