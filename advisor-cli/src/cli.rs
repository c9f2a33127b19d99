use std::{fs, io, path::PathBuf, sync::Arc};

use advisor_core::{
    Assessment, Config, Observation, ProviderId, WeatherSnapshot, clothing, provider, umbrella, uv,
};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use crate::{prompt, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "advisor", version, about = "Umbrella, UV and clothing advice from a weather observation")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Format {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Assess an observation read from a JSON file ("-" for stdin).
    Assess {
        input: String,

        /// Treat the input as a raw provider payload ("openweather" or "weatherapi").
        #[arg(long)]
        provider: Option<ProviderId>,

        /// UV index to use when the input carries none.
        #[arg(long)]
        uv: Option<f64>,

        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },

    /// Enter an observation interactively.
    Prompt {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Inspect or initialise the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print where the config file lives.
    Path,
    /// Print the effective configuration as TOML.
    Show,
    /// Write the default configuration to disk.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Assess { input, provider, uv, format } => {
                let config = load_config(self.config.as_ref())?;
                let mut obs = read_observation(&input, provider)?;
                if obs.uv_index.is_none() {
                    obs.uv_index = uv;
                }
                report(obs, config, format).await?;
            }
            Command::Prompt { format } => {
                let config = load_config(self.config.as_ref())?;
                let obs = prompt::observation()?;
                report(obs, config, format).await?;
            }
            Command::Config { action } => run_config(action, self.config)?,
        }

        Ok(())
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn read_observation(input: &str, payload: Option<ProviderId>) -> anyhow::Result<Observation> {
    let json = if input == "-" {
        io::read_to_string(io::stdin()).context("Failed to read observation from stdin")?
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read observation file: {input}"))?
    };

    let obs = match payload {
        Some(id) => {
            debug!(provider = %id, "mapping provider payload");
            provider::observation_from_json(id, &json)?
        }
        None => Observation::from_json(&json)?,
    };

    Ok(obs)
}

async fn report(obs: Observation, config: Config, format: Format) -> anyhow::Result<()> {
    let location = obs.location.clone();
    let snapshot = WeatherSnapshot::try_from(obs)?;
    let config = Arc::new(config);

    let assessment = assess_concurrently(snapshot.clone(), Arc::clone(&config)).await?;
    info!(
        umbrella = assessment.umbrella_recommendation.recommend,
        clothing = %assessment.clothing_recommendations.category,
        "assessment ready"
    );

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&assessment)?),
        Format::Text => {
            let summary = clothing::outfit_summary(&snapshot, &config.clothing);
            let view = render::TextReport {
                location: location.as_deref(),
                assessment: &assessment,
                outfit: &summary,
            };
            print!("{view}");
        }
    }

    Ok(())
}

/// Run the three advisors on the blocking pool at the same time.
async fn assess_concurrently(
    snapshot: WeatherSnapshot,
    config: Arc<Config>,
) -> anyhow::Result<Assessment> {
    let snapshot = Arc::new(snapshot);

    let umbrella_task = {
        let (snapshot, config) = (Arc::clone(&snapshot), Arc::clone(&config));
        tokio::task::spawn_blocking(move || umbrella::predict(&snapshot, &config.umbrella))
    };
    let uv_task = {
        let (uv_index, config) = (snapshot.uv_index, Arc::clone(&config));
        tokio::task::spawn_blocking(move || uv::advise(uv_index, &config.uv))
    };
    let clothing_task = {
        let (snapshot, config) = (Arc::clone(&snapshot), Arc::clone(&config));
        tokio::task::spawn_blocking(move || clothing::advise(&snapshot, &config.clothing))
    };

    let (umbrella_recommendation, uv_recommendations, clothing_recommendations) =
        tokio::try_join!(umbrella_task, uv_task, clothing_task)
            .context("Advisor task failed")?;

    Ok(Assessment { umbrella_recommendation, uv_recommendations, clothing_recommendations })
}

fn run_config(action: ConfigAction, path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::config_file_path()?,
    };

    match action {
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Show => {
            let config = if path.exists() { Config::load_from(&path)? } else { Config::default() };
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "Config file already exists: {}\n\
                     Hint: pass --force to overwrite it with the defaults.",
                    path.display()
                );
            }
            Config::default().save_to(&path)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}
