use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use prayer_core::{Config, DEFAULT_METHOD, PrayerTimeService, provider_from_config};
use serde::Serialize;

use crate::{output, server};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "prayer", version, about = "Prayer times gateway and CLI")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP gateway.
    Serve {
        /// Address to bind, e.g. "127.0.0.1".
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// Interactively edit upstream and server settings.
    Configure,

    /// Show today's prayer times for a city.
    Daily {
        city: String,
        country: String,

        /// Print the raw JSON payload.
        #[arg(long)]
        json: bool,
    },

    /// Show prayer times for every day of a month.
    Monthly {
        city: String,
        country: String,

        /// Month number; defaults to the current month.
        month: Option<u32>,

        /// Defaults to the current year.
        year: Option<i32>,

        #[arg(long)]
        json: bool,
    },

    /// Show today's prayer times for a latitude/longitude.
    Coordinates {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Upstream calculation method code.
        #[arg(long, default_value_t = DEFAULT_METHOD, allow_negative_numbers = true)]
        method: i32,

        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = self.load_config()?;

        match self.command {
            Command::Serve { host, port } => {
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
                let service = build_service(&config)?;
                server::run(&config.server, service).await?;
            }
            Command::Configure => {
                configure(&mut config)?;
                let path = match &self.config {
                    Some(path) => {
                        config.save_to(path)?;
                        path.clone()
                    }
                    None => config.save()?,
                };
                println!("Configuration saved to {}", path.display());
            }
            Command::Daily { city, country, json } => {
                let timings =
                    build_service(&config)?.daily_by_city(&city, &country).await?.into_result()?;

                if json {
                    print_json(&timings)?;
                } else {
                    print!("{}", output::render_daily(&format!("{city}, {country}"), &timings));
                }
            }
            Command::Monthly { city, country, month, year, json } => {
                let today = Local::now().date_naive();
                let month = month.unwrap_or_else(|| today.month());
                let year = year.unwrap_or_else(|| today.year());

                let entries = build_service(&config)?
                    .monthly(&city, &country, month, year)
                    .await?
                    .into_result()?;

                if json {
                    print_json(&entries)?;
                } else {
                    let heading = format!("{city}, {country} ({year}-{month:02})");
                    print!("{}", output::render_monthly(&heading, &entries));
                }
            }
            Command::Coordinates { lat, lon, method, json } => {
                let timings = build_service(&config)?
                    .daily_by_coordinates(lat, lon, method)
                    .await?
                    .into_result()?;

                if json {
                    print_json(&timings)?;
                } else {
                    print!("{}", output::render_daily(&format!("{lat}, {lon}"), &timings));
                }
            }
        }

        Ok(())
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        config.apply_env()?;
        Ok(config)
    }
}

fn build_service(config: &Config) -> anyhow::Result<PrayerTimeService> {
    Ok(PrayerTimeService::new(provider_from_config(config)?))
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    config.upstream.base_url = Text::new("Upstream base URL:")
        .with_default(&config.upstream.base_url)
        .prompt()
        .context("Failed to read base URL")?;

    config.upstream.timeout_secs = CustomType::<u64>::new("Upstream timeout (seconds):")
        .with_default(config.upstream.timeout_secs)
        .prompt()
        .context("Failed to read timeout")?;

    config.server.host = Text::new("Server host:")
        .with_default(&config.server.host)
        .prompt()
        .context("Failed to read host")?;

    config.server.port = CustomType::<u16>::new("Server port:")
        .with_default(config.server.port)
        .prompt()
        .context("Failed to read port")?;

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
