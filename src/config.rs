//! Environment configuration
//!
//! | variable       | default                           |
//! |----------------|-----------------------------------|
//! | `HOST`         | `0.0.0.0`                         |
//! | `PORT`         | `8000`                            |
//! | `DATABASE_URL` | unset, in-memory store            |
//! | `SEED_FILE`    | `<assets>/seed.json` when present |
//! | `IMAGE_HOSTS`  | `drive.google.com,u9a6wmr3as.ufs.sh` |
//!
//! A `.env` file in the working directory is loaded first when present.

use std::{
    env,
    fmt::Display,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    str::FromStr,
};

use thiserror::Error;
use tracing::{debug, info};

use crate::view::DEFAULT_IMAGE_HOSTS;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// SQLite URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// Explicit seed file; `None` falls back to `<assets>/seed.json`
    pub seed_file: Option<PathBuf>,
    pub image_hosts: Vec<String>,
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(e) => debug!("No .env file loaded: {e}"),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let image_hosts = match non_empty(&lookup, "IMAGE_HOSTS") {
            Some(raw) => {
                let hosts: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|host| !host.is_empty())
                    .map(str::to_owned)
                    .collect();
                if hosts.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: "IMAGE_HOSTS",
                        value: raw,
                        reason: "no hostnames listed".to_owned(),
                    });
                }
                hosts
            }
            None => DEFAULT_IMAGE_HOSTS.map(str::to_owned).to_vec(),
        };

        Ok(Self {
            host: try_load(&lookup, "HOST", "0.0.0.0")?,
            port: try_load(&lookup, "PORT", "8000")?,
            database_url: non_empty(&lookup, "DATABASE_URL"),
            seed_file: non_empty(&lookup, "SEED_FILE").map(PathBuf::from),
            image_hosts,
        })
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = non_empty(lookup, key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_owned()
    });

    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        reason: e.to_string(),
        value,
    })
}
