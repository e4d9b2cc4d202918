use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub telegram_base_url: String,
    pub telegram_channels: Vec<String>,
    pub fetch_limit: usize,
    pub public_rps: u32,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let channels = get_env_or("TELEGRAM_CHANNELS", "@comeinlena,@comeindesign,@work_editor")
            .split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            telegram_base_url: get_env_or("TELEGRAM_BASE_URL", "https://t.me"),
            telegram_channels: channels,
            fetch_limit: get_env_parse_or("FETCH_LIMIT", 50)?,
            public_rps: get_env_parse_or("PUBLIC_RPS", 50)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
