use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_LEAGUE_URL: &str = "https://plan.livefpl.net/leagues/2099876";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Runtime settings. Sources, lowest priority first: built-in defaults,
/// optional TOML file, `FPL_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub league_url: String,
    pub host: String,
    pub port: u16,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder
            .add_source(Environment::with_prefix("FPL").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("league_url", DEFAULT_LEAGUE_URL)?
        .set_default("host", "0.0.0.0")?
        .set_default("port", 8000_i64)?
        .set_default("timeout_secs", 30_i64)?
        .set_default("user_agent", DEFAULT_USER_AGENT)
}
