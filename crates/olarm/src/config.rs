//! CLI configuration: a TOML file under the user config directory merged
//! with `OLARM_*` environment variables. Flags override both.

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Olarm API key, as generated in the Olarm app.
    pub api_key: Option<String>,

    /// API base URL override.
    pub base_url: Option<String>,

    /// HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Path of the config file, e.g. `~/.config/olarm/config.toml` on Linux.
pub fn config_path() -> Option<std::path::PathBuf> {
    ProjectDirs::from("", "", "olarm").map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn load() -> Result<Config, CliError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = config_path() {
        figment = figment.merge(Toml::file(path));
    }

    figment
        .merge(Env::prefixed("OLARM_"))
        .extract()
        .map_err(|e| CliError::Config(Box::new(e)))
}
