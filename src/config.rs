use std::env;
use std::path::PathBuf;

use tracing::warn;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STORE: &str = "./mensagens.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            store_path: PathBuf::from(DEFAULT_STORE),
        }
    }
}

impl Config {
    /// Reads `ZAPZAP_HOST`, `ZAPZAP_PORT` and `ZAPZAP_STORE`, keeping the
    /// default for anything unset.
    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(host) = lookup("ZAPZAP_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("ZAPZAP_PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!(%port, default = DEFAULT_PORT, "invalid ZAPZAP_PORT, using default"),
            }
        }
        if let Some(path) = lookup("ZAPZAP_STORE") {
            config.store_path = PathBuf::from(path);
        }
        config
    }

    pub fn bind_addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}
