use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = include_str!("pasaeldato.default.toml");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub webserver: Option<WebServer>,
}

impl Config {
    pub fn from_default_file() -> Result<Self, toml::de::Error> {
        toml::from_str(DEFAULT_CONFIG_FILE)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: Option<String>,
    pub connection_pool_size: Option<u8>,
    pub index_dir: Option<PathBuf>,
    pub read_retry: Option<ReadRetry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReadRetry {
    pub max_attempts: Option<usize>,
    pub base_backoff_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebServer {
    pub cors: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_config_from_file() {
        let cfg = Config::from_default_file().unwrap();
        let db = cfg.db.unwrap();
        assert_eq!(db.connection_sqlite.as_deref(), Some("pasaeldato.db"));
        assert_eq!(db.connection_pool_size, Some(10));
        assert!(db.index_dir.is_none());
        let retry = db.read_retry.unwrap();
        assert_eq!(retry.max_attempts, Some(4));
        assert_eq!(retry.base_backoff_ms, Some(120));
        assert_eq!(cfg.webserver.unwrap().cors, Some(false));
    }

    #[test]
    fn reject_unknown_value_types() {
        let res = toml::from_str::<Config>("[db]\nconnection-pool-size = \"ten\"");
        assert!(res.is_err());
    }
}
