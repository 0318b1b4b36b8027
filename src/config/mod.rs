use anyhow::{anyhow, Result};
use pde_application::prelude::RetryPolicy;
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "pasaeldato.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

#[derive(Debug)]
pub struct Config {
    pub db: Db,
    pub webserver: WebServer,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    raw::Config::from_default_file()?
                }
                _ => return Err(err.into()),
            },
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }
}

#[derive(Debug)]
pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
    /// File system directory for the full-text search index.
    pub index_dir: Option<PathBuf>,
    pub read_retry: RetryPolicy,
}

#[derive(Debug)]
pub struct WebServer {
    pub enable_cors: bool,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config { db, webserver } = from;
        let defaults = raw::Config::from_default_file()?;

        // Missing values are taken from the embedded default configuration
        let raw::Db {
            connection_sqlite,
            connection_pool_size,
            index_dir,
            read_retry,
        } = db.or(defaults.db).ok_or_else(|| anyhow!("Missing DB configuration"))?;

        let conn_sqlite =
            connection_sqlite.ok_or_else(|| anyhow!("Missing SQLite connection"))?;
        let conn_pool_size = connection_pool_size.unwrap_or(1);
        if conn_pool_size == 0 {
            return Err(anyhow!("The connection pool must not be empty"));
        }

        let default_retry = RetryPolicy::default();
        let read_retry = match read_retry {
            Some(raw::ReadRetry {
                max_attempts,
                base_backoff_ms,
            }) => RetryPolicy {
                max_attempts: max_attempts.unwrap_or(default_retry.max_attempts),
                base_backoff_ms: base_backoff_ms.unwrap_or(default_retry.base_backoff_ms),
            },
            None => default_retry,
        };
        if read_retry.max_attempts == 0 {
            return Err(anyhow!("At least one read attempt is required"));
        }

        let db = Db {
            conn_sqlite,
            conn_pool_size,
            index_dir,
            read_retry,
        };

        let enable_cors = webserver
            .or(defaults.webserver)
            .and_then(|w| w.cors)
            .unwrap_or(false);
        let webserver = WebServer { enable_cors };

        Ok(Self { db, webserver })
    }
}
