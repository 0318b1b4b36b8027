use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;

mod config;

#[derive(Debug, Parser)]
#[command(version, about = "Community tips on a map with a fuzzy full-text search")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    config_file: Option<PathBuf>,

    /// URL to the database, overrides the configuration
    #[arg(long, value_name = "DATABASE_URL")]
    db_url: Option<String>,

    /// Allow requests from any origin
    #[arg(long)]
    enable_cors: bool,
}

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut cfg = config::Config::try_load_from_file_or_default(args.config_file.as_ref())?;
    if let Some(db_url) = args.db_url {
        cfg.db.conn_sqlite = db_url;
    }
    if args.enable_cors {
        cfg.webserver.enable_cors = true;
    }

    log::info!(
        "Connecting to SQLite database '{}' (pool size = {})",
        cfg.db.conn_sqlite,
        cfg.db.conn_pool_size
    );
    let connections =
        pde_db_sqlite::Connections::init(&cfg.db.conn_sqlite, u32::from(cfg.db.conn_pool_size))?;
    pde_db_sqlite::run_embedded_database_migrations(connections.exclusive()?)?;

    match &cfg.db.index_dir {
        Some(dir) => log::info!("Opening full-text search index in {}", dir.display()),
        None => log::info!("Keeping the full-text search index in RAM"),
    }
    let search_engine = pde_db_tantivy::SearchEngine::init_with_path(cfg.db.index_dir.as_ref())?;

    let web_cfg = pde_webserver::Cfg {
        read_retry: cfg.db.read_retry,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(pde_webserver::run(
        connections,
        search_engine,
        cfg.webserver.enable_cors,
        web_cfg,
        env!("CARGO_PKG_VERSION"),
    ));
    Ok(())
}
