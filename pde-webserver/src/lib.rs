#[macro_use]
extern crate log;

use pde_db_sqlite::Connections;
use pde_db_tantivy as tantivy;

mod adapters;
mod core;
mod web;

pub use web::Cfg;

pub async fn run(
    connections: Connections,
    search_engine: tantivy::SearchEngine,
    enable_cors: bool,
    cfg: Cfg,
    version: &'static str,
) {
    let search_engine = web::tantivy::SearchEngine(search_engine);

    web::run(
        connections.into(),
        search_engine,
        enable_cors,
        cfg,
        version,
    )
    .await;
}
