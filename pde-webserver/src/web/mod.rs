use pde_application::prelude::{self as flows, RetryPolicy};
use rocket::{config::Config as RocketCfg, Rocket, Route};

pub mod api;
mod guards;
mod sqlite;
pub mod tantivy;


#[derive(Debug, Clone, Default)]
pub struct Cfg {
    /// Applies to idempotent reads only.
    pub read_retry: RetryPolicy,
}

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
    version: &'static str,
}

pub(crate) struct Connections {
    db: sqlite::Connections,
    search_engine: tantivy::SearchEngine,
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    connections: Connections,
) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
        version,
    } = options;
    let Connections {
        db,
        mut search_engine,
    } = connections;

    info!("Indexing all tips...");
    if let Err(err) = flows::reindex_all_tips(&db, &mut *search_engine) {
        error!("Failed to build the tip index: {err}");
    }

    info!("Initialization finished");

    let r = match rocket_cfg {
        Some(cfg) => rocket::custom(cfg),
        None => rocket::build(),
    };

    let version = guards::Version(version);

    let mut instance = r
        .manage(db)
        .manage(search_engine)
        .manage(cfg)
        .manage(version);

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    instance
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api", api::routes())]
}

pub async fn run(
    db: sqlite::Connections,
    search_engine: tantivy::SearchEngine,
    enable_cors: bool,
    cfg: Cfg,
    version: &'static str,
) {
    let options = InstanceOptions {
        mounts: mounts(),
        rocket_cfg: None,
        cfg,
        version,
    };
    let connections = Connections { db, search_engine };

    let instance = rocket_instance(options, connections);
    let server_task = if enable_cors {
        let cors = match rocket_cors::CorsOptions::default().to_cors() {
            Ok(cors) => cors,
            Err(err) => {
                error!("Invalid CORS configuration: {err}");
                return;
            }
        };
        instance.attach(cors).launch()
    } else {
        instance.launch()
    };
    if let Err(err) = server_task.await {
        error!("Unable to run web server: {err}");
    }
}
