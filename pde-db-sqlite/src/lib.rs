#[macro_use]
extern crate diesel;

use anyhow::{anyhow, Result as Fallible};
use diesel::{
    connection::{AnsiTransactionManager, SimpleConnection as _, TransactionManager as _},
    r2d2::{self, CustomizeConnection},
    sqlite::SqliteConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use pde_core::usecases as uc;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{
    cell::{RefCell, RefMut},
    fmt,
    sync::Arc,
};

mod models;
mod repo_impl;
mod schema;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

const DEFAULT_BUSY_TIMEOUT_MILLIS: u32 = 5_000;

type ConnectionManager = r2d2::ConnectionManager<SqliteConnection>;
type ConnectionPool = r2d2::Pool<ConnectionManager>;
type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

/// Settings that SQLite keeps per connection.
///
/// Applied whenever the pool opens a new connection, otherwise
/// only the first connection would enforce the cascading deletes
/// of tags, members, comments and ratings.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout_millis: u32,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            busy_timeout_millis: DEFAULT_BUSY_TIMEOUT_MILLIS,
        }
    }
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        let Self {
            busy_timeout_millis,
        } = self;
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; \
             PRAGMA synchronous = NORMAL; \
             PRAGMA busy_timeout = {busy_timeout_millis};"
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

/// Settings that are stored in the database file itself.
///
/// The encoding only takes effect before the first table is created.
fn configure_database_file(conn: &mut SqliteConnection) -> Fallible<()> {
    conn.batch_execute(
        "PRAGMA encoding = 'UTF-8'; \
         PRAGMA journal_mode = WAL;",
    )?;
    Ok(())
}

enum PoolLock<'a> {
    Shared(RwLockReadGuard<'a, ConnectionPool>),
    Exclusive(RwLockWriteGuard<'a, ConnectionPool>),
}

impl PoolLock<'_> {
    fn pool(&self) -> &ConnectionPool {
        match self {
            Self::Shared(pool) => &**pool,
            Self::Exclusive(pool) => &**pool,
        }
    }
}

impl fmt::Display for PoolLock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared(_) => f.write_str("read-only"),
            Self::Exclusive(_) => f.write_str("read/write"),
        }
    }
}

/// A pooled connection together with the lock that grants it.
struct Handle<'a> {
    // Returned to the pool before the lock is released
    conn: RefCell<PooledConnection>,
    _lock: PoolLock<'a>,
}

impl<'a> Handle<'a> {
    fn acquire(lock: PoolLock<'a>) -> Fallible<Self> {
        let conn = lock.pool().get().inspect_err(|err| {
            log::error!("Failed to obtain a pooled database connection for {lock} access: {err}");
        })?;
        Ok(Self {
            conn: RefCell::new(conn),
            _lock: lock,
        })
    }

    fn conn(&self) -> RefMut<'_, PooledConnection> {
        self.conn.borrow_mut()
    }
}

/// Read access that may run concurrently with
/// other read-only connections.
pub struct DbReadOnly<'a>(Handle<'a>);

/// The single connection that is allowed to modify the database.
pub struct DbReadWrite<'a>(Handle<'a>);

impl DbReadWrite<'_> {
    /// Commits all changes if the closure succeeds and
    /// rolls them back otherwise.
    ///
    /// Repository operations that run their own transaction
    /// within the closure are nested as savepoints.
    pub fn transaction<T, F, E>(&self, f: F) -> Result<T, uc::Error>
    where
        F: FnOnce(&Self) -> Result<T, E>,
        E: Into<uc::Error>,
    {
        AnsiTransactionManager::begin_transaction(&mut **self.0.conn()).map_err(repo_error)?;
        match f(self) {
            Ok(res) => {
                AnsiTransactionManager::commit_transaction(&mut **self.0.conn())
                    .map_err(repo_error)?;
                Ok(res)
            }
            Err(err) => {
                if let Err(rollback_err) =
                    AnsiTransactionManager::rollback_transaction(&mut **self.0.conn())
                {
                    log::error!("Failed to roll back transaction: {rollback_err}");
                }
                Err(err.into())
            }
        }
    }
}

fn repo_error(err: diesel::result::Error) -> uc::Error {
    uc::Error::Repo(repo_impl::from_diesel_err(err))
}

#[derive(Clone)]
pub struct Connections {
    // Writers get exclusive access to the whole pool while
    // readers share it. SQLite would otherwise reject
    // concurrent writes with SQLITE_LOCKED.
    pool: Arc<RwLock<ConnectionPool>>,
}

impl Connections {
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        // r2d2 keeps retrying inaccessible files instead of failing
        use diesel::Connection as _;
        let mut conn = SqliteConnection::establish(url)?;
        configure_database_file(&mut conn)?;
        let pool = ConnectionPool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(ConnectionOptions::default()))
            .build(ConnectionManager::new(url))?;
        Ok(Self {
            pool: Arc::new(RwLock::new(pool)),
        })
    }

    pub fn shared(&self) -> Fallible<DbReadOnly> {
        Handle::acquire(PoolLock::Shared(self.pool.read())).map(DbReadOnly)
    }

    pub fn exclusive(&self) -> Fallible<DbReadWrite> {
        Handle::acquire(PoolLock::Exclusive(self.pool.write())).map(DbReadWrite)
    }
}

pub fn run_embedded_database_migrations(db: DbReadWrite<'_>) -> Fallible<()> {
    log::info!("Running embedded database migrations");
    let mut conn = db.0.conn();
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow!("Failed to run database migrations: {err}"))?;
    log::debug!("Applied {} database migration(s)", applied.len());
    Ok(())
}
