//! SQLite connection pools for the moderation database.
//!
//! Writes go through a pool with exactly one connection, so members,
//! reports and warnings are only ever modified by one transaction at a
//! time. Reads use a separate pool sized to the CPU count.

use std::{fmt, path::PathBuf};

use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness};
use error_stack::{Result, ResultExt};
use simple_backend_config::{SimpleBackendConfig, SqliteDatabase};
use simple_backend_utils::{ComponentError, ContextExt, IntoReportFromString};
use tracing::error;

pub type DieselConnection = diesel::SqliteConnection;
pub type DieselPool = deadpool::unmanaged::Pool<DieselConnection>;
pub type PoolObject = deadpool::unmanaged::Object<DieselConnection>;

const WRITE_CONNECTIONS: usize = 1;

const CONNECTION_PRAGMAS: &[&str] = &[
    "PRAGMA journal_mode=WAL;",
    "PRAGMA synchronous=NORMAL;",
    "PRAGMA foreign_keys=ON;",
    // Readers wait for the write connection instead of failing
    "PRAGMA busy_timeout=5000;",
];

mod sqlite_version {
    use diesel::define_sql_function;
    define_sql_function! { fn sqlite_version() -> Text }
}

impl ComponentError for DieselDatabaseError {
    const COMPONENT_NAME: &'static str = "Diesel";
}

#[derive(thiserror::Error, Debug)]
pub enum DieselDatabaseError {
    #[error("Connecting to SQLite database failed")]
    Connect,
    #[error("SQLite connection setup failed")]
    Setup,
    #[error("Executing SQL query failed")]
    Execute,
    #[error("Running diesel database migrations failed")]
    Migrate,

    #[error("Running an action failed")]
    RunAction,
    #[error("Add connection to pool failed")]
    AddConnection,
    #[error("Connection get failed from connection pool")]
    GetConnection,

    #[error("SQLite version query failed")]
    SqliteVersionQuery,

    #[error("Diesel error")]
    DieselError,
}

/// Removes every connection of a pool when the server quits.
pub struct DieselCloseHandle {
    pool: DieselPool,
    connections: usize,
}

impl DieselCloseHandle {
    /// Call this before closing the server.
    pub async fn close(self) {
        for _ in 0..self.connections {
            match self.pool.remove().await {
                Ok(conn) => drop(conn),
                Err(_) => error!("Failed to remove connection from pool"),
            }
        }
        self.pool.close()
    }
}

pub trait ObjectExtensions<T>: Sized {
    fn interact<F: FnOnce(&mut SqliteConnection) -> R + Send + 'static, R: Send + 'static>(
        self,
        action: F,
    ) -> impl std::future::Future<Output = Result<R, DieselDatabaseError>> + Send;
}

impl ObjectExtensions<SqliteConnection> for PoolObject {
    async fn interact<F: FnOnce(&mut SqliteConnection) -> R + Send + 'static, R: Send + 'static>(
        mut self,
        action: F,
    ) -> Result<R, DieselDatabaseError> {
        let handle = tokio::task::spawn_blocking(move || action(self.as_mut()));
        match handle.await {
            Ok(value) => Ok(value),
            Err(e) => Err(e.report()).change_context(DieselDatabaseError::RunAction),
        }
    }
}

async fn create_pool(
    config: &SimpleBackendConfig,
    database_info: &SqliteDatabase,
    db_path: PathBuf,
    connections: usize,
) -> Result<(DieselPool, DieselCloseHandle), DieselDatabaseError> {
    // Shared cache keeps one in-RAM database for all connections
    let db_str = if config.sqlite_in_ram() {
        format!("file:{}?mode=memory&cache=shared", database_info.name)
    } else {
        db_path.to_string_lossy().to_string()
    };

    let pool = deadpool::unmanaged::Pool::new(connections);
    for _ in 0..connections {
        let mut conn =
            SqliteConnection::establish(&db_str).change_context(DieselDatabaseError::Connect)?;
        for pragma in CONNECTION_PRAGMAS {
            diesel::sql_query(*pragma)
                .execute(&mut conn)
                .change_context(DieselDatabaseError::Setup)?;
        }
        pool.add(conn)
            .await
            .map_err(|(_, e)| e)
            .change_context(DieselDatabaseError::AddConnection)?;
    }

    let close = DieselCloseHandle {
        pool: pool.clone(),
        connections,
    };
    Ok((pool, close))
}

/// Handle to the single write connection of a database.
#[derive(Clone)]
pub struct DieselWriteHandle {
    pool: DieselPool,
}

impl fmt::Debug for DieselWriteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DieselWriteHandle").finish()
    }
}

impl DieselWriteHandle {
    /// Create the write connection and run pending migrations.
    pub async fn new(
        config: &SimpleBackendConfig,
        database_info: &SqliteDatabase,
        db_path: PathBuf,
        migrations: EmbeddedMigrations,
    ) -> Result<(Self, DieselCloseHandle), DieselDatabaseError> {
        let (pool, close) = create_pool(config, database_info, db_path, WRITE_CONNECTIONS).await?;

        let conn = pool
            .get()
            .await
            .change_context(DieselDatabaseError::GetConnection)?;
        conn.interact(move |conn| conn.run_pending_migrations(migrations).map(|_| ()))
            .await?
            .into_error_string(DieselDatabaseError::Migrate)?;

        Ok((DieselWriteHandle { pool }, close))
    }

    pub fn pool(&self) -> &DieselPool {
        &self.pool
    }

    pub async fn sqlite_version(&self) -> Result<String, DieselDatabaseError> {
        let conn = self
            .pool
            .get()
            .await
            .change_context(DieselDatabaseError::GetConnection)?;

        let versions: Vec<String> = conn
            .interact(move |conn| diesel::select(sqlite_version::sqlite_version()).load(conn))
            .await?
            .into_error_string(DieselDatabaseError::Execute)?;

        versions
            .into_iter()
            .next()
            .ok_or(DieselDatabaseError::SqliteVersionQuery.report())
    }
}

/// Handle to the read connection pool of a database.
#[derive(Clone)]
pub struct DieselReadHandle {
    pool: DieselPool,
}

impl fmt::Debug for DieselReadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DieselReadHandle").finish()
    }
}

impl DieselReadHandle {
    pub async fn new(
        config: &SimpleBackendConfig,
        database_info: &SqliteDatabase,
        db_path: PathBuf,
    ) -> Result<(Self, DieselCloseHandle), DieselDatabaseError> {
        let (pool, close) = create_pool(config, database_info, db_path, num_cpus::get()).await?;
        Ok((DieselReadHandle { pool }, close))
    }

    pub fn pool(&self) -> &DieselPool {
        &self.pool
    }
}
