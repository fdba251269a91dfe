//! Embedded PostgreSQL for the Diesel adapter suites.
//!
//! Each suite boots a [`TestCluster`], creates a database of its own, runs the
//! embedded migrations, and hands back a pool. Cluster bootstrap is
//! serialised because it mutates `PG_RUNTIME_DIR`/`PG_DATA_DIR`.
//!
//! Setting `SKIP_TEST_CLUSTER=1` turns bootstrap failures into skips; without
//! it a failure panics so CI breakage stays visible.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use linkbio::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

/// A migrated database on a running embedded cluster.
pub struct PgContext {
    /// Runtime driving the async repositories.
    pub runtime: Runtime,
    /// Pool connected to this suite's database.
    pub pool: DbPool,
    _cluster: TestCluster,
}

impl PgContext {
    /// Boot a cluster and migrate a fresh database, or skip when allowed.
    pub fn setup() -> Option<Self> {
        match Self::try_setup() {
            Ok(context) => Some(context),
            Err(reason) => handle_cluster_setup_failure(reason),
        }
    }

    fn try_setup() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = test_cluster()?;
        let database_url = create_database(&cluster)?;
        let pool = runtime.block_on(async {
            run_pending_migrations(database_url.clone())
                .await
                .map_err(|err| err.to_string())?;
            DbPool::new(PoolConfig::new(database_url).with_max_size(2))
                .await
                .map_err(|err| err.into_message())
        })?;
        Ok(Self {
            runtime,
            pool,
            _cluster: cluster,
        })
    }
}

fn skip_requested() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if skip_requested() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

fn format_postgres_error(error: &postgres::Error) -> String {
    match error.as_db_error() {
        Some(db_error) => format!("postgres error {:?}: {}", db_error.code(), db_error.message()),
        None => error.to_string(),
    }
}

fn create_database(cluster: &TestCluster) -> Result<String, String> {
    let name = format!("linkbio_{}", Uuid::new_v4().simple());
    let admin_url = cluster.connection().database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE {name}"))
        .map_err(|err| format_postgres_error(&err))?;
    Ok(cluster.connection().database_url(&name))
}

fn workspace_pg_dirs() -> Result<(String, String), std::io::Error> {
    let target = std::env::var_os("CARGO_TARGET_DIR").map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("target"),
        PathBuf::from,
    );
    let base = target
        .join("pg-embed")
        .join(format!("bootstrap-{}-{}", std::process::id(), Uuid::new_v4()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((
        runtime_dir.to_string_lossy().into_owned(),
        data_dir.to_string_lossy().into_owned(),
    ))
}

fn is_transient(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["connection reset", "connection refused", "timed out", "timeout", "dns error"]
        .iter()
        .any(|pattern| lower.contains(pattern))
}

/// Start a cluster, keeping its directories inside the build tree unless
/// `PG_RUNTIME_DIR` and `PG_DATA_DIR` are both already set.
fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_override {
        let (runtime_dir, data_dir) = workspace_pg_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir)),
            ("PG_DATA_DIR", Some(data_dir)),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt == MAX_RETRIES || !is_transient(&last_error) {
                    break;
                }
                std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS << attempt));
            }
        }
    }
    Err(last_error)
}
