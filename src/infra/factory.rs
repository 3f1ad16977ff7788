use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::authz::role_authorizer::RoleAuthorizer;
use crate::infra::tabular::csv_reader::CsvReader;
use crate::infra::repositories::{
    postgres_audit_repo::PostgresAuditRepo, postgres_base_pay_repo::PostgresBasePayRepo,
    postgres_concept_repo::PostgresConceptRepo, postgres_employee_repo::PostgresEmployeeRepo,
    postgres_movement_repo::PostgresMovementRepo, postgres_period_repo::PostgresPeriodRepo,
    postgres_tenant_repo::PostgresTenantRepo, postgres_time_entry_repo::PostgresTimeEntryRepo,
    sqlite_audit_repo::SqliteAuditRepo, sqlite_base_pay_repo::SqliteBasePayRepo,
    sqlite_concept_repo::SqliteConceptRepo, sqlite_employee_repo::SqliteEmployeeRepo,
    sqlite_movement_repo::SqliteMovementRepo, sqlite_period_repo::SqlitePeriodRepo,
    sqlite_tenant_repo::SqliteTenantRepo, sqlite_time_entry_repo::SqliteTimeEntryRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let tabular_reader = Arc::new(CsvReader::new());
    let authorizer = Arc::new(RoleAuthorizer::new());

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            tenant_repo: Arc::new(PostgresTenantRepo::new(pool.clone())),
            employee_repo: Arc::new(PostgresEmployeeRepo::new(pool.clone())),
            period_repo: Arc::new(PostgresPeriodRepo::new(pool.clone())),
            concept_repo: Arc::new(PostgresConceptRepo::new(pool.clone())),
            movement_repo: Arc::new(PostgresMovementRepo::new(pool.clone())),
            time_entry_repo: Arc::new(PostgresTimeEntryRepo::new(pool.clone())),
            base_pay_repo: Arc::new(PostgresBasePayRepo::new(pool.clone())),
            audit_log: Arc::new(PostgresAuditRepo::new(pool.clone())),
            tabular_reader,
            authorizer,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            tenant_repo: Arc::new(SqliteTenantRepo::new(pool.clone())),
            employee_repo: Arc::new(SqliteEmployeeRepo::new(pool.clone())),
            period_repo: Arc::new(SqlitePeriodRepo::new(pool.clone())),
            concept_repo: Arc::new(SqliteConceptRepo::new(pool.clone())),
            movement_repo: Arc::new(SqliteMovementRepo::new(pool.clone())),
            time_entry_repo: Arc::new(SqliteTimeEntryRepo::new(pool.clone())),
            base_pay_repo: Arc::new(SqliteBasePayRepo::new(pool.clone())),
            audit_log: Arc::new(SqliteAuditRepo::new(pool.clone())),
            tabular_reader,
            authorizer,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
