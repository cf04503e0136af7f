//! Shared helpers for `PostgreSQL` integration tests.

use civic_connect::issue::adapters::postgres::PostgresIssueRepository;
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use eyre::WrapErr;

/// Environment variable naming the test database.
pub const TEST_DATABASE_URL_ENV: &str = "CIVIC_TEST_DATABASE_URL";

/// Connects to the test database and prepares the schema.
///
/// Returns `Ok(None)` when [`TEST_DATABASE_URL_ENV`] is unset.
///
/// # Errors
///
/// Returns an error if the pool cannot be built or the schema fails.
pub async fn repository() -> eyre::Result<Option<PostgresIssueRepository>> {
    let Ok(url) = std::env::var(TEST_DATABASE_URL_ENV) else {
        return Ok(None);
    };

    let pool = tokio::task::spawn_blocking(move || {
        Pool::builder()
            .max_size(2)
            .build(ConnectionManager::<PgConnection>::new(url))
    })
    .await
    .wrap_err("pool task panicked")?
    .wrap_err("connect to test database")?;

    let repo = PostgresIssueRepository::new(pool);
    repo.ensure_schema().await.wrap_err("prepare issues table")?;
    Ok(Some(repo))
}
