//! `PostgreSQL` repository implementation for issue storage.

use super::{
    models::{IssueRow, NewIssueRow},
    schema::issues,
};
use crate::issue::{
    domain::{Issue, IssueCategory, IssueId, IssueStatus, IssueTitle, PersistedIssueData},
    ports::{IssueRepository, IssueRepositoryError, IssueRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by issue adapters.
pub type IssuePgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema statements for the `issues` table; safe to run repeatedly.
pub const CREATE_ISSUES_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_issues/up.sql");

/// `PostgreSQL`-backed issue repository.
///
/// Diesel calls are blocking, so every operation runs on the blocking
/// thread pool via [`tokio::task::spawn_blocking`].
#[derive(Debug, Clone)]
pub struct PostgresIssueRepository {
    pool: IssuePgPool,
}

impl PostgresIssueRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: IssuePgPool) -> Self {
        Self { pool }
    }

    /// Creates the `issues` table and its index when missing.
    ///
    /// # Errors
    ///
    /// Returns [`IssueRepositoryError::Persistence`] when a connection cannot
    /// be obtained or the statements fail.
    pub async fn ensure_schema(&self) -> IssueRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_ISSUES_SQL)
                .map_err(IssueRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> IssueRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> IssueRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(IssueRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(IssueRepositoryError::persistence)?
    }
}

#[async_trait]
impl IssueRepository for PostgresIssueRepository {
    async fn store(&self, issue: &Issue) -> IssueRepositoryResult<()> {
        let issue_id = issue.id();
        let new_row = to_new_row(issue);

        self.run_blocking(move |connection| {
            diesel::insert_into(issues::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        IssueRepositoryError::DuplicateIssue(issue_id)
                    }
                    _ => IssueRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_all(&self) -> IssueRepositoryResult<Vec<Issue>> {
        self.run_blocking(|connection| {
            let rows = issues::table
                .order(issues::created_at.desc())
                .select(IssueRow::as_select())
                .load::<IssueRow>(connection)
                .map_err(IssueRepositoryError::persistence)?;
            rows.into_iter().map(row_to_issue).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: IssueId) -> IssueRepositoryResult<Option<Issue>> {
        self.run_blocking(move |connection| {
            let row = issues::table
                .filter(issues::id.eq(id.into_inner()))
                .select(IssueRow::as_select())
                .first::<IssueRow>(connection)
                .optional()
                .map_err(IssueRepositoryError::persistence)?;
            row.map(row_to_issue).transpose()
        })
        .await
    }

    async fn update_status(
        &self,
        id: IssueId,
        status: IssueStatus,
    ) -> IssueRepositoryResult<Issue> {
        self.run_blocking(move |connection| {
            let row = diesel::update(issues::table.filter(issues::id.eq(id.into_inner())))
                .set(issues::status.eq(status.as_str()))
                .returning(IssueRow::as_returning())
                .get_result::<IssueRow>(connection)
                .optional()
                .map_err(IssueRepositoryError::persistence)?;
            row.ok_or(IssueRepositoryError::NotFound(id))
                .and_then(row_to_issue)
        })
        .await
    }
}

fn to_new_row(issue: &Issue) -> NewIssueRow {
    NewIssueRow {
        id: issue.id().into_inner(),
        title: issue.title().as_str().to_owned(),
        description: issue.description().to_owned(),
        location: issue.location().to_owned(),
        category: issue.category().as_str().to_owned(),
        photo_url: issue.photo_url().map(str::to_owned),
        status: issue.status().as_str().to_owned(),
        created_at: issue.created_at(),
    }
}

fn row_to_issue(row: IssueRow) -> IssueRepositoryResult<Issue> {
    let IssueRow {
        id,
        title: persisted_title,
        description,
        location,
        category: persisted_category,
        photo_url,
        status: persisted_status,
        created_at,
    } = row;

    let title = IssueTitle::new(persisted_title).map_err(IssueRepositoryError::persistence)?;
    let category = IssueCategory::try_from(persisted_category.as_str())
        .map_err(IssueRepositoryError::persistence)?;
    let status = IssueStatus::try_from(persisted_status.as_str())
        .map_err(IssueRepositoryError::persistence)?;

    Ok(Issue::from_persisted(PersistedIssueData {
        id: IssueId::from_uuid(id),
        title,
        description,
        location,
        photo_url,
        status,
        category,
        created_at,
    }))
}
