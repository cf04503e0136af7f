//! `PostgreSQL` tests for issue storage.
//!
//! Tests share one table, so assertions only look at the rows each test
//! inserted.

use civic_connect::issue::{
    domain::{Issue, IssueCategory, IssueId, IssueStatus, PersistedIssueData},
    ports::{IssueRepository, IssueRepositoryError},
};

use super::helpers::repository;
use crate::test_helpers::issue_at;

#[tokio::test(flavor = "multi_thread")]
async fn stored_issue_round_trips_every_field() -> eyre::Result<()> {
    let Some(repo) = repository().await? else {
        return Ok(());
    };
    let base = issue_at("Dark lamp post", IssueCategory::Streetlight, IssueStatus::InProgress, 5)?;
    let issue = Issue::from_persisted(PersistedIssueData {
        photo_url: Some("https://example.org/lamp.jpg".to_owned()),
        ..persisted(&base)
    });
    repo.store(&issue).await?;

    let found = repo.find_by_id(issue.id()).await?;
    eyre::ensure!(found.as_ref() == Some(&issue), "expected {issue:?}, got {found:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn find_all_orders_newest_first() -> eyre::Result<()> {
    let Some(repo) = repository().await? else {
        return Ok(());
    };
    let older = issue_at("Older bin", IssueCategory::Trash, IssueStatus::Reported, 1)?;
    let newer = issue_at("Newer bin", IssueCategory::Trash, IssueStatus::Reported, 2)?;
    repo.store(&older).await?;
    repo.store(&newer).await?;

    let ours: Vec<IssueId> = repo
        .find_all()
        .await?
        .iter()
        .map(Issue::id)
        .filter(|id| *id == older.id() || *id == newer.id())
        .collect();
    assert_eq!(ours, [newer.id(), older.id()]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_id_is_reported() -> eyre::Result<()> {
    let Some(repo) = repository().await? else {
        return Ok(());
    };
    let issue = issue_at("Duplicate", IssueCategory::Other, IssueStatus::Reported, 0)?;
    repo.store(&issue).await?;

    let result = repo.store(&issue).await;
    assert!(
        matches!(result, Err(IssueRepositoryError::DuplicateIssue(id)) if id == issue.id()),
        "expected duplicate error, got {result:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_status_returns_the_stored_row() -> eyre::Result<()> {
    let Some(repo) = repository().await? else {
        return Ok(());
    };
    let issue = issue_at("Tagged wall", IssueCategory::Graffiti, IssueStatus::Reported, 0)?;
    repo.store(&issue).await?;

    let updated = repo.update_status(issue.id(), IssueStatus::Resolved).await?;
    assert_eq!(updated.status(), IssueStatus::Resolved);
    assert_eq!(updated.created_at(), issue.created_at());
    assert_eq!(repo.find_by_id(issue.id()).await?, Some(updated));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_status_of_unknown_issue_is_not_found() -> eyre::Result<()> {
    let Some(repo) = repository().await? else {
        return Ok(());
    };
    let missing = IssueId::new();

    let result = repo.update_status(missing, IssueStatus::Resolved).await;
    assert!(
        matches!(result, Err(IssueRepositoryError::NotFound(id)) if id == missing),
        "expected not found, got {result:?}"
    );
    assert!(repo.find_by_id(missing).await?.is_none());
    Ok(())
}

fn persisted(issue: &Issue) -> PersistedIssueData {
    PersistedIssueData {
        id: issue.id(),
        title: issue.title().clone(),
        description: issue.description().to_owned(),
        location: issue.location().to_owned(),
        photo_url: issue.photo_url().map(str::to_owned),
        status: issue.status(),
        category: issue.category(),
        created_at: issue.created_at(),
    }
}
