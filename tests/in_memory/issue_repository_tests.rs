//! In-memory integration tests for issue storage.

use civic_connect::issue::{
    adapters::memory::{InMemoryIssueRepository, demo_issues},
    domain::{IssueCategory, IssueId, IssueStatus},
    ports::{IssueRepository, IssueRepositoryError},
};
use rstest::{fixture, rstest};

use crate::test_helpers::issue_at;

#[fixture]
fn repo() -> InMemoryIssueRepository {
    InMemoryIssueRepository::new()
}

#[rstest]
#[tokio::test]
async fn stored_issue_can_be_found_by_id(repo: InMemoryIssueRepository) -> eyre::Result<()> {
    let issue = issue_at("Cracked kerb", IssueCategory::Other, IssueStatus::Reported, 0)?;
    repo.store(&issue).await?;

    let found = repo.find_by_id(issue.id()).await?;
    eyre::ensure!(found.as_ref() == Some(&issue), "stored issue not returned");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn unknown_id_is_absent(repo: InMemoryIssueRepository) -> eyre::Result<()> {
    let found = repo.find_by_id(IssueId::new()).await?;
    eyre::ensure!(found.is_none(), "unexpected issue {found:?}");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn find_all_is_newest_first(repo: InMemoryIssueRepository) -> eyre::Result<()> {
    let middle = issue_at("Middle", IssueCategory::Trash, IssueStatus::Reported, 10)?;
    let oldest = issue_at("Oldest", IssueCategory::Pothole, IssueStatus::Resolved, 0)?;
    let newest = issue_at("Newest", IssueCategory::Graffiti, IssueStatus::InProgress, 20)?;
    for issue in [&middle, &oldest, &newest] {
        repo.store(issue).await?;
    }

    let titles: Vec<String> = repo
        .find_all()
        .await?
        .iter()
        .map(|issue| issue.title().as_str().to_owned())
        .collect();
    assert_eq!(titles, ["Newest", "Middle", "Oldest"]);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn duplicate_id_is_rejected(repo: InMemoryIssueRepository) -> eyre::Result<()> {
    let issue = issue_at("Twice", IssueCategory::Other, IssueStatus::Reported, 0)?;
    repo.store(&issue).await?;

    let result = repo.store(&issue).await;
    assert!(
        matches!(result, Err(IssueRepositoryError::DuplicateIssue(id)) if id == issue.id()),
        "expected duplicate error, got {result:?}"
    );
    assert_eq!(repo.find_all().await?.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn update_status_persists_only_the_status(
    repo: InMemoryIssueRepository,
) -> eyre::Result<()> {
    let issue = issue_at("Flickering lamp", IssueCategory::Streetlight, IssueStatus::Reported, 0)?;
    repo.store(&issue).await?;

    let updated = repo.update_status(issue.id(), IssueStatus::InProgress).await?;
    assert_eq!(updated.status(), IssueStatus::InProgress);
    assert_eq!(updated.title(), issue.title());
    assert_eq!(updated.created_at(), issue.created_at());

    let reloaded = repo
        .find_by_id(issue.id())
        .await?
        .ok_or_else(|| eyre::eyre!("issue vanished after update"))?;
    assert_eq!(reloaded, updated);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn update_status_of_unknown_issue_changes_nothing(
    repo: InMemoryIssueRepository,
) -> eyre::Result<()> {
    let issue = issue_at("Untouched", IssueCategory::Other, IssueStatus::Reported, 0)?;
    repo.store(&issue).await?;
    let missing = IssueId::new();

    let result = repo.update_status(missing, IssueStatus::Resolved).await;
    assert!(
        matches!(result, Err(IssueRepositoryError::NotFound(id)) if id == missing),
        "expected not found, got {result:?}"
    );
    assert_eq!(repo.find_all().await?, vec![issue]);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn demo_seed_is_listed_newest_first() -> eyre::Result<()> {
    let repo = InMemoryIssueRepository::with_issues(demo_issues());

    let issues = repo.find_all().await?;
    let titles: Vec<&str> = issues.iter().map(|issue| issue.title().as_str()).collect();
    assert_eq!(titles, ["Large Pothole on Main St", "Broken Streetlight"]);
    Ok(())
}
