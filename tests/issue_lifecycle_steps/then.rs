//! Then steps for issue lifecycle BDD scenarios.

use super::world::{IssueWorld, find_by_title, run_async};
use civic_connect::{
    access::services::AccessError,
    issue::flows::{ListingPage, SUBMITTED_REDIRECT, SubmissionOutcome},
};
use rstest_bdd_macros::then;

#[then("the citizen is sent to the issue listing")]
fn sent_to_listing(world: &IssueWorld) -> Result<(), eyre::Report> {
    match &world.last_outcome {
        Some(SubmissionOutcome::Submitted { redirect_to, .. })
            if *redirect_to == SUBMITTED_REDIRECT =>
        {
            Ok(())
        }
        other => Err(eyre::eyre!("expected a redirect to the listing, got {other:?}")),
    }
}

#[then(r#"the report is rejected with "{notice}""#)]
fn report_rejected(world: &IssueWorld, notice: String) -> Result<(), eyre::Report> {
    match &world.last_outcome {
        Some(SubmissionOutcome::Rejected { notice: actual }) if *actual == notice => Ok(()),
        other => Err(eyre::eyre!("expected rejection '{notice}', got {other:?}")),
    }
}

#[then("the number of listed issues is {count:usize}")]
fn listed_issue_count(world: &IssueWorld, count: usize) -> Result<(), eyre::Report> {
    let page = run_async(ListingPage::load(&world.store, world.listing_filter.clone()));
    let visible = page.visible().len();
    if visible != count {
        return Err(eyre::eyre!("expected {count} listed issues, found {visible}"));
    }
    Ok(())
}

#[then(r#"the issue "{title}" has status "{status}""#)]
fn issue_has_status(world: &IssueWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let issue = find_by_title(world, &title)?;
    if issue.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected '{title}' to be {status}, found {}",
            issue.status()
        ));
    }
    Ok(())
}

#[then(r#"the issue "{title}" is located at "{location}""#)]
fn issue_located_at(
    world: &IssueWorld,
    title: String,
    location: String,
) -> Result<(), eyre::Report> {
    let issue = find_by_title(world, &title)?;
    if issue.location() != location {
        return Err(eyre::eyre!(
            "expected '{title}' at '{location}', found '{}'",
            issue.location()
        ));
    }
    Ok(())
}

#[then("the status change is forbidden")]
fn status_change_forbidden(world: &IssueWorld) -> Result<(), eyre::Report> {
    match &world.last_status_change {
        Some(Err(AccessError::Forbidden)) => Ok(()),
        other => Err(eyre::eyre!("expected a forbidden status change, got {other:?}")),
    }
}
