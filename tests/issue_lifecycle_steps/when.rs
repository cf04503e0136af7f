//! When steps for issue lifecycle BDD scenarios.

use std::sync::Arc;

use super::world::{IssueWorld, find_by_title, report_form, run_async};
use civic_connect::{
    access::services::AccessError,
    issue::{
        domain::{Coordinates, IssueStatus},
        flows::AdminBoard,
    },
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"a citizen reports "{title}" in category "{category}" at "{location}""#)]
fn citizen_reports(world: &mut IssueWorld, title: String, category: String, location: String) {
    let outcome = run_async(
        world
            .submission
            .submit(report_form(&title, &category, &location)),
    );
    world.last_outcome = Some(outcome);
}

#[when(r#"a citizen reports an untitled issue in category "{category}" at "{location}""#)]
fn citizen_reports_untitled(world: &mut IssueWorld, category: String, location: String) {
    let outcome = run_async(world.submission.submit(report_form("", &category, &location)));
    world.last_outcome = Some(outcome);
}

#[when(
    r#"a citizen reports "{title}" in category "{category}" pinned at latitude "{lat}" and longitude "{lng}""#
)]
fn citizen_reports_pinned(
    world: &mut IssueWorld,
    title: String,
    category: String,
    lat: String,
    lng: String,
) -> Result<(), eyre::Report> {
    let latitude: f64 = lat.parse().wrap_err("parse latitude")?;
    let longitude: f64 = lng.parse().wrap_err("parse longitude")?;
    let mut form = report_form(&title, &category, "");
    form.pin = Some(Coordinates::new(latitude, longitude).wrap_err("build pin")?);
    let outcome = run_async(world.submission.submit(form));
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#"the signed-in user marks "{title}" as "{status}""#)]
fn signed_in_user_marks(
    world: &mut IssueWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let target = IssueStatus::try_from(status.as_str()).wrap_err("parse status")?;
    let issue = find_by_title(world, &title)?;
    let token = world.session.as_ref().map(|session| session.token().clone());

    let result = run_async(async {
        world.auth.require_admin(token.as_ref()).await?;
        let board = AdminBoard::load(Arc::new(world.store.clone()))
            .await
            .map_err(|err| eyre::eyre!("admin board failed to load: {err}"))?;
        board
            .update_status(issue.id(), target)
            .await
            .map_err(|err| eyre::eyre!("status change failed: {err}"))?;
        Ok::<_, eyre::Report>(())
    });

    world.last_status_change = Some(match result {
        Ok(()) => Ok(find_by_title(world, &title)?),
        Err(report) => match report.downcast::<AccessError>() {
            Ok(access) => Err(access),
            Err(other) => return Err(other),
        },
    });
    Ok(())
}

#[when(r#"the listing is searched for "{search}""#)]
fn listing_searched(world: &mut IssueWorld, search: String) {
    world.listing_filter = world.listing_filter.clone().with_search(search);
}
