//! Given steps for issue lifecycle BDD scenarios.

use super::world::{ADMIN_EMAIL, ADMIN_PASSWORD, IssueWorld, report_form, run_async};
use civic_connect::issue::services::CreateIssueRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("an empty issue store")]
fn empty_issue_store(world: &mut IssueWorld) {
    world.last_outcome = None;
}

#[given(r#"a reported issue "{title}" in category "{category}""#)]
fn reported_issue(
    world: &mut IssueWorld,
    title: String,
    category: String,
) -> Result<(), eyre::Report> {
    let form = report_form(&title, &category, "Town Hall Square");
    let request = CreateIssueRequest::new(form.title, form.category)
        .with_description(form.description)
        .with_location(form.location);
    run_async(world.store.create(request)).wrap_err("seed reported issue")?;
    Ok(())
}

#[given("an administrator is signed in")]
fn administrator_signed_in(world: &mut IssueWorld) -> Result<(), eyre::Report> {
    let session = run_async(world.auth.sign_in(ADMIN_EMAIL, ADMIN_PASSWORD))
        .wrap_err("admin sign-in")?;
    world.session = Some(session);
    Ok(())
}

#[given("a citizen is signed in")]
fn citizen_signed_in(world: &mut IssueWorld) -> Result<(), eyre::Report> {
    let session = run_async(world.auth.sign_in("resident@example.org", ""))
        .wrap_err("citizen sign-in")?;
    world.session = Some(session);
    Ok(())
}
