//! In-memory integration tests for session storage.

use chrono::Duration;
use civic_connect::access::{
    adapters::InMemorySessionStore,
    domain::{Role, Session, SessionToken},
    ports::SessionStore,
};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

#[fixture]
fn store() -> InMemorySessionStore {
    InMemorySessionStore::new()
}

fn session_lasting(ttl: Duration) -> Session {
    Session::open(Role::Citizen, "resident@example.org", ttl, &DefaultClock)
        .expect("test lifetime should be in range")
}

fn citizen_session() -> Session {
    session_lasting(Duration::minutes(30))
}

#[rstest]
#[tokio::test]
async fn saved_session_is_found_by_token(store: InMemorySessionStore) -> eyre::Result<()> {
    let session = citizen_session();
    store.save(&session).await?;

    let found = store.find(session.token()).await?;
    eyre::ensure!(found.as_ref() == Some(&session), "saved session not returned");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn unknown_token_finds_nothing(store: InMemorySessionStore) -> eyre::Result<()> {
    store.save(&citizen_session()).await?;

    let found = store.find(&SessionToken::from_raw("not-a-token")).await?;
    eyre::ensure!(found.is_none(), "unexpected session {found:?}");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn revoke_removes_only_that_session(store: InMemorySessionStore) -> eyre::Result<()> {
    let revoked = citizen_session();
    let kept = citizen_session();
    store.save(&revoked).await?;
    store.save(&kept).await?;

    assert!(store.revoke(revoked.token()).await?);
    assert!(!store.revoke(revoked.token()).await?);
    assert!(store.find(revoked.token()).await?.is_none());
    assert!(store.find(kept.token()).await?.is_some());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn clones_share_sessions(store: InMemorySessionStore) -> eyre::Result<()> {
    let other = store.clone();
    let session = citizen_session();
    store.save(&session).await?;

    eyre::ensure!(
        other.find(session.token()).await?.is_some(),
        "clone did not observe saved session"
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn purge_drops_only_expired_sessions(store: InMemorySessionStore) -> eyre::Result<()> {
    let abandoned = session_lasting(Duration::zero());
    let live = citizen_session();
    store.save(&abandoned).await?;
    store.save(&live).await?;

    let purged = store.purge_expired(DefaultClock.utc()).await?;

    assert_eq!(purged, 1);
    assert!(store.find(abandoned.token()).await?.is_none());
    assert!(store.find(live.token()).await?.is_some());
    Ok(())
}
