//! End-to-end runs against an in-process node over real HTTP.

use std::sync::Arc;
use std::time::Duration;

use foodshare_client::HttpListingRepository;
use foodshare_common::listing::{FoodListing, ListingId};
use foodshare_common::location::{GeoLocation, NAIROBI};
use foodshare_common::marketplace::Marketplace;
use foodshare_common::notify::{RecordingNotifier, Severity};
use foodshare_common::query::QueryState;
use foodshare_common::repository::{ClaimOutcome, ListingRepository, RadiusPolicy, RepositoryError};
use foodshare_common::role::{Role, Screen};
use foodshare_node::config::NodeConfig;

use foodshare_node_integration::harness::TestHarness;
use foodshare_node_integration::{make_donation, spawn_default_node, spawn_node};

fn loaded(state: &QueryState) -> &[FoodListing] {
    match state {
        QueryState::Loaded(xs) => xs,
        other => panic!("expected Loaded, got {other:?}"),
    }
}

#[tokio::test]
async fn seed_lists_three() {
    let node = spawn_default_node().await;
    let repo = HttpListingRepository::new(&node.url()).unwrap();
    let xs = repo.list_nearby(NAIROBI, 10.0).await.unwrap();
    assert_eq!(xs.len(), 3);
    assert!(xs.iter().all(|l| l.available));
}

#[tokio::test]
async fn donation_surfaces_first_for_everyone() {
    let mut h = TestHarness::setup().await;
    assert!(h.kitchen.market.screens().contains(&Screen::Donate));

    let id = h
        .kitchen
        .market
        .donate(make_donation("Bread", "10 loaves", NAIROBI))
        .await
        .unwrap();
    let xs = loaded(h.kitchen.market.query());
    assert_eq!(xs.len(), 4);
    assert_eq!(xs[0].title, "Bread");
    assert_eq!(xs[0].id, id);

    // Alice only sees it after pulling again
    let xs = loaded(h.alice.market.refresh().await);
    assert_eq!(xs[0].id, id);
}

#[tokio::test]
async fn claim_hides_listing_from_other_receivers() {
    let mut h = TestHarness::setup().await;
    assert_eq!(h.alice.market.role(), Role::Receiver);

    let outcome = h.alice.market.claim(&ListingId::from("2")).await.unwrap();
    assert_eq!(outcome, ClaimOutcome::Claimed);
    assert!(loaded(h.alice.market.query()).iter().all(|l| l.id.as_str() != "2"));

    let outcome = h.bob.market.claim(&ListingId::from("2")).await.unwrap();
    assert_eq!(outcome, ClaimOutcome::AlreadyClaimed);
    assert_eq!(loaded(h.bob.market.query()).len(), 2);

    let alice_seen = h.alice.market.notifier().take();
    let bob_seen = h.bob.market.notifier().take();
    assert_eq!(alice_seen[0].1, Severity::Success);
    assert_eq!(bob_seen[0].1, Severity::Error);

    let listing = h.node.state.store.get(&ListingId::from("2")).unwrap();
    assert!(!listing.available);
}

#[tokio::test]
async fn claim_unknown_id_changes_nothing() {
    let mut h = TestHarness::setup().await;
    let outcome = h
        .bob
        .market
        .claim(&ListingId::from("nonexistent-id"))
        .await
        .unwrap();
    assert_eq!(outcome, ClaimOutcome::NotFound);
    assert_eq!(loaded(h.bob.market.query()).len(), 3);
    assert_eq!(h.node.state.store.available_count(), 3);
}

#[tokio::test]
async fn duplicate_id_is_rejected() {
    let node = spawn_default_node().await;
    let repo = HttpListingRepository::new(&node.url()).unwrap();
    let mut listing = make_donation("Bread", "10 loaves", NAIROBI).into_listing().unwrap();
    listing.id = ListingId::from("1");

    let err = repo.donate(listing).await.unwrap_err();
    assert!(matches!(err, RepositoryError::DuplicateId(id) if id.as_str() == "1"));
    assert_eq!(node.state.store.len(), 3);
}

#[tokio::test]
async fn within_radius_node_filters_far_listings() {
    let node = spawn_node(NodeConfig {
        radius_policy: RadiusPolicy::WithinRadius,
        ..NodeConfig::default()
    })
    .await;
    let repo = HttpListingRepository::new(&node.url()).unwrap();
    let mombasa = GeoLocation::new(-4.0435, 39.6682);
    let far = make_donation("Fish", "Fresh catch", mombasa).into_listing().unwrap();
    repo.donate(far.clone()).await.unwrap();

    let nairobi = repo.list_nearby(NAIROBI, 10.0).await.unwrap();
    assert_eq!(nairobi.len(), 3);
    let coast = repo.list_nearby(mombasa, 10.0).await.unwrap();
    assert_eq!(coast.len(), 1);
    assert_eq!(coast[0].id, far.id);
}

#[tokio::test]
async fn unreachable_node_leaves_query_failed() {
    let node = spawn_default_node().await;
    let url = node.url();
    drop(node);
    // give the aborted server task a moment to release the socket
    tokio::time::sleep(Duration::from_millis(50)).await;

    // fresh client, so no pooled keep-alive connection outlives the listener
    let repo: Arc<dyn ListingRepository> = Arc::new(HttpListingRepository::new(&url).unwrap());
    let mut market = Marketplace::new(repo, RecordingNotifier::new());
    let state = market.refresh().await;
    assert!(matches!(state, QueryState::Failed(_)), "node at {url} should be gone");
}
