//! Many clients hitting one node at once.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use foodshare_client::HttpListingRepository;
use foodshare_common::listing::ListingId;
use foodshare_common::location::NAIROBI;
use foodshare_common::repository::{ClaimOutcome, ListingRepository};
use foodshare_node::config::NodeConfig;

use foodshare_node_integration::{make_donation, spawn_node};

const CLIENTS: usize = 24;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_claims_have_one_winner() {
    tracing_subscriber::fmt::try_init().ok();
    // latency widens the window in which claims overlap
    let node = spawn_node(NodeConfig {
        latency: Duration::from_millis(20),
        ..NodeConfig::default()
    })
    .await;
    let url = node.url();

    let claims = (0..CLIENTS).map(|_| {
        let url = url.clone();
        tokio::spawn(async move {
            let repo = HttpListingRepository::new(&url).unwrap();
            repo.claim(&ListingId::from("1")).await.unwrap()
        })
    });
    let outcomes: Vec<ClaimOutcome> = join_all(claims)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    let winners = outcomes.iter().filter(|o| o.is_claimed()).count();
    assert_eq!(winners, 1, "outcomes: {outcomes:?}");
    assert!(outcomes
        .iter()
        .all(|o| matches!(o, ClaimOutcome::Claimed | ClaimOutcome::AlreadyClaimed)));
    assert_eq!(node.state.store.available_count(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_donations_all_land() {
    let node = spawn_node(NodeConfig::default()).await;
    let repo = Arc::new(HttpListingRepository::new(&node.url()).unwrap());

    let donations = (0..CLIENTS).map(|i| {
        let repo = repo.clone();
        tokio::spawn(async move {
            let listing = make_donation(&format!("Batch {i}"), "Leftover chapati", NAIROBI)
                .into_listing()
                .unwrap();
            repo.donate(listing).await.unwrap();
        })
    });
    for r in join_all(donations).await {
        r.unwrap();
    }

    let xs = repo.list_nearby(NAIROBI, 10.0).await.unwrap();
    assert_eq!(xs.len(), CLIENTS + 3);
    // seeds were inserted before every donation, so they stay at the bottom
    let tail: Vec<&str> = xs[CLIENTS..].iter().map(|l| l.id.as_str()).collect();
    assert_eq!(tail, vec!["1", "2", "3"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn claims_on_different_listings_do_not_interfere() {
    let node = spawn_node(NodeConfig::default()).await;
    let repo = Arc::new(HttpListingRepository::new(&node.url()).unwrap());

    let claims = ["1", "2", "3"].into_iter().map(|id| {
        let repo = repo.clone();
        tokio::spawn(async move { repo.claim(&ListingId::from(id)).await.unwrap() })
    });
    for r in join_all(claims).await {
        assert_eq!(r.unwrap(), ClaimOutcome::Claimed);
    }
    assert!(repo.list_nearby(NAIROBI, 10.0).await.unwrap().is_empty());
}
