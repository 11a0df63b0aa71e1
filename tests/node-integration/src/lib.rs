use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::task::JoinHandle;

use foodshare_common::listing::DonationForm;
use foodshare_common::location::GeoLocation;
use foodshare_node::config::NodeConfig;
use foodshare_node::AppState;

pub mod harness;

/// A node serving on an ephemeral localhost port. Stops when dropped.
pub struct TestNode {
    pub addr: SocketAddr,
    pub state: Arc<AppState>,
    task: JoinHandle<()>,
}

impl TestNode {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestNode {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start a node in-process with `config`, ignoring its bind address and port.
pub async fn spawn_node(config: NodeConfig) -> TestNode {
    let state = Arc::new(AppState::from_config(&config));
    let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let app = foodshare_node::router(state.clone());
    let task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("test node stopped: {e}");
        }
    });
    TestNode { addr, state, task }
}

/// Start a seeded node with no latency.
pub async fn spawn_default_node() -> TestNode {
    spawn_node(NodeConfig::default()).await
}

/// A valid donation form at `location`.
pub fn make_donation(title: &str, description: &str, location: GeoLocation) -> DonationForm {
    DonationForm {
        title: title.to_string(),
        description: description.to_string(),
        image_url: None,
        expires_at: Utc::now() + Duration::hours(6),
        location,
        donor: "Test Donor".to_string(),
    }
}
