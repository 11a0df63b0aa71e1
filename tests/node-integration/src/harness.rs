use std::sync::Arc;

use foodshare_client::HttpListingRepository;
use foodshare_common::location::NAIROBI;
use foodshare_common::marketplace::Marketplace;
use foodshare_common::notify::RecordingNotifier;
use foodshare_common::repository::ListingRepository;
use foodshare_common::role::RoleState;
use foodshare_node::config::NodeConfig;

use crate::{spawn_node, TestNode};

/// One app session pointed at the test node.
pub struct Participant {
    pub name: String,
    pub market: Marketplace<RecordingNotifier>,
}

impl Participant {
    fn connect(name: &str, node: &TestNode) -> Self {
        let repo: Arc<dyn ListingRepository> =
            Arc::new(HttpListingRepository::new(&node.url()).expect("node url"));
        let market = Marketplace::new(repo, RecordingNotifier::new()).with_area(NAIROBI, 10.0);
        Self {
            name: name.to_string(),
            market,
        }
    }

    fn as_donor(mut self) -> Self {
        let role = RoleState::default();
        role.toggle();
        self.market = self.market.with_role(role);
        self
    }
}

/// A seeded node with one donor and two receivers connected to it.
pub struct TestHarness {
    pub node: TestNode,
    pub kitchen: Participant,
    pub alice: Participant,
    pub bob: Participant,
}

impl TestHarness {
    pub async fn setup() -> Self {
        Self::setup_with(NodeConfig::default()).await
    }

    pub async fn setup_with(config: NodeConfig) -> Self {
        tracing_subscriber::fmt::try_init().ok();

        let node = spawn_node(config).await;
        let kitchen = Participant::connect("Kibera Community Kitchen", &node).as_donor();
        let alice = Participant::connect("Alice", &node);
        let bob = Participant::connect("Bob", &node);

        TestHarness {
            node,
            kitchen,
            alice,
            bob,
        }
    }
}
