use std::net::IpAddr;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use foodshare_common::repository::RadiusPolicy;
use foodshare_node::config::NodeConfig;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RadiusArg {
    /// Ignore origin and radius; list every available listing.
    ShowAll,
    /// Only list listings within the requested radius.
    WithinRadius,
}

impl From<RadiusArg> for RadiusPolicy {
    fn from(arg: RadiusArg) -> Self {
        match arg {
            RadiusArg::ShowAll => RadiusPolicy::ShowAll,
            RadiusArg::WithinRadius => RadiusPolicy::WithinRadius,
        }
    }
}

#[derive(Parser)]
#[command(name = "foodshare-node", about = "Food donation listing node")]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "FOODSHARE_BIND", default_value = "0.0.0.0")]
    bind: IpAddr,

    /// HTTP port to listen on.
    #[arg(long, env = "FOODSHARE_PORT", default_value_t = 3020)]
    port: u16,

    /// Simulated delay in milliseconds applied to every store operation.
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// How origin and radius are applied when listing.
    #[arg(long, value_enum, default_value = "show-all")]
    radius_policy: RadiusArg,

    /// Start with an empty store instead of the three seed listings.
    #[arg(long)]
    no_seed: bool,
}

impl From<Cli> for NodeConfig {
    fn from(cli: Cli) -> Self {
        NodeConfig {
            bind: cli.bind,
            port: cli.port,
            latency: Duration::from_millis(cli.latency_ms),
            radius_policy: cli.radius_policy.into(),
            seed: !cli.no_seed,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = NodeConfig::from(Cli::parse());
    foodshare_node::serve(config).await
}
