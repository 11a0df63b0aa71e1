use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

use foodshare_common::repository::RadiusPolicy;

/// Longest simulated latency the node accepts.
pub const MAX_LATENCY: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("latency {0:?} exceeds the {max:?} limit", max = MAX_LATENCY)]
    LatencyTooHigh(Duration),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    pub bind: IpAddr,
    pub port: u16,
    /// Simulated delay applied to every store operation.
    pub latency: Duration,
    pub radius_policy: RadiusPolicy,
    /// Start with the three seed listings.
    pub seed: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3020,
            latency: Duration::ZERO,
            radius_policy: RadiusPolicy::ShowAll,
            seed: true,
        }
    }
}

impl NodeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.latency > MAX_LATENCY {
            return Err(ConfigError::LatencyTooHigh(self.latency));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
