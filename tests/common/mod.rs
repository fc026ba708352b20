//! Shared utilities for integration testing.

use std::net::{IpAddr, Ipv4Addr};

use tcp_greeter::ServerConfig;

/// A config bound to loopback on an ephemeral port so tests never collide.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        ..ServerConfig::default()
    }
}
