//! Runtime configuration.
//!
//! # Responsibilities
//! - Define the parameters of one listen/accept/greet/receive cycle
//! - Carry defaults matching the fixed operational values
//!
//! There is no configuration file and no environment lookup; the only
//! override surface is the binary's CLI flags.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Parameters for one server cycle.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Local address to bind. The wildcard address accepts on all
    /// interfaces.
    pub bind_address: IpAddr,

    /// TCP port to listen on. Port 0 lets the OS pick an ephemeral port.
    pub port: u16,

    /// Pending-connection queue hint handed to the OS on listen.
    pub backlog: i32,

    /// Payload sent once to the accepted peer.
    pub greeting: String,

    /// Receive buffer budget in bytes. One byte is reserved, so at most
    /// `recv_buffer_bytes - 1` bytes are read from the peer.
    pub recv_buffer_bytes: usize,
}

impl ServerConfig {
    /// The full local address to bind, from `bind_address` and `port`.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            backlog: 15,
            greeting: "hello there\n".to_string(),
            recv_buffer_bytes: 1024,
        }
    }
}
