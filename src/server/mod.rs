//! Single-cycle server driver.
//!
//! # Responsibilities
//! - Sequence one listen/accept/greet/receive pass
//! - Report lifecycle progress through structured logs
//! - Surface each stage's failure to the caller unchanged
//!
//! The cycle is deliberately single-shot: one peer is accepted, greeted,
//! and read once, then the endpoints drop. There is no outer accept loop;
//! per-connection failures are fatal to the whole run.

use std::io;
use std::net::SocketAddr;

use crate::config::ServerConfig;
use crate::net::endpoint::{Endpoint, EndpointError};

/// A bound, listening greeting server.
///
/// Construction performs the fallible create/bind/listen steps; a value of
/// this type is always ready to accept.
#[derive(Debug)]
pub struct GreetServer {
    listener: Endpoint,
    greeting: String,
    recv_buffer_bytes: usize,
}

impl GreetServer {
    /// Create, bind, and activate the listening endpoint.
    pub fn bind(config: &ServerConfig) -> Result<Self, EndpointError> {
        let listener = Endpoint::ipv4_stream()?;
        listener.bind(config.socket_addr())?;
        listener.listen(config.backlog)?;

        let local_addr = listener.local_addr().map_err(EndpointError::Listen)?;
        tracing::info!(
            address = %local_addr,
            backlog = config.backlog,
            "Listening for connections"
        );

        Ok(Self {
            listener,
            greeting: config.greeting.clone(),
            recv_buffer_bytes: config.recv_buffer_bytes,
        })
    }

    /// Get the local address the server is listening on.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept one peer, send the greeting, and read one message.
    ///
    /// Blocks until a peer connects. Returns the peer's message decoded as
    /// UTF-8, lossily; an empty string means the peer closed without
    /// sending. The listening endpoint stays valid afterwards.
    pub fn serve_once(&self) -> Result<String, EndpointError> {
        let (peer, peer_addr) = self.listener.accept()?;
        tracing::info!(peer_addr = %peer_addr, "Peer connected");

        peer.send(self.greeting.as_bytes())?;

        // One byte of the buffer budget stays reserved.
        let received = peer.receive(self.recv_buffer_bytes.saturating_sub(1))?;
        let message = String::from_utf8_lossy(&received).into_owned();
        tracing::info!(
            peer_addr = %peer_addr,
            bytes = received.len(),
            message = %message,
            "Message received from peer"
        );

        Ok(message)
    }
}
