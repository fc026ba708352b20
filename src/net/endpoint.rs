//! Socket lifecycle wrapper.
//!
//! # Responsibilities
//! - Own exactly one OS socket from creation until drop
//! - Expose bind, listen, accept, and blocking send/receive
//! - Tag every failure with the lifecycle stage that produced it

use std::io::{self, Read, Write};
use std::net::SocketAddr;

use socket2::{SockAddr, Socket};
use thiserror::Error;

pub use socket2::{Domain, Protocol, Type};

/// Error type for endpoint operations, one variant per lifecycle stage.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The OS refused to allocate a socket.
    #[error("failed to create socket: {0}")]
    Create(io::Error),

    /// Failed to associate the endpoint with a local address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: io::Error,
    },

    /// Failed to activate passive listening.
    #[error("failed to listen: {0}")]
    Listen(io::Error),

    /// Failed to accept an incoming connection.
    #[error("failed to accept connection: {0}")]
    Accept(io::Error),

    /// Failed to write to the peer.
    #[error("failed to write to peer: {0}")]
    Write(io::Error),

    /// Failed to read from the peer.
    #[error("failed to read from peer: {0}")]
    Read(io::Error),
}

/// An exclusively-owned OS socket, covering both listening and connected
/// roles.
///
/// The wrapped descriptor closes when the `Endpoint` drops, on every exit
/// path. Accepting a connection produces a new, independently-owned
/// `Endpoint` for the peer; the listening endpoint stays valid for further
/// accepts.
///
/// All calls block. There is no timeout mechanism; `accept` and `receive`
/// wait until the OS completes the transfer or reports an error.
#[derive(Debug)]
pub struct Endpoint {
    socket: Socket,
}

impl Endpoint {
    /// Request a new socket of the given address family and transport
    /// semantics from the OS.
    ///
    /// Acquires exactly one descriptor on success and none on failure.
    pub fn create(
        domain: Domain,
        transport: Type,
        protocol: Option<Protocol>,
    ) -> Result<Self, EndpointError> {
        let socket = Socket::new(domain, transport, protocol).map_err(EndpointError::Create)?;
        Ok(Self { socket })
    }

    /// Convenience for the common IPv4 streaming case.
    pub fn ipv4_stream() -> Result<Self, EndpointError> {
        Self::create(Domain::IPV4, Type::STREAM, None)
    }

    /// Associate the endpoint with a concrete local address.
    ///
    /// Fails when the address is already in use, invalid for the socket's
    /// family, or requires privilege the caller lacks. No side effect on
    /// failure.
    pub fn bind(&self, addr: SocketAddr) -> Result<(), EndpointError> {
        self.socket
            .bind(&SockAddr::from(addr))
            .map_err(|source| EndpointError::Bind { addr, source })
    }

    /// Mark the endpoint as passively accepting incoming connections.
    ///
    /// `backlog` is a hint for the OS queue of completed-but-unaccepted
    /// handshakes, not a hard contract with peers.
    pub fn listen(&self, backlog: i32) -> Result<(), EndpointError> {
        self.socket.listen(backlog).map_err(EndpointError::Listen)
    }

    /// Block until an incoming connection completes its handshake.
    ///
    /// Returns a brand-new endpoint exclusively owning the peer's socket,
    /// plus the peer's address. The listening endpoint is not consumed.
    pub fn accept(&self) -> Result<(Endpoint, SocketAddr), EndpointError> {
        let (socket, peer) = self.socket.accept().map_err(EndpointError::Accept)?;
        let peer_addr = peer.as_socket().ok_or_else(|| {
            EndpointError::Accept(io::Error::new(
                io::ErrorKind::InvalidData,
                "peer address is not an IP address",
            ))
        })?;
        Ok((Endpoint { socket }, peer_addr))
    }

    /// Write the whole byte sequence to the peer, blocking until every byte
    /// has been accepted by the OS or an error occurs.
    ///
    /// Short writes are retried internally; a write that makes no progress
    /// surfaces as a write-stage error.
    pub fn send(&self, bytes: &[u8]) -> Result<(), EndpointError> {
        (&self.socket).write_all(bytes).map_err(EndpointError::Write)
    }

    /// Perform one blocking read of up to `max_bytes` bytes into a fresh
    /// buffer.
    ///
    /// Returns exactly the bytes that single read produced. Zero bytes means
    /// the peer closed its side; that is a valid end-of-stream result, not
    /// an error. Does not loop to fill the buffer.
    pub fn receive(&self, max_bytes: usize) -> Result<Vec<u8>, EndpointError> {
        let mut buf = vec![0u8; max_bytes];
        let n = (&self.socket).read(&mut buf).map_err(EndpointError::Read)?;
        buf.truncate(n);
        Ok(buf)
    }

    /// Get the local address this endpoint is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        let addr = self.socket.local_addr()?;
        addr.as_socket().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                "local address is not an IP address",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{Ipv4Addr, SocketAddr, TcpStream};
    use std::thread;

    fn loopback_listener() -> Endpoint {
        let endpoint = Endpoint::ipv4_stream().unwrap();
        endpoint
            .bind(SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 0))
            .unwrap();
        endpoint.listen(1).unwrap();
        endpoint
    }

    #[test]
    fn create_ipv4_stream() {
        let endpoint = Endpoint::ipv4_stream().unwrap();
        assert!(endpoint.local_addr().is_ok());
    }

    #[test]
    fn create_rejects_mismatched_protocol() {
        let err = Endpoint::create(Domain::IPV4, Type::STREAM, Some(Protocol::UDP)).unwrap_err();
        assert!(matches!(err, EndpointError::Create(_)));
    }

    #[test]
    fn bind_to_occupied_address_fails() {
        let first = loopback_listener();
        let addr = first.local_addr().unwrap();

        let second = Endpoint::ipv4_stream().unwrap();
        let err = second.bind(addr).unwrap_err();
        assert!(matches!(err, EndpointError::Bind { .. }));
        assert!(err.to_string().contains("bind"));
    }

    #[test]
    fn accept_produces_distinct_endpoint() {
        let listener = loopback_listener();
        let addr = listener.local_addr().unwrap();

        let client = thread::spawn(move || TcpStream::connect(addr).unwrap());
        let (peer, peer_addr) = listener.accept().unwrap();
        let stream = client.join().unwrap();

        assert_eq!(peer_addr, stream.local_addr().unwrap());
        assert_ne!(peer.local_addr().unwrap(), peer_addr);
        // The listener stays usable after handing off the peer socket.
        assert_eq!(listener.local_addr().unwrap(), addr);
    }

    #[test]
    fn send_and_receive_round_trip() {
        let listener = loopback_listener();
        let addr = listener.local_addr().unwrap();

        let client = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            let mut greeting = [0u8; 12];
            stream.read_exact(&mut greeting).unwrap();
            stream.write_all(b"ping").unwrap();
            greeting
        });

        let (peer, _) = listener.accept().unwrap();
        peer.send(b"hello there\n").unwrap();
        let received = peer.receive(1023).unwrap();

        assert_eq!(client.join().unwrap(), *b"hello there\n");
        assert_eq!(received, b"ping");
    }

    #[test]
    fn receive_after_peer_close_returns_empty() {
        let listener = loopback_listener();
        let addr = listener.local_addr().unwrap();

        let client = thread::spawn(move || {
            TcpStream::connect(addr).unwrap();
            // Dropping the stream closes the client side.
        });

        let (peer, _) = listener.accept().unwrap();
        client.join().unwrap();
        let received = peer.receive(1023).unwrap();
        assert!(received.is_empty());
    }

    #[test]
    fn dropping_unbound_endpoint_is_harmless() {
        let endpoint = Endpoint::ipv4_stream().unwrap();
        drop(endpoint);
    }
}
