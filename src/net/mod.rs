//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! create (address family + transport)
//!     → bind (local address)
//!     → listen (backlog hint)
//!     → accept (one new Endpoint per peer)
//!     → send / receive (blocking byte-stream transfer)
//! ```
//!
//! # Design Decisions
//! - One owned socket per Endpoint; the descriptor closes on drop
//! - Blocking calls only; no runtime, no timeouts
//! - One error variant per lifecycle stage
pub mod endpoint;
