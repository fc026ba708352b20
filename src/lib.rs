//! Single-shot TCP greeting server library.

pub mod config;
pub mod net;
pub mod server;

pub use config::ServerConfig;
pub use net::endpoint::{Endpoint, EndpointError};
pub use server::GreetServer;
