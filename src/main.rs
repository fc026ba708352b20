//! Single-shot TCP greeting server.
//!
//! Binds a listening endpoint, accepts exactly one inbound connection,
//! sends a greeting, reports the peer's reply, and exits. Exit status is 0
//! on a full successful cycle and 1 on a failure at any stage, with a
//! diagnostic naming the stage on stderr.

use std::net::IpAddr;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tcp_greeter::{GreetServer, ServerConfig};

#[derive(Parser)]
#[command(name = "tcp-greeter")]
#[command(about = "Accept one TCP connection, send a greeting, report the reply", long_about = None)]
struct Cli {
    /// Local address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// TCP port to listen on.
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Pending-connection queue hint passed to the OS.
    #[arg(long, default_value_t = 15)]
    backlog: i32,

    /// Greeting payload sent to the connected peer.
    #[arg(long, default_value = "hello there\n")]
    greeting: String,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tcp_greeter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig {
        bind_address: cli.bind,
        port: cli.port,
        backlog: cli.backlog,
        greeting: cli.greeting,
        ..ServerConfig::default()
    };

    tracing::info!(
        bind_address = %config.bind_address,
        port = config.port,
        backlog = config.backlog,
        "Configuration loaded"
    );

    if let Err(err) = run_once(&config) {
        tracing::error!(error = %err, "Server cycle failed");
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    tracing::info!("Single cycle complete");
    ExitCode::SUCCESS
}

fn run_once(config: &ServerConfig) -> Result<(), tcp_greeter::EndpointError> {
    let server = GreetServer::bind(config)?;
    server.serve_once()?;
    Ok(())
}
