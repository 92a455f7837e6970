//! Partyline entry point.
//!
//! Parses arguments, discovers the local username, establishes the session
//! (connect + login handshake), then hands the connection to one of the two
//! operating modes: a scrolling line-mode log or the full-screen interface.
//! Whichever way the session ends, the shutdown coordinator runs last and
//! sends the single orderly logout when one is owed.

mod config;
mod highlight;
mod input;
mod line;
mod screen;
mod signals;
mod timefmt;
mod ui;
mod username;

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use partyline_client::{Session, ShutdownCoordinator, ShutdownReason, spawn_receiver};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Terminal chat client
#[derive(Parser, Debug)]
#[command(name = "partyline")]
#[command(about = "Terminal client for the partyline chat protocol")]
#[command(version)]
struct Args {
    /// Port to connect to
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Server IP address
    #[arg(long, default_value = "127.0.0.1")]
    ip: IpAddr,

    /// Server domain name (cannot be combined with --ip)
    #[arg(long, conflicts_with = "ip")]
    domain: Option<String>,

    /// Suppress mention alerts
    #[arg(long)]
    quiet: bool,

    /// Full-screen interface
    #[arg(long)]
    tui: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "partyline=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let username = username::discover().context("failed to determine username")?;
    let addr = resolve_addr(&args).await?;
    let config = Config { username, quiet: args.quiet };

    let session = Session::connect(addr, &config.username).await?;
    tracing::debug!(%addr, username = %config.username, "session established");

    let (reader, mut writer) = session.split();
    let (events_tx, mut events) = mpsc::channel(64);
    let receiver = spawn_receiver(reader, events_tx);

    let outcome = if args.tui {
        screen::run(&mut writer, &mut events, &config).await
    } else {
        line::run(&mut writer, &mut events, &config).await
    };

    // Both activities have stopped: the input loop returned and the receiver
    // is aborted here, so the logout cannot interleave with other sends.
    receiver.abort();
    let _ = receiver.await;

    let mut coordinator = ShutdownCoordinator::new();
    let reason = match outcome {
        Ok(reason) => reason,
        // Terminal or event-stream failure: the peer was never told, so the
        // orderly logout still goes out before the error surfaces.
        Err(error) => {
            coordinator
                .finish(&mut writer, &config.username, &ShutdownReason::Interface)
                .await;
            return Err(error.context("interface failure"));
        },
    };
    coordinator.finish(&mut writer, &config.username, &reason).await;

    tracing::debug!(?reason, "session closed");
    if let ShutdownReason::Transport(error) = reason {
        bail!("session failed: {error}");
    }
    Ok(())
}

/// Resolve the target address from the flags, before any network activity.
async fn resolve_addr(args: &Args) -> Result<SocketAddr> {
    match &args.domain {
        Some(domain) => {
            let mut addrs = tokio::net::lookup_host((domain.as_str(), args.port))
                .await
                .with_context(|| format!("cannot resolve domain {domain}"))?;
            addrs.next().ok_or_else(|| anyhow!("domain {domain} resolved to no addresses"))
        },
        None => Ok(SocketAddr::new(args.ip, args.port)),
    }
}
