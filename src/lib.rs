//! Chat relay: a single-endpoint gateway in front of a hosted
//! conversational-AI flow, plus the client adapter the chat widget uses.

pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod routes;
pub mod services;
pub mod state;

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("chat_relay=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
