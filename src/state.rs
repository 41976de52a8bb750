// src/state.rs
use std::sync::Arc;

use crate::config::RelayConfig;
use crate::error::ConfigError;
use crate::services::relay::RelayGateway;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub relay: RelayGateway,
    pub static_dir: String,
}

impl AppState {
    pub fn new(config: &RelayConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            relay: RelayGateway::new(config.upstream.clone())?,
            static_dir: config.static_dir.clone(),
        })
    }
}
