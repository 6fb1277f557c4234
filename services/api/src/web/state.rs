//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use bookmarket_core::ports::MarketStore;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Handlers hold no mutable state of their own; the store is the only shared
/// reference, injected here so tests can substitute an in-memory one.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MarketStore>,
    pub config: Arc<Config>,
}
