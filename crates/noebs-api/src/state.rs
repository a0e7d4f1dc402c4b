//! Application state shared across handlers

use std::sync::Arc;

use noebs_fields::RouteEntry;

use crate::routes;
use crate::switch::SwitchClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Backend switch
    pub switch: Arc<dyn SwitchClient>,
    /// Snapshot of every registered route, in registration order
    pub catalogue: Arc<[RouteEntry]>,
}

impl AppState {
    pub fn new(switch: Arc<dyn SwitchClient>) -> Self {
        Self {
            switch,
            catalogue: routes::route_catalogue().into(),
        }
    }
}
