//! REST API module.
//!
//! Contains all API routes and handlers following the dashboard contract.

mod agents;
mod auth;
mod lists;

pub use agents::*;
pub use auth::*;
pub use lists::*;

use serde::Serialize;

/// Body shape for message-only responses.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
