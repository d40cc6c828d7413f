//! Agent model matching the dashboard Agent interface.

use serde::{Deserialize, Serialize};

/// A sales agent to whom uploaded leads are assigned.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    /// Never serialized; agent listings omit the credential
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Stored count of leads currently assigned to this agent
    pub lead_count: i64,
    pub created_at: String,
}

/// Request body for creating a new agent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentRequest {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
}

/// Public agent fields embedded in the create response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
}
