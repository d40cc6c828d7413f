//! Agent API endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use super::MessageResponse;
use crate::auth;
use crate::errors::AppError;
use crate::models::{Agent, AgentProfile, CreateAgentRequest};
use crate::AppState;

/// Response body for a created agent. The credential never leaves the server.
#[derive(Debug, Serialize)]
pub struct CreateAgentResponse {
    pub message: String,
    pub agent: AgentProfile,
}

/// POST /api/agents - Create a new agent.
pub async fn create_agent(
    State(state): State<AppState>,
    Json(request): Json<CreateAgentRequest>,
) -> Result<(StatusCode, Json<CreateAgentResponse>), AppError> {
    // Validate required fields
    if request.name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.mobile.trim().is_empty()
        || request.password.trim().is_empty()
    {
        return Err(AppError::Validation(
            "Name, email, mobile and password are required".to_string(),
        ));
    }

    if state
        .repo
        .find_agent_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(AppError::Validation("Agent already exists".to_string()));
    }

    let password_hash = auth::hash_password(&request.password)?;
    let agent = state.repo.create_agent(&request, &password_hash).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateAgentResponse {
            message: "Agent created successfully".to_string(),
            agent: AgentProfile {
                id: agent.id,
                name: agent.name,
                email: agent.email,
                mobile: agent.mobile,
            },
        }),
    ))
}

/// GET /api/agents - List all agents, passwords omitted.
pub async fn list_agents(State(state): State<AppState>) -> Result<Json<Vec<Agent>>, AppError> {
    Ok(Json(state.repo.list_agents().await?))
}

/// DELETE /api/agents/:id - Delete an agent.
pub async fn delete_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.repo.delete_agent(&id).await?;
    Ok(Json(MessageResponse::new("Agent deleted successfully")))
}
