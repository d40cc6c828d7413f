//! List upload, distribution and deletion endpoints.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;

use super::MessageResponse;
use crate::errors::AppError;
use crate::ingest;
use crate::models::{List, ListDistribution};
use crate::AppState;

/// Response body for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadListResponse {
    pub message: String,
    pub list: List,
}

/// POST /api/lists/upload - Accept a multipart lead file and distribute it.
///
/// The upload is staged under the configured upload directory and consumed
/// by the ingestion pipeline.
pub async fn upload_list(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadListResponse>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        // Strip any client-supplied directory components
        let file_name = field.file_name().unwrap_or_default().to_string();
        let file_name = std::path::Path::new(&file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        if !ingest::extension_allowed(&file_name) {
            return Err(AppError::Validation(
                "Only CSV, XLSX, and XLS files are allowed".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {}", e)))?;

        let stored_path = state
            .config
            .upload_dir
            .join(format!("{}-{}", Utc::now().timestamp_millis(), file_name));
        tokio::fs::write(&stored_path, &data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store upload: {}", e)))?;

        let list = ingest::ingest_list(&state.repo, &file_name, &stored_path).await?;

        return Ok((
            StatusCode::CREATED,
            Json(UploadListResponse {
                message: "List uploaded and distributed successfully".to_string(),
                list,
            }),
        ));
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}

/// GET /api/lists - List uploads, newest first.
pub async fn get_lists(State(state): State<AppState>) -> Result<Json<Vec<List>>, AppError> {
    Ok(Json(state.repo.list_lists().await?))
}

/// GET /api/lists/:id/distribution - Per-agent grouping of a list's leads.
pub async fn get_list_distribution(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ListDistribution>, AppError> {
    let list = state
        .repo
        .get_list(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("List not found".to_string()))?;

    let distribution = state.repo.get_list_distribution(&id).await?;

    Ok(Json(ListDistribution { list, distribution }))
}

/// DELETE /api/lists/:id - Delete a list and all of its leads.
pub async fn delete_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.repo.delete_list(&id).await?;
    Ok(Json(MessageResponse::new("List deleted successfully")))
}
