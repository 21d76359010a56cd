use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use base64::prelude::*;
use serde::Deserialize;

use crate::auth::guard::CurrentAccount;
use crate::errors::AppError;
use crate::models::account::{Account, Role};
use crate::models::resume::{Attachment, NewResume, Resume, ResumePatch, ResumeStatus};
use crate::state::AppState;
use crate::store::ResumeFilter;

/// MIME types the upload step accepts.
const ACCEPTED_ATTACHMENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Upload ceiling advertised next to the drop zone.
const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeListQuery {
    pub user_id: Option<String>,
    pub status: Option<ResumeStatus>,
}

/// GET /api/v1/resumes?userId=&status=
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    CurrentAccount(current): CurrentAccount,
    Query(params): Query<ResumeListQuery>,
) -> Result<Json<Vec<Resume>>, AppError> {
    // Non-admins only ever see their own submissions, whatever they ask
    // for. An empty `userId` param means unfiltered, same as omitting it.
    let user_id = if current.role == Role::Admin {
        params.user_id.filter(|id| !id.is_empty())
    } else {
        Some(current.id)
    };
    let resumes = state
        .store
        .list_resumes(ResumeFilter {
            user_id,
            status: params.status,
        })
        .await?;
    Ok(Json(resumes))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    CurrentAccount(current): CurrentAccount,
    Json(mut req): Json<NewResume>,
) -> Result<Json<Resume>, AppError> {
    if let Some(attachment) = &req.attachment {
        validate_attachment(attachment)?;
    }
    // The session owns whatever it submits.
    req.user_id = current.id;
    let resume = state.store.create_resume(req).await?;
    Ok(Json(resume))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    CurrentAccount(current): CurrentAccount,
    Path(id): Path<String>,
) -> Result<Json<Resume>, AppError> {
    let resume = state
        .store
        .get_resume(&id)
        .await?
        .ok_or(AppError::ResumeNotFound)?;
    ensure_can_touch(&current, &resume)?;
    Ok(Json(resume))
}

/// PATCH /api/v1/resumes/:id
///
/// Owners edit content; `status` changes are the review workflow and stay
/// admin-only.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    CurrentAccount(current): CurrentAccount,
    Path(id): Path<String>,
    Json(patch): Json<ResumePatch>,
) -> Result<Json<Resume>, AppError> {
    let existing = state
        .store
        .get_resume(&id)
        .await?
        .ok_or(AppError::ResumeNotFound)?;
    ensure_can_touch(&current, &existing)?;
    if patch.status.is_some() && current.role != Role::Admin {
        return Err(AppError::Forbidden);
    }
    if let Some(attachment) = &patch.attachment {
        validate_attachment(attachment)?;
    }
    let resume = state.store.update_resume(&id, patch).await?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    CurrentAccount(current): CurrentAccount,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if let Some(existing) = state.store.get_resume(&id).await? {
        ensure_can_touch(&current, &existing)?;
    }
    // Deleting an absent resume stays a silent no-op.
    state.store.delete_resume(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn ensure_can_touch(current: &Account, resume: &Resume) -> Result<(), AppError> {
    if current.role == Role::Admin || resume.user_id == current.id {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Boundary checks for an embedded upload: accepted MIME type, advertised
/// size ceiling, and a base64 payload (bare or data-URL) that decodes to
/// exactly the declared size.
fn validate_attachment(attachment: &Attachment) -> Result<(), AppError> {
    if !ACCEPTED_ATTACHMENT_TYPES.contains(&attachment.content_type.as_str()) {
        return Err(AppError::Validation(
            "Please upload a PDF or DOCX file.".to_string(),
        ));
    }
    if attachment.size > MAX_ATTACHMENT_BYTES {
        return Err(AppError::Validation(
            "Attachment must be 5MB or smaller".to_string(),
        ));
    }
    let payload = attachment
        .data
        .rsplit_once("base64,")
        .map(|(_, p)| p)
        .unwrap_or(&attachment.data);
    let decoded = BASE64_STANDARD
        .decode(payload)
        .map_err(|_| AppError::Validation("Attachment payload is not valid base64".to_string()))?;
    if decoded.len() as u64 != attachment.size {
        return Err(AppError::Validation(
            "Attachment size does not match its payload".to_string(),
        ));
    }
    Ok(())
}
