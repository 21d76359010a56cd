use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::auth::guard::AdminAccount;
use crate::errors::AppError;
use crate::models::account::Account;
use crate::models::audit::AuditLogEntry;
use crate::models::stats::DashboardStats;
use crate::state::AppState;
use crate::store::ResumeFilter;

use super::export;

/// GET /api/v1/admin/accounts
///
/// Raw account records, passwords and pending tokens included; the admin
/// console is trusted with them.
pub async fn handle_list_accounts(
    State(state): State<AppState>,
    AdminAccount(_admin): AdminAccount,
) -> Result<Json<Vec<Account>>, AppError> {
    Ok(Json(state.store.list_accounts().await?))
}

/// GET /api/v1/admin/stats
pub async fn handle_dashboard_stats(
    State(state): State<AppState>,
    AdminAccount(_admin): AdminAccount,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(state.store.dashboard_stats().await?))
}

/// GET /api/v1/admin/audit-logs
pub async fn handle_audit_logs(
    State(state): State<AppState>,
    AdminAccount(_admin): AdminAccount,
) -> Result<Json<Vec<AuditLogEntry>>, AppError> {
    Ok(Json(state.store.list_audit_logs().await?))
}

/// GET /api/v1/admin/resumes/export
///
/// The "Export All (CSV)" download on the management page.
pub async fn handle_export_resumes(
    State(state): State<AppState>,
    AdminAccount(_admin): AdminAccount,
) -> Result<Response, AppError> {
    let resumes = state.store.list_resumes(ResumeFilter::default()).await?;
    let csv = export::resumes_to_csv(&resumes);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"resumes_export.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
