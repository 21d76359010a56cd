pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::admin::handlers as admin;
use crate::auth::handlers as auth;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

/// Request-body ceiling. Attachments ride inside the JSON body as base64,
/// so a file at the 5 MB upload ceiling runs to roughly 6.7 MB encoded
/// before framing; axum's stock 2 MB cap would refuse it at the socket.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session & account lifecycle
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        .route("/api/v1/auth/session", get(auth::handle_session))
        .route(
            "/api/v1/auth/forgot-password",
            post(auth::handle_forgot_password),
        )
        .route(
            "/api/v1/auth/reset-password",
            post(auth::handle_reset_password),
        )
        .route(
            "/api/v1/auth/verify-email",
            post(auth::handle_verify_email),
        )
        .route("/api/v1/accounts/:id", patch(auth::handle_update_account))
        // Resumes
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume)
                .patch(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        // Admin console
        .route("/api/v1/admin/accounts", get(admin::handle_list_accounts))
        .route("/api/v1/admin/stats", get(admin::handle_dashboard_stats))
        .route("/api/v1/admin/audit-logs", get(admin::handle_audit_logs))
        .route(
            "/api/v1/admin/resumes/export",
            get(admin::handle_export_resumes),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use base64::prelude::*;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, StorageKind};
    use crate::store::{testing, ResumeFilter};

    fn make_state() -> AppState {
        AppState {
            store: testing::store(),
            config: Config {
                port: 8080,
                rust_log: "info".to_string(),
                storage_backend: StorageKind::Memory,
                data_dir: "./data".to_string(),
                redis_url: None,
                app_base_url: testing::TEST_BASE_URL.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_multi_mb_attachment_clears_the_request_body_cap() {
        let state = make_state();
        state
            .store
            .authenticate("admin@resumanage.in", "password123")
            .await
            .unwrap();
        let app = build_router(state.clone());

        // 3 MB decoded is ~4 MB once base64-encoded into the JSON body:
        // past axum's stock 2 MB cap, within the raised one.
        let payload = vec![0u8; 3 * 1024 * 1024];
        let body = json!({
            "personalInfo": {
                "fullName": "Rahul Sharma",
                "email": "rahul.sharma@example.in",
                "phone": "+91-98765-43210",
                "address": "Mumbai, Maharashtra",
                "linkedin": "linkedin.com/in/rahulsharma",
                "summary": "Backend engineer."
            },
            "status": "submitted",
            "attachment": {
                "name": "resume.pdf",
                "type": "application/pdf",
                "size": payload.len(),
                "data": BASE64_STANDARD.encode(&payload)
            }
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/resumes")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let stored = state
            .store
            .list_resumes(ResumeFilter::default())
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].user_id, "admin-1");
        let attachment = stored[0].attachment.as_ref().unwrap();
        assert_eq!(attachment.size, payload.len() as u64);
    }
}
