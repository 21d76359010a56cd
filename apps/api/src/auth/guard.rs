use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::errors::AppError;
use crate::models::account::{Account, Role};
use crate::state::AppState;

/// The signed-in account, resolved from the store's session snapshot.
/// Rejects with 401 when nobody is signed in.
pub struct CurrentAccount(pub Account);

#[async_trait]
impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let account = state
            .store
            .current_session()
            .await?
            .ok_or(AppError::Unauthorized)?;
        Ok(CurrentAccount(account))
    }
}

/// A [`CurrentAccount`] that must additionally hold the `admin` role.
/// Rejects with 403 otherwise.
pub struct AdminAccount(pub Account);

#[async_trait]
impl FromRequestParts<AppState> for AdminAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentAccount(account) = CurrentAccount::from_request_parts(parts, state).await?;
        if account.role != Role::Admin {
            return Err(AppError::Forbidden);
        }
        Ok(AdminAccount(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    use crate::config::{Config, StorageKind};
    use crate::models::account::NewAccount;
    use crate::store::testing;

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

    fn make_parts() -> Parts {
        Request::new(()).into_parts().0
    }

    #[tokio::test]
    async fn test_no_session_is_unauthorized() {
        let state = make_state();
        let mut parts = make_parts();

        let err = CurrentAccount::from_request_parts(&mut parts, &state)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_admin_session_passes_both_guards() {
        let state = make_state();
        state
            .store
            .authenticate("admin@resumanage.in", "password123")
            .await
            .unwrap();
        let mut parts = make_parts();

        let CurrentAccount(account) = CurrentAccount::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(account.id, "admin-1");

        let AdminAccount(admin) = AdminAccount::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(admin.id, "admin-1");
    }

    #[tokio::test]
    async fn test_user_session_is_forbidden_for_admin_guard() {
        let state = make_state();
        state
            .store
            .register(NewAccount {
                email: "priya@example.in".to_string(),
                first_name: "Priya".to_string(),
                last_name: "Nair".to_string(),
                phone: None,
                password: Some("s3cret7".to_string()),
            })
            .await
            .unwrap();
        let mut parts = make_parts();

        assert!(CurrentAccount::from_request_parts(&mut parts, &state)
            .await
            .is_ok());
        let err = AdminAccount::from_request_parts(&mut parts, &state)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Forbidden));
    }
}
