use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered identity: candidate (`user`) or administrator (`admin`).
///
/// Credential fields (`password`, `verification_token`) live inline in the
/// raw record — this is a mock persistence layer, and presentation layers
/// are responsible for not exposing them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    pub is_verified: bool,
    /// Absent on legacy records; such accounts authenticate against the
    /// shared default password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Pending email-verification token; cleared once the email is verified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Input for `Store::register`. Role, verification state, id, and timestamps
/// are always server-assigned.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    /// Optional; accounts registered without one get the default password.
    pub password: Option<String>,
}

/// Partial update for `Store::update_profile`, enumerating the updatable
/// fields. The id and `createdAt` are immutable, the verification flag flips
/// only through `verify_email`, and passwords change through
/// `reset_password`. Unknown fields are rejected outright.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AccountPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

/// Pending password-reset grant, stored in the token map under the token
/// string itself. Single use; expired entries are rejected on lookup but
/// never proactively purged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResetTokenRecord {
    pub user_id: String,
    /// Expiry instant in epoch milliseconds.
    pub expiry: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_serializes_with_frontend_field_names() {
        let account = Account {
            id: "admin-1".to_string(),
            email: "admin@resumanage.in".to_string(),
            first_name: "Aditya".to_string(),
            last_name: "Verma".to_string(),
            phone: None,
            role: Role::Admin,
            is_verified: true,
            password: Some("password123".to_string()),
            verification_token: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["firstName"], "Aditya");
        assert_eq!(json["isVerified"], true);
        assert_eq!(json["role"], "admin");
        // Absent optionals stay out of the stored record entirely.
        assert!(json.get("phone").is_none());
        assert!(json.get("verificationToken").is_none());
    }

    #[test]
    fn test_legacy_record_without_password_deserializes() {
        let raw = r#"{
            "id": "u1",
            "email": "old@example.in",
            "firstName": "Rahul",
            "lastName": "Sharma",
            "role": "user",
            "isVerified": false,
            "createdAt": "2024-05-01T10:00:00Z"
        }"#;
        let account: Account = serde_json::from_str(raw).unwrap();
        assert_eq!(account.password, None);
        assert_eq!(account.role, Role::User);
    }

    #[test]
    fn test_patch_rejects_immutable_fields() {
        let err = serde_json::from_str::<AccountPatch>(r#"{"id":"evil"}"#);
        assert!(err.is_err());
        let err = serde_json::from_str::<AccountPatch>(r#"{"createdAt":"2024-01-01T00:00:00Z"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_patch_accepts_role_toggle() {
        let patch: AccountPatch = serde_json::from_str(r#"{"role":"admin"}"#).unwrap();
        assert_eq!(patch.role, Some(Role::Admin));
        assert!(patch.first_name.is_none());
    }
}
