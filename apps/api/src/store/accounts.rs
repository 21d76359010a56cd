use std::collections::HashMap;

use chrono::Utc;
use tracing::info;

use crate::errors::{AppError, TokenKind};
use crate::models::account::{Account, AccountPatch, NewAccount, ResetTokenRecord, Role};
use crate::storage::keys;

use super::{ids, Store};

/// Password assumed for legacy records that predate stored passwords, and
/// assigned to registrations that omit one.
pub(crate) const DEFAULT_PASSWORD: &str = "password123";

/// Reset tokens live for one hour.
const RESET_TOKEN_TTL_MS: i64 = 3_600_000;

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

impl Store {
    /// Checks the password against the stored one (or the legacy default
    /// when none is stored), writes the session snapshot, and returns the
    /// account. Unknown email and wrong password fail identically.
    ///
    /// Plaintext comparison, no lockout, no rate limiting: this mirrors the
    /// mock credential model the frontend was built against.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account, AppError> {
        let _guard = self.op_lock.lock().await;
        let accounts = self.load_accounts().await?;
        let account = accounts
            .iter()
            .find(|a| a.email == email)
            .ok_or(AppError::InvalidCredentials)?;

        let stored = account.password.as_deref().unwrap_or(DEFAULT_PASSWORD);
        if password != stored {
            return Err(AppError::InvalidCredentials);
        }

        self.write_session(account).await?;
        Ok(account.clone())
    }

    /// Creates an unverified `user` account, emits the verification email,
    /// and signs the new account in. Email uniqueness is checked here and
    /// only here (case-sensitive exact match).
    pub async fn register(&self, new: NewAccount) -> Result<Account, AppError> {
        let _guard = self.op_lock.lock().await;
        let mut accounts = self.load_accounts().await?;
        if accounts.iter().any(|a| a.email == new.email) {
            return Err(AppError::EmailAlreadyRegistered);
        }

        let verification_token = ids::opaque_token();
        let account = Account {
            id: ids::entity_id(),
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
            phone: new.phone,
            role: Role::User,
            is_verified: false,
            password: Some(new.password.unwrap_or_else(|| DEFAULT_PASSWORD.to_string())),
            verification_token: Some(verification_token.clone()),
            created_at: Utc::now(),
        };
        accounts.push(account.clone());
        self.save_accounts(&accounts).await?;

        let url = format!("{}/#/verify-email/{verification_token}", self.base_url);
        self.mailer.send_verification(&account.email, &url).await;

        self.write_session(&account).await?;
        Ok(account)
    }

    /// Issues a one-hour reset token and emits the reset email. Unknown
    /// email fails loudly; disclosing whether an address is registered is a
    /// deliberate UX trade-off of the credential model.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let _guard = self.op_lock.lock().await;
        let accounts = self.load_accounts().await?;
        let account = accounts.iter().find(|a| a.email == email).ok_or_else(|| {
            AppError::AccountNotFound("No account found with this email address".to_string())
        })?;

        let token = ids::opaque_token();
        let mut tokens = self.load_reset_tokens().await?;
        tokens.insert(
            token.clone(),
            ResetTokenRecord {
                user_id: account.id.clone(),
                expiry: Utc::now().timestamp_millis() + RESET_TOKEN_TTL_MS,
            },
        );
        self.save_reset_tokens(&tokens).await?;

        let url = format!("{}/#/reset-password/{token}", self.base_url);
        self.mailer.send_password_reset(email, &url).await;
        Ok(())
    }

    /// Overwrites the password named by a live reset token, consumes the
    /// token, and records the reset in the audit log.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        let _guard = self.op_lock.lock().await;
        let mut tokens = self.load_reset_tokens().await?;
        let record = match tokens.get(token) {
            Some(r) if r.expiry >= Utc::now().timestamp_millis() => r.clone(),
            _ => return Err(AppError::InvalidOrExpiredToken(TokenKind::Reset)),
        };

        let mut accounts = self.load_accounts().await?;
        let account = accounts
            .iter_mut()
            .find(|a| a.id == record.user_id)
            .ok_or_else(|| AppError::AccountNotFound("User not found".to_string()))?;
        account.password = Some(new_password.to_string());
        let account_id = account.id.clone();
        self.save_accounts(&accounts).await?;

        tokens.remove(token);
        self.save_reset_tokens(&tokens).await?;

        self.append_audit_log(
            "PASSWORD_RESET",
            &account_id,
            &account_id,
            "User reset their password",
        )
        .await?;
        Ok(())
    }

    /// Marks the account holding this pending token as verified and clears
    /// the token, so a second call with the same token fails. Refreshes the
    /// session snapshot only when the verified account is the one in
    /// session.
    pub async fn verify_email(&self, token: &str) -> Result<bool, AppError> {
        let _guard = self.op_lock.lock().await;
        let mut accounts = self.load_accounts().await?;
        let account = accounts
            .iter_mut()
            .find(|a| a.verification_token.as_deref() == Some(token))
            .ok_or(AppError::InvalidOrExpiredToken(TokenKind::Verification))?;

        account.is_verified = true;
        account.verification_token = None;
        let verified = account.clone();
        self.save_accounts(&accounts).await?;

        if let Some(session) = self.read_session().await? {
            if session.id == verified.id {
                self.write_session(&verified).await?;
            }
        }
        Ok(true)
    }

    /// Clears the session. Idempotent.
    pub async fn logout(&self) -> Result<(), AppError> {
        let _guard = self.op_lock.lock().await;
        self.storage.remove(keys::SESSION).await?;
        Ok(())
    }

    /// Returns the session snapshot, if anyone is signed in.
    pub async fn current_session(&self) -> Result<Option<Account>, AppError> {
        let _guard = self.op_lock.lock().await;
        self.read_session().await
    }

    /// Merges the present patch fields into the account (absent fields are
    /// retained; email uniqueness is not re-checked) and refreshes the
    /// session snapshot only when the updated account is the session
    /// account. Backs both self-service profile edits and admin role
    /// toggles; who may patch what is the HTTP layer's problem.
    pub async fn update_profile(
        &self,
        account_id: &str,
        patch: AccountPatch,
    ) -> Result<Account, AppError> {
        let _guard = self.op_lock.lock().await;
        let mut accounts = self.load_accounts().await?;
        let account = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| AppError::AccountNotFound("User not found".to_string()))?;

        if let Some(first_name) = patch.first_name {
            account.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            account.last_name = last_name;
        }
        if let Some(phone) = patch.phone {
            account.phone = Some(phone);
        }
        if let Some(email) = patch.email {
            account.email = email;
        }
        if let Some(role) = patch.role {
            account.role = role;
        }
        let updated = account.clone();
        self.save_accounts(&accounts).await?;

        if let Some(session) = self.read_session().await? {
            if session.id == updated.id {
                self.write_session(&updated).await?;
            }
        }
        Ok(updated)
    }

    /// All accounts in storage order, raw: passwords and pending tokens
    /// ride along in the records. Presentation layers decide what to show.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        let _guard = self.op_lock.lock().await;
        self.load_accounts().await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Collection helpers (no locking; callers hold the operation lock)
// ────────────────────────────────────────────────────────────────────────────

impl Store {
    /// Loads the accounts collection, seeding the default administrator on
    /// the very first read of an empty store.
    pub(crate) async fn load_accounts(&self) -> Result<Vec<Account>, AppError> {
        if let Some(accounts) = self.read_json(keys::USERS).await? {
            return Ok(accounts);
        }
        let seeded = vec![seed_admin()];
        self.write_json(keys::USERS, &seeded).await?;
        info!("Seeded default administrator account");
        Ok(seeded)
    }

    pub(crate) async fn save_accounts(&self, accounts: &[Account]) -> Result<(), AppError> {
        self.write_json(keys::USERS, accounts).await
    }

    async fn load_reset_tokens(&self) -> Result<HashMap<String, ResetTokenRecord>, AppError> {
        Ok(self.read_json(keys::RESET_TOKENS).await?.unwrap_or_default())
    }

    async fn save_reset_tokens(
        &self,
        tokens: &HashMap<String, ResetTokenRecord>,
    ) -> Result<(), AppError> {
        self.write_json(keys::RESET_TOKENS, tokens).await
    }

    async fn read_session(&self) -> Result<Option<Account>, AppError> {
        self.read_json(keys::SESSION).await
    }

    async fn write_session(&self, account: &Account) -> Result<(), AppError> {
        self.write_json(keys::SESSION, account).await
    }
}

/// The verified administrator present in every fresh store.
fn seed_admin() -> Account {
    Account {
        id: "admin-1".to_string(),
        email: "admin@resumanage.in".to_string(),
        first_name: "Aditya".to_string(),
        last_name: "Verma".to_string(),
        phone: None,
        role: Role::Admin,
        is_verified: true,
        password: Some(DEFAULT_PASSWORD.to_string()),
        verification_token: None,
        created_at: Utc::now(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
