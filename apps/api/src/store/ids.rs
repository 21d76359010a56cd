use rand::distributions::Alphanumeric;
use rand::Rng;
use uuid::Uuid;

/// Length of reset and verification tokens.
pub const TOKEN_LEN: usize = 12;

/// Server-assigned id for accounts, resumes, and audit entries.
pub fn entity_id() -> String {
    Uuid::new_v4().to_string()
}

/// Opaque single-purpose token for reset and verification links.
pub fn opaque_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}
