use sha2::{Digest, Sha256};

use crate::domain::errors::ScoreError;

// Trimmed, lowercased email and trimmed password, both non-empty.
pub(crate) struct Credentials {
    pub email: String,
    pub password: String,
}

pub(crate) fn validate(email: &str, password: &str) -> Result<Credentials, ScoreError> {
    let email = email.trim().to_lowercase();
    let password = password.trim();

    if email.is_empty() || password.is_empty() {
        return Err(ScoreError::MalformedCredentials);
    }
    if !email.contains('@') {
        return Err(ScoreError::MalformedCredentials);
    }

    Ok(Credentials {
        email,
        password: password.to_string(),
    })
}

pub(crate) fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
