use crate::domain::errors::ScoreError;
use crate::domain::ports::AccountStore;
use crate::interface_adapters::protocol::CredentialsRequest;
use crate::use_cases::credentials::{password_digest, validate};

// Response returned by the login use case.
pub struct LoginResponse {
    pub account_id: String,
}

// Login use case with injected dependencies.
pub struct LoginUseCase<S> {
    pub store: S,
}

impl<S> LoginUseCase<S>
where
    S: AccountStore,
{
    pub async fn execute(&self, payload: CredentialsRequest) -> Result<LoginResponse, ScoreError> {
        let credentials = validate(&payload.email, &payload.password)?;

        let account = self
            .store
            .find_by_email(&credentials.email)
            .await
            .map_err(|_| ScoreError::StorageFailure)?
            .ok_or(ScoreError::InvalidCredentials)?;

        // Unknown email and wrong password look the same to the caller.
        if password_digest(&account.password_salt, &credentials.password) != account.password_digest
        {
            return Err(ScoreError::InvalidCredentials);
        }

        Ok(LoginResponse {
            account_id: account.account_id,
        })
    }
}
