use uuid::Uuid;

use crate::domain::entities::Account;
use crate::domain::errors::ScoreError;
use crate::domain::ports::{AccountStore, Clock};
use crate::interface_adapters::protocol::CredentialsRequest;
use crate::use_cases::credentials::{password_digest, validate};

// Response returned by the register use case.
pub struct RegisterResponse {
    pub account_id: String,
}

// Account registration use case with injected dependencies.
pub struct RegisterUseCase<C, S> {
    pub clock: C,
    pub store: S,
}

impl<C, S> RegisterUseCase<C, S>
where
    C: Clock,
    S: AccountStore,
{
    pub async fn execute(&self, payload: CredentialsRequest) -> Result<RegisterResponse, ScoreError> {
        let credentials = validate(&payload.email, &payload.password)?;

        let account_id = Uuid::new_v4().to_string();
        let password_salt = Uuid::new_v4().simple().to_string();
        let account = Account {
            account_id: account_id.clone(),
            email: credentials.email,
            password_digest: password_digest(&password_salt, &credentials.password),
            password_salt,
            created_at: self.clock.now_epoch_seconds(),
            games: Vec::new(),
        };

        let inserted = self
            .store
            .insert(account)
            .await
            .map_err(|_| ScoreError::StorageFailure)?;
        if !inserted {
            return Err(ScoreError::AlreadyRegistered);
        }

        Ok(RegisterResponse { account_id })
    }
}
