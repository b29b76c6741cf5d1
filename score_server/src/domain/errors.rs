// Domain-level errors for account and score workflows.
#[derive(Debug, PartialEq, Eq)]
pub enum ScoreError {
    // Empty fields or an email without '@'.
    MalformedCredentials,
    // Unknown email or wrong password.
    InvalidCredentials,
    AlreadyRegistered,
    UnknownAccount,
    InvalidScore,
    StorageFailure,
}
