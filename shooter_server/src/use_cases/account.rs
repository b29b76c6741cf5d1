// Login and registration on behalf of a connecting host shell.

use crate::domain::{IdentityProvider, LoginResult, RegisterResult};
use tracing::debug;

/// Validated credentials. Both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn parse(email: &str, password: &str) -> Option<Self> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

pub async fn login(identity: &dyn IdentityProvider, email: &str, password: &str) -> LoginResult {
    let Some(credentials) = Credentials::parse(email, password) else {
        debug!("login rejected before reaching the identity provider");
        return LoginResult::InvalidCredentials;
    };
    identity
        .login(&credentials.email, &credentials.password)
        .await
}

pub async fn register(
    identity: &dyn IdentityProvider,
    email: &str,
    password: &str,
) -> RegisterResult {
    let Some(credentials) = Credentials::parse(email, password) else {
        debug!("registration rejected before reaching the identity provider");
        return RegisterResult::InvalidCredentials;
    };
    identity
        .register(&credentials.email, &credentials.password)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AccountId;
    use crate::use_cases::test_support::ScriptedIdentity;

    fn identity() -> ScriptedIdentity {
        ScriptedIdentity::new(
            LoginResult::Ok(AccountId::new("acc-1")),
            RegisterResult::Registered(AccountId::new("acc-2")),
        )
    }

    #[tokio::test]
    async fn when_email_is_blank_then_login_is_rejected_without_calling_provider() {
        let identity = identity();

        let result = login(&identity, "   ", "secret").await;

        assert_eq!(result, LoginResult::InvalidCredentials);
        assert!(identity.seen().is_empty());
    }

    #[tokio::test]
    async fn when_password_is_empty_then_registration_is_rejected() {
        let identity = identity();

        let result = register(&identity, "a@b.c", "").await;

        assert_eq!(result, RegisterResult::InvalidCredentials);
        assert!(identity.seen().is_empty());
    }

    #[tokio::test]
    async fn when_credentials_are_present_then_trimmed_values_reach_provider() {
        let identity = identity();

        let result = login(&identity, "  pilot@example.com ", " hunter2 ").await;

        assert_eq!(result, LoginResult::Ok(AccountId::new("acc-1")));
        assert_eq!(
            identity.seen(),
            vec![("pilot@example.com".to_string(), "hunter2".to_string())]
        );
    }

    #[tokio::test]
    async fn when_provider_is_unavailable_then_result_is_passed_through() {
        let identity = ScriptedIdentity::new(
            LoginResult::StoreUnavailable,
            RegisterResult::StoreUnavailable,
        );

        assert_eq!(
            login(&identity, "a@b.c", "pw").await,
            LoginResult::StoreUnavailable
        );
        assert_eq!(
            register(&identity, "a@b.c", "pw").await,
            RegisterResult::StoreUnavailable
        );
    }
}
