use crate::domain::{IdentityProvider, ScoreArchive};
use crate::use_cases::SessionSettings;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    // Where finished rounds are stored and best scores come from.
    pub archive: Arc<dyn ScoreArchive>,
    // Account login and registration.
    pub identity: Arc<dyn IdentityProvider>,
    // Template for each connection's session; the seed is replaced per connection.
    pub session_settings: SessionSettings,
}
