use async_trait::async_trait;

use crate::domain::entities::{Account, GameRecord};

// Port for account and game history storage used by score use cases.
#[async_trait]
pub trait AccountStore: Send + Sync {
    // Returns false when the email is already taken.
    async fn insert(&self, account: Account) -> Result<bool, String>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, String>;
    // Returns false when the account does not exist.
    async fn append_game(&self, account_id: &str, record: GameRecord) -> Result<bool, String>;
    // `None` for an unknown account, an empty list for one without games.
    async fn games(&self, account_id: &str) -> Result<Option<Vec<GameRecord>>, String>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_seconds(&self) -> u64;
}
