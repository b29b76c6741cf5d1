use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

use crate::domain::entities::{Account, GameRecord};
use crate::domain::ports::{AccountStore, Clock};

// Accounts by id, with a secondary index from normalized email to id.
#[derive(Default)]
pub struct AccountTable {
    by_id: HashMap<String, Account>,
    by_email: HashMap<String, String>,
}

// Application state holding account storage.
#[derive(Clone, Default)]
pub struct AppState {
    pub accounts: Arc<Mutex<AccountTable>>,
}

// In-memory account store adapter for the score service.
#[derive(Clone)]
pub struct InMemoryAccountStore {
    pub accounts: Arc<Mutex<AccountTable>>,
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, account: Account) -> Result<bool, String> {
        let mut table = self.accounts.lock().await;
        if table.by_email.contains_key(&account.email) {
            return Ok(false);
        }
        table
            .by_email
            .insert(account.email.clone(), account.account_id.clone());
        table.by_id.insert(account.account_id.clone(), account);
        Ok(true)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, String> {
        let table = self.accounts.lock().await;
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn append_game(&self, account_id: &str, record: GameRecord) -> Result<bool, String> {
        let mut table = self.accounts.lock().await;
        match table.by_id.get_mut(account_id) {
            Some(account) => {
                account.games.push(record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn games(&self, account_id: &str) -> Result<Option<Vec<GameRecord>>, String> {
        let table = self.accounts.lock().await;
        Ok(table.by_id.get(account_id).map(|a| a.games.clone()))
    }
}

// System clock adapter used by score use cases.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}
