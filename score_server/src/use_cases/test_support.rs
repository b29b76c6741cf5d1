use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::entities::{Account, GameRecord};
use crate::domain::ports::{AccountStore, Clock};

pub(crate) type AccountTable = Arc<Mutex<HashMap<String, Account>>>;

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_seconds(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub insert: bool,
    pub find: bool,
    pub append: bool,
    pub games: bool,
}

// Accounts keyed by account id; email lookups scan.
#[derive(Clone)]
pub(crate) struct RecordingStore {
    accounts: AccountTable,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_account(&self, account_id: &str, email: &str) {
        let account = Account {
            account_id: account_id.to_string(),
            email: email.to_string(),
            password_salt: "salt".to_string(),
            password_digest: crate::use_cases::credentials::password_digest("salt", "pw"),
            created_at: 0,
            games: Vec::new(),
        };
        let mut guard = self.accounts.lock().expect("accounts mutex poisoned");
        guard.insert(account_id.to_string(), account);
    }

    pub(crate) fn get_test_account(&self, account_id: &str) -> Option<Account> {
        let guard = self.accounts.lock().expect("accounts mutex poisoned");
        guard.get(account_id).cloned()
    }
}

#[async_trait]
impl AccountStore for RecordingStore {
    async fn insert(&self, account: Account) -> Result<bool, String> {
        if self.failures.insert {
            return Err("insert failed".to_string());
        }

        let mut guard = self.accounts.lock().expect("accounts mutex poisoned");
        if guard.values().any(|a| a.email == account.email) {
            return Ok(false);
        }
        guard.insert(account.account_id.clone(), account);
        Ok(true)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, String> {
        if self.failures.find {
            return Err("find failed".to_string());
        }

        let guard = self.accounts.lock().expect("accounts mutex poisoned");
        Ok(guard.values().find(|a| a.email == email).cloned())
    }

    async fn append_game(&self, account_id: &str, record: GameRecord) -> Result<bool, String> {
        if self.failures.append {
            return Err("append failed".to_string());
        }

        let mut guard = self.accounts.lock().expect("accounts mutex poisoned");
        match guard.get_mut(account_id) {
            Some(account) => {
                account.games.push(record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn games(&self, account_id: &str) -> Result<Option<Vec<GameRecord>>, String> {
        if self.failures.games {
            return Err("games failed".to_string());
        }

        let guard = self.accounts.lock().expect("accounts mutex poisoned");
        Ok(guard.get(account_id).map(|a| a.games.clone()))
    }
}
