use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Result, anyhow};
use murmur_types::models::{Account, Message, NewAccount, NewMessage};

use crate::store::{AccountStore, MessageStore};

/// A thread-safe in-memory store for accounts and messages.
///
/// Ids start at 1 and are never reused, matching the SQLite tables.
/// Iteration follows id order.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    accounts: BTreeMap<i64, Account>,
    messages: BTreeMap<i64, Message>,
    last_account_id: i64,
    last_message_id: i64,
}

impl InMemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.inner.read().map_err(|e| anyhow!("Store lock poisoned: {}", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.inner.write().map_err(|e| anyhow!("Store lock poisoned: {}", e))
    }
}

impl AccountStore for InMemoryStore {
    fn save(&self, account: NewAccount) -> Result<Account> {
        let mut tables = self.write()?;
        tables.last_account_id += 1;

        let account = Account {
            account_id: tables.last_account_id,
            username: account.username,
            password: account.password,
        };
        tables.accounts.insert(account.account_id, account.clone());
        Ok(account)
    }

    fn find_by_id(&self, account_id: i64) -> Result<Option<Account>> {
        Ok(self.read()?.accounts.get(&account_id).cloned())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        Ok(self
            .read()?
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }
}

impl MessageStore for InMemoryStore {
    fn save(&self, message: NewMessage) -> Result<Message> {
        let mut tables = self.write()?;
        tables.last_message_id += 1;

        let message = Message {
            message_id: tables.last_message_id,
            posted_by: message.posted_by,
            message_text: message.message_text,
            time_posted_epoch: message.time_posted_epoch,
        };
        tables.messages.insert(message.message_id, message.clone());
        Ok(message)
    }

    fn replace(&self, message: &Message) -> Result<Message> {
        let mut tables = self.write()?;
        tables.last_message_id = tables.last_message_id.max(message.message_id);
        tables.messages.insert(message.message_id, message.clone());
        Ok(message.clone())
    }

    fn find_by_id(&self, message_id: i64) -> Result<Option<Message>> {
        Ok(self.read()?.messages.get(&message_id).cloned())
    }

    fn find_by_posted_by(&self, account_id: i64) -> Result<Vec<Message>> {
        Ok(self
            .read()?
            .messages
            .values()
            .filter(|m| m.posted_by == account_id)
            .cloned()
            .collect())
    }

    fn delete_by_id(&self, message_id: i64) -> Result<bool> {
        Ok(self.write()?.messages.remove(&message_id).is_some())
    }

    fn find_all(&self) -> Result<Vec<Message>> {
        Ok(self.read()?.messages.values().cloned().collect())
    }
}
