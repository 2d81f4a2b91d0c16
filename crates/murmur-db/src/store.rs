use anyhow::Result;
use murmur_types::models::{Account, Message, NewAccount, NewMessage};

/// Persistence for accounts. Implemented by [`crate::Database`] and
/// [`crate::InMemoryStore`].
pub trait AccountStore: Send + Sync {
    /// Inserts the account and returns it with its assigned id.
    fn save(&self, account: NewAccount) -> Result<Account>;

    fn find_by_id(&self, account_id: i64) -> Result<Option<Account>>;

    /// Exact, case-sensitive match. Returns the first account if several
    /// share the name.
    fn find_by_username(&self, username: &str) -> Result<Option<Account>>;
}

/// Persistence for messages.
pub trait MessageStore: Send + Sync {
    /// Inserts the message and returns it with its assigned id.
    fn save(&self, message: NewMessage) -> Result<Message>;

    /// Writes every field of an existing record, keyed by `message_id`.
    fn replace(&self, message: &Message) -> Result<Message>;

    fn find_by_id(&self, message_id: i64) -> Result<Option<Message>>;

    /// All messages whose `posted_by` equals `account_id`, in id order.
    fn find_by_posted_by(&self, account_id: i64) -> Result<Vec<Message>>;

    /// Returns whether a message existed under that id.
    fn delete_by_id(&self, message_id: i64) -> Result<bool>;

    /// Every stored message, in id order.
    fn find_all(&self) -> Result<Vec<Message>>;
}
