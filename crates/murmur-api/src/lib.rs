pub mod accounts;
pub mod error;
pub mod messages;
pub mod routes;

use std::sync::Arc;

use murmur_db::{AccountStore, MessageStore};

use crate::accounts::AccountWorkflow;
use crate::error::ApiError;
use crate::messages::MessageWorkflow;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: AccountWorkflow,
    pub messages: MessageWorkflow,
}

impl AppStateInner {
    /// Wires both workflows over the given stores.
    pub fn new(accounts: Arc<dyn AccountStore>, messages: Arc<dyn MessageStore>) -> Self {
        Self {
            accounts: AccountWorkflow::new(accounts.clone()),
            messages: MessageWorkflow::new(messages, accounts),
        }
    }
}

/// Run a blocking store call off the async runtime.
pub(crate) async fn run_blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}
