use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::info;

use murmur_db::AccountStore;
use murmur_types::api::Credentials;
use murmur_types::models::{Account, is_blank};

use crate::error::{ApiError, reject_body};
use crate::{AppState, run_blocking};

/// Passwords must be at least this many UTF-16 code units.
pub const MIN_PASSWORD_LEN: usize = 5;

/// Registration and login over an account store.
#[derive(Clone)]
pub struct AccountWorkflow {
    accounts: Arc<dyn AccountStore>,
}

impl AccountWorkflow {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// Creates an account when the username is free, non-blank, and the
    /// password is longer than four UTF-16 code units.
    ///
    /// The username lookup and the insert are separate store calls, so two
    /// concurrent registrations of one name can both succeed.
    pub fn register(&self, candidate: Credentials) -> Result<Account, ApiError> {
        if self.accounts.find_by_username(&candidate.username)?.is_some() {
            return Err(ApiError::DuplicateUsername);
        }

        if is_blank(&candidate.username) || candidate.password.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::InvalidInput);
        }

        let account = self.accounts.save(candidate.into())?;
        info!("Registered account {} ({})", account.account_id, account.username);
        Ok(account)
    }

    /// Returns the stored account when username and password both match
    /// exactly. Unknown names and wrong passwords are not told apart.
    pub fn login(&self, credentials: Credentials) -> Result<Account, ApiError> {
        let account = self
            .accounts
            .find_by_username(&credentials.username)?
            .ok_or(ApiError::Unauthorized)?;

        if account.password != credentials.password {
            return Err(ApiError::Unauthorized);
        }

        Ok(account)
    }
}

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let Json(req) = body.map_err(|e| reject_body(e, ApiError::InvalidInput))?;
    let account = run_blocking(move || state.accounts.register(req)).await?;
    Ok(Json(account))
}

/// Any unreadable body is a failed login.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let Json(req) = body.map_err(|e| reject_body(e, ApiError::Unauthorized))?;
    let account = run_blocking(move || state.accounts.login(req)).await?;
    Ok(Json(account))
}
