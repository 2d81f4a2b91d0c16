use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

use murmur_db::{AccountStore, MessageStore};
use murmur_types::api::{CreateMessageRequest, UpdateMessageRequest};
use murmur_types::models::{Message, NewMessage, is_valid_message_text};

use crate::error::{ApiError, reject_body};
use crate::{AppState, run_blocking};

/// Message operations. Reads the account store only to check authorship on
/// creation.
#[derive(Clone)]
pub struct MessageWorkflow {
    messages: Arc<dyn MessageStore>,
    accounts: Arc<dyn AccountStore>,
}

impl MessageWorkflow {
    pub fn new(messages: Arc<dyn MessageStore>, accounts: Arc<dyn AccountStore>) -> Self {
        Self { messages, accounts }
    }

    pub fn create(&self, message: NewMessage) -> Result<Message, ApiError> {
        if self.accounts.find_by_id(message.posted_by)?.is_none() {
            return Err(ApiError::InvalidInput);
        }
        if !is_valid_message_text(&message.message_text) {
            return Err(ApiError::InvalidInput);
        }

        let message = self.messages.save(message)?;
        info!("Account {} posted message {}", message.posted_by, message.message_id);
        Ok(message)
    }

    pub fn get_all(&self) -> Result<Vec<Message>, ApiError> {
        Ok(self.messages.find_all()?)
    }

    pub fn get_by_id(&self, message_id: i64) -> Result<Option<Message>, ApiError> {
        Ok(self.messages.find_by_id(message_id)?)
    }

    /// Number of messages removed: 1 if it existed, 0 otherwise.
    pub fn delete_by_id(&self, message_id: i64) -> Result<u32, ApiError> {
        let existed = self.messages.delete_by_id(message_id)?;
        if existed {
            info!("Deleted message {}", message_id);
        }
        Ok(u32::from(existed))
    }

    /// Replaces the text of an existing message, keeping every other field.
    /// Always reports 1 on success.
    pub fn update_text(&self, message_id: i64, text: String) -> Result<u32, ApiError> {
        let mut message = self
            .messages
            .find_by_id(message_id)?
            .ok_or(ApiError::InvalidInput)?;

        if !is_valid_message_text(&text) {
            return Err(ApiError::InvalidInput);
        }

        message.message_text = text;
        self.messages.replace(&message)?;
        info!("Updated message {}", message_id);
        Ok(1)
    }

    /// Messages posted by the account. Does not check that the account exists.
    pub fn list_by_author(&self, account_id: i64) -> Result<Vec<Message>, ApiError> {
        Ok(self.messages.find_by_posted_by(account_id)?)
    }
}

// -- Handlers --

pub async fn create_message(
    State(state): State<AppState>,
    body: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
    let Json(req) = body.map_err(|e| reject_body(e, ApiError::InvalidInput))?;
    let message = run_blocking(move || state.messages.create(req.into())).await?;
    Ok(Json(message))
}

pub async fn get_messages(State(state): State<AppState>) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = run_blocking(move || state.messages.get_all()).await?;
    Ok(Json(messages))
}

/// A missing message is still a 200, with an empty body.
pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let found = run_blocking(move || state.messages.get_by_id(message_id)).await?;

    Ok(match found {
        Some(message) => Json(message).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

/// Body is the deleted count when something was deleted, empty otherwise.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let deleted = run_blocking(move || state.messages.delete_by_id(message_id)).await?;

    Ok(match deleted {
        0 => StatusCode::OK.into_response(),
        n => Json(n).into_response(),
    })
}

pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    body: Result<Json<UpdateMessageRequest>, JsonRejection>,
) -> Result<Json<u32>, ApiError> {
    let Json(req) = body.map_err(|e| reject_body(e, ApiError::InvalidInput))?;
    let updated =
        run_blocking(move || state.messages.update_text(message_id, req.message_text)).await?;
    Ok(Json(updated))
}

pub async fn get_account_messages(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = run_blocking(move || state.messages.list_by_author(account_id)).await?;
    Ok(Json(messages))
}
