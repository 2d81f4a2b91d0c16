use serde::Deserialize;

use crate::models::{NewAccount, NewMessage};

// -- Accounts --

/// Body of `POST /register` and `POST /login`. Any `accountId` sent by the
/// client is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl From<Credentials> for NewAccount {
    fn from(value: Credentials) -> Self {
        NewAccount {
            username: value.username,
            password: value.password,
        }
    }
}

// -- Messages --

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub posted_by: i64,
    pub message_text: String,
    /// Opaque to validation; may be absent or null.
    #[serde(default)]
    pub time_posted_epoch: Option<i64>,
}

impl From<CreateMessageRequest> for NewMessage {
    fn from(value: CreateMessageRequest) -> Self {
        NewMessage {
            posted_by: value.posted_by,
            message_text: value.message_text,
            time_posted_epoch: value.time_posted_epoch,
        }
    }
}

/// Body of `PATCH /messages/{id}`. Only the text is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageRequest {
    pub message_text: String,
}
