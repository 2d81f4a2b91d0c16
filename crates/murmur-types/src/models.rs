use serde::{Deserialize, Serialize};

/// Longest message body accepted, counted in UTF-16 code units.
pub const MAX_MESSAGE_LEN: usize = 255;

/// A registered user. The password is kept and returned as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: i64,
    pub username: String,
    pub password: String,
}

/// A stored post. `posted_by` refers to an `Account::account_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: i64,
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: Option<i64>,
}

/// An account that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
}

/// A message that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: Option<i64>,
}

/// True when the text is empty or whitespace only.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Message text must be non-blank and at most `MAX_MESSAGE_LEN` UTF-16 code
/// units long, so characters outside the BMP count twice.
pub fn is_valid_message_text(text: &str) -> bool {
    !is_blank(text) && text.encode_utf16().count() <= MAX_MESSAGE_LEN
}
