use crate::Database;
use crate::store::{AccountStore, MessageStore};
use anyhow::Result;
use murmur_types::models::{Account, Message, NewAccount, NewMessage};
use rusqlite::{Connection, Row};

const MESSAGE_COLUMNS: &str = "message_id, posted_by, message_text, time_posted_epoch";

// -- Accounts --

impl AccountStore for Database {
    fn save(&self, account: NewAccount) -> Result<Account> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO account (username, password) VALUES (?1, ?2)",
                (&account.username, &account.password),
            )?;

            Ok(Account {
                account_id: conn.last_insert_rowid(),
                username: account.username,
                password: account.password,
            })
        })
    }

    fn find_by_id(&self, account_id: i64) -> Result<Option<Account>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT account_id, username, password FROM account WHERE account_id = ?1",
                [account_id],
                account_from_row,
            )
            .optional()
        })
    }

    fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT account_id, username, password FROM account
                 WHERE username = ?1
                 ORDER BY account_id
                 LIMIT 1",
                [username],
                account_from_row,
            )
            .optional()
        })
    }
}

// -- Messages --

impl MessageStore for Database {
    fn save(&self, message: NewMessage) -> Result<Message> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO message (posted_by, message_text, time_posted_epoch) VALUES (?1, ?2, ?3)",
                rusqlite::params![message.posted_by, message.message_text, message.time_posted_epoch],
            )?;

            Ok(Message {
                message_id: conn.last_insert_rowid(),
                posted_by: message.posted_by,
                message_text: message.message_text,
                time_posted_epoch: message.time_posted_epoch,
            })
        })
    }

    fn replace(&self, message: &Message) -> Result<Message> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO message (message_id, posted_by, message_text, time_posted_epoch)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(message_id) DO UPDATE SET
                     posted_by = excluded.posted_by,
                     message_text = excluded.message_text,
                     time_posted_epoch = excluded.time_posted_epoch",
                rusqlite::params![
                    message.message_id,
                    message.posted_by,
                    message.message_text,
                    message.time_posted_epoch
                ],
            )?;
            Ok(message.clone())
        })
    }

    fn find_by_id(&self, message_id: i64) -> Result<Option<Message>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {MESSAGE_COLUMNS} FROM message WHERE message_id = ?1"),
                [message_id],
                message_from_row,
            )
            .optional()
        })
    }

    fn find_by_posted_by(&self, account_id: i64) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!("SELECT {MESSAGE_COLUMNS} FROM message WHERE posted_by = ?1 ORDER BY message_id"),
                [account_id],
            )
        })
    }

    fn delete_by_id(&self, message_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM message WHERE message_id = ?1", [message_id])?;
            Ok(deleted > 0)
        })
    }

    fn find_all(&self) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                &format!("SELECT {MESSAGE_COLUMNS} FROM message ORDER BY message_id"),
                [],
            )
        })
    }
}

fn query_messages<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Message>> {
    let mut stmt = conn.prepare(sql)?;

    let rows = stmt
        .query_map(params, message_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        account_id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        message_id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        time_posted_epoch: row.get(3)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
