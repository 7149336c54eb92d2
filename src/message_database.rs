use chrono::{DateTime, Local};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

pub const WELCOME_TEXT: &str = "Benvindo ao ZapZap!!!";
pub const SERVICE_AUTHOR: &str = "ZapZap";

const DATE_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

/// One stored message. Field names on disk and on the wire are fixed by the
/// `mensagens.json` file format; lowercase keys are accepted on input, and
/// missing or `null` fields read as zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    #[serde(rename = "Id", alias = "id", deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(rename = "Texto", alias = "texto", deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(rename = "Data", alias = "data", deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(rename = "Hora", alias = "hora", deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(rename = "Autor", alias = "autor", deserialize_with = "null_as_default")]
    pub author: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Message {
    pub fn new(id: i64, text: String, author: String, now: &DateTime<Local>) -> Message {
        Message {
            id,
            text,
            date: now.format(DATE_FORMAT).to_string(),
            time: now.format(TIME_FORMAT).to_string(),
            author,
        }
    }

    /// The message a fresh store starts with.
    pub fn seed(now: &DateTime<Local>) -> Message {
        Message::new(1, WELCOME_TEXT.to_string(), SERVICE_AUTHOR.to_string(), now)
    }
}

/// Ordered log, oldest first.
pub type Messages = Vec<Message>;

/// Body of a POST. Only the text and author are taken from the client; id,
/// date and time are assigned by the server.
#[derive(Debug, Default, PartialEq, Eq)]
#[derive(Deserialize)]
#[serde(default)]
pub struct NewMessage {
    #[serde(rename = "Texto", alias = "texto", deserialize_with = "null_as_default")]
    text: String,
    #[serde(rename = "Autor", alias = "autor", deserialize_with = "null_as_default")]
    author: String,
}

impl NewMessage {
    /// Accepts a JSON object, or `null` for an empty message. Anything else
    /// is a decode error.
    pub fn from_json(body: &[u8]) -> Result<NewMessage> {
        let value: serde_json::Value = serde_json::from_slice(body).map_err(Error::Decode)?;
        if value.is_null() {
            return Ok(NewMessage::default());
        }
        if !value.is_object() {
            return Err(Error::Decode(serde::de::Error::custom(
                "expected a JSON object",
            )));
        }
        serde_json::from_value(value).map_err(Error::Decode)
    }

    pub fn into_message(self, id: i64, now: &DateTime<Local>) -> Message {
        Message::new(id, self.text, self.author, now)
    }
}
