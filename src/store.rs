use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::Local;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::message_database::{Message, Messages};

/// The message log as a single tab-indented JSON array on disk.
///
/// Nothing is cached: every `load` reads the file again, so the file is the
/// only source of truth.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new<P: Into<PathBuf>>(path: P) -> Store {
        Store { path: path.into() }
    }

    /// Reads the log. A missing file is replaced by a fresh log holding only
    /// the welcome message, which is written out before returning.
    pub fn load(&self) -> Result<Messages> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no store file, seeding welcome message");
                let messages = vec![Message::seed(&Local::now())];
                self.save(&messages)?;
                return Ok(messages);
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&data).map_err(Error::Parse)
    }

    /// Overwrites the file with `messages`, creating it (and its directory)
    /// if needed.
    pub fn save(&self, messages: &[Message]) -> Result<()> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
        messages.serialize(&mut ser).map_err(Error::Parse)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, buf)?;
        debug!(path = %self.path.display(), count = messages.len(), "store saved");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    pub(crate) fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("zapzap_store_{}.json", Uuid::new_v4()))
    }

    fn message(id: i64, text: &str) -> Message {
        Message {
            id,
            text: text.to_string(),
            date: "01/02/2023".to_string(),
            time: "10:11:12".to_string(),
            author: "ana".to_string(),
        }
    }

    #[test]
    fn missing_file_is_seeded_and_persisted() {
        let path = temp_path();
        let store = Store::new(&path);

        let messages = store.load().unwrap();
        assert_eq!(messages.len(), 1);
        let seed = &messages[0];
        assert_eq!(seed.id, 1);
        assert_eq!(seed.text, "Benvindo ao ZapZap!!!");
        assert_eq!(seed.author, "ZapZap");
        assert!(NaiveDate::parse_from_str(&seed.date, "%d/%m/%Y").is_ok());
        assert!(NaiveTime::parse_from_str(&seed.time, "%H:%M:%S").is_ok());

        assert!(path.exists());
        assert_eq!(store.load().unwrap(), messages);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_then_load_preserves_order_and_fields() {
        let path = temp_path();
        let store = Store::new(&path);
        let messages = vec![message(3, "c"), message(1, "a"), message(7, "ção")];

        store.save(&messages).unwrap();
        assert_eq!(store.load().unwrap(), messages);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn file_is_tab_indented() {
        let path = temp_path();
        let store = Store::new(&path);
        store.save(&[message(1, "a")]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n\t{\n\t\t\"Id\": 1,\n\t\t\"Texto\": \"a\","));
        assert!(text.ends_with("\n\t}\n]"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = std::env::temp_dir().join(format!("zapzap_dir_{}", Uuid::new_v4()));
        let store = Store::new(dir.join("nested").join("mensagens.json"));

        store.save(&[message(1, "a")]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let path = temp_path();
        fs::write(&path, "{ not a list").unwrap();
        assert!(matches!(Store::new(&path).load(), Err(Error::Parse(_))));

        fs::write(&path, r#"[{"Id":"one"}]"#).unwrap();
        assert!(matches!(Store::new(&path).load(), Err(Error::Parse(_))));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = std::env::temp_dir().join(format!("zapzap_dir_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        assert!(matches!(Store::new(&dir).load(), Err(Error::Io(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
