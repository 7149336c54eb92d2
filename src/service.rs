use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Local;
use tracing::info;

use crate::error::{Error, Result};
use crate::message_database::{Messages, NewMessage};
use crate::store::Store;

/// List and append on top of a [`Store`].
///
/// Each call runs a full load (and for appends, mutate and save) cycle while
/// holding `lock`, so concurrent appends cannot hand out the same id. Calls
/// block on file I/O; async callers run them on the blocking pool.
pub struct Service {
    store: Store,
    lock: Mutex<()>,
}

impl Service {
    pub fn new(store: Store) -> Service {
        Service {
            store,
            lock: Mutex::new(()),
        }
    }

    // The lock guards no data, so a poisoned lock is safe to reuse.
    fn exclusive(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list_messages(&self) -> Result<Messages> {
        let _guard = self.exclusive();
        self.store.load()
    }

    /// Appends `new_message` with the next id and the current local date and
    /// time, then returns the whole updated log.
    pub fn append_message(&self, new_message: NewMessage) -> Result<Messages> {
        let _guard = self.exclusive();
        let mut messages = self.store.load()?;
        let last_id = messages.last().map(|m| m.id).ok_or(Error::EmptyLog)?;
        let next_id = last_id.checked_add(1).ok_or(Error::IdExhausted(last_id))?;

        let message = new_message.into_message(next_id, &Local::now());
        info!(id = message.id, author = %message.author, "message appended");
        messages.push(message);

        self.store.save(&messages)?;
        Ok(messages)
    }
}
