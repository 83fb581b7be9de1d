//! SQLite persistence for questions and choices.
//!
//! A [`Store`] owns one connection for the lifetime of the process. It is
//! opened once at start-up, handed by reference to the importer and the
//! admin surfaces, and closed explicitly at shutdown.

mod choices;
mod error;
mod questions;
mod schema;

use std::path::Path;

use rusqlite::Connection;
use tracing::info;

pub use error::{StoreError, StoreResult};

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file and bring its schema up to date.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        let store = Self::init(Connection::open(path)?)?;
        info!(path = %path.display(), "opened question store");
        Ok(store)
    }

    /// Open a private in-memory database. Everything is lost on close.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        // Off by default in SQLite; cascade delete depends on it.
        conn.pragma_update(None, "foreign_keys", true)?;
        schema::apply(&conn)?;
        Ok(Self { conn })
    }

    /// Close the connection, reporting anything SQLite could not flush.
    pub fn close(self) -> StoreResult<()> {
        self.conn
            .close()
            .map_err(|(_, err)| StoreError::Close(err))?;
        info!("closed question store");
        Ok(())
    }

    /// Run `f` inside a single transaction.
    ///
    /// Commits when `f` returns `Ok`. On `Err` the transaction is dropped
    /// uncommitted, which rolls back every write `f` made.
    pub fn atomic<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Self) -> Result<T, E>,
        E: From<StoreError>,
    {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(StoreError::from)?;
        let value = f(self)?;
        tx.commit().map_err(StoreError::from)?;
        Ok(value)
    }
}

/// Reject empty or whitespace-only text for a required field.
fn require_text<'a>(field: &'static str, text: &'a str) -> StoreResult<&'a str> {
    if text.trim().is_empty() {
        return Err(StoreError::EmptyText { field });
    }
    Ok(text)
}
