pub mod db;
pub mod error;
pub mod migrate;
pub mod paths;
pub mod repo;

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;
use zephyr_core::{DocumentId, RecordSink, SinkError, SubmissionRecord};

/// Collection signups are written to.
pub const USERS_COLLECTION: &str = "users";

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        migrate::run_migrations(&self.conn)
    }

    pub fn schema_version(&self) -> Result<i64> {
        migrate::schema_version(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn documents(&self) -> repo::DocumentsRepo<'_> {
        repo::DocumentsRepo::new(&self.conn)
    }
}

impl RecordSink for Store {
    fn insert_record(
        &self,
        record: &SubmissionRecord,
    ) -> std::result::Result<DocumentId, SinkError> {
        let body = serde_json::to_value(record)?;
        let id = self
            .documents()
            .insert(record.timestamp.timestamp(), USERS_COLLECTION, &body)?;
        debug!(collection = USERS_COLLECTION, document = %id, "record inserted");
        Ok(id)
    }
}
