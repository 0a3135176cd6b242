use crate::error::{Result, StoreError};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::str::FromStr;
use zephyr_core::DocumentId;

/// A stored, schema-less JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub collection: String,
    pub body: Value,
    pub created_at: i64,
}

pub struct DocumentsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> DocumentsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Writes `body` as a new document and returns its generated id.
    pub fn insert(&self, now_utc: i64, collection: &str, body: &Value) -> Result<DocumentId> {
        let collection = validate_collection(collection)?;
        if !body.is_object() {
            return Err(StoreError::InvalidDocument);
        }

        let id = DocumentId::generate();
        let encoded = serde_json::to_string(body)?;
        self.conn.execute(
            "INSERT INTO documents (id, collection, body, created_at) VALUES (?1, ?2, ?3, ?4);",
            params![id.to_string(), collection, encoded, now_utc],
        )?;
        Ok(id)
    }

    pub fn get(&self, id: DocumentId) -> Result<Option<Document>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, collection, body, created_at FROM documents WHERE id = ?1;",
                [id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                },
            )
            .optional()?;

        let Some((raw_id, collection, body, created_at)) = row else {
            return Ok(None);
        };
        let id = DocumentId::from_str(&raw_id).map_err(|_| StoreError::InvalidId(raw_id))?;
        Ok(Some(Document {
            id,
            collection,
            body: serde_json::from_str(&body)?,
            created_at,
        }))
    }

    pub fn count(&self, collection: &str) -> Result<i64> {
        let collection = validate_collection(collection)?;
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1;",
            [collection],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn validate_collection(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains('/') {
        return Err(StoreError::InvalidCollection(name.to_string()));
    }
    Ok(trimmed)
}
