use crate::error::{Result, StoreError};
use rusqlite::{Connection, OptionalExtension};

const MIGRATIONS: &[(&str, &str)] = &[("001_init.sql", include_str!("../migrations/001_init.sql"))];

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    ensure_schema_table(&tx)?;
    let current = current_version(&tx)?;
    let available = MIGRATIONS.len() as i64;

    if current > available {
        return Err(StoreError::Migration(format!(
            "db version {current} newer than available migrations {available}"
        )));
    }

    for (index, (name, sql)) in MIGRATIONS.iter().enumerate() {
        let version = (index + 1) as i64;
        if current >= version {
            continue;
        }
        tracing::debug!(migration = name, version, "applying migration");
        tx.execute_batch(sql)?;
        set_version(&tx, version)?;
    }

    tx.commit()?;
    Ok(())
}

pub fn schema_version(conn: &Connection) -> Result<i64> {
    let has_table: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'zephyr_schema');",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Ok(0);
    }
    current_version(conn)
}

fn ensure_schema_table(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS zephyr_schema (version INTEGER NOT NULL);")?;

    let existing: Option<i64> = conn
        .query_row("SELECT version FROM zephyr_schema LIMIT 1;", [], |row| {
            row.get(0)
        })
        .optional()?;

    if existing.is_none() {
        conn.execute("INSERT INTO zephyr_schema (version) VALUES (0);", [])?;
    }

    Ok(())
}

fn current_version(conn: &Connection) -> Result<i64> {
    let version: i64 =
        conn.query_row("SELECT version FROM zephyr_schema LIMIT 1;", [], |row| {
            row.get(0)
        })?;
    Ok(version)
}

fn set_version(conn: &Connection, version: i64) -> Result<()> {
    let updated = conn.execute("UPDATE zephyr_schema SET version = ?1;", [version])?;
    if updated != 1 {
        return Err(StoreError::Migration(format!(
            "expected single schema row, updated {updated}"
        )));
    }
    Ok(())
}
