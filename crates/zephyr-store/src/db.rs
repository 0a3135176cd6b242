use crate::error::Result;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Full fsync on every commit; a second writer waits up to five seconds.
const PRAGMAS: &[(&str, &str)] = &[("synchronous", "FULL"), ("busy_timeout", "5000")];

pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    if path.exists() {
        owner_only(path)?;
    }
    conn.pragma_update(None, "journal_mode", "WAL")?;
    configure(&conn)?;
    debug!(path = %path.display(), "database opened");
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> Result<()> {
    for (name, value) in PRAGMAS {
        conn.pragma_update(None, name, *value)?;
    }
    Ok(())
}

#[cfg(unix)]
fn owner_only(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn owner_only(_path: &Path) -> Result<()> {
    Ok(())
}
