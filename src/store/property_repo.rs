use rusqlite::{params, Connection, OptionalExtension};

use crate::error::ReportResult;

pub fn get(conn: &Connection, key: &str) -> ReportResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM properties WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

pub fn set(conn: &Connection, key: &str, value: &str) -> ReportResult<()> {
    conn.execute(
        "INSERT INTO properties (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, key: &str) -> ReportResult<()> {
    conn.execute("DELETE FROM properties WHERE key = ?1", params![key])?;
    Ok(())
}

pub fn delete_all(conn: &Connection) -> ReportResult<()> {
    conn.execute("DELETE FROM properties", [])?;
    Ok(())
}

/// All key/value rows, in key order.
pub fn all(conn: &Connection) -> ReportResult<Vec<(String, String)>> {
    let mut stmt = conn.prepare("SELECT key, value FROM properties ORDER BY key")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
