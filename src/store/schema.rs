use rusqlite::Connection;

use crate::error::ReportResult;

/// Initialize the property store schema. Creates the table if it doesn't exist.
pub fn initialize(conn: &Connection) -> ReportResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS properties (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

/// In-memory store for tests.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
