use rusqlite::Connection;

/// Creates the notes table, its `updated` trigger and the space index.
///
/// Idempotent: safe to run on every open.
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            space TEXT NOT NULL,
            created TEXT DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated TEXT DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            content TEXT NOT NULL,
            pinned INTEGER DEFAULT 0
        );",
    )?;

    // `updated` never drops below `created`, even for imported notes that
    // carry a creation time later than the wall clock.
    conn.execute_batch(
        "CREATE TRIGGER IF NOT EXISTS notes_refresh_updated
            AFTER UPDATE OF space, content, pinned ON notes
            FOR EACH ROW
            BEGIN
                UPDATE notes
                SET updated = max(
                    COALESCE(OLD.created, ''),
                    strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                )
                WHERE id = OLD.id;
            END;",
    )?;

    conn.execute_batch("CREATE INDEX IF NOT EXISTS notes_space ON notes (space);")?;
    Ok(())
}
