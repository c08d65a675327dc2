use rusqlite::{params, Connection};

use crate::error::AbookResult;
use crate::model::{Contact, Email, Id};

pub fn insert(conn: &Connection, contact_id: Id<Contact>, email: &str) -> AbookResult<Id<Email>> {
    conn.execute(
        "INSERT INTO emails (contact_id, email) VALUES (?1, ?2)",
        params![contact_id.value, email],
    )?;
    Ok(Id::new(conn.last_insert_rowid()))
}

pub fn find_by_contact(conn: &Connection, contact_id: Id<Contact>) -> AbookResult<Vec<Email>> {
    let mut stmt =
        conn.prepare("SELECT id, contact_id, email FROM emails WHERE contact_id = ?1 ORDER BY id")?;

    let emails = stmt
        .query_map(params![contact_id.value], |row| {
            Ok(Email {
                id: Id::new(row.get(0)?),
                contact_id: Id::new(row.get(1)?),
                email: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(emails)
}

pub fn delete_by_contact(conn: &Connection, contact_id: Id<Contact>) -> AbookResult<()> {
    conn.execute(
        "DELETE FROM emails WHERE contact_id = ?1",
        params![contact_id.value],
    )?;
    Ok(())
}

/// Move every email row owned by `from` to `to`. Row ids are untouched; only
/// the owning-contact foreign key changes.
pub fn reassign(conn: &Connection, from: Id<Contact>, to: Id<Contact>) -> AbookResult<()> {
    conn.execute(
        "UPDATE emails SET contact_id = ?1 WHERE contact_id = ?2",
        params![to.value, from.value],
    )?;
    Ok(())
}

pub fn count(conn: &Connection) -> AbookResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM emails", [], |row| row.get(0))?;
    Ok(n)
}
