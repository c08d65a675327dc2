use rusqlite::{params, Connection};

use crate::error::AbookResult;
use crate::model::{Contact, Id, PhoneNumber};

pub fn insert(
    conn: &Connection,
    contact_id: Id<Contact>,
    phone: &str,
) -> AbookResult<Id<PhoneNumber>> {
    conn.execute(
        "INSERT INTO phone_numbers (contact_id, phone) VALUES (?1, ?2)",
        params![contact_id.value, phone],
    )?;
    Ok(Id::new(conn.last_insert_rowid()))
}

pub fn find_by_contact(conn: &Connection, contact_id: Id<Contact>) -> AbookResult<Vec<PhoneNumber>> {
    let mut stmt = conn.prepare(
        "SELECT id, contact_id, phone FROM phone_numbers WHERE contact_id = ?1 ORDER BY id",
    )?;

    let phones = stmt
        .query_map(params![contact_id.value], |row| {
            Ok(PhoneNumber {
                id: Id::new(row.get(0)?),
                contact_id: Id::new(row.get(1)?),
                phone: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(phones)
}

pub fn delete_by_contact(conn: &Connection, contact_id: Id<Contact>) -> AbookResult<()> {
    conn.execute(
        "DELETE FROM phone_numbers WHERE contact_id = ?1",
        params![contact_id.value],
    )?;
    Ok(())
}

/// Move every phone row owned by `from` to `to`. Row ids are untouched; only
/// the owning-contact foreign key changes.
pub fn reassign(conn: &Connection, from: Id<Contact>, to: Id<Contact>) -> AbookResult<()> {
    conn.execute(
        "UPDATE phone_numbers SET contact_id = ?1 WHERE contact_id = ?2",
        params![to.value, from.value],
    )?;
    Ok(())
}

pub fn count(conn: &Connection) -> AbookResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM phone_numbers", [], |row| row.get(0))?;
    Ok(n)
}
