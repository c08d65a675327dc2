use rusqlite::{params, Connection, Row};

use crate::error::AbookResult;
use crate::model::{Contact, Group, Id};

/// Insert a new contact row and return its store-assigned id.
pub fn insert(
    conn: &Connection,
    name: &str,
    address: Option<&str>,
    group: Group,
) -> AbookResult<Id<Contact>> {
    conn.execute(
        "INSERT INTO contacts (name, address, group_name) VALUES (?1, ?2, ?3)",
        params![name, address, group.as_str()],
    )?;
    Ok(Id::new(conn.last_insert_rowid()))
}

pub fn update(conn: &Connection, contact: &Contact) -> AbookResult<()> {
    conn.execute(
        "UPDATE contacts SET name = ?1, address = ?2, group_name = ?3 WHERE id = ?4",
        params![
            contact.name,
            contact.address,
            contact.group.as_str(),
            contact.id.value,
        ],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: Id<Contact>) -> AbookResult<()> {
    conn.execute("DELETE FROM contacts WHERE id = ?1", params![id.value])?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Contact>) -> AbookResult<Option<Contact>> {
    let mut stmt =
        conn.prepare("SELECT id, name, address, group_name FROM contacts WHERE id = ?1")?;

    let result = stmt.query_row(params![id.value], row_to_contact);

    match result {
        Ok(contact) => Ok(Some(contact)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All contact rows, lowest id first.
pub fn find_all(conn: &Connection) -> AbookResult<Vec<Contact>> {
    let mut stmt =
        conn.prepare("SELECT id, name, address, group_name FROM contacts ORDER BY id")?;

    let contacts = stmt
        .query_map([], row_to_contact)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

pub fn count(conn: &Connection) -> AbookResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
    Ok(n)
}

fn row_to_contact(row: &Row) -> rusqlite::Result<Contact> {
    let group_name: String = row.get(3)?;
    Ok(Contact {
        id: Id::new(row.get(0)?),
        name: row.get(1)?,
        address: row.get(2)?,
        group: Group::parse(&group_name).unwrap_or_default(),
    })
}
