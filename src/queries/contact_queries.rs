use rusqlite::Connection;

use crate::db::{contact_repo, email_repo, phone_repo};
use crate::error::{AbookError, AbookResult};
use crate::model::{Contact, ContactDetails, ContactSummary, Group, Id};

/// How `search` compares the query against contact names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCase {
    Sensitive,
    Insensitive,
}

/// A contact with all of its stored phone/email rows, or NotFound.
pub fn get_contact(conn: &Connection, id: Id<Contact>) -> AbookResult<ContactDetails> {
    let contact = contact_repo::find_by_id(conn, id)?.ok_or_else(|| AbookError::NotFound {
        entity_type: "Contact".into(),
        id: id.value,
    })?;
    let phones = phone_repo::find_by_contact(conn, id)?;
    let emails = email_repo::find_by_contact(conn, id)?;
    Ok(ContactDetails {
        contact,
        phones,
        emails,
    })
}

/// All contacts with their distinct phone and email values, lowest id first.
/// Repeated values collapse to one here; the stored rows are untouched.
pub fn list_contacts(conn: &Connection) -> AbookResult<Vec<ContactSummary>> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.name, c.address, c.group_name,
                GROUP_CONCAT(DISTINCT p.phone),
                GROUP_CONCAT(DISTINCT e.email)
         FROM contacts c
         LEFT JOIN phone_numbers p ON c.id = p.contact_id
         LEFT JOIN emails e ON c.id = e.contact_id
         GROUP BY c.id
         ORDER BY c.id",
    )?;

    let summaries = stmt
        .query_map([], |row| {
            let group_name: String = row.get(3)?;
            let phones: Option<String> = row.get(4)?;
            let emails: Option<String> = row.get(5)?;
            Ok(ContactSummary {
                id: Id::new(row.get(0)?),
                name: row.get(1)?,
                address: row.get(2)?,
                group: Group::parse(&group_name).unwrap_or_default(),
                phones: split_joined(phones),
                emails: split_joined(emails),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(summaries)
}

/// The listing filtered to contacts whose name contains `query` anywhere.
/// An empty query matches everything. Stateless: recomputed from the store
/// on every call.
pub fn search(
    conn: &Connection,
    query: &str,
    case: MatchCase,
) -> AbookResult<Vec<ContactSummary>> {
    let summaries = list_contacts(conn)?;
    let matches: Vec<ContactSummary> = match case {
        MatchCase::Sensitive => summaries
            .into_iter()
            .filter(|s| s.name.contains(query))
            .collect(),
        MatchCase::Insensitive => {
            let needle = query.to_lowercase();
            summaries
                .into_iter()
                .filter(|s| s.name.to_lowercase().contains(&needle))
                .collect()
        }
    };
    Ok(matches)
}

/// Split a GROUP_CONCAT column back into values. Phone and email syntax
/// cannot contain the separator, so a plain split is exact.
fn split_joined(joined: Option<String>) -> Vec<String> {
    match joined {
        Some(s) if !s.is_empty() => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}
