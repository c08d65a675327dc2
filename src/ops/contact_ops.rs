use rusqlite::Connection;

use crate::db::{contact_repo, email_repo, phone_repo};
use crate::error::{AbookError, AbookResult};
use crate::model::{Contact, Group, Id};
use crate::validation::{self, trim_optional};

/// Add a contact together with its phone and email rows. Everything is
/// validated before the first write, so a rejected call persists nothing.
pub fn add_contact(
    conn: &Connection,
    name: &str,
    address: Option<&str>,
    group: Group,
    phones: &[String],
    emails: &[String],
) -> AbookResult<Id<Contact>> {
    let valid_name = validation::non_blank(name, "name")?;
    let valid_phones = validated_phones(phones)?;
    let valid_emails = validated_emails(emails)?;

    let tx = conn.unchecked_transaction()?;
    let id = contact_repo::insert(&tx, &valid_name, trim_optional(address).as_deref(), group)?;
    for phone in &valid_phones {
        phone_repo::insert(&tx, id, phone)?;
    }
    for email in &valid_emails {
        email_repo::insert(&tx, id, email)?;
    }
    tx.commit()?;

    Ok(id)
}

/// Replace a contact's scalar fields and its entire phone/email sets.
/// Child replacement is delete-all-then-reinsert, not a diff.
pub fn update_contact(
    conn: &Connection,
    id: Id<Contact>,
    name: &str,
    address: Option<&str>,
    group: Group,
    phones: &[String],
    emails: &[String],
) -> AbookResult<()> {
    ensure_contact_exists(conn, id)?;
    let valid_name = validation::non_blank(name, "name")?;
    let valid_phones = validated_phones(phones)?;
    let valid_emails = validated_emails(emails)?;

    let updated = Contact {
        id,
        name: valid_name,
        address: trim_optional(address),
        group,
    };

    let tx = conn.unchecked_transaction()?;
    contact_repo::update(&tx, &updated)?;
    phone_repo::delete_by_contact(&tx, id)?;
    for phone in &valid_phones {
        phone_repo::insert(&tx, id, phone)?;
    }
    email_repo::delete_by_contact(&tx, id)?;
    for email in &valid_emails {
        email_repo::insert(&tx, id, email)?;
    }
    tx.commit()?;

    Ok(())
}

/// Remove a contact and all of its child rows. Deleting an id that does not
/// exist is an error, not a no-op.
pub fn delete_contact(conn: &Connection, id: Id<Contact>) -> AbookResult<()> {
    ensure_contact_exists(conn, id)?;

    let tx = conn.unchecked_transaction()?;
    phone_repo::delete_by_contact(&tx, id)?;
    email_repo::delete_by_contact(&tx, id)?;
    contact_repo::delete(&tx, id)?;
    tx.commit()?;

    Ok(())
}

fn validated_phones(phones: &[String]) -> AbookResult<Vec<String>> {
    phones
        .iter()
        .map(|p| validation::phone_number(p))
        .collect()
}

fn validated_emails(emails: &[String]) -> AbookResult<Vec<String>> {
    emails
        .iter()
        .map(|e| validation::email_address(e))
        .collect()
}

pub(crate) fn ensure_contact_exists(conn: &Connection, id: Id<Contact>) -> AbookResult<Contact> {
    contact_repo::find_by_id(conn, id)?.ok_or_else(|| AbookError::NotFound {
        entity_type: "Contact".into(),
        id: id.value,
    })
}
