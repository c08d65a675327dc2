use std::collections::HashMap;

use rusqlite::Connection;

use crate::db::{contact_repo, email_repo, phone_repo};
use crate::error::AbookResult;
use crate::model::{Contact, Id};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub groups_merged: usize,
    pub contacts_removed: usize,
}

/// Collapse contacts sharing an identical name into one surviving contact.
/// The survivor is the group member with the lowest id; every other member's
/// phone and email rows are reassigned to it (row ids preserved) and the
/// member is deleted. The whole batch commits as one transaction.
///
/// Duplicate phone/email values under one contact are left alone; only the
/// owning-contact foreign key changes.
pub fn merge_duplicates(conn: &Connection) -> AbookResult<MergeOutcome> {
    // find_all returns ascending ids, so the first member of each group is
    // the survivor.
    let contacts = contact_repo::find_all(conn)?;
    let mut groups: HashMap<&str, Vec<Id<Contact>>> = HashMap::new();
    for contact in &contacts {
        groups.entry(contact.name.as_str()).or_default().push(contact.id);
    }

    let merges: Vec<(Id<Contact>, Vec<Id<Contact>>)> = groups
        .into_values()
        .filter(|ids| ids.len() > 1)
        .map(|ids| (ids[0], ids[1..].to_vec()))
        .collect();

    let mut outcome = MergeOutcome::default();
    if merges.is_empty() {
        return Ok(outcome);
    }

    let tx = conn.unchecked_transaction()?;

    // Phase one: reassign all child rows across all groups.
    for (survivor, losers) in &merges {
        for loser in losers {
            phone_repo::reassign(&tx, *loser, *survivor)?;
            email_repo::reassign(&tx, *loser, *survivor)?;
        }
    }

    // Phase two: delete the merged-away contact rows.
    for (_, losers) in &merges {
        for loser in losers {
            contact_repo::delete(&tx, *loser)?;
        }
        outcome.groups_merged += 1;
        outcome.contacts_removed += losers.len();
    }

    tx.commit()?;
    Ok(outcome)
}
