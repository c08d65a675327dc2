use abook::db::*;
use abook::error::AbookError;
use abook::model::*;
use abook::ops::*;
use abook::queries::contact_queries;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// ==========================================================================
// ADD CONTACT
// ==========================================================================

#[test]
fn add_contact_roundtrips_through_get() {
    let conn = schema::test_connection();

    let id = contact_ops::add_contact(
        &conn,
        "Alice",
        Some("12 Main St"),
        Group::Friends,
        &strings(&["0912 1234567", "+98 912-1234567"]),
        &strings(&["alice@example.com"]),
    )
    .unwrap();

    let details = contact_queries::get_contact(&conn, id).unwrap();
    assert_eq!(details.contact.name, "Alice");
    assert_eq!(details.contact.address, Some("12 Main St".into()));
    assert_eq!(details.contact.group, Group::Friends);

    let stored_phones: Vec<&str> = details.phones.iter().map(|p| p.phone.as_str()).collect();
    assert_eq!(stored_phones, vec!["0912 1234567", "+98 912-1234567"]);
    let stored_emails: Vec<&str> = details.emails.iter().map(|e| e.email.as_str()).collect();
    assert_eq!(stored_emails, vec!["alice@example.com"]);
}

#[test]
fn add_contact_trims_name_and_blank_address() {
    let conn = schema::test_connection();

    let id = contact_ops::add_contact(&conn, "  Alice  ", Some("   "), Group::default(), &[], &[])
        .unwrap();

    let details = contact_queries::get_contact(&conn, id).unwrap();
    assert_eq!(details.contact.name, "Alice");
    assert_eq!(details.contact.address, None);
}

#[test]
fn add_contact_rejects_blank_name() {
    let conn = schema::test_connection();

    let result = contact_ops::add_contact(&conn, "   ", None, Group::default(), &[], &[]);

    assert!(matches!(result, Err(AbookError::BlankField { .. })));
    assert_eq!(contact_repo::count(&conn).unwrap(), 0);
}

#[test]
fn add_contact_with_bad_phone_persists_nothing() {
    let conn = schema::test_connection();

    let result = contact_ops::add_contact(
        &conn,
        "Alice",
        None,
        Group::default(),
        &strings(&["0912 1234567", "abc"]),
        &strings(&["alice@example.com"]),
    );

    match result {
        Err(AbookError::InvalidPhone { value }) => assert_eq!(value, "abc"),
        other => panic!("expected InvalidPhone, got {:?}", other),
    }
    assert_eq!(contact_repo::count(&conn).unwrap(), 0);
    assert_eq!(phone_repo::count(&conn).unwrap(), 0);
    assert_eq!(email_repo::count(&conn).unwrap(), 0);
}

#[test]
fn add_contact_with_bad_email_persists_nothing() {
    let conn = schema::test_connection();

    let result = contact_ops::add_contact(
        &conn,
        "Alice",
        None,
        Group::default(),
        &[],
        &strings(&["not-an-email"]),
    );

    assert!(matches!(result, Err(AbookError::InvalidEmail { .. })));
    assert_eq!(contact_repo::count(&conn).unwrap(), 0);
    assert_eq!(email_repo::count(&conn).unwrap(), 0);
}

#[test]
fn add_contact_keeps_duplicate_child_values() {
    let conn = schema::test_connection();

    let id = contact_ops::add_contact(
        &conn,
        "Alice",
        None,
        Group::default(),
        &strings(&["0912 1234567", "0912 1234567"]),
        &[],
    )
    .unwrap();

    assert_eq!(phone_repo::find_by_contact(&conn, id).unwrap().len(), 2);
}

// ==========================================================================
// UPDATE CONTACT
// ==========================================================================

#[test]
fn update_contact_replaces_children_fully() {
    let conn = schema::test_connection();

    let id = contact_ops::add_contact(
        &conn,
        "Alice",
        None,
        Group::Family,
        &strings(&["0912 1234567"]),
        &strings(&["old@example.com"]),
    )
    .unwrap();

    contact_ops::update_contact(
        &conn,
        id,
        "Alice Smith",
        Some("New Town"),
        Group::Coworkers,
        &strings(&["0935 7654321"]),
        &strings(&["new@example.com", "work@example.com"]),
    )
    .unwrap();

    let details = contact_queries::get_contact(&conn, id).unwrap();
    assert_eq!(details.contact.name, "Alice Smith");
    assert_eq!(details.contact.group, Group::Coworkers);

    let stored_phones: Vec<&str> = details.phones.iter().map(|p| p.phone.as_str()).collect();
    assert_eq!(stored_phones, vec!["0935 7654321"]);
    let stored_emails: Vec<&str> = details.emails.iter().map(|e| e.email.as_str()).collect();
    assert_eq!(stored_emails, vec!["new@example.com", "work@example.com"]);
}

#[test]
fn update_contact_missing_id_is_not_found() {
    let conn = schema::test_connection();

    let result =
        contact_ops::update_contact(&conn, Id::new(42), "Ghost", None, Group::default(), &[], &[]);

    match result {
        Err(AbookError::NotFound { id, .. }) => assert_eq!(id, 42),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn update_contact_validation_failure_leaves_state_untouched() {
    let conn = schema::test_connection();

    let id = contact_ops::add_contact(
        &conn,
        "Alice",
        Some("12 Main St"),
        Group::Family,
        &strings(&["0912 1234567"]),
        &[],
    )
    .unwrap();

    let result = contact_ops::update_contact(
        &conn,
        id,
        "Alice",
        None,
        Group::Other,
        &strings(&["bad phone!"]),
        &[],
    );
    assert!(matches!(result, Err(AbookError::InvalidPhone { .. })));

    let details = contact_queries::get_contact(&conn, id).unwrap();
    assert_eq!(details.contact.address, Some("12 Main St".into()));
    assert_eq!(details.contact.group, Group::Family);
    assert_eq!(details.phones.len(), 1);
    assert_eq!(details.phones[0].phone, "0912 1234567");
}

// ==========================================================================
// DELETE CONTACT
// ==========================================================================

#[test]
fn delete_contact_removes_all_child_rows() {
    let conn = schema::test_connection();

    let id = contact_ops::add_contact(
        &conn,
        "Alice",
        None,
        Group::default(),
        &strings(&["0912 1234567"]),
        &strings(&["alice@example.com"]),
    )
    .unwrap();

    contact_ops::delete_contact(&conn, id).unwrap();

    assert!(contact_repo::find_by_id(&conn, id).unwrap().is_none());
    assert!(phone_repo::find_by_contact(&conn, id).unwrap().is_empty());
    assert!(email_repo::find_by_contact(&conn, id).unwrap().is_empty());
}

#[test]
fn delete_contact_twice_is_an_error() {
    let conn = schema::test_connection();

    let id = contact_ops::add_contact(&conn, "Alice", None, Group::default(), &[], &[]).unwrap();
    contact_ops::delete_contact(&conn, id).unwrap();

    assert!(matches!(
        contact_ops::delete_contact(&conn, id),
        Err(AbookError::NotFound { .. })
    ));
}

// ==========================================================================
// MERGE DUPLICATES
// ==========================================================================

/// Three contacts named "Ali" at ids 3, 5, 9 with phone sets {111}, {222},
/// {333}: after the merge exactly one "Ali" remains at id 3 owning all three
/// numbers, and ids 5 and 9 are gone. Rows are written through the repos so
/// the ids land exactly where the scenario needs them.
#[test]
fn merge_collapses_same_name_group_into_lowest_id() {
    let conn = schema::test_connection();

    for name in ["Reza", "Sara"] {
        contact_repo::insert(&conn, name, None, Group::Family).unwrap(); // ids 1, 2
    }
    let ali_a = contact_repo::insert(&conn, "Ali", None, Group::Family).unwrap(); // id 3
    contact_repo::insert(&conn, "Nima", None, Group::Family).unwrap(); // id 4
    let ali_b = contact_repo::insert(&conn, "Ali", None, Group::Family).unwrap(); // id 5
    for name in ["Dana", "Omid", "Lena"] {
        contact_repo::insert(&conn, name, None, Group::Family).unwrap(); // ids 6-8
    }
    let ali_c = contact_repo::insert(&conn, "Ali", None, Group::Family).unwrap(); // id 9

    assert_eq!((ali_a.value, ali_b.value, ali_c.value), (3, 5, 9));
    phone_repo::insert(&conn, ali_a, "111").unwrap();
    phone_repo::insert(&conn, ali_b, "222").unwrap();
    phone_repo::insert(&conn, ali_c, "333").unwrap();

    let outcome = merge_ops::merge_duplicates(&conn).unwrap();
    assert_eq!(outcome.groups_merged, 1);
    assert_eq!(outcome.contacts_removed, 2);

    let survivors: Vec<Contact> = contact_repo::find_all(&conn)
        .unwrap()
        .into_iter()
        .filter(|c| c.name == "Ali")
        .collect();
    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].id, ali_a);

    assert!(contact_repo::find_by_id(&conn, ali_b).unwrap().is_none());
    assert!(contact_repo::find_by_id(&conn, ali_c).unwrap().is_none());

    let mut owned: Vec<String> = phone_repo::find_by_contact(&conn, ali_a)
        .unwrap()
        .into_iter()
        .map(|p| p.phone)
        .collect();
    owned.sort();
    assert_eq!(owned, vec!["111", "222", "333"]);

    // Nothing else was touched.
    assert_eq!(contact_repo::count(&conn).unwrap(), 7);
    assert_eq!(phone_repo::count(&conn).unwrap(), 3);
}

#[test]
fn merge_handles_multiple_groups_in_one_pass() {
    let conn = schema::test_connection();

    let ali_a = contact_repo::insert(&conn, "Ali", None, Group::Family).unwrap();
    let bob_a = contact_repo::insert(&conn, "Bob", None, Group::Friends).unwrap();
    let ali_b = contact_repo::insert(&conn, "Ali", None, Group::Other).unwrap();
    let bob_b = contact_repo::insert(&conn, "Bob", None, Group::Friends).unwrap();
    email_repo::insert(&conn, ali_b, "ali@example.com").unwrap();
    email_repo::insert(&conn, bob_b, "bob@example.com").unwrap();

    let outcome = merge_ops::merge_duplicates(&conn).unwrap();
    assert_eq!(outcome.groups_merged, 2);
    assert_eq!(outcome.contacts_removed, 2);

    let names: Vec<String> = contact_repo::find_all(&conn)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Ali", "Bob"]);

    assert_eq!(email_repo::find_by_contact(&conn, ali_a).unwrap().len(), 1);
    assert_eq!(email_repo::find_by_contact(&conn, bob_a).unwrap().len(), 1);
}

#[test]
fn merge_preserves_child_row_ids_and_duplicate_values() {
    let conn = schema::test_connection();

    let first = contact_repo::insert(&conn, "Ali", None, Group::Family).unwrap();
    let second = contact_repo::insert(&conn, "Ali", None, Group::Family).unwrap();
    phone_repo::insert(&conn, first, "0912 1234567").unwrap();
    let moved_id = phone_repo::insert(&conn, second, "0912 1234567").unwrap();

    merge_ops::merge_duplicates(&conn).unwrap();

    // Same value twice under the survivor; merging does not dedupe values.
    let owned = phone_repo::find_by_contact(&conn, first).unwrap();
    assert_eq!(owned.len(), 2);
    assert!(owned.iter().any(|p| p.id == moved_id));
}

#[test]
fn merge_with_no_duplicates_changes_nothing() {
    let conn = schema::test_connection();

    contact_repo::insert(&conn, "Ali", None, Group::Family).unwrap();
    contact_repo::insert(&conn, "Bob", None, Group::Family).unwrap();

    let outcome = merge_ops::merge_duplicates(&conn).unwrap();
    assert_eq!(outcome, merge_ops::MergeOutcome::default());
    assert_eq!(contact_repo::count(&conn).unwrap(), 2);
}

#[test]
fn merge_ignores_case_differences_in_names() {
    let conn = schema::test_connection();

    contact_repo::insert(&conn, "Ali", None, Group::Family).unwrap();
    contact_repo::insert(&conn, "ali", None, Group::Family).unwrap();

    let outcome = merge_ops::merge_duplicates(&conn).unwrap();

    // Grouping is by exact name equality; "Ali" and "ali" stay apart.
    assert_eq!(outcome.groups_merged, 0);
    assert_eq!(contact_repo::count(&conn).unwrap(), 2);
}
