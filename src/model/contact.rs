use serde::{Deserialize, Serialize};

use super::ids::Id;

/// The fixed set of contact categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Group {
    #[default]
    Family,
    Friends,
    Coworkers,
    Other,
}

impl Group {
    pub const ALL: [Group; 4] = [Group::Family, Group::Friends, Group::Coworkers, Group::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Family => "family",
            Group::Friends => "friends",
            Group::Coworkers => "coworkers",
            Group::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Group> {
        match s.trim().to_lowercase().as_str() {
            "family" => Some(Group::Family),
            "friends" => Some(Group::Friends),
            "coworkers" => Some(Group::Coworkers),
            "other" => Some(Group::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directory entry's scalar fields. Phone and email rows hang off it by
/// foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Id<Contact>,
    pub name: String,
    pub address: Option<String>,
    pub group: Group,
}

/// A single phone number row owned by a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub id: Id<PhoneNumber>,
    pub contact_id: Id<Contact>,
    pub phone: String,
}

/// A single email row owned by a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: Id<Email>,
    pub contact_id: Id<Contact>,
    pub email: String,
}

/// A contact together with all of its child rows, as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDetails {
    pub contact: Contact,
    pub phones: Vec<PhoneNumber>,
    pub emails: Vec<Email>,
}

/// One row of the listing projection: scalar fields plus the distinct phone
/// and email values. Collapsing duplicate values is a display transform, not
/// a storage rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSummary {
    pub id: Id<Contact>,
    pub name: String,
    pub address: Option<String>,
    pub group: Group,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
}
