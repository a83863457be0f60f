use serde::{Deserialize, Serialize};

/// Group ids the contacts service manages itself. They carry no
/// user-visible name and never resolve.
pub const RESERVED_LABEL_IDS: [&str; 2] = ["myContacts", "starred"];

/// A named contact group, identified by an opaque server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
}

impl Label {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn is_reserved_id(id: &str) -> bool {
        let bare = id.strip_prefix("contactGroups/").unwrap_or(id);
        RESERVED_LABEL_IDS.contains(&bare)
    }

    /// Membership records sometimes carry the bare group id, group listings
    /// the `contactGroups/`-prefixed resource name. Both refer to this label.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id == id || self.id == format!("contactGroups/{}", id)
    }
}
