use serde::{Deserialize, Serialize};

/// Raw person record as returned by the contacts service. Every field is
/// optional on the wire; normalization into a [`crate::model::Contact`]
/// happens in the contact service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonResource {
    pub resource_name: String,
    pub names: Vec<NameField>,
    pub birthdays: Vec<BirthdayField>,
    pub memberships: Vec<Membership>,
    pub email_addresses: Vec<ValueField>,
    pub phone_numbers: Vec<ValueField>,
    pub addresses: Vec<AddressField>,
    pub biographies: Vec<ValueField>,
}

impl PersonResource {
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map(|n| n.display_name.as_str())
            .unwrap_or("")
    }

    /// Group ids from contact-group memberships, in record order.
    pub fn group_ids(&self) -> Vec<&str> {
        self.memberships
            .iter()
            .filter_map(|m| m.contact_group_membership.as_ref())
            .map(|g| g.contact_group_id.as_str())
            .collect()
    }

    pub fn primary_email(&self) -> &str {
        self.email_addresses
            .first()
            .map(|v| v.value.as_str())
            .unwrap_or("")
    }

    pub fn primary_phone(&self) -> &str {
        self.phone_numbers
            .first()
            .map(|v| v.value.as_str())
            .unwrap_or("")
    }

    /// All address cities joined with ", ".
    pub fn cities(&self) -> String {
        let cities: Vec<&str> = self
            .addresses
            .iter()
            .filter_map(|a| a.city.as_deref())
            .filter(|c| !c.is_empty())
            .collect();
        cities.join(", ")
    }

    /// All biography notes joined with ". ".
    pub fn notes(&self) -> String {
        let notes: Vec<&str> = self
            .biographies
            .iter()
            .map(|v| v.value.as_str())
            .filter(|v| !v.is_empty())
            .collect();
        notes.join(". ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NameField {
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BirthdayField {
    pub date: Option<DateParts>,
}

/// Calendar date with individually optional parts. The service omits the
/// year when the user never entered one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateParts {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Membership {
    pub contact_group_membership: Option<GroupMembership>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupMembership {
    pub contact_group_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueField {
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressField {
    pub city: Option<String>,
}

/// One page of the connections listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionsPage {
    pub connections: Vec<PersonResource>,
    pub next_page_token: Option<String>,
}

impl ConnectionsPage {
    /// The continuation token, with the empty string treated as absent.
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// A contact group as returned by the groups endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactGroup {
    pub resource_name: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactGroupList {
    pub contact_groups: Vec<ContactGroup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchGetResponse {
    pub responses: Vec<GroupResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupResponse {
    pub contact_group: Option<ContactGroup>,
}
