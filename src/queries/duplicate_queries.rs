use crate::model::Contact;

/// Potential duplicates: one greedy pass where the first not-yet-grouped
/// contact anchors a group of every later ungrouped contact matching it.
/// Groups of one are not reported. Groupings depend on input order; the
/// anchor is always first in its group.
pub fn duplicate_groups(contacts: &[Contact]) -> Vec<Vec<&Contact>> {
    let mut grouped = vec![false; contacts.len()];
    let mut groups = Vec::new();

    for i in 0..contacts.len() {
        if grouped[i] {
            continue;
        }
        grouped[i] = true;

        let anchor = &contacts[i];
        let mut group = vec![anchor];

        for (j, candidate) in contacts.iter().enumerate().skip(i + 1) {
            if grouped[j] {
                continue;
            }
            if is_duplicate(anchor, candidate) {
                grouped[j] = true;
                group.push(candidate);
            }
        }

        if group.len() > 1 {
            groups.push(group);
        }
    }

    groups
}

/// Same name (case-insensitive), or same non-empty email, or same non-empty
/// phone. Empty fields never match each other.
fn is_duplicate(a: &Contact, b: &Contact) -> bool {
    if a.name.to_lowercase() == b.name.to_lowercase() {
        return true;
    }
    if !a.email.is_empty() && a.email == b.email {
        return true;
    }
    !a.phone_number.is_empty() && a.phone_number == b.phone_number
}
