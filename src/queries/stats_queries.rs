use std::collections::BTreeMap;

use crate::model::{Contact, ContactField};

/// Aggregate counts over a contact list, plus the label histogram.
#[derive(Debug, Clone, Default)]
pub struct ContactStats {
    pub total_contacts: usize,
    pub with_birthday: usize,
    pub with_email: usize,
    pub with_phone: usize,
    pub with_city: usize,
    pub with_labels: usize,
    pub with_instagram: usize,
    /// Label name → number of contacts carrying it. BTreeMap keeps report
    /// output deterministic.
    pub label_distribution: BTreeMap<String, usize>,
}

impl ContactStats {
    pub fn field_count(&self, field: ContactField) -> usize {
        match field {
            ContactField::Birthday => self.with_birthday,
            ContactField::Email => self.with_email,
            ContactField::Phone => self.with_phone,
            ContactField::City => self.with_city,
            ContactField::Labels => self.with_labels,
            ContactField::Instagram => self.with_instagram,
        }
    }

    /// Share of contacts carrying the field, in percent. 0.0 for an empty
    /// list.
    pub fn field_percentage(&self, field: ContactField) -> f64 {
        if self.total_contacts == 0 {
            0.0
        } else {
            self.field_count(field) as f64 * 100.0 / self.total_contacts as f64
        }
    }
}

pub fn stats(contacts: &[Contact]) -> ContactStats {
    let mut result = ContactStats {
        total_contacts: contacts.len(),
        ..ContactStats::default()
    };

    for contact in contacts {
        for field in ContactField::ALL {
            if contact.has_field(field) {
                match field {
                    ContactField::Birthday => result.with_birthday += 1,
                    ContactField::Email => result.with_email += 1,
                    ContactField::Phone => result.with_phone += 1,
                    ContactField::City => result.with_city += 1,
                    ContactField::Labels => result.with_labels += 1,
                    ContactField::Instagram => result.with_instagram += 1,
                }
            }
        }
        for label in &contact.labels {
            *result.label_distribution.entry(label.clone()).or_insert(0) += 1;
        }
    }

    result
}
