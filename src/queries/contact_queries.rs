use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

use crate::model::{Contact, ContactField};

/// Whether a contact's label names pass the filter. An empty filter matches
/// everything; otherwise any intersection counts.
pub fn matches_label_filter(filter: &[String], labels: &[String]) -> bool {
    if filter.is_empty() {
        return true;
    }
    labels
        .iter()
        .any(|label| filter.iter().any(|f| f == label.trim()))
}

pub fn missing_field<'a>(contacts: &'a [Contact], field: ContactField) -> Vec<&'a Contact> {
    contacts.iter().filter(|c| !c.has_field(field)).collect()
}

pub fn without_labels(contacts: &[Contact]) -> Vec<&Contact> {
    missing_field(contacts, ContactField::Labels)
}

pub fn without_birthday(contacts: &[Contact]) -> Vec<&Contact> {
    missing_field(contacts, ContactField::Birthday)
}

/// Contacts carrying `label` exactly (case-sensitive).
pub fn with_label<'a>(contacts: &'a [Contact], label: &str) -> Vec<&'a Contact> {
    contacts
        .iter()
        .filter(|c| c.labels.iter().any(|l| l == label))
        .collect()
}

/// Contacts whose next birthday falls within the inclusive window
/// [today, today + days], paired with the projected date and sorted
/// ascending by it. Ties keep input order.
pub fn upcoming_birthdays(
    contacts: &[Contact],
    today: NaiveDate,
    days: i64,
) -> Vec<(&Contact, NaiveDate)> {
    let window_end = today + Duration::days(days);

    let mut upcoming: Vec<(&Contact, NaiveDate)> = contacts
        .iter()
        .filter_map(|contact| {
            let birthday = contact.birthday?;
            let this_year = project_onto_year(birthday, today.year())?;
            let next = if this_year < today {
                project_onto_year(birthday, today.year() + 1)?
            } else {
                this_year
            };
            (next <= window_end).then_some((contact, next))
        })
        .collect();

    upcoming.sort_by_key(|(_, date)| *date);
    upcoming
}

/// Month/day projected onto `year`. Feb 29 lands on Mar 1 in non-leap years.
fn project_onto_year(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    birthday
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^[+]?[(]?[0-9]{1,4}[)]?[-\s./0-9]*$").expect("static phone pattern")
    })
}

/// Contacts whose phone number fails the permissive pattern. A flag here is
/// a suspicion, not a proof of invalidity.
pub fn invalid_phones(contacts: &[Contact]) -> Vec<&Contact> {
    contacts
        .iter()
        .filter(|c| !c.phone_number.is_empty() && !phone_regex().is_match(&c.phone_number))
        .collect()
}

/// Contacts with a city, bucketed by it.
pub fn group_by_city(contacts: &[Contact]) -> BTreeMap<String, Vec<&Contact>> {
    let mut groups: BTreeMap<String, Vec<&Contact>> = BTreeMap::new();
    for contact in contacts {
        if !contact.city.is_empty() {
            groups.entry(contact.city.clone()).or_default().push(contact);
        }
    }
    groups
}
