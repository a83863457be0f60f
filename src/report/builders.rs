use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::{Contact, ContactField};
use crate::queries::stats_queries::ContactStats;
use crate::report::templates;

/// A rendered report, ready for the MIME envelope.
#[derive(Debug, Clone)]
pub struct Report {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

fn contact_text_block(contact: &Contact) -> String {
    let mut lines = vec![contact.name.clone()];
    if !contact.email.is_empty() {
        lines.push(format!("Email: {}", contact.email));
    }
    if !contact.phone_number.is_empty() {
        lines.push(format!("Phone: {}", contact.phone_number));
    }
    if !contact.city.is_empty() {
        lines.push(format!("City: {}", contact.city));
    }
    lines.join("\n")
}

fn contact_list_text(title: &str, contacts: &[&Contact]) -> String {
    let blocks: Vec<String> = contacts.iter().map(|c| contact_text_block(c)).collect();
    format!("{}\n\n{}", title, blocks.join("\n\n"))
}

fn contact_list_report(subject: &str, title: &str, subtitle: &str, contacts: &[&Contact]) -> Report {
    let content = format!(
        "{}{}{}",
        templates::header(title, subtitle),
        templates::contact_list(title, contacts),
        templates::footer()
    );
    Report {
        subject: subject.to_string(),
        text_body: contact_list_text(title, contacts),
        html_body: templates::wrap_email(&content),
    }
}

pub fn unlabeled_report(contacts: &[&Contact]) -> Report {
    contact_list_report(
        "🏷️ Contacts Without Labels 🏷️",
        "Contacts Without Labels Report",
        "These contacts don't have any labels assigned",
        contacts,
    )
}

pub fn no_birthday_report(contacts: &[&Contact]) -> Report {
    contact_list_report(
        "🎂 Contacts Without Birthday 🎂",
        "Contacts Without Birthday Report",
        "These contacts don't have a birthday set",
        contacts,
    )
}

pub fn with_label_report(label: &str, contacts: &[&Contact]) -> Report {
    contact_list_report(
        &format!("👥 Contacts With Label \"{}\" 👥", label),
        &format!("Contacts With Label \"{}\"", label),
        &format!("These contacts have the label \"{}\" assigned", label),
        contacts,
    )
}

pub fn missing_field_report(field: ContactField, contacts: &[&Contact]) -> Report {
    contact_list_report(
        &format!("🔍 Contacts Without {} 🔍", field),
        &format!("Contacts Without {} Report", field),
        &format!("These contacts don't have a {} set", field),
        contacts,
    )
}

pub fn invalid_phones_report(contacts: &[&Contact]) -> Report {
    contact_list_report(
        "📱 Invalid Phone Numbers Report 📱",
        "Invalid Phone Numbers Report",
        "These contacts have potentially invalid or malformed phone numbers",
        contacts,
    )
}

pub fn upcoming_birthdays_report(
    entries: &[(&Contact, NaiveDate)],
    days: i64,
    today: NaiveDate,
) -> Report {
    let title = "Upcoming Birthdays Report";
    let content = format!(
        "{}{}{}",
        templates::header(title, &format!("Birthdays in the next {} days", days)),
        templates::birthday_list(entries, today),
        templates::footer()
    );

    let blocks: Vec<String> = entries
        .iter()
        .map(|(contact, next)| {
            let mut lines = vec![
                contact.name.clone(),
                format!("Birthday: {}", next.format("%d.%m.")),
            ];
            if contact.has_known_birth_year_as_of(today) {
                lines.push(format!("Turns: {}", contact.age_on(*next)));
            }
            if !contact.email.is_empty() {
                lines.push(format!("Email: {}", contact.email));
            }
            if !contact.phone_number.is_empty() {
                lines.push(format!("Phone: {}", contact.phone_number));
            }
            lines.join("\n")
        })
        .collect();

    Report {
        subject: format!("🎂 Upcoming Birthdays (Next {} Days) 🎂", days),
        text_body: format!(
            "Upcoming Birthdays Report (Next {} Days)\n\n{}",
            days,
            blocks.join("\n\n")
        ),
        html_body: templates::wrap_email(&content),
    }
}

pub fn duplicates_report(groups: &[Vec<&Contact>]) -> Report {
    let title = "Potential Duplicate Contacts Report";
    let content = format!(
        "{}{}{}",
        templates::header(title, "Contacts sharing a name, email address, or phone number"),
        templates::duplicate_list(groups),
        templates::footer()
    );

    let blocks: Vec<String> = groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let members: Vec<String> = group.iter().map(|c| contact_text_block(c)).collect();
            format!("Group {}:\n{}", i + 1, members.join("\n\n"))
        })
        .collect();

    Report {
        subject: "👯 Potential Duplicate Contacts 👯".to_string(),
        text_body: format!("{}\n\n{}", title, blocks.join("\n\n")),
        html_body: templates::wrap_email(&content),
    }
}

pub fn cities_report(groups: &BTreeMap<String, Vec<&Contact>>) -> Report {
    let title = "Contacts By City Report";
    let content = format!(
        "{}{}{}",
        templates::header(title, "Your contacts grouped by their city"),
        templates::city_list(groups),
        templates::footer()
    );

    let blocks: Vec<String> = groups
        .iter()
        .map(|(city, members)| {
            let entries: Vec<String> = members.iter().map(|c| contact_text_block(c)).collect();
            format!("{} ({}):\n{}", city, members.len(), entries.join("\n\n"))
        })
        .collect();

    Report {
        subject: "🏙️ Contacts By City 🏙️".to_string(),
        text_body: format!("{}\n\n{}", title, blocks.join("\n\n")),
        html_body: templates::wrap_email(&content),
    }
}

pub fn stats_report(stats: &ContactStats) -> Report {
    let title = "Contact Statistics Report";
    let content = format!(
        "{}{}{}",
        templates::header(title, "Overview of your contacts database"),
        templates::stats_section(stats),
        templates::footer()
    );

    let mut text = format!("{}\n\nTotal Contacts: {}\n", title, stats.total_contacts);
    for field in ContactField::ALL {
        text.push_str(&format!(
            "With {}: {} ({:.1}%)\n",
            field,
            stats.field_count(field),
            stats.field_percentage(field)
        ));
    }
    text.push_str("\nLabel Distribution:\n");
    for (label, count) in &stats.label_distribution {
        text.push_str(&format!("{}: {} contacts\n", label, count));
    }

    Report {
        subject: "📊 Contact Statistics Report 📊".to_string(),
        text_body: text,
        html_body: templates::wrap_email(&content),
    }
}
