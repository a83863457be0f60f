use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::model::{Contact, ContactField};
use crate::queries::stats_queries::ContactStats;

const STYLES: &str = "
  .email-container {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    max-width: 600px;
    margin: 0 auto;
    padding: 20px;
    background-color: #ffffff;
    border-radius: 8px;
  }
  .header { text-align: center; margin-bottom: 30px; }
  .title { color: #1a1a1a; font-size: 24px; font-weight: bold; margin: 10px 0; }
  .subtitle { color: #666; font-size: 16px; margin: 10px 0; }
  .section { margin: 20px 0; padding: 15px; background: #f8f9fa; border-radius: 6px; }
  .section-title {
    color: #2c3e50; font-size: 18px; margin-bottom: 15px;
    border-bottom: 2px solid #e9ecef; padding-bottom: 5px;
  }
  .item {
    padding: 10px; margin: 5px 0; border-left: 4px solid #007bff; background: white;
  }
  .contact-info { margin-top: 5px; font-size: 14px; color: #666; }
  .stat-number { font-size: 24px; font-weight: bold; color: #007bff; }
  .stat-label { font-size: 14px; color: #666; }
  .footer {
    margin-top: 30px; padding-top: 20px; border-top: 1px solid #eaeaea;
    text-align: center; font-size: 12px; color: #666;
  }
";

/// Minimal HTML escaping for user-controlled strings.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn wrap_email(content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n\
         <style>{STYLES}</style>\n</head>\n<body>\n\
         <div class=\"email-container\">\n{content}\n</div>\n</body>\n</html>"
    )
}

pub fn header(title: &str, subtitle: &str) -> String {
    let subtitle_html = if subtitle.is_empty() {
        String::new()
    } else {
        format!("<p class=\"subtitle\">{}</p>", escape(subtitle))
    };
    format!(
        "<div class=\"header\"><h1 class=\"title\">{}</h1>{}</div>",
        escape(title),
        subtitle_html
    )
}

pub fn footer() -> String {
    format!(
        "<div class=\"footer\"><p>Generated by contact-reports on {}</p></div>",
        Local::now().format("%d.%m.%Y %H:%M")
    )
}

fn contact_details(contact: &Contact) -> Vec<String> {
    let mut details = Vec::new();
    if !contact.email.is_empty() {
        details.push(format!("Email: {}", escape(&contact.email)));
    }
    if !contact.phone_number.is_empty() {
        details.push(format!("Phone: {}", escape(&contact.phone_number)));
    }
    if !contact.city.is_empty() {
        details.push(format!("City: {}", escape(&contact.city)));
    }
    details
}

fn contact_item(contact: &Contact, extra: &[String]) -> String {
    let mut details = extra.to_vec();
    details.extend(contact_details(contact));
    format!(
        "<div class=\"item\"><strong>{}</strong>\
         <div class=\"contact-info\">{}</div></div>",
        escape(&contact.name),
        details.join(" &bull; ")
    )
}

pub fn contact_list(title: &str, contacts: &[&Contact]) -> String {
    if contacts.is_empty() {
        return "<p>No contacts found.</p>".to_string();
    }

    let items: String = contacts.iter().map(|c| contact_item(c, &[])).collect();
    format!(
        "<div class=\"section\"><h2 class=\"section-title\">{} ({})</h2>{}</div>",
        escape(title),
        contacts.len(),
        items
    )
}

pub fn birthday_list(entries: &[(&Contact, NaiveDate)], today: NaiveDate) -> String {
    if entries.is_empty() {
        return "<p>No upcoming birthdays.</p>".to_string();
    }

    let items: String = entries
        .iter()
        .map(|(contact, next)| {
            let mut extra = vec![format!("Birthday: {}", next.format("%d.%m."))];
            if contact.has_known_birth_year_as_of(today) {
                extra.push(format!("Turns {}", contact.age_on(*next)));
            }
            if let Some(link) = contact.whatsapp_link() {
                extra.push(format!("<a href=\"{}\">WhatsApp</a>", link));
            }
            for link in contact.instagram_links() {
                extra.push(format!("<a href=\"{}\">Instagram</a>", link));
            }
            contact_item(contact, &extra)
        })
        .collect();

    format!(
        "<div class=\"section\"><h2 class=\"section-title\">Upcoming Birthdays ({})</h2>{}</div>",
        entries.len(),
        items
    )
}

pub fn duplicate_list(groups: &[Vec<&Contact>]) -> String {
    if groups.is_empty() {
        return "<p>No potential duplicates found.</p>".to_string();
    }

    let sections: String = groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let items: String = group.iter().map(|c| contact_item(c, &[])).collect();
            format!(
                "<div class=\"section\"><h2 class=\"section-title\">Group {} ({} contacts)</h2>{}</div>",
                i + 1,
                group.len(),
                items
            )
        })
        .collect();
    sections
}

pub fn city_list(groups: &BTreeMap<String, Vec<&Contact>>) -> String {
    if groups.is_empty() {
        return "<p>No contacts with a city found.</p>".to_string();
    }

    groups
        .iter()
        .map(|(city, members)| {
            let items: String = members.iter().map(|c| contact_item(c, &[])).collect();
            format!(
                "<div class=\"section\"><h2 class=\"section-title\">{} ({} contacts)</h2>{}</div>",
                escape(city),
                members.len(),
                items
            )
        })
        .collect()
}

pub fn stats_section(stats: &ContactStats) -> String {
    let mut rows = format!(
        "<div class=\"item\"><span class=\"stat-number\">{}</span> \
         <span class=\"stat-label\">total contacts</span></div>",
        stats.total_contacts
    );
    for field in ContactField::ALL {
        rows.push_str(&format!(
            "<div class=\"item\"><strong>{}</strong>\
             <div class=\"contact-info\">{} contacts ({:.1}%)</div></div>",
            field,
            stats.field_count(field),
            stats.field_percentage(field)
        ));
    }

    let mut labels = String::new();
    for (label, count) in &stats.label_distribution {
        labels.push_str(&format!(
            "<div class=\"item\"><strong>{}</strong>\
             <div class=\"contact-info\">{} contacts</div></div>",
            escape(label),
            count
        ));
    }
    if labels.is_empty() {
        labels = "<p>No labels in use.</p>".to_string();
    }

    format!(
        "<div class=\"section\"><h2 class=\"section-title\">Field Coverage</h2>{}</div>\
         <div class=\"section\"><h2 class=\"section-title\">Label Distribution</h2>{}</div>",
        rows, labels
    )
}
