use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

/// A normalized contact, built once from API data. A contact always has a
/// non-empty name; everything else may be absent.
///
/// A birthday whose year equals the current year is the "year unknown"
/// sentinel: the service reports such birthdays without a year and the
/// fetch fills in the current one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub birthday: Option<NaiveDate>,
    pub labels: Vec<String>,
    pub email: String,
    pub city: String,
    pub phone_number: String,
    pub instagram_names: Vec<String>,
}

impl Contact {
    pub fn new(
        name: &str,
        birthday: Option<NaiveDate>,
        labels: Vec<String>,
        email: &str,
        city: &str,
        phone_number: &str,
        instagram_names: Vec<String>,
    ) -> ReportResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ReportError::NameRequired);
        }

        let instagram_names = instagram_names
            .into_iter()
            .filter_map(|n| {
                let n = n.trim().to_string();
                if n.is_empty() || n == "@" {
                    None
                } else if n.starts_with('@') {
                    Some(n)
                } else {
                    Some(format!("@{}", n))
                }
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            birthday,
            labels,
            email: email.trim().to_string(),
            city: city.trim().to_string(),
            phone_number: phone_number.trim().to_string(),
            instagram_names,
        })
    }

    /// Birthday as "dd.mm." (no year), or empty when absent.
    pub fn birthday_short_format(&self) -> String {
        match self.birthday {
            Some(date) => date.format("%d.%m.").to_string(),
            None => String::new(),
        }
    }

    /// Birthday as "dd.mm.yyyy", falling back to the short format when the
    /// birth year is unknown. Empty when absent.
    pub fn birthday_long_format_as_of(&self, today: NaiveDate) -> String {
        match self.birthday {
            Some(date) if date.year() == today.year() => self.birthday_short_format(),
            Some(date) => date.format("%d.%m.%Y").to_string(),
            None => String::new(),
        }
    }

    pub fn birthday_long_format(&self) -> String {
        self.birthday_long_format_as_of(Local::now().date_naive())
    }

    /// Whether the birth year is real rather than the current-year sentinel.
    pub fn has_known_birth_year_as_of(&self, today: NaiveDate) -> bool {
        match self.birthday {
            Some(date) => date.year() != today.year(),
            None => false,
        }
    }

    pub fn has_known_birth_year(&self) -> bool {
        self.has_known_birth_year_as_of(Local::now().date_naive())
    }

    /// Age in whole years as of `today`. 0 when the birthday or the birth
    /// year is unknown.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let Some(birthday) = self.birthday else {
            return 0;
        };
        if !self.has_known_birth_year_as_of(today) {
            return 0;
        }

        let mut age = today.year() - birthday.year();
        if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
            age -= 1;
        }
        age.max(0) as u32
    }

    pub fn age(&self) -> u32 {
        self.age_on(Local::now().date_naive())
    }

    /// WhatsApp chat link from the digits of the phone number.
    pub fn whatsapp_link(&self) -> Option<String> {
        let digits: String = self
            .phone_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            None
        } else {
            Some(format!("https://wa.me/{}", digits))
        }
    }

    /// Profile link for one of this contact's Instagram handles.
    pub fn instagram_link(username: &str) -> String {
        format!(
            "https://www.instagram.com/{}/",
            username.strip_prefix('@').unwrap_or(username)
        )
    }

    pub fn instagram_links(&self) -> Vec<String> {
        self.instagram_names
            .iter()
            .map(|n| Self::instagram_link(n))
            .collect()
    }

    pub fn has_field(&self, field: ContactField) -> bool {
        match field {
            ContactField::Birthday => self.birthday.is_some(),
            ContactField::Email => !self.email.is_empty(),
            ContactField::City => !self.city.is_empty(),
            ContactField::Phone => !self.phone_number.is_empty(),
            ContactField::Labels => !self.labels.is_empty(),
            ContactField::Instagram => !self.instagram_names.is_empty(),
        }
    }
}

/// An optional contact field, for the missing-field reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Birthday,
    Email,
    City,
    Phone,
    Labels,
    Instagram,
}

impl ContactField {
    pub const ALL: [ContactField; 6] = [
        ContactField::Birthday,
        ContactField::Email,
        ContactField::City,
        ContactField::Phone,
        ContactField::Labels,
        ContactField::Instagram,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ContactField::Birthday => "birthday",
            ContactField::Email => "email",
            ContactField::City => "city",
            ContactField::Phone => "phone",
            ContactField::Labels => "labels",
            ContactField::Instagram => "instagram",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
