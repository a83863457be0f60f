use std::thread;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use log::{info, warn};
use rand::Rng;

use crate::api::types::DateParts;
use crate::api::{ContactsApi, PersonResource};
use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{ReportError, ReportResult};
use crate::model::Contact;
use crate::queries::contact_queries;
use crate::services::LabelDirectory;
use crate::validation;

/// Knobs for the paginated fetch. Tests run with a zero base delay.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    pub page_size: u32,
    pub max_retries: u32,
    pub base_delay: Duration,
    pub cache_ttl: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            page_size: 100,
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            cache_ttl: Duration::from_secs(15 * 60),
        }
    }
}

impl FetchPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            max_retries: config.max_retries,
            cache_ttl: config.contacts_ttl,
            ..Self::default()
        }
    }
}

/// Fetches and normalizes contacts from the remote service. Constructed per
/// invocation; holds no state beyond its collaborators.
pub struct ContactService<'a> {
    api: &'a dyn ContactsApi,
    labels: &'a LabelDirectory,
    policy: FetchPolicy,
}

impl<'a> ContactService<'a> {
    pub fn new(api: &'a dyn ContactsApi, labels: &'a LabelDirectory, policy: FetchPolicy) -> Self {
        Self { api, labels, policy }
    }

    /// All contacts matching the label filter (empty filter = everything).
    /// A cache hit under the filter-derived key short-circuits the walk.
    pub fn fetch_contacts(
        &self,
        filter: &[String],
        cache: Option<&TtlCache>,
    ) -> ReportResult<Vec<Contact>> {
        let filter = validation::label_filter(filter)?;
        let key = cache_key(&filter);

        if let Some(cache) = cache {
            match cache.get(&key) {
                Ok(Some(value)) => match serde_json::from_value::<Vec<Contact>>(value) {
                    Ok(contacts) => {
                        info!("cache hit for '{}' ({} contacts)", key, contacts.len());
                        return Ok(contacts);
                    }
                    Err(e) => warn!("ignoring undecodable cached contacts '{}': {}", key, e),
                },
                Ok(None) => {}
                Err(e) => warn!("cache read failed for '{}': {}", key, e),
            }
        }

        let contacts = self.walk_pages(&filter)?;

        if let Some(cache) = cache {
            match serde_json::to_value(&contacts) {
                Ok(value) => {
                    if let Err(e) = cache.set(&key, value, self.policy.cache_ttl) {
                        warn!("cache write failed for '{}': {}", key, e);
                    }
                }
                Err(e) => warn!("could not serialize contacts for caching: {}", e),
            }
        }

        Ok(contacts)
    }

    fn walk_pages(&self, filter: &[String]) -> ReportResult<Vec<Contact>> {
        if filter.is_empty() {
            info!("fetching all contacts");
        } else {
            info!("fetching contacts with any label of {:?}", filter);
        }

        let mut contacts = Vec::new();
        let mut page_token: Option<String> = None;
        let mut attempt = 0u32;

        loop {
            match self
                .api
                .list_connections(self.policy.page_size, page_token.as_deref())
            {
                Ok(page) => {
                    // Retries are per-page, not cumulative across the walk.
                    attempt = 0;

                    for person in &page.connections {
                        let label_names = self.labels.names_by_ids(person.group_ids());
                        if !contact_queries::matches_label_filter(filter, &label_names) {
                            continue;
                        }
                        match contact_from_resource(person, label_names) {
                            Ok(contact) => contacts.push(contact),
                            Err(e) => {
                                warn!("skipping record '{}': {}", person.resource_name, e)
                            }
                        }
                    }

                    match page.continuation() {
                        Some(token) => page_token = Some(token.to_string()),
                        None => break,
                    }
                }
                Err(e) => {
                    attempt += 1;
                    if attempt >= self.policy.max_retries {
                        return Err(ReportError::RetriesExhausted {
                            attempts: attempt,
                            last_error: e.to_string(),
                        });
                    }
                    let delay = backoff_delay(attempt, self.policy.base_delay);
                    warn!(
                        "page request failed (attempt {}/{}): {}; retrying in {:.1}s",
                        attempt,
                        self.policy.max_retries,
                        e,
                        delay.as_secs_f64()
                    );
                    thread::sleep(delay);
                }
            }
        }

        info!("fetched {} contacts", contacts.len());
        Ok(contacts)
    }
}

/// Exponential backoff with up to one base-delay of jitter.
fn backoff_delay(attempt: u32, base: Duration) -> Duration {
    let exponential = base.saturating_mul(2u32.saturating_pow(attempt));
    let jitter = base.mul_f64(rand::rng().random::<f64>());
    exponential + jitter
}

/// Cache key for a fetch: the sorted label filter under a fixed prefix.
pub fn cache_key(filter: &[String]) -> String {
    let mut sorted = filter.to_vec();
    sorted.sort();
    format!("contacts_{}", sorted.join("_"))
}

/// Normalizes one raw record. Fails only when the record has no usable name;
/// a malformed birthday coerces to absent.
pub fn contact_from_resource(
    person: &PersonResource,
    label_names: Vec<String>,
) -> ReportResult<Contact> {
    let birthday = person
        .birthdays
        .first()
        .and_then(|b| b.date.as_ref())
        .and_then(birthday_from_parts);

    Contact::new(
        person.display_name(),
        birthday,
        label_names,
        person.primary_email(),
        &person.cities(),
        person.primary_phone(),
        extract_instagram_names(&person.notes()),
    )
}

fn birthday_from_parts(parts: &DateParts) -> Option<NaiveDate> {
    let month = parts.month?;
    let day = parts.day?;
    // A missing year becomes the current-year sentinel.
    let year = parts.year.unwrap_or_else(|| Local::now().year());
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Instagram handles from free-text notes. A note entry starting with "@"
/// may carry one handle or a comma-separated list.
pub fn extract_instagram_names(notes: &str) -> Vec<String> {
    let mut names = Vec::new();
    for entry in notes.split(". ") {
        let Some(rest) = entry.trim().strip_prefix('@') else {
            continue;
        };
        for part in rest.split(',') {
            let handle = part.trim().trim_start_matches('@');
            if !handle.is_empty() {
                names.push(format!("@{}", handle));
            }
        }
    }
    names
}
