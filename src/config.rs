use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://people.googleapis.com";
const DEFAULT_DB_PATH: &str = ".data/contact-reports.db";
const DEFAULT_SENDER_NAME: &str = "Contact Reports";

/// Runtime configuration, read from the environment once and passed
/// explicitly to the services that need it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the contacts/mail API.
    pub api_base_url: String,
    /// Bearer token for the API. Empty means unauthenticated (test servers).
    pub api_token: String,
    /// Recipient of report emails.
    pub mail_to: String,
    /// Sender address of report emails.
    pub mail_from: String,
    /// Display name used in the From header.
    pub sender_name: String,
    /// Path of the SQLite property store backing the cache.
    pub db_path: PathBuf,
    /// Connections page size.
    pub page_size: u32,
    /// Per-page retry ceiling.
    pub max_retries: u32,
    /// TTL for cached contact fetches.
    pub contacts_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let mail_to = env::var("REPORT_MAIL_TO").unwrap_or_default();
        let mail_from = env::var("REPORT_MAIL_FROM").unwrap_or_else(|_| mail_to.clone());
        Self {
            api_base_url: env::var("CONTACTS_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_token: env::var("CONTACTS_API_TOKEN").unwrap_or_default(),
            mail_to,
            mail_from,
            sender_name: env::var("REPORT_SENDER_NAME")
                .unwrap_or_else(|_| DEFAULT_SENDER_NAME.to_string()),
            db_path: PathBuf::from(
                env::var("CONTACT_REPORTS_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
            ),
            page_size: 100,
            max_retries: 3,
            contacts_ttl: Duration::from_secs(15 * 60),
        }
    }
}
