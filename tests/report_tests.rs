use std::cell::RefCell;
use std::path::PathBuf;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use contact_reports::api::{ConnectionsPage, ContactGroup, ContactsApi};
use contact_reports::config::Config;
use contact_reports::error::{ReportError, ReportResult};
use contact_reports::model::Contact;
use contact_reports::queries::{contact_queries, stats_queries};
use contact_reports::report::{builders, dispatch, mime, templates};

fn contact(name: &str) -> Contact {
    Contact::new(name, None, vec![], "", "", "", vec![]).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================================================
// MIME ENVELOPE
// ==========================================================================

#[test]
fn mime_envelope_structure() {
    let message = mime::build_mime(
        "to@example.com",
        "from@example.com",
        "Contact Reports",
        "Hello 🎂",
        "plain text",
        "<p>html</p>",
    );

    assert!(message.starts_with("MIME-Version: 1.0\r\n"));
    assert!(message.contains("To: to@example.com\r\n"));
    assert!(message.contains("From: \"Contact Reports\" <from@example.com>\r\n"));
    assert!(message.contains("Content-Type: multipart/alternative; boundary=boundaryboundary"));
    assert!(message.contains("\r\n--boundaryboundary\r\n"));
    assert!(message.ends_with("--boundaryboundary--"));

    // Plain part stays readable, HTML part is base64.
    assert!(message.contains("plain text"));
    assert!(message.contains(&STANDARD.encode("<p>html</p>")));
    assert!(!message.contains("<p>html</p>"));
}

#[test]
fn subject_uses_encoded_word() {
    let message = mime::build_mime("t@e.com", "f@e.com", "n", "Hällo", "t", "h");
    let expected = format!("Subject: =?UTF-8?B?{}?=", STANDARD.encode("Hällo"));
    assert!(message.contains(&expected));
}

#[test]
fn raw_encoding_is_web_safe() {
    let raw = mime::encode_raw("??>>~~lots of bytes that pad oddly~~<<??");
    assert!(!raw.contains('+'));
    assert!(!raw.contains('/'));
}

// ==========================================================================
// TEMPLATES
// ==========================================================================

#[test]
fn html_escaping() {
    assert_eq!(templates::escape("a < b & c > d"), "a &lt; b &amp; c &gt; d");
}

#[test]
fn contact_list_escapes_names() {
    let c = contact("Alice <script>");
    let html = templates::contact_list("Report", &[&c]);
    assert!(html.contains("Alice &lt;script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn empty_contact_list_says_so() {
    assert!(templates::contact_list("Report", &[]).contains("No contacts found"));
}

// ==========================================================================
// BUILDERS
// ==========================================================================

#[test]
fn unlabeled_report_lists_contacts() {
    let mut a = contact("Alice");
    a.email = "alice@example.com".into();
    let b = contact("Bob");

    let report = builders::unlabeled_report(&[&a, &b]);
    assert_eq!(report.subject, "🏷️ Contacts Without Labels 🏷️");
    assert!(report.text_body.contains("Alice"));
    assert!(report.text_body.contains("Email: alice@example.com"));
    assert!(report.text_body.contains("Bob"));
    assert!(report.html_body.contains("Alice"));
    assert!(report.html_body.contains("(2)"));
}

#[test]
fn with_label_report_names_the_label() {
    let report = builders::with_label_report("friends", &[]);
    assert!(report.subject.contains("\"friends\""));
    assert!(report.text_body.contains("friends"));
}

#[test]
fn birthday_report_shows_age_only_for_known_years() {
    let today = date(2024, 6, 15);
    let mut known = contact("Alice");
    known.birthday = Some(date(1990, 6, 20));
    let mut unknown = contact("Bob");
    unknown.birthday = Some(date(2024, 6, 21));

    let entries = vec![(&known, date(2024, 6, 20)), (&unknown, date(2024, 6, 21))];
    let report = builders::upcoming_birthdays_report(&entries, 7, today);

    assert!(report.subject.contains("Next 7 Days"));
    assert!(report.text_body.contains("Turns: 34"));
    // Bob's block carries a date but no age line.
    let bob_block: &str = report.text_body.split("\n\n").last().unwrap();
    assert!(bob_block.contains("Bob"));
    assert!(!bob_block.contains("Turns"));
}

#[test]
fn stats_report_shows_counts_and_percentages() {
    let mut a = contact("Alice");
    a.email = "a@b.de".into();
    a.labels = vec!["friends".into()];
    let b = contact("Bob");

    let stats = stats_queries::stats(&[a, b]);
    let report = builders::stats_report(&stats);

    assert!(report.text_body.contains("Total Contacts: 2"));
    assert!(report.text_body.contains("With email: 1 (50.0%)"));
    assert!(report.text_body.contains("friends: 1 contacts"));
    assert!(report.html_body.contains("Label Distribution"));
}

#[test]
fn cities_report_sections_per_city() {
    let mut a = contact("Alice");
    a.city = "Berlin".into();
    let mut b = contact("Bob");
    b.city = "Hamburg".into();
    let contacts = [a, b];

    let groups = contact_queries::group_by_city(&contacts);
    let report = builders::cities_report(&groups);

    assert_eq!(report.subject, "🏙️ Contacts By City 🏙️");
    assert!(report.text_body.contains("Berlin (1):"));
    assert!(report.text_body.contains("Hamburg (1):"));
    assert!(report.html_body.contains("Berlin (1 contacts)"));
}

#[test]
fn duplicates_report_numbers_the_groups() {
    let mut a = contact("Alice");
    a.email = "shared@example.com".into();
    let mut b = contact("Bob");
    b.email = "shared@example.com".into();

    let groups = vec![vec![&a, &b]];
    let report = builders::duplicates_report(&groups);
    assert!(report.text_body.contains("Group 1:"));
    assert!(report.text_body.contains("Alice"));
    assert!(report.text_body.contains("Bob"));
}

// ==========================================================================
// DISPATCH
// ==========================================================================

struct MailSink {
    sent: RefCell<Vec<String>>,
}

impl ContactsApi for MailSink {
    fn list_connections(&self, _: u32, _: Option<&str>) -> ReportResult<ConnectionsPage> {
        unreachable!("dispatch never lists connections")
    }

    fn list_groups(&self) -> ReportResult<Vec<ContactGroup>> {
        unreachable!()
    }

    fn batch_get_groups(&self, _: &[String]) -> ReportResult<Vec<ContactGroup>> {
        unreachable!()
    }

    fn create_group(&self, _: &str) -> ReportResult<ContactGroup> {
        unreachable!()
    }

    fn send_raw_message(&self, raw: &str) -> ReportResult<()> {
        self.sent.borrow_mut().push(raw.to_string());
        Ok(())
    }
}

fn test_config() -> Config {
    Config {
        api_base_url: "http://localhost".into(),
        api_token: String::new(),
        mail_to: "me@example.com".into(),
        mail_from: "me@example.com".into(),
        sender_name: "Contact Reports".into(),
        db_path: PathBuf::from(":memory:"),
        page_size: 100,
        max_retries: 3,
        contacts_ttl: Duration::from_secs(900),
    }
}

#[test]
fn send_report_encodes_and_sends() {
    let api = MailSink {
        sent: RefCell::new(Vec::new()),
    };
    let report = builders::unlabeled_report(&[]);

    dispatch::send_report(&api, &test_config(), &report).unwrap();

    let sent = api.sent.borrow();
    assert_eq!(sent.len(), 1);
    // The payload is the web-safe base64 of the MIME message.
    assert!(!sent[0].contains('\r'));
    assert!(!sent[0].contains('+'));
}

#[test]
fn send_report_requires_a_recipient() {
    let api = MailSink {
        sent: RefCell::new(Vec::new()),
    };
    let mut config = test_config();
    config.mail_to = String::new();

    let result = dispatch::send_report(&api, &config, &builders::unlabeled_report(&[]));
    assert!(matches!(result, Err(ReportError::BlankField { .. })));
    assert!(api.sent.borrow().is_empty());
}
