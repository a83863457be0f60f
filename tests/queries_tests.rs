use chrono::NaiveDate;
use contact_reports::model::{Contact, ContactField};
use contact_reports::queries::{contact_queries, duplicate_queries, stats_queries};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn contact(name: &str) -> Contact {
    Contact::new(name, None, vec![], "", "", "", vec![]).unwrap()
}

fn contact_with_birthday(name: &str, birthday: NaiveDate) -> Contact {
    let mut c = contact(name);
    c.birthday = Some(birthday);
    c
}

// ==========================================================================
// LABEL FILTER
// ==========================================================================

#[test]
fn empty_filter_matches_everything() {
    assert!(contact_queries::matches_label_filter(&[], &[]));
    assert!(contact_queries::matches_label_filter(
        &[],
        &["friends".into()]
    ));
}

#[test]
fn filter_matches_on_intersection() {
    let filter = vec!["friends".to_string(), "work".to_string()];
    assert!(contact_queries::matches_label_filter(
        &filter,
        &["family".into(), "work".into()]
    ));
    assert!(!contact_queries::matches_label_filter(
        &filter,
        &["family".into()]
    ));
    assert!(!contact_queries::matches_label_filter(&filter, &[]));
}

// ==========================================================================
// MISSING FIELDS
// ==========================================================================

#[test]
fn without_labels_finds_unlabeled() {
    let mut labeled = contact("Alice");
    labeled.labels.push("friends".into());
    let contacts = vec![labeled, contact("Bob")];

    let unlabeled = contact_queries::without_labels(&contacts);
    assert_eq!(unlabeled.len(), 1);
    assert_eq!(unlabeled[0].name, "Bob");
}

#[test]
fn without_birthday_finds_missing() {
    let contacts = vec![
        contact_with_birthday("Alice", date(1990, 3, 5)),
        contact("Bob"),
    ];

    let missing = contact_queries::without_birthday(&contacts);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].name, "Bob");
}

#[test]
fn missing_field_is_generic() {
    let mut with_email = contact("Alice");
    with_email.email = "a@b.de".into();
    let contacts = vec![with_email, contact("Bob")];

    let missing = contact_queries::missing_field(&contacts, ContactField::Email);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].name, "Bob");
}

// ==========================================================================
// LABEL SEARCH
// ==========================================================================

#[test]
fn with_label_is_case_sensitive() {
    let mut alice = contact("Alice");
    alice.labels.push("Friends".into());
    let contacts = vec![alice];

    assert_eq!(contact_queries::with_label(&contacts, "Friends").len(), 1);
    assert!(contact_queries::with_label(&contacts, "friends").is_empty());
}

// ==========================================================================
// UPCOMING BIRTHDAYS
// ==========================================================================

#[test]
fn window_boundary_is_inclusive() {
    let today = date(2024, 6, 15);
    let contacts = vec![
        contact_with_birthday("Exactly7", date(1990, 6, 22)),
        contact_with_birthday("Exactly8", date(1990, 6, 23)),
    ];

    let upcoming = contact_queries::upcoming_birthdays(&contacts, today, 7);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].0.name, "Exactly7");
    assert_eq!(upcoming[0].1, date(2024, 6, 22));
}

#[test]
fn birthday_today_is_included() {
    let today = date(2024, 6, 15);
    let contacts = vec![contact_with_birthday("Today", date(1990, 6, 15))];

    let upcoming = contact_queries::upcoming_birthdays(&contacts, today, 7);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].1, today);
}

#[test]
fn passed_birthday_projects_to_next_year() {
    let today = date(2024, 12, 30);
    let contacts = vec![contact_with_birthday("NewYear", date(1990, 1, 2))];

    let upcoming = contact_queries::upcoming_birthdays(&contacts, today, 7);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].1, date(2025, 1, 2));
}

#[test]
fn results_sorted_by_projected_date() {
    let today = date(2024, 6, 15);
    let contacts = vec![
        contact_with_birthday("Later", date(1990, 6, 20)),
        contact_with_birthday("Sooner", date(1990, 6, 17)),
    ];

    let upcoming = contact_queries::upcoming_birthdays(&contacts, today, 7);
    let names: Vec<&str> = upcoming.iter().map(|(c, _)| c.name.as_str()).collect();
    assert_eq!(names, vec!["Sooner", "Later"]);
}

#[test]
fn contacts_without_birthday_are_skipped() {
    let today = date(2024, 6, 15);
    let contacts = vec![contact("NoBirthday")];
    assert!(contact_queries::upcoming_birthdays(&contacts, today, 30).is_empty());
}

#[test]
fn feb_29_projects_to_mar_1_in_non_leap_year() {
    let today = date(2025, 2, 25);
    let contacts = vec![contact_with_birthday("Leapling", date(1992, 2, 29))];

    let upcoming = contact_queries::upcoming_birthdays(&contacts, today, 7);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].1, date(2025, 3, 1));
}

// ==========================================================================
// PHONE NUMBERS
// ==========================================================================

#[test]
fn plausible_phones_are_not_flagged() {
    let mut a = contact("Alice");
    a.phone_number = "+491711234567".into();
    let mut b = contact("Bob");
    b.phone_number = "0171-123 45 67".into();
    let mut c = contact("Carol");
    c.phone_number = "(069) 1234567".into();

    assert!(contact_queries::invalid_phones(&[a, b, c]).is_empty());
}

#[test]
fn malformed_phones_are_flagged() {
    let mut a = contact("Alice");
    a.phone_number = "call me maybe".into();
    let mut b = contact("Bob");
    b.phone_number = "+49-abc-123".into();

    let contacts = [a, b];
    let flagged = contact_queries::invalid_phones(&contacts);
    assert_eq!(flagged.len(), 2);
}

#[test]
fn empty_phone_is_not_flagged() {
    assert!(contact_queries::invalid_phones(&[contact("Alice")]).is_empty());
}

// ==========================================================================
// CITY GROUPING
// ==========================================================================

#[test]
fn contacts_grouped_by_city() {
    let mut a = contact("Alice");
    a.city = "Berlin".into();
    let mut b = contact("Bob");
    b.city = "Berlin".into();
    let mut c = contact("Carol");
    c.city = "Hamburg".into();
    let d = contact("NoCity");

    let contacts = [a, b, c, d];
    let groups = contact_queries::group_by_city(&contacts);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups["Berlin"].len(), 2);
    assert_eq!(groups["Hamburg"].len(), 1);
}

// ==========================================================================
// DUPLICATES
// ==========================================================================

#[test]
fn unique_contacts_produce_no_groups() {
    let mut a = contact("Alice");
    a.email = "alice@example.com".into();
    a.phone_number = "111".into();
    let mut b = contact("Bob");
    b.email = "bob@example.com".into();
    b.phone_number = "222".into();
    let mut c = contact("Carol");
    c.email = "carol@example.com".into();
    c.phone_number = "333".into();

    assert!(duplicate_queries::duplicate_groups(&[a, b, c]).is_empty());
}

#[test]
fn shared_email_groups_despite_different_names() {
    let mut a = contact("Alice");
    a.email = "shared@example.com".into();
    let mut b = contact("Bob");
    b.email = "shared@example.com".into();

    let contacts = [a, b];
    let groups = duplicate_queries::duplicate_groups(&contacts);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn name_match_is_case_insensitive() {
    let contacts = [contact("alice"), contact("ALICE")];
    let groups = duplicate_queries::duplicate_groups(&contacts);
    assert_eq!(groups.len(), 1);
}

#[test]
fn empty_emails_do_not_group() {
    // All emails empty, names distinct: no duplicates.
    let contacts = [contact("Alice"), contact("Bob")];
    let groups = duplicate_queries::duplicate_groups(&contacts);
    assert!(groups.is_empty());
}

#[test]
fn first_seen_contact_anchors_the_group() {
    let mut a = contact("Alice");
    a.email = "shared@example.com".into();
    let mut b = contact("Bob");
    b.email = "shared@example.com".into();
    let mut c = contact("bob");
    c.email = "other@example.com".into();

    // Alice anchors Bob via email; "bob" is then grouped with nobody left
    // to match, so only one group comes back.
    let contacts = [a, b, c];
    let groups = duplicate_queries::duplicate_groups(&contacts);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0][0].name, "Alice");
}

// ==========================================================================
// STATS
// ==========================================================================

#[test]
fn stats_count_fields_and_labels() {
    let mut a = contact("Alice");
    a.email = "a@b.de".into();
    a.labels = vec!["friends".into(), "work".into()];
    let mut b = contact("Bob");
    b.labels = vec!["friends".into()];

    let stats = stats_queries::stats(&[a, b]);
    assert_eq!(stats.total_contacts, 2);
    assert_eq!(stats.with_email, 1);
    assert_eq!(stats.with_labels, 2);
    assert_eq!(stats.field_percentage(ContactField::Email), 50.0);
    assert_eq!(stats.label_distribution["friends"], 2);
    assert_eq!(stats.label_distribution["work"], 1);
}

#[test]
fn stats_on_empty_list_have_zero_percentages() {
    let stats = stats_queries::stats(&[]);
    assert_eq!(stats.total_contacts, 0);
    assert_eq!(stats.field_percentage(ContactField::Email), 0.0);
}
