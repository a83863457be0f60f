use chrono::Local;
use log::info;

use crate::api::ContactsApi;
use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{ReportError, ReportResult};
use crate::model::{Contact, ContactField};
use crate::queries::{contact_queries, duplicate_queries, stats_queries};
use crate::report::{builders, dispatch, Report};
use crate::services::{ContactService, FetchPolicy, LabelDirectory};
use crate::validation;

const DEFAULT_BIRTHDAY_WINDOW_DAYS: i64 = 7;

/// Everything a report command needs, constructed per invocation.
pub struct ReportContext<'a> {
    pub api: &'a dyn ContactsApi,
    pub labels: &'a LabelDirectory,
    pub config: &'a Config,
    pub cache: Option<&'a TtlCache<'a>>,
    pub dry_run: bool,
}

impl ReportContext<'_> {
    fn fetch(&self, filter: &[String]) -> ReportResult<Vec<Contact>> {
        let service =
            ContactService::new(self.api, self.labels, FetchPolicy::from_config(self.config));
        service.fetch_contacts(filter, self.cache)
    }

    fn deliver(&self, report: Report) -> ReportResult<()> {
        if self.dry_run {
            println!("Subject: {}", report.subject);
            println!();
            println!("{}", report.text_body);
            Ok(())
        } else {
            dispatch::send_report(self.api, self.config, &report)
        }
    }
}

pub fn unlabeled(ctx: &ReportContext) -> ReportResult<()> {
    let contacts = ctx.fetch(&[])?;
    let unlabeled = contact_queries::without_labels(&contacts);
    info!("unlabeled contacts report: {} contacts found", unlabeled.len());
    ctx.deliver(builders::unlabeled_report(&unlabeled))
}

pub fn no_birthday(ctx: &ReportContext) -> ReportResult<()> {
    let contacts = ctx.fetch(&[])?;
    let missing = contact_queries::without_birthday(&contacts);
    info!("contacts without birthday report: {} contacts found", missing.len());
    ctx.deliver(builders::no_birthday_report(&missing))
}

pub fn with_label(ctx: &ReportContext, label: &str) -> ReportResult<()> {
    let label = validation::non_blank(label, "label")?;
    if !ctx.labels.contains_name(&label) {
        return Err(ReportError::LabelNotFound { name: label });
    }

    let contacts = ctx.fetch(&[])?;
    let matching = contact_queries::with_label(&contacts, &label);
    info!("contacts with label '{}' report: {} contacts found", label, matching.len());
    ctx.deliver(builders::with_label_report(&label, &matching))
}

pub fn missing_field(ctx: &ReportContext, field: &str) -> ReportResult<()> {
    let field = ContactField::parse(field).ok_or_else(|| {
        ReportError::Other(format!(
            "unknown field: '{}'. Known fields: {}",
            field,
            ContactField::ALL.map(|f| f.name()).join(", ")
        ))
    })?;

    let contacts = ctx.fetch(&[])?;
    let missing = contact_queries::missing_field(&contacts, field);
    info!("contacts without {} report: {} contacts found", field, missing.len());
    ctx.deliver(builders::missing_field_report(field, &missing))
}

pub fn upcoming_birthdays(ctx: &ReportContext, days: &str) -> ReportResult<()> {
    let days = if days.trim().is_empty() {
        DEFAULT_BIRTHDAY_WINDOW_DAYS
    } else {
        let parsed: i64 = days
            .trim()
            .parse()
            .map_err(|_| ReportError::Other(format!("invalid day count: '{}'", days)))?;
        validation::positive(parsed, "days")?
    };

    let today = Local::now().date_naive();
    let contacts = ctx.fetch(&[])?;
    let upcoming = contact_queries::upcoming_birthdays(&contacts, today, days);
    info!("upcoming birthdays report: {} contacts found", upcoming.len());
    ctx.deliver(builders::upcoming_birthdays_report(&upcoming, days, today))
}

pub fn invalid_phones(ctx: &ReportContext) -> ReportResult<()> {
    let contacts = ctx.fetch(&[])?;
    let suspicious = contact_queries::invalid_phones(&contacts);
    info!("invalid phone numbers report: {} contacts found", suspicious.len());
    ctx.deliver(builders::invalid_phones_report(&suspicious))
}

pub fn cities(ctx: &ReportContext) -> ReportResult<()> {
    let contacts = ctx.fetch(&[])?;
    let groups = contact_queries::group_by_city(&contacts);
    info!("contacts by city report: {} cities found", groups.len());
    ctx.deliver(builders::cities_report(&groups))
}

pub fn duplicates(ctx: &ReportContext) -> ReportResult<()> {
    let contacts = ctx.fetch(&[])?;
    let groups = duplicate_queries::duplicate_groups(&contacts);
    info!("duplicate contacts report: {} groups found", groups.len());
    ctx.deliver(builders::duplicates_report(&groups))
}

pub fn stats(ctx: &ReportContext) -> ReportResult<()> {
    let contacts = ctx.fetch(&[])?;
    let stats = stats_queries::stats(&contacts);
    info!("statistics report over {} contacts", stats.total_contacts);
    ctx.deliver(builders::stats_report(&stats))
}

pub fn list_labels(ctx: &ReportContext) -> ReportResult<()> {
    let labels = ctx.labels.labels();
    if labels.is_empty() {
        println!("No labels found.");
    } else {
        println!("Labels ({}):", labels.len());
        for label in labels {
            println!("  {} ({})", label.name, label.id);
        }
    }
    Ok(())
}

pub fn cache_stats(cache: &TtlCache) -> ReportResult<()> {
    let stats = cache.stats()?;
    println!("Cache entries: {}", stats.total_entries);
    println!("  valid:   {}", stats.valid_entries);
    println!("  expired: {}", stats.expired_entries);
    Ok(())
}

pub fn clear_cache(cache: &TtlCache) -> ReportResult<()> {
    cache.clear()?;
    println!("Cache cleared.");
    Ok(())
}
