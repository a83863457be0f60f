use log::info;

use crate::api::ContactsApi;
use crate::config::Config;
use crate::error::ReportResult;
use crate::report::mime;
use crate::report::Report;
use crate::validation;

/// Wraps a rendered report in its MIME envelope and sends it through the
/// mail endpoint.
pub fn send_report(api: &dyn ContactsApi, config: &Config, report: &Report) -> ReportResult<()> {
    let to = validation::non_blank(&config.mail_to, "mail recipient")?;
    let from = validation::non_blank(&config.mail_from, "mail sender")?;

    let message = mime::build_mime(
        &to,
        &from,
        &config.sender_name,
        &report.subject,
        &report.text_body,
        &report.html_body,
    );

    api.send_raw_message(&mime::encode_raw(&message))?;
    info!("sent report '{}' to {}", report.subject, to);
    Ok(())
}
