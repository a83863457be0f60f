pub mod report_commands;

use std::path::PathBuf;

use rusqlite::Connection;

use crate::api::HttpContactsApi;
use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{ReportError, ReportResult};
use crate::services::LabelDirectory;
use crate::store::schema;

use report_commands::ReportContext;

/// Parsed command line: one subcommand per invocation.
#[derive(Debug, Clone)]
pub struct CliOptions {
    pub command: String,
    pub args: Vec<String>,
    pub db_path: Option<PathBuf>,
    pub use_cache: bool,
    pub dry_run: bool,
}

pub fn run(opts: &CliOptions) -> ReportResult<()> {
    let mut config = Config::from_env();
    if let Some(path) = &opts.db_path {
        config.db_path = path.clone();
    }

    if let Some(dir) = config.db_path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let conn = Connection::open(&config.db_path)?;
    schema::initialize(&conn)?;
    let cache = TtlCache::new(&conn);

    // Cache maintenance commands don't touch the API at all.
    match opts.command.as_str() {
        "cache-stats" => return report_commands::cache_stats(&cache),
        "clear-cache" => return report_commands::clear_cache(&cache),
        _ => {}
    }

    let api = HttpContactsApi::new(&config);
    let labels = LabelDirectory::fetch(&api)?;
    let ctx = ReportContext {
        api: &api,
        labels: &labels,
        config: &config,
        cache: opts.use_cache.then_some(&cache),
        dry_run: opts.dry_run,
    };

    let arg = opts.args.first().map(|s| s.as_str()).unwrap_or("");
    match opts.command.as_str() {
        "unlabeled" => report_commands::unlabeled(&ctx),
        "no-birthday" => report_commands::no_birthday(&ctx),
        "label" => report_commands::with_label(&ctx, arg),
        "missing" => report_commands::missing_field(&ctx, arg),
        "birthdays" => report_commands::upcoming_birthdays(&ctx, arg),
        "invalid-phones" => report_commands::invalid_phones(&ctx),
        "cities" => report_commands::cities(&ctx),
        "duplicates" => report_commands::duplicates(&ctx),
        "stats" => report_commands::stats(&ctx),
        "labels" => report_commands::list_labels(&ctx),
        other => Err(ReportError::Other(format!(
            "unknown command: {}. Use --help for usage.",
            other
        ))),
    }
}
