use std::path::PathBuf;

use log::error;

use contact_reports::cli::{self, CliOptions};

fn main() {
    pretty_env_logger::init();

    let mut command: Option<String> = None;
    let mut command_args: Vec<String> = Vec::new();
    let mut db_path: Option<PathBuf> = None;
    let mut use_cache = true;
    let mut dry_run = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                db_path = args.next().map(PathBuf::from);
                if db_path.is_none() {
                    eprintln!("Error: --db requires a path argument");
                    std::process::exit(1);
                }
            }
            "--no-cache" => use_cache = false,
            "--dry-run" => dry_run = true,
            "--help" | "-h" => {
                print_help();
                return;
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Use --help for usage information.");
                std::process::exit(1);
            }
            other => {
                if command.is_none() {
                    command = Some(other.to_string());
                } else {
                    command_args.push(other.to_string());
                }
            }
        }
    }

    let Some(command) = command else {
        print_help();
        std::process::exit(1);
    };

    let opts = CliOptions {
        command,
        args: command_args,
        db_path,
        use_cache,
        dry_run,
    };

    if let Err(e) = cli::run(&opts) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_help() {
    println!("contact-reports - email reports over a remote contact list");
    println!();
    println!("Usage: contact-reports [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("Commands:");
    println!("  unlabeled              Contacts without any labels");
    println!("  no-birthday            Contacts without a birthday");
    println!("  label <name>           Contacts with a specific label");
    println!("  missing <field>        Contacts missing a field (birthday, email,");
    println!("                         city, phone, labels, instagram)");
    println!("  birthdays [days]       Upcoming birthdays (default: 7 days)");
    println!("  invalid-phones         Contacts with suspicious phone numbers");
    println!("  cities                 Contacts grouped by city");
    println!("  duplicates             Potential duplicate contacts");
    println!("  stats                  Contact statistics");
    println!("  labels                 Print the label directory");
    println!("  cache-stats            Print cache statistics");
    println!("  clear-cache            Delete all cached entries");
    println!();
    println!("Options:");
    println!("  --db <PATH>            Property store path (default: .data/contact-reports.db)");
    println!("  --no-cache             Bypass the fetch cache");
    println!("  --dry-run              Print the report instead of emailing it");
    println!("  -h, --help             Show this help");
    println!();
    println!("Environment:");
    println!("  CONTACTS_API_URL, CONTACTS_API_TOKEN, REPORT_MAIL_TO,");
    println!("  REPORT_MAIL_FROM, REPORT_SENDER_NAME, CONTACT_REPORTS_DB");
}
