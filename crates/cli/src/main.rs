mod config;
mod error;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use access::{Resolver, Role, Section};
use chrono::{Local, TimeZone};
use clap::{Parser, Subcommand, ValueEnum};
use notify::{Channel, Delivery, Notifier, Notifiers, ReportAction, ReportKind, SharedStore};
use storage::{LogStore, WebhookLog};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use config::Config;
use error::{Error, Result};

const CONFIG_FILE: &str = "crm.toml";
const DATABASE_FILE: &str = "webhooks.db";

#[derive(Parser)]
#[command(name = "crm")]
#[command(about = "Access checks and webhook notifications for the CRM", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a role may access a section
    Check {
        /// Role name (case-insensitive)
        #[arg(short, long)]
        role: Option<String>,
        /// Section name, e.g. leads or finances
        section: String,
    },
    /// Show the permission table
    Permissions {
        /// Show only this role
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Send a webhook for a CRM event
    Notify {
        event: EventArg,
        /// Lead or report ID
        #[arg(long)]
        id: String,
        /// ID of the acting user
        #[arg(long)]
        user: String,
        #[arg(long)]
        old_status: Option<String>,
        #[arg(long)]
        new_status: Option<String>,
    },
    /// Show logged webhooks, newest first
    Logs {
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Filter by event name, e.g. lead.created
        #[arg(short, long)]
        event: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EventArg {
    LeadCreated,
    LeadStatusChanged,
    LeadDeleted,
    SetterReportCreated,
    SetterReportUpdated,
    SetterReportDeleted,
    CloserReportCreated,
    CloserReportUpdated,
    CloserReportDeleted,
}

impl EventArg {
    fn report(self) -> Option<(ReportKind, ReportAction)> {
        match self {
            Self::SetterReportCreated => Some((ReportKind::Setter, ReportAction::Created)),
            Self::SetterReportUpdated => Some((ReportKind::Setter, ReportAction::Updated)),
            Self::SetterReportDeleted => Some((ReportKind::Setter, ReportAction::Deleted)),
            Self::CloserReportCreated => Some((ReportKind::Closer, ReportAction::Created)),
            Self::CloserReportUpdated => Some((ReportKind::Closer, ReportAction::Updated)),
            Self::CloserReportDeleted => Some((ReportKind::Closer, ReportAction::Deleted)),
            Self::LeadCreated | Self::LeadStatusChanged | Self::LeadDeleted => None,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level)))
        .init();
    debug!(config = %cli.config.display(), "configuration loaded");

    let resolver = Resolver::new(config.access.sections);

    match cli.command {
        Commands::Check { role, section } => {
            cmd_check(&resolver, role.as_deref(), &section);
            Ok(())
        }
        Commands::Permissions { role } => {
            cmd_permissions(&resolver, role.as_deref());
            Ok(())
        }
        Commands::Notify {
            event,
            id,
            user,
            old_status,
            new_status,
        } => {
            let statuses = old_status.zip(new_status);
            cmd_notify(&config, event, &id, &user, statuses).await
        }
        Commands::Logs { limit, event } => cmd_logs(&config, limit, event.as_deref()),
    }
}

fn cmd_check(resolver: &Resolver, role: Option<&str>, section: &str) {
    match resolver.check(role, section) {
        access::Decision::Allow => println!("allow"),
        access::Decision::Deny { reason } => println!("deny: {reason}"),
    }
}

fn cmd_permissions(resolver: &Resolver, role: Option<&str>) {
    let sections = resolver.sections().sections();

    if let Some(raw) = role {
        let perms = resolver.resolve_capabilities(Some(raw));
        for section in sections {
            println!("{:<12}  {}", section, mark(perms.get(*section)));
        }
        return;
    }

    print!("{:<12}", "SECTION");
    for role in Role::ALL {
        print!("  {:<8}", role.as_str().to_uppercase());
    }
    println!();
    println!("{}", "-".repeat(12 + Role::ALL.len() * 10));

    for section in sections {
        print!("{:<12}", section.as_str());
        for role in Role::ALL {
            print!("  {:<8}", mark(access_for(resolver, role, *section)));
        }
        println!();
    }
}

fn access_for(resolver: &Resolver, role: Role, section: Section) -> bool {
    resolver.has_access(Some(role.as_str()), section)
}

fn mark(allowed: bool) -> &'static str {
    if allowed { "yes" } else { "-" }
}

async fn cmd_notify(
    config: &Config,
    event: EventArg,
    id: &str,
    user: &str,
    statuses: Option<(String, String)>,
) -> Result<()> {
    let statuses = require_statuses(event, statuses)?;

    let db_path = database_path(config);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store: SharedStore = Arc::new(Mutex::new(LogStore::open(&db_path)?));
    let notifiers = build_notifiers(config, &store)?;

    let delivery = match (event, event.report(), statuses) {
        (_, Some((kind, action)), _) => notifiers.report(kind, action, id, user).await,
        (EventArg::LeadCreated, None, _) => notifiers.lead_created(id, user).await,
        (EventArg::LeadDeleted, None, _) => notifiers.lead_deleted(id, user).await,
        (_, None, Some((old, new))) => notifiers.lead_status_changed(id, &old, &new, user).await,
        (_, None, None) => return Err(Error::MissingStatus),
    };

    println!("{delivery}");
    if let Delivery::Skipped = delivery {
        println!("Set a URL in {CONFIG_FILE} or the matching *_WEBHOOK_URL variable.");
    }
    Ok(())
}

/// Fail early when a status change lacks either status.
fn require_statuses(
    event: EventArg,
    statuses: Option<(String, String)>,
) -> Result<Option<(String, String)>> {
    match (event, statuses) {
        (EventArg::LeadStatusChanged, None) => Err(Error::MissingStatus),
        (_, statuses) => Ok(statuses),
    }
}

fn build_notifiers(config: &Config, store: &SharedStore) -> Result<Notifiers> {
    let build = |channel: Channel| -> Result<Notifier> {
        Ok(Notifier::builder(channel)
            .url(config.webhook_url(channel))
            .timeout(config.timeout())
            .store(store.clone())
            .build()?)
    };

    Ok(Notifiers {
        general: build(Channel::General)?,
        setter_reports: build(Channel::SetterReport)?,
        closer_reports: build(Channel::CloserReport)?,
    })
}

fn cmd_logs(config: &Config, limit: usize, event: Option<&str>) -> Result<()> {
    let store = open_store(&database_path(config))?;
    let logs = store.recent(limit, event)?;

    if logs.is_empty() {
        println!("No webhooks logged.");
        return Ok(());
    }

    println!("{:<20}  {:<24}  {:<12}  PAYLOAD", "SENT", "EVENT", "USER");
    println!("{}", "-".repeat(80));
    for log in logs {
        print_log(&log);
    }

    Ok(())
}

fn print_log(log: &WebhookLog) {
    let sent = Local
        .from_utc_datetime(&log.created_at.naive_utc())
        .format("%Y-%m-%d %H:%M:%S");
    println!(
        "{:<20}  {:<24}  {:<12}  {}",
        sent,
        log.event,
        log.user_id.as_deref().unwrap_or("-"),
        log.payload
    );
}

fn open_store(db_path: &Path) -> Result<LogStore> {
    if !db_path.exists() {
        return Err(Error::DatabaseNotFound {
            path: db_path.to_path_buf(),
        });
    }

    Ok(LogStore::open(db_path)?)
}

fn database_path(config: &Config) -> PathBuf {
    config.webhooks.database.clone().unwrap_or_else(|| {
        dirs_data_dir()
            .unwrap_or_else(|| ".crm".into())
            .join(DATABASE_FILE)
    })
}

fn dirs_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/share/crm"))
    }
    #[cfg(target_os = "linux")]
    {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/share")))
            .map(|p| p.join("crm"))
    }
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|h| PathBuf::from(h).join("crm"))
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}
