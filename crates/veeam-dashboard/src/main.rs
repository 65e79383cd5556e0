use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::{Days, Local, NaiveDate};
use clap::Parser;
use log::{error, info, warn};
use serde_json::json;

use veeam_dashboard::config::{default_config_path, load_config};
use veeam_dashboard::logging::{self, LogFormat};
use veeam_dashboard::{
    ClassificationRules, ConfigError, Dashboard, DashboardConfig, DashboardError, EmailFilter,
    FilterState, HttpRepository, Snapshot, StatusFilter, TableId,
};

/// Polls the backup-report API and prints the dashboard as JSON.
#[derive(Debug, Parser)]
#[command(name = "veeam-dashboard", version, about)]
struct Cli {
    /// Config file (defaults to ~/.veeam-dashboard/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API base URL, overriding the config file
    #[arg(long)]
    api_base_url: Option<String>,

    /// Fetch and print a single report, then exit
    #[arg(long)]
    once: bool,

    /// Free-text search over job fields
    #[arg(long, default_value = "")]
    search: String,

    /// Only jobs with a non-zero counter: success, warning or error
    #[arg(long, value_parser = parse_status)]
    status: Option<StatusFilter>,

    /// Earliest email date, YYYY-MM-DD
    #[arg(long, value_parser = parse_day)]
    from: Option<String>,

    /// Latest email date, YYYY-MM-DD
    #[arg(long, value_parser = parse_day)]
    to: Option<String>,

    /// Page of the filtered table to print
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,

    /// Subject search over the recent-backups email list
    #[arg(long, default_value = "")]
    subject: String,

    /// Only emails of this day in the recent-backups list, YYYY-MM-DD
    #[arg(long, value_parser = parse_day)]
    email_date: Option<String>,

    /// Page of the recent-backups email list to print
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    email_page: i64,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn parse_status(value: &str) -> Result<StatusFilter, String> {
    StatusFilter::parse(value).ok_or_else(|| format!("unknown status '{}'", value))
}

fn parse_day(value: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|e| format!("invalid date '{}': {}", value, e))
}

fn resolve_config(cli: &Cli) -> Result<DashboardConfig, ConfigError> {
    let path = cli.config.clone().or_else(default_config_path);

    let mut config = match path {
        Some(path) if path.exists() => {
            info!("Loading configuration from {:?}", path);
            load_config(&path)?
        }
        Some(path) if cli.config.is_some() => {
            return Err(ConfigError::ReadFile {
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
                path,
            })
        }
        _ => match &cli.api_base_url {
            Some(url) => DashboardConfig::with_base_url(url.clone()),
            None => {
                return Err(ConfigError::Validation {
                    message: "no config file found and no --api-base-url given".to_string(),
                })
            }
        },
    };

    if let Some(url) = &cli.api_base_url {
        config.api_base_url = url.clone();
    }
    Ok(config)
}

/// Pages the report was printed at, kept across polls.
#[derive(Debug, Clone, Copy)]
struct Pages {
    jobs: i64,
    emails: i64,
}

fn page_number(page: usize) -> i64 {
    i64::try_from(page).unwrap_or(1)
}

/// Prints one report and returns the pages the tables landed on.
fn print_report(dashboard: &Dashboard, pages: Pages) -> Pages {
    let today = Local::now().date_naive();
    let yesterday = today - Days::new(1);
    let jobs = dashboard.get_page(TableId::Filtered, pages.jobs);
    let emails = dashboard.get_page(TableId::Emails, pages.emails);
    let landed = Pages {
        jobs: page_number(jobs.current_page),
        emails: page_number(emails.current_page),
    };
    let report = json!({
        "fetchedAt": dashboard.snapshot().fetched_at,
        "summary": dashboard.get_summary(),
        "emailSummary": dashboard.get_email_summary(),
        "message": dashboard.summary_message(),
        "daily": {
            "date": yesterday.format("%Y-%m-%d").to_string(),
            "emailSummary": dashboard.get_email_summary_for_date(yesterday),
            "message": dashboard.summary_message_for_date(yesterday),
        },
        "chart": dashboard.get_chart_series(today),
        "groups": dashboard.get_grouped_table(),
        "page": jobs,
        "emails": emails,
    });

    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{}", text),
        Err(e) => error!("Failed to serialize report: {}", e),
    }
    landed
}

async fn run(cli: Cli) -> Result<(), DashboardError> {
    let config = resolve_config(&cli)?;
    let repo = HttpRepository::new(&config)?;
    info!(
        "Polling {} every {}s",
        repo.base_url(),
        config.poll_interval_secs
    );

    let mut dashboard = Dashboard::new(
        Snapshot::default(),
        ClassificationRules::from(&config.classification),
    );
    dashboard.set_filter(FilterState {
        search_text: cli.search.clone(),
        status_filter: cli.status,
        date_start: cli.from.clone(),
        date_end: cli.to.clone(),
    });

    dashboard.set_email_filter(EmailFilter {
        subject: cli.subject.clone(),
        date: cli.email_date.clone(),
    });

    let mut ticker = tokio::time::interval(Duration::from_secs(config.poll_interval_secs));
    let mut pages = Pages {
        jobs: cli.page,
        emails: cli.email_page,
    };
    let limit = config.http.max_concurrent_requests;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => {
                info!("Interrupted, shutting down");
                return Ok(());
            }
        }

        let fetched = tokio::select! {
            result = Snapshot::fetch_with_limit(&repo, limit) => result,
            _ = &mut shutdown => {
                info!("Interrupted during fetch, shutting down");
                return Ok(());
            }
        };

        match fetched {
            Ok(snapshot) => {
                dashboard.replace_snapshot(snapshot);
                pages = print_report(&dashboard, pages);
            }
            Err(e) if cli.once => return Err(e.into()),
            Err(e) => warn!("Fetch failed, keeping previous data: {}", e),
        }

        if cli.once {
            return Ok(());
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    logging::init_with_format(&cli.log_level, format);

    info!("Starting veeam-dashboard v{}", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
