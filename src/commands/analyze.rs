//! The analyze command: runs the fan-out analysis and renders its output.

use clap::{Parser, ValueEnum};
use org_scan::Result;
use org_scan::analyzer::{Analyzer, RepositoryReport};
use org_scan::github::{DEFAULT_BASE_URL, GitHubClient, GitHubProvider};
use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::io::{IsTerminal, stdout};

const TOP_CONTRIBUTORS_SHOWN: usize = 10;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Control when to use colored output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Colorize when stdout is a terminal
    Auto,
    /// Always colorize
    Always,
    /// Never colorize
    Never,
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Organization whose repositories to analyze
    #[arg(value_name = "ORGANIZATION")]
    pub organization: String,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN")]
    pub github_token: Option<String>,

    /// Base URL of the GitHub API
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Running aggregate over all reports received so far.
///
/// Built incrementally by this command from the analyzer's callback stream;
/// the analyzer itself only emits per-repository reports.
#[derive(Debug, Default)]
pub struct OrganizationReport {
    contributions: BTreeMap<String, u64>,
    repositories: Vec<RepositoryReport>,
}

impl OrganizationReport {
    /// Fold one repository report into the aggregate.
    fn absorb(&mut self, report: &RepositoryReport) {
        for contribution in &report.contributions {
            *self.contributions.entry(contribution.user.clone()).or_insert(0) += contribution.contributions;
        }

        self.repositories.push(report.clone());
    }

    fn repository_count(&self) -> usize {
        self.repositories.len()
    }

    fn contributor_count(&self) -> usize {
        self.contributions.len()
    }

    /// Contributors ordered by total contributions, highest first.
    fn top_contributors(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut totals: Vec<(&str, u64)> = self.contributions.iter().map(|(user, total)| (user.as_str(), *total)).collect();
        totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        totals.truncate(limit);
        totals
    }
}

pub async fn process_organization(args: &AnalyzeArgs) -> Result<()> {
    init_logging(args.log_level);

    let colors = ColorScheme::new(args.color);
    let client = GitHubClient::new(args.github_token.as_deref(), &args.api_url)?;
    let analyzer = Analyzer::new(GitHubProvider::new(client));

    let mut aggregate = OrganizationReport::default();
    let result = analyzer
        .analyze(&args.organization, |report| {
            aggregate.absorb(report);
            print_report(report, &aggregate, &colors);
        })
        .await;

    match result {
        Ok(reports) => {
            print_summary(&args.organization, reports.len(), &aggregate, &colors);
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            Err(e)
        }
    }
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    if log_level == LogLevel::None {
        return;
    }

    let level = match log_level {
        LogLevel::None => return, // Already checked above, but being explicit
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
        .init();
}

fn print_report(report: &RepositoryReport, aggregate: &OrganizationReport, colors: &ColorScheme) {
    let release = report
        .last_release
        .as_ref()
        .map_or_else(|| "none".to_owned(), |release| format!("{} ({})", release.tag_name, release.date));

    println!(
        "{} issues: {}, stars: {}, contributors: {}, last release: {}",
        colors.repository(&report.name),
        report.issues,
        report.stars,
        report.contributions.len(),
        release,
    );
    println!(
        "  {}",
        colors.dimmed(&format!(
            "so far: {} repositories, {} distinct contributors",
            aggregate.repository_count(),
            aggregate.contributor_count()
        )),
    );
}

fn print_summary(organization: &str, repository_count: usize, aggregate: &OrganizationReport, colors: &ColorScheme) {
    println!();
    println!(
        "{} {repository_count} repositories of '{organization}'",
        colors.heading("Analyzed"),
    );

    let top = aggregate.top_contributors(TOP_CONTRIBUTORS_SHOWN);
    if !top.is_empty() {
        println!("{}", colors.heading("Top contributors:"));
        for (user, total) in top {
            println!("  {user}: {total}");
        }
    }
}

struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    fn new(color_mode: ColorMode) -> Self {
        Self {
            enabled: matches!(color_mode, ColorMode::Always) || (matches!(color_mode, ColorMode::Auto) && stdout().is_terminal()),
        }
    }

    fn repository(&self, name: &str) -> String {
        if self.enabled {
            name.cyan().bold().to_string()
        } else {
            name.to_owned()
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.enabled { text.green().bold().to_string() } else { text.to_owned() }
    }

    fn dimmed(&self, text: &str) -> String {
        if self.enabled { text.dimmed().to_string() } else { text.to_owned() }
    }
}
