//! A tool to analyze the repositories of a GitHub organization.
//!
//! # Overview
//!
//! `org-scan` walks every repository belonging to an organization and produces
//! a per-repository report with its open issue count, star count, contributor
//! list, and latest release. Reports are printed as soon as they are ready,
//! followed by a final summary of the whole organization.
//!
//! # Quick Start
//!
//! ```bash
//! org-scan rust-lang
//! ```
//!
//! # GitHub Integration
//!
//! Unauthenticated GitHub API access has strict rate limits. Provide a
//! personal access token to raise them:
//!
//! ```bash
//! export GITHUB_TOKEN=ghp_xxxxxxxxxxxxxxxxxxxx
//! org-scan rust-lang
//! ```
//!
//! The token may also be passed via `--github-token`. No special permissions
//! are needed; public repository access is sufficient.
//!
//! # Alternate Endpoints
//!
//! GitHub-compatible APIs can be targeted with `--api-url`:
//!
//! ```bash
//! org-scan --api-url https://github.example.com/api/v3 platform-team
//! ```

use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use org_scan::Result;

mod commands;

use crate::commands::{AnalyzeArgs, process_organization};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "org-scan", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    args: AnalyzeArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    process_organization(&cli.args).await
}
