//! Folio CLI
//!
//! Run portfolio pages headlessly: replay scripted sessions, check page
//! markup against what the components expect, and inspect configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_app::contracts::{check_markup, inert_components};
use folio_app::{AppConfig, PageFixture, PortfolioApp};
use folio_core::{Millis, NodeSnapshot};
use folio_platform::{Event, HostRequest, InputEvent};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod script;

use script::Session;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless portfolio page simulator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a session against a page and print the resulting document
    Simulate {
        /// Page fixture (JSON)
        page: PathBuf,

        /// Session script (TOML); defaults to loading the page
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Page configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for every random choice, overriding the configuration
        #[arg(long)]
        seed: Option<u64>,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report which component markup a page provides
    Check {
        /// Page fixture (JSON)
        page: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config {
        /// Configuration to validate; defaults are printed without one
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so reports can be piped
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            page,
            script,
            config,
            seed,
            output,
        } => cmd_simulate(
            &page,
            script.as_deref(),
            config.as_deref(),
            seed,
            output.as_deref(),
        ),

        Commands::Check { page, json } => cmd_check(&page, json),

        Commands::Config { path } => cmd_config(path.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

fn load_page(path: &Path) -> Result<PageFixture> {
    PageFixture::load(path).with_context(|| format!("Failed to load page {}", path.display()))
}

/// Outcome of a simulated session
#[derive(Debug, Serialize)]
struct Report {
    /// Page time when the session ended, ms
    now: Millis,
    attached: bool,
    pending_tasks: usize,
    host_requests: Vec<HostRequest>,
    document: NodeSnapshot,
}

/// Replay `session` on a fresh page built from `fixture`
///
/// Scroll requests are honoured at once: each becomes a scroll event.
fn simulate(fixture: &PageFixture, config: AppConfig, session: &Session) -> Result<Report> {
    let mut app = PortfolioApp::from_fixture(fixture, config);
    let events = session.resolve(app.document())?;
    info!(events = events.len(), settle = session.settle, "replaying session");

    let mut host_requests = Vec::new();
    app.run(events, |app, request| {
        debug!(?request, "host request");
        host_requests.push(request);
        match request {
            HostRequest::ScrollTo { top, .. } => {
                app.dispatch(Event::Input(InputEvent::Scroll { y: top }));
            }
        }
    })
    .context("Session replay failed")?;

    app.advance_to(session.end().saturating_add(session.settle).max(app.now()));
    host_requests.extend(app.take_host_requests());

    Ok(Report {
        now: app.now(),
        attached: app.is_attached(),
        pending_tasks: app.pending_tasks(),
        host_requests,
        document: app.document().snapshot(),
    })
}

fn cmd_simulate(
    page: &Path,
    script: Option<&Path>,
    config: Option<&Path>,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<()> {
    let fixture = load_page(page)?;
    let mut config = load_config(config)?;
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }
    let session = match script {
        Some(path) => Session::load(path)?,
        None => Session::default(),
    };

    info!("Simulating {}", page.display());
    let report = simulate(&fixture, config, &session)?;
    info!(
        now = report.now,
        pending = report.pending_tasks,
        requests = report.host_requests.len(),
        "session finished"
    );

    let rendered = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn cmd_check(page: &Path, json: bool) -> Result<()> {
    let fixture = load_page(page)?;
    let doc = fixture.build_document();
    let reports = check_markup(&doc);

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!("Markup check: {}", page.display());
    println!("==============");
    println!();
    for report in &reports {
        let mark = match (report.is_satisfied(), report.essential) {
            (true, _) => "ok",
            (false, true) => "MISSING",
            (false, false) => "absent",
        };
        println!(
            "  [{:>7}] {:<10} {} ({})",
            mark, report.component, report.selector, report.matches
        );
    }
    println!();

    let inert = inert_components(&reports);
    if inert.is_empty() {
        println!("Every component has its markup.");
    } else {
        println!("Inert components: {}", inert.join(", "));
    }
    Ok(())
}

fn cmd_config(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    if let Some(path) = path {
        info!("{} is valid", path.display());
    }
    print!("{}", config.to_toml_string()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORTFOLIO: &str = include_str!("../../../demos/portfolio.json");
    const SESSION: &str = include_str!("../../../demos/session.toml");

    fn report(session: &Session) -> Report {
        let fixture = PageFixture::from_json(PORTFOLIO).unwrap();
        simulate(&fixture, AppConfig::default().with_seed(11), session).unwrap()
    }

    fn find<'a>(node: &'a NodeSnapshot, id: &str) -> Option<&'a NodeSnapshot> {
        if node.id.as_deref() == Some(id) {
            return Some(node);
        }
        node.children.iter().find_map(|child| find(child, id))
    }

    #[test]
    fn test_demo_page_has_every_component() {
        let fixture = PageFixture::from_json(PORTFOLIO).unwrap();
        let reports = check_markup(&fixture.build_document());
        assert!(inert_components(&reports).is_empty());
    }

    #[test]
    fn test_default_session_loads_the_page() {
        let report = report(&Session::default());
        assert!(report.attached);
        assert_eq!(report.now, 3000);

        let loader = find(&report.document, "pageLoader").unwrap();
        assert!(loader.classes.iter().any(|class| class == "fade-out"));
    }

    #[test]
    fn test_demo_session_replays() {
        let session = Session::from_toml_str(SESSION).unwrap();
        let report = report(&session);

        assert!(!report.host_requests.is_empty());
        let HostRequest::ScrollTo { top, smooth } = report.host_requests[0];
        assert!(smooth);
        assert!(top > 0.0);
    }

    #[test]
    fn test_report_serializes() {
        let report = report(&Session::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["now"], 3000);
        assert_eq!(json["document"]["tag"], "body");
    }
}
