use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

use link_miner::config::Settings;
use link_miner::pipeline;
use link_miner::tld::{self, TldSet};
use link_miner::utils::logger::init_logger;
use link_miner::{ParsedUrl, SiteLinks, UrlCollection};

#[derive(Parser, Debug)]
#[command(name = "link_miner", version, about = "Find and canonicalize Q&A site links in text")]
struct Cli {
    /// Settings file (TOML, YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Host whose post links are recognized, e.g. superuser.com
    #[arg(long, global = true)]
    site: Option<String>,

    /// IANA-format top-level domain list replacing the bundled one
    #[arg(long, global = true)]
    tld_list: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate and decompose URLs
    Parse {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Scan files for site links and print one JSON record per link
    Scan {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List every URL found in files
    Extract {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Serialize)]
struct ParseOutcome<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<ParsedUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(log_dir) = cli.log_dir {
        settings.log_dir = log_dir;
    }
    if let Some(site) = cli.site {
        settings.target_site = site;
    }
    if cli.tld_list.is_some() {
        settings.tld_list = cli.tld_list;
    }

    init_logger(&settings.log_dir, cli.verbose)?;
    info!("Starting with {:?}", settings);

    let set = match &settings.tld_list {
        Some(path) => TldSet::load(path)?,
        None => TldSet::bundled(),
    };
    tld::install(set).context("Failed to install top-level domain list")?;

    let site = Arc::new(
        SiteLinks::new(&settings.target_site)
            .with_context(|| format!("Invalid target site {}", settings.target_site))?,
    );

    match cli.command {
        Command::Parse { urls } => parse_urls(&urls)?,
        Command::Scan { files } => scan(&files, site, settings.concurrency).await?,
        Command::Extract { files } => extract(&files).await?,
    }

    Ok(())
}

fn parse_urls(urls: &[String]) -> Result<()> {
    for input in urls {
        let outcome = match ParsedUrl::parse(input) {
            Ok(url) => ParseOutcome { input, url, error: None },
            Err(e) => ParseOutcome {
                input,
                url: None,
                error: Some(e.to_string()),
            },
        };
        println!("{}", serde_json::to_string(&outcome)?);
    }
    Ok(())
}

async fn scan(files: &[PathBuf], site: Arc<SiteLinks>, concurrency: usize) -> Result<()> {
    let start = std::time::Instant::now();
    let scans = pipeline::scan_files(files, site, concurrency).await;

    let mut total = 0;
    for scan in &scans {
        match &scan.records {
            Ok(records) => {
                total += records.len();
                for record in records {
                    println!("{}", serde_json::to_string(record)?);
                }
            }
            Err(e) => eprintln!("{}: {:#}", scan.path.display(), e),
        }
    }

    info!("Found {} links in {:?}", total, start.elapsed());
    Ok(())
}

async fn extract(files: &[PathBuf]) -> Result<()> {
    for path in files {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                continue;
            }
        };
        let collection = tokio::task::spawn_blocking(move || UrlCollection::from_content(&content))
            .await
            .context("Extraction task failed")?;

        println!("{}:", path.display());
        for (i, found) in collection.found().iter().enumerate() {
            let code = if found.in_inline_code { " [code]" } else { "" };
            match (&found.url, &found.error) {
                (Some(url), _) => println!("  {}. {}{}", i + 1, url, code),
                (None, Some(e)) => println!("  {}. {}{} (invalid: {})", i + 1, found.raw, code, e),
                (None, None) => {}
            }
        }

        println!("  Unique domains:");
        for domain in collection.unique_domains() {
            println!("    - {}", domain);
        }
    }
    Ok(())
}
