//! Batch scanning of documents for site links.
//!
//! One bad line or unreadable file never aborts the batch: construction
//! failures are logged by [`SiteLinks`] and read failures are reported per
//! file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::patterns;
use crate::site_links::{LinkKind, SiteLinks};

/// A site link found while scanning a document.
#[derive(Debug, Clone, Serialize)]
pub struct LinkRecord {
    /// Name of the scanned document, usually a file path.
    pub source: String,
    /// 1-based line number.
    pub line: usize,
    /// The candidate exactly as it appeared in the line.
    pub raw: String,
    /// The link as it was constructed from the line.
    pub link: String,
    /// Canonical post link, if the link points to a post.
    pub normalized: Option<String>,
    pub kind: Option<LinkKind>,
    pub in_inline_code: bool,
}

/// Outcome of scanning one file.
#[derive(Debug)]
pub struct FileScan {
    pub path: PathBuf,
    pub records: Result<Vec<LinkRecord>>,
}

/// Scans `content` line by line for links to `site`.
pub fn scan_document(source: &str, content: &str, site: &SiteLinks) -> Vec<LinkRecord> {
    let mut records = Vec::new();

    for (index, line) in content.lines().enumerate() {
        for found in site.find_all(line) {
            let normalized = site.normalize(&found.url);
            records.push(LinkRecord {
                source: source.to_string(),
                line: index + 1,
                raw: line[found.span.clone()].to_string(),
                link: found.url.as_str().to_string(),
                normalized: normalized.map(|url| url.as_str().to_string()),
                kind: site.classify(&found.url),
                in_inline_code: patterns::is_in_inline_code(found.span, line),
            });
        }
    }

    debug!("Found {} {} links in {}", records.len(), site.host(), source);
    records
}

/// Reads and scans a single file.
pub async fn scan_file(path: &Path, site: Arc<SiteLinks>) -> Result<Vec<LinkRecord>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let source = path.display().to_string();

    // Regex scanning is CPU-bound, keep it off the async workers.
    tokio::task::spawn_blocking(move || scan_document(&source, &content, &site))
        .await
        .context("Scan task failed")
}

/// Scans `paths` concurrently, `concurrency` files at a time.
///
/// Results are returned in input order; failed files carry their error.
pub async fn scan_files(paths: &[PathBuf], site: Arc<SiteLinks>, concurrency: usize) -> Vec<FileScan> {
    let mut results = Vec::with_capacity(paths.len());

    for chunk in paths.chunks(concurrency.max(1)) {
        let scans = chunk.iter().map(|path| {
            let site = Arc::clone(&site);
            async move {
                let records = scan_file(path, site).await;
                if let Err(e) = &records {
                    error!("Skipping {}: {:#}", path.display(), e);
                }
                FileScan {
                    path: path.clone(),
                    records,
                }
            }
        });
        results.extend(join_all(scans).await);
    }

    let failed = results.iter().filter(|scan| scan.records.is_err()).count();
    info!("Scanned {} files ({} failed)", results.len(), failed);
    results
}
