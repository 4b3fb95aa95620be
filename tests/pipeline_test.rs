use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use link_miner::pipeline::{scan_file, scan_files};
use link_miner::{LinkKind, SiteLinks};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok(path)
}

#[tokio::test]
async fn test_scan_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write(
        &dir,
        "lib.rs",
        "// https://stackoverflow.com/questions/10/slug\nfn main() {}\n// https://stackoverflow.com/a/20\n",
    )?;

    let records = scan_file(&path, Arc::new(SiteLinks::default_site().clone())).await?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].line, 1);
    assert_eq!(records[0].kind, Some(LinkKind::LongQuestion));
    assert_eq!(records[0].normalized.as_deref(), Some("https://stackoverflow.com/q/10"));
    assert_eq!(records[1].line, 3);
    assert_eq!(records[1].normalized.as_deref(), Some("https://stackoverflow.com/a/20"));
    assert_eq!(records[1].source, path.display().to_string());

    Ok(())
}

#[tokio::test]
async fn test_scan_files_keeps_order_and_reports_failures() -> Result<()> {
    let dir = TempDir::new()?;
    let mut paths = Vec::new();
    for i in 0..5 {
        paths.push(write(
            &dir,
            &format!("{}.md", i),
            &format!("see https://stackoverflow.com/q/{}", i + 1),
        )?);
    }
    paths.insert(2, dir.path().join("missing.md"));

    let site = Arc::new(SiteLinks::default_site().clone());
    let scans = scan_files(&paths, site, 2).await;

    assert_eq!(scans.len(), 6);
    for (scan, path) in scans.iter().zip(&paths) {
        assert_eq!(&scan.path, path);
    }

    assert!(scans[2].records.is_err());
    let ok: Vec<String> = scans
        .iter()
        .filter_map(|scan| scan.records.as_ref().ok())
        .flat_map(|records| records.iter().map(|r| r.link.clone()))
        .collect();
    assert_eq!(
        ok,
        vec![
            "https://stackoverflow.com/q/1",
            "https://stackoverflow.com/q/2",
            "https://stackoverflow.com/q/3",
            "https://stackoverflow.com/q/4",
            "https://stackoverflow.com/q/5",
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_scan_other_site() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write(
        &dir,
        "notes.txt",
        "https://stackoverflow.com/q/1 and https://superuser.com/questions/2/slug#comment3_4",
    )?;

    let records = scan_file(&path, Arc::new(SiteLinks::new("superuser.com")?)).await?;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, Some(LinkKind::Comment));
    assert_eq!(
        records[0].normalized.as_deref(),
        Some("https://superuser.com/questions/2#comment3_4")
    );
    Ok(())
}
