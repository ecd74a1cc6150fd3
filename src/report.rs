use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

use crate::crawler::CrawlResult;

/// Human readable listing of a finished crawl.
pub fn render(result: &CrawlResult) -> String {
    let mut out = String::new();

    for link in result.visited.sorted() {
        let _ = writeln!(out, "Visited link: {}", link);
    }

    for link in result.broken.sorted() {
        let _ = writeln!(out, "Broken link: {}", link);
        for referrer in result.references.referrers(&link) {
            let _ = writeln!(out, "    referenced from: {}", referrer);
        }
    }

    let _ = writeln!(
        out,
        "{} visited, {} broken",
        result.visited.len(),
        result.broken.len()
    );
    out
}

/// Print the crawl result in a readable format
pub fn print_report(result: &CrawlResult) {
    print!("{}", render(result));
}

/// Writes the result as pretty printed JSON.
pub fn write_json(result: &CrawlResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json).with_context(|| format!("failed to write report to {:?}", path))?;
    Ok(())
}
