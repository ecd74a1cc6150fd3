use log2::*;
use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;

use wikicrawl::{config, crawler, report};

/// Indicates start time of a project, lazily initialized
pub static START_TIME: once_cell::sync::Lazy<Instant> = once_cell::sync::Lazy::new(Instant::now);

#[tokio::main]
async fn main() -> Result<()> {
    let _ = *START_TIME;
    let cfg = config::Config::new();
    cfg.validate()?;
    let _log2 = stdout()
        .module(true) // include module name
        .module_with_line(true) // include line number from module
        .module_filter(|module| module.starts_with("wikicrawl")) // include only modules having this pattern
        .compress(false)
        .level(cfg.log_level.to_string())
        .start();

    let crawler = Arc::new(
        crawler::Crawler::new(cfg.crawler_config())?
            .with_observer(Arc::new(crawler::LogObserver)),
    );
    info!("Crawling {} starting at {}", crawler.base(), cfg.seed());

    match crawler.crawl(cfg.seed()).await {
        Ok(result) => {
            report::print_report(&result);
            info!(
                "Crawling completed in {:?}: {} visited, {} broken",
                START_TIME.elapsed(),
                result.visited.len(),
                result.broken.len()
            );

            if let Some(path) = cfg.output_file {
                report::write_json(&result, &path)?;
                info!("Report written to {:?}", path);
            }
        }
        Err(e) => {
            error!("Crawling failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
