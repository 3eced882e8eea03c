use anyhow::Context;
use qrs_common::config::Config;
use qrs_core::directory::ServiceDirectory;
use qrs_core::discovery::DiscoveryService;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::commands::interruptible;
use crate::terminal::{print, spinner};

pub async fn regions(
    discovery: &DiscoveryService,
    cfg: &Config,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let regions = spinner::with_spinner(
        "Retrieving list of regions...",
        interruptible(cancel, discovery.regions()),
    )
    .await?
    .context("failed to list regions")?;

    print::header("regions", cfg.quiet);
    print_listing(&regions, cfg)
}

pub async fn services(
    discovery: &DiscoveryService,
    cfg: &Config,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let services = spinner::with_spinner(
        "Retrieving list of services...",
        interruptible(cancel, discovery.services()),
    )
    .await?
    .context("failed to list services")?;

    let reference = discovery.catalog().reference_region();
    print::header(&format!("services in {reference}"), cfg.quiet);
    print_listing(&services, cfg)
}

pub async fn names(cfg: &Config, cancel: &CancellationToken) -> anyhow::Result<()> {
    let directory = ServiceDirectory::default();
    let names = spinner::with_spinner(
        "Retrieving service names...",
        interruptible(cancel, directory.fetch_names()),
    )
    .await?
    .context("failed to list service names")?;

    print::header("service names", cfg.quiet);
    print_listing(&names, cfg)
}

fn print_listing<T: Serialize + std::fmt::Display>(items: &[T], cfg: &Config) -> anyhow::Result<()> {
    if cfg.json {
        print::print(&serde_json::to_string_pretty(items)?);
        return Ok(());
    }
    for item in items {
        print::print(&item.to_string());
    }
    Ok(())
}
