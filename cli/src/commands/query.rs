use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use colored::*;
use qrs_common::catalog::{AvailabilityMap, Service};
use qrs_common::config::Config;
use qrs_common::success;
use qrs_core::discovery::DiscoveryService;
use qrs_core::progress::ProgressSink;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug};

use crate::commands::interruptible;
use crate::mprint;
use crate::terminal::{colors, print, prompt, spinner};

const PROGRESS_QUEUE: usize = 16;

/// Lets the operator pick a service, then queries it.
pub async fn interactive(
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

    if services.is_empty() {
        bail!(
            "no services published for reference region {}",
            discovery.catalog().reference_region()
        );
    }

    let service = match prompt::select_service(services).await {
        Ok(Some(service)) => service,
        Ok(None) => bail!("Aborted. Exiting."),
        Err(err) => {
            debug!("prompt failed: {err:#}");
            bail!("Aborted. Exiting.")
        }
    };

    query(discovery, service, cfg, cancel).await
}

/// Probes `service` in every region and prints the outcome.
pub async fn query(
    discovery: &DiscoveryService,
    service: Service,
    cfg: &Config,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    print::header(&format!("availability of {service}"), cfg.quiet);
    let start_time: Instant = Instant::now();

    let regions = spinner::with_spinner(
        "Retrieving list of regions...",
        interruptible(cancel, discovery.regions()),
    )
    .await?
    .context("failed to list regions")?;

    let span = spinner::probe_progress(regions.len());
    let (sink, reporter) = if cfg.quiet > 0 {
        (ProgressSink::Discard, None)
    } else {
        let (sink, rx) = ProgressSink::reliable(PROGRESS_QUEUE);
        let reporter = tokio::spawn(spinner::report_probe_progress(span.clone(), rx));
        (sink, Some(reporter))
    };

    let result = discovery
        .probe(&service, &regions, sink)
        .instrument(span)
        .await;

    if let Some(reporter) = reporter {
        if let Err(err) = reporter.await {
            debug!("progress reporter failed: {err}");
        }
    }

    let availability = result.with_context(|| format!("failed to probe availability of {service}"))?;
    query_ends(&service, &availability, start_time.elapsed(), cfg)
}

fn query_ends(
    service: &Service,
    availability: &AvailabilityMap,
    total_time: Duration,
    cfg: &Config,
) -> anyhow::Result<()> {
    if cfg.json {
        print::print(&serde_json::to_string_pretty(availability)?);
        return Ok(());
    }

    if cfg.quiet > 1 {
        for (region, available) in availability.iter() {
            print::print(&format!("{region} {available}"));
        }
        return Ok(());
    }

    if availability.available_count() == 0 && cfg.quiet == 0 {
        print::header("not available anywhere", cfg.quiet);
        print::no_results();
    }

    print::header("regional availability", cfg.quiet);
    print_availability(availability);
    print_summary(service, availability, total_time, cfg);
    Ok(())
}

fn print_availability(availability: &AvailabilityMap) {
    let key_width: usize = availability
        .regions()
        .map(|region| region.as_str().len())
        .max()
        .unwrap_or_default();

    for (region, available) in availability.iter() {
        let value: ColoredString = if available {
            "available".color(colors::AVAILABLE)
        } else {
            "unavailable".color(colors::UNAVAILABLE)
        };
        print::aligned_line(region.as_str(), value, key_width);
    }
}

fn print_summary(
    service: &Service,
    availability: &AvailabilityMap,
    total_time: Duration,
    cfg: &Config,
) {
    let found: ColoredString = format!(
        "{} of {} regions",
        availability.available_count(),
        availability.len()
    )
    .bold()
    .green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!("{service} is offered in {found}, checked in {total_time}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            mprint!();
            success!("{}", output)
        }
    }
}
