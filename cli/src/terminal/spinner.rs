use std::future::Future;

use indicatif::ProgressStyle;
use qrs_common::catalog::Region;
use tokio::sync::mpsc::Receiver;
use tracing::{Instrument, Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICK_STRINGS)
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} [{bar:24.green/bright_black}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICK_STRINGS)
        .progress_chars("█▆▁")
}

/// Runs `fut` while a spinner shows `msg`.
pub async fn with_spinner<F: Future>(msg: &str, fut: F) -> F::Output {
    let span = info_span!("spinner", indicatif.pb_show = true);
    span.pb_set_style(&spinner_style());
    span.pb_set_message(msg);
    fut.instrument(span).await
}

/// A span whose progress bar counts dispatched region probes.
pub fn probe_progress(total: usize) -> Span {
    let span = info_span!("probing", indicatif.pb_show = true);
    span.pb_set_style(&bar_style());
    span.pb_set_length(total as u64);
    span.pb_set_message("Dispatching probes...");
    span
}

/// Advances `span`'s bar for every region event until the stream ends.
pub async fn report_probe_progress(span: Span, mut rx: Receiver<Region>) {
    while let Some(region) = rx.recv().await {
        span.pb_inc(1);
        span.pb_set_message(&format!("Probing {region}"));
    }
}
