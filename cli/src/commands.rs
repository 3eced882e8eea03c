pub mod list;
pub mod query;

use std::future::Future;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use qrs_common::catalog::{Region, Service};
use qrs_common::config::{Config, DEFAULT_REFERENCE_REGION, MAX_PAGE_SIZE};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "qrs")]
#[command(about = "Find out which regions offer a cloud service.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Named credentials profile to use
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Region of the API endpoint to query
    #[arg(long, global = true)]
    pub api_region: Option<String>,

    /// Number of regions probed at the same time
    #[arg(short, long, global = true, default_value_t = 3,
          value_parser = clap::value_parser!(u16).range(1..=32))]
    pub concurrency: u16,

    /// Region whose service list is offered for selection
    #[arg(long, global = true, default_value = DEFAULT_REFERENCE_REGION)]
    pub reference_region: Region,

    /// Parameters requested per page when listing services
    #[arg(long, global = true, default_value_t = MAX_PAGE_SIZE,
          value_parser = clap::value_parser!(i32).range(1..=MAX_PAGE_SIZE as i64))]
    pub page_size: i32,

    /// Less output; repeat for plain, script-friendly lines
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show in which regions a service is available
    #[command(alias = "q")]
    Query { service: Service },
    /// List regions, services or service names
    #[command(alias = "l", subcommand)]
    List(ListCommand),
}

#[derive(Subcommand)]
pub enum ListCommand {
    /// Print all regions
    Regions,
    /// Print all services of the reference region
    Services,
    /// Print the human-readable names of all services
    Names,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            concurrency: usize::from(self.concurrency),
            reference_region: self.reference_region.clone(),
            page_size: self.page_size,
            quiet: if self.json { self.quiet.max(1) } else { self.quiet },
            json: self.json,
            profile: self.profile.clone(),
            api_region: self.api_region.clone(),
        }
    }
}

/// Resolves to an error as soon as `cancel` fires, dropping `fut`.
pub async fn interruptible<F: Future>(
    cancel: &CancellationToken,
    fut: F,
) -> anyhow::Result<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(anyhow!("interrupted")),
        output = fut => Ok(output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config() {
        let cli = CommandLine::try_parse_from(["qrs"]).unwrap();
        let cfg = cli.config();
        let default = Config::default();
        assert!(cli.command.is_none());
        assert_eq!(cfg.concurrency, default.concurrency);
        assert_eq!(cfg.reference_region, default.reference_region);
        assert_eq!(cfg.page_size, default.page_size);
    }

    #[test]
    fn query_takes_service() {
        let cli = CommandLine::try_parse_from(["qrs", "q", "lambda", "-c", "5"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Query { ref service }) if service.as_str() == "lambda"));
        assert_eq!(cli.config().concurrency, 5);
    }

    #[test]
    fn rejects_zero_concurrency() {
        assert!(CommandLine::try_parse_from(["qrs", "-c", "0"]).is_err());
    }

    #[test]
    fn rejects_oversized_pages() {
        assert!(CommandLine::try_parse_from(["qrs", "--page-size", "11"]).is_err());
    }

    #[test]
    fn json_implies_quiet() {
        let cli = CommandLine::try_parse_from(["qrs", "list", "regions", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List(ListCommand::Regions))));
        assert_eq!(cli.config().quiet, 1);
    }

    #[tokio::test]
    async fn interruptible_passes_output_through() {
        let cancel = CancellationToken::new();
        let output = interruptible(&cancel, async { 7 }).await.unwrap();
        assert_eq!(output, 7);
    }

    #[tokio::test]
    async fn interruptible_stops_on_cancel() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = interruptible(&cancel, std::future::pending::<()>()).await;
        assert!(result.is_err());
    }
}
