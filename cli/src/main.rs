mod commands;
mod terminal;

use std::process::ExitCode;
use std::sync::Arc;

use commands::{CommandLine, Commands, ListCommand, list, query};
use qrs_common::config::Config;
use qrs_common::{error, warn};
use qrs_common::store::ParameterStore;
use qrs_core::discovery::DiscoveryService;
use qrs_core::ssm::SsmParameterStore;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    let cfg = commands.config();

    terminal::logging::init(cfg.quiet);

    let cancel = cancel_on_interrupt();
    match run(commands.command, &cfg, &cancel).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Option<Commands>, cfg: &Config, cancel: &CancellationToken) -> anyhow::Result<()> {
    match command {
        None => query::interactive(&connect(cfg, cancel).await, cfg, cancel).await,
        Some(Commands::Query { service }) => {
            query::query(&connect(cfg, cancel).await, service, cfg, cancel).await
        }
        Some(Commands::List(ListCommand::Regions)) => {
            list::regions(&connect(cfg, cancel).await, cfg, cancel).await
        }
        Some(Commands::List(ListCommand::Services)) => {
            list::services(&connect(cfg, cancel).await, cfg, cancel).await
        }
        Some(Commands::List(ListCommand::Names)) => list::names(cfg, cancel).await,
    }
}

/// Builds the parameter store client once for the commands that read it.
async fn connect(cfg: &Config, cancel: &CancellationToken) -> DiscoveryService {
    let store: Arc<dyn ParameterStore> = Arc::new(
        SsmParameterStore::load(cfg.profile.as_deref(), cfg.api_region.as_deref()).await,
    );
    DiscoveryService::new(store, cfg, cancel.clone())
}

/// Token cancelled on the first Ctrl-C. A second one exits immediately.
fn cancel_on_interrupt() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("interrupted, stopping");
        token.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
    cancel
}
