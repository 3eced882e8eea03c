use anyhow::Context;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use qrs_common::catalog::Service;

const PROMPT_PAGE_SIZE: usize = 15;

/// Asks the operator to pick one of `services`.
///
/// Returns `None` when the prompt is dismissed.
pub async fn select_service(services: Vec<Service>) -> anyhow::Result<Option<Service>> {
    tokio::task::spawn_blocking(move || {
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select service to query")
            .items(&services)
            .default(0)
            .max_length(PROMPT_PAGE_SIZE)
            .interact_opt()
            .context("service prompt failed")?;

        Ok(selection.and_then(|idx| services.into_iter().nth(idx)))
    })
    .await
    .context("service prompt panicked")?
}
