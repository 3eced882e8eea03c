//! [`ParameterStore`] backed by the AWS Systems Manager parameter store.
//!
//! The SDK client is built once from the default configuration chain and shared by every
//! catalog and probe call.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ssm::Client;
use aws_sdk_ssm::config::Region as ApiRegion;
use aws_sdk_ssm::error::DisplayErrorContext;
use qrs_common::error::QueryError;
use qrs_common::store::{PageRequest, ParameterPage, ParameterStore};
use tracing::debug;

#[derive(Clone)]
pub struct SsmParameterStore {
    client: Client,
}

impl SsmParameterStore {
    /// Resolves credentials and endpoint region the way the AWS CLI does, optionally pinned to
    /// a named profile and an explicit API region.
    pub async fn load(profile: Option<&str>, api_region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = api_region {
            loader = loader.region(ApiRegion::new(region.to_owned()));
        }

        let sdk_config = loader.load().await;
        debug!(region = ?sdk_config.region(), "loaded AWS configuration");

        Self::from_client(Client::new(&sdk_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn parameters_by_path(&self, request: &PageRequest) -> Result<ParameterPage, QueryError> {
        let output = self
            .client
            .get_parameters_by_path()
            .path(&request.path)
            .set_max_results(request.page_size)
            .set_next_token(request.next_token.clone())
            .send()
            .await
            .map_err(|err| QueryError::Remote {
                path: request.path.clone(),
                message: DisplayErrorContext(&err).to_string(),
            })?;

        let names = output
            .parameters()
            .iter()
            .map(|parameter| {
                parameter
                    .name()
                    .map(str::to_owned)
                    .ok_or_else(|| QueryError::MalformedResponse {
                        path: request.path.clone(),
                    })
            })
            .collect::<Result<Vec<String>, QueryError>>()?;

        Ok(ParameterPage {
            names,
            next_token: output.next_token().map(str::to_owned),
        })
    }
}
