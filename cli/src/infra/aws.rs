//! AWS SDK configuration.

use anyhow::Result;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_credential_types::Credentials;
use aws_sdk_ecs::config::Region;

/// Provider name recorded on static credentials passed with `--key`/`--secret`.
const STATIC_PROVIDER: &str = "ecs-deploy-cli";

/// Connection settings gathered from flags and the config file.
#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

impl ClientSettings {
    /// Uses static credentials when both halves are given.
    ///
    /// # Errors
    ///
    /// Returns an error when only one of key and secret is set.
    pub fn static_credentials(&self) -> Result<Option<Credentials>> {
        match (self.access_key.as_deref(), self.secret_key.as_deref()) {
            (Some(key), Some(secret)) => Ok(Some(Credentials::new(
                key,
                secret,
                None,
                None,
                STATIC_PROVIDER,
            ))),
            (None, None) => Ok(None),
            (Some(_), None) => anyhow::bail!("--secret is required when --key is given"),
            (None, Some(_)) => anyhow::bail!("--key is required when --secret is given"),
        }
    }
}

/// Build the SDK configuration.
///
/// Without explicit credentials or region, the default AWS provider chain
/// (environment, profile, instance metadata) is consulted.
///
/// # Errors
///
/// Returns an error if credentials are incomplete or no region can be found.
pub async fn load_sdk_config(settings: &ClientSettings) -> Result<SdkConfig> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &settings.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(credentials) = settings.static_credentials()? {
        loader = loader.credentials_provider(credentials);
    }
    if let Some(url) = &settings.endpoint_url {
        loader = loader.endpoint_url(url);
    }

    let config = loader.load().await;
    let Some(region) = config.region() else {
        anyhow::bail!("No AWS region configured. Pass --region or set AWS_REGION");
    };
    tracing::debug!(
        region = %region,
        static_credentials = settings.access_key.is_some(),
        endpoint = ?settings.endpoint_url,
        "AWS client configured"
    );
    Ok(config)
}
