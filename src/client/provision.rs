//! Once-per-process client provisioning.
//!
//! A [`ClientCell`] builds its [`ArkClient`] on the first `provision` call and
//! hands out the same `Arc` afterwards. Later calls with a different
//! configuration do not reconfigure anything: the first configuration stays in
//! force and a warning is logged.

use crate::client::builder::ArkClientBuilder;
use crate::client::config::ClientConfig;
use crate::client::core::ArkClient;
use crate::Result;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Holder for one shared client.
pub struct ClientCell {
    cell: OnceCell<Arc<ArkClient>>,
}

impl ClientCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the shared client, building it from `config` if this is the first call.
    pub fn provision(&self, config: ClientConfig) -> Result<Arc<ArkClient>> {
        self.provision_with(config, ArkClient::from_config)
    }

    /// Same as [`provision`](Self::provision) with a custom constructor.
    pub fn provision_with<F>(&self, config: ClientConfig, build: F) -> Result<Arc<ArkClient>>
    where
        F: FnOnce(ClientConfig) -> Result<ArkClient>,
    {
        if let Some(existing) = self.cell.get() {
            warn_if_reconfigured(existing, &config);
            return Ok(existing.clone());
        }

        let client = self.cell.get_or_try_init(|| {
            info!(
                base_url = config.base_url(),
                max_retries = config.max_retries(),
                retry_delay_ms = config.retry_delay().as_millis() as u64,
                "provisioning shared ark client"
            );
            build(config).map(Arc::new)
        })?;
        Ok(client.clone())
    }

    /// Provision from a configuration that is resolved on demand.
    ///
    /// Once the cell holds a client, the requested configuration is only compared
    /// against the active one: a mismatch or a resolution failure is logged and the
    /// existing client is returned.
    pub fn provision_resolved<R>(&self, resolve: R) -> Result<Arc<ArkClient>>
    where
        R: FnOnce() -> Result<ClientConfig>,
    {
        if let Some(existing) = self.cell.get() {
            match resolve() {
                Ok(config) => warn_if_reconfigured(existing, &config),
                Err(err) => warn!(
                    error = %err,
                    "ark client already provisioned; requested configuration is invalid"
                ),
            }
            return Ok(existing.clone());
        }
        self.provision(resolve()?)
    }

    /// The shared client, if it has been provisioned.
    pub fn get(&self) -> Option<Arc<ArkClient>> {
        self.cell.get().cloned()
    }
}

impl Default for ClientCell {
    fn default() -> Self {
        Self::new()
    }
}

fn warn_if_reconfigured(existing: &ArkClient, requested: &ClientConfig) {
    let active = existing.config();
    if active != requested {
        warn!(
            active_base_url = active.base_url(),
            requested_base_url = requested.base_url(),
            api_key_changed = active.api_key() != requested.api_key(),
            "ark client already provisioned; ignoring new configuration"
        );
    }
}

static SHARED: ClientCell = ClientCell::new();

/// Options accepted by [`create_ark_client`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionOptions {
    pub base_url: Option<String>,
    pub max_retries: Option<u32>,
    pub retry_delay: Option<Duration>,
}

impl ProvisionOptions {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = Some(n);
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Resolve into a validated configuration for `api_key`.
    pub fn into_config(self, api_key: impl Into<String>) -> Result<ClientConfig> {
        let mut builder = ArkClientBuilder::new().api_key(api_key);
        if let Some(url) = self.base_url {
            builder = builder.base_url(url);
        }
        if let Some(n) = self.max_retries {
            builder = builder.max_retries(n);
        }
        if let Some(delay) = self.retry_delay {
            builder = builder.retry_delay(delay);
        }
        builder.build_config()
    }
}

/// Process-wide shared client.
///
/// The first successful call decides the configuration for the lifetime of the
/// process. Later calls get the same client; a differing `api_key` or `options`
/// is logged as a warning.
pub fn create_ark_client(api_key: &str, options: ProvisionOptions) -> Result<Arc<ArkClient>> {
    SHARED.provision_resolved(|| options.into_config(api_key))
}

/// The process-wide client, if [`create_ark_client`] has succeeded before.
pub fn shared_client() -> Option<Arc<ArkClient>> {
    SHARED.get()
}
