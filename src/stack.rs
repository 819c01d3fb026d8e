// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Wires the declared resources together and surfaces the exports.

use tracing::{info, instrument};

use crate::config::ClusterConfig;
use crate::deferred::Deferred;
use crate::error::Result;
use crate::kubeconfig;
use crate::provider::{ClusterProvider, SecretStore};
use crate::resources::{ClusterResourceSpec, SecretSpec, SecretVersionSpec, ServiceAccountSpec};

/// The declared cluster stack: service account, Autopilot cluster, and a
/// kubeconfig secret fed from the cluster's attributes.
pub struct Stack {
    config: ClusterConfig,
}

/// Informational values surfaced to the operator after a run
#[derive(Debug, Clone)]
pub struct StackExports {
    pub service_account: Deferred<String>,
    pub cluster: Deferred<String>,
    pub secret: Deferred<String>,
    pub secret_version: Deferred<String>,
}

impl StackExports {
    /// Render the exports, marking values the engine has not delivered yet
    pub fn render(&self) -> String {
        let display = |value: &Deferred<String>| {
            value.try_get().unwrap_or_else(|| "<pending>".to_string())
        };
        format!(
            "Outputs:\n  service-account: {}\n  cluster: {}\n  secret: {}\n  secret-version: {}\n",
            display(&self.service_account),
            display(&self.cluster),
            display(&self.secret),
            display(&self.secret_version),
        )
    }
}

impl Stack {
    pub fn new(config: ClusterConfig) -> Self {
        Stack { config }
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Declare the stack's resources against the engine seams, in dependency
    /// order. The kubeconfig document is composed from the cluster's deferred
    /// attributes and handed to the secret store still unresolved.
    #[instrument(skip(self, provider, store), fields(cluster = %self.config.name))]
    pub async fn provision<P, S>(&self, provider: &P, store: &S) -> Result<StackExports>
    where
        P: ClusterProvider,
        S: SecretStore,
    {
        let account_spec = ServiceAccountSpec::for_cluster(&self.config)?;
        let account = provider.create_service_account(&account_spec).await?;

        let cluster_spec = ClusterResourceSpec::from_config(&self.config)?;
        let attributes = provider.create_cluster(&cluster_spec).await?;
        let cluster_name = attributes.name.clone();

        let secret_spec = SecretSpec::kubeconfig_for(&self.config.name);
        let secret = store.create_secret(&secret_spec).await?;

        let document = kubeconfig::compose(attributes);
        let version = store
            .create_secret_version(SecretVersionSpec {
                secret: secret.id.clone(),
                data: document,
                enabled: true,
            })
            .await?;

        info!("Declared stack for cluster {}", self.config.name);

        Ok(StackExports {
            service_account: account.account_id,
            cluster: cluster_name,
            secret: secret.name,
            secret_version: version.name,
        })
    }
}
