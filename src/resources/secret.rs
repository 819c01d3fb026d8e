// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

use crate::constants::KUBECONFIG_SECRET_PREFIX;
use crate::deferred::Deferred;

/// Replication policy for a managed secret
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplicationPolicy {
    #[default]
    Auto,
}

/// A secret container in the external secret manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretSpec {
    pub secret_id: String,
    pub replication: ReplicationPolicy,
}

impl SecretSpec {
    /// The secret holding a cluster's kubeconfig: `kubeconfig-<cluster>`
    pub fn kubeconfig_for(cluster_name: &str) -> Self {
        SecretSpec {
            secret_id: format!("{}-{}", KUBECONFIG_SECRET_PREFIX, cluster_name),
            replication: ReplicationPolicy::Auto,
        }
    }
}

/// A new active version of a secret. The payload stays deferred and opaque;
/// the store persists it once the provisioning engine delivers it.
#[derive(Debug, Clone)]
pub struct SecretVersionSpec {
    pub secret: Deferred<String>,
    pub data: Deferred<String>,
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kubeconfig_secret_naming() {
        let spec = SecretSpec::kubeconfig_for("autopilot-mgmt-sbx");
        assert_eq!(spec.secret_id, "kubeconfig-autopilot-mgmt-sbx");
        assert_eq!(spec.replication, ReplicationPolicy::Auto);
    }

    #[test]
    fn test_replication_policy_serializes_lowercase() {
        let yaml = serde_yaml::to_string(&ReplicationPolicy::Auto).unwrap();
        assert_eq!(yaml.trim(), "auto");
    }
}
