// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed model of the kubeconfig document handed to kubectl.
//!
//! Values are embedded through the serializer, so cluster names and
//! certificates containing YAML metacharacters cannot corrupt the document.

use serde::{Deserialize, Serialize};

use crate::constants::exec;

/// A kubeconfig holding exactly one cluster/context/user triple, all keyed
/// by the cluster name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kubeconfig {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub clusters: Vec<NamedCluster>,
    pub contexts: Vec<NamedContext>,
    #[serde(rename = "current-context")]
    pub current_context: String,
    pub kind: String,
    pub preferences: Preferences,
    pub users: Vec<NamedUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCluster {
    pub cluster: ClusterEndpoint,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterEndpoint {
    #[serde(rename = "certificate-authority-data")]
    pub certificate_authority_data: String,
    pub server: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedContext {
    pub context: ContextRef,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRef {
    pub cluster: String,
    pub user: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedUser {
    pub name: String,
    pub user: UserAuth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAuth {
    pub exec: ExecConfig,
}

/// Exec-plugin credential block pinned to the GKE auth plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecConfig {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub command: String,
    #[serde(rename = "installHint")]
    pub install_hint: String,
    #[serde(rename = "provideClusterInfo")]
    pub provide_cluster_info: bool,
}

impl Kubeconfig {
    /// Build the document for a single cluster. The cluster name keys the
    /// cluster entry, the context entry, the user entry, the context's user
    /// reference and `current-context`.
    pub fn for_single_cluster(name: &str, server: &str, ca_certificate: &str) -> Self {
        Kubeconfig {
            api_version: "v1".to_string(),
            clusters: vec![NamedCluster {
                cluster: ClusterEndpoint {
                    certificate_authority_data: ca_certificate.to_string(),
                    server: server.to_string(),
                },
                name: name.to_string(),
            }],
            contexts: vec![NamedContext {
                context: ContextRef {
                    cluster: name.to_string(),
                    user: name.to_string(),
                },
                name: name.to_string(),
            }],
            current_context: name.to_string(),
            kind: "Config".to_string(),
            preferences: Preferences::default(),
            users: vec![NamedUser {
                name: name.to_string(),
                user: UserAuth {
                    exec: ExecConfig {
                        api_version: exec::API_VERSION.to_string(),
                        command: exec::COMMAND.to_string(),
                        install_hint: exec::INSTALL_HINT.to_string(),
                        provide_cluster_info: true,
                    },
                },
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_single_cluster_keys_everything_by_name() {
        let doc = Kubeconfig::for_single_cluster("sbx", "https://10.0.0.1", "CERT");

        assert_eq!(doc.clusters.len(), 1);
        assert_eq!(doc.contexts.len(), 1);
        assert_eq!(doc.users.len(), 1);
        assert_eq!(doc.clusters[0].name, "sbx");
        assert_eq!(doc.contexts[0].name, "sbx");
        assert_eq!(doc.contexts[0].context.cluster, "sbx");
        assert_eq!(doc.contexts[0].context.user, "sbx");
        assert_eq!(doc.users[0].name, "sbx");
        assert_eq!(doc.current_context, "sbx");
    }

    #[test]
    fn test_exec_block_pins_the_gke_auth_plugin() {
        let doc = Kubeconfig::for_single_cluster("sbx", "https://10.0.0.1", "CERT");
        let exec = &doc.users[0].user.exec;

        assert_eq!(exec.api_version, "client.authentication.k8s.io/v1beta1");
        assert_eq!(exec.command, "gke-gcloud-auth-plugin");
        assert!(exec.provide_cluster_info);
    }

    #[test]
    fn test_document_round_trips_through_yaml() {
        let doc = Kubeconfig::for_single_cluster("sbx", "https://10.0.0.1", "CERT");
        let yaml = serde_yaml::to_string(&doc).unwrap();
        let parsed: Kubeconfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, doc);
    }
}
