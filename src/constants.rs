// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Base URL for Compute Engine resource self-links
pub const COMPUTE_API_BASE: &str = "https://www.googleapis.com/compute/v1";

/// Client authentication settings pinned in generated kubeconfigs
pub mod exec {
    pub const API_VERSION: &str = "client.authentication.k8s.io/v1beta1";
    pub const COMMAND: &str = "gke-gcloud-auth-plugin";
    pub const INSTALL_HINT: &str = "Install gke-gcloud-auth-plugin for use with kubectl by following https://cloud.google.com/kubernetes-engine/docs/how-to/cluster-access-for-kubectl#install_plugin";
}

/// RFC1918 ranges granted access to the cluster master by default
pub const RFC1918_BLOCKS: [&str; 3] = ["10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16"];
pub const RFC1918_DISPLAY_NAME: &str = "RFC1918";

/// Name prefix for generated kubeconfig secrets
pub const KUBECONFIG_SECRET_PREFIX: &str = "kubeconfig";
/// Name prefix for generated cluster service accounts
pub const SERVICE_ACCOUNT_PREFIX: &str = "sa-gke";

/// GCP limits on service account ids and cluster names
pub mod limits {
    pub const MIN_ACCOUNT_ID_LEN: usize = 6;
    pub const MAX_ACCOUNT_ID_LEN: usize = 30;
    pub const MAX_CLUSTER_NAME_LEN: usize = 40;
}

/// Prefix length GKE requires for the Autopilot master IPv4 block
pub const MASTER_CIDR_PREFIX_LEN: u8 = 28;
