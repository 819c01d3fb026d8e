// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The Autopilot cluster resource and its Compute Engine self-links.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{ClusterConfig, ReleaseChannel};
use crate::constants::{COMPUTE_API_BASE, RFC1918_BLOCKS, RFC1918_DISPLAY_NAME};
use crate::error::{GroundworkError, Result};

/// Argument set for a GKE Autopilot cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterResourceSpec {
    pub name: String,
    pub network: String,
    pub subnetwork: String,
    pub location: String,
    pub release_channel: ReleaseChannel,
    pub enable_autopilot: bool,
    pub enable_cilium_clusterwide_network_policy: bool,
    pub enable_fqdn_network_policy: bool,
    pub enable_l4_ilb_subsetting: bool,
    pub enable_multi_networking: bool,
    pub deletion_protection: bool,
    pub private_cluster: PrivateClusterSpec,
    pub master_authorized_networks: Vec<CidrBlock>,
    pub ip_allocation: IpAllocationSpec,
    pub addons: AddonsSpec,
}

/// Private control plane settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateClusterSpec {
    pub enable_private_nodes: bool,
    pub enable_private_endpoint: bool,
    pub master_ipv4_cidr_block: String,
}

/// A CIDR range granted access to the cluster master
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CidrBlock {
    pub cidr_block: String,
    pub display_name: String,
}

/// Pod and service secondary range assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpAllocationSpec {
    pub stack_type: StackType,
    pub cluster_secondary_range_name: String,
    pub services_secondary_range_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackType {
    #[default]
    #[serde(rename = "IPV4")]
    Ipv4,
    #[serde(rename = "IPV4_IPV6")]
    Ipv4Ipv6,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddonsSpec {
    pub http_load_balancing: bool,
}

/// Self-link for a global VPC network
pub fn network_self_link(project: &str, network: &str) -> String {
    format!(
        "{}/projects/{}/global/networks/{}",
        COMPUTE_API_BASE, project, network
    )
}

/// Self-link for a regional subnetwork
pub fn subnetwork_self_link(project: &str, region: &str, subnetwork: &str) -> String {
    format!(
        "{}/projects/{}/regions/{}/subnetworks/{}",
        COMPUTE_API_BASE, project, region, subnetwork
    )
}

impl ClusterResourceSpec {
    /// Expand the configuration into the full cluster argument set. Network
    /// and subnetwork names become Compute Engine self-links, with the
    /// subnetwork region taken from the configured location.
    pub fn from_config(config: &ClusterConfig) -> Result<Self> {
        let network = network_self_link(&config.project, &config.network);
        let subnetwork =
            subnetwork_self_link(&config.project, &config.location, &config.subnetwork);
        for link in [&network, &subnetwork] {
            Url::parse(link)
                .map_err(|e| GroundworkError::InvalidSelfLink(format!("{}: {}", link, e)))?;
        }

        Ok(ClusterResourceSpec {
            name: config.name.clone(),
            network,
            subnetwork,
            location: config.location.clone(),
            release_channel: config.release_channel,
            enable_autopilot: true,
            enable_cilium_clusterwide_network_policy: true,
            enable_fqdn_network_policy: true,
            enable_l4_ilb_subsetting: true,
            enable_multi_networking: true,
            deletion_protection: false,
            private_cluster: PrivateClusterSpec {
                enable_private_nodes: true,
                enable_private_endpoint: true,
                master_ipv4_cidr_block: config.network_policy.master_ipv4_cidr_block.clone(),
            },
            master_authorized_networks: RFC1918_BLOCKS
                .iter()
                .map(|block| CidrBlock {
                    cidr_block: block.to_string(),
                    display_name: RFC1918_DISPLAY_NAME.to_string(),
                })
                .collect(),
            ip_allocation: IpAllocationSpec {
                stack_type: StackType::Ipv4,
                cluster_secondary_range_name: config.network_policy.pod_range_name.clone(),
                services_secondary_range_name: config.network_policy.service_range_name.clone(),
            },
            addons: AddonsSpec {
                http_load_balancing: true,
            },
        })
    }
}
