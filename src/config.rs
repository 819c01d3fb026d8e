// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deployment parameters, loaded and validated once at startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::net::Ipv4Addr;
use std::path::Path;
use std::str::FromStr;

use crate::constants::{limits, MASTER_CIDR_PREFIX_LEN};
use crate::error::GroundworkError;

/// Deployment parameters for a single cluster stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub name: String,
    pub project: String,
    pub network: String,
    pub subnetwork: String,
    pub location: String,
    #[serde(default)]
    pub release_channel: ReleaseChannel,
    pub network_policy: NetworkPolicyConfig,
}

/// Private networking parameters for the cluster control plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkPolicyConfig {
    pub master_ipv4_cidr_block: String,
    pub pod_range_name: String,
    pub service_range_name: String,
}

/// GKE upgrade cadence, serialized with the wire strings GCP expects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseChannel {
    Rapid,
    Regular,
    #[default]
    Stable,
}

impl ReleaseChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseChannel::Rapid => "RAPID",
            ReleaseChannel::Regular => "REGULAR",
            ReleaseChannel::Stable => "STABLE",
        }
    }
}

impl fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseChannel {
    type Err = GroundworkError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RAPID" => Ok(ReleaseChannel::Rapid),
            "REGULAR" => Ok(ReleaseChannel::Regular),
            "STABLE" => Ok(ReleaseChannel::Stable),
            _ => Err(GroundworkError::UnknownReleaseChannel(s.to_string())),
        }
    }
}

impl ClusterConfig {
    /// Load configuration from the file named by GROUNDWORK_CONFIG, or from
    /// GROUNDWORK_* environment variables when no file is configured.
    pub fn load() -> Result<Self> {
        let config = match env::var("GROUNDWORK_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let release_channel = match env::var("GROUNDWORK_RELEASE_CHANNEL") {
            Ok(value) => value.parse()?,
            Err(_) => ReleaseChannel::default(),
        };

        Ok(ClusterConfig {
            name: env::var("GROUNDWORK_CLUSTER_NAME")
                .context("GROUNDWORK_CLUSTER_NAME environment variable not set")?,
            project: env::var("GROUNDWORK_PROJECT")
                .context("GROUNDWORK_PROJECT environment variable not set")?,
            network: env::var("GROUNDWORK_NETWORK")
                .context("GROUNDWORK_NETWORK environment variable not set")?,
            subnetwork: env::var("GROUNDWORK_SUBNETWORK")
                .context("GROUNDWORK_SUBNETWORK environment variable not set")?,
            location: env::var("GROUNDWORK_LOCATION")
                .context("GROUNDWORK_LOCATION environment variable not set")?,
            release_channel,
            network_policy: NetworkPolicyConfig {
                master_ipv4_cidr_block: env::var("GROUNDWORK_MASTER_CIDR")
                    .context("GROUNDWORK_MASTER_CIDR environment variable not set")?,
                pod_range_name: env::var("GROUNDWORK_POD_RANGE")
                    .context("GROUNDWORK_POD_RANGE environment variable not set")?,
                service_range_name: env::var("GROUNDWORK_SERVICE_RANGE")
                    .context("GROUNDWORK_SERVICE_RANGE environment variable not set")?,
            },
        })
    }

    /// Check all parameters against the constraints GKE enforces server-side
    pub fn validate(&self) -> crate::error::Result<()> {
        validate_cluster_name(&self.name)?;
        for (field, value) in [
            ("project", &self.project),
            ("network", &self.network),
            ("subnetwork", &self.subnetwork),
            ("location", &self.location),
            ("network_policy.pod_range_name", &self.network_policy.pod_range_name),
            (
                "network_policy.service_range_name",
                &self.network_policy.service_range_name,
            ),
        ] {
            if value.is_empty() {
                return Err(GroundworkError::InvalidConfig(format!(
                    "{} must not be empty",
                    field
                )));
            }
        }
        validate_master_cidr(&self.network_policy.master_ipv4_cidr_block)
    }
}

/// Cluster names follow RFC1035 label rules, capped at 40 characters
fn validate_cluster_name(name: &str) -> crate::error::Result<()> {
    if name.is_empty() || name.len() > limits::MAX_CLUSTER_NAME_LEN {
        return Err(GroundworkError::InvalidConfig(format!(
            "Cluster name '{}' must be 1-{} characters",
            name,
            limits::MAX_CLUSTER_NAME_LEN
        )));
    }
    if !name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
        return Err(GroundworkError::InvalidConfig(format!(
            "Cluster name '{}' must start with a lowercase letter",
            name
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(GroundworkError::InvalidConfig(format!(
            "Cluster name '{}' may only contain lowercase letters, digits and dashes",
            name
        )));
    }
    if name.ends_with('-') {
        return Err(GroundworkError::InvalidConfig(format!(
            "Cluster name '{}' must not end with a dash",
            name
        )));
    }
    Ok(())
}

/// The Autopilot control plane block must be an aligned /28 IPv4 network
fn validate_master_cidr(cidr: &str) -> crate::error::Result<()> {
    let (addr, prefix) = cidr.split_once('/').ok_or_else(|| {
        GroundworkError::InvalidCidr(format!("{}: expected <address>/<prefix>", cidr))
    })?;

    let addr: Ipv4Addr = addr
        .parse()
        .map_err(|_| GroundworkError::InvalidCidr(format!("{}: invalid IPv4 address", cidr)))?;
    let prefix: u8 = prefix
        .parse()
        .map_err(|_| GroundworkError::InvalidCidr(format!("{}: invalid prefix length", cidr)))?;

    if prefix != MASTER_CIDR_PREFIX_LEN {
        return Err(GroundworkError::InvalidCidr(format!(
            "{}: master block must be a /{}",
            cidr, MASTER_CIDR_PREFIX_LEN
        )));
    }

    let host_mask = (1u32 << (32 - MASTER_CIDR_PREFIX_LEN)) - 1;
    if u32::from(addr) & host_mask != 0 {
        return Err(GroundworkError::InvalidCidr(format!(
            "{}: address has bits set below the /{} boundary",
            cidr, MASTER_CIDR_PREFIX_LEN
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config() -> ClusterConfig {
        ClusterConfig {
            name: "autopilot-mgmt-sbx".to_string(),
            project: "conro-sbx".to_string(),
            network: "conro-sbx".to_string(),
            subnetwork: "cnr-sbx-sub".to_string(),
            location: "europe-west1".to_string(),
            release_channel: ReleaseChannel::Stable,
            network_policy: NetworkPolicyConfig {
                master_ipv4_cidr_block: "10.4.0.0/28".to_string(),
                pod_range_name: "cnr-sbx1-pod-sub-c2".to_string(),
                service_range_name: "cnr-sbx1-svc-sub-c2".to_string(),
            },
        }
    }

    #[test]
    fn test_validate_accepts_valid_config() {
        assert!(make_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_project() {
        let mut config = make_config();
        config.project = String::new();
        assert!(matches!(
            config.validate(),
            Err(GroundworkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_uppercase_name() {
        let mut config = make_config();
        config.name = "Autopilot".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_name_starting_with_digit() {
        let mut config = make_config();
        config.name = "1cluster".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_name_ending_with_dash() {
        let mut config = make_config();
        config.name = "cluster-".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overlong_name() {
        let mut config = make_config();
        config.name = "a".repeat(41);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_master_prefix() {
        let mut config = make_config();
        config.network_policy.master_ipv4_cidr_block = "10.4.0.0/24".to_string();
        assert!(matches!(
            config.validate(),
            Err(GroundworkError::InvalidCidr(_))
        ));
    }

    #[test]
    fn test_validate_rejects_unaligned_master_block() {
        let mut config = make_config();
        config.network_policy.master_ipv4_cidr_block = "10.4.0.8/28".to_string();
        assert!(matches!(
            config.validate(),
            Err(GroundworkError::InvalidCidr(_))
        ));
    }

    #[test]
    fn test_validate_rejects_garbage_cidr() {
        let mut config = make_config();
        config.network_policy.master_ipv4_cidr_block = "not-a-cidr".to_string();
        assert!(matches!(
            config.validate(),
            Err(GroundworkError::InvalidCidr(_))
        ));
    }

    #[test]
    fn test_config_parses_from_yaml() {
        let yaml = r#"
name: autopilot-mgmt-sbx
project: conro-sbx
network: conro-sbx
subnetwork: cnr-sbx-sub
location: europe-west1
release_channel: STABLE
network_policy:
  master_ipv4_cidr_block: 10.4.0.0/28
  pod_range_name: cnr-sbx1-pod-sub-c2
  service_range_name: cnr-sbx1-svc-sub-c2
"#;
        let config: ClusterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config, make_config());
    }

    #[test]
    fn test_release_channel_defaults_to_stable() {
        let yaml = r#"
name: autopilot-mgmt-sbx
project: conro-sbx
network: conro-sbx
subnetwork: cnr-sbx-sub
location: europe-west1
network_policy:
  master_ipv4_cidr_block: 10.4.0.0/28
  pod_range_name: pods
  service_range_name: services
"#;
        let config: ClusterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.release_channel, ReleaseChannel::Stable);
    }

    #[test]
    fn test_release_channel_from_str_is_case_insensitive() {
        assert_eq!(
            "stable".parse::<ReleaseChannel>().unwrap(),
            ReleaseChannel::Stable
        );
        assert_eq!(
            "Rapid".parse::<ReleaseChannel>().unwrap(),
            ReleaseChannel::Rapid
        );
    }

    #[test]
    fn test_release_channel_from_str_rejects_unknown() {
        assert!(matches!(
            "weekly".parse::<ReleaseChannel>(),
            Err(GroundworkError::UnknownReleaseChannel(_))
        ));
    }

    #[test]
    fn test_release_channel_wire_strings() {
        assert_eq!(ReleaseChannel::Stable.as_str(), "STABLE");
        assert_eq!(ReleaseChannel::Regular.to_string(), "REGULAR");
    }

    #[test]
    fn test_from_env_reads_all_variables() {
        env::set_var("GROUNDWORK_CLUSTER_NAME", "autopilot-mgmt-sbx");
        env::set_var("GROUNDWORK_PROJECT", "conro-sbx");
        env::set_var("GROUNDWORK_NETWORK", "conro-sbx");
        env::set_var("GROUNDWORK_SUBNETWORK", "cnr-sbx-sub");
        env::set_var("GROUNDWORK_LOCATION", "europe-west1");
        env::set_var("GROUNDWORK_MASTER_CIDR", "10.4.0.0/28");
        env::set_var("GROUNDWORK_POD_RANGE", "cnr-sbx1-pod-sub-c2");
        env::set_var("GROUNDWORK_SERVICE_RANGE", "cnr-sbx1-svc-sub-c2");

        let config = ClusterConfig::from_env().unwrap();
        assert_eq!(config, make_config());
    }
}
