// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

use crate::config::ClusterConfig;
use crate::constants::{limits, SERVICE_ACCOUNT_PREFIX};
use crate::error::{GroundworkError, Result};

/// Service account owned by a cluster stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAccountSpec {
    pub account_id: String,
    pub display_name: String,
    pub description: String,
    pub disabled: bool,
}

impl ServiceAccountSpec {
    /// Derive the account for a cluster: `sa-gke-<cluster>`, enabled, with
    /// the display name matching the account id.
    pub fn for_cluster(config: &ClusterConfig) -> Result<Self> {
        let account_id = format!("{}-{}", SERVICE_ACCOUNT_PREFIX, config.name);
        if account_id.len() < limits::MIN_ACCOUNT_ID_LEN
            || account_id.len() > limits::MAX_ACCOUNT_ID_LEN
        {
            return Err(GroundworkError::InvalidConfig(format!(
                "Service account id '{}' must be {}-{} characters",
                account_id,
                limits::MIN_ACCOUNT_ID_LEN,
                limits::MAX_ACCOUNT_ID_LEN
            )));
        }

        Ok(ServiceAccountSpec {
            display_name: account_id.clone(),
            description: format!("Service account for {} cluster", config.name),
            disabled: false,
            account_id,
        })
    }
}
