// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Seams for the external provisioning collaborators.
//!
//! The engine that realizes resources lives outside this crate; these traits
//! are the contract it implements. Handles carry deferred identifiers, so a
//! declaration returns immediately and attribute values arrive whenever the
//! engine delivers them.

use crate::deferred::Deferred;
use crate::error::Result;
use crate::resources::{ClusterResourceSpec, SecretSpec, SecretVersionSpec, ServiceAccountSpec};

/// The attributes a realized cluster reports back, each resolved
/// independently by the provisioning engine.
#[derive(Debug, Clone)]
pub struct ClusterAttributes {
    pub ca_certificate: Deferred<String>,
    pub endpoint: Deferred<String>,
    pub name: Deferred<String>,
}

impl ClusterAttributes {
    /// Attributes that are already known, for fully-applied engines and tests.
    pub fn resolved(ca_certificate: &str, endpoint: &str, name: &str) -> Self {
        ClusterAttributes {
            ca_certificate: Deferred::resolved(ca_certificate.to_string()),
            endpoint: Deferred::resolved(endpoint.to_string()),
            name: Deferred::resolved(name.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceAccountHandle {
    pub account_id: Deferred<String>,
    pub email: Deferred<String>,
}

#[derive(Debug, Clone)]
pub struct SecretHandle {
    pub id: Deferred<String>,
    pub name: Deferred<String>,
}

#[derive(Debug, Clone)]
pub struct SecretVersionHandle {
    pub name: Deferred<String>,
}

/// Upstream collaborator realizing cluster-side resources
#[allow(async_fn_in_trait)]
pub trait ClusterProvider {
    async fn create_service_account(
        &self,
        spec: &ServiceAccountSpec,
    ) -> Result<ServiceAccountHandle>;

    async fn create_cluster(&self, spec: &ClusterResourceSpec) -> Result<ClusterAttributes>;
}

/// Downstream collaborator persisting the kubeconfig payload
#[allow(async_fn_in_trait)]
pub trait SecretStore {
    async fn create_secret(&self, spec: &SecretSpec) -> Result<SecretHandle>;

    async fn create_secret_version(&self, spec: SecretVersionSpec) -> Result<SecretVersionHandle>;
}
