// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Dry-run engine that validates and prints a plan without cloud I/O.
//!
//! Attributes knowable at plan time resolve immediately; server-assigned
//! attributes (CA certificate, endpoint, secret version name) stay pending,
//! so anything derived from them is reported as pending too.

use serde::Serialize;
use serde_json::json;
use std::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::deferred::Deferred;
use crate::error::Result;
use crate::provider::{
    ClusterAttributes, ClusterProvider, SecretHandle, SecretStore, SecretVersionHandle,
    ServiceAccountHandle,
};
use crate::resources::{ClusterResourceSpec, SecretSpec, SecretVersionSpec, ServiceAccountSpec};

/// One declared resource in the plan
#[derive(Debug, Clone, Serialize)]
pub struct PlannedStep {
    pub kind: String,
    pub name: String,
    pub manifest: serde_json::Value,
}

pub struct PreviewEngine {
    project: String,
    steps: Mutex<Vec<PlannedStep>>,
}

impl PreviewEngine {
    pub fn new(project: impl Into<String>) -> Self {
        PreviewEngine {
            project: project.into(),
            steps: Mutex::new(Vec::new()),
        }
    }

    /// Render the recorded declarations as a YAML stream
    pub fn render_plan(&self) -> Result<String> {
        let steps = self.steps.lock().unwrap();
        Ok(serde_yaml::to_string(&*steps)?)
    }

    pub fn steps(&self) -> Vec<PlannedStep> {
        self.steps.lock().unwrap().clone()
    }

    fn record(&self, kind: &str, name: &str, manifest: serde_json::Value) {
        self.steps.lock().unwrap().push(PlannedStep {
            kind: kind.to_string(),
            name: name.to_string(),
            manifest,
        });
    }
}

impl ClusterProvider for PreviewEngine {
    #[instrument(skip(self, spec), fields(account = %spec.account_id))]
    async fn create_service_account(
        &self,
        spec: &ServiceAccountSpec,
    ) -> Result<ServiceAccountHandle> {
        self.record(
            "gcp:serviceaccount:Account",
            &spec.account_id,
            serde_json::to_value(spec)?,
        );
        info!("Planned service account {}", spec.account_id);

        Ok(ServiceAccountHandle {
            account_id: Deferred::resolved(spec.account_id.clone()),
            email: Deferred::resolved(format!(
                "{}@{}.iam.gserviceaccount.com",
                spec.account_id, self.project
            )),
        })
    }

    #[instrument(skip(self, spec), fields(cluster = %spec.name))]
    async fn create_cluster(&self, spec: &ClusterResourceSpec) -> Result<ClusterAttributes> {
        self.record("gcp:container:Cluster", &spec.name, serde_json::to_value(spec)?);
        info!("Planned Autopilot cluster {}", spec.name);

        // The control plane certificate and endpoint only exist after an apply
        Ok(ClusterAttributes {
            ca_certificate: Deferred::never(),
            endpoint: Deferred::never(),
            name: Deferred::resolved(spec.name.clone()),
        })
    }
}

impl SecretStore for PreviewEngine {
    #[instrument(skip(self, spec), fields(secret = %spec.secret_id))]
    async fn create_secret(&self, spec: &SecretSpec) -> Result<SecretHandle> {
        self.record(
            "gcp:secretmanager:Secret",
            &spec.secret_id,
            serde_json::to_value(spec)?,
        );
        info!("Planned secret {}", spec.secret_id);

        Ok(SecretHandle {
            id: Deferred::resolved(format!(
                "projects/{}/secrets/{}",
                self.project, spec.secret_id
            )),
            name: Deferred::resolved(spec.secret_id.clone()),
        })
    }

    #[instrument(skip(self, spec))]
    async fn create_secret_version(&self, spec: SecretVersionSpec) -> Result<SecretVersionHandle> {
        let secret = spec
            .secret
            .try_get()
            .unwrap_or_else(|| "<pending>".to_string());

        // Never record the payload itself, only that one will be stored
        self.record(
            "gcp:secretmanager:SecretVersion",
            &secret,
            json!({
                "secret": secret,
                "enabled": spec.enabled,
                "data": "[secret payload]",
            }),
        );
        info!("Planned secret version for {}", secret);

        tokio::spawn(async move {
            if let Some(payload) = spec.data.wait().await {
                debug!("Secret payload resolved ({} bytes)", payload.len());
            }
        });

        Ok(SecretVersionHandle {
            name: Deferred::never(),
        })
    }
}
