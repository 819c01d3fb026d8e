// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deterministic kubeconfig composition from deferred cluster attributes.

use tracing::error;

use crate::deferred::{zip3, Deferred};
use crate::error::Result;
use crate::kubeconfig::document::Kubeconfig;
use crate::provider::ClusterAttributes;

/// Render the kubeconfig document for a realized cluster. Pure and
/// synchronous; the same inputs always produce the same bytes.
pub fn render_kubeconfig(
    ca_certificate: &str,
    endpoint: &str,
    cluster_name: &str,
) -> Result<String> {
    let server = format!("https://{}", endpoint);
    let document = Kubeconfig::for_single_cluster(cluster_name, &server, ca_certificate);
    Ok(serde_yaml::to_string(&document)?)
}

/// Compose the kubeconfig from the cluster's deferred attributes.
///
/// The render runs exactly once, after all three attributes have resolved.
/// If any attribute never resolves, the result never resolves; a render
/// failure is logged and likewise propagates as non-completion, never as an
/// error payload.
pub fn compose(attributes: ClusterAttributes) -> Deferred<String> {
    zip3(
        attributes.ca_certificate,
        attributes.endpoint,
        attributes.name,
    )
    .and_then(|(ca, endpoint, name)| match render_kubeconfig(&ca, &endpoint, &name) {
        Ok(document) => Some(document),
        Err(e) => {
            error!("Failed to render kubeconfig for cluster {}: {}", name, e);
            None
        }
    })
}
