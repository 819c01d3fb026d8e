// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed resource specifications derived from the cluster configuration.

pub mod cluster;
pub mod secret;
pub mod service_account;

pub use cluster::{ClusterResourceSpec, PrivateClusterSpec};
pub use secret::{SecretSpec, SecretVersionSpec};
pub use service_account::ServiceAccountSpec;
