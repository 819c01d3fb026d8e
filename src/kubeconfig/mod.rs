// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubeconfig document model and composition from cluster attributes.

pub mod composer;
pub mod document;

pub use composer::{compose, render_kubeconfig};
pub use document::Kubeconfig;
