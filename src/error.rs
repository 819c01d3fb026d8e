// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroundworkError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid CIDR block: {0}")]
    InvalidCidr(String),

    #[error("Unknown release channel: {0}")]
    UnknownReleaseChannel(String),

    #[error("Invalid resource self-link: {0}")]
    InvalidSelfLink(String),

    #[error("Failed to render kubeconfig: {0}")]
    Render(#[from] serde_yaml::Error),

    #[error("Failed to encode resource manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GroundworkError>;
