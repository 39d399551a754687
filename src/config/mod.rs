//! Configuration module for winpredict.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: API connection and Form.

mod api_config;
mod form_config;

pub use api_config::{ApiEnvConfig, endpoint_url};
pub use form_config::{FormEnvConfig, parse_feature_ranges};

use crate::domain::features::{FeatureOrder, SampleRange, SampleRangeTable};
use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

/// Main application configuration.
///
/// Aggregates the sub-configs into one flat struct.
#[derive(Debug, Clone)]
pub struct Config {
    // API (from ApiEnvConfig)
    pub base_url: Url,
    pub predict_path: String,
    pub health_path: String,
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Duration,
    pub discovery_timeout: Duration,

    // Form (from FormEnvConfig)
    pub feature_order: Option<FeatureOrder>,
    pub range_overrides: Vec<(String, SampleRange)>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api = ApiEnvConfig::from_env().context("Failed to load API config")?;
        let form = FormEnvConfig::from_env().context("Failed to load form config")?;

        Ok(Self {
            base_url: api.base_url,
            predict_path: api.predict_path,
            health_path: api.health_path,
            request_timeout: api.request_timeout,
            connect_timeout: api.connect_timeout,
            discovery_timeout: api.discovery_timeout,

            feature_order: form.feature_order,
            range_overrides: form.range_overrides,
        })
    }

    pub fn predict_url(&self) -> Result<Url> {
        endpoint_url(&self.base_url, &self.predict_path)
    }

    pub fn health_url(&self) -> Result<Url> {
        endpoint_url(&self.base_url, &self.health_path)
    }

    /// Built-in ranges with the configured overrides applied.
    pub fn sample_ranges(&self) -> SampleRangeTable {
        SampleRangeTable::default().with_overrides(self.range_overrides.iter().cloned())
    }
}
