//! Prediction service connection settings parsed from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Prediction API environment configuration
#[derive(Debug, Clone)]
pub struct ApiEnvConfig {
    pub base_url: Url,
    pub predict_path: String,
    pub health_path: String,
    /// `None` leaves the HTTP client's default (no overall timeout).
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Duration,
    pub discovery_timeout: Duration,
}

impl ApiEnvConfig {
    pub fn from_env() -> Result<Self> {
        let base_url_str =
            env::var("PREDICTOR_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
        let base_url = Url::parse(&base_url_str)
            .with_context(|| format!("Invalid PREDICTOR_BASE_URL: {}", base_url_str))?;

        let predict_path =
            env::var("PREDICTOR_PREDICT_PATH").unwrap_or_else(|_| "/predict".to_string());
        let health_path =
            env::var("PREDICTOR_HEALTH_PATH").unwrap_or_else(|_| "/health".to_string());

        let request_timeout = match env::var("PREDICTOR_REQUEST_TIMEOUT_SECS") {
            Ok(v) if !v.trim().is_empty() => Some(Duration::from_secs(
                v.trim()
                    .parse::<u64>()
                    .context("Failed to parse PREDICTOR_REQUEST_TIMEOUT_SECS")?,
            )),
            _ => None,
        };

        let connect_timeout = Duration::from_secs(
            env::var("PREDICTOR_CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u64>()
                .context("Failed to parse PREDICTOR_CONNECT_TIMEOUT_SECS")?,
        );

        let discovery_timeout = Duration::from_secs(
            env::var("FEATURE_DISCOVERY_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u64>()
                .context("Failed to parse FEATURE_DISCOVERY_TIMEOUT_SECS")?,
        );

        Ok(Self {
            base_url,
            predict_path,
            health_path,
            request_timeout,
            connect_timeout,
            discovery_timeout,
        })
    }
}

/// Resolves `path` below `base`, keeping any path prefix `base` already has.
///
/// `http://host/api` + `/predict` gives `http://host/api/predict`.
pub fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
        .with_context(|| format!("Invalid endpoint path: {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_on_bare_host() {
        let base = Url::parse("http://127.0.0.1:8000").unwrap();
        assert_eq!(
            endpoint_url(&base, "/predict").unwrap().as_str(),
            "http://127.0.0.1:8000/predict"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_prefix() {
        let base = Url::parse("https://models.example.com/lol").unwrap();
        assert_eq!(
            endpoint_url(&base, "/health").unwrap().as_str(),
            "https://models.example.com/lol/health"
        );

        let base = Url::parse("https://models.example.com/lol/").unwrap();
        assert_eq!(
            endpoint_url(&base, "predict").unwrap().as_str(),
            "https://models.example.com/lol/predict"
        );
    }
}
