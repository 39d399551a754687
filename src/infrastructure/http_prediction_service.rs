use crate::config::Config;
use crate::domain::errors::PredictionError;
use crate::domain::ports::PredictionService;
use crate::domain::prediction::{ErrorBody, HealthStatus, PredictionRequest, PredictionResponse};
use crate::infrastructure::http_client_factory::HttpClientFactory;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

/// Prediction service reached over HTTP/JSON.
pub struct HttpPredictionService {
    client: Client,
    predict_url: Url,
    health_url: Url,
}

impl HttpPredictionService {
    pub fn new(client: Client, predict_url: Url, health_url: Url) -> Self {
        Self {
            client,
            predict_url,
            health_url,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client =
            HttpClientFactory::create_client(config.request_timeout, config.connect_timeout);
        Ok(Self::new(client, config.predict_url()?, config.health_url()?))
    }

    fn transport_error(err: reqwest::Error) -> PredictionError {
        PredictionError::Transport {
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError> {
        debug!("POST {} ({} features)", self.predict_url, request.len());

        let response = self
            .client
            .post(self.predict_url.clone())
            .json(request)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();

        // The body is JSON for every status; error replies carry an `error` field.
        let body: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| PredictionError::InvalidBody {
                    reason: e.to_string(),
                })?;

        if !status.is_success() {
            let error_body: ErrorBody = serde_json::from_value(body).unwrap_or_default();
            warn!("Prediction service returned status: {}", status);
            return Err(PredictionError::rejected(status.as_u16(), error_body.error));
        }

        serde_json::from_value(body).map_err(|e| PredictionError::InvalidBody {
            reason: e.to_string(),
        })
    }

    async fn health(&self) -> Result<HealthStatus, PredictionError> {
        info!("Checking prediction service health at {}...", self.health_url);

        let response = self
            .client
            .get(self.health_url.clone())
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictionError::rejected(
                status.as_u16(),
                Some(format!("Health check returned status: {}", status)),
            ));
        }

        let health: HealthStatus =
            response
                .json()
                .await
                .map_err(|e| PredictionError::InvalidBody {
                    reason: e.to_string(),
                })?;

        info!(
            "Prediction service is '{}' with {} features",
            health.status,
            health.features.len()
        );
        Ok(health)
    }
}
