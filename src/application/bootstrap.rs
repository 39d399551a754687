use crate::application::form_controller::FormController;
use crate::config::Config;
use crate::domain::features::FeatureOrder;
use crate::domain::ports::PredictionService;
use crate::infrastructure::HttpPredictionService;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Wires configuration, HTTP service and feature order into a controller.
pub struct Bootstrap;

impl Bootstrap {
    pub async fn init(config: &Config) -> Result<FormController> {
        let service: Arc<dyn PredictionService> = Arc::new(
            HttpPredictionService::from_config(config)
                .context("Failed to build prediction service")?,
        );

        let feature_order = match &config.feature_order {
            Some(order) => {
                info!("Using configured feature order ({} features)", order.len());
                order.clone()
            }
            None => discover_feature_order(service.as_ref(), config.discovery_timeout).await,
        };

        Ok(FormController::new(
            service,
            feature_order,
            config.sample_ranges(),
        ))
    }
}

/// Asks the service for its feature order. Falls back to the built-in order
/// when the service is unreachable, slow, or reports no features.
pub async fn discover_feature_order(
    service: &dyn PredictionService,
    timeout: Duration,
) -> FeatureOrder {
    match tokio::time::timeout(timeout, service.health()).await {
        Ok(Ok(health)) => {
            let order = FeatureOrder::new(health.features);
            if order.is_empty() {
                warn!("Service reported no features. Falling back to built-in order.");
                FeatureOrder::default()
            } else {
                info!("Discovered {} features from service", order.len());
                order
            }
        }
        Ok(Err(e)) => {
            warn!("Feature discovery failed: {}. Falling back to built-in order.", e);
            FeatureOrder::default()
        }
        Err(_) => {
            warn!(
                "Timeout waiting for feature order ({:?}). Falling back to built-in order.",
                timeout
            );
            FeatureOrder::default()
        }
    }
}
