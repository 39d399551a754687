use crate::domain::errors::PredictionError;
use crate::domain::ports::PredictionService;
use crate::domain::prediction::{HealthStatus, PredictionRequest, PredictionResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::info;

/// Prediction service answering from a queue of scripted replies.
///
/// An empty queue answers with a transport error.
pub struct MockPredictionService {
    replies: Mutex<VecDeque<Result<PredictionResponse, PredictionError>>>,
    requests: Mutex<Vec<PredictionRequest>>,
    features: Vec<String>,
}

impl MockPredictionService {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            features: Vec::new(),
        }
    }

    /// Mock whose health endpoint reports `features`.
    pub fn with_features<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            features: features.into_iter().map(Into::into).collect(),
            ..Self::new()
        }
    }

    pub fn push_reply(&self, reply: Result<PredictionResponse, PredictionError>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }

    pub fn push_success(&self, win_probability: f64, prediction: i64) {
        self.push_reply(Ok(PredictionResponse {
            win_probability,
            prediction,
            threshold: Some(0.5),
            metadata: None,
        }));
    }

    pub fn push_error(&self, error: PredictionError) {
        self.push_reply(Err(error));
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<PredictionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Default for MockPredictionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PredictionService for MockPredictionService {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let reply = self
            .replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front());

        match reply {
            Some(reply) => reply,
            None => {
                info!("MockPredictionService: no scripted reply left");
                Err(PredictionError::Transport {
                    reason: "mock service has no scripted reply".to_string(),
                })
            }
        }
    }

    async fn health(&self) -> Result<HealthStatus, PredictionError> {
        if self.features.is_empty() {
            return Err(PredictionError::Transport {
                reason: "mock service has no health data".to_string(),
            });
        }
        Ok(HealthStatus {
            status: "ok".to_string(),
            features: self.features.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replies_are_served_in_order() {
        let mock = MockPredictionService::new();
        mock.push_success(0.8, 1);
        mock.push_error(PredictionError::rejected(400, Some("bad input".to_string())));
        let request = PredictionRequest::from_form_entries(vec![("kills", "4")]);

        let first = tokio_test::block_on(mock.predict(&request));
        let second = tokio_test::block_on(mock.predict(&request));
        let third = tokio_test::block_on(mock.predict(&request));

        assert_eq!(first.map(|r| r.prediction), Ok(1));
        assert_eq!(second.map_err(|e| e.to_string()), Err("bad input".to_string()));
        assert!(matches!(third, Err(PredictionError::Transport { .. })));
        assert_eq!(mock.requests().len(), 3);
    }

    #[test]
    fn test_health_without_features_fails() {
        let mock = MockPredictionService::new();
        assert!(tokio_test::block_on(mock.health()).is_err());

        let mock = MockPredictionService::with_features(vec!["kills"]);
        let health = tokio_test::block_on(mock.health()).unwrap();
        assert_eq!(health.features, vec!["kills"]);
    }
}
