use crate::application::form_controller::{FormController, SubmissionOutcome};
use crate::domain::errors::PredictionError;
use crate::domain::ports::FormView;
use crate::domain::prediction::PredictionResponse;
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::warn;

type PredictionResult = Result<PredictionResponse, PredictionError>;

/// Unified event type for the User Interface
#[derive(Clone, Debug)]
pub enum ClientEvent {
    Log(String),
    Completed(SubmissionOutcome),
}

/// Drives the form controller from a frame-based UI.
/// Network calls run on a background tokio runtime; their results are picked
/// up by [`PredictionClient::poll_next`] on the UI thread.
pub struct PredictionClient {
    controller: Arc<FormController>,
    runtime: Handle,
    result_tx: Sender<PredictionResult>,
    result_rx: Receiver<PredictionResult>,
    log_rx: Receiver<String>,
}

impl PredictionClient {
    pub fn new(controller: Arc<FormController>, runtime: Handle, log_rx: Receiver<String>) -> Self {
        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        Self {
            controller,
            runtime,
            result_tx,
            result_rx,
            log_rx,
        }
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn is_submitting(&self) -> bool {
        self.controller.is_submitting()
    }

    pub fn prefill<V: FormView + ?Sized>(&self, view: &mut V) -> usize {
        self.controller.prefill(view)
    }

    /// Starts a submission in the background. Returns `false` if one is already running.
    pub fn submit<V: FormView + ?Sized>(&self, view: &mut V) -> bool {
        let Some(request) = self.controller.begin_submit(view) else {
            return false;
        };

        let service = self.controller.service();
        let tx = self.result_tx.clone();

        let task = self
            .runtime
            .spawn(async move { service.predict(&request).await });

        // A panicking request task must still release the loading state.
        self.runtime.spawn(async move {
            let result = match task.await {
                Ok(result) => result,
                Err(e) => Err(PredictionError::Transport {
                    reason: format!("prediction task aborted: {}", e),
                }),
            };
            if tx.send(result).is_err() {
                warn!("Prediction result dropped: UI channel closed");
            }
        });

        true
    }

    /// Poll for the next available event.
    /// Non-blocking; a finished request is rendered into `view` before being returned.
    pub fn poll_next<V: FormView + ?Sized>(&self, view: &mut V) -> Option<ClientEvent> {
        // 1. Completed requests first so the busy state clears promptly
        if let Ok(result) = self.result_rx.try_recv() {
            let outcome = self.controller.finish_submit(view, result);
            return Some(ClientEvent::Completed(outcome));
        }

        // 2. Logs
        if let Ok(msg) = self.log_rx.try_recv() {
            return Some(ClientEvent::Log(msg));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::{FeatureOrder, SampleRangeTable};
    use crate::domain::ports::Panel;
    use crate::infrastructure::mock::MockPredictionService;
    use crate::interfaces::view_models::form_view_model::FormViewModel;
    use std::time::{Duration, Instant};

    fn poll_until_completed(
        client: &PredictionClient,
        view: &mut FormViewModel,
    ) -> SubmissionOutcome {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match client.poll_next(view) {
                Some(ClientEvent::Completed(outcome)) => return outcome,
                Some(ClientEvent::Log(_)) => continue,
                None => {
                    assert!(Instant::now() < deadline, "timed out waiting for result");
                    std::thread::sleep(Duration::from_millis(10));
                }
            }
        }
    }

    #[test]
    fn test_background_submission_round_trip() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let service = Arc::new(MockPredictionService::new());
        service.push_success(0.2, 0);
        let controller = Arc::new(FormController::new(
            service,
            FeatureOrder::default(),
            SampleRangeTable::default(),
        ));
        let (_log_tx, log_rx) = crossbeam_channel::unbounded();
        let client = PredictionClient::new(controller, rt.handle().clone(), log_rx);
        let mut view = FormViewModel::new(client.controller().feature_order());

        assert!(client.submit(&mut view));
        assert!(!client.submit(&mut view));
        assert!(!view.submit_enabled());

        let outcome = poll_until_completed(&client, &mut view);

        assert!(outcome.is_success());
        assert_eq!(view.probability_text(), "20.0%");
        assert!(view.is_visible(Panel::Result));
        assert!(view.submit_enabled());
        assert!(!client.is_submitting());
    }

    #[test]
    fn test_log_lines_are_forwarded() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let controller = Arc::new(FormController::new(
            Arc::new(MockPredictionService::new()),
            FeatureOrder::default(),
            SampleRangeTable::default(),
        ));
        let (log_tx, log_rx) = crossbeam_channel::unbounded();
        let client = PredictionClient::new(controller, rt.handle().clone(), log_rx);
        let mut view = FormViewModel::new(client.controller().feature_order());

        log_tx.send("INFO hello".to_string()).unwrap();

        match client.poll_next(&mut view) {
            Some(ClientEvent::Log(line)) => assert_eq!(line, "INFO hello"),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(client.poll_next(&mut view).is_none());
    }
}
