//! Form controller: sample prefill, request building, and rendering of the
//! prediction outcome through a [`FormView`].
//!
//! A submission is split in three steps so frame-driven UIs can run the
//! network call elsewhere:
//! 1. [`FormController::begin_submit`] enters the loading state and builds the request
//! 2. [`PredictionService::predict`] performs the call
//! 3. [`FormController::finish_submit`] renders the outcome and leaves the loading state
//!
//! [`FormController::submit`] runs all three in sequence.

use crate::application::sampler;
use crate::domain::errors::PredictionError;
use crate::domain::features::{FeatureOrder, SamplePayload, SampleRangeTable};
use crate::domain::ports::{FormView, Panel, PredictionService};
use crate::domain::prediction::{PredictionOutcome, PredictionRequest, PredictionResponse};
use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Label of the idle submit control.
pub const SUBMIT_LABEL: &str = "Predict outcome";
/// Label of the submit control while a request is in flight.
pub const BUSY_LABEL: &str = "Predicting...";

/// What a completed submission rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Predicted {
        probability_text: String,
        outcome: PredictionOutcome,
        response: PredictionResponse,
    },
    Failed {
        message: String,
        error: PredictionError,
    },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Predicted { .. })
    }
}

pub struct FormController {
    service: Arc<dyn PredictionService>,
    feature_order: FeatureOrder,
    ranges: SampleRangeTable,
    in_flight: AtomicBool,
}

impl FormController {
    pub fn new(
        service: Arc<dyn PredictionService>,
        feature_order: FeatureOrder,
        ranges: SampleRangeTable,
    ) -> Self {
        Self {
            service,
            feature_order,
            ranges,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn feature_order(&self) -> &FeatureOrder {
        &self.feature_order
    }

    pub fn ranges(&self) -> &SampleRangeTable {
        &self.ranges
    }

    pub fn service(&self) -> Arc<dyn PredictionService> {
        self.service.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn generate_sample(&self) -> SamplePayload {
        sampler::generate_sample(&self.feature_order, &self.ranges)
    }

    /// Fills the form with a fresh random sample. Returns how many fields were written;
    /// features without a matching field are skipped.
    pub fn prefill<V: FormView + ?Sized>(&self, view: &mut V) -> usize {
        let sample = self.generate_sample();
        Self::fill_form(view, &sample)
    }

    /// [`prefill`](Self::prefill) with a caller-supplied RNG.
    pub fn prefill_with<V, R>(&self, view: &mut V, rng: &mut R) -> usize
    where
        V: FormView + ?Sized,
        R: Rng + ?Sized,
    {
        let sample = sampler::generate_sample_with(&self.feature_order, &self.ranges, rng);
        Self::fill_form(view, &sample)
    }

    fn fill_form<V: FormView + ?Sized>(view: &mut V, sample: &SamplePayload) -> usize {
        let mut written = 0;
        for (feature, value) in sample.iter() {
            if view.set_field(feature, &value.to_string()) {
                written += 1;
            } else {
                debug!("Prefill: no form field named '{}', skipping", feature);
            }
        }
        info!("Prefilled {} of {} form fields", written, sample.len());
        written
    }

    /// Enters the loading state and builds the request from the current form.
    ///
    /// Returns `None` without touching the view when a submission is already in flight.
    pub fn begin_submit<V: FormView + ?Sized>(&self, view: &mut V) -> Option<PredictionRequest> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Submission ignored: a prediction request is already in flight");
            return None;
        }

        view.set_submit_control(false, BUSY_LABEL);
        view.set_panel_visible(Panel::Error, false);
        view.set_panel_visible(Panel::Placeholder, false);
        view.set_panel_visible(Panel::Result, false);

        let request = PredictionRequest::from_form_entries(view.field_entries());
        debug!("Built prediction request with {} features", request.len());
        Some(request)
    }

    /// Renders the outcome of a submission and leaves the loading state.
    pub fn finish_submit<V: FormView + ?Sized>(
        &self,
        view: &mut V,
        result: Result<PredictionResponse, PredictionError>,
    ) -> SubmissionOutcome {
        let outcome = match result {
            Ok(response) => {
                let probability_text = response.probability_text();
                let outcome = response.outcome();

                view.set_probability_text(&probability_text);
                view.set_prediction_text(outcome.message());
                view.set_panel_visible(Panel::Result, true);

                info!(
                    "Prediction received: win probability {} ({})",
                    probability_text, outcome
                );
                SubmissionOutcome::Predicted {
                    probability_text,
                    outcome,
                    response,
                }
            }
            Err(error) => {
                let message = error.to_string();

                view.set_error_text(&message);
                view.set_panel_visible(Panel::Error, true);
                view.set_panel_visible(Panel::Placeholder, false);
                view.set_panel_visible(Panel::Result, false);

                warn!("Prediction failed: {}", message);
                SubmissionOutcome::Failed { message, error }
            }
        };

        view.set_submit_control(true, SUBMIT_LABEL);
        self.in_flight.store(false, Ordering::Release);
        outcome
    }

    /// Runs a whole submission against the view. `None` if one was already in flight.
    pub async fn submit<V: FormView + ?Sized>(&self, view: &mut V) -> Option<SubmissionOutcome> {
        let request = self.begin_submit(view)?;
        let result = self.service.predict(&request).await;
        Some(self.finish_submit(view, result))
    }
}
