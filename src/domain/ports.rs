use crate::domain::errors::PredictionError;
use crate::domain::prediction::{HealthStatus, PredictionRequest, PredictionResponse};
use async_trait::async_trait;

#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Sends one prediction request. No retries.
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError>;

    /// Queries service health and the feature order the model expects.
    async fn health(&self) -> Result<HealthStatus, PredictionError>;
}

/// One of the three mutually exclusive result panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Placeholder,
    Result,
    Error,
}

/// Binding between the form controller and whatever renders the form.
///
/// Implementations own the field values and the visual state; the controller
/// only talks to them through these calls.
pub trait FormView {
    /// Name/value pairs of every form field, in form order.
    fn field_entries(&self) -> Vec<(String, String)>;

    /// Overwrites the named field. Returns `false` if the form has no such field.
    fn set_field(&mut self, name: &str, value: &str) -> bool;

    fn set_submit_control(&mut self, enabled: bool, label: &str);

    fn set_panel_visible(&mut self, panel: Panel, visible: bool);

    fn set_probability_text(&mut self, text: &str);

    fn set_prediction_text(&mut self, text: &str);

    fn set_error_text(&mut self, text: &str);
}
