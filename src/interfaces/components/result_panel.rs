use crate::domain::ports::Panel;
use crate::domain::prediction::{PredictionOutcome, PredictionResponse, format_probability};
use crate::interfaces::components::card::Card;
use crate::interfaces::components::charts::render_probability_ring;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::form_view_model::FormViewModel;
use eframe::egui;

/// Accent of the result card. Follows the service's verdict, not the raw probability.
pub fn outcome_color(outcome: PredictionOutcome) -> egui::Color32 {
    match outcome {
        PredictionOutcome::Favorable => DesignSystem::BLUE_SIDE,
        PredictionOutcome::Cautionary => DesignSystem::RED_SIDE,
    }
}

/// Renders whichever of placeholder / result / error is visible, or a spinner
/// while a request is in flight.
pub fn render_result_panel(
    ui: &mut egui::Ui,
    view: &FormViewModel,
    response: Option<&PredictionResponse>,
) {
    match view.visible_panel() {
        Some(Panel::Placeholder) => {
            Card::new().title("PREDICTION").show(ui, |ui| {
                ui.label(
                    egui::RichText::new(
                        "Enter the blue side's match statistics, or use a sample match, \
                         then press Predict outcome.",
                    )
                    .color(DesignSystem::TEXT_SECONDARY),
                );
            });
        }
        Some(Panel::Result) => {
            let color = response
                .map(|r| outcome_color(r.outcome()))
                .unwrap_or(DesignSystem::TEXT_MUTED);

            Card::new()
                .title("PREDICTION")
                .accent(color)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        render_probability_ring(
                            ui,
                            response.map_or(f64::NAN, |r| r.win_probability),
                            view.probability_text(),
                            color,
                            120.0,
                        );
                        ui.add_space(DesignSystem::SPACING_MEDIUM);
                        ui.vertical(|ui| {
                            ui.label(
                                egui::RichText::new("Blue side win probability")
                                    .size(12.0)
                                    .color(DesignSystem::TEXT_MUTED),
                            );
                            ui.label(
                                egui::RichText::new(view.probability_text())
                                    .size(28.0)
                                    .strong()
                                    .color(color),
                            );
                            ui.add_space(DesignSystem::SPACING_SMALL);
                            ui.label(
                                egui::RichText::new(view.prediction_text())
                                    .color(DesignSystem::TEXT_PRIMARY),
                            );
                        });
                    });

                    if let Some(response) = response {
                        render_model_details(ui, response);
                    }
                });
        }
        Some(Panel::Error) => {
            Card::new()
                .title("PREDICTION FAILED")
                .accent(DesignSystem::RED_SIDE)
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(view.error_text()).color(DesignSystem::RED_SIDE));
                });
        }
        None => {
            Card::new().title("PREDICTION").show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(
                        egui::RichText::new("Waiting for the model...")
                            .color(DesignSystem::TEXT_SECONDARY),
                    );
                });
            });
        }
    }
}

fn render_model_details(ui: &mut egui::Ui, response: &PredictionResponse) {
    let model = response.metadata.as_ref().and_then(|m| m.model.as_deref());
    let metrics = response
        .metadata
        .as_ref()
        .map(|m| m.metric_values())
        .unwrap_or_default();
    if model.is_none() && response.threshold.is_none() && metrics.is_empty() {
        return;
    }

    ui.add_space(DesignSystem::SPACING_SMALL);
    ui.separator();
    egui::Grid::new("model_details")
        .num_columns(2)
        .spacing([DesignSystem::SPACING_MEDIUM, 2.0])
        .show(ui, |ui| {
            let mut row = |label: &str, value: String| {
                ui.label(egui::RichText::new(label).small().color(DesignSystem::TEXT_MUTED));
                ui.label(egui::RichText::new(value).small().color(DesignSystem::TEXT_SECONDARY));
                ui.end_row();
            };
            if let Some(model) = model {
                row("Model", model.to_string());
            }
            if let Some(threshold) = response.threshold {
                row("Threshold", format_probability(threshold));
            }
            for (name, value) in metrics {
                row(&name, format!("{:.3}", value));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_follows_prediction_not_probability() {
        // A service with a 0.3 threshold says "favored" at 40%
        let response = PredictionResponse {
            win_probability: 0.4,
            prediction: 1,
            threshold: Some(0.3),
            metadata: None,
        };
        assert_eq!(outcome_color(response.outcome()), DesignSystem::BLUE_SIDE);

        let response = PredictionResponse {
            win_probability: 0.6,
            prediction: 0,
            threshold: Some(0.7),
            metadata: None,
        };
        assert_eq!(outcome_color(response.outcome()), DesignSystem::RED_SIDE);
    }
}
