use crate::application::client::{ClientEvent, PredictionClient};
use crate::application::form_controller::SubmissionOutcome;
use crate::interfaces::components::form_panel::{FormAction, render_form_panel};
use crate::interfaces::components::result_panel::render_result_panel;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::form_view_model::FormViewModel;
use chrono::{DateTime, Local};
use eframe::egui;
use std::collections::VecDeque;
use std::time::Duration;

const MAX_ACTIVITY_LINES: usize = 200;

/// Desktop window hosting the prediction form.
pub struct PredictorApp {
    client: PredictionClient,
    view: FormViewModel,
    endpoint: String,
    last_outcome: Option<SubmissionOutcome>,
    last_completed: Option<DateTime<Local>>,
    activity: VecDeque<String>,
}

impl PredictorApp {
    pub fn new(client: PredictionClient, endpoint: impl Into<String>) -> Self {
        let view = FormViewModel::new(client.controller().feature_order());
        Self {
            client,
            view,
            endpoint: endpoint.into(),
            last_outcome: None,
            last_completed: None,
            activity: VecDeque::new(),
        }
    }

    /// Drains pending client events into the view.
    fn process_events(&mut self) {
        while let Some(event) = self.client.poll_next(&mut self.view) {
            match event {
                ClientEvent::Log(line) => {
                    let line = line.trim_end().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    if self.activity.len() == MAX_ACTIVITY_LINES {
                        self.activity.pop_front();
                    }
                    self.activity.push_back(line);
                }
                ClientEvent::Completed(outcome) => {
                    self.last_outcome = Some(outcome);
                    self.last_completed = Some(Local::now());
                }
            }
        }
    }

    fn handle_action(&mut self, action: FormAction) {
        match action {
            FormAction::None => {}
            FormAction::Prefill => {
                self.client.prefill(&mut self.view);
            }
            FormAction::Submit => {
                self.client.submit(&mut self.view);
            }
        }
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(DesignSystem::theme());

        self.process_events();

        // --- Top bar ---
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("⚔ Win Predictor");
                ui.separator();
                ui.label(
                    egui::RichText::new(&self.endpoint)
                        .small()
                        .color(DesignSystem::TEXT_MUTED),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let (text, color) = if self.client.is_submitting() {
                        ("● PREDICTING", DesignSystem::GOLD)
                    } else {
                        ("● READY", DesignSystem::BLUE_SIDE)
                    };
                    ui.label(egui::RichText::new(text).color(color).small());
                    if let Some(at) = self.last_completed {
                        ui.label(
                            egui::RichText::new(format!("last request {}", at.format("%H:%M:%S")))
                                .small()
                                .color(DesignSystem::TEXT_MUTED),
                        );
                    }
                });
            });
        });

        // --- Activity log ---
        egui::TopBottomPanel::bottom("activity_panel")
            .resizable(true)
            .default_height(120.0)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new("ACTIVITY")
                        .size(11.0)
                        .strong()
                        .color(DesignSystem::TEXT_SECONDARY),
                );
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.activity {
                            let color = if line.contains("ERROR") {
                                DesignSystem::RED_SIDE
                            } else if line.contains("WARN") {
                                DesignSystem::GOLD
                            } else {
                                DesignSystem::TEXT_MUTED
                            };
                            ui.label(egui::RichText::new(line).monospace().size(11.0).color(color));
                        }
                    });
            });

        // --- Form and result ---
        let mut action = FormAction::None;
        egui::CentralPanel::default()
            .frame(DesignSystem::main_frame())
            .show(ctx, |ui| {
                ui.columns(2, |columns| {
                    action = render_form_panel(&mut columns[0], &mut self.view);
                    let response = match &self.last_outcome {
                        Some(SubmissionOutcome::Predicted { response, .. }) => Some(response),
                        _ => None,
                    };
                    render_result_panel(&mut columns[1], &self.view, response);
                });
            });

        self.handle_action(action);

        // Results and log lines arrive from other threads
        let repaint_after = if self.client.is_submitting() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(500)
        };
        ctx.request_repaint_after(repaint_after);
    }
}
