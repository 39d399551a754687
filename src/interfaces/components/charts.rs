use crate::interfaces::design_system::DesignSystem;
use eframe::egui;
use egui::epaint::{PathShape, Stroke};
use std::f32::consts::PI;

/// Ring gauge for a win probability in [0, 1], with the percentage in the middle.
///
/// The arc runs clockwise from the top. Out-of-range and NaN inputs draw an empty ring.
pub fn render_probability_ring(
    ui: &mut egui::Ui,
    probability: f64,
    label: &str,
    color: egui::Color32,
    size: f32,
) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    let center = rect.center();
    let radius = size / 2.0 - 4.0;

    ui.painter().circle_stroke(
        center,
        radius,
        Stroke::new(6.0, DesignSystem::BORDER_SUBTLE),
    );

    let fraction = if probability.is_finite() {
        probability.clamp(0.0, 1.0) as f32
    } else {
        0.0
    };

    if fraction > 0.0 {
        let start_angle = -PI / 2.0;
        let sweep_angle = 2.0 * PI * fraction;
        let steps = 48;

        let points: Vec<egui::Pos2> = (0..=steps)
            .map(|i| {
                let angle = start_angle + sweep_angle * (i as f32 / steps as f32);
                egui::pos2(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect();

        ui.painter()
            .add(PathShape::line(points, Stroke::new(6.0, color)));
    }

    ui.painter().text(
        center,
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(size / 5.0),
        DesignSystem::TEXT_PRIMARY,
    );
}
