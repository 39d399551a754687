use crate::interfaces::components::card::Card;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::form_view_model::FormViewModel;
use eframe::egui;

/// User action requested from the form panel during this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Prefill,
    Submit,
}

/// "gold_earned" -> "Gold earned"
fn field_label(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders the feature inputs plus the prefill and submit buttons.
pub fn render_form_panel(ui: &mut egui::Ui, view: &mut FormViewModel) -> FormAction {
    let mut action = FormAction::None;

    Card::new().title("MATCH STATISTICS").show(ui, |ui| {
        let mut enter_pressed = false;

        egui::Grid::new("feature_grid")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                for field in view.fields_mut() {
                    ui.label(
                        egui::RichText::new(field_label(&field.name))
                            .color(DesignSystem::TEXT_SECONDARY),
                    );
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut field.value)
                            .desired_width(160.0)
                            .hint_text("0"),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        enter_pressed = true;
                    }
                    ui.end_row();
                }
            });

        ui.add_space(DesignSystem::SPACING_MEDIUM);

        ui.horizontal(|ui| {
            if ui
                .add(egui::Button::new("🎲 Use sample match").fill(DesignSystem::BG_INPUT))
                .clicked()
            {
                action = FormAction::Prefill;
            }

            let submit = ui.add_enabled(
                view.submit_enabled(),
                egui::Button::new(
                    egui::RichText::new(view.submit_label())
                        .strong()
                        .color(DesignSystem::TEXT_PRIMARY),
                )
                .fill(DesignSystem::BLUE_SIDE),
            );
            if submit.clicked() || (enter_pressed && view.submit_enabled()) {
                action = FormAction::Submit;
            }
        });
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_label() {
        assert_eq!(field_label("gold_earned"), "Gold earned");
        assert_eq!(field_label("cs"), "Cs");
        assert_eq!(field_label(""), "");
    }
}
