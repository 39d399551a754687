use eframe::egui;

/// Dark theme shared by every panel of the predictor window
pub struct DesignSystem;

impl DesignSystem {
    // --- Colors ---

    pub const BG_WINDOW: egui::Color32 = egui::Color32::from_rgb(9, 13, 22); // #090D16
    pub const BG_CARD: egui::Color32 = egui::Color32::from_rgb(19, 26, 41); // #131A29
    pub const BG_CARD_HOVER: egui::Color32 = egui::Color32::from_rgb(26, 35, 54);
    pub const BG_INPUT: egui::Color32 = egui::Color32::from_rgb(13, 18, 30);

    // Team colors double as accents
    pub const BLUE_SIDE: egui::Color32 = egui::Color32::from_rgb(56, 132, 255); // #3884FF
    pub const RED_SIDE: egui::Color32 = egui::Color32::from_rgb(232, 64, 87); // #E84057
    pub const GOLD: egui::Color32 = egui::Color32::from_rgb(200, 170, 110); // #C8AA6E

    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(236, 240, 247);
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_gray(160);
    pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_gray(100);

    pub const BORDER_SUBTLE: egui::Color32 = egui::Color32::from_rgb(40, 50, 70);

    // --- Metrics ---

    pub const ROUNDING_MEDIUM: f32 = 8.0;

    pub const SPACING_SMALL: f32 = 8.0;
    pub const SPACING_MEDIUM: f32 = 16.0;
    pub const SPACING_LARGE: f32 = 24.0;

    // --- Styles ---

    pub fn theme() -> egui::Visuals {
        let mut visuals = egui::Visuals::dark();

        visuals.window_fill = Self::BG_WINDOW;
        visuals.panel_fill = Self::BG_WINDOW;
        visuals.extreme_bg_color = Self::BG_INPUT;

        visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, Self::BORDER_SUBTLE);
        visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_PRIMARY);

        visuals.widgets.inactive.weak_bg_fill = Self::BG_CARD;
        visuals.widgets.inactive.bg_fill = Self::BG_CARD;
        visuals.widgets.hovered.bg_fill = Self::BG_CARD_HOVER;

        visuals.selection.bg_fill = Self::BLUE_SIDE.linear_multiply(0.3);
        visuals.selection.stroke = egui::Stroke::new(1.0, Self::BLUE_SIDE);

        visuals
    }

    pub fn card_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_CARD)
            .corner_radius(Self::ROUNDING_MEDIUM)
            .stroke(egui::Stroke::new(1.0, Self::BORDER_SUBTLE))
            .inner_margin(Self::SPACING_MEDIUM as i8)
    }

    pub fn main_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_WINDOW)
            .inner_margin(egui::Margin::same(Self::SPACING_LARGE as i8))
    }
}
