pub mod card;
pub mod charts;
pub mod form_panel;
pub mod result_panel;
