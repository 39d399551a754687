use crate::application::form_controller::SUBMIT_LABEL;
use crate::domain::features::FeatureOrder;
use crate::domain::ports::{FormView, Panel};

/// One named input of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

/// In-memory form state. Rendered by the desktop window and the CLI, and
/// driven by the form controller through [`FormView`].
#[derive(Debug, Clone)]
pub struct FormViewModel {
    fields: Vec<FormField>,
    submit_enabled: bool,
    submit_label: String,
    placeholder_visible: bool,
    result_visible: bool,
    error_visible: bool,
    probability_text: String,
    prediction_text: String,
    error_text: String,
}

impl FormViewModel {
    /// One empty field per feature, placeholder showing.
    pub fn new(order: &FeatureOrder) -> Self {
        Self {
            fields: order
                .iter()
                .map(|name| FormField {
                    name: name.to_string(),
                    value: String::new(),
                })
                .collect(),
            submit_enabled: true,
            submit_label: SUBMIT_LABEL.to_string(),
            placeholder_visible: true,
            result_visible: false,
            error_visible: false,
            probability_text: String::new(),
            prediction_text: String::new(),
            error_text: String::new(),
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [FormField] {
        &mut self.fields
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        match panel {
            Panel::Placeholder => self.placeholder_visible,
            Panel::Result => self.result_visible,
            Panel::Error => self.error_visible,
        }
    }

    /// The panel currently shown, if any. `None` while a request is in flight.
    pub fn visible_panel(&self) -> Option<Panel> {
        [Panel::Error, Panel::Result, Panel::Placeholder]
            .into_iter()
            .find(|p| self.is_visible(*p))
    }

    pub fn probability_text(&self) -> &str {
        &self.probability_text
    }

    pub fn prediction_text(&self) -> &str {
        &self.prediction_text
    }

    pub fn error_text(&self) -> &str {
        &self.error_text
    }
}

impl FormView for FormViewModel {
    fn field_entries(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    fn set_field(&mut self, name: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }

    fn set_submit_control(&mut self, enabled: bool, label: &str) {
        self.submit_enabled = enabled;
        self.submit_label = label.to_string();
    }

    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        match panel {
            Panel::Placeholder => self.placeholder_visible = visible,
            Panel::Result => self.result_visible = visible,
            Panel::Error => self.error_visible = visible,
        }
    }

    fn set_probability_text(&mut self, text: &str) {
        self.probability_text = text.to_string();
    }

    fn set_prediction_text(&mut self, text: &str) {
        self.prediction_text = text.to_string();
    }

    fn set_error_text(&mut self, text: &str) {
        self.error_text = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_view_shows_placeholder() {
        let view = FormViewModel::new(&FeatureOrder::default());
        assert_eq!(view.visible_panel(), Some(Panel::Placeholder));
        assert!(view.submit_enabled());
        assert_eq!(view.submit_label(), "Predict outcome");
        assert_eq!(view.fields().len(), 8);
        assert_eq!(view.field_names()[0], "kills");
    }

    #[test]
    fn test_set_field_reports_missing_fields() {
        let mut view = FormViewModel::new(&FeatureOrder::new(vec!["kills"]));
        assert!(view.set_field("kills", "9"));
        assert!(!view.set_field("deaths", "1"));
        assert_eq!(view.field_entries(), vec![("kills".to_string(), "9".to_string())]);
    }

    #[test]
    fn test_no_visible_panel_while_loading() {
        let mut view = FormViewModel::new(&FeatureOrder::default());
        view.set_panel_visible(Panel::Placeholder, false);
        assert_eq!(view.visible_panel(), None);
    }
}
