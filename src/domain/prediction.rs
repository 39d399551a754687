use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use std::fmt;

/// JSON body sent to the predict endpoint: feature name to number, in form order.
///
/// Non-finite values (NaN from unparseable input) serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionRequest {
    values: Vec<(String, f64)>,
}

impl PredictionRequest {
    /// Builds a request from raw form entries, coercing each value with
    /// [`coerce_number`].
    pub fn from_form_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut request = Self::default();
        for (name, raw) in entries {
            request.insert(name, coerce_number(raw.as_ref()));
        }
        request
    }

    /// Sets a value. A repeated name keeps its first position and takes the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for PredictionRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Converts form text to a number the way a browser's `Number()` does.
///
/// Whitespace is trimmed, the empty string is zero, `0x`/`0o`/`0b` integer
/// literals and `Infinity` are accepted. Anything else that does not parse as
/// a decimal literal yields NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let text = raw.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * radix as f64 + d as f64);
    }

    // Rust's float parser also accepts "inf" and "nan" spellings that a
    // browser rejects.
    let is_decimal_literal = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !is_decimal_literal {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

/// Metadata block the service attaches to a successful prediction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelMetadata {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub metrics: Option<serde_json::Value>,
}

impl ModelMetadata {
    /// Numeric entries of `metrics` (e.g. `accuracy`, `roc_auc`), sorted by name.
    pub fn metric_values(&self) -> Vec<(String, f64)> {
        let Some(serde_json::Value::Object(metrics)) = &self.metrics else {
            return Vec::new();
        };
        let mut values: Vec<(String, f64)> = metrics
            .iter()
            .filter_map(|(name, value)| value.as_f64().map(|v| (name.clone(), v)))
            .collect();
        values.sort_by(|a, b| a.0.cmp(&b.0));
        values
    }
}

/// Successful response of the predict endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResponse {
    pub win_probability: f64,
    pub prediction: i64,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl PredictionResponse {
    pub fn outcome(&self) -> PredictionOutcome {
        PredictionOutcome::from_prediction(self.prediction)
    }

    pub fn probability_text(&self) -> String {
        format_probability(self.win_probability)
    }
}

/// Body of a failed request. `error` may be absent or empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply of the health endpoint, carrying the feature order the model expects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Which message the result view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionOutcome {
    Favorable,
    Cautionary,
}

impl PredictionOutcome {
    pub fn from_prediction(prediction: i64) -> Self {
        if prediction == 1 {
            Self::Favorable
        } else {
            Self::Cautionary
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Favorable => "✅ Blue side is favored — lean into aggression.",
            Self::Cautionary => "⚠️ Win rate below threshold — shift to safer objectives.",
        }
    }
}

impl fmt::Display for PredictionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Favorable => write!(f, "Favorable"),
            Self::Cautionary => write!(f, "Cautionary"),
        }
    }
}

/// Formats a probability in [0, 1] as a percentage with one decimal, e.g. `73.4%`.
///
/// Ties round up (`0.0625` is `6.3%`); `format!` alone would round them to even.
pub fn format_probability(value: f64) -> String {
    let tenths = (value * 1000.0).round();
    format!("{:.1}%", tenths / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_probability() {
        assert_eq!(format_probability(0.734), "73.4%");
        assert_eq!(format_probability(0.2), "20.0%");
        assert_eq!(format_probability(1.0), "100.0%");
        assert_eq!(format_probability(0.0), "0.0%");
    }

    #[test]
    fn test_format_probability_rounds_ties_up() {
        assert_eq!(format_probability(0.0625), "6.3%");
        assert_eq!(format_probability(0.3125), "31.3%");
        assert_eq!(format_probability(0.0624), "6.2%");
    }

    #[test]
    fn test_outcome_from_prediction() {
        assert_eq!(PredictionOutcome::from_prediction(1), PredictionOutcome::Favorable);
        assert_eq!(PredictionOutcome::from_prediction(0), PredictionOutcome::Cautionary);
        assert_eq!(PredictionOutcome::from_prediction(2), PredictionOutcome::Cautionary);
        assert!(PredictionOutcome::Favorable.message().contains("favored"));
        assert!(PredictionOutcome::Cautionary.message().contains("below threshold"));
    }

    #[test]
    fn test_coerce_number_decimal() {
        assert_eq!(coerce_number("12"), 12.0);
        assert_eq!(coerce_number("  7.5 "), 7.5);
        assert_eq!(coerce_number("-3"), -3.0);
        assert_eq!(coerce_number("1e3"), 1000.0);
        assert_eq!(coerce_number(".5"), 0.5);
    }

    #[test]
    fn test_coerce_number_browser_edge_cases() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("   "), 0.0);
        assert_eq!(coerce_number("0x1F"), 31.0);
        assert_eq!(coerce_number("0b101"), 5.0);
        assert_eq!(coerce_number("Infinity"), f64::INFINITY);
        assert_eq!(coerce_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_coerce_number_garbage_is_nan() {
        assert!(coerce_number("abc").is_nan());
        assert!(coerce_number("12kills").is_nan());
        assert!(coerce_number("inf").is_nan());
        assert!(coerce_number("NaN").is_nan());
        assert!(coerce_number("0x").is_nan());
        assert!(coerce_number("1.2.3").is_nan());
    }

    #[test]
    fn test_request_serializes_in_form_order() {
        let request = PredictionRequest::from_form_entries(vec![
            ("kills", "10"),
            ("deaths", "2"),
            ("assists", "oops"),
        ]);
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"kills":10.0,"deaths":2.0,"assists":null}"#);
    }

    #[test]
    fn test_request_duplicate_name_keeps_position() {
        let request = PredictionRequest::from_form_entries(vec![
            ("kills", "1"),
            ("cs", "100"),
            ("kills", "4"),
        ]);
        assert_eq!(request.len(), 2);
        assert_eq!(request.iter().next(), Some(("kills", 4.0)));
    }

    #[test]
    fn test_response_optional_fields() {
        let minimal: PredictionResponse =
            serde_json::from_str(r#"{"win_probability":0.61,"prediction":1}"#).unwrap();
        assert_eq!(minimal.threshold, None);
        assert_eq!(minimal.outcome(), PredictionOutcome::Favorable);

        let full: PredictionResponse = serde_json::from_str(
            r#"{"win_probability":0.2,"prediction":0,"threshold":0.5,
                "metadata":{"model":"logistic_regression","metrics":{"roc_auc":0.81}}}"#,
        )
        .unwrap();
        assert_eq!(full.threshold, Some(0.5));
        assert_eq!(full.probability_text(), "20.0%");
        assert_eq!(
            full.metadata.and_then(|m| m.model).as_deref(),
            Some("logistic_regression")
        );
    }

    #[test]
    fn test_metric_values_keep_numeric_entries() {
        let metadata: ModelMetadata = serde_json::from_str(
            r#"{"model":"logistic_regression",
                "metrics":{"roc_auc":0.81,"accuracy":0.74,"notes":"holdout"}}"#,
        )
        .unwrap();
        assert_eq!(
            metadata.metric_values(),
            vec![("accuracy".to_string(), 0.74), ("roc_auc".to_string(), 0.81)]
        );

        let without: ModelMetadata =
            serde_json::from_str(r#"{"model":null,"metrics":null}"#).unwrap();
        assert!(without.metric_values().is_empty());
    }
}
