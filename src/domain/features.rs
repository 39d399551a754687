use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Feature names the prediction model was trained on, in training order.
/// Used when neither configuration nor the service supplies an order.
pub const DEFAULT_FEATURE_NAMES: &[&str] = &[
    "kills",
    "deaths",
    "assists",
    "gold_earned",
    "cs",
    "wards_placed",
    "wards_killed",
    "damage_dealt",
];

/// Closed integer range used to sample plausible values for one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: i64,
    pub max: i64,
}

impl SampleRange {
    /// Range applied to any feature without an entry in the table.
    pub const DEFAULT: SampleRange = SampleRange { min: 0, max: 100 };

    pub fn new(min: i64, max: i64) -> Result<Self, String> {
        if min > max {
            return Err(format!("min {} is greater than max {}", min, max));
        }
        if max.checked_sub(min).is_none() {
            return Err(format!("span from {} to {} overflows", min, max));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Distance between the bounds. Never overflows, even for a range built
    /// without [`SampleRange::new`].
    pub fn span(&self) -> u64 {
        self.max.abs_diff(self.min)
    }
}

impl fmt::Display for SampleRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Per-feature sampling ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRangeTable {
    ranges: HashMap<String, SampleRange>,
}

impl Default for SampleRangeTable {
    fn default() -> Self {
        let ranges = [
            ("kills", SampleRange { min: 3, max: 20 }),
            ("deaths", SampleRange { min: 0, max: 15 }),
            ("assists", SampleRange { min: 2, max: 25 }),
            ("gold_earned", SampleRange { min: 5000, max: 25000 }),
            ("cs", SampleRange { min: 50, max: 350 }),
            ("wards_placed", SampleRange { min: 2, max: 15 }),
            ("wards_killed", SampleRange { min: 0, max: 10 }),
            ("damage_dealt", SampleRange { min: 5000, max: 60000 }),
        ]
        .into_iter()
        .map(|(name, range)| (name.to_string(), range))
        .collect();

        Self { ranges }
    }
}

impl SampleRangeTable {
    pub fn empty() -> Self {
        Self {
            ranges: HashMap::new(),
        }
    }

    /// Range for `feature`, or [`SampleRange::DEFAULT`] when unknown.
    pub fn range_for(&self, feature: &str) -> SampleRange {
        self.ranges
            .get(feature)
            .copied()
            .unwrap_or(SampleRange::DEFAULT)
    }

    pub fn is_known(&self, feature: &str) -> bool {
        self.ranges.contains_key(feature)
    }

    /// Adds or replaces the range of a feature.
    pub fn set(&mut self, feature: impl Into<String>, range: SampleRange) {
        self.ranges.insert(feature.into(), range);
    }

    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, SampleRange)>,
    {
        for (feature, range) in overrides {
            self.set(feature, range);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Ordered set of feature names. Drives sampling and form field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureOrder {
    names: Vec<String>,
}

impl FeatureOrder {
    /// Builds an order from names, dropping blanks and later duplicates.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if !name.is_empty() && !ordered.contains(&name) {
                ordered.push(name);
            }
        }
        Self { names: ordered }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.names.iter().any(|n| n == feature)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for FeatureOrder {
    fn default() -> Self {
        Self::new(DEFAULT_FEATURE_NAMES.iter().copied())
    }
}

impl From<Vec<String>> for FeatureOrder {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<FeatureOrder> for Vec<String> {
    fn from(order: FeatureOrder) -> Self {
        order.names
    }
}

/// Randomly generated value per feature, in feature order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SamplePayload {
    entries: Vec<(String, i64)>,
}

impl SamplePayload {
    pub fn push(&mut self, feature: impl Into<String>, value: i64) {
        self.entries.push((feature.into(), value));
    }

    pub fn get(&self, feature: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(name, _)| name == feature)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
