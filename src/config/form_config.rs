//! Form configuration: feature order and sampling range overrides.

use crate::domain::features::{FeatureOrder, SampleRange};
use anyhow::{Context, Result};
use std::env;

/// Form environment configuration
#[derive(Debug, Clone, Default)]
pub struct FormEnvConfig {
    /// `None` means the order is discovered from the service.
    pub feature_order: Option<FeatureOrder>,
    pub range_overrides: Vec<(String, SampleRange)>,
}

impl FormEnvConfig {
    pub fn from_env() -> Result<Self> {
        let feature_order = env::var("FEATURE_ORDER")
            .ok()
            .map(|s| FeatureOrder::new(s.split(',')))
            .filter(|order| !order.is_empty());

        let range_overrides = match env::var("FEATURE_RANGES") {
            Ok(s) => parse_feature_ranges(&s).context("Failed to parse FEATURE_RANGES")?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            feature_order,
            range_overrides,
        })
    }
}

/// Parses `name=min:max` entries separated by commas.
pub fn parse_feature_ranges(s: &str) -> Result<Vec<(String, SampleRange)>> {
    let mut ranges = Vec::new();

    for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, bounds) = entry
            .split_once('=')
            .with_context(|| format!("Expected name=min:max, got '{}'", entry))?;
        let (min, max) = bounds
            .split_once(':')
            .with_context(|| format!("Expected min:max for '{}', got '{}'", name, bounds))?;

        let min = min
            .trim()
            .parse::<i64>()
            .with_context(|| format!("Invalid minimum for '{}'", name))?;
        let max = max
            .trim()
            .parse::<i64>()
            .with_context(|| format!("Invalid maximum for '{}'", name))?;

        let range = SampleRange::new(min, max)
            .map_err(|e| anyhow::anyhow!("Invalid range for '{}': {}", name.trim(), e))?;
        ranges.push((name.trim().to_string(), range));
    }

    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_ranges() {
        let ranges = parse_feature_ranges("kills=0:30, dragons = 0:4").unwrap();
        assert_eq!(
            ranges,
            vec![
                ("kills".to_string(), SampleRange { min: 0, max: 30 }),
                ("dragons".to_string(), SampleRange { min: 0, max: 4 }),
            ]
        );
    }

    #[test]
    fn test_parse_feature_ranges_rejects_bad_entries() {
        assert!(parse_feature_ranges("kills").is_err());
        assert!(parse_feature_ranges("kills=3").is_err());
        assert!(parse_feature_ranges("kills=a:4").is_err());
        assert!(parse_feature_ranges("kills=9:4").is_err());
    }

    #[test]
    fn test_parse_feature_ranges_rejects_overflowing_span() {
        let err = parse_feature_ranges("x=-9223372036854775808:9223372036854775807").unwrap_err();
        assert!(err.to_string().contains("Invalid range for 'x'"));
        assert!(parse_feature_ranges("x=0:9223372036854775807").is_ok());
    }

    #[test]
    fn test_parse_feature_ranges_empty() {
        assert!(parse_feature_ranges("").unwrap().is_empty());
        assert!(parse_feature_ranges(" , ").unwrap().is_empty());
    }
}
