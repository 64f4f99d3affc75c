//! Azure AI Vision client module.
//!
//! # Submodules
//!
//! - `client`: The HTTP client issuing `imageanalysis:analyze` calls.
//! - `models`: Typed views of the Image Analysis 4.0 response.

mod client;
pub mod models;

pub use client::VisionClient;
pub use models::AnalysisResult;

use crate::error::{Result, VisionError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An analysis capability requested per call.
///
/// Variants map one-to-one to the `features` query parameter values of the
/// Image Analysis 4.0 API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    Caption,
    DenseCaptions,
    Tags,
    Objects,
    People,
    SmartCrops,
    Read,
}

impl Feature {
    /// All supported features, in the order the workshop UI lists them.
    pub const ALL: [Feature; 7] = [
        Feature::Caption,
        Feature::Tags,
        Feature::Objects,
        Feature::Read,
        Feature::DenseCaptions,
        Feature::People,
        Feature::SmartCrops,
    ];

    /// Wire name as it appears in the `features` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Caption => "caption",
            Feature::DenseCaptions => "denseCaptions",
            Feature::Tags => "tags",
            Feature::Objects => "objects",
            Feature::People => "people",
            Feature::SmartCrops => "smartCrops",
            Feature::Read => "read",
        }
    }

    /// Join features into the comma-separated query parameter value,
    /// preserving the order given.
    pub fn join(features: &[Feature]) -> String {
        features
            .iter()
            .map(Feature::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parse a comma-separated feature list, preserving order.
    ///
    /// Empty segments are skipped; an unknown name is an error. An entirely
    /// empty input yields an empty list (callers decide on a default set).
    pub fn parse_list(input: &str) -> Result<Vec<Feature>> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Feature::from_str)
            .collect()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = VisionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "caption" => Ok(Feature::Caption),
            "denseCaptions" => Ok(Feature::DenseCaptions),
            "tags" => Ok(Feature::Tags),
            "objects" => Ok(Feature::Objects),
            "people" => Ok(Feature::People),
            "smartCrops" => Ok(Feature::SmartCrops),
            "read" => Ok(Feature::Read),
            other => Err(VisionError::InvalidRequest(format!(
                "Unknown analysis feature: {}",
                other
            ))),
        }
    }
}

/// The feature set requested when the caller does not pick one.
/// Matches the workshop UI's default checkboxes.
pub fn default_features() -> Vec<Feature> {
    vec![Feature::Caption, Feature::Tags, Feature::Objects, Feature::Read]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_preserves_order() {
        let features = [Feature::Read, Feature::Caption, Feature::SmartCrops];
        assert_eq!(Feature::join(&features), "read,caption,smartCrops");
    }

    #[test]
    fn test_parse_list_round_trip() {
        let features = [Feature::Caption, Feature::DenseCaptions, Feature::People];
        let parsed = Feature::parse_list(&Feature::join(&features)).unwrap();
        assert_eq!(parsed, features);
    }

    #[test]
    fn test_parse_rejects_unknown_feature() {
        assert!(Feature::parse_list("caption,landmarks").is_err());
    }

    #[test]
    fn test_parse_skips_empty_segments() {
        let parsed = Feature::parse_list("caption,,tags,").unwrap();
        assert_eq!(parsed, vec![Feature::Caption, Feature::Tags]);
    }
}
