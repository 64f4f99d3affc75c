//! Azure Image Analysis 4.0 response type definitions.
//!
//! Every per-feature block is independently optional: the service only
//! returns the blocks that were requested, and absence is never an error.
//! Deserialization is deliberately lenient so that new upstream fields do
//! not break parsing.

use serde::{Deserialize, Serialize};

/// Top-level `imageanalysis:analyze` response.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// One-sentence description of the whole image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_result: Option<CaptionResult>,

    /// Per-region captions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dense_captions_result: Option<DenseCaptionsResult>,

    /// Content tags with confidences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags_result: Option<TagsResult>,

    /// Detected objects with bounding boxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects_result: Option<ObjectsResult>,

    /// Detected people with bounding boxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people_result: Option<PeopleResult>,

    /// Suggested crop regions per aspect ratio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_crops_result: Option<SmartCropsResult>,

    /// OCR output (printed and handwritten text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_result: Option<ReadResult>,

    /// Version of the model that produced the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,

    /// Dimensions of the analyzed image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
}

/// Rectangle locating a detected entity, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// A point of a bounding polygon, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// Width and height of the analyzed image.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
}

/// `captionResult` block.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CaptionResult {
    pub text: String,
    pub confidence: f64,
}

/// `denseCaptionsResult` block.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DenseCaptionsResult {
    #[serde(default)]
    pub values: Vec<DenseCaption>,
}

/// A caption for one region of the image.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DenseCaption {
    pub text: String,
    pub confidence: f64,
    #[serde(default)]
    pub bounding_box: BoundingBox,
}

/// `tagsResult` block.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TagsResult {
    #[serde(default)]
    pub values: Vec<Tag>,
}

/// A content tag with its confidence.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Tag {
    pub name: String,
    pub confidence: f64,
}

/// `objectsResult` block.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObjectsResult {
    #[serde(default)]
    pub values: Vec<DetectedObject>,
}

/// A detected object: a bounding box plus one or more classifying tags.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DetectedObject {
    #[serde(default)]
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl DetectedObject {
    /// Display name from the first classifying tag.
    pub fn name(&self) -> &str {
        self.tags.first().map(|t| t.name.as_str()).unwrap_or("object")
    }

    /// Confidence of the first classifying tag.
    pub fn confidence(&self) -> f64 {
        self.tags.first().map(|t| t.confidence).unwrap_or(0.0)
    }
}

/// `peopleResult` block.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PeopleResult {
    #[serde(default)]
    pub values: Vec<DetectedPerson>,
}

/// A detected person region.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DetectedPerson {
    #[serde(default)]
    pub bounding_box: BoundingBox,
    pub confidence: f64,
}

/// `smartCropsResult` block.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SmartCropsResult {
    #[serde(default)]
    pub values: Vec<CropSuggestion>,
}

/// A suggested crop region for one aspect ratio.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CropSuggestion {
    pub aspect_ratio: f64,
    #[serde(default)]
    pub bounding_box: BoundingBox,
}

/// `readResult` block (OCR).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReadResult {
    #[serde(default)]
    pub blocks: Vec<ReadBlock>,
}

/// A block of detected text lines.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReadBlock {
    #[serde(default)]
    pub lines: Vec<ReadLine>,
}

/// One detected text line with its bounding polygon.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReadLine {
    pub text: String,
    #[serde(default)]
    pub bounding_polygon: Vec<Point>,
}

impl ReadResult {
    /// All detected line texts, in reading order.
    pub fn line_texts(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .flat_map(|b| b.lines.iter())
            .map(|l| l.text.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_response_deserializes() {
        // Only the blocks that were requested come back.
        let json = r#"{
            "captionResult": {"text": "a cat", "confidence": 0.9},
            "modelVersion": "2023-10-01"
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.caption_result.unwrap().text, "a cat");
        assert!(result.tags_result.is_none());
        assert!(result.objects_result.is_none());
        assert!(result.read_result.is_none());
    }

    #[test]
    fn test_object_without_tags_has_fallback_name() {
        let object = DetectedObject::default();
        assert_eq!(object.name(), "object");
        assert_eq!(object.confidence(), 0.0);
    }

    #[test]
    fn test_read_result_line_texts() {
        let json = r#"{
            "blocks": [
                {"lines": [
                    {"text": "hello", "boundingPolygon": [{"x":0,"y":0},{"x":10,"y":0},{"x":10,"y":5},{"x":0,"y":5}]},
                    {"text": "world", "boundingPolygon": []}
                ]}
            ]
        }"#;

        let read: ReadResult = serde_json::from_str(json).unwrap();
        assert_eq!(read.line_texts(), vec!["hello", "world"]);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{
            "tagsResult": {"values": [{"name": "cat", "confidence": 0.95}]},
            "someFutureBlock": {"values": []}
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.tags_result.unwrap().values.len(), 1);
    }
}
