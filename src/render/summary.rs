// Pure mapping from AnalysisResult to display structures

use crate::vision::models::{AnalysisResult, BoundingBox};
use serde::Serialize;
use std::cmp::Ordering;

/// Display-ready view of an analysis response.
///
/// Absent feature blocks (not requested, or missing from the response)
/// simply produce absent sections; they are never an error.
#[derive(Debug, Clone, Serialize, Default)]
pub struct RenderedResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<RenderedCaption>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dense_captions: Vec<RenderedCaption>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<RenderedTag>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<RenderedDetection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub people: Option<RenderedPeople>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<RenderedText>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub smart_crops: Vec<RenderedCrop>,
}

/// Caption text with its confidence, e.g. `a cat (90%)`.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedCaption {
    pub text: String,
    pub confidence: f64,
    pub display: String,
}

/// A tag with its confidence, e.g. `cat (95%)`.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedTag {
    pub name: String,
    pub confidence: f64,
    pub display: String,
}

/// A detection (object or person) with its box, in API order.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDetection {
    pub name: String,
    pub confidence: f64,
    pub display: String,
    pub bounding_box: BoundingBox,
}

/// People section: a count plus the individual detections.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPeople {
    pub count: usize,
    pub detections: Vec<RenderedDetection>,
}

/// OCR section: individual lines plus the newline-joined text.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedText {
    pub lines: Vec<String>,
    pub text: String,
}

/// A suggested crop region.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedCrop {
    pub aspect_ratio: f64,
    pub bounding_box: BoundingBox,
}

/// Format a 0..1 confidence as a whole percentage, e.g. `0.9` -> `90%`.
pub fn percent(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

fn labeled(text: &str, confidence: f64) -> String {
    format!("{} ({})", text, percent(confidence))
}

/// Map an analysis result onto display structures.
pub fn render(result: &AnalysisResult) -> RenderedResult {
    let caption = result.caption_result.as_ref().map(|c| RenderedCaption {
        text: c.text.clone(),
        confidence: c.confidence,
        display: labeled(&c.text, c.confidence),
    });

    let dense_captions = result
        .dense_captions_result
        .as_ref()
        .map(|dc| {
            dc.values
                .iter()
                .map(|v| RenderedCaption {
                    text: v.text.clone(),
                    confidence: v.confidence,
                    display: labeled(&v.text, v.confidence),
                })
                .collect()
        })
        .unwrap_or_default();

    // Sorted by descending confidence; the stable sort keeps the API's
    // original order for ties.
    let mut tags: Vec<RenderedTag> = result
        .tags_result
        .as_ref()
        .map(|t| {
            t.values
                .iter()
                .map(|v| RenderedTag {
                    name: v.name.clone(),
                    confidence: v.confidence,
                    display: labeled(&v.name, v.confidence),
                })
                .collect()
        })
        .unwrap_or_default();
    tags.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    // Objects and people stay in API order so overlay colors line up.
    let objects = result
        .objects_result
        .as_ref()
        .map(|o| {
            o.values
                .iter()
                .map(|v| RenderedDetection {
                    name: v.name().to_string(),
                    confidence: v.confidence(),
                    display: labeled(v.name(), v.confidence()),
                    bounding_box: v.bounding_box,
                })
                .collect()
        })
        .unwrap_or_default();

    let people = result.people_result.as_ref().map(|p| RenderedPeople {
        count: p.values.len(),
        detections: p
            .values
            .iter()
            .map(|v| RenderedDetection {
                name: "person".to_string(),
                confidence: v.confidence,
                display: labeled("person", v.confidence),
                bounding_box: v.bounding_box,
            })
            .collect(),
    });

    let text = result.read_result.as_ref().map(|r| {
        let lines: Vec<String> = r.line_texts().iter().map(|s| s.to_string()).collect();
        RenderedText {
            text: lines.join("\n"),
            lines,
        }
    });

    let smart_crops = result
        .smart_crops_result
        .as_ref()
        .map(|sc| {
            sc.values
                .iter()
                .map(|v| RenderedCrop {
                    aspect_ratio: v.aspect_ratio,
                    bounding_box: v.bounding_box,
                })
                .collect()
        })
        .unwrap_or_default();

    RenderedResult {
        caption,
        dense_captions,
        tags,
        objects,
        people,
        text,
        smart_crops,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::models::{CaptionResult, Tag, TagsResult};

    #[test]
    fn test_percent_rounds_to_whole_number() {
        assert_eq!(percent(0.9), "90%");
        assert_eq!(percent(0.954), "95%");
        assert_eq!(percent(0.0), "0%");
    }

    #[test]
    fn test_caption_display_format() {
        let result = AnalysisResult {
            caption_result: Some(CaptionResult {
                text: "a cat".to_string(),
                confidence: 0.9,
            }),
            ..Default::default()
        };

        let rendered = render(&result);
        assert_eq!(rendered.caption.unwrap().display, "a cat (90%)");
    }

    #[test]
    fn test_tags_sorted_descending_with_stable_ties() {
        let result = AnalysisResult {
            tags_result: Some(TagsResult {
                values: vec![
                    Tag { name: "indoor".to_string(), confidence: 0.7 },
                    Tag { name: "cat".to_string(), confidence: 0.95 },
                    Tag { name: "animal".to_string(), confidence: 0.7 },
                ],
            }),
            ..Default::default()
        };

        let rendered = render(&result);
        let names: Vec<&str> = rendered.tags.iter().map(|t| t.name.as_str()).collect();
        // "indoor" before "animal": equal confidence keeps original order
        assert_eq!(names, vec!["cat", "indoor", "animal"]);
    }
}
