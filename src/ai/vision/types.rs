//! Cloud Vision `images:annotate` request payloads.

use serde::Serialize;

pub const TEXT_DETECTION: &str = "TEXT_DETECTION";

#[derive(Debug, Serialize)]
pub struct AnnotateImagesRequest<'a> {
    pub requests: Vec<AnnotateImageRequest<'a>>,
}

#[derive(Debug, Serialize)]
pub struct AnnotateImageRequest<'a> {
    pub image: Image<'a>,
    pub features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
pub struct Image<'a> {
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: &'static str,
}

impl<'a> AnnotateImagesRequest<'a> {
    /// A single-image text detection request.
    pub fn text_detection(content: &'a str) -> Self {
        Self {
            requests: vec![AnnotateImageRequest {
                image: Image { content },
                features: vec![Feature {
                    feature_type: TEXT_DETECTION,
                }],
            }],
        }
    }
}
