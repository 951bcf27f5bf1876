//! Heuristic detector for machine-generated content. Scores a text sample
//! and/or a decoded image with deterministic, explainable rules and reports a
//! confidence plus human-readable indicators. Not a trained classifier.

use std::future::Future;

use log::warn;
use serde::Serialize;

use crate::analysis::{image::ImageAnalyzer, text::TextAnalyzer};
use crate::error::Result;
use crate::pixel::PixelBuffer;

pub mod analysis;
pub mod decode;
pub mod error;
pub mod pixel;
pub mod report;

/// Scan-region caps for the image passes. The defaults bound the cost of each
/// pass; shrinking them trades signal for speed.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub scan_size: u32,
    pub block_scan_size: usize,
    pub edge_scan_size: usize,
    pub aberration_scan_size: usize,
    pub contrast_scan_size: usize,
    /// Channel samples inspected by the color pass.
    pub color_sample_limit: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            scan_size: 300,
            block_scan_size: 160,
            edge_scan_size: 150,
            aberration_scan_size: 100,
            contrast_scan_size: 200,
            color_sample_limit: 15000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnalysis {
    pub likely: bool,
    pub score: u32,
    pub indicators: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageAnalysis {
    pub likely: bool,
    pub score: u32,
    pub ai_score: u32,
    pub authenticity_score: u32,
    pub indicators: Vec<String>,
}

impl ImageAnalysis {
    fn neutral(indicator: &str) -> Self {
        Self {
            likely: false,
            score: 0,
            ai_score: 0,
            authenticity_score: 0,
            indicators: vec![indicator.into()],
        }
    }

    /// Buffer bytes inconsistent with the stated dimensions: the scan is
    /// skipped and the restriction is reported instead of raised.
    pub fn pixels_unavailable() -> Self {
        Self::neutral("Unable to perform deep pixel analysis (pixel data unavailable)")
    }

    /// The supplied decode stage failed; reported as a zero-score result.
    pub fn decode_failure() -> Self {
        Self::neutral("Error loading image for analysis")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub is_ai_generated: bool,
    pub confidence: u32,
    pub text_analysis: Option<TextAnalysis>,
    pub image_analysis: Option<ImageAnalysis>,
    pub summary: String,
}

/// A single analysis request. Both inputs are optional; empty text counts as
/// absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeRequest<'a> {
    pub text: Option<&'a str>,
    pub image: Option<&'a PixelBuffer>,
}

/// Root entry point: runs the text and image analyzers over a request and
/// merges their outputs into one [`AnalysisResult`]. Holds no mutable state;
/// every call is independent.
pub struct ContentDetector {
    text_analyzer: TextAnalyzer,
    image_analyzer: ImageAnalyzer,
}

impl ContentDetector {
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        Self {
            text_analyzer: TextAnalyzer::new(),
            image_analyzer: ImageAnalyzer::with_config(config),
        }
    }

    pub fn analyze_text(&self, text: &str) -> TextAnalysis {
        self.text_analyzer.analyze(text)
    }

    pub fn analyze_image(&self, buffer: &PixelBuffer) -> ImageAnalysis {
        self.image_analyzer.analyze(buffer)
    }

    /// Synchronous path for callers that already hold a decoded buffer. The
    /// two sub-analyses share no state, so they run concurrently when both
    /// inputs are present.
    pub fn analyze(&self, request: AnalyzeRequest<'_>) -> AnalysisResult {
        let text = request.text.filter(|t| !t.is_empty());

        let (text_analysis, image_analysis) = match (text, request.image) {
            (Some(text), Some(buffer)) => {
                let (t, i) = rayon::join(
                    || self.analyze_text(text),
                    || self.analyze_image(buffer),
                );
                (Some(t), Some(i))
            }
            (Some(text), None) => (Some(self.analyze_text(text)), None),
            (None, Some(buffer)) => (None, Some(self.analyze_image(buffer))),
            (None, None) => (None, None),
        };

        self.aggregate(text_analysis, image_analysis)
    }

    /// Decode-then-scan pipeline: awaits the externally supplied decode stage
    /// (the single suspension point), then runs the pure scans. A decode
    /// error degrades to a zero-score image analysis, never an `Err`.
    pub async fn analyze_with_decode<F>(
        &self,
        text: Option<&str>,
        image: Option<F>,
    ) -> AnalysisResult
    where
        F: Future<Output = Result<PixelBuffer>>,
    {
        let text_analysis = text
            .filter(|t| !t.is_empty())
            .map(|t| self.analyze_text(t));

        let image_analysis = match image {
            Some(decode) => Some(match decode.await {
                Ok(buffer) => self.analyze_image(&buffer),
                Err(err) => {
                    warn!("image decode failed: {err}");
                    ImageAnalysis::decode_failure()
                }
            }),
            None => None,
        };

        self.aggregate(text_analysis, image_analysis)
    }

    pub fn aggregate(
        &self,
        text: Option<TextAnalysis>,
        image: Option<ImageAnalysis>,
    ) -> AnalysisResult {
        let text_score = text.as_ref().map_or(0, |t| t.score);
        let image_score = image.as_ref().map_or(0, |i| i.score);
        let present = text.is_some() as u32 + image.is_some() as u32;

        let confidence = if present == 0 {
            0
        } else {
            ((text_score + image_score) as f64 / present as f64).round() as u32
        };
        let is_ai_generated = confidence > 40;

        let summary = Self::summarize(is_ai_generated, text.as_ref(), image.as_ref());

        AnalysisResult {
            is_ai_generated,
            confidence,
            text_analysis: text,
            image_analysis: image,
            summary,
        }
    }

    fn summarize(
        is_ai: bool,
        text: Option<&TextAnalysis>,
        image: Option<&ImageAnalysis>,
    ) -> String {
        let verdict = if is_ai { "likely" } else { "probably not" };

        match (text, image) {
            (Some(text), Some(image)) => {
                let detail = match (text.likely, image.likely) {
                    (true, true) => "Both text and image show significant AI characteristics.",
                    (true, false) => "Text shows strong AI patterns, but image is less conclusive.",
                    (false, true) => "Image shows AI patterns, but text appears more natural.",
                    (false, false) => "Neither text nor image show strong AI indicators.",
                };
                format!(
                    "Combined analysis suggests this content is {verdict} AI-generated. {detail}"
                )
            }
            (Some(_), None) => format!(
                "Text analysis suggests this is {verdict} AI-generated based on writing patterns and style."
            ),
            (None, Some(_)) => format!(
                "Image analysis suggests this is {verdict} AI-generated. Advanced pixel analysis \
                 including edge detection, chromatic aberration, and contrast consistency has been applied."
            ),
            (None, None) => "No content provided for analysis.".into(),
        }
    }
}

impl Default for ContentDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectError;

    fn text_analysis(score: u32, likely: bool) -> TextAnalysis {
        TextAnalysis {
            likely,
            score,
            indicators: vec!["test indicator".into()],
        }
    }

    fn image_analysis(score: u32, likely: bool) -> ImageAnalysis {
        ImageAnalysis {
            likely,
            score,
            ai_score: score,
            authenticity_score: 0,
            indicators: vec!["test indicator".into()],
        }
    }

    #[test]
    fn text_only_confidence_is_text_score() {
        let result = ContentDetector::new().aggregate(Some(text_analysis(80, true)), None);
        assert_eq!(result.confidence, 80);
        assert!(result.is_ai_generated);
        assert!(result.image_analysis.is_none());
        assert_eq!(
            result.summary,
            "Text analysis suggests this is likely AI-generated based on writing patterns and style."
        );
    }

    #[test]
    fn neutral_image_halves_combined_confidence() {
        let result = ContentDetector::new().aggregate(
            Some(text_analysis(80, true)),
            Some(image_analysis(0, false)),
        );
        assert_eq!(result.confidence, 40);
        assert!(!result.is_ai_generated);
        assert_eq!(
            result.summary,
            "Combined analysis suggests this content is probably not AI-generated. \
             Text shows strong AI patterns, but image is less conclusive."
        );
    }

    #[test]
    fn both_likely_summary() {
        let result = ContentDetector::new().aggregate(
            Some(text_analysis(70, true)),
            Some(image_analysis(60, true)),
        );
        assert_eq!(result.confidence, 65);
        assert!(result.is_ai_generated);
        assert!(result.summary.ends_with(
            "Both text and image show significant AI characteristics."
        ));
    }

    #[test]
    fn no_inputs_yields_zero_confidence() {
        let result = ContentDetector::new().analyze(AnalyzeRequest::default());
        assert_eq!(result.confidence, 0);
        assert!(!result.is_ai_generated);
        assert!(result.text_analysis.is_none());
        assert!(result.image_analysis.is_none());
        assert_eq!(result.summary, "No content provided for analysis.");
    }

    #[test]
    fn empty_text_counts_as_absent() {
        let result = ContentDetector::new().analyze(AnalyzeRequest {
            text: Some(""),
            image: None,
        });
        assert!(result.text_analysis.is_none());
        assert_eq!(result.confidence, 0);
    }

    #[test]
    fn sync_analysis_is_idempotent() {
        let mut data = vec![200u8; 120 * 90 * 4];
        for alpha in data.iter_mut().skip(3).step_by(4) {
            *alpha = 255;
        }
        let buffer = PixelBuffer::new(120, 90, data).unwrap();
        let detector = ContentDetector::new();
        let request = AnalyzeRequest {
            text: Some("Furthermore, we leverage robust tools."),
            image: Some(&buffer),
        };
        assert_eq!(detector.analyze(request), detector.analyze(request));
    }

    #[tokio::test]
    async fn decode_failure_degrades_to_neutral_image_analysis() {
        let detector = ContentDetector::new();
        let result = detector
            .analyze_with_decode(
                Some("some human words"),
                Some(async { Err::<PixelBuffer, _>(DetectError::EmptyImage) }),
            )
            .await;

        let image = result.image_analysis.unwrap();
        assert_eq!(image.score, 0);
        assert_eq!(
            image.indicators,
            vec!["Error loading image for analysis".to_string()]
        );
        assert!(result.text_analysis.is_some());
    }

    #[tokio::test]
    async fn decoded_buffer_flows_into_image_analysis() {
        let mut data = vec![128u8; 64 * 64 * 4];
        for alpha in data.iter_mut().skip(3).step_by(4) {
            *alpha = 255;
        }
        let buffer = PixelBuffer::new(64, 64, data).unwrap();

        let detector = ContentDetector::new();
        let result = detector
            .analyze_with_decode(None, Some(async move { Ok(buffer) }))
            .await;

        let image = result.image_analysis.unwrap();
        assert!(image.ai_score > 0);
        assert!(result.summary.starts_with("Image analysis suggests"));
    }
}
