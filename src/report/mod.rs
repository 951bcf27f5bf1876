use serde::Serialize;

use crate::AnalysisResult;

/// Flattened, serializable view of an [`AnalysisResult`] for downstream
/// consumers. Indicator strings are final prose and must not be re-parsed.
#[derive(Serialize)]
pub struct JsonReport {
    pub is_ai_generated: bool,
    pub confidence: u32,
    pub summary: String,
    pub text_analysis: Option<TextReportSection>,
    pub image_analysis: Option<ImageReportSection>,
}

#[derive(Serialize)]
pub struct TextReportSection {
    pub likely: bool,
    pub score: u32,
    pub indicators: Vec<String>,
}

#[derive(Serialize)]
pub struct ImageReportSection {
    pub likely: bool,
    pub score: u32,
    pub ai_score: u32,
    pub authenticity_score: u32,
    pub indicator_count: usize,
}

impl From<&AnalysisResult> for JsonReport {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            is_ai_generated: result.is_ai_generated,
            confidence: result.confidence,
            summary: result.summary.clone(),
            text_analysis: result.text_analysis.as_ref().map(|t| TextReportSection {
                likely: t.likely,
                score: t.score,
                indicators: t.indicators.clone(),
            }),
            image_analysis: result.image_analysis.as_ref().map(|i| ImageReportSection {
                likely: i.likely,
                score: i.score,
                ai_score: i.ai_score,
                authenticity_score: i.authenticity_score,
                indicator_count: i.indicators.len(),
            }),
        }
    }
}

impl JsonReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
