use log::debug;

use crate::ImageAnalysis;
use crate::analysis::{pixel_stats::PixelStats, resolution};
use crate::pixel::PixelBuffer;
use crate::DetectorConfig;

/// The two opposing accumulators plus their indicator lists. Every scoring
/// rule pushes into exactly one side per finding.
#[derive(Debug, Default)]
pub(crate) struct Evidence {
    pub ai_score: u32,
    pub authenticity_score: u32,
    pub ai: Vec<String>,
    pub authentic: Vec<String>,
}

impl Evidence {
    pub fn ai(&mut self, weight: u32, indicator: String) {
        self.ai_score += weight;
        self.ai.push(indicator);
    }

    pub fn authentic(&mut self, weight: u32, indicator: String) {
        self.authenticity_score += weight;
        self.authentic.push(indicator);
    }
}

/// Applies every scoring rule in a fixed order so the indicator lists come
/// out stable. Mutually exclusive chains live inside a single rule.
fn apply_rules(stats: &PixelStats, total_pixels: u64, evidence: &mut Evidence) {
    rule_flat_regions(stats, evidence);
    rule_perfect_gradients(stats, evidence);
    rule_clean_detail(stats, evidence);
    rule_consistent_gradients(stats, evidence);
    rule_edge_sharpness(stats, evidence);
    rule_chromatic_aberration(stats, total_pixels, evidence);
    rule_local_contrast(stats, evidence);
    rule_noise_tiers(stats, evidence);
    rule_flat_and_noiseless(stats, evidence);
    rule_smoothness_composite(stats, evidence);
    rule_compression(stats, evidence);
    rule_colors(stats, evidence);
}

fn rule_flat_regions(stats: &PixelStats, evidence: &mut Evidence) {
    if stats.extremely_uniform_regions > 20 {
        evidence.ai(
            30,
            format!(
                "Flat color regions detected ({} areas - typical of AI-generated art/animation)",
                stats.extremely_uniform_regions
            ),
        );
    }
}

fn rule_perfect_gradients(stats: &PixelStats, evidence: &mut Evidence) {
    if stats.perfect_gradients > 15 {
        evidence.ai(
            25,
            format!(
                "Perfect gradient patterns ({} instances - AI rendering characteristic)",
                stats.perfect_gradients
            ),
        );
    }
}

fn rule_clean_detail(stats: &PixelStats, evidence: &mut Evidence) {
    if stats.noise_level < 3 && stats.avg_gradient > 12.0 && stats.compression_artifacts < 5 {
        evidence.ai(
            35,
            "No sensor noise with minimal compression despite detail (suspicious combination for real photo)"
                .into(),
        );
    }
}

fn rule_consistent_gradients(stats: &PixelStats, evidence: &mut Evidence) {
    if stats.perfect_gradients > 5
        && stats.perfect_gradients < 15
        && stats.extremely_uniform_regions < 10
        && stats.noise_level < 5
    {
        evidence.ai(
            30,
            format!(
                "Consistent gradients with no noise ({} patterns - hyper-realistic AI indicator)",
                stats.perfect_gradients
            ),
        );
    }
}

fn rule_edge_sharpness(stats: &PixelStats, evidence: &mut Evidence) {
    if stats.blurry_edges > stats.sharp_edges * 2 && stats.sharp_edges < 20 {
        evidence.ai(
            35,
            format!(
                "Suspiciously smooth edges ({} blurry vs {} sharp - AI characteristic)",
                stats.blurry_edges, stats.sharp_edges
            ),
        );
    } else if stats.sharp_edges > 30 {
        evidence.authentic(
            25,
            format!(
                "Natural edge sharpness detected ({} sharp edges - indicates real optics)",
                stats.sharp_edges
            ),
        );
    }
}

fn rule_local_contrast(stats: &PixelStats, evidence: &mut Evidence) {
    if stats.contrast_std_dev < 10.0 && stats.contrast_mean > 20.0 {
        evidence.ai(
            25,
            format!(
                "Suspiciously uniform local contrast (σ={:.1} - AI over-processing)",
                stats.contrast_std_dev
            ),
        );
    } else if stats.contrast_std_dev > 25.0 {
        evidence.authentic(
            20,
            format!(
                "Natural contrast variation (σ={:.1} - real scene characteristic)",
                stats.contrast_std_dev
            ),
        );
    }
}

fn rule_noise_tiers(stats: &PixelStats, evidence: &mut Evidence) {
    let n = stats.noise_level;
    if n > 30 {
        evidence.authentic(
            40,
            format!("Natural sensor noise detected ({n} samples - indicates real camera)"),
        );
    } else if n > 15 {
        evidence.authentic(
            30,
            format!("Sensor noise present ({n} samples - typical of real photos)"),
        );
    } else if n > 8 {
        evidence.authentic(
            20,
            format!("Moderate noise level ({n} samples - suggests real photo)"),
        );
    } else if n > 4 {
        evidence.authentic(
            10,
            format!("Low noise level ({n} samples - could be real photo with good lighting)"),
        );
    }
}

fn rule_flat_and_noiseless(stats: &PixelStats, evidence: &mut Evidence) {
    if stats.noise_level < 3 && stats.extremely_uniform_regions > 20 {
        evidence.ai(
            20,
            format!(
                "Almost no noise with very flat regions ({} samples - strong AI indicator)",
                stats.noise_level
            ),
        );
    }
}

/// Priority-ordered smoothness/texture tradeoff; only the first matching arm
/// applies.
fn rule_smoothness_composite(stats: &PixelStats, evidence: &mut Evidence) {
    let g = stats.avg_gradient;
    if g < 6.0 && stats.perfect_gradients > 20 {
        evidence.ai(
            35,
            format!("Extremely smooth transitions (gradient: {g:.1} - strong AI indicator)"),
        );
    } else if g < 10.0 && stats.extremely_uniform_regions > 15 && stats.perfect_gradients > 10 {
        evidence.ai(
            25,
            format!("Very smooth with uniform regions (gradient: {g:.1} - AI characteristic)"),
        );
    } else if (15.0..=25.0).contains(&g) && stats.noise_level < 5 && stats.compression_artifacts < 5
    {
        evidence.ai(
            25,
            format!(
                "Moderate detail with no noise or compression (gradient: {g:.1} - suspicious for real photo)"
            ),
        );
    } else if g > 20.0 && stats.noise_level > 5 {
        evidence.authentic(
            30,
            format!("Good texture complexity with noise (gradient: {g:.1} - indicates real photo)"),
        );
    } else if g > 20.0 {
        evidence.authentic(
            20,
            format!("Good texture complexity (gradient: {g:.1} - indicates real photo)"),
        );
    } else if g > 12.0 && stats.noise_level > 5 {
        evidence.authentic(
            20,
            format!("Moderate texture variation with noise (gradient: {g:.1} - typical of photos)"),
        );
    } else if g > 12.0 {
        evidence.authentic(
            10,
            format!("Moderate texture variation (gradient: {g:.1} - typical of photos)"),
        );
    }
}

fn rule_compression(stats: &PixelStats, evidence: &mut Evidence) {
    let c = stats.compression_artifacts;
    if c > 20 {
        evidence.authentic(
            45,
            format!("JPEG compression artifacts detected ({c} patterns - strong indicator of real photo)"),
        );
    } else if c > 10 {
        evidence.authentic(
            35,
            format!("Good compression artifacts present ({c} patterns - suggests real photo)"),
        );
    } else if c > 5 {
        evidence.authentic(
            25,
            format!("Some compression detected ({c} patterns - likely real photo)"),
        );
    } else if c > 2 {
        evidence.authentic(
            15,
            format!("Minimal compression detected ({c} patterns - could be real photo)"),
        );
    } else if stats.noise_level < 5 && stats.avg_gradient > 12.0 {
        evidence.ai(
            30,
            format!(
                "Almost no compression artifacts with clean pixels ({c} patterns - highly suspicious for photos with detail)"
            ),
        );
    }

    if c == 0 && stats.avg_gradient < 10.0 {
        evidence.ai(
            15,
            "No compression artifacts with smooth pixels - unusual for real photos".into(),
        );
    }
}

fn rule_chromatic_aberration(stats: &PixelStats, total_pixels: u64, evidence: &mut Evidence) {
    if stats.chromatic_aberration > 8 {
        evidence.authentic(
            30,
            format!(
                "Chromatic aberration detected ({} instances - real lens characteristic)",
                stats.chromatic_aberration
            ),
        );
    } else if stats.chromatic_aberration < 2 && total_pixels > 2_000_000 {
        evidence.ai(
            15,
            "No chromatic aberration in high-res image (unusual for real lenses)".into(),
        );
    }
}

fn rule_colors(stats: &PixelStats, evidence: &mut Evidence) {
    let saturation_rate = if stats.color_samples > 0 {
        stats.saturated_pixels as f64 / stats.color_samples as f64 * 100.0
    } else {
        0.0
    };

    if saturation_rate > 25.0 && stats.extremely_uniform_regions > 10 {
        evidence.ai(
            20,
            format!(
                "Very high saturation rate ({saturation_rate:.1}% - AI images often oversaturated)"
            ),
        );
    }

    if stats.very_perfect_colors > 30 {
        evidence.ai(
            30,
            format!(
                "Unusually many mathematically perfect colors ({} - hyper-realistic AI signature)",
                stats.very_perfect_colors
            ),
        );
    } else if stats.perfect_colors > 250 && stats.extremely_uniform_regions > 10 {
        evidence.ai(
            15,
            format!(
                "Many \"perfect\" color values ({} - unusual for natural photos)",
                stats.perfect_colors
            ),
        );
    }

    if stats.unique_colors > 38 {
        evidence.authentic(
            25,
            format!(
                "Rich color distribution ({} unique tones - typical of real photos)",
                stats.unique_colors
            ),
        );
    } else if stats.unique_colors > 30 {
        evidence.authentic(
            15,
            format!(
                "Good color variety ({} tones - suggests real photo)",
                stats.unique_colors
            ),
        );
    } else if stats.unique_colors < 25 && stats.extremely_uniform_regions > 15 {
        evidence.ai(
            20,
            format!(
                "Limited color palette with flat regions ({} tones - may indicate AI)",
                stats.unique_colors
            ),
        );
    }
}

const MANUAL_CHECKLIST: [&str; 8] = [
    "🔍 MANUAL INSPECTION CHECKLIST:",
    "   • Hands: Count fingers (should be 5), check proportions and nail details",
    "   • Eyes: Verify reflections match environment, pupils are consistent",
    "   • Teeth: Check alignment, number of teeth, natural variations",
    "   • Text/Logos: Should be legible, correctly spelled, not warped",
    "   • Background: Check for warped objects, melted textures, impossible geometry",
    "   • Lighting: Shadows should be consistent with visible light sources",
    "   • Details: Zoom in on hair, jewelry, fabric - should maintain consistent quality",
];

/// Scans a decoded pixel buffer for statistical signatures that separate
/// camera photographs from synthetic imagery. Produces two opposing score
/// accumulators and a narrated verdict.
pub struct ImageAnalyzer {
    config: DetectorConfig,
}

impl ImageAnalyzer {
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, buffer: &PixelBuffer) -> ImageAnalysis {
        if !buffer.is_readable() {
            return ImageAnalysis::pixels_unavailable();
        }

        let stats = PixelStats::collect(buffer, &self.config);
        debug!("pixel statistics: {stats:?}");

        let mut evidence = Evidence::default();
        apply_rules(&stats, buffer.total_pixels(), &mut evidence);
        resolution::score(buffer.width, buffer.height, &mut evidence);

        Self::verdict(buffer.width, buffer.height, evidence)
    }

    fn verdict(width: u32, height: u32, evidence: Evidence) -> ImageAnalysis {
        let megapixels = width as f64 * height as f64 / 1_000_000.0;
        let Evidence {
            ai_score,
            authenticity_score,
            ai,
            authentic,
        } = evidence;

        let weighted_ai = ai_score as f64;
        let weighted_auth = authenticity_score as f64 * 1.5;

        let mut indicators = Vec::new();
        indicators.push(format!("📐 Image: {width}×{height} ({megapixels:.1}MP)"));
        indicators.push(String::new());

        if weighted_auth > weighted_ai && authenticity_score > 25 {
            indicators.push(
                "🎯 VERDICT: Strong indicators this is a genuine photograph from a real camera"
                    .into(),
            );
            indicators.push(String::new());
            indicators.push("✅ AUTHENTICITY INDICATORS:".into());
            indicators.extend(authentic.iter().map(|i| format!("   ✓ {i}")));
            if !ai.is_empty() {
                indicators.push(String::new());
                indicators.push("⚠️ SOME AI-LIKE CHARACTERISTICS:".into());
                indicators.extend(ai.iter().map(|i| format!("   • {i}")));
            }
        } else if weighted_ai > weighted_auth && ai_score > 40 {
            indicators.push("⚠️ VERDICT: Strong indicators suggest AI generation".into());
            indicators.push(String::new());
            indicators.push("🤖 AI GENERATION INDICATORS:".into());
            indicators.extend(ai.iter().map(|i| format!("   • {i}")));
            if !authentic.is_empty() {
                indicators.push(String::new());
                indicators.push("✅ SOME AUTHENTIC CHARACTERISTICS:".into());
                indicators.extend(authentic.iter().map(|i| format!("   ✓ {i}")));
            }
        } else {
            indicators
                .push("📊 VERDICT: Analysis inconclusive - mixed or insufficient indicators".into());
            indicators.push(String::new());
            if !authentic.is_empty() {
                indicators.push("✅ AUTHENTIC CHARACTERISTICS:".into());
                indicators.extend(authentic.iter().map(|i| format!("   ✓ {i}")));
                indicators.push(String::new());
            }
            if !ai.is_empty() {
                indicators.push("🤖 AI-LIKE CHARACTERISTICS:".into());
                indicators.extend(ai.iter().map(|i| format!("   • {i}")));
            }
        }

        indicators.push(String::new());
        indicators.extend(MANUAL_CHECKLIST.iter().map(|line| line.to_string()));

        let final_score = (weighted_ai - weighted_auth * 0.5).clamp(0.0, 100.0);

        ImageAnalysis {
            likely: final_score > 30.0 && ai_score > 40,
            score: final_score.round() as u32,
            ai_score,
            authenticity_score,
            indicators,
        }
    }
}

impl Default for ImageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
