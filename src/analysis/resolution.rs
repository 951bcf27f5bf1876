//! Resolution, aspect-ratio and megapixel heuristics. These look only at the
//! stated dimensions, so they run even when the pixel data itself is clean of
//! other signals.

use crate::analysis::image::Evidence;

/// Output sizes commonly produced by generators, matched on total pixel
/// count within a 5000-pixel tolerance.
const AI_OUTPUT_SIZES: [(u64, &str); 6] = [
    (512 * 512, "512×512"),
    (1024 * 1024, "1024×1024"),
    (768 * 768, "768×768"),
    (1024 * 768, "1024×768"),
    (768 * 1024, "768×1024"),
    (2048 * 2048, "2048×2048"),
];

const AI_SQUARE_DIMENSIONS: [u32; 4] = [512, 1024, 768, 2048];

/// Common camera sensor sizes in megapixels with their match windows.
const CAMERA_SENSOR_MEGAPIXELS: [(u32, f64, f64); 11] = [
    (5, 4.5, 5.5),
    (8, 7.5, 8.5),
    (12, 11.5, 12.5),
    (13, 12.5, 13.5),
    (16, 15.5, 16.5),
    (20, 19.5, 21.0),
    (24, 23.0, 25.0),
    (48, 47.0, 49.0),
    (50, 49.0, 51.0),
    (64, 63.0, 65.0),
    (108, 107.0, 109.0),
];

pub(crate) fn score(width: u32, height: u32, evidence: &mut Evidence) {
    let total_pixels = width as u64 * height as u64;
    let megapixels = total_pixels as f64 / 1_000_000.0;
    let ratio = width as f64 / height as f64;

    let matched_ai_size = AI_OUTPUT_SIZES
        .iter()
        .find(|(size, _)| total_pixels.abs_diff(*size) < 5000)
        .map(|(_, name)| *name);

    if let Some(name) = matched_ai_size {
        if matches!(name, "512×512" | "1024×1024" | "768×768") {
            evidence.ai(
                25,
                format!("Resolution {name} matches common AI training/output sizes"),
            );
        } else {
            evidence.ai(
                10,
                format!("Resolution {name} matches AI sizes but could be cropped photo"),
            );
        }
    }

    if (ratio - 1.0).abs() < 0.01 && width == height && AI_SQUARE_DIMENSIONS.contains(&width) {
        evidence.ai(
            20,
            "Perfect square with AI-standard dimensions (strong AI indicator)".into(),
        );
    } else if (ratio - 1.0).abs() < 0.01 && total_pixels > 1_000_000 {
        evidence.ai(
            15,
            "Large square format without camera-typical ratio (common in AI generation)".into(),
        );
    } else if (ratio - 1.0).abs() < 0.01 {
        evidence.authentic(
            5,
            "Square crop (common for social media - could be cropped photo)".into(),
        );
    } else if (ratio - 1.777).abs() < 0.01 && total_pixels < 2_000_000 {
        evidence.ai(
            10,
            "16:9 aspect ratio at lower resolution (common in AI generation)".into(),
        );
    }

    if (ratio - 1.5).abs() < 0.03 {
        evidence.authentic(20, "3:2 aspect ratio (standard for many cameras)".into());
    } else if (ratio - 1.333).abs() < 0.03 {
        evidence.authentic(20, "4:3 aspect ratio (common in cameras and phones)".into());
    } else if (ratio - 1.25).abs() < 0.03 {
        evidence.authentic(15, "5:4 aspect ratio (found in some cameras)".into());
    } else if (ratio - 0.75).abs() < 0.03 {
        evidence.authentic(
            15,
            "Portrait 3:4 ratio (typical phone camera orientation)".into(),
        );
    } else if (ratio - 0.5625).abs() < 0.02 {
        evidence.authentic(
            15,
            "Portrait 9:16 ratio (vertical phone video/photo)".into(),
        );
    }

    let matched_sensor = CAMERA_SENSOR_MEGAPIXELS
        .iter()
        .find(|(_, low, high)| megapixels >= *low && megapixels <= *high)
        .map(|(mp, _, _)| *mp);

    if let Some(mp) = matched_sensor.filter(|_| matched_ai_size.is_none()) {
        evidence.authentic(
            30,
            format!("{mp}MP resolution matches common camera sensors"),
        );
    } else if megapixels > 6.0 && matched_ai_size.is_none() {
        evidence.authentic(
            15,
            format!("{megapixels:.1}MP resolution typical of cameras/phones"),
        );
    }

    if total_pixels > 12_000_000 {
        evidence.authentic(
            25,
            "Very high resolution (>12MP - typical of modern cameras/phones)".into(),
        );
    } else if total_pixels > 8_000_000 && width % 2 == 0 && height % 2 == 0 {
        evidence.authentic(
            20,
            "High resolution with even dimensions (typical of modern cameras)".into(),
        );
    } else if total_pixels > 4_000_000 {
        evidence.authentic(15, "Good resolution (>4MP - suggests real camera/phone)".into());
    } else if total_pixels > 2_000_000 {
        evidence.authentic(10, "Moderate resolution (>2MP - could be real photo)".into());
    }
}
