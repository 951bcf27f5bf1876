use rayon::prelude::*;
use statrs::statistics::Statistics;

use crate::DetectorConfig;
use crate::pixel::{PixelBuffer, Region, luminance};

/// Raw statistics gathered from the scan region before any scoring. Each
/// field is produced by exactly one pass; the scoring rules read them freely.
#[derive(Debug, Clone, Default)]
pub struct PixelStats {
    /// Mean per-pixel RGB delta between horizontally consecutive pixels.
    pub avg_gradient: f64,
    /// Sampled pixel pairs whose red delta sits in the 1..=5 band, the
    /// signature of camera sensor noise.
    pub noise_level: u32,
    /// Sampled triples of consecutive gradients that are equal and small,
    /// a rendering signature.
    pub perfect_gradients: u32,
    /// Sampled triples with zero total gradient (flat color runs).
    pub extremely_uniform_regions: u32,
    /// Block-to-block deltas in the 2..=29 band over the 8-strided grid,
    /// characteristic of lossy photographic encoding.
    pub compression_artifacts: u32,
    pub sharp_edges: u32,
    pub blurry_edges: u32,
    pub chromatic_aberration: u32,
    pub contrast_mean: f64,
    pub contrast_std_dev: f64,
    pub saturated_pixels: u32,
    pub perfect_colors: u32,
    pub very_perfect_colors: u32,
    /// Populated 16-level histogram bins summed across the three channels.
    pub unique_colors: u32,
    /// Pixels inspected by the color pass.
    pub color_samples: u32,
}

impl PixelStats {
    pub fn collect(buffer: &PixelBuffer, config: &DetectorConfig) -> Self {
        let region = buffer.region(config.scan_size);

        let mut stats = Self::default();
        stats.scan_gradients(&region);
        stats.scan_compression(&region, config.block_scan_size);
        stats.scan_edges(&region, config.edge_scan_size);
        stats.scan_chromatic_aberration(&region, config.aberration_scan_size);
        stats.scan_local_contrast(&region, config.contrast_scan_size);
        stats.scan_colors(&region, config.color_sample_limit);
        stats
    }

    /// Sequential scan over consecutive pixels. Every pixel contributes to
    /// the gradient sum; every 10th is sampled for sensor noise and every
    /// 25th for perfect/flat gradient triples.
    fn scan_gradients(&mut self, region: &Region) {
        let p = &region.data;
        let len = p.len();
        let mut gradient_sum = 0u64;

        for i in (0..len.saturating_sub(40)).step_by(4) {
            let diff = p[i].abs_diff(p[i + 4]) as u64
                + p[i + 1].abs_diff(p[i + 5]) as u64
                + p[i + 2].abs_diff(p[i + 6]) as u64;
            gradient_sum += diff;

            if i % 40 == 0 && i < len - 8 {
                let local_variance = p[i].abs_diff(p[i + 8]);
                if local_variance > 0 && local_variance < 6 {
                    self.noise_level += 1;
                }
            }

            if i % 100 == 0 && i < len - 20 {
                let grad1 = p[i].abs_diff(p[i + 4]);
                let grad2 = p[i + 4].abs_diff(p[i + 8]);
                let grad3 = p[i + 8].abs_diff(p[i + 12]);

                if grad1 == grad2 && grad2 == grad3 && grad1 > 0 && grad1 < 3 {
                    self.perfect_gradients += 1;
                }

                if grad1 as u32 + grad2 as u32 + grad3 as u32 == 0 {
                    self.extremely_uniform_regions += 1;
                }
            }
        }

        self.avg_gradient = gradient_sum as f64 / (len / 4) as f64;
    }

    fn scan_compression(&mut self, region: &Region, max: usize) {
        let p = &region.data;

        for y in (0..max.min(region.height)).step_by(8) {
            for x in (0..max.min(region.width)).step_by(8) {
                let idx = (y * region.width + x) * 4;
                if idx + 32 < p.len() {
                    let block_diff = p[idx].abs_diff(p[idx + 32]);
                    if block_diff > 1 && block_diff < 30 {
                        self.compression_artifacts += 1;
                    }
                }
            }
        }
    }

    /// Sobel magnitude on the red channel at strided interior points.
    fn scan_edges(&mut self, region: &Region, max: usize) {
        if region.height < 11 || region.width < 11 {
            return;
        }

        let p = &region.data;
        let row = region.width * 4;

        for y in (5..max.min(region.height - 5)).step_by(10) {
            for x in (5..max.min(region.width - 5)).step_by(10) {
                let idx = (y * region.width + x) * 4;
                let at = |offset: isize| p[(idx as isize + offset) as usize] as f64;
                let row = row as isize;

                let gx = (-at(-row - 4) + at(-row + 4) - 2.0 * at(-4) + 2.0 * at(4)
                    - at(row - 4)
                    + at(row + 4))
                .abs();
                let gy = (-at(-row - 4) - 2.0 * at(-row) - at(-row + 4)
                    + at(row - 4)
                    + 2.0 * at(row)
                    + at(row + 4))
                .abs();

                let magnitude = (gx * gx + gy * gy).sqrt();
                if magnitude > 100.0 {
                    self.sharp_edges += 1;
                } else if magnitude > 30.0 && magnitude < 60.0 {
                    self.blurry_edges += 1;
                }
            }
        }
    }

    /// Lens aberration shows up as diverging per-channel deltas against the
    /// horizontally adjacent pixel.
    fn scan_chromatic_aberration(&mut self, region: &Region, max: usize) {
        if region.height < 21 || region.width < 21 {
            return;
        }

        let p = &region.data;

        for y in (10..max.min(region.height - 10)).step_by(15) {
            for x in (10..max.min(region.width - 10)).step_by(15) {
                let idx = (y * region.width + x) * 4;

                let r_diff = p[idx].abs_diff(p[idx - 4]) as i32;
                let g_diff = p[idx + 1].abs_diff(p[idx - 3]) as i32;
                let b_diff = p[idx + 2].abs_diff(p[idx - 2]) as i32;

                if (r_diff - b_diff).abs() > 10
                    && (r_diff - g_diff).abs() > 5
                    && (b_diff - g_diff).abs() > 5
                {
                    self.chromatic_aberration += 1;
                }
            }
        }
    }

    /// 5x5 luminance windows at stride 25; records max-min per window and
    /// reduces to mean / population standard deviation.
    fn scan_local_contrast(&mut self, region: &Region, max: usize) {
        if region.height < 41 || region.width < 41 {
            return;
        }

        let mut points = Vec::new();
        for y in (20..max.min(region.height - 20)).step_by(25) {
            for x in (20..max.min(region.width - 20)).step_by(25) {
                points.push((x, y));
            }
        }

        let contrasts: Vec<f64> = points
            .par_iter()
            .map(|&(x, y)| {
                let mut min_val = f64::MAX;
                let mut max_val = f64::MIN;
                for dy in -2i64..=2 {
                    for dx in -2i64..=2 {
                        let px = (x as i64 + dx) as usize;
                        let py = (y as i64 + dy) as usize;
                        let idx = (py * region.width + px) * 4;
                        let lum = luminance(
                            region.data[idx],
                            region.data[idx + 1],
                            region.data[idx + 2],
                        );
                        min_val = min_val.min(lum);
                        max_val = max_val.max(lum);
                    }
                }
                max_val - min_val
            })
            .collect();

        if !contrasts.is_empty() {
            self.contrast_mean = (&contrasts).mean();
            self.contrast_std_dev = (&contrasts).population_std_dev();
        }
    }

    fn scan_colors(&mut self, region: &Region, sample_limit: usize) {
        let p = &region.data;
        let mut histogram = ndarray::Array2::<u32>::zeros((3, 16));

        for i in (0..sample_limit.min(p.len())).step_by(4) {
            let (r, g, b) = (p[i], p[i + 1], p[i + 2]);
            self.color_samples += 1;

            if r > 250 || g > 250 || b > 250 || r < 5 || g < 5 || b < 5 {
                self.saturated_pixels += 1;
            }
            if r % 10 == 0 && g % 10 == 0 && b % 10 == 0 {
                self.perfect_colors += 1;
            }
            if r % 15 == 0 && g % 15 == 0 && b % 15 == 0 {
                self.very_perfect_colors += 1;
            }

            histogram[[0, (r / 16) as usize]] += 1;
            histogram[[1, (g / 16) as usize]] += 1;
            histogram[[2, (b / 16) as usize]] += 1;
        }

        self.unique_colors = histogram.iter().filter(|&&count| count > 0).count() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_buffer(width: u32, height: u32, value: u8) -> PixelBuffer {
        let mut data = vec![value; (width * height * 4) as usize];
        for alpha in data.iter_mut().skip(3).step_by(4) {
            *alpha = 255;
        }
        PixelBuffer::new(width, height, data).unwrap()
    }

    /// Deterministic low-amplitude jitter, standing in for sensor noise.
    fn noisy_buffer(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        let mut state = 0x2545f491u32;
        for _ in 0..width * height {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            let jitter = (state >> 28) as u8; // 0..=15
            data.extend_from_slice(&[120 + jitter, 120 + jitter, 120 + jitter, 255]);
        }
        PixelBuffer::new(width, height, data).unwrap()
    }

    #[test]
    fn flat_buffer_is_extremely_uniform() {
        let stats = PixelStats::collect(&flat_buffer(300, 300, 128), &DetectorConfig::default());
        assert!(stats.extremely_uniform_regions > 20);
        assert_eq!(stats.noise_level, 0);
        assert_eq!(stats.perfect_gradients, 0);
        assert_eq!(stats.compression_artifacts, 0);
        assert_eq!(stats.avg_gradient, 0.0);
        assert_eq!(stats.sharp_edges, 0);
        // single gray value occupies one histogram bin per channel
        assert_eq!(stats.unique_colors, 3);
        assert_eq!(stats.color_samples, 3750);
    }

    #[test]
    fn jittered_buffer_registers_sensor_noise() {
        let stats = PixelStats::collect(&noisy_buffer(300, 300), &DetectorConfig::default());
        assert!(stats.noise_level > 30, "noise level {}", stats.noise_level);
        assert!(stats.extremely_uniform_regions < 20);
    }

    #[test]
    fn tiny_buffer_does_not_panic() {
        let stats = PixelStats::collect(&flat_buffer(3, 2, 10), &DetectorConfig::default());
        assert_eq!(stats.sharp_edges, 0);
        assert_eq!(stats.chromatic_aberration, 0);
        assert_eq!(stats.color_samples, 6);
    }

    #[test]
    fn collect_is_deterministic() {
        let buffer = noisy_buffer(128, 96);
        let config = DetectorConfig::default();
        let a = PixelStats::collect(&buffer, &config);
        let b = PixelStats::collect(&buffer, &config);
        assert_eq!(a.noise_level, b.noise_level);
        assert_eq!(a.avg_gradient, b.avg_gradient);
        assert_eq!(a.contrast_std_dev, b.contrast_std_dev);
    }
}
