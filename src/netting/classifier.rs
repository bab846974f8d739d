//! Radial classifier: decides whether a single pixel is netting.
//!
//! For a candidate pixel, rays are cast at `0, angle_step, 2*angle_step, ...`
//! degrees (below 360). Each ray samples `radius` positions, starting at the
//! pixel itself. Samples at or below the background cutoff are left out of
//! the ray mean. The pixel is netting when any ray has
//!
//! - a mean of at least `netting_mean`, and
//! - a mean lower than the pixel intensity by more than `sensitivity`.
//!
//! Ray offsets use truncation toward zero (`cos(angle) * r` cast to an
//! integer), which keeps results reproducible across platforms that agree
//! on the trigonometry.

use super::params::NettingParams;

/// Mask selecting the intensity channel (blue) of a packed `0xRRGGBB` color.
pub const BLUE_RGB: u32 = 0x0000ff;

/// Intensity used for classification.
#[inline]
pub fn blue_intensity(packed: u32) -> u32 {
    packed & BLUE_RGB
}

/// Flat index offsets of every sample on every ray, for one image width.
///
/// Built once per scan and shared read-only between workers.
#[derive(Debug, Clone)]
pub struct RayFan {
    rays: Vec<Vec<isize>>,
    background: u32,
    sensitivity: u32,
    netting_mean: u32,
}

impl RayFan {
    /// Precompute ray offsets for `params` on an image `width` pixels wide.
    ///
    /// `params` must already be validated.
    pub fn new(params: &NettingParams, width: usize) -> Self {
        let step = params.angle_step.max(1) as usize;
        let mut rays = Vec::with_capacity(params.angle_count());
        for degrees in (0..360).step_by(step) {
            rays.push(ray_offsets(degrees as f64, params.radius as usize, width));
        }

        Self {
            rays,
            background: params.background,
            sensitivity: params.sensitivity,
            netting_mean: params.netting_mean,
        }
    }

    /// Number of ray directions.
    pub fn ray_count(&self) -> usize {
        self.rays.len()
    }

    /// Offsets of ray `index`, in sampling order.
    pub fn ray(&self, index: usize) -> &[isize] {
        &self.rays[index]
    }

    /// Classify the pixel at flat index `pos`.
    ///
    /// Every ray sample must fall inside `pixels`; the scanner guarantees this
    /// by only visiting positions inside the scan rectangle.
    pub fn classify(&self, pixels: &[u32], pos: usize) -> bool {
        let value = blue_intensity(pixels[pos]);
        if value < self.background {
            return false;
        }

        self.rays.iter().any(|ray| {
            ray_mean(pixels, pos, ray, self.background)
                .is_some_and(|mean| self.qualifies(value, mean))
        })
    }

    #[inline]
    fn qualifies(&self, value: u32, mean: f64) -> bool {
        mean >= self.netting_mean as f64 && value as f64 - mean > self.sensitivity as f64
    }
}

/// Offsets along one ray: `trunc(cos * r) + trunc(sin * r) * width` for
/// `r` in `0..radius`.
fn ray_offsets(degrees: f64, radius: usize, width: usize) -> Vec<isize> {
    let rad = degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    (0..radius)
        .map(|r| {
            let len = r as f64;
            let dx = (cos * len) as isize;
            let dy = (sin * len) as isize;
            dx + dy * width as isize
        })
        .collect()
}

/// Mean intensity of the samples on `ray` strictly above `background`.
///
/// Returns `None` when no sample qualifies; such a ray never marks netting.
pub fn ray_mean(pixels: &[u32], pos: usize, ray: &[isize], background: u32) -> Option<f64> {
    let mut sum = 0u32;
    let mut count = 0u32;

    for &offset in ray {
        let index = pos as isize + offset;
        debug_assert!(index >= 0 && (index as usize) < pixels.len());
        let z = blue_intensity(pixels[index as usize]);
        if z > background {
            sum += z;
            count += 1;
        }
    }

    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

/// Classify a single pixel without a precomputed fan.
///
/// Convenience for one-off queries; scans should build a [`RayFan`] once.
pub fn classify_pixel(pixels: &[u32], width: usize, pos: usize, params: &NettingParams) -> bool {
    RayFan::new(params, width).classify(pixels, pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(
        angle_step: u32,
        radius: u32,
        sensitivity: u32,
        background: u32,
        netting_mean: u32,
    ) -> NettingParams {
        NettingParams::new(angle_step, radius, sensitivity, background, netting_mean).unwrap()
    }

    fn gray(v: u32) -> u32 {
        (v << 16) | (v << 8) | v
    }

    #[test]
    fn test_blue_channel_only() {
        assert_eq!(blue_intensity(0xff00_00), 0);
        assert_eq!(blue_intensity(0x00ff_00), 0);
        assert_eq!(blue_intensity(0x1234_56), 0x56);
        assert_eq!(blue_intensity(0xff12_3456), 0x56);
    }

    #[test]
    fn test_cardinal_offsets_truncate() {
        // 90 and 270 degrees have tiny non-zero cosines; truncation drops them.
        let fan = RayFan::new(&params(90, 3, 0, 0, 0), 10);
        assert_eq!(fan.ray_count(), 4);
        assert_eq!(fan.ray(0), &[0, 1, 2]);
        assert_eq!(fan.ray(1), &[0, 10, 20]);
        assert_eq!(fan.ray(2), &[0, -1, -2]);
        assert_eq!(fan.ray(3), &[0, -10, -20]);
    }

    #[test]
    fn test_diagonal_offsets_truncate_toward_zero() {
        // 135 degrees: r = 1 gives (-0.707, 0.707) -> (0, 0),
        // r = 2 gives (-1.414, 1.414) -> (-1, 1)
        let fan = RayFan::new(&params(45, 3, 0, 0, 0), 10);
        assert_eq!(fan.ray(3), &[0, 0, -1 + 10]);
        // 225 degrees, r = 2 -> (-1, -1)
        assert_eq!(fan.ray(5), &[0, 0, -11]);
    }

    #[test]
    fn test_angles_stop_below_360() {
        let p = params(7, 2, 0, 0, 0);
        let fan = RayFan::new(&p, 10);
        assert_eq!(fan.ray_count(), 52);
        assert_eq!(fan.ray_count(), p.angle_count());
        let fan = RayFan::new(&params(1, 2, 0, 0, 0), 10);
        assert_eq!(fan.ray_count(), 360);
    }

    #[test]
    fn test_ray_mean_skips_background_samples() {
        let pixels = vec![gray(5), gray(100), gray(200), gray(20)];
        // background 20: 5 and 20 excluded
        let mean = ray_mean(&pixels, 0, &[0, 1, 2, 3], 20).unwrap();
        assert!((mean - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_ray_mean_without_qualifying_samples() {
        let pixels = vec![gray(20), gray(10), gray(0)];
        assert_eq!(ray_mean(&pixels, 0, &[0, 1, 2], 20), None);
        assert_eq!(ray_mean(&pixels, 0, &[], 0), None);
    }

    #[test]
    fn test_dark_pixel_is_background() {
        let mut pixels = vec![gray(250); 9 * 9];
        pixels[4 * 9 + 4] = gray(19);
        let p = params(30, 4, 0, 20, 0);
        assert!(!classify_pixel(&pixels, 9, 4 * 9 + 4, &p));
    }

    #[test]
    fn test_radius_one_never_netting() {
        // Only r = 0 is sampled: the ray mean equals the pixel itself.
        let mut pixels = vec![gray(50); 5 * 5];
        pixels[12] = gray(200);
        let p = params(90, 1, 0, 0, 0);
        assert!(!classify_pixel(&pixels, 5, 12, &p));
    }

    #[test]
    fn test_zero_sample_rays_never_netting() {
        // Pixel sits exactly at the cutoff, every neighbour below it:
        // no ray collects a sample.
        let mut pixels = vec![gray(3); 7 * 7];
        pixels[3 * 7 + 3] = gray(40);
        let p = params(90, 3, 0, 40, 0);
        let fan = RayFan::new(&p, 7);
        for i in 0..fan.ray_count() {
            assert_eq!(ray_mean(&pixels, 24, fan.ray(i), 40), None);
        }
        assert!(!fan.classify(&pixels, 24));
    }

    #[test]
    fn test_any_single_direction_suffices() {
        // 7x7, radius 3, rays at 0 and 180 degrees. Right side is dark
        // background, left side is bright netting-level intensity.
        let width = 7;
        let mut pixels = vec![gray(5); width * width];
        let center = 3 * width + 3;
        pixels[center] = gray(200);
        pixels[center - 1] = gray(140);
        pixels[center - 2] = gray(140);

        let p = params(180, 3, 10, 20, 110);
        let fan = RayFan::new(&p, width);

        // 0 degrees: only the centre qualifies, mean 200, no drop.
        let right = ray_mean(&pixels, center, fan.ray(0), 20).unwrap();
        assert!((right - 200.0).abs() < 1e-9);
        // 180 degrees: (200 + 140 + 140) / 3 = 160
        let left = ray_mean(&pixels, center, fan.ray(1), 20).unwrap();
        assert!((left - 160.0).abs() < 1e-9);

        assert!(fan.classify(&pixels, center));
    }

    #[test]
    fn test_mean_below_netting_cutoff_rejected() {
        let width = 7;
        let mut pixels = vec![gray(5); width * width];
        let center = 3 * width + 3;
        pixels[center] = gray(200);
        pixels[center - 1] = gray(140);
        pixels[center - 2] = gray(140);

        // Ray mean 160 < 170.
        let p = params(180, 3, 10, 20, 170);
        assert!(!classify_pixel(&pixels, width, center, &p));
    }

    #[test]
    fn test_drop_must_exceed_sensitivity() {
        let width = 7;
        let mut pixels = vec![gray(5); width * width];
        let center = 3 * width + 3;
        pixels[center] = gray(200);
        pixels[center - 1] = gray(140);
        pixels[center - 2] = gray(140);

        // Drop is exactly 40: not strictly greater.
        assert!(!classify_pixel(&pixels, width, center, &params(180, 3, 40, 20, 110)));
        assert!(classify_pixel(&pixels, width, center, &params(180, 3, 39, 20, 110)));
    }

    #[test]
    fn test_uniform_bright_area_not_netting() {
        let pixels = vec![gray(180); 21 * 21];
        let p = params(30, 10, 0, 20, 110);
        assert!(!classify_pixel(&pixels, 21, 10 * 21 + 10, &p));
    }

    #[test]
    fn test_only_blue_channel_matters() {
        // Red and green are saturated but blue is dark.
        let width = 7;
        let mut pixels = vec![0xffff_05; width * width];
        let center = 3 * width + 3;
        pixels[center] = 0x0000_c8;
        pixels[center - 1] = 0x0000_8c;
        pixels[center - 2] = 0x0000_8c;

        assert!(classify_pixel(&pixels, width, center, &params(180, 3, 10, 20, 110)));
    }
}
