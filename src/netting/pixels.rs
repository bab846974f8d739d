//! Conversion between `(height, width, channels)` arrays and packed colors.
//!
//! The detector works on packed `0xRRGGBB` values. Bindings receive images
//! as `ndarray` views and hand results back as RGBA arrays or masks.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1) - value replicated into R, G and B
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4) - alpha is ignored

use ndarray::{Array2, Array3, ArrayView3};

use super::error::NettingError;
use super::scan::NETTING_MARKER;

/// Pack an image into row-major `0xRRGGBB` values.
pub fn pack_rgb(input: ArrayView3<u8>) -> Result<Vec<u32>, NettingError> {
    let (height, width, channels) = input.dim();
    if !matches!(channels, 1 | 3 | 4) {
        return Err(NettingError::UnsupportedChannels(channels));
    }

    let mut packed = Vec::with_capacity(height * width);
    for y in 0..height {
        for x in 0..width {
            let (r, g, b) = if channels == 1 {
                let v = input[[y, x, 0]];
                (v, v, v)
            } else {
                (input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]])
            };
            packed.push(((r as u32) << 16) | ((g as u32) << 8) | b as u32);
        }
    }
    Ok(packed)
}

/// Pack a flat RGBA byte buffer (`width * height * 4` long).
pub fn pack_rgba_bytes(data: &[u8], width: usize, height: usize) -> Result<Vec<u32>, NettingError> {
    let view = ArrayView3::from_shape((height, width, 4), data).map_err(|_| {
        NettingError::BufferSizeMismatch {
            expected: width.saturating_mul(height).saturating_mul(4),
            actual: data.len(),
        }
    })?;
    pack_rgb(view)
}

/// Render markers as an opaque RGBA image.
pub fn markers_to_rgba(markers: &[u32], width: usize, height: usize) -> Array3<u8> {
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            let m = markers[y * width + x];
            output[[y, x, 0]] = ((m >> 16) & 0xff) as u8;
            output[[y, x, 1]] = ((m >> 8) & 0xff) as u8;
            output[[y, x, 2]] = (m & 0xff) as u8;
            output[[y, x, 3]] = 255;
        }
    }
    output
}

/// Binary mask: 255 where netting was found, 0 elsewhere.
pub fn markers_to_mask(markers: &[u32], width: usize, height: usize) -> Array2<u8> {
    Array2::from_shape_fn((height, width), |(y, x)| {
        if markers[y * width + x] == NETTING_MARKER {
            255
        } else {
            0
        }
    })
}
