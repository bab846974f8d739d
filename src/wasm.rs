//! WebAssembly exports for the netting detector.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images are
//! passed as flat RGBA bytes (`width * height * 4`), as produced by a canvas
//! `ImageData`.

use wasm_bindgen::prelude::*;

use crate::netting::{
    markers_to_mask, markers_to_rgba, pack_rgba_bytes, scan, NettingError, NettingParams,
    NeverCancel, NoProgress, Rect,
};

fn to_js_err(err: NettingError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn detect(
    data: &[u8],
    width: usize,
    height: usize,
    params: NettingParams,
) -> Result<Vec<u32>, JsValue> {
    let pixels = pack_rgba_bytes(data, width, height).map_err(to_js_err)?;
    let roi = Rect::full(width, height);
    let result = scan(&pixels, width, height, &roi, &params, &NoProgress, &NeverCancel)
        .map_err(to_js_err)?;
    Ok(result.into_markers())
}

// ============================================================================
// Netting Detection
// ============================================================================

/// Detect netting in an RGBA u8 image.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `angle_step`, `radius`, `sensitivity`, `background`, `netting_mean` - Detector controls
///
/// # Returns
/// Flat array of RGBA bytes, black where netting was found, white elsewhere
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn detect_netting_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    angle_step: u32,
    radius: u32,
    sensitivity: u32,
    background: u32,
    netting_mean: u32,
) -> Result<Vec<u8>, JsValue> {
    let params = NettingParams {
        angle_step,
        radius,
        sensitivity,
        background,
        netting_mean,
    };
    let markers = detect(data, width, height, params)?;
    Ok(markers_to_rgba(&markers, width, height).into_raw_vec_and_offset().0)
}

/// Detect netting and return a single-channel mask (255 = netting).
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn netting_mask_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    angle_step: u32,
    radius: u32,
    sensitivity: u32,
    background: u32,
    netting_mean: u32,
) -> Result<Vec<u8>, JsValue> {
    let params = NettingParams {
        angle_step,
        radius,
        sensitivity,
        background,
        netting_mean,
    };
    let markers = detect(data, width, height, params)?;
    Ok(markers_to_mask(&markers, width, height).into_raw_vec_and_offset().0)
}
