//! Melon Netting Detector
//!
//! Classifies the pixels of an image as netting (the raised texture on a
//! melon rind) or background using per-pixel radial intensity sampling,
//! with Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! The detector core works on flat, row-major buffers of packed `0xRRGGBB`
//! colors. Only the blue channel is used as intensity. The bindings accept
//! `(height, width, channels)` arrays with 1, 3 or 4 channels:
//! - **Grayscale**: (height, width, 1) - replicated into all channels
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4) - alpha is ignored
//!
//! ## Output
//! One marker per pixel: black for netting, white for background. Pixels
//! closer than `radius` to the region border are never scanned and stay
//! white.

pub mod netting;

#[cfg(feature = "wasm")]
pub mod wasm;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::netting::{
        markers_to_mask, markers_to_rgba, pack_rgb, scan, scan_parallel, Classification,
        NettingError, NettingParams, NeverCancel, NoProgress, Rect,
    };

    fn to_py_err(err: NettingError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    /// Pack the image, validate inputs and scan with the GIL released.
    #[allow(clippy::too_many_arguments)]
    fn detect(
        py: Python<'_>,
        image: PyReadonlyArray3<'_, u8>,
        angle_step: u32,
        radius: u32,
        sensitivity: u32,
        background: u32,
        netting_mean: u32,
        roi: Option<(usize, usize, usize, usize)>,
        parallel: bool,
    ) -> PyResult<Classification> {
        let params = NettingParams::new(angle_step, radius, sensitivity, background, netting_mean)
            .map_err(to_py_err)?;
        let input = image.as_array();
        let (height, width, _) = input.dim();
        let pixels = pack_rgb(input).map_err(to_py_err)?;
        let roi = roi
            .map(|(left, top, w, h)| Rect::new(left, top, w, h))
            .unwrap_or_else(|| Rect::full(width, height));

        py.allow_threads(|| {
            if parallel {
                scan_parallel(&pixels, width, height, &roi, &params, &NoProgress, &NeverCancel)
            } else {
                scan(&pixels, width, height, &roi, &params, &NoProgress, &NeverCancel)
            }
        })
        .map_err(to_py_err)
    }

    // ========================================================================
    // Netting Detection
    // ========================================================================

    /// Detect netting and return an RGBA image (black = netting, white = background).
    ///
    /// # Arguments
    /// * `image` - Input image (1, 3, or 4 channels), blue channel is used as intensity
    /// * `angle_step` - Degrees between ray directions (1-180)
    /// * `radius` - Ray length in pixels (1-100)
    /// * `sensitivity` - Minimum intensity drop to the ray mean (0-255)
    /// * `background` - Background intensity cutoff (0-255)
    /// * `netting_mean` - Minimum ray mean intensity (0-255)
    /// * `roi` - Optional (left, top, width, height) region of interest
    /// * `parallel` - Scan rows on the rayon thread pool
    #[pyfunction]
    #[pyo3(signature = (
        image,
        angle_step=30,
        radius=50,
        sensitivity=10,
        background=20,
        netting_mean=110,
        roi=None,
        parallel=true
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn detect_netting<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        angle_step: u32,
        radius: u32,
        sensitivity: u32,
        background: u32,
        netting_mean: u32,
        roi: Option<(usize, usize, usize, usize)>,
        parallel: bool,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = detect(
            py, image, angle_step, radius, sensitivity, background, netting_mean, roi, parallel,
        )?;
        let rgba = markers_to_rgba(&result.markers, result.width, result.height);
        Ok(rgba.into_pyarray(py))
    }

    /// Detect netting and return a (height, width) mask (255 = netting).
    #[pyfunction]
    #[pyo3(signature = (
        image,
        angle_step=30,
        radius=50,
        sensitivity=10,
        background=20,
        netting_mean=110,
        roi=None,
        parallel=true
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn netting_mask<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        angle_step: u32,
        radius: u32,
        sensitivity: u32,
        background: u32,
        netting_mean: u32,
        roi: Option<(usize, usize, usize, usize)>,
        parallel: bool,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let result = detect(
            py, image, angle_step, radius, sensitivity, background, netting_mean, roi, parallel,
        )?;
        let mask = markers_to_mask(&result.markers, result.width, result.height);
        Ok(mask.into_pyarray(py))
    }

    /// Melon netting extension module
    #[pymodule]
    pub fn melon_netting(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(detect_netting, m)?)?;
        m.add_function(wrap_pyfunction!(netting_mask, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::melon_netting;
