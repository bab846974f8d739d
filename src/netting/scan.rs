//! Region scanner: classifies every eligible pixel of a region of interest.
//!
//! The scan rectangle (see [`scan_rect`]) is walked row by row. After each
//! row, progress is reported and cancellation is polled; a cancelled scan
//! returns normally with the rows finished so far. Pixels outside the scan
//! rectangle are never touched.
//!
//! Each pixel only reads the immutable input, so rows can be handed to
//! independent workers: [`scan_parallel`] does this with rayon, and hosts
//! may also call [`scan_into`] once per tile.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use log::{debug, info};
use rayon::prelude::*;

use super::classifier::RayFan;
use super::error::NettingError;
use super::params::NettingParams;
use super::progress::{CancelCheck, ProgressSink};
use super::region::{scan_rect, Rect};

/// Marker written for netting pixels (black).
pub const NETTING_MARKER: u32 = 0x000000;

/// Marker for background and unvisited pixels (white).
pub const BACKGROUND_MARKER: u32 = 0xffffff;

/// How a scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// Every row of the scan rectangle was classified.
    Completed { rows: usize },
    /// The host asked to stop; rows not finished stay background.
    Cancelled { rows_completed: usize },
}

impl ScanStatus {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Result of a scan: one marker per input pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub markers: Vec<u32>,
    pub width: usize,
    pub height: usize,
    pub status: ScanStatus,
}

impl Classification {
    /// Whether `(x, y)` was classified as netting.
    pub fn is_netting(&self, x: usize, y: usize) -> bool {
        self.markers[y * self.width + x] == NETTING_MARKER
    }

    pub fn netting_count(&self) -> usize {
        self.markers.iter().filter(|&&m| m == NETTING_MARKER).count()
    }

    pub fn into_markers(self) -> Vec<u32> {
        self.markers
    }
}

fn check_buffer(expected: usize, actual: usize) -> Result<(), NettingError> {
    if expected != actual {
        return Err(NettingError::BufferSizeMismatch { expected, actual });
    }
    Ok(())
}

/// Validate everything a scan relies on before any pixel is read.
fn check_inputs(
    pixels: &[u32],
    width: usize,
    height: usize,
    roi: &Rect,
    params: &NettingParams,
) -> Result<(), NettingError> {
    if width == 0 || height == 0 {
        return Err(NettingError::EmptyImage { width, height });
    }
    let expected = width
        .checked_mul(height)
        .ok_or(NettingError::BufferSizeMismatch {
            expected: usize::MAX,
            actual: pixels.len(),
        })?;
    check_buffer(expected, pixels.len())?;
    roi.check_within(width, height)?;
    params.validate()
}

/// Classify one row of the scan rectangle into `row_out`.
///
/// `row_out` holds the full image row `y`.
#[inline]
fn classify_row(
    fan: &RayFan,
    pixels: &[u32],
    row_out: &mut [u32],
    width: usize,
    y: usize,
    rect: &Rect,
) {
    let offset = y * width;
    for x in rect.left..rect.right() {
        row_out[x] = if fan.classify(pixels, offset + x) {
            NETTING_MARKER
        } else {
            BACKGROUND_MARKER
        };
    }
}

/// Scan `roi` and return a freshly allocated classification buffer.
///
/// # Arguments
/// * `pixels` - Packed `0xRRGGBB` colors, row-major, `width * height` long
/// * `roi` - Region of interest, must lie inside the image
/// * `params` - Detector parameters, validated before scanning
/// * `progress` - Receives `(rows_done, scan_rows)` after every row
/// * `cancel` - Polled after every row
pub fn scan(
    pixels: &[u32],
    width: usize,
    height: usize,
    roi: &Rect,
    params: &NettingParams,
    progress: &dyn ProgressSink,
    cancel: &dyn CancelCheck,
) -> Result<Classification, NettingError> {
    check_inputs(pixels, width, height, roi, params)?;
    let mut markers = vec![BACKGROUND_MARKER; pixels.len()];
    let status = scan_into(pixels, &mut markers, width, height, roi, params, progress, cancel)?;
    Ok(Classification {
        markers,
        width,
        height,
        status,
    })
}

/// Scan `roi` into a caller-owned buffer.
///
/// Only slots inside the scan rectangle are written, so a host can call this
/// once per tile on a shared result buffer.
#[allow(clippy::too_many_arguments)]
pub fn scan_into(
    pixels: &[u32],
    out: &mut [u32],
    width: usize,
    height: usize,
    roi: &Rect,
    params: &NettingParams,
    progress: &dyn ProgressSink,
    cancel: &dyn CancelCheck,
) -> Result<ScanStatus, NettingError> {
    check_inputs(pixels, width, height, roi, params)?;
    check_buffer(pixels.len(), out.len())?;

    info!("Detect netting ({params})");

    let rect = scan_rect(roi, height, params.radius as usize);
    if rect.is_empty() {
        debug!("netting scan: region {roi:?} smaller than radius {}, nothing to do", params.radius);
        return Ok(ScanStatus::Completed { rows: 0 });
    }

    let fan = RayFan::new(params, width);
    let total = rect.height;

    for (done, y) in (rect.top..rect.bottom()).enumerate() {
        let row_out = &mut out[y * width..(y + 1) * width];
        classify_row(&fan, pixels, row_out, width, y, &rect);

        let rows_completed = done + 1;
        progress.report(rows_completed, total);

        if rows_completed < total && cancel.is_cancelled() {
            debug!("netting scan cancelled after {rows_completed}/{total} rows");
            return Ok(ScanStatus::Cancelled { rows_completed });
        }
    }

    Ok(ScanStatus::Completed { rows: total })
}

/// Row-parallel variant of [`scan`].
///
/// Without cancellation the result is identical to [`scan`]. On cancellation,
/// rows still queued are skipped; rows already running finish.
pub fn scan_parallel(
    pixels: &[u32],
    width: usize,
    height: usize,
    roi: &Rect,
    params: &NettingParams,
    progress: &dyn ProgressSink,
    cancel: &dyn CancelCheck,
) -> Result<Classification, NettingError> {
    check_inputs(pixels, width, height, roi, params)?;
    let mut markers = vec![BACKGROUND_MARKER; pixels.len()];
    let status =
        scan_parallel_into(pixels, &mut markers, width, height, roi, params, progress, cancel)?;
    Ok(Classification {
        markers,
        width,
        height,
        status,
    })
}

/// Row-parallel variant of [`scan_into`].
#[allow(clippy::too_many_arguments)]
pub fn scan_parallel_into(
    pixels: &[u32],
    out: &mut [u32],
    width: usize,
    height: usize,
    roi: &Rect,
    params: &NettingParams,
    progress: &dyn ProgressSink,
    cancel: &dyn CancelCheck,
) -> Result<ScanStatus, NettingError> {
    check_inputs(pixels, width, height, roi, params)?;
    check_buffer(pixels.len(), out.len())?;

    info!("Detect netting ({params}) in parallel");

    let rect = scan_rect(roi, height, params.radius as usize);
    if rect.is_empty() {
        debug!("netting scan: region {roi:?} smaller than radius {}, nothing to do", params.radius);
        return Ok(ScanStatus::Completed { rows: 0 });
    }

    let fan = RayFan::new(params, width);
    let total = rect.height;
    let done = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);

    // Disjoint output rows, one per task.
    out[rect.top * width..rect.bottom() * width]
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(i, row_out)| {
            if stop.load(Ordering::Relaxed) {
                return;
            }
            classify_row(&fan, pixels, row_out, width, rect.top + i, &rect);

            let current = done.fetch_add(1, Ordering::Relaxed) + 1;
            progress.report(current, total);

            if cancel.is_cancelled() {
                stop.store(true, Ordering::Relaxed);
            }
        });

    let rows_completed = done.into_inner();
    if rows_completed < total {
        debug!("parallel netting scan cancelled after {rows_completed}/{total} rows");
        return Ok(ScanStatus::Cancelled { rows_completed });
    }
    Ok(ScanStatus::Completed { rows: total })
}
