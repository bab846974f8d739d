//! Host adapter for interactive use.
//!
//! A session owns a snapshot of the image and a result buffer. Hosts feed
//! it parameter changes from their dialog, run it over the whole image or
//! one tile at a time, and pick which buffer to display depending on
//! whether preview is on. When the host is done, [`NettingSession::finish`]
//! hands the results over.

use log::{debug, warn};

use super::error::NettingError;
use super::params::NettingParams;
use super::progress::{CancelCheck, ProgressSink};
use super::region::Rect;
use super::scan::{scan_into, scan_parallel_into, ScanStatus, BACKGROUND_MARKER};

#[derive(Debug, Clone)]
pub struct NettingSession {
    original: Vec<u32>,
    results: Vec<u32>,
    width: usize,
    height: usize,
    params: NettingParams,
}

impl NettingSession {
    /// Snapshot `pixels` and preset every result to background.
    pub fn new(pixels: &[u32], width: usize, height: usize) -> Result<Self, NettingError> {
        if width == 0 || height == 0 {
            return Err(NettingError::EmptyImage { width, height });
        }
        let expected = width.saturating_mul(height);
        if pixels.len() != expected {
            return Err(NettingError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            original: pixels.to_vec(),
            results: vec![BACKGROUND_MARKER; pixels.len()],
            width,
            height,
            params: NettingParams::default(),
        })
    }

    pub fn params(&self) -> &NettingParams {
        &self.params
    }

    /// Accept new parameters from the host dialog.
    ///
    /// Invalid values are rejected and the previous parameters and results
    /// stay active. Accepted values clear the results, since a new radius
    /// changes which pixels the next pass visits.
    pub fn set_params(&mut self, params: NettingParams) -> Result<(), NettingError> {
        if let Err(err) = params.validate() {
            warn!("rejected netting parameters: {err}");
            return Err(err);
        }
        self.params = params;
        self.reset();
        Ok(())
    }

    /// Classify `roi` into the session results.
    ///
    /// Can be called once per tile; tiles must not overlap. Results outside
    /// the scan rectangle are kept, so call [`reset`](Self::reset) before
    /// scanning a different region with the same parameters.
    pub fn run(
        &mut self,
        roi: &Rect,
        progress: &dyn ProgressSink,
        cancel: &dyn CancelCheck,
    ) -> Result<ScanStatus, NettingError> {
        scan_into(
            &self.original,
            &mut self.results,
            self.width,
            self.height,
            roi,
            &self.params,
            progress,
            cancel,
        )
    }

    /// Classify the whole image with rayon workers, replacing earlier results.
    pub fn run_parallel(
        &mut self,
        progress: &dyn ProgressSink,
        cancel: &dyn CancelCheck,
    ) -> Result<ScanStatus, NettingError> {
        self.reset();
        let roi = Rect::full(self.width, self.height);
        scan_parallel_into(
            &self.original,
            &mut self.results,
            self.width,
            self.height,
            &roi,
            &self.params,
            progress,
            cancel,
        )
    }

    /// Discard previous results, e.g. before a new preview pass.
    pub fn reset(&mut self) {
        debug!("netting session: clearing results");
        self.results.fill(BACKGROUND_MARKER);
    }

    /// Buffer to show: results while previewing, the untouched image otherwise.
    pub fn displayed(&self, preview: bool) -> &[u32] {
        if preview {
            &self.results
        } else {
            &self.original
        }
    }

    pub fn results(&self) -> &[u32] {
        &self.results
    }

    pub fn original(&self) -> &[u32] {
        &self.original
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Hand the final results to the host.
    pub fn finish(self) -> Vec<u32> {
        self.results
    }
}
