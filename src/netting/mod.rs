//! Netting detection by radial intensity sampling.
//!
//! Every eligible pixel casts rays in evenly spaced directions and compares
//! its own intensity (the blue channel) with the mean intensity along each
//! ray. A pixel brighter than some ray's mean by more than the sensitivity,
//! where that mean is itself bright enough, is marked as netting.
//!
//! ## Components
//!
//! - **params** - the five bounded controls, JSON loading
//! - **classifier** - per-pixel radial test
//! - **region** - region of interest and the radius-inset scan rectangle
//! - **scan** - sequential and rayon row-parallel scanners
//! - **progress** - progress sinks and cancellation
//! - **session** - preview/final-result adapter for interactive hosts
//! - **pixels** - `ndarray` conversions used by the bindings
//!
//! ## Output
//!
//! | Marker | Value | Meaning |
//! |--------|-------|---------|
//! | `NETTING_MARKER` | `0x000000` | netting (black) |
//! | `BACKGROUND_MARKER` | `0xffffff` | background or not scanned (white) |

pub mod classifier;
pub mod error;
pub mod params;
pub mod pixels;
pub mod progress;
pub mod region;
pub mod scan;
pub mod session;

pub use classifier::{blue_intensity, classify_pixel, ray_mean, RayFan};
pub use error::NettingError;
pub use params::{NettingParams, ParamBounds};
pub use pixels::{markers_to_mask, markers_to_rgba, pack_rgb, pack_rgba_bytes};
pub use progress::{CancelCheck, CancelToken, NeverCancel, NoProgress, ProgressSink};
pub use region::{scan_rect, Rect};
pub use scan::{
    scan, scan_into, scan_parallel, scan_parallel_into, Classification, ScanStatus,
    BACKGROUND_MARKER, NETTING_MARKER,
};
pub use session::NettingSession;
