//! Detector parameters and their bounds.
//!
//! Parameters arrive fresh for every scan (typically from an interactive
//! dialog) and must be validated before scanning starts. They can also be
//! read from a JSON file; missing keys fall back to the defaults.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::NettingError;

/// Inclusive bounds and default of one integer parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamBounds {
    /// Display name, as shown next to the host's slider.
    pub name: &'static str,
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl ParamBounds {
    /// Check `value` against the bounds.
    pub fn check(&self, value: u32) -> Result<u32, NettingError> {
        if value < self.min || value > self.max {
            return Err(NettingError::ParameterOutOfRange {
                name: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }
}

/// Degrees between sampled ray directions.
pub const ANGLE_STEP: ParamBounds = ParamBounds {
    name: "Angle Step",
    min: 1,
    max: 180,
    default: 30,
};

/// Ray length in pixels.
pub const RADIUS: ParamBounds = ParamBounds {
    name: "Radius",
    min: 1,
    max: 100,
    default: 50,
};

/// Minimum intensity drop between a pixel and its ray mean.
pub const SENSITIVITY: ParamBounds = ParamBounds {
    name: "Sensitivity",
    min: 0,
    max: 255,
    default: 10,
};

/// Minimum intensity for a pixel to count as non-background.
pub const BACKGROUND: ParamBounds = ParamBounds {
    name: "Background Cutoff",
    min: 0,
    max: 255,
    default: 20,
};

/// Minimum ray mean intensity to qualify as netting.
pub const NETTING_MEAN: ParamBounds = ParamBounds {
    name: "Netting Mean Cutoff",
    min: 0,
    max: 255,
    default: 110,
};

/// The five detector controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NettingParams {
    pub angle_step: u32,
    pub radius: u32,
    pub sensitivity: u32,
    pub background: u32,
    pub netting_mean: u32,
}

impl Default for NettingParams {
    fn default() -> Self {
        Self {
            angle_step: ANGLE_STEP.default,
            radius: RADIUS.default,
            sensitivity: SENSITIVITY.default,
            background: BACKGROUND.default,
            netting_mean: NETTING_MEAN.default,
        }
    }
}

impl NettingParams {
    /// Build a validated parameter set.
    pub fn new(
        angle_step: u32,
        radius: u32,
        sensitivity: u32,
        background: u32,
        netting_mean: u32,
    ) -> Result<Self, NettingError> {
        let params = Self {
            angle_step,
            radius,
            sensitivity,
            background,
            netting_mean,
        };
        params.validate()?;
        Ok(params)
    }

    /// Reject the first parameter that lies outside its bounds.
    pub fn validate(&self) -> Result<(), NettingError> {
        ANGLE_STEP.check(self.angle_step)?;
        RADIUS.check(self.radius)?;
        SENSITIVITY.check(self.sensitivity)?;
        BACKGROUND.check(self.background)?;
        NETTING_MEAN.check(self.netting_mean)?;
        Ok(())
    }

    /// Parse parameters from JSON and validate them.
    pub fn from_json_str(json: &str) -> Result<Self, NettingError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Load parameters from a JSON file.
    pub fn load(path: &Path) -> Result<Self, NettingError> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Number of ray directions sampled per pixel.
    pub fn angle_count(&self) -> usize {
        (360 + self.angle_step as usize - 1) / self.angle_step.max(1) as usize
    }
}

impl fmt::Display for NettingParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "angle step={}; radius={}; sensitivity={}; background={}; netting={}",
            self.angle_step, self.radius, self.sensitivity, self.background, self.netting_mean
        )
    }
}
