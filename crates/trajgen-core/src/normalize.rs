//! Affine conversion between raw coordinates and the model's normalized space.

use crate::error::{Result, TrajgenError};
use crate::models::Point;
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;

/// Per-axis mean and scale. Field names match the normalization file written at training time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationParams {
    pub mean: [f64; 3],
    pub std: [f64; 3],
}

impl Default for NormalizationParams {
    fn default() -> Self {
        Self::identity()
    }
}

impl NormalizationParams {
    pub const fn identity() -> Self {
        Self {
            mean: [0.0; 3],
            std: [1.0; 3],
        }
    }

    pub fn validate(&self) -> Result<()> {
        for axis in 0..3 {
            let scale = self.std[axis];
            if scale == 0.0 || !scale.is_finite() {
                return Err(TrajgenError::InvalidParameters(format!(
                    "scale for axis {} must be finite and non-zero (got {})",
                    axis, scale
                )));
            }
            if !self.mean[axis].is_finite() {
                return Err(TrajgenError::InvalidParameters(format!(
                    "mean for axis {} must be finite (got {})",
                    axis, self.mean[axis]
                )));
            }
        }
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(raw)
            .map_err(|err| TrajgenError::InvalidParameters(err.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: impl AsRef<FsPath>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            TrajgenError::InvalidParameters(format!("failed to read {}: {}", path.display(), err))
        })?;
        Self::from_json_str(&raw)
    }
}

/// `(p - mean) / scale` per axis.
pub fn forward(point: Point, params: &NormalizationParams) -> Result<Point> {
    params.validate()?;
    Ok(apply_forward(point, params))
}

/// `p * scale + mean` per axis; exact inverse of [`forward`].
pub fn inverse(point: Point, params: &NormalizationParams) -> Point {
    let p = point.as_array();
    Point::new(
        p[0] * params.std[0] + params.mean[0],
        p[1] * params.std[1] + params.mean[1],
        p[2] * params.std[2] + params.mean[2],
    )
}

fn apply_forward(point: Point, params: &NormalizationParams) -> Point {
    let p = point.as_array();
    Point::new(
        (p[0] - params.mean[0]) / params.std[0],
        (p[1] - params.mean[1]) / params.std[1],
        (p[2] - params.mean[2]) / params.std[2],
    )
}

/// Holds parameters that have already been validated, so conversions cannot fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    params: NormalizationParams,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::identity()
    }
}

impl Normalizer {
    pub fn new(params: NormalizationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub const fn identity() -> Self {
        Self {
            params: NormalizationParams::identity(),
        }
    }

    pub fn params(&self) -> &NormalizationParams {
        &self.params
    }

    pub fn forward(&self, point: Point) -> Point {
        apply_forward(point, &self.params)
    }

    pub fn inverse(&self, point: Point) -> Point {
        inverse(point, &self.params)
    }
}
