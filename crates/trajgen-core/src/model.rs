//! Inference backend contract.
//!
//! A backend maps `(latent, normalized start, normalized end)` to a `seq_len x 3`
//! tensor of normalized points. Everything on the far side of [`TrajectoryModel`]
//! (native runtime, remote service, built-in interpolator) is opaque to the generator.

use crate::error::ModelError;
use crate::latent::LatentVector;
use crate::models::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Inputs for one inference call. `start` and `end` are already normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInput {
    pub latent: LatentVector,
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub seq_len: usize,
}

/// Row-major tensor returned by a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<f64>,
}

impl ModelOutput {
    pub fn from_points(points: &[[f64; 3]]) -> Self {
        Self {
            rows: points.len(),
            cols: 3,
            values: points.iter().flat_map(|p| p.iter().copied()).collect(),
        }
    }

    /// Builds a tensor from nested rows, rejecting ragged input.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ModelError> {
        let cols = rows.first().map(|row| row.len()).unwrap_or(0);
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(ModelError::new(
                "tensor",
                format!("row {} has {} columns, expected {}", idx, row.len(), cols),
            ));
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            values: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn row(&self, idx: usize) -> Option<&[f64]> {
        let start = idx.checked_mul(self.cols)?;
        self.values.get(start..start + self.cols)
    }
}

pub trait TrajectoryModel {
    fn infer(&self, input: &ModelInput) -> Result<ModelOutput, ModelError>;

    fn is_ready(&self) -> bool {
        true
    }

    fn name(&self) -> &str;
}

impl<M: TrajectoryModel + ?Sized> TrajectoryModel for Box<M> {
    fn infer(&self, input: &ModelInput) -> Result<ModelOutput, ModelError> {
        (**self).infer(input)
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Built-in backend: linear interpolation plus latent-weighted sine modes.
///
/// Each mode vanishes at both endpoints, so every sample starts and ends exactly at the
/// requested waypoints while the latent vector bends the interior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpolatingModel {
    pub modes: usize,
    /// Peak deviation per unit latent, in normalized units.
    pub amplitude: f64,
}

impl Default for InterpolatingModel {
    fn default() -> Self {
        Self {
            modes: 4,
            amplitude: 0.15,
        }
    }
}

impl TrajectoryModel for InterpolatingModel {
    fn infer(&self, input: &ModelInput) -> Result<ModelOutput, ModelError> {
        let latent = input.latent.as_slice();
        if latent.is_empty() {
            return Err(ModelError::new(self.name(), "empty latent vector"));
        }
        if input.seq_len == 0 {
            return Err(ModelError::new(self.name(), "sequence length must be positive"));
        }

        let start = Point::from_array(input.start);
        let end = Point::from_array(input.end);
        let delta = end.sub(&start);
        let denom = input.seq_len.saturating_sub(1).max(1) as f64;

        let mut points = Vec::with_capacity(input.seq_len);
        for step in 0..input.seq_len {
            let t = step as f64 / denom;
            let base = start.add(&delta.scale(t));
            let mut offset = [0.0; 3];
            for k in 1..=self.modes {
                let shape = (k as f64 * PI * t).sin() / k as f64;
                for (axis, value) in offset.iter_mut().enumerate() {
                    let weight = latent[(3 * (k - 1) + axis) % latent.len()];
                    *value += self.amplitude * weight * shape;
                }
            }
            points.push(base.add(&Point::from_array(offset)).as_array());
        }

        Ok(ModelOutput::from_points(&points))
    }

    fn name(&self) -> &str {
        "interpolating"
    }
}
