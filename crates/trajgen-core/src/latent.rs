//! Standard-normal latent sampling.

use crate::error::{Result, TrajgenError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Latent vector drawn from N(0, 1); consumed by a single inference call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LatentVector(pub Vec<f64>);

impl LatentVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Owns its RNG so seeded runs are reproducible and independent of other samplers.
#[derive(Debug, Clone)]
pub struct LatentSampler {
    rng: StdRng,
}

impl LatentSampler {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn sample(&mut self, dimension: usize) -> Result<LatentVector> {
        if dimension == 0 {
            return Err(TrajgenError::InvalidDimension(dimension));
        }
        let mut values = Vec::with_capacity(dimension);
        while values.len() < dimension {
            let (a, b) = box_muller(&mut self.rng);
            values.push(a);
            if values.len() < dimension {
                values.push(b);
            }
        }
        Ok(LatentVector(values))
    }
}

fn box_muller<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    // u1 in (0, 1] keeps ln() finite.
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    let radius = (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * std::f64::consts::PI * u2;
    (radius * theta.cos(), radius * theta.sin())
}
