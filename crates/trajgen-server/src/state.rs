//! Shared application state: one generator guarded by a mutex.
//!
//! Readiness and model info are fixed once the generator is built, so they are captured
//! up front and never wait on the generator lock.

use crate::config::Config;
use anyhow::{Context, Result};
use std::sync::{Mutex, MutexGuard};
use trajgen_core::{InterpolatingModel, ModelInfo, PathGenerator, TrajectoryModel};
use trajgen_sdk::RemoteModel;

pub type DynModel = Box<dyn TrajectoryModel + Send>;
pub type DynGenerator = PathGenerator<DynModel>;

pub struct AppState {
    generator: Mutex<DynGenerator>,
    config: Config,
    ready: bool,
    model_info: ModelInfo,
}

impl AppState {
    pub fn new(config: Config, generator: DynGenerator) -> Self {
        let ready = generator.is_ready();
        let model_info = describe(&generator);
        Self {
            generator: Mutex::new(generator),
            config,
            ready,
            model_info,
        }
    }

    /// Builds the configured backend and loads normalization.
    ///
    /// A missing or unreadable normalization file is logged and generation continues
    /// with identity normalization, unless the config requires it.
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let model: DynModel = match &config.model_url {
            Some(url) => {
                tracing::info!("Using remote inference backend at {}", url);
                Box::new(RemoteModel::new(url.clone(), config.model_timeout)?)
            }
            None => {
                tracing::warn!("TRAJGEN_MODEL_URL not set; using built-in interpolating model");
                Box::new(InterpolatingModel::default())
            }
        };

        let mut generator = PathGenerator::new(config.generator_config(), model);
        if let Some(path) = &config.norm_path {
            let loaded = generator
                .load_normalization_file(path)
                .with_context(|| format!("loading normalization from {}", path));
            if let Err(err) = loaded {
                if config.require_normalization {
                    return Err(err);
                }
                tracing::warn!("{:#}; falling back to identity normalization", err);
            }
        }

        Ok(Self::new(config, generator))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn generator(&self) -> MutexGuard<'_, DynGenerator> {
        // A panic mid-generation leaves no partial state behind.
        self.generator
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn model_info(&self) -> &ModelInfo {
        &self.model_info
    }
}

fn describe(generator: &DynGenerator) -> ModelInfo {
    let params = *generator.normalizer().params();
    ModelInfo {
        backend: generator.model().name().to_string(),
        latent_dim: generator.config().latent_dim,
        seq_len: generator.config().seq_len,
        normalization_loaded: generator.normalization_loaded(),
        mean: params.mean,
        std: params.std,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unusable_dimensions_at_startup() {
        let config = Config {
            latent_dim: 0,
            ..Config::default()
        };
        let err = AppState::from_config(config).err().expect("latent_dim 0 rejected");
        assert!(err.to_string().contains("TRAJGEN_LATENT_DIM"));

        let config = Config {
            seq_len: 1,
            ..Config::default()
        };
        assert!(AppState::from_config(config).is_err());
    }

    #[test]
    fn snapshot_matches_generator() {
        let config = Config {
            latent_dim: 4,
            seq_len: 9,
            ..Config::default()
        };
        let state = AppState::from_config(config).unwrap();
        assert!(state.is_ready());
        assert_eq!(state.model_info().backend, "interpolating");
        assert_eq!(state.model_info().seq_len, 9);
        assert_eq!(state.model_info().latent_dim, 4);
    }
}
