//! Server configuration from environment.

use std::env;
use std::time::Duration;
use trajgen_core::GeneratorConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Normalization JSON written at training time.
    pub norm_path: Option<String>,
    /// Remote inference endpoint; the built-in interpolating model is used when unset.
    pub model_url: Option<String>,
    pub model_timeout: Duration,
    pub latent_dim: usize,
    pub seq_len: usize,
    pub seed: Option<u64>,
    pub require_normalization: bool,
    pub max_samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            norm_path: None,
            model_url: None,
            model_timeout: Duration::from_secs(10),
            latent_dim: 64,
            seq_len: 50,
            seed: None,
            require_normalization: false,
            max_samples: 100,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_env("TRAJGEN_PORT").unwrap_or(defaults.server_port),
            norm_path: non_empty_env("TRAJGEN_NORM_PATH"),
            model_url: non_empty_env("TRAJGEN_MODEL_URL"),
            model_timeout: parse_env("TRAJGEN_MODEL_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.model_timeout),
            latent_dim: parse_env("TRAJGEN_LATENT_DIM").unwrap_or(defaults.latent_dim),
            seq_len: parse_env("TRAJGEN_SEQ_LEN").unwrap_or(defaults.seq_len),
            seed: parse_env("TRAJGEN_SEED"),
            require_normalization: parse_env("TRAJGEN_REQUIRE_NORMALIZATION")
                .unwrap_or(defaults.require_normalization),
            max_samples: parse_env("TRAJGEN_MAX_SAMPLES").unwrap_or(defaults.max_samples),
        }
    }

    /// Rejects settings under which no request could succeed.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.latent_dim == 0 {
            anyhow::bail!("TRAJGEN_LATENT_DIM must be at least 1");
        }
        if self.seq_len < 2 {
            anyhow::bail!("TRAJGEN_SEQ_LEN must be at least 2 (got {})", self.seq_len);
        }
        if self.max_samples == 0 {
            anyhow::bail!("TRAJGEN_MAX_SAMPLES must be at least 1");
        }
        Ok(())
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            latent_dim: self.latent_dim,
            seq_len: self.seq_len,
            seed: self.seed,
            require_normalization: self.require_normalization,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    non_empty_env(key).and_then(|value| value.parse().ok())
}
