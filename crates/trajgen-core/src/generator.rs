//! Path generation: normalize endpoints, sample a latent, run the model, denormalize.

use crate::error::{Result, TrajgenError};
use crate::latent::LatentSampler;
use crate::model::{ModelInput, ModelOutput, TrajectoryModel};
use crate::models::{Path, Point};
use crate::normalize::{NormalizationParams, Normalizer};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub latent_dim: usize,
    pub seq_len: usize,
    /// Fixed sampler seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Refuse to generate until normalization parameters are loaded instead of
    /// falling back to identity normalization.
    #[serde(default)]
    pub require_normalization: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            latent_dim: 64,
            seq_len: 50,
            seed: None,
            require_normalization: false,
        }
    }
}

pub struct PathGenerator<M> {
    config: GeneratorConfig,
    model: M,
    normalizer: Option<Normalizer>,
    sampler: LatentSampler,
}

impl<M: TrajectoryModel> PathGenerator<M> {
    pub fn new(config: GeneratorConfig, model: M) -> Self {
        let sampler = LatentSampler::from_seed_option(config.seed);
        Self::with_sampler(config, model, sampler)
    }

    pub fn with_sampler(config: GeneratorConfig, model: M, sampler: LatentSampler) -> Self {
        Self {
            config,
            model,
            normalizer: None,
            sampler,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn load_normalization(&mut self, params: NormalizationParams) -> Result<()> {
        let normalizer = Normalizer::new(params)?;
        tracing::info!(
            "Normalization loaded: mean={:?} std={:?}",
            params.mean,
            params.std
        );
        self.normalizer = Some(normalizer);
        Ok(())
    }

    pub fn load_normalization_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let params = NormalizationParams::from_json_file(path)?;
        self.load_normalization(params)
    }

    pub fn normalization_loaded(&self) -> bool {
        self.normalizer.is_some()
    }

    /// Loaded normalizer, or identity when none has been loaded.
    pub fn normalizer(&self) -> Normalizer {
        self.normalizer.unwrap_or_default()
    }

    pub fn is_ready(&self) -> bool {
        self.readiness().is_ok()
    }

    fn readiness(&self) -> Result<()> {
        if !self.model.is_ready() {
            return Err(TrajgenError::NotReady(format!(
                "model backend '{}' is not ready",
                self.model.name()
            )));
        }
        if self.config.require_normalization && self.normalizer.is_none() {
            return Err(TrajgenError::NotReady(
                "normalization parameters have not been loaded".to_string(),
            ));
        }
        Ok(())
    }

    pub fn generate(&mut self, start: Point, end: Point) -> Result<Path> {
        self.readiness()?;
        let normalizer = self.normalizer();

        let latent = self.sampler.sample(self.config.latent_dim)?;
        let input = ModelInput {
            latent,
            start: normalizer.forward(start).as_array(),
            end: normalizer.forward(end).as_array(),
            seq_len: self.config.seq_len,
        };

        let output = self.model.infer(&input)?;
        let path = self.denormalize_output(&output, &normalizer)?;
        tracing::debug!(
            backend = self.model.name(),
            points = path.len(),
            "generated candidate path"
        );
        Ok(path)
    }

    pub fn generate_multiple(&mut self, start: Point, end: Point, n: usize) -> Result<Vec<Path>> {
        if n == 0 {
            return Err(TrajgenError::InvalidCount(n));
        }
        let started = Instant::now();
        let mut paths = Vec::with_capacity(n);
        for _ in 0..n {
            paths.push(self.generate(start, end)?);
        }
        tracing::info!(
            "Generated {} candidate paths in {} ms",
            n,
            started.elapsed().as_millis()
        );
        Ok(paths)
    }

    fn denormalize_output(&self, output: &ModelOutput, normalizer: &Normalizer) -> Result<Path> {
        let seq_len = self.config.seq_len;
        if output.rows != seq_len || output.cols != 3 || output.values.len() != seq_len * 3 {
            return Err(TrajgenError::ModelInvocation(format!(
                "expected {}x3 output, got {}x{} ({} values)",
                seq_len,
                output.rows,
                output.cols,
                output.values.len()
            )));
        }
        let points = output
            .values
            .chunks_exact(3)
            .map(|row| normalizer.inverse(Point::new(row[0], row[1], row[2])))
            .collect();
        Ok(Path::new(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::model::InterpolatingModel;
    use std::cell::RefCell;

    /// Records inputs and echoes a straight line in normalized space.
    #[derive(Default)]
    struct RecordingModel {
        calls: RefCell<Vec<ModelInput>>,
    }

    impl TrajectoryModel for RecordingModel {
        fn infer(&self, input: &ModelInput) -> std::result::Result<ModelOutput, ModelError> {
            self.calls.borrow_mut().push(input.clone());
            InterpolatingModel {
                modes: 0,
                amplitude: 0.0,
            }
            .infer(input)
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct FixedShapeModel {
        rows: usize,
        cols: usize,
    }

    impl TrajectoryModel for FixedShapeModel {
        fn infer(&self, _input: &ModelInput) -> std::result::Result<ModelOutput, ModelError> {
            Ok(ModelOutput {
                rows: self.rows,
                cols: self.cols,
                values: vec![0.0; self.rows * self.cols],
            })
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct OfflineModel;

    impl TrajectoryModel for OfflineModel {
        fn infer(&self, _input: &ModelInput) -> std::result::Result<ModelOutput, ModelError> {
            Err(ModelError::new("offline", "connection refused"))
        }

        fn is_ready(&self) -> bool {
            false
        }

        fn name(&self) -> &str {
            "offline"
        }
    }

    fn config(seq_len: usize) -> GeneratorConfig {
        GeneratorConfig {
            latent_dim: 8,
            seq_len,
            seed: Some(99),
            require_normalization: false,
        }
    }

    #[test]
    fn normalizes_inputs_and_denormalizes_output() {
        let mut generator = PathGenerator::new(config(5), RecordingModel::default());
        generator
            .load_normalization(NormalizationParams {
                mean: [100.0, 100.0, 100.0],
                std: [10.0, 10.0, 10.0],
            })
            .unwrap();

        let start = Point::new(100.0, 110.0, 120.0);
        let end = Point::new(200.0, 100.0, 100.0);
        let path = generator.generate(start, end).unwrap();

        let calls = generator.model().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].start, [0.0, 1.0, 2.0]);
        assert_eq!(calls[0].end, [10.0, 0.0, 0.0]);
        assert_eq!(calls[0].latent.len(), 8);
        assert_eq!(calls[0].seq_len, 5);

        assert_eq!(path.len(), 5);
        assert!(path.first().unwrap().distance(&start) < 1e-9);
        assert!(path.last().unwrap().distance(&end) < 1e-9);
    }

    #[test]
    fn falls_back_to_identity_without_normalization() {
        let mut generator = PathGenerator::new(config(3), RecordingModel::default());
        assert!(generator.is_ready());
        generator
            .generate(Point::new(1.0, 2.0, 3.0), Point::new(4.0, 5.0, 6.0))
            .unwrap();
        assert_eq!(generator.model().calls.borrow()[0].start, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn strict_mode_requires_normalization() {
        let mut cfg = config(3);
        cfg.require_normalization = true;
        let mut generator = PathGenerator::new(cfg, RecordingModel::default());
        let err = generator
            .generate(Point::default(), Point::new(1.0, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, TrajgenError::NotReady(_)));

        generator
            .load_normalization(NormalizationParams::identity())
            .unwrap();
        assert!(generator.generate(Point::default(), Point::new(1.0, 0.0, 0.0)).is_ok());
    }

    #[test]
    fn unready_backend_is_not_ready() {
        let mut generator = PathGenerator::new(config(3), OfflineModel);
        assert!(!generator.is_ready());
        assert!(matches!(
            generator.generate(Point::default(), Point::default()),
            Err(TrajgenError::NotReady(_))
        ));
    }

    #[test]
    fn rejects_wrong_output_shape() {
        for (rows, cols) in [(4, 3), (5, 2), (0, 0)] {
            let mut generator = PathGenerator::new(config(5), FixedShapeModel { rows, cols });
            let err = generator
                .generate(Point::default(), Point::default())
                .unwrap_err();
            assert!(matches!(err, TrajgenError::ModelInvocation(_)), "{}x{}", rows, cols);
        }
    }

    #[test]
    fn generate_multiple_rejects_zero_count() {
        let mut generator = PathGenerator::new(config(5), InterpolatingModel::default());
        assert!(matches!(
            generator.generate_multiple(Point::default(), Point::default(), 0),
            Err(TrajgenError::InvalidCount(0))
        ));
    }

    #[test]
    fn each_call_draws_a_fresh_latent() {
        let mut generator = PathGenerator::new(config(4), RecordingModel::default());
        let paths = generator
            .generate_multiple(Point::default(), Point::new(1.0, 1.0, 1.0), 5)
            .unwrap();
        assert_eq!(paths.len(), 5);
        let calls = generator.model().calls.borrow();
        for i in 0..calls.len() {
            for j in (i + 1)..calls.len() {
                assert_ne!(calls[i].latent, calls[j].latent);
            }
        }
    }

    #[test]
    fn loading_zero_scale_fails() {
        let mut generator = PathGenerator::new(config(4), InterpolatingModel::default());
        let err = generator
            .load_normalization(NormalizationParams {
                mean: [0.0; 3],
                std: [1.0, 0.0, 1.0],
            })
            .unwrap_err();
        assert!(matches!(err, TrajgenError::InvalidParameters(_)));
        assert!(!generator.normalization_loaded());
    }
}
