//! Local generate, rank and select pipeline used by the `trajgen` binary.

use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use trajgen_core::{
    rankings, select_top, summarize, BatchSummary, GeneratorConfig, InterpolatingModel, Path,
    PathGenerator, Point, RankedSelection, Ranking, RankingWeights, TrajectoryModel,
};
use trajgen_sdk::RemoteModel;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub start: Point,
    pub end: Point,
    pub waypoints: usize,
    pub latent_dim: usize,
    pub candidates: usize,
    pub top: usize,
    pub norm_path: Option<String>,
    pub model_url: Option<String>,
    pub model_timeout: Duration,
    pub seed: Option<u64>,
    pub weights: RankingWeights,
}

impl Default for RunOptions {
    fn default() -> Self {
        let generator = GeneratorConfig::default();
        Self {
            start: Point::new(0.0, 0.0, 100.0),
            end: Point::new(800.0, 600.0, 200.0),
            waypoints: generator.seq_len,
            latent_dim: generator.latent_dim,
            candidates: 10,
            top: 5,
            norm_path: None,
            model_url: None,
            model_timeout: Duration::from_secs(10),
            seed: None,
            weights: RankingWeights::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub paths: Vec<Path>,
    pub ranked: Vec<Ranking>,
    pub selection: RankedSelection,
    pub summary: BatchSummary,
    pub elapsed: Duration,
}

/// Runs against the remote backend when `model_url` is set, else the built-in model.
pub fn run(options: &RunOptions) -> Result<RunOutput> {
    match &options.model_url {
        Some(url) => {
            let model = RemoteModel::new(url.clone(), options.model_timeout)?;
            run_with_model(options, model)
        }
        None => run_with_model(options, InterpolatingModel::default()),
    }
}

pub fn run_with_model<M: TrajectoryModel>(options: &RunOptions, model: M) -> Result<RunOutput> {
    let config = GeneratorConfig {
        latent_dim: options.latent_dim,
        seq_len: options.waypoints,
        seed: options.seed,
        require_normalization: false,
    };
    let mut generator = PathGenerator::new(config, model);
    if let Some(path) = &options.norm_path {
        generator
            .load_normalization_file(path)
            .with_context(|| format!("loading normalization from {}", path))?;
    }

    let started = Instant::now();
    let paths = generator.generate_multiple(options.start, options.end, options.candidates)?;
    let elapsed = started.elapsed();

    let ranked = rankings(&paths, &options.end, &options.weights);
    let selection = select_top(&paths, &ranked, options.top, options.start, options.end);
    let summary = summarize(&paths, &options.end, None);

    Ok(RunOutput {
        paths,
        ranked,
        selection,
        summary,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> RunOptions {
        RunOptions {
            waypoints: 12,
            latent_dim: 6,
            candidates: 4,
            top: 2,
            seed: Some(11),
            ..RunOptions::default()
        }
    }

    #[test]
    fn selects_top_of_ranked_batch() {
        let output = run(&options()).unwrap();
        assert_eq!(output.paths.len(), 4);
        assert_eq!(output.ranked.len(), 4);
        assert_eq!(output.selection.len(), 2);
        assert_eq!(output.selection.scores[0], output.ranked[0].score);
        assert!(output.selection.labels[0].starts_with("Trajectory #1 (Score: "));
        assert!(output.paths.iter().all(|path| path.len() == 12));
        assert_eq!(output.summary.n_samples, 4);
    }

    #[test]
    fn seeded_runs_repeat() {
        let a = run(&options()).unwrap();
        let b = run(&options()).unwrap();
        assert_eq!(a.paths, b.paths);
    }

    #[test]
    fn missing_normalization_file_is_an_error() {
        let options = RunOptions {
            norm_path: Some("/nonexistent/normalization.json".to_string()),
            ..options()
        };
        assert!(run(&options).is_err());
    }

    #[test]
    fn zero_candidates_is_an_error() {
        let options = RunOptions {
            candidates: 0,
            ..options()
        };
        assert!(run(&options).is_err());
    }
}
