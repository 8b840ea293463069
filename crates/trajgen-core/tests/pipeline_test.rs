//! End-to-end pipeline tests: sample, generate, evaluate, rank.

use trajgen_core::{
    diversity, evaluate, rank, rankings, select_top, GeneratorConfig, InterpolatingModel,
    LatentSampler, NormalizationParams, PathGenerator, Point, RankingWeights, TrajgenError,
};

fn generator(seed: u64) -> PathGenerator<InterpolatingModel> {
    let config = GeneratorConfig {
        latent_dim: 64,
        seq_len: 50,
        seed: Some(seed),
        require_normalization: false,
    };
    let mut generator = PathGenerator::new(config, InterpolatingModel::default());
    generator
        .load_normalization(NormalizationParams {
            mean: [400.0, 300.0, 150.0],
            std: [300.0, 250.0, 50.0],
        })
        .expect("valid normalization");
    generator
}

const START: Point = Point::new(0.0, 0.0, 100.0);
const END: Point = Point::new(800.0, 600.0, 200.0);

#[test]
fn generate_multiple_returns_independent_full_length_paths() {
    let mut generator = generator(11);
    let paths = generator.generate_multiple(START, END, 5).unwrap();

    assert_eq!(paths.len(), 5);
    for path in &paths {
        assert_eq!(path.len(), 50);
        assert!(path.first().unwrap().distance(&START) < 1e-6);
        assert!(path.last().unwrap().distance(&END) < 1e-6);
    }
    for i in 0..paths.len() {
        for j in (i + 1)..paths.len() {
            assert_ne!(paths[i], paths[j], "paths {} and {} are identical", i, j);
        }
    }
    assert!(diversity(&paths) > 0.0);
}

#[test]
fn seeded_generators_are_reproducible() {
    let a = generator(5).generate_multiple(START, END, 3).unwrap();
    let b = generator(5).generate_multiple(START, END, 3).unwrap();
    assert_eq!(a, b);

    let c = generator(6).generate_multiple(START, END, 3).unwrap();
    assert_ne!(a, c);
}

#[test]
fn explicit_sampler_can_be_injected() {
    let config = GeneratorConfig {
        latent_dim: 16,
        seq_len: 20,
        seed: None,
        require_normalization: false,
    };
    let mut a = PathGenerator::with_sampler(
        config.clone(),
        InterpolatingModel::default(),
        LatentSampler::seeded(3),
    );
    let mut b = PathGenerator::with_sampler(
        config,
        InterpolatingModel::default(),
        LatentSampler::seeded(3),
    );
    assert_eq!(a.generate(START, END).unwrap(), b.generate(START, END).unwrap());
}

#[test]
fn ranked_candidates_have_consistent_metrics() {
    let mut generator = generator(21);
    let paths = generator.generate_multiple(START, END, 10).unwrap();
    let weights = RankingWeights::default();

    let order = rank(&paths, &END, &weights);
    assert_eq!(order, rank(&paths, &END, &weights));

    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..10).collect::<Vec<_>>());

    let ranked = rankings(&paths, &END, &weights);
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    for path in &paths {
        let metrics = evaluate(path.points(), &END);
        assert!(metrics.path_efficiency > 0.0 && metrics.path_efficiency <= 1.0);
        assert!(metrics.smoothness_score > 0.0 && metrics.smoothness_score <= 1.0);
        assert!(metrics.endpoint_error < 1e-6);
    }

    let top = select_top(&paths, &ranked, 5, START, END);
    assert_eq!(top.len(), 5);
    assert_eq!(top.labels.len(), 5);
    assert_eq!(top.paths[0], paths[order[0]]);
}

#[test]
fn invalid_sizes_are_rejected() {
    let mut generator = generator(1);
    assert!(matches!(
        generator.generate_multiple(START, END, 0),
        Err(TrajgenError::InvalidCount(0))
    ));

    let mut zero_latent = PathGenerator::new(
        GeneratorConfig {
            latent_dim: 0,
            ..GeneratorConfig::default()
        },
        InterpolatingModel::default(),
    );
    assert!(matches!(
        zero_latent.generate(START, END),
        Err(TrajgenError::InvalidDimension(0))
    ));
}
