//! Scalar scoring and best-first ordering of candidate paths.

use crate::metrics::{endpoint_error, path_efficiency, smoothness_score};
use crate::models::{Path, Point, Ranking};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Weights for `efficiency * w1 + smoothness * w2 - (endpoint_error / scale) * w3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub efficiency: f64,
    pub smoothness: f64,
    pub endpoint_error: f64,
    /// Divisor bringing endpoint error onto the scale of the other two terms. Depends
    /// on the deployment's coordinate units.
    pub endpoint_error_scale: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            efficiency: 0.3,
            smoothness: 0.5,
            endpoint_error: 0.2,
            endpoint_error_scale: 100.0,
        }
    }
}

pub fn score(path: &Path, expected_end: &Point, weights: &RankingWeights) -> f64 {
    let points = path.points();
    let scale = if weights.endpoint_error_scale.abs() > f64::EPSILON {
        weights.endpoint_error_scale
    } else {
        1.0
    };
    weights.efficiency * path_efficiency(points) + weights.smoothness * smoothness_score(points)
        - weights.endpoint_error * (endpoint_error(points, expected_end) / scale)
}

/// Scores every path and sorts best-first. Ties keep their original order; paths whose
/// score is not a number sort last.
pub fn rankings(paths: &[Path], expected_end: &Point, weights: &RankingWeights) -> Vec<Ranking> {
    let mut ranked: Vec<Ranking> = paths
        .iter()
        .enumerate()
        .map(|(index, path)| Ranking {
            index,
            score: score(path, expected_end, weights),
        })
        .collect();
    sort_best_first(&mut ranked);
    ranked
}

/// Candidate indices, best first.
pub fn rank(paths: &[Path], expected_end: &Point, weights: &RankingWeights) -> Vec<usize> {
    rankings(paths, expected_end, weights)
        .into_iter()
        .map(|ranking| ranking.index)
        .collect()
}

pub(crate) fn sort_best_first(ranked: &mut [Ranking]) {
    ranked.sort_by(|a, b| compare_scores(b.score, a.score));
}

fn compare_scores(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.total_cmp(&b),
    }
}

/// Top-ranked paths with display labels, the shape handed to export and plotting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedSelection {
    pub start: Point,
    pub end: Point,
    pub paths: Vec<Path>,
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

impl RankedSelection {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

pub fn select_top(
    paths: &[Path],
    ranked: &[Ranking],
    k: usize,
    start: Point,
    end: Point,
) -> RankedSelection {
    let mut selection = RankedSelection {
        start,
        end,
        paths: Vec::new(),
        labels: Vec::new(),
        scores: Vec::new(),
    };
    for (position, ranking) in ranked
        .iter()
        .filter(|ranking| ranking.index < paths.len())
        .take(k)
        .enumerate()
    {
        selection.paths.push(paths[ranking.index].clone());
        selection.labels.push(label(position + 1, ranking.score));
        selection.scores.push(ranking.score);
    }
    selection
}

pub fn label(rank: usize, score: f64) -> String {
    format!("Trajectory #{} (Score: {:.3})", rank, score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &[[f64; 3]]) -> Path {
        Path::new(raw.iter().copied().map(Point::from_array).collect())
    }

    fn candidates() -> Vec<Path> {
        vec![
            // Detour: lower efficiency, curved.
            path(&[[0.0, 0.0, 0.0], [1.0, 3.0, 0.0], [2.0, 0.0, 0.0]]),
            // Straight line.
            path(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]),
            // Mild bend.
            path(&[[0.0, 0.0, 0.0], [1.0, 0.5, 0.0], [2.0, 0.0, 0.0]]),
        ]
    }

    #[test]
    fn efficiency_only_weights_order_by_efficiency() {
        let weights = RankingWeights {
            efficiency: 1.0,
            smoothness: 0.0,
            endpoint_error: 0.0,
            ..RankingWeights::default()
        };
        let end = Point::new(2.0, 0.0, 0.0);
        let paths = candidates();
        assert_eq!(rank(&paths, &end, &weights), vec![1, 2, 0]);

        for ranking in rankings(&paths, &end, &weights) {
            assert_eq!(ranking.score, path_efficiency(paths[ranking.index].points()));
        }
    }

    #[test]
    fn default_score_combines_terms() {
        let straight = path(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
        let weights = RankingWeights::default();
        let on_target = score(&straight, &Point::new(2.0, 0.0, 0.0), &weights);
        assert!((on_target - 0.8).abs() < 1e-12);

        let off_target = score(&straight, &Point::new(2.0, 50.0, 0.0), &weights);
        assert!((off_target - (0.8 - 0.2 * 0.5)).abs() < 1e-12);

        // A zero divisor falls back to the raw endpoint error.
        let unscaled = RankingWeights {
            endpoint_error_scale: 0.0,
            ..weights
        };
        let raw = score(&straight, &Point::new(2.0, 50.0, 0.0), &unscaled);
        assert!((raw - (0.8 - 0.2 * 50.0)).abs() < 1e-12);
        assert!(raw.is_finite());
    }

    #[test]
    fn ranking_is_stable_and_idempotent() {
        let same = path(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        let paths = vec![same.clone(), same.clone(), same];
        let end = Point::new(1.0, 0.0, 0.0);
        let weights = RankingWeights::default();
        let first = rank(&paths, &end, &weights);
        assert_eq!(first, vec![0, 1, 2]);
        assert_eq!(rank(&paths, &end, &weights), first);
    }

    #[test]
    fn nan_scores_sort_last() {
        let mut ranked = vec![
            Ranking { index: 0, score: f64::NAN },
            Ranking { index: 1, score: -3.0 },
            Ranking { index: 2, score: 0.5 },
        ];
        sort_best_first(&mut ranked);
        let order: Vec<usize> = ranked.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn select_top_labels_in_rank_order() {
        let paths = candidates();
        let end = Point::new(2.0, 0.0, 0.0);
        let ranked = rankings(&paths, &end, &RankingWeights::default());
        let selection = select_top(&paths, &ranked, 2, Point::default(), end);
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.paths[0], paths[1]);
        assert!(selection.labels[0].starts_with("Trajectory #1 (Score: 0.800"));
        assert!(selection.labels[1].starts_with("Trajectory #2"));
        assert!(selection.scores[0] >= selection.scores[1]);

        let everything = select_top(&paths, &ranked, 10, Point::default(), end);
        assert_eq!(everything.len(), 3);
    }
}
