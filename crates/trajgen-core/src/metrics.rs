//! Geometric quality metrics for candidate paths.
//!
//! Every function is total over its input: short or degenerate paths produce a fixed
//! fallback value instead of an error.

use crate::models::{Metrics, Path, Point};
use crate::rules::ValidityLimits;
use serde::{Deserialize, Serialize};

/// Segments shorter than this are treated as degenerate.
const MIN_SEGMENT_NORM: f64 = 1e-6;

/// Sum of consecutive segment lengths.
pub fn path_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .sum()
}

pub fn straight_line_distance(points: &[Point]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 2 => first.distance(last),
        _ => 0.0,
    }
}

/// `straight_line / path_length`. `1` for fewer than two points, `0` for a path that
/// never moves.
pub fn path_efficiency(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 1.0;
    }
    let length = path_length(points);
    if length < MIN_SEGMENT_NORM {
        return 0.0;
    }
    straight_line_distance(points) / length
}

/// Turning angle per unit incoming segment length at each interior point.
///
/// Points where either adjacent segment is degenerate are skipped, so the result can be
/// shorter than `points.len() - 2`.
pub fn curvatures(points: &[Point]) -> Vec<f64> {
    points
        .windows(3)
        .filter_map(|triple| {
            let v1 = triple[1].sub(&triple[0]);
            let v2 = triple[2].sub(&triple[1]);
            let norm1 = v1.norm();
            let norm2 = v2.norm();
            if norm1 < MIN_SEGMENT_NORM || norm2 < MIN_SEGMENT_NORM {
                return None;
            }
            let cos_angle = (v1.dot(&v2) / (norm1 * norm2)).clamp(-1.0, 1.0);
            Some(cos_angle.acos() / norm1)
        })
        .collect()
}

pub fn average_curvature(points: &[Point]) -> f64 {
    mean(&curvatures(points))
}

pub fn max_curvature(points: &[Point]) -> f64 {
    curvatures(points).into_iter().fold(0.0, f64::max)
}

/// `1 / (1 + average_curvature)`; `1` for a straight path.
pub fn smoothness_score(points: &[Point]) -> f64 {
    smoothness_from_curvature(average_curvature(points))
}

fn smoothness_from_curvature(avg_curvature: f64) -> f64 {
    1.0 / (1.0 + avg_curvature)
}

pub fn endpoint_error(points: &[Point], expected_end: &Point) -> f64 {
    points
        .last()
        .map(|last| last.distance(expected_end))
        .unwrap_or(0.0)
}

/// Mean squared second difference `|p[i+1] - 2 p[i] + p[i-1]|^2` over interior points.
pub fn second_order_smoothness(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let total: f64 = points
        .windows(3)
        .map(|triple| {
            let accel = triple[2].sub(&triple[1].scale(2.0)).add(&triple[0]);
            accel.dot(&accel)
        })
        .sum();
    total / (points.len() - 2) as f64
}

/// Mean step length between consecutive points.
pub fn average_step_length(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    path_length(points) / (points.len() - 1) as f64
}

/// Returns `(min, max, mean)` altitude, or `None` for an empty path.
pub fn altitude_stats(points: &[Point]) -> Option<(f64, f64, f64)> {
    let first = points.first()?;
    let (min, max, sum) = points.iter().fold(
        (first.z, first.z, 0.0),
        |(min, max, sum), point| (min.min(point.z), max.max(point.z), sum + point.z),
    );
    Some((min, max, sum / points.len() as f64))
}

/// Computes every per-path metric. An empty path yields all-zero metrics.
pub fn evaluate(points: &[Point], expected_end: &Point) -> Metrics {
    let Some((min_altitude, max_altitude, avg_altitude)) = altitude_stats(points) else {
        return Metrics::default();
    };

    let curvature_values = curvatures(points);
    let avg_curvature = mean(&curvature_values);

    Metrics {
        path_length: path_length(points),
        straight_line_distance: straight_line_distance(points),
        path_efficiency: path_efficiency(points),
        avg_curvature,
        max_curvature: curvature_values.iter().copied().fold(0.0, f64::max),
        curvature_samples: curvature_values.len(),
        smoothness_score: smoothness_from_curvature(avg_curvature),
        second_order_smoothness: second_order_smoothness(points),
        endpoint_error: endpoint_error(points, expected_end),
        min_altitude,
        max_altitude,
        avg_altitude,
        avg_velocity: average_step_length(points),
    }
}

/// Mean over all unordered pairs of the mean per-index distance, truncated to the
/// shorter path. `0` for fewer than two paths.
pub fn diversity(paths: &[Path]) -> f64 {
    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..paths.len() {
        for j in (i + 1)..paths.len() {
            let a = paths[i].points();
            let b = paths[j].points();
            let common = a.len().min(b.len());
            let distance = if common == 0 {
                0.0
            } else {
                a.iter()
                    .zip(b)
                    .map(|(p, q)| p.distance(q))
                    .sum::<f64>()
                    / common as f64
            };
            total += distance;
            pairs += 1;
        }
    }
    if pairs == 0 {
        0.0
    } else {
        total / pairs as f64
    }
}

/// A path is valid when its curvature stays under the ceiling and every altitude is in
/// range. Empty paths are never valid.
pub fn is_valid(points: &[Point], limits: &ValidityLimits) -> bool {
    if points.is_empty() {
        return false;
    }
    if max_curvature(points) > limits.max_curvature {
        return false;
    }
    points.iter().all(|point| limits.altitude_in_range(point.z))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub mean: f64,
    pub std: f64,
}

impl Spread {
    fn of(values: &[f64]) -> Self {
        let mean = mean(values);
        let variance = if values.is_empty() {
            0.0
        } else {
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
        };
        Self {
            mean,
            std: variance.sqrt(),
        }
    }
}

/// Aggregate statistics over a batch of candidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub n_samples: usize,
    pub diversity: f64,
    pub path_length: Spread,
    pub path_efficiency: Spread,
    pub avg_curvature: Spread,
    pub smoothness_score: Spread,
    pub endpoint_error: Spread,
    pub avg_altitude: Spread,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_reconstruction_error: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_reconstruction_error: Option<f64>,
}

pub fn summarize(paths: &[Path], expected_end: &Point, ground_truth: Option<&[Point]>) -> BatchSummary {
    let all: Vec<Metrics> = paths
        .iter()
        .map(|path| evaluate(path.points(), expected_end))
        .collect();
    let spread = |field: fn(&Metrics) -> f64| {
        Spread::of(&all.iter().map(field).collect::<Vec<_>>())
    };

    let mut summary = BatchSummary {
        n_samples: paths.len(),
        diversity: diversity(paths),
        path_length: spread(|m| m.path_length),
        path_efficiency: spread(|m| m.path_efficiency),
        avg_curvature: spread(|m| m.avg_curvature),
        smoothness_score: spread(|m| m.smoothness_score),
        endpoint_error: spread(|m| m.endpoint_error),
        avg_altitude: spread(|m| m.avg_altitude),
        avg_reconstruction_error: None,
        min_reconstruction_error: None,
    };

    if let Some(truth) = ground_truth {
        let errors: Vec<f64> = paths
            .iter()
            .map(|path| reconstruction_error(path.points(), truth))
            .collect();
        if !errors.is_empty() {
            summary.avg_reconstruction_error = Some(mean(&errors));
            summary.min_reconstruction_error = Some(errors.iter().copied().fold(f64::INFINITY, f64::min));
        }
    }

    summary
}

/// Mean squared coordinate error over the common prefix of two paths.
pub fn reconstruction_error(points: &[Point], truth: &[Point]) -> f64 {
    let common = points.len().min(truth.len());
    if common == 0 {
        return 0.0;
    }
    let total: f64 = points
        .iter()
        .zip(truth)
        .map(|(p, q)| {
            let d = p.sub(q);
            d.dot(&d)
        })
        .sum();
    total / (common * 3) as f64
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
