//! Obstacle clearance scoring for candidate paths.

use crate::models::{Path, Point, Ranking};
use crate::ranking::sort_best_first;
use serde::{Deserialize, Serialize};

/// Spherical keep-out volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub center: Point,
    pub radius: f64,
}

impl Obstacle {
    /// Signed distance from the obstacle surface; negative inside.
    pub fn clearance(&self, point: &Point) -> f64 {
        point.distance(&self.center) - self.radius.max(0.0)
    }
}

/// Higher is safer.
///
/// With no obstacles the score is `1`. If any point lies inside an obstacle the score is
/// the negated total penetration depth; otherwise it is the smallest surface clearance.
pub fn clearance_score(points: &[Point], obstacles: &[Obstacle]) -> f64 {
    if obstacles.is_empty() {
        return 1.0;
    }

    let mut min_clearance = f64::INFINITY;
    let mut penetration = 0.0;
    for point in points {
        for obstacle in obstacles {
            let clearance = obstacle.clearance(point);
            min_clearance = min_clearance.min(clearance);
            if clearance < 0.0 {
                penetration += -clearance;
            }
        }
    }

    if penetration > 0.0 {
        -penetration
    } else {
        min_clearance
    }
}

pub fn rank_by_clearance(paths: &[Path], obstacles: &[Obstacle]) -> Vec<Ranking> {
    let mut ranked: Vec<Ranking> = paths
        .iter()
        .enumerate()
        .map(|(index, path)| Ranking {
            index,
            score: clearance_score(path.points(), obstacles),
        })
        .collect();
    sort_best_first(&mut ranked);
    ranked
}
