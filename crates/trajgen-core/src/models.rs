//! Core data models for path generation and ranking.

use serde::{Deserialize, Serialize};

/// A point in the model's raw coordinate space. `z` is altitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(&self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance between two points.
    pub fn distance(&self, other: &Point) -> f64 {
        self.sub(other).norm()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// One candidate trajectory, ordered from start to end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    pub points: Vec<Point>,
}

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }
}

impl From<Vec<Point>> for Path {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

/// Quality measures for a single path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub path_length: f64,
    pub straight_line_distance: f64,
    /// straight_line_distance / path_length
    pub path_efficiency: f64,
    /// rad per unit length
    pub avg_curvature: f64,
    pub max_curvature: f64,
    /// Number of interior points that produced a curvature value.
    pub curvature_samples: usize,
    pub smoothness_score: f64,
    pub second_order_smoothness: f64,
    pub endpoint_error: f64,
    pub min_altitude: f64,
    pub max_altitude: f64,
    pub avg_altitude: f64,
    /// Mean step length between consecutive points.
    pub avg_velocity: f64,
}

impl Metrics {
    pub fn altitude_range(&self) -> f64 {
        self.max_altitude - self.min_altitude
    }
}

/// Score assigned to the path at `index` of a candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub index: usize,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_vector_helpers() {
        let a = Point::new(1.0, 2.0, 2.0);
        let b = Point::new(0.0, 0.0, 0.0);
        assert_eq!(a.norm(), 3.0);
        assert_eq!(a.distance(&b), 3.0);
        assert_eq!(a.sub(&a), Point::default());
        assert_eq!(a.scale(2.0).as_array(), [2.0, 4.0, 4.0]);
    }

    #[test]
    fn path_serializes_as_point_list() {
        let path = Path::new(vec![Point::new(0.0, 0.0, 1.0)]);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!([{ "x": 0.0, "y": 0.0, "z": 1.0 }]));
    }
}
