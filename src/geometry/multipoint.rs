use crate::geometry::Point;

/// An ordered sequence of points.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPoint(Vec<Point>);

impl MultiPoint {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    pub fn empty() -> Self {
        Self(vec![])
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn num_points(&self) -> usize {
        self.0.len()
    }

    /// True when no member carries a coordinate.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Point::is_empty)
    }
}

impl From<Vec<Point>> for MultiPoint {
    fn from(value: Vec<Point>) -> Self {
        Self::new(value)
    }
}
