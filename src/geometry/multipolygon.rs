use crate::geometry::Polygon;

/// An ordered sequence of polygons.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPolygon(Vec<Polygon>);

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self(polygons)
    }

    pub fn empty() -> Self {
        Self(vec![])
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.0
    }

    pub fn num_polygons(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Polygon::is_empty)
    }
}

impl From<Vec<Polygon>> for MultiPolygon {
    fn from(value: Vec<Polygon>) -> Self {
        Self::new(value)
    }
}
