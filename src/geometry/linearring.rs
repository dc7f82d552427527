use crate::error::{GeoError, Result};
use crate::geometry::validity::check_ring_points;
use crate::geometry::Coord;

/// A closed sequence of coordinates bounding a polygon: empty, or at least four points with the
/// first equal to the last.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Coord>")
)]
pub struct LinearRing(Vec<Coord>);

impl LinearRing {
    pub fn try_new(coords: Vec<Coord>) -> Result<Self> {
        check_ring_points(&coords)?;
        Ok(Self(coords))
    }

    pub fn empty() -> Self {
        Self(vec![])
    }

    pub fn coords(&self) -> &[Coord] {
        &self.0
    }

    pub fn num_coords(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<Coord>> for LinearRing {
    type Error = GeoError;

    fn try_from(coords: Vec<Coord>) -> Result<Self> {
        Self::try_new(coords)
    }
}
