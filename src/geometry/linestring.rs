use crate::error::{GeoError, Result};
use crate::geometry::validity::check_line_points;
use crate::geometry::Coord;

/// An ordered sequence of zero or at least two coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Coord>")
)]
pub struct LineString(Vec<Coord>);

impl LineString {
    pub fn try_new(coords: Vec<Coord>) -> Result<Self> {
        check_line_points(&coords)?;
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

    /// Whether the first and last coordinates coincide. Empty lines are not closed.
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    pub(crate) fn endpoints(&self) -> Option<(Coord, Coord)> {
        Some((*self.0.first()?, *self.0.last()?))
    }
}

impl TryFrom<Vec<Coord>> for LineString {
    type Error = GeoError;

    fn try_from(coords: Vec<Coord>) -> Result<Self> {
        Self::try_new(coords)
    }
}
