use crate::error::{GeoError, Result};
use crate::geometry::validity::check_coord;
use crate::geometry::Coord;

/// A single position, or the EMPTY point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Option<Coord>")
)]
pub struct Point(Option<Coord>);

impl Point {
    pub fn try_new(coord: Coord) -> Result<Self> {
        check_coord(&coord)?;
        Ok(Self(Some(coord)))
    }

    pub fn empty() -> Self {
        Self(None)
    }

    pub fn coord(&self) -> Option<Coord> {
        self.0
    }

    pub fn x(&self) -> Option<f64> {
        self.0.map(|c| c.x)
    }

    pub fn y(&self) -> Option<f64> {
        self.0.map(|c| c.y)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl TryFrom<Option<Coord>> for Point {
    type Error = GeoError;

    fn try_from(coord: Option<Coord>) -> Result<Self> {
        coord.map_or(Ok(Self::empty()), Self::try_new)
    }
}
