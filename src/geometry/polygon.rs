use crate::error::Result;
use crate::geometry::validity::check_polygon_rings;
use crate::geometry::LinearRing;

/// An exterior ring plus zero or more holes.
///
/// The EMPTY polygon has an empty exterior ring and no holes.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PolygonParts")
)]
pub struct Polygon {
    exterior: LinearRing,
    interiors: Vec<LinearRing>,
}

impl Polygon {
    pub fn try_new(exterior: LinearRing, interiors: Vec<LinearRing>) -> Result<Self> {
        check_polygon_rings(&exterior, &interiors)?;
        // Empty holes carry no points; dropping them keeps one representation per value.
        let interiors = interiors
            .into_iter()
            .filter(|ring| !ring.is_empty())
            .collect();
        Ok(Self {
            exterior,
            interiors,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn exterior(&self) -> &LinearRing {
        &self.exterior
    }

    pub fn interiors(&self) -> &[LinearRing] {
        &self.interiors
    }

    pub fn num_interiors(&self) -> usize {
        self.interiors.len()
    }

    /// The exterior ring followed by the holes. Yields nothing for the EMPTY polygon.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.exterior)
            .filter(|ring| !ring.is_empty())
            .chain(self.interiors.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }
}

/// Unvalidated polygon fields, checked by [`Polygon::try_new`] when deserializing.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PolygonParts {
    exterior: LinearRing,
    interiors: Vec<LinearRing>,
}

#[cfg(feature = "serde")]
impl TryFrom<PolygonParts> for Polygon {
    type Error = crate::error::GeoError;

    fn try_from(parts: PolygonParts) -> Result<Self> {
        Self::try_new(parts.exterior, parts.interiors)
    }
}
