//! DE-9IM relations between two geometries.

mod matrix;
mod predicate;

pub use matrix::{IntersectionMatrix, Location};
pub use predicate::Predicate;

use std::panic::{self, AssertUnwindSafe};

use geo::Relate as _;

use crate::algorithm::index::dissolve;
use crate::algorithm::topology::check_relate_input;
use crate::algorithm::Operation;
use crate::error::{GeoError, Result};
use crate::geometry::{Dimension, Geometry};
use crate::io::geo::{geometry_to_geo, polygon_to_geo};

/// Relate a geometry to another one.
///
/// ```
/// use sfgeom::algorithm::Relate;
/// use sfgeom::io::wkt::from_wkt;
///
/// let outer = from_wkt("POLYGON ((0 0, 0 2, 2 2, 2 0, 0 0))").unwrap();
/// let inner = from_wkt("POLYGON ((0 0, 0 1, 1 1, 1 0, 0 0))").unwrap();
///
/// assert_eq!(outer.relate(&inner).unwrap().to_string(), "212F11FF2");
/// assert!(outer.contains(&inner).unwrap());
/// assert!(inner.within(&outer).unwrap());
/// ```
pub trait Relate {
    /// The DE-9IM matrix of `self` against `other`.
    fn relate(&self, other: &Geometry) -> Result<IntersectionMatrix>;

    /// Whether the DE-9IM matrix of `self` against `other` matches `pattern`.
    fn relate_pattern(&self, other: &Geometry, pattern: &str) -> Result<bool>;

    fn contains(&self, other: &Geometry) -> Result<bool>;
    fn crosses(&self, other: &Geometry) -> Result<bool>;
    fn disjoint(&self, other: &Geometry) -> Result<bool>;
    fn equals(&self, other: &Geometry) -> Result<bool>;
    fn intersects(&self, other: &Geometry) -> Result<bool>;
    fn overlaps(&self, other: &Geometry) -> Result<bool>;
    fn touches(&self, other: &Geometry) -> Result<bool>;
    fn within(&self, other: &Geometry) -> Result<bool>;
}

impl Relate for Geometry {
    fn relate(&self, other: &Geometry) -> Result<IntersectionMatrix> {
        relate_checked(self, other, Operation::Relate)
    }

    fn relate_pattern(&self, other: &Geometry, pattern: &str) -> Result<bool> {
        // Reject a bad pattern before doing any geometric work.
        IntersectionMatrix::empty().matches(pattern)?;
        self.relate(other)?.matches(pattern)
    }

    fn contains(&self, other: &Geometry) -> Result<bool> {
        Predicate::Contains.evaluate(self, other)
    }

    fn crosses(&self, other: &Geometry) -> Result<bool> {
        Predicate::Crosses.evaluate(self, other)
    }

    fn disjoint(&self, other: &Geometry) -> Result<bool> {
        Predicate::Disjoint.evaluate(self, other)
    }

    fn equals(&self, other: &Geometry) -> Result<bool> {
        Predicate::Equals.evaluate(self, other)
    }

    fn intersects(&self, other: &Geometry) -> Result<bool> {
        Predicate::Intersects.evaluate(self, other)
    }

    fn overlaps(&self, other: &Geometry) -> Result<bool> {
        Predicate::Overlaps.evaluate(self, other)
    }

    fn touches(&self, other: &Geometry) -> Result<bool> {
        Predicate::Touches.evaluate(self, other)
    }

    fn within(&self, other: &Geometry) -> Result<bool> {
        Predicate::Within.evaluate(self, other)
    }
}

/// The matrix of an empty geometry against `other`.
fn empty_matrix(other: &Geometry) -> IntersectionMatrix {
    let mut matrix = IntersectionMatrix::empty();
    if !other.is_empty() {
        matrix.set(Location::Exterior, Location::Interior, other.dimension());
        matrix.set(
            Location::Exterior,
            Location::Boundary,
            other.boundary_dimension(),
        );
    }
    matrix.set(Location::Exterior, Location::Exterior, Dimension::Two);
    matrix
}

/// Check both inputs for topology conflicts, then compute their matrix.
pub(crate) fn relate_checked(
    a: &Geometry,
    b: &Geometry,
    operation: Operation,
) -> Result<IntersectionMatrix> {
    if a.is_empty() {
        return Ok(empty_matrix(b));
    }
    if b.is_empty() {
        return Ok(empty_matrix(a).transpose());
    }
    check_relate_input(a, operation)?;
    check_relate_input(b, operation)?;
    let (a, b) = (relate_input(a), relate_input(b));
    panic::catch_unwind(AssertUnwindSafe(|| a.relate(&b)))
        .map(|matrix| IntersectionMatrix::from(&matrix))
        .map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|message| message.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "relate failed".to_string());
            GeoError::topology(
                operation,
                format!("{message}. This can occur if the input geometry is invalid."),
            )
        })
}

/// Convert to `geo` for relating.
///
/// `geo` needs the areas of a collection to be disjoint, so the polygonal members of a collection
/// are dissolved into one area first.
fn relate_input(geom: &Geometry) -> geo::Geometry {
    let Geometry::GeometryCollection(collection) = geom else {
        return geometry_to_geo(geom);
    };
    let mut polygons = vec![];
    let mut others = vec![];
    flatten_collection(collection.geometries(), &mut polygons, &mut others);
    if polygons.len() < 2 {
        return geometry_to_geo(geom);
    }
    let mut members = vec![geo::Geometry::MultiPolygon(dissolve(&polygons))];
    members.extend(others);
    geo::Geometry::GeometryCollection(geo::GeometryCollection::new_from(members))
}

fn flatten_collection(
    members: &[Geometry],
    polygons: &mut Vec<geo::Polygon>,
    others: &mut Vec<geo::Geometry>,
) {
    for member in members.iter().filter(|member| !member.is_empty()) {
        match member {
            Geometry::Polygon(polygon) => polygons.push(polygon_to_geo(polygon)),
            Geometry::MultiPolygon(multi_polygon) => polygons.extend(
                multi_polygon
                    .polygons()
                    .iter()
                    .filter(|polygon| !polygon.is_empty())
                    .map(polygon_to_geo),
            ),
            Geometry::GeometryCollection(collection) => {
                flatten_collection(collection.geometries(), polygons, others)
            }
            _ => others.push(geometry_to_geo(member)),
        }
    }
}
