use geo::prelude::Area as GeoArea;

use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::io::geo::{geometry_collection_to_geo, multi_polygon_to_geo, polygon_to_geo};

/// Signed and unsigned planar area of a geometry.
///
/// Holes are subtracted by magnitude, so the result does not depend on ring orientation beyond
/// the sign of [`signed_area`](Area::signed_area), which follows the exterior ring. Collections
/// sum their members without removing overlap.
///
/// # Examples
///
/// ```
/// use sfgeom::algorithm::Area;
/// use sfgeom::io::wkt::from_wkt;
///
/// let polygon = from_wkt("POLYGON ((0 0, 5 0, 5 6, 0 6, 0 0))").unwrap();
/// let reversed = from_wkt("POLYGON ((0 0, 0 6, 5 6, 5 0, 0 0))").unwrap();
///
/// assert_eq!(polygon.signed_area(), 30.);
/// assert_eq!(polygon.unsigned_area(), 30.);
///
/// assert_eq!(reversed.signed_area(), -30.);
/// assert_eq!(reversed.unsigned_area(), 30.);
/// ```
pub trait Area {
    fn signed_area(&self) -> f64;

    fn unsigned_area(&self) -> f64;
}

/// Implementation where the result is zero.
macro_rules! zero_impl {
    ($type:ty) => {
        impl Area for $type {
            fn signed_area(&self) -> f64 {
                0.
            }

            fn unsigned_area(&self) -> f64 {
                0.
            }
        }
    };
}

zero_impl!(Point);
zero_impl!(LineString);
zero_impl!(MultiPoint);
zero_impl!(MultiLineString);

/// Implementation that converts to a [`geo`] geometry and uses [`geo::Area`].
macro_rules! geo_impl {
    ($type:ty, $to_geo:ident) => {
        impl Area for $type {
            fn signed_area(&self) -> f64 {
                $to_geo(self).signed_area()
            }

            fn unsigned_area(&self) -> f64 {
                $to_geo(self).unsigned_area()
            }
        }
    };
}

geo_impl!(Polygon, polygon_to_geo);
geo_impl!(MultiPolygon, multi_polygon_to_geo);
geo_impl!(GeometryCollection, geometry_collection_to_geo);

impl Area for Geometry {
    fn signed_area(&self) -> f64 {
        match self {
            Geometry::Point(g) => g.signed_area(),
            Geometry::LineString(g) => g.signed_area(),
            Geometry::Polygon(g) => g.signed_area(),
            Geometry::MultiPoint(g) => g.signed_area(),
            Geometry::MultiLineString(g) => g.signed_area(),
            Geometry::MultiPolygon(g) => g.signed_area(),
            Geometry::GeometryCollection(g) => g.signed_area(),
        }
    }

    fn unsigned_area(&self) -> f64 {
        match self {
            Geometry::Point(g) => g.unsigned_area(),
            Geometry::LineString(g) => g.unsigned_area(),
            Geometry::Polygon(g) => g.unsigned_area(),
            Geometry::MultiPoint(g) => g.unsigned_area(),
            Geometry::MultiLineString(g) => g.unsigned_area(),
            Geometry::MultiPolygon(g) => g.unsigned_area(),
            Geometry::GeometryCollection(g) => g.unsigned_area(),
        }
    }
}
