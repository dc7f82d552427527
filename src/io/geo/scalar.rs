use geo::BoundingRect;

use crate::error::Result;
use crate::geometry::{
    Coord, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};

/// Convert a [`Coord`] to a [`geo::Coord`].
pub fn coord_to_geo(coord: &Coord) -> geo::Coord {
    geo::Coord {
        x: coord.x,
        y: coord.y,
    }
}

/// Convert a [`Point`] to a [`geo::Point`]. `geo` has no empty point, so EMPTY maps to `None`.
pub fn point_to_geo(point: &Point) -> Option<geo::Point> {
    point.coord().map(|coord| geo::Point(coord_to_geo(&coord)))
}

/// Convert a [`LineString`] to a [`geo::LineString`].
pub fn line_string_to_geo(line_string: &LineString) -> geo::LineString {
    geo::LineString::new(line_string.coords().iter().map(coord_to_geo).collect())
}

fn ring_to_geo(ring: &LinearRing) -> geo::LineString {
    geo::LineString::new(ring.coords().iter().map(coord_to_geo).collect())
}

/// Convert a [`Polygon`] to a [`geo::Polygon`].
pub fn polygon_to_geo(polygon: &Polygon) -> geo::Polygon {
    geo::Polygon::new(
        ring_to_geo(polygon.exterior()),
        polygon.interiors().iter().map(ring_to_geo).collect(),
    )
}

/// Convert a [`MultiPoint`] to a [`geo::MultiPoint`], dropping EMPTY members.
pub fn multi_point_to_geo(multi_point: &MultiPoint) -> geo::MultiPoint {
    geo::MultiPoint::new(multi_point.points().iter().filter_map(point_to_geo).collect())
}

/// Convert a [`MultiLineString`] to a [`geo::MultiLineString`], dropping EMPTY members.
pub fn multi_line_string_to_geo(multi_line_string: &MultiLineString) -> geo::MultiLineString {
    geo::MultiLineString::new(
        multi_line_string
            .lines()
            .iter()
            .filter(|line| !line.is_empty())
            .map(line_string_to_geo)
            .collect(),
    )
}

/// Convert a [`MultiPolygon`] to a [`geo::MultiPolygon`], dropping EMPTY members.
pub fn multi_polygon_to_geo(multi_polygon: &MultiPolygon) -> geo::MultiPolygon {
    geo::MultiPolygon::new(
        multi_polygon
            .polygons()
            .iter()
            .filter(|polygon| !polygon.is_empty())
            .map(polygon_to_geo)
            .collect(),
    )
}

/// Convert a [`GeometryCollection`] to a [`geo::GeometryCollection`], dropping EMPTY members.
pub fn geometry_collection_to_geo(collection: &GeometryCollection) -> geo::GeometryCollection {
    geo::GeometryCollection::new_from(
        collection
            .geometries()
            .iter()
            .filter(|member| !member.is_empty())
            .map(geometry_to_geo)
            .collect(),
    )
}

/// Convert any [`Geometry`] to a [`geo::Geometry`].
///
/// Empty parts have no `geo` representation and are dropped. An EMPTY point becomes an empty
/// `MultiPoint`, and other EMPTY values become empty values of their own kind.
pub fn geometry_to_geo(geom: &Geometry) -> geo::Geometry {
    match geom {
        Geometry::Point(g) => match point_to_geo(g) {
            Some(point) => geo::Geometry::Point(point),
            None => geo::Geometry::MultiPoint(geo::MultiPoint::new(vec![])),
        },
        Geometry::LineString(g) => geo::Geometry::LineString(line_string_to_geo(g)),
        Geometry::Polygon(g) => {
            if g.is_empty() {
                geo::Geometry::MultiPolygon(geo::MultiPolygon::new(vec![]))
            } else {
                geo::Geometry::Polygon(polygon_to_geo(g))
            }
        }
        Geometry::MultiPoint(g) => geo::Geometry::MultiPoint(multi_point_to_geo(g)),
        Geometry::MultiLineString(g) => {
            geo::Geometry::MultiLineString(multi_line_string_to_geo(g))
        }
        Geometry::MultiPolygon(g) => geo::Geometry::MultiPolygon(multi_polygon_to_geo(g)),
        Geometry::GeometryCollection(g) => {
            geo::Geometry::GeometryCollection(geometry_collection_to_geo(g))
        }
    }
}

fn coord_from_geo(coord: &geo::Coord) -> Coord {
    Coord::new(coord.x, coord.y)
}

fn ring_from_geo(ring: &geo::LineString) -> Result<LinearRing> {
    LinearRing::try_new(ring.0.iter().map(coord_from_geo).collect())
}

/// Convert a [`geo::Polygon`] back into the validated model.
pub fn polygon_from_geo(polygon: &geo::Polygon) -> Result<Polygon> {
    let interiors = polygon
        .interiors()
        .iter()
        .map(ring_from_geo)
        .collect::<Result<Vec<_>>>()?;
    Polygon::try_new(ring_from_geo(polygon.exterior())?, interiors)
}

/// Convert a [`geo::MultiPolygon`] back into the validated model.
pub fn multi_polygon_from_geo(multi_polygon: &geo::MultiPolygon) -> Result<MultiPolygon> {
    let polygons = multi_polygon
        .iter()
        .map(polygon_from_geo)
        .collect::<Result<Vec<_>>>()?;
    Ok(MultiPolygon::new(polygons))
}

impl Geometry {
    /// The axis-aligned bounding rectangle, or `None` for EMPTY geometries.
    pub fn bounding_rect(&self) -> Option<geo::Rect> {
        geometry_to_geo(self).bounding_rect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::wkt::from_wkt;

    #[test]
    fn empty_members_are_dropped() {
        let geom =
            from_wkt("GEOMETRYCOLLECTION (POINT EMPTY, LINESTRING (0 0, 1 1), POLYGON EMPTY)")
                .unwrap();
        let geo::Geometry::GeometryCollection(collection) = geometry_to_geo(&geom) else {
            panic!("expected a collection");
        };
        assert_eq!(collection.0.len(), 1);
    }

    #[test]
    fn bounding_rect() {
        let geom = from_wkt("MULTIPOINT (1 5, EMPTY, -2 3)").unwrap();
        let rect = geom.bounding_rect().unwrap();
        assert_eq!(rect.min(), geo::coord! { x: -2., y: 3. });
        assert_eq!(rect.max(), geo::coord! { x: 1., y: 5. });
        assert!(from_wkt("POLYGON EMPTY").unwrap().bounding_rect().is_none());
    }

    #[test]
    fn polygon_round_trip() {
        let geom = from_wkt("POLYGON ((0 0, 0 4, 4 4, 4 0, 0 0), (1 1, 2 1, 2 2, 1 1))").unwrap();
        let Geometry::Polygon(polygon) = &geom else {
            panic!("expected a polygon");
        };
        assert_eq!(&polygon_from_geo(&polygon_to_geo(polygon)).unwrap(), polygon);
    }
}
