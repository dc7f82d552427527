use crate::geometry::Geometry;
use crate::io::wkt::from_wkt;

/// Polygons, lines and points arranged around the square `(0 0, 2 2)` with touching, crossing and
/// containing pairs.
pub(crate) const RELATION_WKT: [&str; 8] = [
    "POLYGON ((0 0, 0 1, 1 1, 1 0, 0 0))",
    "POLYGON ((0 0, 0 2, 2 2, 2 0, 0 0))",
    "POLYGON ((1 0, 1 1, 3 1, 3 0, 1 0))",
    "LINESTRING (1 0.5, 2.5 0.5)",
    "LINESTRING (2 0, 2 2)",
    "LINESTRING (2 0.5, 2 2)",
    "POINT (1.5 0.5)",
    "POINT (2 0.5)",
];

/// Two overlapping squares in one multipolygon. Their boundaries first cross at `1 2`.
pub(crate) const INVALID_MULTIPOLYGON: &str =
    "MULTIPOLYGON (((0 0, 0 2, 2 2, 2 0, 0 0)), ((1 1, 1 3, 3 3, 3 1, 1 1)))";

pub(crate) fn relation_geometries() -> Vec<Geometry> {
    RELATION_WKT.iter().map(|wkt| from_wkt(wkt).unwrap()).collect()
}
