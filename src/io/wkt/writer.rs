use std::fmt::{self, Write};

use crate::geometry::{
    Coord, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};

/// Serialize a geometry to canonical WKT.
///
/// Coordinates are written with the shortest decimal form that reads back to the same `f64`.
pub fn to_wkt(geom: &Geometry) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_wkt(&mut out, geom);
    out
}

/// Write a geometry as WKT into any [`fmt::Write`] sink.
pub fn write_wkt<W: Write>(out: &mut W, geom: &Geometry) -> fmt::Result {
    out.write_str(geom.geometry_type().wkt_keyword())?;
    out.write_char(' ')?;
    write_body(out, geom)
}

fn write_body<W: Write>(out: &mut W, geom: &Geometry) -> fmt::Result {
    match geom {
        Geometry::Point(g) => write_point(out, g),
        Geometry::LineString(g) => write_coords(out, g.coords()),
        Geometry::Polygon(g) => write_polygon(out, g),
        Geometry::MultiPoint(g) => write_multi_point(out, g),
        Geometry::MultiLineString(g) => write_multi_line_string(out, g),
        Geometry::MultiPolygon(g) => write_multi_polygon(out, g),
        Geometry::GeometryCollection(g) => write_geometry_collection(out, g),
    }
}

/// `EMPTY` when there are no items, otherwise the items comma-separated in parentheses.
fn write_list<W: Write, T>(
    out: &mut W,
    items: &[T],
    mut write_item: impl FnMut(&mut W, &T) -> fmt::Result,
) -> fmt::Result {
    if items.is_empty() {
        return out.write_str("EMPTY");
    }
    out.write_char('(')?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write_item(out, item)?;
    }
    out.write_char(')')
}

fn write_coord<W: Write>(out: &mut W, coord: &Coord) -> fmt::Result {
    write!(out, "{} {}", coord.x, coord.y)
}

fn write_coords<W: Write>(out: &mut W, coords: &[Coord]) -> fmt::Result {
    write_list(out, coords, write_coord::<W>)
}

fn write_point<W: Write>(out: &mut W, point: &Point) -> fmt::Result {
    match point.coord() {
        Some(coord) => {
            out.write_char('(')?;
            write_coord(out, &coord)?;
            out.write_char(')')
        }
        None => out.write_str("EMPTY"),
    }
}

fn write_ring<W: Write>(out: &mut W, ring: &LinearRing) -> fmt::Result {
    write_coords(out, ring.coords())
}

fn write_polygon<W: Write>(out: &mut W, polygon: &Polygon) -> fmt::Result {
    let rings: Vec<&LinearRing> = polygon.rings().collect();
    write_list(out, &rings, |out, ring| write_ring(out, ring))
}

fn write_multi_point<W: Write>(out: &mut W, multi_point: &MultiPoint) -> fmt::Result {
    write_list(out, multi_point.points(), |out, point| match point.coord() {
        Some(coord) => write_coord(out, &coord),
        None => out.write_str("EMPTY"),
    })
}

fn write_multi_line_string<W: Write>(out: &mut W, geom: &MultiLineString) -> fmt::Result {
    write_list(out, geom.lines(), |out, line: &LineString| {
        write_coords(out, line.coords())
    })
}

fn write_multi_polygon<W: Write>(out: &mut W, geom: &MultiPolygon) -> fmt::Result {
    write_list(out, geom.polygons(), write_polygon::<W>)
}

fn write_geometry_collection<W: Write>(out: &mut W, geom: &GeometryCollection) -> fmt::Result {
    write_list(out, geom.geometries(), |out, member| write_wkt(out, member))
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_wkt(f, self)
    }
}
