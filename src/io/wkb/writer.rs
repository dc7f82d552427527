use std::io::Write;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::error::Result;
use crate::geometry::{
    Coord, Geometry, GeometryCollection, GeometryType, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};
use crate::io::wkb::common::{
    Endianness, WKBByteOrder, COORD_BYTES, COUNT_BYTES, HEADER_BYTES,
};

/// The byte length of a WKBPoint
const POINT_WKB_SIZE: usize = HEADER_BYTES + COORD_BYTES;

/// The byte length of a WKBLineString
fn line_string_wkb_size(geom: &LineString) -> usize {
    HEADER_BYTES + COUNT_BYTES + geom.num_coords() * COORD_BYTES
}

fn ring_wkb_size(ring: &LinearRing) -> usize {
    COUNT_BYTES + ring.num_coords() * COORD_BYTES
}

/// The byte length of a WKBPolygon
fn polygon_wkb_size(geom: &Polygon) -> usize {
    HEADER_BYTES + COUNT_BYTES + geom.rings().map(ring_wkb_size).sum::<usize>()
}

/// The byte length of a WKBMultiPoint
fn multi_point_wkb_size(geom: &MultiPoint) -> usize {
    HEADER_BYTES + COUNT_BYTES + geom.num_points() * POINT_WKB_SIZE
}

/// The byte length of a WKBMultiLineString
fn multi_line_string_wkb_size(geom: &MultiLineString) -> usize {
    HEADER_BYTES
        + COUNT_BYTES
        + geom.lines().iter().map(line_string_wkb_size).sum::<usize>()
}

/// The byte length of a WKBMultiPolygon
fn multi_polygon_wkb_size(geom: &MultiPolygon) -> usize {
    HEADER_BYTES + COUNT_BYTES + geom.polygons().iter().map(polygon_wkb_size).sum::<usize>()
}

/// The byte length of a WKBGeometryCollection
fn geometry_collection_wkb_size(geom: &GeometryCollection) -> usize {
    HEADER_BYTES + COUNT_BYTES + geom.geometries().iter().map(geometry_wkb_size).sum::<usize>()
}

/// The byte length of a Geometry
pub fn geometry_wkb_size(geom: &Geometry) -> usize {
    match geom {
        Geometry::Point(_) => POINT_WKB_SIZE,
        Geometry::LineString(g) => line_string_wkb_size(g),
        Geometry::Polygon(g) => polygon_wkb_size(g),
        Geometry::MultiPoint(g) => multi_point_wkb_size(g),
        Geometry::MultiLineString(g) => multi_line_string_wkb_size(g),
        Geometry::MultiPolygon(g) => multi_polygon_wkb_size(g),
        Geometry::GeometryCollection(g) => geometry_collection_wkb_size(g),
    }
}

/// Encode a geometry as little-endian WKB.
pub fn to_wkb(geom: &Geometry) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(geometry_wkb_size(geom));
    write_wkb(&mut buf, geom, Endianness::LittleEndian)?;
    Ok(buf)
}

/// Write a Geometry to a Writer encoded as WKB with the given byte order.
pub fn write_wkb<W: Write>(mut writer: W, geom: &Geometry, endianness: Endianness) -> Result<()> {
    match endianness {
        Endianness::BigEndian => write_geometry_as_wkb::<_, BigEndian>(&mut writer, geom),
        Endianness::LittleEndian => write_geometry_as_wkb::<_, LittleEndian>(&mut writer, geom),
    }
}

fn write_header<W: Write, B: WKBByteOrder>(writer: &mut W, geometry_type: GeometryType) -> Result<()> {
    writer.write_u8(B::ENDIANNESS.into())?;
    writer.write_u32::<B>(geometry_type.into())?;
    Ok(())
}

fn write_count<W: Write, B: WKBByteOrder>(writer: &mut W, count: usize) -> Result<()> {
    // Model values are built in memory, so counts always fit the 32-bit field.
    writer.write_u32::<B>(count as u32)?;
    Ok(())
}

fn write_coord<W: Write, B: WKBByteOrder>(writer: &mut W, coord: &Coord) -> Result<()> {
    writer.write_f64::<B>(coord.x)?;
    writer.write_f64::<B>(coord.y)?;
    Ok(())
}

fn write_coords<W: Write, B: WKBByteOrder>(writer: &mut W, coords: &[Coord]) -> Result<()> {
    write_count::<W, B>(writer, coords.len())?;
    coords
        .iter()
        .try_for_each(|coord| write_coord::<W, B>(writer, coord))
}

/// Write a Point geometry to a Writer encoded as WKB. The EMPTY point is written as two NaNs.
fn write_point_as_wkb<W: Write, B: WKBByteOrder>(writer: &mut W, geom: &Point) -> Result<()> {
    write_header::<W, B>(writer, GeometryType::Point)?;
    let coord = geom.coord().unwrap_or(Coord::new(f64::NAN, f64::NAN));
    write_coord::<W, B>(writer, &coord)
}

/// Write a LineString geometry to a Writer encoded as WKB
fn write_line_string_as_wkb<W: Write, B: WKBByteOrder>(
    writer: &mut W,
    geom: &LineString,
) -> Result<()> {
    write_header::<W, B>(writer, GeometryType::LineString)?;
    write_coords::<W, B>(writer, geom.coords())
}

/// Write a Polygon geometry to a Writer encoded as WKB
fn write_polygon_as_wkb<W: Write, B: WKBByteOrder>(writer: &mut W, geom: &Polygon) -> Result<()> {
    write_header::<W, B>(writer, GeometryType::Polygon)?;
    write_count::<W, B>(writer, geom.rings().count())?;
    geom.rings()
        .try_for_each(|ring| write_coords::<W, B>(writer, ring.coords()))
}

/// Write a MultiPoint geometry to a Writer encoded as WKB
fn write_multi_point_as_wkb<W: Write, B: WKBByteOrder>(
    writer: &mut W,
    geom: &MultiPoint,
) -> Result<()> {
    write_header::<W, B>(writer, GeometryType::MultiPoint)?;
    write_count::<W, B>(writer, geom.num_points())?;
    geom.points()
        .iter()
        .try_for_each(|point| write_point_as_wkb::<W, B>(writer, point))
}

/// Write a MultiLineString geometry to a Writer encoded as WKB
fn write_multi_line_string_as_wkb<W: Write, B: WKBByteOrder>(
    writer: &mut W,
    geom: &MultiLineString,
) -> Result<()> {
    write_header::<W, B>(writer, GeometryType::MultiLineString)?;
    write_count::<W, B>(writer, geom.num_lines())?;
    geom.lines()
        .iter()
        .try_for_each(|line| write_line_string_as_wkb::<W, B>(writer, line))
}

/// Write a MultiPolygon geometry to a Writer encoded as WKB
fn write_multi_polygon_as_wkb<W: Write, B: WKBByteOrder>(
    writer: &mut W,
    geom: &MultiPolygon,
) -> Result<()> {
    write_header::<W, B>(writer, GeometryType::MultiPolygon)?;
    write_count::<W, B>(writer, geom.num_polygons())?;
    geom.polygons()
        .iter()
        .try_for_each(|polygon| write_polygon_as_wkb::<W, B>(writer, polygon))
}

/// Write a GeometryCollection geometry to a Writer encoded as WKB
fn write_geometry_collection_as_wkb<W: Write, B: WKBByteOrder>(
    writer: &mut W,
    geom: &GeometryCollection,
) -> Result<()> {
    write_header::<W, B>(writer, GeometryType::GeometryCollection)?;
    write_count::<W, B>(writer, geom.num_geometries())?;
    geom.geometries()
        .iter()
        .try_for_each(|member| write_geometry_as_wkb::<W, B>(writer, member))
}

/// Write a Geometry to a Writer encoded as WKB
fn write_geometry_as_wkb<W: Write, B: WKBByteOrder>(writer: &mut W, geom: &Geometry) -> Result<()> {
    match geom {
        Geometry::Point(g) => write_point_as_wkb::<W, B>(writer, g),
        Geometry::LineString(g) => write_line_string_as_wkb::<W, B>(writer, g),
        Geometry::Polygon(g) => write_polygon_as_wkb::<W, B>(writer, g),
        Geometry::MultiPoint(g) => write_multi_point_as_wkb::<W, B>(writer, g),
        Geometry::MultiLineString(g) => write_multi_line_string_as_wkb::<W, B>(writer, g),
        Geometry::MultiPolygon(g) => write_multi_polygon_as_wkb::<W, B>(writer, g),
        Geometry::GeometryCollection(g) => write_geometry_collection_as_wkb::<W, B>(writer, g),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::wkb::from_wkb;
    use crate::io::wkt::from_wkt;
    use crate::test::geoms;
    use crate::test::wkb::ENCODINGS;

    fn wkb_hex(wkt: &str) -> String {
        hex::encode_upper(to_wkb(&from_wkt(wkt).unwrap()).unwrap())
    }

    #[test]
    fn point() {
        assert_eq!(
            wkb_hex("POINT (1 2)"),
            "0101000000000000000000F03F0000000000000040"
        );
    }

    #[test]
    fn empty_values() {
        assert_eq!(
            wkb_hex("POINT EMPTY"),
            "0101000000000000000000F87F000000000000F87F"
        );
        assert_eq!(wkb_hex("LINESTRING EMPTY"), "010200000000000000");
        assert_eq!(wkb_hex("POLYGON EMPTY"), "010300000000000000");
        assert_eq!(wkb_hex("MULTIPOINT EMPTY"), "010400000000000000");
        assert_eq!(wkb_hex("MULTILINESTRING EMPTY"), "010500000000000000");
        assert_eq!(wkb_hex("MULTIPOLYGON EMPTY"), "010600000000000000");
        assert_eq!(wkb_hex("GEOMETRYCOLLECTION EMPTY"), "010700000000000000");
    }

    #[test]
    fn big_endian_input_is_rewritten_little_endian() {
        let geom = from_wkb(&hex::decode("00000000013FF00000000000004000000000000000").unwrap())
            .unwrap();
        assert_eq!(
            hex::encode_upper(to_wkb(&geom).unwrap()),
            "0101000000000000000000F03F0000000000000040"
        );
    }

    #[test]
    fn size_matches_output() {
        for geom in geoms::all() {
            assert_eq!(to_wkb(&geom).unwrap().len(), geometry_wkb_size(&geom));
        }
    }

    #[test]
    fn round_trip_both_byte_orders() {
        for geom in geoms::all() {
            for endianness in [Endianness::LittleEndian, Endianness::BigEndian] {
                let mut buf = vec![];
                write_wkb(&mut buf, &geom, endianness).unwrap();
                assert_eq!(buf[0], u8::from(endianness));
                assert_eq!(from_wkb(&buf).unwrap(), geom);
            }
        }
    }

    #[test]
    fn encodings() {
        for (wkt, le_hex, be_hex) in ENCODINGS {
            assert_eq!(wkb_hex(wkt), le_hex, "{wkt}");

            let mut buf = vec![];
            write_wkb(&mut buf, &from_wkt(wkt).unwrap(), Endianness::BigEndian).unwrap();
            assert_eq!(hex::encode_upper(buf), be_hex, "{wkt}");
        }
    }

    #[test]
    fn big_endian_encodings_are_rewritten_little_endian() {
        for (wkt, le_hex, be_hex) in ENCODINGS {
            let geom = from_wkb(&hex::decode(be_hex).unwrap()).unwrap();
            assert_eq!(hex::encode_upper(to_wkb(&geom).unwrap()), le_hex, "{wkt}");
        }
    }
}
