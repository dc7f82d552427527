use std::io::Cursor;

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};

use crate::error::{GeoError, Result};
use crate::geometry::{
    Coord, Geometry, GeometryCollection, GeometryType, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};
use crate::io::wkb::common::{Endianness, COORD_BYTES, COUNT_BYTES, HEADER_BYTES};

/// Nested collections deeper than this are rejected instead of recursing further.
const MAX_NESTING: usize = 128;

/// Parse a complete WKB record into a [`Geometry`].
///
/// The whole buffer must be consumed by exactly one record.
///
/// ```
/// use sfgeom::io::wkb::from_wkb;
///
/// let buf = [
///     0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F, 0x00, 0x00,
///     0x00, 0x00, 0x00, 0x00, 0x00, 0x40,
/// ];
/// let point = from_wkb(&buf).unwrap();
/// assert_eq!(sfgeom::io::wkt::to_wkt(&point), "POINT (1 2)");
/// ```
pub fn from_wkb(buf: &[u8]) -> Result<Geometry> {
    let mut reader = WKBReader::new(buf);
    let geom = reader.read_geometry(0).map_err(|err| {
        log::debug!("rejected WKB input of {} bytes: {err}", buf.len());
        err
    })?;
    if reader.remaining() > 0 {
        return Err(GeoError::MalformedInput(
            "Unexpected trailing bytes after WKB geometry".to_string(),
        ));
    }
    Ok(geom)
}

fn unexpected_eof() -> GeoError {
    GeoError::MalformedInput("Unexpected EOF parsing WKB".to_string())
}

fn eof(_: std::io::Error) -> GeoError {
    unexpected_eof()
}

struct WKBReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> WKBReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(buf),
        }
    }

    fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len() as u64;
        len.saturating_sub(self.cursor.position()) as usize
    }

    /// Upper bound on how many items of `item_bytes` each could still follow.
    fn capacity_for(&self, declared: usize, item_bytes: usize) -> usize {
        declared.min(self.remaining() / item_bytes)
    }

    fn read_header(&mut self) -> Result<(Endianness, GeometryType)> {
        if self.remaining() < HEADER_BYTES {
            return Err(unexpected_eof());
        }
        let byte_order = self.cursor.read_u8().map_err(eof)?;
        let endianness = Endianness::try_from(byte_order).map_err(|_| {
            GeoError::MalformedInput(format!("Invalid byte order {byte_order} in WKB"))
        })?;
        let code = match endianness {
            Endianness::BigEndian => self.cursor.read_u32::<BigEndian>(),
            Endianness::LittleEndian => self.cursor.read_u32::<LittleEndian>(),
        }
        .map_err(eof)?;
        let geometry_type = GeometryType::try_from(code)
            .map_err(|_| GeoError::MalformedInput(format!("Unknown WKB type {code}")))?;
        Ok((endianness, geometry_type))
    }

    fn read_geometry(&mut self, depth: usize) -> Result<Geometry> {
        if depth > MAX_NESTING {
            return Err(GeoError::MalformedInput(
                "WKB geometry nesting is too deep".to_string(),
            ));
        }
        let (endianness, geometry_type) = self.read_header()?;
        match endianness {
            Endianness::BigEndian => self.read_body::<BigEndian>(geometry_type, depth),
            Endianness::LittleEndian => self.read_body::<LittleEndian>(geometry_type, depth),
        }
    }

    fn read_body<B: ByteOrder>(
        &mut self,
        geometry_type: GeometryType,
        depth: usize,
    ) -> Result<Geometry> {
        let geom = match geometry_type {
            GeometryType::Point => self.read_point::<B>()?.into(),
            GeometryType::LineString => self.read_line_string::<B>()?.into(),
            GeometryType::Polygon => self.read_polygon::<B>()?.into(),
            GeometryType::MultiPoint => {
                let points = self.read_members::<B, _>(GeometryType::MultiPoint, depth, |geom| {
                    match geom {
                        Geometry::Point(point) => Ok(point),
                        other => Err(other.geometry_type()),
                    }
                })?;
                MultiPoint::new(points).into()
            }
            GeometryType::MultiLineString => {
                let lines = self.read_members::<B, _>(GeometryType::MultiLineString, depth, |geom| {
                    match geom {
                        Geometry::LineString(line) => Ok(line),
                        other => Err(other.geometry_type()),
                    }
                })?;
                MultiLineString::new(lines).into()
            }
            GeometryType::MultiPolygon => {
                let polygons = self.read_members::<B, _>(GeometryType::MultiPolygon, depth, |geom| {
                    match geom {
                        Geometry::Polygon(polygon) => Ok(polygon),
                        other => Err(other.geometry_type()),
                    }
                })?;
                MultiPolygon::new(polygons).into()
            }
            GeometryType::GeometryCollection => {
                let count = self.read_count::<B>()?;
                let mut geometries =
                    Vec::with_capacity(self.capacity_for(count, HEADER_BYTES));
                for _ in 0..count {
                    geometries.push(self.read_geometry(depth + 1)?);
                }
                GeometryCollection::new(geometries).into()
            }
        };
        Ok(geom)
    }

    fn read_count<B: ByteOrder>(&mut self) -> Result<usize> {
        Ok(self.cursor.read_u32::<B>().map_err(eof)? as usize)
    }

    fn read_coord<B: ByteOrder>(&mut self) -> Result<Coord> {
        let x = self.cursor.read_f64::<B>().map_err(eof)?;
        let y = self.cursor.read_f64::<B>().map_err(eof)?;
        Ok(Coord::new(x, y))
    }

    fn read_coords<B: ByteOrder>(&mut self) -> Result<Vec<Coord>> {
        let count = self.read_count::<B>()?;
        let mut coords = Vec::with_capacity(self.capacity_for(count, COORD_BYTES));
        for _ in 0..count {
            coords.push(self.read_coord::<B>()?);
        }
        Ok(coords)
    }

    fn read_point<B: ByteOrder>(&mut self) -> Result<Point> {
        let coord = self.read_coord::<B>()?;
        if coord.x.is_nan() && coord.y.is_nan() {
            Ok(Point::empty())
        } else {
            Point::try_new(coord)
        }
    }

    fn read_line_string<B: ByteOrder>(&mut self) -> Result<LineString> {
        LineString::try_new(self.read_coords::<B>()?)
    }

    fn read_polygon<B: ByteOrder>(&mut self) -> Result<Polygon> {
        let num_rings = self.read_count::<B>()?;
        let mut rings = Vec::with_capacity(self.capacity_for(num_rings, COUNT_BYTES));
        for _ in 0..num_rings {
            rings.push(LinearRing::try_new(self.read_coords::<B>()?)?);
        }
        let mut rings = rings.into_iter();
        match rings.next() {
            Some(exterior) => Polygon::try_new(exterior, rings.collect()),
            None => Ok(Polygon::empty()),
        }
    }

    /// Read the element count and nested records of a multi geometry, requiring every nested
    /// record to be of the single kind the container holds.
    fn read_members<B: ByteOrder, T>(
        &mut self,
        container: GeometryType,
        depth: usize,
        extract: impl Fn(Geometry) -> std::result::Result<T, GeometryType>,
    ) -> Result<Vec<T>> {
        let count = self.read_count::<B>()?;
        let mut members = Vec::with_capacity(self.capacity_for(count, HEADER_BYTES));
        for _ in 0..count {
            let member = self.read_geometry(depth + 1)?;
            let member = extract(member).map_err(|found| {
                GeoError::MalformedInput(format!(
                    "Invalid WKB element type {} in {}",
                    u32::from(found),
                    container.name()
                ))
            })?;
            members.push(member);
        }
        Ok(members)
    }
}
