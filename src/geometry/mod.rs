//! The in-memory geometry model.
//!
//! [`Geometry`] is a closed sum over the seven Simple Features kinds. Every value is validated
//! on construction and immutable afterwards; collections own their members exclusively.

use num_enum::{IntoPrimitive, TryFromPrimitive};

pub use coord::Coord;
pub use geometrycollection::GeometryCollection;
pub use linearring::LinearRing;
pub use linestring::LineString;
pub use multilinestring::MultiLineString;
pub use multipoint::MultiPoint;
pub use multipolygon::MultiPolygon;
pub use point::Point;
pub use polygon::Polygon;

pub(crate) use multilinestring::coord_key;

mod coord;
mod geometrycollection;
mod linearring;
mod linestring;
mod multilinestring;
mod multipoint;
mod multipolygon;
mod point;
mod polygon;
pub(crate) mod validity;

/// The seven external geometry kinds. The discriminants are the WKB type codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum GeometryType {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
}

impl GeometryType {
    pub fn name(&self) -> &'static str {
        use GeometryType::*;
        match self {
            Point => "Point",
            LineString => "LineString",
            Polygon => "Polygon",
            MultiPoint => "MultiPoint",
            MultiLineString => "MultiLineString",
            MultiPolygon => "MultiPolygon",
            GeometryCollection => "GeometryCollection",
        }
    }

    pub fn wkt_keyword(&self) -> &'static str {
        use GeometryType::*;
        match self {
            Point => "POINT",
            LineString => "LINESTRING",
            Polygon => "POLYGON",
            MultiPoint => "MULTIPOINT",
            MultiLineString => "MULTILINESTRING",
            MultiPolygon => "MULTIPOLYGON",
            GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }

    /// Case-insensitive lookup of a WKT keyword.
    pub fn from_wkt_keyword(word: &str) -> Option<Self> {
        use GeometryType::*;
        [
            Point,
            LineString,
            Polygon,
            MultiPoint,
            MultiLineString,
            MultiPolygon,
            GeometryCollection,
        ]
        .into_iter()
        .find(|typ| typ.wkt_keyword().eq_ignore_ascii_case(word))
    }
}

/// Topological dimension of a point set, shared by geometries and intersection matrix cells.
///
/// `Empty` is the dimension of the empty set (written `F` or `-1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Empty,
    Zero,
    One,
    Two,
}

impl Dimension {
    pub fn as_i8(self) -> i8 {
        match self {
            Dimension::Empty => -1,
            Dimension::Zero => 0,
            Dimension::One => 1,
            Dimension::Two => 2,
        }
    }

    /// The character used for this value in an intersection matrix string.
    pub fn as_char(self) -> char {
        match self {
            Dimension::Empty => 'F',
            Dimension::Zero => '0',
            Dimension::One => '1',
            Dimension::Two => '2',
        }
    }
}

/// Any Simple Features geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// True when the geometry denotes the empty point set.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_empty(),
            Geometry::LineString(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::MultiPoint(g) => g.is_empty(),
            Geometry::MultiLineString(g) => g.is_empty(),
            Geometry::MultiPolygon(g) => g.is_empty(),
            Geometry::GeometryCollection(g) => g.is_empty(),
        }
    }

    /// 0 for point-like, 1 for line-like, 2 for area-like geometries; collections report the
    /// maximum over their members, and `Empty` when they have none.
    pub fn dimension(&self) -> Dimension {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::Zero,
            Geometry::LineString(_) | Geometry::MultiLineString(_) => Dimension::One,
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Dimension::Two,
            Geometry::GeometryCollection(gc) => gc
                .geometries()
                .iter()
                .map(Geometry::dimension)
                .max()
                .unwrap_or(Dimension::Empty),
        }
    }

    /// Dimension of the geometry's boundary.
    pub fn boundary_dimension(&self) -> Dimension {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::Empty,
            Geometry::LineString(g) => {
                if g.is_empty() || g.is_closed() {
                    Dimension::Empty
                } else {
                    Dimension::Zero
                }
            }
            Geometry::MultiLineString(g) => g.boundary_dimension(),
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => {
                if self.is_empty() {
                    Dimension::Empty
                } else {
                    Dimension::One
                }
            }
            Geometry::GeometryCollection(gc) => gc
                .geometries()
                .iter()
                .map(Geometry::boundary_dimension)
                .max()
                .unwrap_or(Dimension::Empty),
        }
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Geometry::Point(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Geometry::LineString(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Geometry::Polygon(value)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(value: MultiPoint) -> Self {
        Geometry::MultiPoint(value)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(value: MultiLineString) -> Self {
        Geometry::MultiLineString(value)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(value: MultiPolygon) -> Self {
        Geometry::MultiPolygon(value)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Geometry::GeometryCollection(value)
    }
}
