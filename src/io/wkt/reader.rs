use crate::error::{GeoError, Result};
use crate::geometry::{
    Coord, Geometry, GeometryCollection, GeometryType, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};
use crate::io::wkt::tokenizer::{Token, Tokenizer};

/// Nested collections deeper than this are rejected instead of recursing further.
const MAX_NESTING: usize = 128;

/// Parse WKT text into a [`Geometry`].
///
/// Keywords are case-insensitive. Only 2D coordinates are accepted.
///
/// ```
/// use sfgeom::io::wkt::{from_wkt, to_wkt};
///
/// let geom = from_wkt("multipoint ((1 2), (3 4))").unwrap();
/// assert_eq!(to_wkt(&geom), "MULTIPOINT (1 2, 3 4)");
/// ```
pub fn from_wkt(text: &str) -> Result<Geometry> {
    let mut reader = WKTReader {
        tokens: Tokenizer::new(text),
    };
    reader.read().map_err(|err| {
        log::debug!("rejected WKT input: {err}");
        err
    })
}

fn malformed(expected: &str, found: Token<'_>) -> GeoError {
    GeoError::MalformedInput(format!("Expected {expected} but encountered {found}"))
}

/// Whether the word is spelled like a decimal number. Rules out `inf` and `NaN`, which `f64`
/// parsing would otherwise accept.
fn is_decimal(word: &str) -> bool {
    word.bytes().any(|b| b.is_ascii_digit())
        && word
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'))
}

/// An opening `(` or the `EMPTY` keyword.
enum Opening {
    Empty,
    Paren,
}

struct WKTReader<'a> {
    tokens: Tokenizer<'a>,
}

impl WKTReader<'_> {
    fn read(&mut self) -> Result<Geometry> {
        let geom = self.read_geometry(0)?;
        match self.tokens.next_token() {
            Token::Eof => Ok(geom),
            token => Err(GeoError::MalformedInput(format!(
                "Unexpected text after end of geometry: {token}"
            ))),
        }
    }

    fn read_geometry(&mut self, depth: usize) -> Result<Geometry> {
        if depth > MAX_NESTING {
            return Err(GeoError::MalformedInput(
                "WKT geometry nesting is too deep".to_string(),
            ));
        }
        let keyword = match self.tokens.next_token() {
            Token::Word(word) => word,
            token => return Err(malformed("word", token)),
        };
        let geometry_type = GeometryType::from_wkt_keyword(keyword)
            .ok_or_else(|| GeoError::MalformedInput(format!("Unknown type: '{keyword}'")))?;
        let geom = match geometry_type {
            GeometryType::Point => self.read_point()?.into(),
            GeometryType::LineString => self.read_line_string()?.into(),
            GeometryType::Polygon => self.read_polygon()?.into(),
            GeometryType::MultiPoint => {
                MultiPoint::new(self.read_list(|reader| reader.read_multi_point_member())?).into()
            }
            GeometryType::MultiLineString => {
                MultiLineString::new(self.read_list(|reader| reader.read_line_string())?).into()
            }
            GeometryType::MultiPolygon => {
                MultiPolygon::new(self.read_list(|reader| reader.read_polygon())?).into()
            }
            GeometryType::GeometryCollection => GeometryCollection::new(
                self.read_list(|reader| reader.read_geometry(depth + 1))?,
            )
            .into(),
        };
        Ok(geom)
    }

    fn read_opening(&mut self) -> Result<Opening> {
        match self.tokens.next_token() {
            Token::Word(word) if word.eq_ignore_ascii_case("EMPTY") => Ok(Opening::Empty),
            Token::LeftParen => Ok(Opening::Paren),
            token => Err(malformed("'EMPTY' or '('", token)),
        }
    }

    fn expect_close(&mut self) -> Result<()> {
        match self.tokens.next_token() {
            Token::RightParen => Ok(()),
            token => Err(malformed("')'", token)),
        }
    }

    /// After a list item: `true` if another item follows, `false` at the closing `)`.
    fn read_separator(&mut self) -> Result<bool> {
        match self.tokens.next_token() {
            Token::Comma => Ok(true),
            Token::RightParen => Ok(false),
            token => Err(malformed("',' or ')'", token)),
        }
    }

    /// `EMPTY` or a parenthesized, comma-separated list of items.
    fn read_list<T>(&mut self, mut read_item: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        let mut items = vec![];
        if let Opening::Paren = self.read_opening()? {
            loop {
                items.push(read_item(self)?);
                if !self.read_separator()? {
                    break;
                }
            }
        }
        Ok(items)
    }

    fn read_number(&mut self) -> Result<f64> {
        match self.tokens.next_token() {
            Token::Word(word) if is_decimal(word) => word
                .parse::<f64>()
                .map_err(|_| malformed("number", Token::Word(word))),
            token => Err(malformed("number", token)),
        }
    }

    fn read_coord(&mut self) -> Result<Coord> {
        let x = self.read_number()?;
        let y = self.read_number()?;
        Ok(Coord::new(x, y))
    }

    fn read_coords(&mut self) -> Result<Vec<Coord>> {
        self.read_list(|reader| reader.read_coord())
    }

    fn read_point(&mut self) -> Result<Point> {
        match self.read_opening()? {
            Opening::Empty => Ok(Point::empty()),
            Opening::Paren => {
                let coord = self.read_coord()?;
                self.expect_close()?;
                Point::try_new(coord)
            }
        }
    }

    /// Members may be written bare (`1 2`), parenthesized (`(1 2)`) or as `EMPTY`.
    fn read_multi_point_member(&mut self) -> Result<Point> {
        match self.tokens.peek() {
            Token::LeftParen => {
                self.tokens.next_token();
                let coord = self.read_coord()?;
                self.expect_close()?;
                Point::try_new(coord)
            }
            Token::Word(word) if word.eq_ignore_ascii_case("EMPTY") => {
                self.tokens.next_token();
                Ok(Point::empty())
            }
            _ => Point::try_new(self.read_coord()?),
        }
    }

    fn read_line_string(&mut self) -> Result<LineString> {
        LineString::try_new(self.read_coords()?)
    }

    fn read_polygon(&mut self) -> Result<Polygon> {
        let rings = self.read_list(|reader| LinearRing::try_new(reader.read_coords()?))?;
        let mut rings = rings.into_iter();
        match rings.next() {
            Some(exterior) => Polygon::try_new(exterior, rings.collect()),
            None => Ok(Polygon::empty()),
        }
    }
}
