use std::fmt;
use std::str::FromStr;

use geo::coordinate_position::CoordPos;
use geo::dimensions::Dimensions;

use crate::error::{GeoError, Result};
use crate::geometry::Dimension;

/// Where a point lies relative to a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

impl Location {
    const ALL: [Location; 3] = [Location::Interior, Location::Boundary, Location::Exterior];

    fn index(self) -> usize {
        match self {
            Location::Interior => 0,
            Location::Boundary => 1,
            Location::Exterior => 2,
        }
    }

    fn to_geo(self) -> CoordPos {
        match self {
            Location::Interior => CoordPos::Inside,
            Location::Boundary => CoordPos::OnBoundary,
            Location::Exterior => CoordPos::Outside,
        }
    }
}

/// A DE-9IM intersection matrix.
///
/// Cell `(a, b)` holds the dimension of the intersection of location `a` of the first geometry
/// with location `b` of the second. The textual form lists the cells row-major, writing `F` for
/// an empty intersection, e.g. `212101212`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntersectionMatrix([[Dimension; 3]; 3]);

impl IntersectionMatrix {
    /// A matrix with every cell empty.
    pub fn empty() -> Self {
        Self([[Dimension::Empty; 3]; 3])
    }

    pub fn get(&self, a: Location, b: Location) -> Dimension {
        self.0[a.index()][b.index()]
    }

    pub(crate) fn set(&mut self, a: Location, b: Location, dimension: Dimension) {
        self.0[a.index()][b.index()] = dimension;
    }

    /// The matrix with the roles of the two geometries swapped.
    pub fn transpose(&self) -> Self {
        let mut transposed = Self::empty();
        for a in Location::ALL {
            for b in Location::ALL {
                transposed.set(b, a, self.get(a, b));
            }
        }
        transposed
    }

    /// Whether the matrix matches a 9-character pattern over `0`, `1`, `2`, `T`, `F` and `*`.
    ///
    /// `T` matches any non-empty cell, `F` an empty one and `*` anything. Letters are
    /// case-insensitive.
    pub fn matches(&self, pattern: &str) -> Result<bool> {
        let invalid = || GeoError::MalformedInput(format!("Invalid DE-9IM pattern: '{pattern}'"));
        if pattern.chars().count() != 9 {
            return Err(invalid());
        }
        let mut matched = true;
        for (i, symbol) in pattern.chars().enumerate() {
            let cell = self.0[i / 3][i % 3];
            matched &= match symbol.to_ascii_uppercase() {
                '*' => true,
                'T' => cell != Dimension::Empty,
                'F' => cell == Dimension::Empty,
                '0' => cell == Dimension::Zero,
                '1' => cell == Dimension::One,
                '2' => cell == Dimension::Two,
                _ => return Err(invalid()),
            };
        }
        Ok(matched)
    }

    fn is_set(&self, a: Location, b: Location) -> bool {
        self.get(a, b) != Dimension::Empty
    }

    pub fn is_disjoint(&self) -> bool {
        use Location::*;
        !self.is_set(Interior, Interior)
            && !self.is_set(Interior, Boundary)
            && !self.is_set(Boundary, Interior)
            && !self.is_set(Boundary, Boundary)
    }

    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    pub fn is_within(&self) -> bool {
        use Location::*;
        self.is_set(Interior, Interior)
            && !self.is_set(Interior, Exterior)
            && !self.is_set(Boundary, Exterior)
    }

    pub fn is_contains(&self) -> bool {
        use Location::*;
        self.is_set(Interior, Interior)
            && !self.is_set(Exterior, Interior)
            && !self.is_set(Exterior, Boundary)
    }

    /// `dim_a` and `dim_b` are the dimensions of the related geometries.
    pub fn is_equals(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::*;
        dim_a == dim_b
            && self.is_set(Interior, Interior)
            && !self.is_set(Interior, Exterior)
            && !self.is_set(Boundary, Exterior)
            && !self.is_set(Exterior, Interior)
            && !self.is_set(Exterior, Boundary)
    }

    pub fn is_touches(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::*;
        if dim_a == Dimension::Zero && dim_b == Dimension::Zero {
            return false;
        }
        !self.is_set(Interior, Interior)
            && (self.is_set(Interior, Boundary)
                || self.is_set(Boundary, Interior)
                || self.is_set(Boundary, Boundary))
    }

    pub fn is_crosses(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Dimension::*;
        use Location::*;
        match (dim_a, dim_b) {
            (Zero, One) | (Zero, Two) | (One, Two) => {
                self.is_set(Interior, Interior) && self.is_set(Interior, Exterior)
            }
            (One, Zero) | (Two, Zero) | (Two, One) => {
                self.is_set(Interior, Interior) && self.is_set(Exterior, Interior)
            }
            (One, One) => self.get(Interior, Interior) == Zero,
            _ => false,
        }
    }

    pub fn is_overlaps(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Dimension::*;
        use Location::*;
        match (dim_a, dim_b) {
            (Zero, Zero) | (Two, Two) => {
                self.is_set(Interior, Interior)
                    && self.is_set(Interior, Exterior)
                    && self.is_set(Exterior, Interior)
            }
            (One, One) => {
                self.get(Interior, Interior) == One
                    && self.is_set(Interior, Exterior)
                    && self.is_set(Exterior, Interior)
            }
            _ => false,
        }
    }
}

fn dimension_from_geo(dimensions: Dimensions) -> Dimension {
    match dimensions {
        Dimensions::Empty => Dimension::Empty,
        Dimensions::ZeroDimensional => Dimension::Zero,
        Dimensions::OneDimensional => Dimension::One,
        Dimensions::TwoDimensional => Dimension::Two,
    }
}

impl From<&geo::relate::IntersectionMatrix> for IntersectionMatrix {
    fn from(value: &geo::relate::IntersectionMatrix) -> Self {
        let mut matrix = Self::empty();
        for a in Location::ALL {
            for b in Location::ALL {
                matrix.set(a, b, dimension_from_geo(value.get(a.to_geo(), b.to_geo())));
            }
        }
        matrix
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
        }
        Ok(())
    }
}

impl FromStr for IntersectionMatrix {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GeoError::MalformedInput(format!("Invalid intersection matrix: '{s}'"));
        if s.chars().count() != 9 {
            return Err(invalid());
        }
        let mut matrix = Self::empty();
        for (i, symbol) in s.chars().enumerate() {
            matrix.0[i / 3][i % 3] = match symbol.to_ascii_uppercase() {
                'F' => Dimension::Empty,
                '0' => Dimension::Zero,
                '1' => Dimension::One,
                '2' => Dimension::Two,
                _ => return Err(invalid()),
            };
        }
        Ok(matrix)
    }
}
