use std::collections::HashMap;

use crate::geometry::{Coord, Dimension, LineString};

/// An ordered sequence of line strings.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiLineString(Vec<LineString>);

impl MultiLineString {
    pub fn new(lines: Vec<LineString>) -> Self {
        Self(lines)
    }

    pub fn empty() -> Self {
        Self(vec![])
    }

    pub fn lines(&self) -> &[LineString] {
        &self.0
    }

    pub fn num_lines(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(LineString::is_empty)
    }

    /// Dimension of the boundary under the mod-2 rule: an endpoint shared by an even number of
    /// line ends is interior.
    pub(crate) fn boundary_dimension(&self) -> Dimension {
        let mut counts: HashMap<[u64; 2], usize> = HashMap::new();
        for (start, end) in self.0.iter().filter_map(LineString::endpoints) {
            *counts.entry(coord_key(&start)).or_default() += 1;
            *counts.entry(coord_key(&end)).or_default() += 1;
        }
        if counts.values().any(|count| count % 2 == 1) {
            Dimension::Zero
        } else {
            Dimension::Empty
        }
    }
}

impl From<Vec<LineString>> for MultiLineString {
    fn from(value: Vec<LineString>) -> Self {
        Self::new(value)
    }
}

/// Bit-exact hash key for a coordinate, with `-0.0` folded onto `0.0`.
pub(crate) fn coord_key(coord: &Coord) -> [u64; 2] {
    [(coord.x + 0.0).to_bits(), (coord.y + 0.0).to_bits()]
}
