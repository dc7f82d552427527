use crate::geometry::Geometry;

/// An ordered, possibly heterogeneous and nested, sequence of geometries.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryCollection(Vec<Geometry>);

impl GeometryCollection {
    pub fn new(geometries: Vec<Geometry>) -> Self {
        Self(geometries)
    }

    pub fn empty() -> Self {
        Self(vec![])
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.0
    }

    pub fn num_geometries(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Geometry::is_empty)
    }
}

impl From<Vec<Geometry>> for GeometryCollection {
    fn from(value: Vec<Geometry>) -> Self {
        Self::new(value)
    }
}
