//! Algorithms over the geometry model: area, DE-9IM relations and boolean overlay.

pub mod area;
pub(crate) mod index;
pub mod overlay;
pub mod relate;
pub(crate) mod topology;

pub use area::Area;
pub use overlay::{Overlay, OverlayOp};
pub use relate::{IntersectionMatrix, Location, Predicate, Relate};

/// Every operation that can fail with a topology error, used to name it in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Relate,
    Predicate(Predicate),
    Overlay(OverlayOp),
}

impl Operation {
    /// The verb used in error messages: `check` for relations, `compute` for overlays.
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Relate | Operation::Predicate(_) => "check",
            Operation::Overlay(_) => "compute",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Relate => "relate",
            Operation::Predicate(predicate) => predicate.name(),
            Operation::Overlay(op) => op.name(),
        }
    }
}

impl From<Predicate> for Operation {
    fn from(value: Predicate) -> Self {
        Operation::Predicate(value)
    }
}

impl From<OverlayOp> for Operation {
    fn from(value: OverlayOp) -> Self {
        Operation::Overlay(value)
    }
}
