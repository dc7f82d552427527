//! Readers and writers for the WKT and WKB exchange formats, and interop with the `geo` crate.

pub mod geo;
pub mod wkb;
pub mod wkt;
