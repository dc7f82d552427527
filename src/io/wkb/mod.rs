//! Reading and writing OGC Simple Features (2D) WKB-encoded geometries.
//!
//! Readers accept either byte order, per record. Writers emit little-endian unless asked for
//! otherwise.

mod common;
mod reader;
mod writer;

pub use common::Endianness;
pub use reader::from_wkb;
pub use writer::{geometry_wkb_size, to_wkb, write_wkb};
