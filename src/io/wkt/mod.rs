//! Reading and writing 2D WKT.

mod reader;
mod tokenizer;
mod writer;

pub use reader::from_wkt;
pub use writer::{to_wkt, write_wkt};
