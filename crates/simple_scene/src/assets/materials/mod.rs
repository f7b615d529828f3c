//! Material library parsing
//!
//! MTL files referenced by `mtllib` statements are parsed here; the OBJ
//! loader turns the results into the material list of a `RawModel`.

pub mod mtl_parser;

pub use mtl_parser::{MtlParser, MtlData};
