//! Input parsing: CSV source files to string tables.

mod parser;
mod source;

pub use parser::Parser;
pub use source::{DataTable, SourceMetadata};
