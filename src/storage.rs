/// Parsing and loading of the delimited course catalogue format.
pub mod catalog;

pub use catalog::{DELIMITER, LoadError, LoadReport, ParseError, load_path, load_reader, parse_line};
