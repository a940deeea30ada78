// File I/O operations

pub mod csv;
pub mod json;

/// Errors surfaced while loading source data files.
///
/// Numeric parse failures inside a row are never fatal — they fall back to
/// the field's default (unknown diameter, 0.0 distance/velocity). What is
/// fatal: unreadable files, malformed documents, a missing required column
/// or field name, and an unparseable approach timestamp.
#[derive(Debug, PartialEq)]
pub enum DataError {
    /// Underlying file could not be read.
    Io(String),
    /// A document or row failed to parse.
    Parse(String),
    /// Required column/field names absent from the source.
    MissingFields(Vec<String>),
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Io(msg) => write!(f, "io error: {msg}"),
            DataError::Parse(msg) => write!(f, "parse error: {msg}"),
            DataError::MissingFields(fields) => {
                write!(f, "required fields missing from source: {}", fields.join(", "))
            }
        }
    }
}
