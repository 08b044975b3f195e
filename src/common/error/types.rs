//! Unified error type for odfgrid.
//!
//! Every decoding failure surfaces through this one enum so callers can match on
//! the kind while the message still carries the offending value.
use thiserror::Error;

/// Main error type for odfgrid operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// Invalid or corrupted package structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A value attribute or text run could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unrecognized character in an ISO 8601 duration
    #[error("Unrecognized character '{character}' in duration '{input}'")]
    DurationFormat { character: char, input: String },

    /// Feature the decoder refuses to approximate
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// `office:value-type` outside the known set
    #[error("Unrecognized cell value type '{0}'")]
    UnrecognizedType(String),

    /// A content-bearing row or cell carries a repeat count above one
    #[error("Content-bearing {element} carries repeat count {repeat}")]
    Consistency { element: &'static str, repeat: usize },

    /// A typed cell lacks the attribute holding its value
    #[error("Missing attribute {attribute} on {element}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// Positional table lookup past the end
    #[error("Table index {index} out of range ({count} tables)")]
    SheetIndexOutOfRange { index: usize, count: usize },

    /// Named table lookup miss
    #[error("No table named '{0}'")]
    SheetNotFound(String),

    /// Ingestion options that do not fit the table
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for odfgrid operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for the two lookup failures raised by table selection.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Error::SheetIndexOutOfRange { .. } | Error::SheetNotFound(_)
        )
    }
}
