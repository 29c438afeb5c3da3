//! Error module for the Rusty SNN Viz library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
///
/// Rendering itself never fails: degenerate inputs produce degenerate charts.
/// Errors only arise at the edges, i.e., while loading data, validating a layout or sampling demo data.
#[derive(Debug, PartialEq)]
pub enum VizError {
    /// Error for invalid parameters, e.g., a layout whose margins exceed its size.
    InvalidParameter(String),
    /// Error for malformed input data, e.g., a JSON file that does not describe a chart.
    InvalidInput(String),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for VizError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VizError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
            VizError::InvalidInput(e) => write!(f, "Invalid input data: {}", e),
            VizError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for VizError {}

impl From<std::io::Error> for VizError {
    fn from(e: std::io::Error) -> Self {
        VizError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for VizError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            VizError::IOError(e.to_string())
        } else {
            VizError::InvalidInput(e.to_string())
        }
    }
}
