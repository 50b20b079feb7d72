//! Mesh import and export.

#[cfg(feature = "obj-io")]
pub mod obj;

#[cfg(feature = "stl-io")]
pub mod stl;

/// Generic I/O and format-conversion errors.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("std::io::Error: {0}")]
    StdIo(#[from] std::io::Error),

    #[error("Could not parse float: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    #[error("Input is malformed: {0}")]
    MalformedInput(String),
}
