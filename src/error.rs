//! Error types for workbook loading, model building and output.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generator operations.
pub type CcgResult<T> = Result<T, CcgError>;

/// Errors that abort a generator run.
///
/// Rows with missing required fields are not errors; they are skipped while
/// decoding. Everything here is fatal for the whole run.
#[derive(Debug, Error)]
pub enum CcgError {
    /// The input file could not be opened or read.
    #[error("Cannot read data from '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input file is readable but is not a workbook.
    #[error("Cannot parse workbook '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A trunk VLAN list contains a token that is not an id or an `A-B` range.
    #[error("{sheet} row {row}: device '{device}' interface '{interface}': invalid trunk VLAN list '{value}': {reason}")]
    InvalidVlanRange {
        sheet: String,
        row: usize,
        device: String,
        interface: String,
        value: String,
        reason: String,
    },

    /// An interface address or route prefix is not `a.b.c.d/n`.
    #[error("{sheet} row {row}: device '{device}' {field}: invalid CIDR '{value}': {reason}")]
    InvalidCidr {
        sheet: String,
        row: usize,
        device: String,
        field: String,
        value: String,
        reason: String,
    },

    /// A rendered value failed conversion after the model was built.
    #[error("Device '{device}': {message}")]
    Render { device: String, message: String },

    /// A device configuration file could not be written.
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CcgError {
    /// Process exit code for this error class.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Read { .. } | Self::Parse { .. } => 3,
            Self::InvalidVlanRange { .. } | Self::InvalidCidr { .. } | Self::Render { .. } => 4,
            Self::Write { .. } => 5,
        }
    }
}
