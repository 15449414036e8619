//! Error types for chart computation

use thiserror::Error;

/// Errors raised while building a birth chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Invalid birth date/time: {0}")]
    InvalidDateTime(String),

    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Invalid timezone offset: {0}")]
    InvalidTimezoneOffset(f64),

    #[error("Swiss Ephemeris error: {0}")]
    Ephemeris(String),

    #[error("Sun does not rise or set on this date at latitude {0}")]
    NoSunrise(f64),
}

/// Errors raised while opening or reading the star catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Download of {0} was aborted")]
    DownloadPanicked(String),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Star HIP {0} not found in catalog")]
    StarNotFound(u32),

    #[error("Malformed catalog record for HIP {hip}: field {field}")]
    Malformed { hip: u32, field: &'static str },
}

/// Errors surfaced to MCP clients as error tool results
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
