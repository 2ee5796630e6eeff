use thiserror::Error;

/// Why a calibration input was rejected. The scale is left unchanged in every case.
#[derive(Debug, Error, PartialEq)]
pub enum CalibrationError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("length must be positive, got {0}")]
    NotPositive(f32),

    #[error("length must be finite")]
    NotFinite,

    #[error("length was not changed")]
    Unchanged,

    #[error("line {0} no longer exists")]
    MissingLine(crate::line::LineId),

    #[error("line {0} has zero length and cannot be calibrated")]
    DegenerateLine(crate::line::LineId),
}

/// Errors that can occur while loading session settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Errors that can occur while loading a background image
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dropped file has no accessible data")]
    Empty,
}
