use crate::core::io::cell::CellError;
use crate::core::io::trajectory::TrajectoryError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Cell file error: {0}")]
    Cell(#[from] CellError),

    #[error("Trajectory error: {0}")]
    Trajectory(#[from] TrajectoryError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}
