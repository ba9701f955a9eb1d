//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid dimension: world must be at least 1x1, got {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },

    #[error("({x}, {y}) is not a valid location, the world spans [0, {width}) x [0, {height})")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("Unknown lifeform: {0}")]
    UnknownLifeform(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = Error::OutOfBounds {
            x: 10,
            y: -1,
            width: 10,
            height: 5,
        };
        assert_eq!(
            err.to_string(),
            "(10, -1) is not a valid location, the world spans [0, 10) x [0, 5)"
        );
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
