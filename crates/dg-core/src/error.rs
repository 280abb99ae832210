//! Configuration errors
//!
//! Generation itself never fails: a short attempt budget, a stalled connector
//! or a superseded run are all legal outcomes. Only malformed configuration
//! is rejected, before any run starts.

use thiserror::Error;

/// Rejected generator configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Grid {width}x{height} is too small (minimum {min}x{min})")]
    GridTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("{name} must be a percentage in 0..=100, got {value}")]
    ChanceOutOfRange { name: &'static str, value: u32 },

    #[error("max_room_doors must be at least 1")]
    NoRoomDoors,

    #[error("target_stage must be in 1..=4, got {0}")]
    TargetStageOutOfRange(u8),

    #[error("Invalid {name} bounds: min {min}, max {max}")]
    InvalidSizeBounds {
        name: &'static str,
        min: usize,
        max: usize,
    },

    #[error("No odd {name} between {min} and {max}")]
    NoOddSize {
        name: &'static str,
        min: usize,
        max: usize,
    },

    #[error("batch must be at least 1")]
    EmptyBatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ConfigError::GridTooSmall {
            width: 3,
            height: 9,
            min: 5,
        };
        assert_eq!(err.to_string(), "Grid 3x9 is too small (minimum 5x5)");

        let err = ConfigError::ChanceOutOfRange {
            name: "room_chance",
            value: 140,
        };
        assert!(err.to_string().contains("room_chance"));
        assert_eq!(
            ConfigError::TargetStageOutOfRange(7).to_string(),
            "target_stage must be in 1..=4, got 7"
        );
    }
}
