use thiserror::Error;

use crate::color::ColorParseError;

#[derive(Debug, Error)]
pub enum WhiteboardError {
    #[error("cannot allocate a {width}x{height} surface")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("failed to encode snapshot: {0}")]
    Encode(String),

    #[error("failed to decode snapshot: {0}")]
    Decode(String),

    #[error("snapshot is {found_width}x{found_height}, surface is {width}x{height}")]
    SnapshotSize {
        width: u32,
        height: u32,
        found_width: u32,
        found_height: u32,
    },

    #[error(transparent)]
    Color(#[from] ColorParseError),
}
