//! Error handling for the transcoding library
//!
//! Every operation validates its input before allocating output and surfaces
//! failures synchronously as a typed error. Nothing is retried internally and
//! no failure is downgraded to an empty result; empty output is returned only
//! where a degenerate input legitimately produces one (an empty mix, a
//! zero-frame stream).

#![allow(missing_docs)]

use std::fmt;
use thiserror::Error;

/// Result type alias for transcoding operations
pub type Result<T> = std::result::Result<T, TranscodeError>;

/// Error type covering every failure a transcoding call can report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscodeError {
    /// Buffer of 16-bit samples has an odd byte length
    #[error("odd buffer length {len}: 16-bit PCM requires an even number of bytes")]
    OddLength { len: usize },

    /// Buffer is shorter than the operation requires
    #[error("buffer too short: need at least {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },

    /// Stream input is not a whole number of codec frames
    #[error("input length {actual} is not a multiple of the frame size {frame_size}")]
    NotFrameAligned { frame_size: usize, actual: usize },

    /// A mixer channel has an odd byte length
    #[error("mix channel {channel} has invalid length {len}: PCM channels require an even byte count")]
    InvalidChannelLength { channel: usize, len: usize },

    /// RTP header carries an unsupported protocol version
    #[error("unsupported RTP version {version} (expected 2)")]
    InvalidVersion { version: u8 },

    /// RTP payload type does not match the codec being consumed
    #[error("unexpected RTP payload type: expected {expected}, got {actual}")]
    PayloadTypeMismatch { expected: u8, actual: u8 },

    /// Frame count argument must be positive
    #[error("frame count must be positive, got {count}")]
    InvalidFrameCount { count: usize },

    /// The external codec failed to initialize a channel context
    #[error("codec channel initialization failed: {reason}")]
    CodecInitFailed { reason: String },
}

impl TranscodeError {
    /// Create a new too-short error
    pub fn too_short(needed: usize, actual: usize) -> Self {
        Self::TooShort { needed, actual }
    }

    /// Create a new codec-initialization error
    pub fn codec_init_failed(reason: impl Into<String>) -> Self {
        Self::CodecInitFailed {
            reason: reason.into(),
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::OddLength { .. }
            | Self::TooShort { .. }
            | Self::NotFrameAligned { .. }
            | Self::InvalidChannelLength { .. } => ErrorCategory::InputSize,

            Self::InvalidVersion { .. } | Self::PayloadTypeMismatch { .. } => {
                ErrorCategory::Header
            }

            Self::InvalidFrameCount { .. } => ErrorCategory::Argument,

            Self::CodecInitFailed { .. } => ErrorCategory::ChannelContext,
        }
    }
}

/// Error category for grouping related failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Buffer size and alignment errors
    InputSize,
    /// RTP header validation errors
    Header,
    /// Invalid caller-supplied arguments
    Argument,
    /// External codec channel errors
    ChannelContext,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputSize => write!(f, "InputSize"),
            Self::Header => write!(f, "Header"),
            Self::Argument => write!(f, "Argument"),
            Self::ChannelContext => write!(f, "ChannelContext"),
        }
    }
}
