//! # Transcode-Core: Telephony Audio Transcoding Primitives
//!
//! This library sits between a host application and a narrowband voice codec,
//! providing the sample-level conversions of telephony audio interchange:
//!
//! - **G.711 companding**: A-law/μ-law ⇄ 16-bit linear PCM, table-driven
//!   expansion and segment-computed compression
//! - **L16 byte order**: network-order big-endian ⇄ host-order PCM
//! - **Channel mixing**: N-way PCM summation with loudness normalization
//!   and saturation
//! - **RTP payload rewriting**: G.729 ⇄ G.711 payload substitution that
//!   preserves header semantics
//! - **Frame-stream transcoding**: raw G.729 bitstream ⇄ PCM frame runs
//!
//! The G.729 codec itself stays outside the crate behind the
//! [`codec::CodecProvider`] boundary: operations that need it open a channel
//! context per call and release it on every exit path.
//!
//! All operations are synchronous and stateless across calls; buffers are
//! caller-owned for the duration of one call and exactly one output buffer
//! is allocated per call.
//!
//! ## Usage
//!
//! ```rust
//! use transcode_core::companding::{self, CompandingLaw};
//! use transcode_core::mixer;
//!
//! // Compand a PCM buffer to μ-law and back.
//! let pcm: Vec<u8> = vec![0x00, 0x01, 0xFF, 0xFE];
//! let codes = companding::encode_pcm(&pcm, CompandingLaw::MuLaw)?;
//! let decoded = companding::decode_to_pcm(&codes, CompandingLaw::MuLaw);
//! assert_eq!(decoded.len(), pcm.len());
//!
//! // Mix two call legs into one buffer.
//! let mixed = mixer::mix_channels(&[decoded.as_slice(), pcm.as_slice()], 8000)?;
//! assert_eq!(mixed.len(), pcm.len());
//! # Ok::<(), transcode_core::TranscodeError>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod companding;
pub mod error;
pub mod mixer;
pub mod netorder;
pub mod pcm;
pub mod rtp;
pub mod stream;
pub mod types;

// Re-export commonly used types
pub use codec::{CodecProvider, G729Decoder, G729Encoder};
pub use error::{ErrorCategory, Result, TranscodeError};
pub use rtp::{RtpHeader, rewrite_rtp_payload};
pub use types::{
    COMPANDED_FRAME_BYTES, CompandingLaw, DEFAULT_FRAME_COUNT, G729_FRAME_BYTES,
    G729_PAYLOAD_TYPE, PCM_FRAME_BYTES, PCM_FRAME_SAMPLES, PCMA_PAYLOAD_TYPE, PCMU_PAYLOAD_TYPE,
    PcmFrame, RTP_HEADER_BYTES, RewriteOptions, TranscodeDirection,
};

/// Version information for the transcoding library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the transcoding library
///
/// Installs a default tracing subscriber when none is set and warms the
/// companding lookup tables. Safe to call multiple times.
pub fn init() {
    let _ = tracing_subscriber::fmt::try_init();

    companding::init_tables();

    tracing::debug!("transcode-core v{} initialized", VERSION);
}
