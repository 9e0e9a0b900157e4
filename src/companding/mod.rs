//! G.711 companding codec
//!
//! Stateless conversion between 16-bit linear PCM and 8-bit logarithmically
//! compressed A-law/μ-law codes. Every sample converts independently, so the
//! buffer operations are plain element-wise maps with no cross-sample state.
//!
//! The compress direction is segment-computed ([`reference`]) with a
//! full-range lookup table for bulk work ([`tables`]); the expand direction
//! is a 256-entry constant table per law and never fails.

pub mod reference;
pub mod tables;

pub use reference::{alaw_compress, ulaw_compress};
pub use tables::{alaw_expand, init_tables, ulaw_expand};

pub use crate::types::CompandingLaw;

use crate::error::Result;
use crate::pcm;

/// Compress one sample under the given law (table-accelerated)
pub fn compress_sample(sample: i16, law: CompandingLaw) -> u8 {
    match law {
        CompandingLaw::ALaw => tables::alaw_compress_table(sample),
        CompandingLaw::MuLaw => tables::ulaw_compress_table(sample),
    }
}

/// Expand one code byte under the given law
pub fn expand_code(code: u8, law: CompandingLaw) -> i16 {
    match law {
        CompandingLaw::ALaw => tables::alaw_expand(code),
        CompandingLaw::MuLaw => tables::ulaw_expand(code),
    }
}

/// Compress a host-order PCM byte buffer to companded codes
///
/// Output holds one code byte per input sample. An empty input produces an
/// empty output.
///
/// # Errors
///
/// Returns [`crate::TranscodeError::OddLength`] when the byte length is odd.
pub fn encode_pcm(pcm_bytes: &[u8], law: CompandingLaw) -> Result<Vec<u8>> {
    pcm::ensure_even_len(pcm_bytes.len())?;
    Ok(pcm_bytes
        .chunks_exact(2)
        .map(|pair| compress_sample(i16::from_ne_bytes([pair[0], pair[1]]), law))
        .collect())
}

/// Expand companded codes to a host-order PCM byte buffer
///
/// Total: every byte value is a valid code, so this never fails. Output is
/// twice the input length.
pub fn decode_to_pcm(codes: &[u8], law: CompandingLaw) -> Vec<u8> {
    let mut pcm_bytes = Vec::with_capacity(codes.len() * 2);
    for &code in codes {
        pcm_bytes.extend_from_slice(&expand_code(code, law).to_ne_bytes());
    }
    pcm_bytes
}
