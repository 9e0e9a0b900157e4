//! Network byte order (L16) conversion
//!
//! RTP carries uncompressed 16-bit audio (L16) big-endian; hosts hand this
//! library PCM in native order. The conversion is a per-sample byte swap and
//! therefore self-inverse: applying it twice returns the original buffer.

use crate::error::{Result, TranscodeError};
use crate::pcm;

/// Convert host-order PCM bytes to network-order (big-endian) L16 bytes
///
/// # Errors
///
/// Returns [`TranscodeError::TooShort`] when the input holds fewer than one
/// sample, [`TranscodeError::OddLength`] when the byte length is odd.
pub fn pcm_to_network_order(pcm_bytes: &[u8]) -> Result<Vec<u8>> {
    swap_sample_bytes(pcm_bytes)
}

/// Convert network-order (big-endian) L16 bytes to host-order PCM bytes
///
/// # Errors
///
/// Returns [`TranscodeError::TooShort`] when the input holds fewer than one
/// sample, [`TranscodeError::OddLength`] when the byte length is odd.
pub fn network_order_to_pcm(network_bytes: &[u8]) -> Result<Vec<u8>> {
    swap_sample_bytes(network_bytes)
}

fn swap_sample_bytes(input: &[u8]) -> Result<Vec<u8>> {
    if input.len() < 2 {
        return Err(TranscodeError::too_short(2, input.len()));
    }
    pcm::ensure_even_len(input.len())?;

    let mut output = Vec::with_capacity(input.len());
    for pair in input.chunks_exact(2) {
        output.push(pair[1]);
        output.push(pair[0]);
    }
    Ok(output)
}
