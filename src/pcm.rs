//! Host-order PCM byte buffer helpers
//!
//! Callers hand the library raw byte buffers; every 2-byte group is one
//! signed 16-bit sample in host byte order. These helpers centralize the
//! even-length invariant and the byte/sample view conversions used by the
//! companding, mixing, and stream modules.

use crate::error::{Result, TranscodeError};

/// Check the even-byte-length invariant of a 16-bit PCM buffer
pub fn ensure_even_len(len: usize) -> Result<()> {
    if len % 2 != 0 {
        return Err(TranscodeError::OddLength { len });
    }
    Ok(())
}

/// Convert a host-order PCM byte buffer into samples
///
/// # Errors
///
/// Returns [`TranscodeError::OddLength`] when the byte length is odd.
pub fn samples_from_bytes(bytes: &[u8]) -> Result<Vec<i16>> {
    ensure_even_len(bytes.len())?;
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| i16::from_ne_bytes([pair[0], pair[1]]))
        .collect())
}

/// Convert samples into a host-order PCM byte buffer
pub fn bytes_from_samples(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        bytes.extend_from_slice(&sample.to_ne_bytes());
    }
    bytes
}

/// Read the sample at `index` from a host-order PCM byte buffer
///
/// Callers guarantee `index` is within the buffer's sample count.
pub(crate) fn sample_at(bytes: &[u8], index: usize) -> i16 {
    i16::from_ne_bytes([bytes[index * 2], bytes[index * 2 + 1]])
}
