//! N-channel PCM mixer
//!
//! Sums an arbitrary number of host-order PCM buffers into one output
//! buffer, normalizing by `1/sqrt(active_channels)` and saturating to the
//! 16-bit range. The square-root factor is a loudness heuristic: uncorrelated
//! signals add in power, not amplitude, so dividing by the channel count
//! would over-attenuate a busy mix. It is a policy constant, not a derived
//! invariant.

use crate::error::{Result, TranscodeError};
use crate::pcm::sample_at;

/// Mix an arbitrary number of PCM channels into one buffer
///
/// Channels may differ in length; shorter channels are treated as silent for
/// the sample positions they do not cover, and the output spans the longest
/// channel. Zero channels (or all-empty channels) mix to an empty buffer. A
/// single channel is returned byte-for-byte, skipping the mixing math.
///
/// `sample_rate_hint` is informational only; the mix is rate-agnostic.
///
/// # Errors
///
/// Returns [`TranscodeError::InvalidChannelLength`] naming the first channel
/// whose byte length is odd. Validation covers every channel before any
/// output is produced, including the single-channel fast path.
pub fn mix_channels<B: AsRef<[u8]>>(channels: &[B], sample_rate_hint: u32) -> Result<Vec<u8>> {
    tracing::trace!(
        channels = channels.len(),
        sample_rate_hint,
        "mixing PCM channels"
    );

    if channels.is_empty() {
        return Ok(Vec::new());
    }

    for (channel, buffer) in channels.iter().enumerate() {
        let len = buffer.as_ref().len();
        if len % 2 != 0 {
            return Err(TranscodeError::InvalidChannelLength { channel, len });
        }
    }

    if channels.len() == 1 {
        return Ok(channels[0].as_ref().to_vec());
    }

    let output_samples = channels
        .iter()
        .map(|buffer| buffer.as_ref().len() / 2)
        .max()
        .unwrap_or(0);
    let active_channels = channels
        .iter()
        .filter(|buffer| !buffer.as_ref().is_empty())
        .count();
    if output_samples == 0 || active_channels == 0 {
        return Ok(Vec::new());
    }

    // 32-bit accumulation keeps dozens of full-scale 16-bit channels from
    // overflowing before normalization.
    let mut accumulator = vec![0i32; output_samples];
    for buffer in channels {
        let buffer = buffer.as_ref();
        let buffer_samples = buffer.len() / 2;
        for (index, slot) in accumulator.iter_mut().enumerate().take(buffer_samples) {
            *slot += i32::from(sample_at(buffer, index));
        }
    }

    let scale = 1.0 / (active_channels as f64).sqrt();
    let mut output = Vec::with_capacity(output_samples * 2);
    for &sum in &accumulator {
        let normalized = (f64::from(sum) * scale) as i32;
        let clipped = normalized.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
        output.extend_from_slice(&clipped.to_ne_bytes());
    }
    Ok(output)
}
