//! G.711 companding reference implementation
//!
//! Segment-based logarithmic quantization of 16-bit linear PCM to 8-bit
//! A-law and μ-law codes, following ITU-T Recommendation G.711.
//!
//! ## Algorithm Details
//!
//! Both laws divide the sample range into 8 logarithmic segments. The
//! segment index becomes the exponent field of the code; 4 mantissa bits
//! are taken from the sample at a segment-dependent shift.
//!
//! ### μ-law Compression
//! - Adds a bias of `0x84` before the segment search (negative samples are
//!   negated first)
//! - Segment ends at `0xFF, 0x1FF, ... 0x7FFF`
//! - Final code is inverted with `0xFF` (non-negative) or `0x7F` (negative)
//!
//! ### A-law Compression
//! - Drops the 3 least significant bits before the segment search
//! - Segment ends at `0x1F, 0x3F, ... 0xFFF`
//! - Final code is inverted with `0xD5` (non-negative) or `0x55` (negative)
//!
//! The expand direction is a pure table lookup; see [`super::tables`].

/// Bias added to μ-law magnitudes before the segment search
const ULAW_BIAS: i32 = 0x84;

/// μ-law segment upper bounds on the biased magnitude
const ULAW_SEG_END: [i32; 8] = [0xFF, 0x1FF, 0x3FF, 0x7FF, 0xFFF, 0x1FFF, 0x3FFF, 0x7FFF];

/// A-law segment upper bounds on the 13-bit magnitude
const ALAW_SEG_END: [i32; 8] = [0x1F, 0x3F, 0x7F, 0xFF, 0x1FF, 0x3FF, 0x7FF, 0xFFF];

/// Smallest segment whose upper bound covers `value`
fn segment_for(value: i32, seg_end: &[i32; 8]) -> Option<usize> {
    seg_end.iter().position(|&end| value <= end)
}

/// μ-law compression according to ITU-T G.711
///
/// Compresses a 16-bit linear PCM sample to an 8-bit μ-law code.
/// Total over the full input range; `i16::MIN` clamps to the maximum
/// magnitude code.
pub fn ulaw_compress(sample: i16) -> u8 {
    // Biased magnitude can exceed i16::MAX, so widen before the search.
    let (biased, mask) = if sample < 0 {
        (ULAW_BIAS - i32::from(sample), 0x7Fu8)
    } else {
        (i32::from(sample) + ULAW_BIAS, 0xFFu8)
    };

    match segment_for(biased, &ULAW_SEG_END) {
        None => 0x7F ^ mask,
        Some(seg) => {
            let mantissa = ((biased >> (seg + 3)) & 0xF) as u8;
            (((seg as u8) << 4) | mantissa) ^ mask
        }
    }
}

/// A-law compression according to ITU-T G.711
///
/// Compresses a 16-bit linear PCM sample to an 8-bit A-law code.
/// Total over the full input range.
pub fn alaw_compress(sample: i16) -> u8 {
    let mut value = i32::from(sample) >> 3;
    let mask = if value >= 0 {
        0xD5u8
    } else {
        value = -value - 1;
        0x55u8
    };

    match segment_for(value, &ALAW_SEG_END) {
        None => 0x7F ^ mask,
        Some(seg) => {
            // Segments 0 and 1 share the same step size, so the mantissa
            // shift is fixed at 1 for both.
            let mantissa = if seg < 2 {
                ((value >> 1) & 0xF) as u8
            } else {
                ((value >> seg) & 0xF) as u8
            };
            (((seg as u8) << 4) | mantissa) ^ mask
        }
    }
}
