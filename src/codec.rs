//! External G.729 codec collaborator boundary
//!
//! The G.729 encoder/decoder itself lives outside this crate. It is modeled
//! as a provider that opens per-direction channel contexts: a decoder channel
//! carries the synthesis history (linear predictive state, adaptive gain) of
//! one stream, an encoder channel the analysis history. This crate never
//! interprets frame contents; it slices fixed-size frames, hands them to a
//! channel, and concatenates the results.
//!
//! Channel contexts map onto plain ownership: opening returns an owned value,
//! dropping it releases the context. Release therefore happens exactly once
//! on every exit path, including mid-loop failures, and can never be observed
//! twice. A single channel value must not be used from two threads at once;
//! opening independent channels from independent threads is allowed when the
//! provider supports it.

use crate::error::Result;
use crate::types::{G729_FRAME_BYTES, PcmFrame};

/// Factory for per-call codec channel contexts
///
/// Implementations wrap the external codec library. Opening a channel is the
/// only fallible codec interaction; per-frame conversion never fails once a
/// channel exists.
pub trait CodecProvider {
    /// Decoder channel type produced by this provider
    type Decoder: G729Decoder;
    /// Encoder channel type produced by this provider
    type Encoder: G729Encoder;

    /// Open a decoder channel with fresh synthesis state
    ///
    /// # Errors
    ///
    /// Returns [`crate::TranscodeError::CodecInitFailed`] when the external
    /// codec cannot allocate or initialize the channel. The failure is fatal
    /// for the calling operation only.
    fn open_decoder(&self) -> Result<Self::Decoder>;

    /// Open an encoder channel with fresh analysis state
    ///
    /// # Errors
    ///
    /// Returns [`crate::TranscodeError::CodecInitFailed`] when the external
    /// codec cannot allocate or initialize the channel.
    fn open_encoder(&self) -> Result<Self::Encoder>;
}

/// One G.729 decoder channel: bitstream frames in, PCM frames out
pub trait G729Decoder {
    /// Decode one 10-byte bitstream frame into one 80-sample PCM frame
    ///
    /// Mutates the channel's synthesis history; successive frames of one
    /// stream must go through the same channel in order.
    fn decode_frame(&mut self, bitstream: &[u8; G729_FRAME_BYTES], pcm: &mut PcmFrame);
}

/// One G.729 encoder channel: PCM frames in, bitstream frames out
pub trait G729Encoder {
    /// Encode one 80-sample PCM frame, appending the bitstream to `output`
    ///
    /// The appended length is collaborator-determined: 10 bytes for a voice
    /// frame, fewer for comfort-noise frames, and zero for an untransmitted
    /// frame under voice-activity suppression.
    fn encode_frame(&mut self, pcm: &PcmFrame, output: &mut Vec<u8>);
}

impl<P: CodecProvider> CodecProvider for &P {
    type Decoder = P::Decoder;
    type Encoder = P::Encoder;

    fn open_decoder(&self) -> Result<Self::Decoder> {
        (**self).open_decoder()
    }

    fn open_encoder(&self) -> Result<Self::Encoder> {
        (**self).open_encoder()
    }
}

/// Deterministic stand-in for the external codec, shared by unit tests
#[cfg(test)]
pub(crate) mod stub {
    use super::{CodecProvider, G729Decoder, G729Encoder};
    use crate::error::{Result, TranscodeError};
    use crate::types::{G729_FRAME_BYTES, PcmFrame};

    pub(crate) struct StubProvider {
        pub fail_open: bool,
    }

    pub(crate) struct StubDecoder;
    pub(crate) struct StubEncoder;

    impl CodecProvider for StubProvider {
        type Decoder = StubDecoder;
        type Encoder = StubEncoder;

        fn open_decoder(&self) -> Result<StubDecoder> {
            if self.fail_open {
                return Err(TranscodeError::codec_init_failed("stub decoder refused"));
            }
            Ok(StubDecoder)
        }

        fn open_encoder(&self) -> Result<StubEncoder> {
            if self.fail_open {
                return Err(TranscodeError::codec_init_failed("stub encoder refused"));
            }
            Ok(StubEncoder)
        }
    }

    impl G729Decoder for StubDecoder {
        fn decode_frame(&mut self, bitstream: &[u8; G729_FRAME_BYTES], pcm: &mut PcmFrame) {
            // Spread each bitstream byte over 8 samples; silence stays silent.
            for (index, slot) in pcm.iter_mut().enumerate() {
                *slot = i16::from(bitstream[index / 8]) * 101;
            }
        }
    }

    impl G729Encoder for StubEncoder {
        fn encode_frame(&mut self, pcm: &PcmFrame, output: &mut Vec<u8>) {
            // Voice-activity stand-in: an all-silent frame is untransmitted.
            if pcm.iter().all(|&s| s == 0) {
                return;
            }
            for chunk in pcm.chunks_exact(8) {
                output.push((chunk[0] as u16 >> 8) as u8);
            }
        }
    }
}
