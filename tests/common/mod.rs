//! Shared test support: a deterministic loopback codec standing in for the
//! external G.729 collaborator.

use transcode_core::{CodecProvider, G729Decoder, G729Encoder, PcmFrame, Result, TranscodeError};

/// Provider whose channels are deterministic functions of the frame bytes
pub struct LoopbackProvider {
    pub fail_decoder: bool,
    pub fail_encoder: bool,
}

impl LoopbackProvider {
    pub fn new() -> Self {
        Self {
            fail_decoder: false,
            fail_encoder: false,
        }
    }
}

pub struct LoopbackDecoder;
pub struct LoopbackEncoder;

impl CodecProvider for LoopbackProvider {
    type Decoder = LoopbackDecoder;
    type Encoder = LoopbackEncoder;

    fn open_decoder(&self) -> Result<LoopbackDecoder> {
        if self.fail_decoder {
            return Err(TranscodeError::codec_init_failed("decoder unavailable"));
        }
        Ok(LoopbackDecoder)
    }

    fn open_encoder(&self) -> Result<LoopbackEncoder> {
        if self.fail_encoder {
            return Err(TranscodeError::codec_init_failed("encoder unavailable"));
        }
        Ok(LoopbackEncoder)
    }
}

impl G729Decoder for LoopbackDecoder {
    fn decode_frame(&mut self, bitstream: &[u8; 10], pcm: &mut PcmFrame) {
        // Each bitstream byte drives 8 consecutive samples; a zero frame
        // decodes to silence.
        for (index, slot) in pcm.iter_mut().enumerate() {
            *slot = i16::from(bitstream[index / 8]) * 101;
        }
    }
}

impl G729Encoder for LoopbackEncoder {
    fn encode_frame(&mut self, pcm: &PcmFrame, output: &mut Vec<u8>) {
        // Voice-activity stand-in: a silent frame is untransmitted.
        if pcm.iter().all(|&s| s == 0) {
            return;
        }
        for chunk in pcm.chunks_exact(8) {
            output.push((chunk[0] as u16 >> 8) as u8);
        }
    }
}
