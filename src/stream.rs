//! Raw frame-stream transcoding
//!
//! Runs an already-assembled run of codec frames through the external
//! collaborator without any RTP framing: a bitstream of N 10-byte frames
//! decodes to N PCM frames, and a PCM buffer of N 80-sample frames encodes
//! to N bitstream frames of collaborator-determined length. One channel
//! context serves the whole call, so the codec's predictive history carries
//! across the frames of a stream as it does on a live call leg.

use bytes::Bytes;

use crate::codec::{CodecProvider, G729Decoder, G729Encoder};
use crate::error::{Result, TranscodeError};
use crate::types::{G729_FRAME_BYTES, PCM_FRAME_SAMPLES, PcmFrame};

/// Decode a G.729 bitstream into linear-PCM frames
///
/// Empty input is a legitimate zero-frame stream and decodes to an empty
/// vector without touching the codec.
///
/// # Errors
///
/// - [`TranscodeError::NotFrameAligned`] when the input is not a whole
///   number of 10-byte frames
/// - [`TranscodeError::CodecInitFailed`] when the collaborator cannot open
///   a decoder channel
pub fn decode_bitstream<P: CodecProvider>(provider: &P, bitstream: &[u8]) -> Result<Vec<PcmFrame>> {
    if bitstream.len() % G729_FRAME_BYTES != 0 {
        return Err(TranscodeError::NotFrameAligned {
            frame_size: G729_FRAME_BYTES,
            actual: bitstream.len(),
        });
    }
    if bitstream.is_empty() {
        return Ok(Vec::new());
    }

    let frame_count = bitstream.len() / G729_FRAME_BYTES;
    tracing::debug!(frame_count, "decoding G.729 bitstream");

    let mut decoder = provider.open_decoder()?;
    let mut frames = Vec::with_capacity(frame_count);
    let mut frame_in = [0u8; G729_FRAME_BYTES];
    for chunk in bitstream.chunks_exact(G729_FRAME_BYTES) {
        frame_in.copy_from_slice(chunk);
        let mut pcm: PcmFrame = [0; PCM_FRAME_SAMPLES];
        decoder.decode_frame(&frame_in, &mut pcm);
        frames.push(pcm);
    }
    Ok(frames)
}

/// Encode linear-PCM samples into G.729 bitstream frames
///
/// Every frame keeps its own collaborator-determined length; a zero-length
/// frame records an untransmitted frame, not an error. Empty input encodes
/// to an empty vector without touching the codec.
///
/// # Errors
///
/// - [`TranscodeError::NotFrameAligned`] when the input is not a whole
///   number of 80-sample frames
/// - [`TranscodeError::CodecInitFailed`] when the collaborator cannot open
///   an encoder channel
pub fn encode_pcm_stream<P: CodecProvider>(provider: &P, samples: &[i16]) -> Result<Vec<Bytes>> {
    if samples.len() % PCM_FRAME_SAMPLES != 0 {
        return Err(TranscodeError::NotFrameAligned {
            frame_size: PCM_FRAME_SAMPLES,
            actual: samples.len(),
        });
    }
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let frame_count = samples.len() / PCM_FRAME_SAMPLES;
    tracing::debug!(frame_count, "encoding PCM stream to G.729");

    let mut encoder = provider.open_encoder()?;
    let mut frames = Vec::with_capacity(frame_count);
    let mut pcm: PcmFrame = [0; PCM_FRAME_SAMPLES];
    let mut frame_out = Vec::with_capacity(G729_FRAME_BYTES);
    for chunk in samples.chunks_exact(PCM_FRAME_SAMPLES) {
        pcm.copy_from_slice(chunk);
        frame_out.clear();
        encoder.encode_frame(&pcm, &mut frame_out);
        frames.push(Bytes::copy_from_slice(&frame_out));
    }
    Ok(frames)
}
