//! RTP payload rewriting
//!
//! Takes a captured RTP packet whose payload is a run of fixed-size codec
//! frames, transcodes every frame through the external codec collaborator
//! and the companding codec, and reassembles the packet. The 12-byte header
//! is copied verbatim except for the payload-type field; the marker bit is
//! preserved untouched.
//!
//! The rewriter is stateless across calls: it opens one codec channel after
//! validation, runs the per-frame loop, and releases the channel on every
//! exit path by dropping it.

use bytes::{BufMut, Bytes, BytesMut};

use crate::codec::{CodecProvider, G729Decoder, G729Encoder};
use crate::companding::{compress_sample, expand_code};
use crate::error::{Result, TranscodeError};
use crate::types::{
    COMPANDED_FRAME_BYTES, G729_FRAME_BYTES, G729_PAYLOAD_TYPE, PCM_FRAME_SAMPLES, PcmFrame,
    RTP_HEADER_BYTES, RewriteOptions, TranscodeDirection,
};

/// Parsed view of a 12-byte RTP header
///
/// Used for validation and inspection; the rewriter itself patches header
/// bytes in place rather than re-serializing a parsed header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpHeader {
    /// Protocol version (top 2 bits of byte 0; always 2 on the wire)
    pub version: u8,
    /// Padding flag
    pub padding: bool,
    /// Extension flag
    pub extension: bool,
    /// Marker bit (top bit of byte 1)
    pub marker: bool,
    /// Payload type (low 7 bits of byte 1)
    pub payload_type: u8,
    /// Sequence number
    pub sequence_number: u16,
    /// Media timestamp
    pub timestamp: u32,
    /// Synchronization source identifier
    pub ssrc: u32,
}

impl RtpHeader {
    /// Parse the fixed header from the front of a packet
    ///
    /// # Errors
    ///
    /// Returns [`TranscodeError::TooShort`] when fewer than 12 bytes are
    /// available.
    pub fn parse(packet: &[u8]) -> Result<Self> {
        if packet.len() < RTP_HEADER_BYTES {
            return Err(TranscodeError::too_short(RTP_HEADER_BYTES, packet.len()));
        }

        Ok(Self {
            version: (packet[0] >> 6) & 0x03,
            padding: (packet[0] & 0x20) != 0,
            extension: (packet[0] & 0x10) != 0,
            marker: (packet[1] & 0x80) != 0,
            payload_type: packet[1] & 0x7F,
            sequence_number: u16::from_be_bytes([packet[2], packet[3]]),
            timestamp: u32::from_be_bytes([packet[4], packet[5], packet[6], packet[7]]),
            ssrc: u32::from_be_bytes([packet[8], packet[9], packet[10], packet[11]]),
        })
    }
}

/// Rewrite the payload of a captured RTP packet
///
/// Validates the packet, opens one codec channel, transcodes
/// `options.frame_count` fixed-size frames, and returns a new packet whose
/// header matches the input except for the payload-type field. Input payload
/// bytes beyond the requested frames are ignored.
///
/// Output size is `12 + frame_count * 80` bytes in the decode direction; in
/// the encode direction each frame contributes its collaborator-determined
/// bitstream length, so an untransmitted frame adds no bytes.
///
/// # Errors
///
/// - [`TranscodeError::InvalidFrameCount`] when `options.frame_count` is zero
/// - [`TranscodeError::TooShort`] when the packet cannot hold the requested
///   frames
/// - [`TranscodeError::InvalidVersion`] when the header version is not 2
/// - [`TranscodeError::PayloadTypeMismatch`] when a G.729 payload is being
///   consumed but the packet is not marked payload type 18
/// - [`TranscodeError::CodecInitFailed`] when the collaborator cannot open a
///   channel; the whole operation aborts, no frames are processed
pub fn rewrite_rtp_payload<P: CodecProvider>(
    provider: &P,
    packet: &[u8],
    options: RewriteOptions,
) -> Result<Bytes> {
    let frame_count = options.frame_count;
    if frame_count == 0 {
        return Err(TranscodeError::InvalidFrameCount { count: frame_count });
    }

    let needed = RTP_HEADER_BYTES + frame_count * options.direction.frame_input_size();
    if packet.len() < needed {
        return Err(TranscodeError::too_short(needed, packet.len()));
    }

    let header = RtpHeader::parse(packet)?;
    if header.version != 2 {
        return Err(TranscodeError::InvalidVersion {
            version: header.version,
        });
    }
    if matches!(options.direction, TranscodeDirection::G729ToG711 { .. })
        && header.payload_type != G729_PAYLOAD_TYPE
    {
        return Err(TranscodeError::PayloadTypeMismatch {
            expected: G729_PAYLOAD_TYPE,
            actual: header.payload_type,
        });
    }

    tracing::debug!(
        frame_count,
        payload_type = header.payload_type,
        sequence_number = header.sequence_number,
        direction = ?options.direction,
        "rewriting RTP payload"
    );

    let payload = &packet[RTP_HEADER_BYTES..];
    let mut output = match options.direction {
        TranscodeDirection::G729ToG711 { .. } => {
            BytesMut::with_capacity(RTP_HEADER_BYTES + frame_count * COMPANDED_FRAME_BYTES)
        }
        TranscodeDirection::G711ToG729 { .. } => {
            BytesMut::with_capacity(RTP_HEADER_BYTES + frame_count * G729_FRAME_BYTES)
        }
    };
    output.put_slice(&packet[..RTP_HEADER_BYTES]);

    match options.direction {
        TranscodeDirection::G729ToG711 { law } => {
            let mut decoder = provider.open_decoder()?;
            let mut bitstream = [0u8; G729_FRAME_BYTES];
            let mut pcm: PcmFrame = [0; PCM_FRAME_SAMPLES];
            for frame in 0..frame_count {
                let start = frame * G729_FRAME_BYTES;
                bitstream.copy_from_slice(&payload[start..start + G729_FRAME_BYTES]);
                decoder.decode_frame(&bitstream, &mut pcm);
                for &sample in &pcm {
                    output.put_u8(compress_sample(sample, law));
                }
            }
        }
        TranscodeDirection::G711ToG729 { law } => {
            let mut encoder = provider.open_encoder()?;
            let mut pcm: PcmFrame = [0; PCM_FRAME_SAMPLES];
            let mut frame_bytes = Vec::with_capacity(G729_FRAME_BYTES);
            for frame in 0..frame_count {
                let start = frame * COMPANDED_FRAME_BYTES;
                let codes = &payload[start..start + COMPANDED_FRAME_BYTES];
                for (slot, &code) in pcm.iter_mut().zip(codes) {
                    *slot = expand_code(code, law);
                }
                frame_bytes.clear();
                encoder.encode_frame(&pcm, &mut frame_bytes);
                output.put_slice(&frame_bytes);
            }
        }
    }

    // Payload type replaced, marker bit carried over from the input.
    let destination = options.direction.destination_payload_type();
    output[1] = (output[1] & 0x80) | (destination & 0x7F);

    Ok(output.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::stub::StubProvider;
    use crate::types::CompandingLaw;

    fn packet(payload_type: u8, marker: bool, payload: &[u8]) -> Vec<u8> {
        let mut data = vec![
            0x80,
            (if marker { 0x80 } else { 0 }) | payload_type,
            0x12,
            0x34,
            0x00,
            0x00,
            0x03,
            0xE8,
            0xDE,
            0xAD,
            0xBE,
            0xEF,
        ];
        data.extend_from_slice(payload);
        data
    }

    fn decode_options() -> RewriteOptions {
        RewriteOptions::new(TranscodeDirection::G729ToG711 {
            law: CompandingLaw::MuLaw,
        })
    }

    #[test]
    fn test_header_parse_round_trip_fields() {
        let data = packet(18, true, &[0u8; 20]);
        let header = RtpHeader::parse(&data).unwrap();
        assert_eq!(header.version, 2);
        assert!(header.marker);
        assert_eq!(header.payload_type, 18);
        assert_eq!(header.sequence_number, 0x1234);
        assert_eq!(header.timestamp, 0x03E8);
        assert_eq!(header.ssrc, 0xDEAD_BEEF);
    }

    #[test]
    fn test_header_parse_too_short() {
        assert_eq!(
            RtpHeader::parse(&[0x80, 0x00]),
            Err(TranscodeError::TooShort { needed: 12, actual: 2 })
        );
    }

    #[test]
    fn test_silence_decode_direction() {
        let provider = StubProvider { fail_open: false };
        let input = packet(18, false, &[0u8; 20]);
        let output = rewrite_rtp_payload(&provider, &input, decode_options()).unwrap();

        assert_eq!(output.len(), 12 + 160);
        // Payload type rewritten to PCMU, marker still clear.
        assert_eq!(output[1], 0x00);
        // Silent PCM compands to the μ-law zero code.
        assert!(output[12..].iter().all(|&b| b == 0xFF));
        // Rest of the header untouched.
        assert_eq!(&output[..1], &input[..1]);
        assert_eq!(&output[2..12], &input[2..12]);
    }

    #[test]
    fn test_marker_bit_preserved() {
        let provider = StubProvider { fail_open: false };
        let input = packet(18, true, &[0u8; 20]);
        let output = rewrite_rtp_payload(&provider, &input, decode_options()).unwrap();
        assert_eq!(output[1], 0x80); // marker set, payload type 0
    }

    #[test]
    fn test_invalid_version_rejected() {
        let provider = StubProvider { fail_open: false };
        let mut input = packet(18, false, &[0u8; 20]);
        input[0] = 0x40; // version 1
        let err = rewrite_rtp_payload(&provider, &input, decode_options()).unwrap_err();
        assert_eq!(err, TranscodeError::InvalidVersion { version: 1 });
    }

    #[test]
    fn test_payload_type_mismatch_names_both_types() {
        let provider = StubProvider { fail_open: false };
        let input = packet(0, false, &[0u8; 20]);
        let err = rewrite_rtp_payload(&provider, &input, decode_options()).unwrap_err();
        assert_eq!(
            err,
            TranscodeError::PayloadTypeMismatch { expected: 18, actual: 0 }
        );
    }

    #[test]
    fn test_short_packet_rejected_before_codec_open() {
        // A failing provider proves validation happens first.
        let provider = StubProvider { fail_open: true };
        let input = packet(18, false, &[0u8; 10]);
        let err = rewrite_rtp_payload(&provider, &input, decode_options()).unwrap_err();
        assert_eq!(err, TranscodeError::TooShort { needed: 32, actual: 22 });
    }

    #[test]
    fn test_zero_frame_count_rejected() {
        let provider = StubProvider { fail_open: false };
        let input = packet(18, false, &[0u8; 20]);
        let err =
            rewrite_rtp_payload(&provider, &input, decode_options().with_frame_count(0))
                .unwrap_err();
        assert_eq!(err, TranscodeError::InvalidFrameCount { count: 0 });
    }

    #[test]
    fn test_codec_open_failure_aborts() {
        let provider = StubProvider { fail_open: true };
        let input = packet(18, false, &[0u8; 20]);
        let err = rewrite_rtp_payload(&provider, &input, decode_options()).unwrap_err();
        assert!(matches!(err, TranscodeError::CodecInitFailed { .. }));
    }

    #[test]
    fn test_encode_direction_drops_untransmitted_frames() {
        let provider = StubProvider { fail_open: false };
        // First frame silent (μ-law zero codes), second frame loud.
        let mut payload = vec![0xFFu8; 80];
        payload.extend_from_slice(&[0x40u8; 80]);
        let input = packet(0, false, &payload);
        let options = RewriteOptions::new(TranscodeDirection::G711ToG729 {
            law: CompandingLaw::MuLaw,
        });

        let output = rewrite_rtp_payload(&provider, &input, options).unwrap();
        // Silent frame contributes nothing; loud frame contributes 10 bytes.
        assert_eq!(output.len(), 12 + 10);
        assert_eq!(output[1], 18);
    }

    #[test]
    fn test_extra_payload_bytes_ignored() {
        let provider = StubProvider { fail_open: false };
        let mut payload = vec![0u8; 20];
        payload.extend_from_slice(&[0xAB; 7]); // trailing junk
        let input = packet(18, false, &payload);
        let output = rewrite_rtp_payload(&provider, &input, decode_options()).unwrap();
        assert_eq!(output.len(), 12 + 160);
    }
}
