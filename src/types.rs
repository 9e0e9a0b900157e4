//! Core types and constants for the transcoding library
//!
//! The numeric constants here are bit-exact external contracts: RTP payload
//! type numbers from the RFC 3551 static assignment table and the fixed frame
//! geometry of narrowband telephony codecs (8 kHz, 10 ms frames).

use std::fmt;

/// RTP payload type registered for G.729 (RFC 3551)
pub const G729_PAYLOAD_TYPE: u8 = 18;

/// RTP payload type registered for G.711 μ-law (PCMU, RFC 3551)
pub const PCMU_PAYLOAD_TYPE: u8 = 0;

/// RTP payload type registered for G.711 A-law (PCMA, RFC 3551)
pub const PCMA_PAYLOAD_TYPE: u8 = 8;

/// Size of one G.729 bitstream frame in bytes (10 ms of audio)
pub const G729_FRAME_BYTES: usize = 10;

/// Samples in one linear-PCM codec frame (10 ms at 8 kHz)
pub const PCM_FRAME_SAMPLES: usize = 80;

/// Size of one linear-PCM codec frame in bytes
pub const PCM_FRAME_BYTES: usize = PCM_FRAME_SAMPLES * 2;

/// Size of one companded (A-law or μ-law) frame in bytes
pub const COMPANDED_FRAME_BYTES: usize = PCM_FRAME_SAMPLES;

/// Fixed RTP header length in bytes
pub const RTP_HEADER_BYTES: usize = 12;

/// Conventional frames per packet (20 ms packetization)
pub const DEFAULT_FRAME_COUNT: usize = 2;

/// One linear-PCM frame exchanged with the external codec
pub type PcmFrame = [i16; PCM_FRAME_SAMPLES];

/// G.711 companding law
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompandingLaw {
    /// A-law (PCMA), the European variant
    ALaw,
    /// μ-law (PCMU), the North American / Japanese variant
    MuLaw,
}

impl CompandingLaw {
    /// RTP payload type registered for this law
    pub fn payload_type(self) -> u8 {
        match self {
            Self::ALaw => PCMA_PAYLOAD_TYPE,
            Self::MuLaw => PCMU_PAYLOAD_TYPE,
        }
    }

    /// Conventional codec name for this law
    pub fn name(self) -> &'static str {
        match self {
            Self::ALaw => "PCMA",
            Self::MuLaw => "PCMU",
        }
    }
}

impl fmt::Display for CompandingLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Direction of an RTP payload rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscodeDirection {
    /// Decode direction: G.729 bitstream payload to companded G.711 payload
    G729ToG711 {
        /// Companding law of the destination payload
        law: CompandingLaw,
    },
    /// Encode direction: companded G.711 payload to G.729 bitstream payload
    G711ToG729 {
        /// Companding law of the source payload
        law: CompandingLaw,
    },
}

impl TranscodeDirection {
    /// Bytes consumed from the input payload per frame
    pub fn frame_input_size(self) -> usize {
        match self {
            Self::G729ToG711 { .. } => G729_FRAME_BYTES,
            Self::G711ToG729 { .. } => COMPANDED_FRAME_BYTES,
        }
    }

    /// Payload type written into the rewritten header
    pub fn destination_payload_type(self) -> u8 {
        match self {
            Self::G729ToG711 { law } => law.payload_type(),
            Self::G711ToG729 { .. } => G729_PAYLOAD_TYPE,
        }
    }
}

/// Options controlling an RTP payload rewrite
///
/// `frame_count` defaults to [`DEFAULT_FRAME_COUNT`]; packets carrying a
/// different packetization override it with [`RewriteOptions::with_frame_count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Direction of the payload conversion
    pub direction: TranscodeDirection,
    /// Number of codec frames carried by the packet
    pub frame_count: usize,
}

impl RewriteOptions {
    /// Options for the given direction with the conventional 20 ms packetization
    pub fn new(direction: TranscodeDirection) -> Self {
        Self {
            direction,
            frame_count: DEFAULT_FRAME_COUNT,
        }
    }

    /// Override the number of frames per packet
    pub fn with_frame_count(mut self, frame_count: usize) -> Self {
        self.frame_count = frame_count;
        self
    }
}
