//! Length-prefix frame codec.
//!
//! Wire format:
//! ```text
//! ┌────────────┬──────────────────────────┐
//! │ Length (4B)│ Payload (N B)            │
//! │ LE u32     │ JSON or postcard         │
//! └────────────┴──────────────────────────┘
//! ```
//!
//! The codec accumulates incoming bytes and yields complete frames.
//! A single read may return part of the header, part of the payload,
//! or several frames back to back. An oversize frame is reported once
//! and its announced payload is discarded, so the next header is read
//! from the real frame boundary.

use log::warn;

use crate::error::CodecError;

/// Frame header size (4-byte little-endian length).
pub const HEADER_SIZE: usize = 4;

/// Something pulled off the byte stream by [`FrameDecoder::next_frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A complete payload within the size limit.
    Payload(Vec<u8>),
    /// A header announced `len` bytes, more than the limit. The payload
    /// is being discarded.
    Oversize { len: usize },
}

/// Decoder state machine.
enum DecoderState {
    /// Waiting for header bytes.
    ReadingHeader { collected: usize },
    /// Header received, reading payload.
    ReadingPayload { expected: usize },
    /// Discarding the payload of an oversize frame.
    Skipping { remaining: usize },
}

/// Streaming frame decoder.
pub struct FrameDecoder {
    state: DecoderState,
    header_buf: [u8; HEADER_SIZE],
    payload_buf: Vec<u8>,
    max_frame_size: usize,
    /// Bytes handed to `feed` but not yet consumed.
    pending: Vec<u8>,
}

impl FrameDecoder {
    pub fn new(max_frame_size: usize) -> Self {
        Self {
            state: DecoderState::ReadingHeader { collected: 0 },
            header_buf: [0; HEADER_SIZE],
            payload_buf: Vec::new(),
            max_frame_size,
            pending: Vec::new(),
        }
    }

    /// Queue bytes read from the transport.
    pub fn feed(&mut self, data: &[u8]) {
        self.pending.extend_from_slice(data);
    }

    /// Pop the next complete frame, if one is buffered.
    ///
    /// Zero-length headers are dropped silently. An oversize header
    /// yields [`Frame::Oversize`] and the decoder then skips exactly the
    /// announced number of payload bytes.
    pub fn next_frame(&mut self) -> Option<Frame> {
        let mut offset = 0;
        let mut frame = None;

        while offset < self.pending.len() && frame.is_none() {
            match &mut self.state {
                DecoderState::ReadingHeader { collected } => {
                    let to_copy = (HEADER_SIZE - *collected).min(self.pending.len() - offset);
                    self.header_buf[*collected..*collected + to_copy]
                        .copy_from_slice(&self.pending[offset..offset + to_copy]);
                    *collected += to_copy;
                    offset += to_copy;

                    if *collected == HEADER_SIZE {
                        let expected = u32::from_le_bytes(self.header_buf) as usize;
                        if expected == 0 {
                            warn!("codec: dropping zero-length frame header");
                            self.state = DecoderState::ReadingHeader { collected: 0 };
                            continue;
                        }
                        if expected > self.max_frame_size {
                            warn!(
                                "codec: skipping oversize frame (len={expected}, max={})",
                                self.max_frame_size
                            );
                            self.state = DecoderState::Skipping { remaining: expected };
                            frame = Some(Frame::Oversize { len: expected });
                            continue;
                        }
                        self.payload_buf.clear();
                        self.state = DecoderState::ReadingPayload { expected };
                    }
                }

                DecoderState::ReadingPayload { expected } => {
                    let needed = *expected - self.payload_buf.len();
                    let to_copy = needed.min(self.pending.len() - offset);
                    self.payload_buf
                        .extend_from_slice(&self.pending[offset..offset + to_copy]);
                    offset += to_copy;

                    if self.payload_buf.len() == *expected {
                        self.state = DecoderState::ReadingHeader { collected: 0 };
                        frame = Some(Frame::Payload(core::mem::take(&mut self.payload_buf)));
                    }
                }

                DecoderState::Skipping { remaining } => {
                    let to_skip = (*remaining).min(self.pending.len() - offset);
                    *remaining -= to_skip;
                    offset += to_skip;

                    if *remaining == 0 {
                        self.state = DecoderState::ReadingHeader { collected: 0 };
                    }
                }
            }
        }

        self.pending.drain(..offset);
        frame
    }

    /// Discard all partial state (e.g. after the host reconnects).
    pub fn reset(&mut self) {
        self.state = DecoderState::ReadingHeader { collected: 0 };
        self.payload_buf.clear();
        self.pending.clear();
    }
}

/// Encode a payload into a length-prefixed frame.
pub fn encode_frame(payload: &[u8], max_frame_size: usize) -> Result<Vec<u8>, CodecError> {
    if payload.is_empty() {
        return Err(CodecError::EmptyFrame);
    }
    if payload.len() > max_frame_size || payload.len() > u32::MAX as usize {
        return Err(CodecError::FrameTooLarge);
    }

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}
