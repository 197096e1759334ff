//! Plugin server — dispatches framed requests to an [`AdrHandler`].
//!
//! **Transport-decoupled**: [`PluginServer::dispatch`] turns one request
//! payload into one response payload; [`PluginServer::serve`] drives any
//! blocking `Read`/`Write` pair (stdin/stdout for the plugin binary, an
//! in-memory pipe in tests) until the host closes its end.

use std::io::{self, Read, Write};

use log::{info, warn};

use crate::config::{PluginConfig, WireFormat};
use crate::error::CodecError;
use crate::handler::AdrHandler;

use super::codec::{Frame, FrameDecoder, encode_frame};
use super::protocol::{PluginRequest, PluginResponse, decode_request, encode_response};

const READ_BUF_SIZE: usize = 1024;

/// Counters reported when the host disconnects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub frames_in: u64,
    pub decisions: u64,
    pub errors: u64,
}

pub struct PluginServer<H> {
    handler: H,
    format: WireFormat,
    max_frame_size: usize,
    stats: ServeStats,
}

impl<H: AdrHandler> PluginServer<H> {
    pub fn new(handler: H, config: &PluginConfig) -> Self {
        Self {
            handler,
            format: config.wire_format,
            max_frame_size: config.max_frame_size,
            stats: ServeStats::default(),
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn stats(&self) -> ServeStats {
        self.stats
    }

    /// Answer a single decoded request.
    pub fn respond(&mut self, req: &PluginRequest) -> PluginResponse {
        match req {
            PluginRequest::Id => PluginResponse::Id(self.handler.id().to_owned()),
            PluginRequest::Name => PluginResponse::Name(self.handler.name().to_owned()),
            PluginRequest::Handle(decision) => match self.handler.handle(decision) {
                Ok(result) => {
                    self.stats.decisions += 1;
                    PluginResponse::Handle(result)
                }
                Err(e) => {
                    self.stats.errors += 1;
                    warn!("handler {} failed: {e}", self.handler.id());
                    PluginResponse::Error(e.to_string())
                }
            },
        }
    }

    /// Decode a request payload and return the encoded response payload.
    pub fn dispatch(&mut self, payload: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.stats.frames_in += 1;

        let resp = match decode_request(payload, self.format) {
            Ok(req) => self.respond(&req),
            Err(e) => {
                self.stats.errors += 1;
                warn!("rejecting frame ({} bytes): {e}", payload.len());
                PluginResponse::Error(e.to_string())
            }
        };

        encode_response(&resp, self.format)
    }

    /// Answer a frame the decoder skipped for exceeding the size limit.
    pub fn reject_oversize(&mut self, len: usize) -> Result<Vec<u8>, CodecError> {
        self.stats.frames_in += 1;
        self.stats.errors += 1;
        warn!("rejecting oversize frame ({len} bytes, max {})", self.max_frame_size);
        encode_response(
            &PluginResponse::Error(CodecError::FrameTooLarge.to_string()),
            self.format,
        )
    }

    /// Frame a reply payload. A reply that cannot be framed is replaced
    /// by a framed `Error` so the host still gets one answer per request.
    fn frame_reply(&mut self, reply: Result<Vec<u8>, CodecError>) -> Result<Vec<u8>, CodecError> {
        let max_frame_size = self.max_frame_size;
        reply
            .and_then(|payload| encode_frame(&payload, max_frame_size))
            .or_else(|e| {
                self.stats.errors += 1;
                warn!("replacing unframeable response: {e}");
                encode_response(&PluginResponse::Error(e.to_string()), self.format)
                    .and_then(|payload| encode_frame(&payload, max_frame_size))
            })
    }

    /// Serve framed requests from `reader`, writing one framed response
    /// per request to `writer`. Returns when `reader` hits EOF.
    pub fn serve<R: Read, W: Write>(&mut self, mut reader: R, mut writer: W) -> io::Result<ServeStats> {
        info!(
            "serving {} ({}) format={:?} max_frame={}",
            self.handler.id(),
            self.handler.name(),
            self.format,
            self.max_frame_size
        );

        let mut decoder = FrameDecoder::new(self.max_frame_size);
        let mut buf = [0u8; READ_BUF_SIZE];

        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            decoder.feed(&buf[..n]);

            while let Some(frame) = decoder.next_frame() {
                let reply = match frame {
                    Frame::Payload(payload) => self.dispatch(&payload),
                    Frame::Oversize { len } => self.reject_oversize(len),
                };
                match self.frame_reply(reply) {
                    Ok(out) => {
                        writer.write_all(&out)?;
                        writer.flush()?;
                    }
                    Err(e) => warn!("dropping response: {e}"),
                }
            }
        }

        info!(
            "host closed: frames={} decisions={} errors={}",
            self.stats.frames_in, self.stats.decisions, self.stats.errors
        );
        Ok(self.stats)
    }
}
