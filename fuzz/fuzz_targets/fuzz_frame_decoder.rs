//! Fuzz target: `FrameDecoder` + `PluginServer::dispatch`
//!
//! Drives arbitrary byte sequences through the streaming frame decoder
//! and hands every frame it yields to the plugin server. Neither may
//! panic, every payload must respect the frame limit, and only frames
//! over the limit are reported as oversize.
//!
//! cargo fuzz run fuzz_frame_decoder

#![no_main]

use alitecs_adr::config::PluginConfig;
use alitecs_adr::handler::AlitecsHandler;
use alitecs_adr::plugin::codec::{Frame, FrameDecoder};
use alitecs_adr::plugin::server::PluginServer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let config = PluginConfig::default();
    let mut server = PluginServer::new(AlitecsHandler::new(&config), &config);
    let mut decoder = FrameDecoder::new(config.max_frame_size);

    decoder.feed(data);
    while let Some(frame) = decoder.next_frame() {
        match frame {
            Frame::Payload(payload) => {
                assert!(!payload.is_empty(), "decoder must not yield empty payload");
                assert!(payload.len() <= config.max_frame_size, "payload exceeds max_frame_size");
                let _ = server.dispatch(&payload);
            }
            Frame::Oversize { len } => {
                assert!(len > config.max_frame_size, "in-limit frame reported as oversize");
                let _ = server.reject_oversize(len);
            }
        }
    }

    // After a reset the decoder must accept bytes cleanly again.
    decoder.reset();
    decoder.feed(data);
    let _ = decoder.next_frame();
});
