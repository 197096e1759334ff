//! Fuzz target: `adr::decide`
//!
//! Builds a request from raw bytes, including out-of-range settings and
//! non-monotonic frame counters, and checks the decision never panics
//! and always respects the data-rate ceiling and nbTrans range.
//!
//! cargo fuzz run fuzz_decide

#![no_main]

use alitecs_adr::adr::{DecisionRequest, UplinkObservation, decide};
use libfuzzer_sys::fuzz_target;

fn i32_at(data: &[u8], at: usize) -> i32 {
    data.get(at).map_or(0, |&b| i32::from(b as i8))
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }

    let history = data[8..]
        .chunks_exact(4)
        .map(|c| UplinkObservation {
            frame_counter: (u32::from(c[0]) << 8) | u32::from(c[1]),
            max_snr: f32::from(c[2] as i8) / 2.0,
            tx_power_index: i32::from(c[3] % 16),
        })
        .collect();

    let req = DecisionRequest {
        adr_enabled: data[0] & 1 == 1,
        data_rate: i32_at(data, 1),
        tx_power_index: i32_at(data, 2),
        nb_trans: i32_at(data, 3),
        max_data_rate: i32_at(data, 4),
        max_tx_power_index: i32_at(data, 5),
        required_snr_for_data_rate: f32::from(data[6] as i8) / 4.0,
        installation_margin: f32::from(data[7]) / 8.0,
        uplink_history: history,
    };

    let result = decide(&req);
    if req.adr_enabled {
        assert!(result.data_rate <= req.max_data_rate);
        assert!((1..=3).contains(&result.nb_trans));
    }
});
