//! Adaptive Data Rate decision core — pure domain logic, zero I/O.
//!
//! The network server hands in the device's current radio settings and
//! its recent uplink history; [`decide`] answers with the data rate, TX
//! power index and nbTrans the device should use next.
//!
//! ```text
//!   DecisionRequest ──▶ decide() ──▶ DecisionResult
//!        │                 │
//!        │      ┌──────────┴──────────┐
//!        │      │ nbTrans  (loss %)   │
//!        │      │ margin   (max SNR)  │
//!        └─────▶│ guard    (history)  │
//!               │ stepping (DR / TX)  │
//!               └─────────────────────┘
//! ```

pub mod engine;
pub mod tables;

use serde::{Deserialize, Serialize};

pub use engine::decide;

/// One received uplink, as recorded by the network server.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UplinkObservation {
    /// Device frame counter (gaps mean lost frames).
    pub frame_counter: u32,
    /// Best SNR (dB) seen across all receiving gateways.
    pub max_snr: f32,
    /// TX power index the device used for this uplink.
    pub tx_power_index: i32,
}

/// Everything the algorithm needs to make one decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// ADR bit from the device; when clear, the current settings are kept.
    pub adr_enabled: bool,

    // --- Current device configuration ---
    pub data_rate: i32,
    pub tx_power_index: i32,
    pub nb_trans: i32,

    // --- Regional limits ---
    pub max_data_rate: i32,
    pub max_tx_power_index: i32,

    // --- Link budget ---
    /// Minimum SNR (dB) for reliable reception at `data_rate`.
    pub required_snr_for_data_rate: f32,
    /// Operator-reserved SNR buffer (dB).
    pub installation_margin: f32,

    /// Received uplinks, oldest first.
    pub uplink_history: Vec<UplinkObservation>,
}

/// The configuration the device should switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub data_rate: i32,
    pub tx_power_index: i32,
    pub nb_trans: i32,
}

impl DecisionResult {
    /// The device's current configuration, unchanged.
    pub fn current(req: &DecisionRequest) -> Self {
        Self {
            data_rate: req.data_rate,
            tx_power_index: req.tx_power_index,
            nb_trans: req.nb_trans,
        }
    }
}
