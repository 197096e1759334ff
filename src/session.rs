//! Device session helper for hosts.
//!
//! Keeps what a network server tracks per device between ADR decisions:
//! the current radio configuration and a bounded window of recent
//! uplinks. No persistence and no I/O happen here; storing sessions is
//! the host's job.

use heapless::Deque;

use crate::adr::tables::REQUIRED_HISTORY_COUNT;
use crate::adr::{DecisionRequest, DecisionResult, UplinkObservation};

/// Fixed-capacity ring of the most recent uplinks, oldest first.
#[derive(Debug, Clone, Default)]
pub struct UplinkHistory {
    ring: Deque<UplinkObservation, REQUIRED_HISTORY_COUNT>,
}

impl UplinkHistory {
    pub fn new() -> Self {
        Self { ring: Deque::new() }
    }

    /// Append an uplink, evicting the oldest one when full.
    pub fn push(&mut self, obs: UplinkObservation) {
        if self.ring.is_full() {
            self.ring.pop_front();
        }
        // Cannot fail: a slot was freed above.
        let _ = self.ring.push_back(obs);
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UplinkObservation> {
        self.ring.iter()
    }

    /// Drop every entry (e.g. after a device re-joins).
    pub fn clear(&mut self) {
        self.ring.clear();
    }

    pub fn to_vec(&self) -> Vec<UplinkObservation> {
        self.ring.iter().copied().collect()
    }
}

/// Region-plan values the host looks up for a device's current data rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionLimits {
    pub max_data_rate: i32,
    pub max_tx_power_index: i32,
    pub required_snr_for_data_rate: f32,
    pub installation_margin: f32,
}

/// Per-device state a host keeps between decisions.
#[derive(Debug, Clone)]
pub struct DeviceSession {
    pub adr_enabled: bool,
    pub data_rate: i32,
    pub tx_power_index: i32,
    pub nb_trans: i32,
    history: UplinkHistory,
}

impl DeviceSession {
    /// A freshly joined device: DR0, full power, single transmission.
    pub fn new(adr_enabled: bool) -> Self {
        Self {
            adr_enabled,
            data_rate: 0,
            tx_power_index: 0,
            nb_trans: 1,
            history: UplinkHistory::new(),
        }
    }

    /// Record a received uplink sent at the current TX power index.
    pub fn record_uplink(&mut self, frame_counter: u32, max_snr: f32) {
        self.history.push(UplinkObservation {
            frame_counter,
            max_snr,
            tx_power_index: self.tx_power_index,
        });
    }

    pub fn history(&self) -> &UplinkHistory {
        &self.history
    }

    /// Build the decision input for this device.
    pub fn request(&self, limits: &RegionLimits) -> DecisionRequest {
        DecisionRequest {
            adr_enabled: self.adr_enabled,
            data_rate: self.data_rate,
            tx_power_index: self.tx_power_index,
            nb_trans: self.nb_trans,
            max_data_rate: limits.max_data_rate,
            max_tx_power_index: limits.max_tx_power_index,
            required_snr_for_data_rate: limits.required_snr_for_data_rate,
            installation_margin: limits.installation_margin,
            uplink_history: self.history.to_vec(),
        }
    }

    /// Store the configuration the device was told to use.
    ///
    /// Returns `true` when anything changed.
    pub fn apply(&mut self, result: &DecisionResult) -> bool {
        let changed = self.data_rate != result.data_rate
            || self.tx_power_index != result.tx_power_index
            || self.nb_trans != result.nb_trans;
        self.data_rate = result.data_rate;
        self.tx_power_index = result.tx_power_index;
        self.nb_trans = result.nb_trans;
        changed
    }
}
