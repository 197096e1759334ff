//! Fixed protocol constants for the ADR algorithm.
//!
//! Network servers and devices interoperate on these values, so they are
//! kept as plain data and tested in isolation from the stepping logic.

/// Number of uplinks that make up a full history window.
pub const REQUIRED_HISTORY_COUNT: usize = 20;

/// SNR headroom (dB) represented by one data-rate or TX-power step.
pub const STEP_SIZE_DB: f32 = 3.0;

/// SNR assumed when no uplink has been observed yet.
pub const EMPTY_HISTORY_SNR: f32 = -999.0;

/// Lowest and highest nbTrans the table can recommend.
pub const MIN_NB_TRANS: i32 = 1;
pub const MAX_NB_TRANS: i32 = 3;

/// Upper bounds (exclusive, in percent) of the first three loss bands.
/// Anything at or above the last threshold falls in the final band.
pub const LOSS_BAND_THRESHOLDS: [f32; 3] = [5.0, 10.0, 30.0];

/// Recommended nbTrans, indexed by `[loss band][current nbTrans - 1]`.
pub const NB_TRANS_TABLE: [[i32; 3]; 4] = [
    [1, 1, 2], // < 5 %
    [1, 2, 3], // < 10 %
    [2, 3, 3], // < 30 %
    [3, 3, 3], // >= 30 %
];

/// Map a packet-loss percentage onto a row of [`NB_TRANS_TABLE`].
pub fn loss_band(loss_percent: f32) -> usize {
    LOSS_BAND_THRESHOLDS
        .iter()
        .position(|&limit| loss_percent < limit)
        .unwrap_or(LOSS_BAND_THRESHOLDS.len())
}

/// Table lookup with the current nbTrans clamped into `1..=3`.
pub fn recommended_nb_trans(current_nb_trans: i32, loss_percent: f32) -> i32 {
    let column = current_nb_trans.clamp(MIN_NB_TRANS, MAX_NB_TRANS) - 1;
    NB_TRANS_TABLE[loss_band(loss_percent)][column as usize]
}
