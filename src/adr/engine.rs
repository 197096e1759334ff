//! ADR decision engine.
//!
//! Stateless: every call works only from its [`DecisionRequest`], so it
//! can run concurrently for any number of devices.
//!
//! ## Decision pipeline
//!
//! 1. ADR disabled → echo the current configuration.
//! 2. Clamp the data rate down to the regional maximum.
//! 3. Pick nbTrans from the packet-loss table.
//! 4. Convert the best SNR margin into whole 3 dB steps.
//! 5. Negative steps wait for a full history window at the current TX
//!    power, so a single weak uplink cannot bounce the power up and down.
//! 6. Spend the steps on data rate / TX power, one per iteration.

use log::debug;

use super::tables::{
    EMPTY_HISTORY_SNR, REQUIRED_HISTORY_COUNT, STEP_SIZE_DB, recommended_nb_trans,
};
use super::{DecisionRequest, DecisionResult, UplinkObservation};

/// Compute the next radio configuration for a device.
pub fn decide(req: &DecisionRequest) -> DecisionResult {
    let mut result = DecisionResult::current(req);

    if !req.adr_enabled {
        return result;
    }

    if req.data_rate > req.max_data_rate {
        result.data_rate = req.max_data_rate;
    }

    let loss = packet_loss_percentage(&req.uplink_history);
    result.nb_trans = recommended_nb_trans(req.nb_trans, loss);

    let snr = max_snr(&req.uplink_history);
    let steps = margin_steps(snr, req.required_snr_for_data_rate, req.installation_margin);

    debug!(
        "ADR: history={} loss={:.1}% max_snr={:.1}dB steps={} nb_trans {}->{}",
        req.uplink_history.len(),
        loss,
        snr,
        steps,
        req.nb_trans,
        result.nb_trans
    );

    if steps < 0
        && history_count_at(&req.uplink_history, req.tx_power_index) != REQUIRED_HISTORY_COUNT
    {
        debug!(
            "ADR: negative margin held back, {}/{} uplinks at TX power index {}",
            history_count_at(&req.uplink_history, req.tx_power_index),
            REQUIRED_HISTORY_COUNT,
            req.tx_power_index
        );
        return result;
    }

    let (tx_power_index, data_rate) = apply_steps(
        steps,
        result.tx_power_index,
        result.data_rate,
        req.max_tx_power_index,
        req.max_data_rate,
    );
    result.tx_power_index = tx_power_index;
    result.data_rate = data_rate;

    result
}

/// Percentage of frames lost across the history window.
///
/// Reported as 0 until a full window of [`REQUIRED_HISTORY_COUNT`]
/// uplinks is available. Counters are expected to be non-decreasing;
/// deltas use wrapping arithmetic so out-of-order input yields a
/// meaningless figure rather than a panic.
pub fn packet_loss_percentage(history: &[UplinkObservation]) -> f32 {
    if history.len() < REQUIRED_HISTORY_COUNT {
        return 0.0;
    }

    let lost = history.windows(2).fold(0u32, |lost, pair| {
        let gap = pair[1]
            .frame_counter
            .wrapping_sub(pair[0].frame_counter)
            .wrapping_sub(1);
        lost.wrapping_add(gap)
    });

    lost as f32 / history.len() as f32 * 100.0
}

/// Best SNR in the history, or [`EMPTY_HISTORY_SNR`] when it is empty.
pub fn max_snr(history: &[UplinkObservation]) -> f32 {
    history
        .iter()
        .map(|obs| obs.max_snr)
        .fold(EMPTY_HISTORY_SNR, |best, snr| if snr > best { snr } else { best })
}

/// Number of whole [`STEP_SIZE_DB`] steps in the SNR margin, truncated
/// toward zero.
pub fn margin_steps(max_snr: f32, required_snr: f32, installation_margin: f32) -> i32 {
    let margin = max_snr - required_snr - installation_margin;
    (margin / STEP_SIZE_DB) as i32
}

/// Number of history entries sent at `tx_power_index`.
pub fn history_count_at(history: &[UplinkObservation], tx_power_index: i32) -> usize {
    history
        .iter()
        .filter(|obs| obs.tx_power_index == tx_power_index)
        .count()
}

/// Spend `steps` on the radio settings, returning `(tx_power_index, data_rate)`.
///
/// Positive steps raise the data rate first and then the TX power index
/// (a higher index radiates less power). Negative steps lower the TX power
/// index first and only drop the data rate once the index is at 0.
pub fn apply_steps(
    mut steps: i32,
    mut tx_power_index: i32,
    mut data_rate: i32,
    max_tx_power_index: i32,
    max_data_rate: i32,
) -> (i32, i32) {
    while steps != 0 {
        let before = (tx_power_index, data_rate);

        if steps > 0 {
            if data_rate < max_data_rate {
                data_rate += 1;
            } else if tx_power_index < max_tx_power_index {
                tx_power_index += 1;
            }
            steps -= 1;
        } else {
            if tx_power_index > 0 {
                tx_power_index -= 1;
            } else if tx_power_index == 0 && data_rate > 0 {
                data_rate -= 1;
            }
            steps += 1;
        }

        // Every remaining iteration would be the same no-op.
        if (tx_power_index, data_rate) == before {
            break;
        }
    }

    (tx_power_index, data_rate)
}
