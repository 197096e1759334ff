//! Concrete decision scenarios the ADR algorithm must reproduce exactly.

use alitecs_adr::adr::engine::apply_steps;
use alitecs_adr::adr::tables::REQUIRED_HISTORY_COUNT;
use alitecs_adr::adr::{DecisionResult, UplinkObservation, decide};

use crate::mock_host::{eu868_request, steady_history};

// ── Step application ──────────────────────────────────────────

#[test]
fn two_positive_steps_raise_data_rate_to_max() {
    // steps=2, DR3 of max 5, TXP1 of max 3
    assert_eq!(apply_steps(2, 1, 3, 3, 5), (1, 5));
}

#[test]
fn one_negative_step_raises_power_before_touching_data_rate() {
    assert_eq!(apply_steps(-1, 2, 4, 7, 5), (1, 4));
}

// ── Anti-oscillation ──────────────────────────────────────────

#[test]
fn weak_link_with_short_history_keeps_radio_settings() {
    // margin = -22 + 20 - 10 = -12 dB → -4 steps, but only 19 uplinks.
    let mut req = eu868_request(steady_history(REQUIRED_HISTORY_COUNT - 1, -22.0, 3));
    req.data_rate = 4;
    req.tx_power_index = 3;

    let r = decide(&req);
    assert_eq!((r.data_rate, r.tx_power_index), (4, 3));
}

#[test]
fn weak_link_with_full_history_at_current_power_adjusts() {
    let mut req = eu868_request(steady_history(REQUIRED_HISTORY_COUNT, -22.0, 3));
    req.data_rate = 4;
    req.tx_power_index = 3;

    let r = decide(&req);
    // -4 steps: TXP 3→0 then DR 4→3
    assert_eq!((r.data_rate, r.tx_power_index), (3, 0));
}

#[test]
fn history_at_a_different_power_does_not_count() {
    let mut req = eu868_request(steady_history(REQUIRED_HISTORY_COUNT, -22.0, 2));
    req.data_rate = 4;
    req.tx_power_index = 3;

    let r = decide(&req);
    assert_eq!((r.data_rate, r.tx_power_index), (4, 3));
}

// ── Packet loss → nbTrans ─────────────────────────────────────

#[test]
fn twelve_percent_loss_moves_two_transmissions_to_three() {
    // 25 received, 3 lost → 12 %.
    let mut history = steady_history(25, -10.0, 0);
    for (i, obs) in history.iter_mut().enumerate() {
        obs.frame_counter += match i {
            0..=5 => 0,
            6..=12 => 2,
            _ => 3,
        };
    }
    let mut req = eu868_request(history);
    req.nb_trans = 2;

    assert_eq!(decide(&req).nb_trans, 3);
}

#[test]
fn loss_is_ignored_until_the_window_is_full() {
    let history: Vec<UplinkObservation> = (0..(REQUIRED_HISTORY_COUNT as u32 - 1))
        .map(|i| UplinkObservation {
            frame_counter: i * 10,
            max_snr: -10.0,
            tx_power_index: 0,
        })
        .collect();
    let mut req = eu868_request(history);
    req.nb_trans = 3;

    // Treated as 0 % loss: 3 → 2.
    assert_eq!(decide(&req).nb_trans, 2);
}

// ── Whole decisions ───────────────────────────────────────────

#[test]
fn disabled_adr_echoes_out_of_range_settings() {
    let mut req = eu868_request(steady_history(REQUIRED_HISTORY_COUNT, 20.0, 0));
    req.adr_enabled = false;
    req.data_rate = 12;
    req.nb_trans = 0;

    assert_eq!(
        decide(&req),
        DecisionResult {
            data_rate: 12,
            tx_power_index: 0,
            nb_trans: 0
        }
    );
}

#[test]
fn fresh_device_with_good_link_climbs_three_data_rates() {
    // margin = 0 + 20 - 10 = 10 dB → 3 steps
    let req = eu868_request(steady_history(5, 0.0, 0));
    let r = decide(&req);
    assert_eq!(r.data_rate, 3);
    assert_eq!(r.tx_power_index, 0);
    assert_eq!(r.nb_trans, 1);
}
