//! Multi-round ADR runs through a [`DeviceSession`], the way a network
//! server drives the algorithm uplink after uplink.

use alitecs_adr::adr::decide;
use alitecs_adr::adr::tables::REQUIRED_HISTORY_COUNT;
use alitecs_adr::session::{DeviceSession, RegionLimits};

fn eu868() -> RegionLimits {
    RegionLimits {
        max_data_rate: 5,
        max_tx_power_index: 7,
        required_snr_for_data_rate: -20.0,
        installation_margin: 10.0,
    }
}

#[test]
fn good_link_climbs_and_then_settles() {
    let mut s = DeviceSession::new(true);
    let limits = eu868();

    // margin = 2 + 20 - 10 = 12 dB → 4 steps per decision
    let mut changes = 0;
    for fcnt in 0..10 {
        s.record_uplink(fcnt, 2.0);
        if s.apply(&decide(&s.request(&limits))) {
            changes += 1;
        }
    }

    assert_eq!(s.data_rate, 5);
    assert_eq!(s.tx_power_index, 7);
    assert_eq!(s.nb_trans, 1);
    // Each positive decision spends up to 4 steps of the 12 needed.
    assert_eq!(changes, 3);
}

#[test]
fn fading_link_only_backs_off_after_a_full_window() {
    let mut s = DeviceSession::new(true);
    s.data_rate = 5;
    s.tx_power_index = 2;
    let limits = eu868();

    // margin = -13 + 20 - 10 = -3 dB → -1 step, held back until the
    // history holds 20 uplinks at the current power.
    for fcnt in 0..(REQUIRED_HISTORY_COUNT as u32 - 1) {
        s.record_uplink(fcnt, -13.0);
        assert!(!s.apply(&decide(&s.request(&limits))));
        assert_eq!(s.tx_power_index, 2);
    }

    s.record_uplink(REQUIRED_HISTORY_COUNT as u32, -13.0);
    // One frame missing from the window: 1/20 = 5 % → nbTrans 1 stays 1.
    assert!(s.apply(&decide(&s.request(&limits))));
    assert_eq!(s.tx_power_index, 1);
    assert_eq!(s.data_rate, 5);
    assert_eq!(s.nb_trans, 1);

    // The window is now at the old power, so the next uplink waits again.
    s.record_uplink(REQUIRED_HISTORY_COUNT as u32 + 1, -13.0);
    assert!(!s.apply(&decide(&s.request(&limits))));
    assert_eq!(s.tx_power_index, 1);
}

#[test]
fn adr_disabled_session_never_changes() {
    let mut s = DeviceSession::new(false);
    s.data_rate = 2;
    let limits = eu868();
    for fcnt in 0..30 {
        s.record_uplink(fcnt, 15.0);
        assert!(!s.apply(&decide(&s.request(&limits))));
    }
    assert_eq!(s.data_rate, 2);
    assert_eq!(s.history().len(), REQUIRED_HISTORY_COUNT);
}
