//! Tests for TimeManager

use liquidity_simulator_core_rs::TimeManager;

#[test]
fn test_time_manager_new() {
    let time = TimeManager::new(None);
    assert_eq!(time.current_tick(), 0);
    assert_eq!(time.report_interval(), None);
}

#[test]
fn test_advance_tick() {
    let mut time = TimeManager::new(None);

    time.advance_tick();
    assert_eq!(time.current_tick(), 1);

    time.advance_tick();
    assert_eq!(time.current_tick(), 2);
}

#[test]
fn test_no_interval_never_reports() {
    let mut time = TimeManager::new(None);
    for _ in 0..50 {
        assert!(!time.is_report_tick());
        time.advance_tick();
    }
}

#[test]
fn test_report_ticks_follow_interval() {
    let mut time = TimeManager::new(Some(100));
    let mut report_ticks = Vec::new();

    for _ in 0..=250 {
        if time.is_report_tick() {
            report_ticks.push(time.current_tick());
        }
        time.advance_tick();
    }

    assert_eq!(report_ticks, vec![0, 100, 200]);
}

#[test]
fn test_interval_of_one_reports_every_tick() {
    let mut time = TimeManager::new(Some(1));
    for _ in 0..5 {
        assert!(time.is_report_tick());
        time.advance_tick();
    }
}

#[test]
#[should_panic(expected = "report_interval must be positive")]
fn test_zero_interval_panics() {
    TimeManager::new(Some(0));
}
