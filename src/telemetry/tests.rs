//! Tests for the diagnostic timestamp format.

use super::*;
use chrono::TimeZone;

#[test]
fn test_stamp_pads_every_component() {
    let t = Utc.with_ymd_and_hms(2021, 3, 29, 4, 5, 59).unwrap();
    assert_eq!(stamp(t), "021:0329:0405");
}

#[test]
fn test_stamp_keeps_three_year_digits() {
    let t = Utc.with_ymd_and_hms(2026, 8, 26, 15, 30, 0).unwrap();
    assert_eq!(stamp(t), "026:0826:1530");

    // The year folds modulo 1000, not 100.
    let t = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(stamp(t), "970:0101:0000");
}
