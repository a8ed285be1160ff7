//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

use std::time::Duration;

/// How long to wait for the worker thread before a test gives up
pub fn test_timeout() -> Duration {
    Duration::from_secs(2)
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// A firmware-style record for the given reading
pub fn data_line(time_ms: u64, count: u64, cpm: f64, dose: f64, dose_error: f64) -> String {
    format!("{time_ms},{count},{cpm},{dose},{dose_error}")
}

/// The column header the firmware re-prints between records
pub fn header_line() -> String {
    "time(ms),count,cpm,uSv/h,uSv/hError".to_string()
}
