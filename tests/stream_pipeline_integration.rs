//! Integration tests for the serial stream pipeline
//!
//! These tests validate the complete backend workflow:
//! - Worker thread startup and teardown
//! - Line decoding across headers, data rows, and noise
//! - Fatal transport failure reporting
//! - Series accumulation on the receiving side

mod common;

use doseview::backend::{BackendMessage, MockLineSource, SensorBackend};
use doseview::types::{DoseSeries, LinkStatus};
use std::thread;

use common::{assert_float_eq, data_line, header_line};

#[test]
fn test_stream_end_to_end() {
    let mut source = MockLineSource::new();
    source.push_line(header_line());
    source.push_line(data_line(12345, 3, 6.0, 0.072, 0.015));
    source.push_idle();
    source.push_line(data_line(14345, 4, 7.5, 0.081, 0.014));
    source.push_line("##garbage##".to_string());
    // Script exhaustion reads as a closed stream, which ends the worker.

    let (backend, frontend) = SensorBackend::new(Box::new(source));
    let handle = thread::spawn(move || backend.run());

    // The worker announces a live link before reading anything.
    let first = frontend
        .receiver
        .recv_timeout(common::test_timeout())
        .expect("worker should report link status");
    assert!(matches!(
        first,
        BackendMessage::LinkStatus(LinkStatus::Streaming)
    ));

    handle.join().expect("worker thread should exit cleanly");

    let messages = frontend.drain();

    let samples: Vec<_> = messages
        .iter()
        .filter_map(|msg| match msg {
            BackendMessage::Sample(sample) => Some(*sample),
            _ => None,
        })
        .collect();
    assert_eq!(samples.len(), 2, "header and noise must not decode");
    assert_eq!(samples[0].time_ms, 12345);
    assert_eq!(samples[0].count, 3);
    assert_float_eq(samples[0].dose, 0.072, 1e-12);
    assert_float_eq(samples[0].dose_error, 0.015, 1e-12);
    assert_eq!(samples[1].time_ms, 14345);

    let has_failure = messages
        .iter()
        .any(|msg| matches!(msg, BackendMessage::TransportFailure(_)));
    assert!(has_failure, "stream end should be reported as fatal");

    assert!(
        matches!(messages.last(), Some(BackendMessage::Shutdown)),
        "worker should announce shutdown last"
    );
}

#[test]
fn test_failure_reason_reaches_frontend() {
    let mut source = MockLineSource::new();
    source.push_line(data_line(1000, 1, 2.0, 0.05, 0.01));
    source.push_failure("USB unplugged".to_string());
    source.push_line(data_line(2000, 2, 4.0, 0.06, 0.01));

    let (backend, frontend) = SensorBackend::new(Box::new(source));
    let handle = thread::spawn(move || backend.run());
    handle.join().expect("worker thread should exit cleanly");

    let messages = frontend.drain();

    let sample_count = messages
        .iter()
        .filter(|msg| matches!(msg, BackendMessage::Sample(_)))
        .count();
    assert_eq!(sample_count, 1, "nothing may be read past a failure");

    let reason = messages.iter().find_map(|msg| match msg {
        BackendMessage::TransportFailure(reason) => Some(reason.clone()),
        _ => None,
    });
    assert_eq!(reason.as_deref(), Some("USB unplugged"));
}

#[test]
fn test_shutdown_command_stops_worker_before_reading() {
    let source = MockLineSource::from_lines([
        data_line(1000, 1, 2.0, 0.05, 0.01),
        data_line(2000, 2, 4.0, 0.06, 0.01),
    ]);

    let (backend, frontend) = SensorBackend::new(Box::new(source));
    // Queue the shutdown before the worker takes its first step.
    frontend.shutdown();

    let handle = thread::spawn(move || backend.run());
    handle.join().expect("worker thread should exit cleanly");

    let messages = frontend.drain();
    let has_samples = messages
        .iter()
        .any(|msg| matches!(msg, BackendMessage::Sample(_)));
    assert!(!has_samples, "no lines should be read after shutdown");
    assert!(matches!(messages.last(), Some(BackendMessage::Shutdown)));
}

#[test]
fn test_series_accumulates_from_stream() {
    let mut source = MockLineSource::new();
    source.push_line(header_line());
    for i in 0..50u64 {
        let time_ms = 2000 * (i + 1);
        let dose = 0.05 + 0.001 * i as f64;
        source.push_line(data_line(time_ms, i, 2.0, dose, 0.01));
        if i % 10 == 0 {
            source.push_line(header_line());
        }
    }

    let (backend, frontend) = SensorBackend::new(Box::new(source));
    let handle = thread::spawn(move || backend.run());
    handle.join().expect("worker thread should exit cleanly");

    let mut series = DoseSeries::new();
    for message in frontend.drain() {
        if let BackendMessage::Sample(sample) = message {
            series.append(&sample);
        }
    }

    assert_eq!(series.len(), 50);
    assert_float_eq(series.time_minutes()[0], 2000.0 / 60_000.0, 1e-12);
    assert_float_eq(series.time_minutes()[49], 100_000.0 / 60_000.0, 1e-12);

    // Band edges stay centered on the dose line.
    let idx = 20;
    let dose = series.dose()[idx];
    assert_float_eq(series.dose_lower()[idx], dose - 0.01, 1e-12);
    assert_float_eq(series.dose_upper()[idx], dose + 0.01, 1e-12);
}
