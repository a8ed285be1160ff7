//! Core data types for doseview
//!
//! This module contains the fundamental data structures used throughout
//! the application for representing decoded measurements and their
//! accumulated time series.
//!
//! # Main Types
//!
//! - [`Sample`] - One fully parsed measurement record from the device
//! - [`DoseSeries`] - The growing, append-only series buffers fed to the chart
//! - [`LinkStatus`] - Lifecycle of the serial link
//! - [`LinkStats`] - Running counters about the stream
//!
//! # Memory Management
//!
//! [`DoseSeries`] grows without bound for the life of the process. The
//! store is append-only: elements are never mutated, truncated, or
//! evicted, so the chart always sees the full session. An interactive
//! session is the accepted memory bound.

/// Milliseconds per minute, used to convert device timestamps for the X axis
pub const MS_PER_MINUTE: f64 = 60_000.0;

/// One decoded measurement record from the device
///
/// A `Sample` is fully formed or not produced at all; partial records
/// never leave the decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Device-relative milliseconds since firmware start
    /// (monotonic per device session, resets on reboot)
    pub time_ms: u64,
    /// Raw pulse count since firmware start (unused downstream)
    pub count: i64,
    /// Counts per minute (unused downstream)
    pub cpm: f64,
    /// Dose rate in µSv/h
    pub dose: f64,
    /// One-sided uncertainty on `dose` in µSv/h
    pub dose_error: f64,
}

impl Sample {
    /// Device timestamp converted to minutes
    #[inline]
    pub fn time_minutes(&self) -> f64 {
        self.time_ms as f64 / MS_PER_MINUTE
    }
}

/// Append-only series storage backing the live chart
///
/// Four sequences of equal length, indexed in lockstep by sample arrival
/// order. Appends never reject or reorder on time: a rebooted device
/// restarts its clock and the resulting fold-back is plotted as-is.
#[derive(Debug, Default)]
pub struct DoseSeries {
    /// Device time in minutes
    time_minutes: Vec<f64>,
    /// Dose rate in µSv/h
    dose: Vec<f64>,
    /// Dose minus its uncertainty (may be negative)
    dose_lower: Vec<f64>,
    /// Dose plus its uncertainty
    dose_upper: Vec<f64>,
}

impl DoseSeries {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample to every sequence
    pub fn append(&mut self, sample: &Sample) {
        self.time_minutes.push(sample.time_minutes());
        self.dose.push(sample.dose);
        self.dose_lower.push(sample.dose - sample.dose_error);
        self.dose_upper.push(sample.dose + sample.dose_error);
    }

    /// Number of samples stored
    pub fn len(&self) -> usize {
        self.time_minutes.len()
    }

    /// True if no samples have arrived yet
    pub fn is_empty(&self) -> bool {
        self.time_minutes.is_empty()
    }

    /// Device time in minutes, in arrival order
    pub fn time_minutes(&self) -> &[f64] {
        &self.time_minutes
    }

    /// Dose rate in µSv/h, in arrival order
    pub fn dose(&self) -> &[f64] {
        &self.dose
    }

    /// Lower edge of the uncertainty band
    pub fn dose_lower(&self) -> &[f64] {
        &self.dose_lower
    }

    /// Upper edge of the uncertainty band
    pub fn dose_upper(&self) -> &[f64] {
        &self.dose_upper
    }

    /// Dose series as plot points (time in minutes, µSv/h)
    pub fn dose_points(&self) -> Vec<[f64; 2]> {
        self.time_minutes
            .iter()
            .zip(&self.dose)
            .map(|(&t, &d)| [t, d])
            .collect()
    }

    /// Uncertainty band as a closed polygon outline: the upper edge in
    /// time order followed by the lower edge reversed
    pub fn band_points(&self) -> Vec<[f64; 2]> {
        let mut points = Vec::with_capacity(self.len() * 2);
        for (&t, &u) in self.time_minutes.iter().zip(&self.dose_upper) {
            points.push([t, u]);
        }
        for (&t, &l) in self.time_minutes.iter().zip(&self.dose_lower).rev() {
            points.push([t, l]);
        }
        points
    }
}

/// Lifecycle of the serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStatus {
    /// Port is being opened
    #[default]
    Opening,
    /// Lines are flowing
    Streaming,
    /// Transport closed or failed; the session is over
    Lost,
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkStatus::Opening => write!(f, "Opening..."),
            LinkStatus::Streaming => write!(f, "Streaming"),
            LinkStatus::Lost => write!(f, "Link lost"),
        }
    }
}

/// Running counters about the stream
///
/// Lines that fail to decode are deliberately not counted anywhere:
/// dropping a noisy line is normal operation for this monitor, not an
/// event worth surfacing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinkStats {
    /// Raw lines received, headers and noise included
    pub lines_received: u64,
    /// Payload bytes received (line terminators excluded)
    pub bytes_received: u64,
    /// Samples that decoded successfully
    pub samples_decoded: u64,
    /// Samples per second over the whole session
    pub sample_rate: f64,
}
