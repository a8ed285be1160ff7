//! Backend worker thread
//!
//! This module contains the streaming loop that runs in a separate
//! thread and owns the serial transport. It communicates with the UI
//! thread through crossbeam channels.
//!
//! # Responsibilities
//!
//! - **Line reading**: Blocks on the transport for the next record,
//!   one poll window at a time
//! - **Echoing**: Writes every raw line verbatim to the log before any
//!   processing, so the operator sees exactly what the device said
//! - **Decoding**: Classifies each line as a sample, the recurring
//!   header row, or noise
//! - **Publishing**: Hands decoded samples to the UI over a bounded
//!   channel, blocking rather than dropping when the UI is behind
//! - **Statistics**: Publishes stream counters on a heartbeat
//!
//! # Failure semantics
//!
//! Lines that fail to decode are dropped silently and never counted:
//! losing one noisy line is harmless, stopping the session on it would
//! not be. A transport error is the opposite: fatal and unrecoverable.
//! The worker publishes one [`BackendMessage::TransportFailure`] and
//! exits; there is no reconnection protocol.

use crate::backend::transport::LineSource;
use crate::backend::{BackendCommand, BackendMessage};
use crate::decoder::{decode, Decoded};
use crate::error::DoseViewError;
use crate::types::{LinkStats, LinkStatus, Sample};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How often stream statistics are pushed to the UI
const STATS_INTERVAL: Duration = Duration::from_secs(1);

/// The backend worker that runs the streaming loop
pub struct BackendWorker {
    /// Command receiver from the UI
    command_rx: Receiver<BackendCommand>,
    /// Message sender to the UI
    message_tx: Sender<BackendMessage>,
    /// Running flag
    running: Arc<AtomicBool>,
    /// Line source (real serial port or scripted mock)
    source: Box<dyn LineSource>,
    /// Current link status
    status: LinkStatus,
    /// Running counters about the stream
    stats: LinkStats,
    /// Session start, for the sample-rate display
    start_time: Instant,
    /// Last time stats were pushed to the UI
    last_stats_time: Instant,
}

impl BackendWorker {
    /// Create a new backend worker around an already-open line source
    pub fn new(
        command_rx: Receiver<BackendCommand>,
        message_tx: Sender<BackendMessage>,
        running: Arc<AtomicBool>,
        source: Box<dyn LineSource>,
    ) -> Self {
        Self {
            command_rx,
            message_tx,
            running,
            source,
            status: LinkStatus::Opening,
            stats: LinkStats::default(),
            start_time: Instant::now(),
            last_stats_time: Instant::now(),
        }
    }

    /// Run the main streaming loop
    ///
    /// Returns when shutdown is requested, the UI goes away, or the
    /// transport fails.
    pub fn run(&mut self) {
        tracing::info!("Stream worker started on {}", self.source.description());
        self.start_time = Instant::now();
        self.update_status(LinkStatus::Streaming);

        while self.running.load(Ordering::SeqCst) {
            self.process_commands();

            // A queued shutdown takes effect before the next read.
            if !self.running.load(Ordering::SeqCst) {
                break;
            }

            match self.source.next_line() {
                Ok(Some(line)) => self.handle_line(&line),
                Ok(None) => {
                    // Poll window elapsed with no complete line. A silent
                    // device stalls here indefinitely; only shutdown or a
                    // transport error ends the wait.
                }
                Err(e) => {
                    tracing::error!("Transport failure: {}", e);
                    // The UI shows the reason verbatim, without the
                    // error type's prefix.
                    let reason = match e {
                        DoseViewError::TransportClosed(reason) => reason,
                        other => other.to_string(),
                    };
                    self.update_status(LinkStatus::Lost);
                    let _ = self
                        .message_tx
                        .send(BackendMessage::TransportFailure(reason));
                    self.running.store(false, Ordering::SeqCst);
                }
            }

            if self.last_stats_time.elapsed() >= STATS_INTERVAL {
                self.send_stats();
                self.last_stats_time = Instant::now();
            }
        }

        let _ = self.message_tx.send(BackendMessage::Shutdown);
        tracing::info!("Stream worker stopped ({})", self.status);
    }

    /// Process pending commands from the UI
    fn process_commands(&mut self) {
        loop {
            match self.command_rx.try_recv() {
                Ok(cmd) => self.handle_command(cmd),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // UI is gone; stop streaming
                    self.running.store(false, Ordering::SeqCst);
                    break;
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: BackendCommand) {
        match cmd {
            BackendCommand::Shutdown => {
                tracing::info!("Shutdown requested");
                self.running.store(false, Ordering::SeqCst);
            }
        }
    }

    /// Echo, decode, and publish one raw line
    fn handle_line(&mut self, line: &str) {
        // Verbatim echo before any processing, data and noise alike
        tracing::info!("{}", line);

        self.stats.lines_received += 1;
        self.stats.bytes_received += line.len() as u64;

        match decode(line) {
            Decoded::Sample(sample) => {
                self.stats.samples_decoded += 1;
                self.publish_sample(sample);
            }
            Decoded::Header => {
                // Recurring header row; expected, skipped
            }
            Decoded::Malformed => {
                // Noise; dropped without even a counter
            }
        }
    }

    /// Publish a sample, blocking if the UI is behind
    ///
    /// A full queue stalls the reader instead of dropping the sample:
    /// every decoded sample must reach the store exactly once.
    fn publish_sample(&mut self, sample: Sample) {
        if self
            .message_tx
            .send(BackendMessage::Sample(sample))
            .is_err()
        {
            // Receiver dropped; UI is gone
            self.running.store(false, Ordering::SeqCst);
        }
    }

    /// Push statistics to the UI; dropped silently if the queue is full
    fn send_stats(&mut self) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        self.stats.sample_rate = if elapsed > 0.0 {
            self.stats.samples_decoded as f64 / elapsed
        } else {
            0.0
        };
        let _ = self.message_tx.try_send(BackendMessage::Stats(self.stats));
    }

    /// Update link status and notify the UI
    fn update_status(&mut self, status: LinkStatus) {
        self.status = status;
        let _ = self.message_tx.send(BackendMessage::LinkStatus(status));
    }
}
