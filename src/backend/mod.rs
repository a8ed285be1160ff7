//! Backend module for serial streaming
//!
//! This module reads the sensor's CSV stream on a separate thread to
//! keep the UI responsive. It uses crossbeam channels for thread-safe
//! communication with the frontend.
//!
//! # Architecture
//!
//! The backend runs in a separate thread from the UI, communicating via
//! bounded channels:
//!
//! - [`BackendCommand`] - Messages sent from UI to backend (shutdown)
//! - [`BackendMessage`] - Messages sent from backend to UI (samples,
//!   status, stats, failure)
//! - [`BackendHandle`] - UI-side handle for sending commands and
//!   receiving messages
//! - [`SensorBackend`] - Backend entry point that owns the channels and
//!   runs the worker
//!
//! The series store never crosses threads: the worker publishes decoded
//! [`Sample`]s and the UI thread appends them, so the store keeps a
//! single writer and a single reader. Sample messages are sent blocking;
//! when the UI falls behind, the reader stalls on the full queue instead
//! of dropping data.
//!
//! # Components
//!
//! - [`LineSource`](transport::LineSource) - Seam between the worker
//!   and the transport
//! - [`SerialLineSource`](transport::SerialLineSource) - Real serial
//!   port at the fixed sensor baud rate
//! - [`MockLineSource`](mock::MockLineSource) - Scripted source for
//!   tests and hardware-free runs
//! - [`BackendWorker`](worker::BackendWorker) - The streaming loop
//!
//! # Example
//!
//! ```
//! use doseview::backend::{BackendMessage, SensorBackend};
//! use doseview::backend::mock::MockLineSource;
//!
//! let source = MockLineSource::from_lines(["12345,3,6.0,0.072,0.015"]);
//! let (backend, handle) = SensorBackend::new(Box::new(source));
//!
//! let worker = std::thread::spawn(move || backend.run());
//!
//! // The UI thread drains messages each frame
//! worker.join().unwrap();
//! for msg in handle.drain() {
//!     if let BackendMessage::Sample(sample) = msg {
//!         assert_eq!(sample.time_ms, 12345);
//!     }
//! }
//! ```

pub mod mock;
pub mod transport;
pub mod worker;

pub use mock::{MockEvent, MockLineSource};
pub use transport::{list_ports, resolve_port, LineSource, SerialLineSource, BAUD_RATE};
pub use worker::BackendWorker;

use crate::types::{LinkStats, LinkStatus, Sample};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Depth of the frontend → backend command channel
const COMMAND_QUEUE_DEPTH: usize = 16;

/// Depth of the backend → frontend message channel
///
/// Over half an hour of headroom at the sensor's real cadence. Sample
/// sends block when it fills, which is the backpressure the reader
/// wants; only stats heartbeats are allowed to drop.
const MESSAGE_QUEUE_DEPTH: usize = 1024;

/// Message sent from the UI to the backend
#[derive(Debug, Clone)]
pub enum BackendCommand {
    /// Stop the worker and end the session
    Shutdown,
}

/// Message sent from the backend to the UI
#[derive(Debug, Clone)]
pub enum BackendMessage {
    /// Link status changed
    LinkStatus(LinkStatus),
    /// One decoded sample, in stream order
    Sample(Sample),
    /// Stream statistics heartbeat
    Stats(LinkStats),
    /// The transport closed or failed; the session is over
    TransportFailure(String),
    /// Backend is shutting down
    Shutdown,
}

/// UI-side handle to the backend
pub struct BackendHandle {
    /// Receiver for backend messages
    pub receiver: Receiver<BackendMessage>,
    /// Sender for commands to the backend
    pub command_sender: Sender<BackendCommand>,
}

impl BackendHandle {
    /// Try to receive a message without blocking
    pub fn try_recv(&self) -> Option<BackendMessage> {
        self.receiver.try_recv().ok()
    }

    /// Receive all pending messages
    pub fn drain(&self) -> Vec<BackendMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.receiver.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Request shutdown
    pub fn shutdown(&self) {
        let _ = self.command_sender.send(BackendCommand::Shutdown);
    }
}

/// The sensor backend that runs in a separate thread
pub struct SensorBackend {
    /// Receiver for commands from the UI
    command_receiver: Receiver<BackendCommand>,
    /// Sender for messages to the UI
    message_sender: Sender<BackendMessage>,
    /// Running flag
    running: Arc<AtomicBool>,
    /// The line source the worker will stream from
    source: Box<dyn LineSource>,
}

impl SensorBackend {
    /// Create a new backend around an already-open line source
    pub fn new(source: Box<dyn LineSource>) -> (Self, BackendHandle) {
        let (cmd_tx, cmd_rx) = bounded(COMMAND_QUEUE_DEPTH);
        let (msg_tx, msg_rx) = bounded(MESSAGE_QUEUE_DEPTH);

        let backend = Self {
            command_receiver: cmd_rx,
            message_sender: msg_tx,
            running: Arc::new(AtomicBool::new(true)),
            source,
        };

        let handle = BackendHandle {
            receiver: msg_rx,
            command_sender: cmd_tx,
        };

        (backend, handle)
    }

    /// Run the streaming loop until shutdown or transport failure
    pub fn run(self) {
        let mut worker = BackendWorker::new(
            self.command_receiver,
            self.message_sender,
            self.running,
            self.source,
        );
        worker.run();
    }

    /// Get a handle to stop the backend
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }
}
