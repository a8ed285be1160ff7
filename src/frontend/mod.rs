//! Frontend module for egui UI
//!
//! This module provides the main UI components using eframe/egui.
//! It drains decoded samples from the backend through crossbeam channels
//! every frame and renders them in real-time.
//!
//! # Architecture
//!
//! The window is two panels: a central live chart of the dose-rate series
//! with its uncertainty band, and a bottom status bar with link state and
//! throughput counters. All series data lives on this thread; the backend
//! only ever hands over individual [`Sample`]s.
//!
//! # Main Types
//!
//! - [`DoseViewApp`] - Main application state implementing [`eframe::App`]
//! - [`DosePlot`] - Chart configuration and rendering
//!
//! # Submodules
//!
//! - `plot` - Chart rendering with egui_plot
//! - `status_bar` - Bottom status strip

pub mod plot;
pub mod status_bar;

pub use plot::DosePlot;
pub use status_bar::{render_status_bar, StatusBarContext};

use std::time::Duration;

use crate::backend::{BackendHandle, BackendMessage};
use crate::config::AppConfig;
use crate::types::{DoseSeries, LinkStats, LinkStatus, Sample};

/// Repaint cadence while no data is arriving.
const IDLE_REPAINT_INTERVAL: Duration = Duration::from_millis(250);

/// Main application state.
///
/// Owns the receiving half of the backend channel pair and the full
/// sample history. Created once in `main` and driven by eframe.
pub struct DoseViewApp {
    /// Channel handle to the stream worker
    backend: BackendHandle,
    /// Every sample received this session, in arrival order
    series: DoseSeries,
    /// Chart adapter
    plot: DosePlot,
    /// Resolved port name, for the status bar
    port_name: String,
    /// Last reported link state
    status: LinkStatus,
    /// Last reported throughput counters
    stats: LinkStats,
    /// Most recent decoded sample, for the status bar readout
    last_sample: Option<Sample>,
    /// Set when the transport failed; closes the window on the next frame
    fatal: Option<String>,
}

impl DoseViewApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        backend: BackendHandle,
        config: &AppConfig,
        port_name: String,
    ) -> Self {
        Self {
            backend,
            series: DoseSeries::new(),
            plot: DosePlot::from_config(&config.ui),
            port_name,
            status: LinkStatus::default(),
            stats: LinkStats::default(),
            last_sample: None,
            fatal: None,
        }
    }

    /// Drains all pending backend messages into local state.
    ///
    /// Returns whether anything was received, so the caller can decide
    /// how soon to repaint.
    fn process_backend_messages(&mut self) -> bool {
        let mut had_messages = false;

        for message in self.backend.drain() {
            had_messages = true;
            match message {
                BackendMessage::LinkStatus(status) => {
                    self.status = status;
                }
                BackendMessage::Sample(sample) => {
                    self.series.append(&sample);
                    self.last_sample = Some(sample);
                }
                BackendMessage::Stats(stats) => {
                    self.stats = stats;
                }
                BackendMessage::TransportFailure(reason) => {
                    tracing::error!("Transport failure: {reason}");
                    self.status = LinkStatus::Lost;
                    self.fatal = Some(reason);
                }
                BackendMessage::Shutdown => {
                    tracing::debug!("Stream worker announced shutdown");
                }
            }
        }

        had_messages
    }
}

impl eframe::App for DoseViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_messages = self.process_backend_messages();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            render_status_bar(
                ui,
                &StatusBarContext {
                    status: self.status,
                    port_name: &self.port_name,
                    stats: &self.stats,
                    last_sample: self.last_sample.as_ref(),
                    last_error: self.fatal.as_deref(),
                },
            );
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.plot.render(ui, &self.series);
        });

        if self.fatal.is_some() {
            // A lost stream is unrecoverable; close the window and let
            // `main` tear the worker down.
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        } else if had_messages || self.status == LinkStatus::Streaming {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(IDLE_REPAINT_INTERVAL);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.backend.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendCommand;
    use crossbeam_channel::{bounded, Receiver, Sender};

    /// App wired to hand-held channel ends, no window required.
    fn create_test_app() -> (
        DoseViewApp,
        Sender<BackendMessage>,
        Receiver<BackendCommand>,
    ) {
        let (msg_tx, msg_rx) = bounded(64);
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
        let config = AppConfig::default();

        let app = DoseViewApp {
            backend: BackendHandle {
                receiver: msg_rx,
                command_sender: cmd_tx,
            },
            series: DoseSeries::new(),
            plot: DosePlot::from_config(&config.ui),
            port_name: "/dev/ttyACM0".to_string(),
            status: LinkStatus::default(),
            stats: LinkStats::default(),
            last_sample: None,
            fatal: None,
        };
        (app, msg_tx, cmd_rx)
    }

    fn sample(time_ms: u64, dose: f64, dose_error: f64) -> Sample {
        Sample {
            time_ms,
            count: 1,
            cpm: 2.0,
            dose,
            dose_error,
        }
    }

    #[test]
    fn test_no_messages_is_quiet() {
        let (mut app, _tx, _cmd_rx) = create_test_app();

        assert!(!app.process_backend_messages());
        assert!(app.series.is_empty());
        assert!(app.last_sample.is_none());
    }

    #[test]
    fn test_samples_append_in_order() {
        let (mut app, tx, _cmd_rx) = create_test_app();

        tx.send(BackendMessage::Sample(sample(60_000, 0.08, 0.01)))
            .unwrap();
        tx.send(BackendMessage::Sample(sample(120_000, 0.09, 0.02)))
            .unwrap();

        assert!(app.process_backend_messages());
        assert_eq!(app.series.len(), 2);
        assert_eq!(app.series.time_minutes(), &[1.0, 2.0]);
        let last = app.last_sample.unwrap();
        assert_eq!(last.time_ms, 120_000);
    }

    #[test]
    fn test_status_and_stats_updates() {
        let (mut app, tx, _cmd_rx) = create_test_app();

        tx.send(BackendMessage::LinkStatus(LinkStatus::Streaming))
            .unwrap();
        tx.send(BackendMessage::Stats(LinkStats {
            lines_received: 10,
            bytes_received: 300,
            samples_decoded: 8,
            sample_rate: 0.5,
        }))
        .unwrap();

        app.process_backend_messages();
        assert_eq!(app.status, LinkStatus::Streaming);
        assert_eq!(app.stats.lines_received, 10);
        assert_eq!(app.stats.samples_decoded, 8);
    }

    #[test]
    fn test_transport_failure_is_fatal() {
        let (mut app, tx, _cmd_rx) = create_test_app();

        tx.send(BackendMessage::TransportFailure(
            "device disconnected".to_string(),
        ))
        .unwrap();

        app.process_backend_messages();
        assert_eq!(app.status, LinkStatus::Lost);
        assert_eq!(app.fatal.as_deref(), Some("device disconnected"));
    }

    #[test]
    fn test_shutdown_message_changes_nothing() {
        let (mut app, tx, _cmd_rx) = create_test_app();

        tx.send(BackendMessage::Shutdown).unwrap();

        assert!(app.process_backend_messages());
        assert!(app.fatal.is_none());
        assert_eq!(app.status, LinkStatus::Opening);
    }

    #[test]
    fn test_on_exit_requests_backend_shutdown() {
        use eframe::App as _;

        let (mut app, _tx, cmd_rx) = create_test_app();
        app.on_exit(None);

        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::Shutdown)));
    }
}
