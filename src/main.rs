//! doseview - Main Entry Point
//!
//! Live chart of radiation dose-rate readings streamed over a serial
//! port by a Pocket Geiger counter.

use anyhow::Context as _;
use clap::Parser;
use doseview::{
    backend::{self, SensorBackend, SerialLineSource},
    config::{AppConfig, PortSelector, APP_NAME},
    frontend::DoseViewApp,
};
use std::sync::atomic::Ordering;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = APP_NAME, version, about = "Live radiation dose plotter for serial Geiger counters")]
struct Args {
    /// Serial device to read from, given as a port name (`/dev/ttyACM0`,
    /// `COM3`) or an index into the detected port list. Defaults to the
    /// first detected port.
    device: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,doseview=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting doseview");

    let args = Args::parse();
    let config = AppConfig {
        port: args
            .device
            .as_deref()
            .map(PortSelector::parse)
            .unwrap_or_default(),
        ..AppConfig::default()
    };

    // Resolve and open the device before any window exists, so a missing
    // or busy port fails fast on the terminal.
    let port_name = backend::resolve_port(&config.port)
        .with_context(|| format!("resolving {}", config.port))?;
    let source = SerialLineSource::open(&port_name)
        .with_context(|| format!("opening {port_name}"))?;
    tracing::info!("Listening on {} at {} baud", port_name, backend::BAUD_RATE);

    // Spawn the stream worker thread
    let (sensor_backend, handle) = SensorBackend::new(Box::new(source));
    let stop = sensor_backend.stop_handle();
    let worker_thread = std::thread::spawn(move || sensor_backend.run());

    // Configure eframe options
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 640.0])
            .with_min_inner_size([640.0, 400.0])
            .with_title(APP_NAME),
        ..Default::default()
    };

    // Run the eframe application
    let result = eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(DoseViewApp::new(cc, handle, &config, port_name)))),
    );

    // Signal the worker to stop and wait for it. The app's exit hook
    // already queued a shutdown command; the flag covers a worker that
    // never gets to read it.
    tracing::info!("Shutting down...");
    stop.store(false, Ordering::SeqCst);
    let _ = worker_thread.join();

    result.map_err(|err| anyhow::anyhow!("window system error: {err}"))
}
