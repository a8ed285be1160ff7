//! # doseview: live radiation dose plotter
//!
//! Reads dose-rate samples from a serial-attached Pocket Geiger counter
//! and charts them as they arrive, with the reported measurement error
//! drawn as a shaded band around the dose line.
//!
//! ## Architecture
//!
//! - **Backend**: Owns the serial port, splits the byte stream into lines,
//!   and decodes them in a dedicated thread
//! - **Frontend**: Renders the live chart and status bar using eframe/egui
//!   with egui_plot
//! - **Communication**: Bounded crossbeam channels for thread-safe handoff
//!
//! The firmware emits comma-separated records (`time(ms),count,cpm,uSv/h,
//! uSv/hError`) at 9600 baud, re-printing its column header now and then.
//! The decoder recognizes header rows and drops unparseable ones; everything
//! else becomes a [`Sample`](types::Sample) appended to the session history.
//!
//! ## Example
//!
//! ```ignore
//! use doseview::{
//!     backend::{self, SensorBackend, SerialLineSource},
//!     config::AppConfig,
//!     frontend::DoseViewApp,
//! };
//!
//! fn main() -> eframe::Result<()> {
//!     let config = AppConfig::default();
//!     let port_name = backend::resolve_port(&config.port).unwrap();
//!     let source = SerialLineSource::open(&port_name).unwrap();
//!
//!     let (backend, handle) = SensorBackend::new(Box::new(source));
//!     std::thread::spawn(move || backend.run());
//!
//!     let native_options = eframe::NativeOptions::default();
//!     eframe::run_native(
//!         "doseview",
//!         native_options,
//!         Box::new(move |cc| Ok(Box::new(DoseViewApp::new(cc, handle, &config, port_name)))),
//!     )
//! }
//! ```

pub mod backend;
pub mod config;
pub mod decoder;
pub mod error;
pub mod frontend;
pub mod types;

// Re-export commonly used types
pub use backend::{BackendCommand, BackendHandle, BackendMessage, SensorBackend};
pub use config::{AppConfig, PortSelector};
pub use decoder::{decode, Decoded};
pub use error::{DoseViewError, Result};
pub use frontend::DoseViewApp;
pub use types::{DoseSeries, LinkStats, LinkStatus, Sample};
