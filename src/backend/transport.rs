//! Serial line transport
//!
//! This module owns everything that touches the serial port: the
//! [`LineSource`] seam the worker reads through, the real
//! [`SerialLineSource`] implementation, and device enumeration.
//!
//! The sensor firmware prints CSV records terminated by CRLF at a fixed
//! 9600 baud. A [`LineSource`] yields those records one at a time with
//! the terminator stripped. The sequence is infinite and non-restartable:
//! once the transport errors or closes, the session is over.

use crate::config::PortSelector;
use crate::error::{DoseViewError, Result};
use serialport::{SerialPort, SerialPortInfo};
use std::io::{BufRead, BufReader, ErrorKind};
use std::time::Duration;

/// Baud rate of the sensor firmware; fixed, not configurable
pub const BAUD_RATE: u32 = 9_600;

/// Internal read timeout used to poll the port
///
/// Bounds how long one `next_line` call blocks so the worker stays
/// responsive to shutdown. It is a liveness detail, never a deadline: a
/// silent device produces an endless run of empty poll windows, not an
/// error.
pub const READ_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A blocking source of line-delimited text records
pub trait LineSource: Send {
    /// Wait up to the poll interval for the next complete line.
    ///
    /// Returns `Ok(Some(line))` with the line terminator stripped,
    /// `Ok(None)` when the poll window elapsed without completing a
    /// line, and `Err(_)` when the transport closed or failed. Errors
    /// are fatal; the stream never resumes after one.
    fn next_line(&mut self) -> Result<Option<String>>;

    /// Human-readable endpoint description (the port name)
    fn description(&self) -> String;
}

/// [`LineSource`] over a real serial port
pub struct SerialLineSource {
    port_name: String,
    reader: BufReader<Box<dyn SerialPort>>,
    /// Partial line carried across poll windows
    line_buf: Vec<u8>,
}

impl SerialLineSource {
    /// Open a port at the fixed baud rate
    pub fn open(port_name: &str) -> Result<Self> {
        let port = serialport::new(port_name, BAUD_RATE)
            .timeout(READ_POLL_INTERVAL)
            .open()?;

        Ok(Self {
            port_name: port_name.to_string(),
            reader: BufReader::new(port),
            line_buf: Vec::new(),
        })
    }
}

impl LineSource for SerialLineSource {
    fn next_line(&mut self) -> Result<Option<String>> {
        match self.reader.read_until(b'\n', &mut self.line_buf) {
            // Zero bytes with no pending delimiter means end of stream:
            // the device went away
            Ok(0) => Err(DoseViewError::TransportClosed(format!(
                "{} reached end of stream",
                self.port_name
            ))),
            Ok(_) => {
                if self.line_buf.last() != Some(&b'\n') {
                    // Stream ended before the terminator; the partial
                    // line is not a record and is discarded
                    return Err(DoseViewError::TransportClosed(format!(
                        "{} closed mid-line",
                        self.port_name
                    )));
                }
                let line = strip_terminator(&self.line_buf);
                self.line_buf.clear();
                Ok(Some(line))
            }
            // Timeout is the poll window elapsing; partial bytes stay in
            // line_buf for the next window
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn description(&self) -> String {
        self.port_name.clone()
    }
}

/// Strip the trailing `\n` and any preceding `\r`, decoding lossily
///
/// The firmware emits ASCII; anything else becomes replacement
/// characters and falls out as a malformed row downstream.
fn strip_terminator(raw: &[u8]) -> String {
    let mut end = raw.len();
    if end > 0 && raw[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && raw[end - 1] == b'\r' {
        end -= 1;
    }
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Enumerate serial devices attached to the host
pub fn list_ports() -> Result<Vec<SerialPortInfo>> {
    Ok(serialport::available_ports()?)
}

/// Resolve a device selector to a concrete port name
///
/// Names pass through untouched; a bad name surfaces as the open failure
/// it causes. Indices are resolved against the enumerated port list.
pub fn resolve_port(selector: &PortSelector) -> Result<String> {
    match selector {
        PortSelector::Name(name) => Ok(name.clone()),
        PortSelector::Index(index) => {
            let ports = list_ports()?;
            for (i, port) in ports.iter().enumerate() {
                tracing::debug!("Detected serial device #{}: {}", i, port.port_name);
            }

            if ports.is_empty() {
                return Err(DoseViewError::NoDevice);
            }
            match ports.get(*index) {
                Some(port) => Ok(port.port_name.clone()),
                None => Err(DoseViewError::DeviceIndex {
                    index: *index,
                    available: ports.len(),
                }),
            }
        }
    }
}
