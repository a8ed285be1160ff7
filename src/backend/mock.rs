//! Scripted line source for tests and hardware-free development
//!
//! [`MockLineSource`] replays a fixed script of transport events instead
//! of touching a serial port. Worker unit tests and the end-to-end
//! integration tests drive the whole pipeline with it, including the
//! fatal path: an exhausted script reports the transport as closed, the
//! same way an unplugged device does.

use crate::backend::transport::LineSource;
use crate::error::{DoseViewError, Result};
use std::collections::VecDeque;

/// One scripted transport event
#[derive(Debug, Clone)]
pub enum MockEvent {
    /// A complete line, terminator already stripped
    Line(String),
    /// A poll window that elapsed with no data (silent device)
    Idle,
    /// A transport failure with the given description
    Failure(String),
}

/// [`LineSource`] that replays a fixed script
pub struct MockLineSource {
    events: VecDeque<MockEvent>,
}

impl MockLineSource {
    /// Create an empty script; the source reports closure immediately
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Create a script that yields the given lines in order, then closes
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            events: lines
                .into_iter()
                .map(|line| MockEvent::Line(line.into()))
                .collect(),
        }
    }

    /// Append a line event
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.events.push_back(MockEvent::Line(line.into()));
    }

    /// Append an empty poll window
    pub fn push_idle(&mut self) {
        self.events.push_back(MockEvent::Idle);
    }

    /// Append a transport failure
    pub fn push_failure(&mut self, reason: impl Into<String>) {
        self.events.push_back(MockEvent::Failure(reason.into()));
    }

    /// Number of events left in the script
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl Default for MockLineSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for MockLineSource {
    fn next_line(&mut self) -> Result<Option<String>> {
        match self.events.pop_front() {
            Some(MockEvent::Line(line)) => Ok(Some(line)),
            Some(MockEvent::Idle) => Ok(None),
            Some(MockEvent::Failure(reason)) => Err(DoseViewError::TransportClosed(reason)),
            None => Err(DoseViewError::TransportClosed(
                "mock script exhausted".to_string(),
            )),
        }
    }

    fn description(&self) -> String {
        "mock sensor".to_string()
    }
}
