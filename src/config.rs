//! Runtime configuration for doseview
//!
//! Everything here is assembled once at startup from the command line and
//! compile-time defaults. There is no config file and no persisted state:
//! the tool watches one sensor for one session and forgets everything on
//! exit.

/// Application name, used for the window title and log filter
pub const APP_NAME: &str = "doseview";

/// Which serial device to stream from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSelector {
    /// Position in the enumerated port list
    Index(usize),
    /// Explicit port name or device path
    Name(String),
}

impl Default for PortSelector {
    /// First available device
    fn default() -> Self {
        PortSelector::Index(0)
    }
}

impl PortSelector {
    /// Interpret a command-line value: all digits selects by position in
    /// the enumerated port list, anything else is a name or device path.
    pub fn parse(arg: &str) -> Self {
        match arg.parse::<usize>() {
            Ok(index) => PortSelector::Index(index),
            Err(_) => PortSelector::Name(arg.to_string()),
        }
    }
}

impl std::fmt::Display for PortSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortSelector::Index(index) => write!(f, "device #{}", index),
            PortSelector::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Visual settings for the chart
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Show the plot legend
    pub show_legend: bool,
    /// Show background grid lines
    pub show_grid: bool,
    /// Width of the dose line in points
    pub line_width: f32,
    /// Dose line color (RGBA)
    pub dose_color: [u8; 4],
    /// Uncertainty band fill color (RGBA, translucent)
    pub band_color: [u8; 4],
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_legend: true,
            show_grid: true,
            line_width: 1.5,
            dose_color: [66, 133, 244, 255],
            band_color: [66, 133, 244, 48],
        }
    }
}

/// Top-level application configuration assembled at startup
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Serial device selection
    pub port: PortSelector,
    /// Chart appearance
    pub ui: UiConfig,
}
