//! Live dose-rate chart.
//!
//! Renders the accumulated [`DoseSeries`] as a line with a shaded
//! uncertainty band behind it. Both axes auto-rescale every frame so
//! the full history stays visible as new samples arrive.

use egui::{Color32, Stroke};
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints, Polygon};

use crate::config::UiConfig;
use crate::types::DoseSeries;

/// Plot adapter for the dose-rate series.
///
/// Holds the presentation settings resolved at startup; the data itself
/// is handed in fresh on every [`render`](Self::render) call.
#[derive(Debug, Clone)]
pub struct DosePlot {
    show_legend: bool,
    show_grid: bool,
    line_width: f32,
    dose_color: Color32,
    band_color: Color32,
}

impl DosePlot {
    pub fn from_config(config: &UiConfig) -> Self {
        let [r, g, b, a] = config.dose_color;
        let dose_color = Color32::from_rgba_unmultiplied(r, g, b, a);
        let [r, g, b, a] = config.band_color;
        let band_color = Color32::from_rgba_unmultiplied(r, g, b, a);

        Self {
            show_legend: config.show_legend,
            show_grid: config.show_grid,
            line_width: config.line_width,
            dose_color,
            band_color,
        }
    }

    /// Draws the chart into `ui`, filling the available space.
    pub fn render(&self, ui: &mut egui::Ui, series: &DoseSeries) {
        let mut plot = Plot::new("dose_plot")
            .auto_bounds([true, true])
            .show_grid(self.show_grid)
            .x_axis_label("Time (min)")
            .y_axis_label("Dose rate (µSv/h)");

        if self.show_legend {
            plot = plot.legend(
                Legend::default()
                    .position(Corner::RightTop)
                    .background_alpha(0.8),
            );
        }

        plot.show(ui, |plot_ui| {
            if series.is_empty() {
                return;
            }

            // Band first so the dose line draws on top of it.
            plot_ui.polygon(
                Polygon::new("dose ± error", PlotPoints::from(series.band_points()))
                    .fill_color(self.band_color)
                    .stroke(Stroke::NONE),
            );

            plot_ui.line(
                Line::new("dose", PlotPoints::from(series.dose_points()))
                    .color(self.dose_color)
                    .width(self.line_width),
            );
        });
    }
}
