//! Status bar panel — bottom bar showing link state, throughput, and the
//! most recent reading.

use egui::{Color32, RichText, Ui};

use crate::types::{LinkStats, LinkStatus, Sample};

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub status: LinkStatus,
    pub port_name: &'a str,
    pub stats: &'a LinkStats,
    pub last_sample: Option<&'a Sample>,
    pub last_error: Option<&'a str>,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // === Link status dot + port name ===
        let status_color = match ctx.status {
            LinkStatus::Opening => Color32::YELLOW,
            LinkStatus::Streaming => Color32::GREEN,
            LinkStatus::Lost => Color32::RED,
        };
        ui.colored_label(status_color, "●");
        let status_display = if ctx.port_name.is_empty() {
            ctx.status.to_string()
        } else {
            format!("{}: {}", ctx.status, ctx.port_name)
        };
        ui.label(RichText::new(status_display).small());

        ui.separator();

        // === Latest reading ===
        let reading_text = match ctx.last_sample {
            Some(sample) => format!("{:.3} ± {:.3} µSv/h", sample.dose, sample.dose_error),
            None => "waiting for data".to_string(),
        };
        ui.label(RichText::new(reading_text).small());

        ui.separator();

        // === Decoded sample count ===
        ui.label(RichText::new(format!("Samples: {}", ctx.stats.samples_decoded)).small());

        ui.separator();

        // === Raw line count ===
        ui.label(RichText::new(format!("Lines: {}", ctx.stats.lines_received)).small());

        ui.separator();

        // === Effective sample rate ===
        let rate_color = if ctx.stats.sample_rate > 0.0 {
            Color32::from_rgb(100, 255, 100)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new("Rate:").small());
        ui.colored_label(
            rate_color,
            RichText::new(format!("{:.2} Hz", ctx.stats.sample_rate)).small(),
        );

        ui.separator();

        // === Data received ===
        let kb = ctx.stats.bytes_received as f64 / 1024.0;
        let data_text = if kb > 1024.0 {
            format!("Data: {:.2} MB", kb / 1024.0)
        } else {
            format!("Data: {:.2} KB", kb)
        };
        ui.label(RichText::new(data_text).small());

        // === Error message (right-aligned) ===
        if let Some(error) = ctx.last_error {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(Color32::RED, RichText::new(error).small());
            });
        }
    });
}
