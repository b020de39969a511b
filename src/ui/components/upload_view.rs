//! # Upload View
//!
//! The hero card shown while no schedule is loaded: an image file picker,
//! a spinner with the in-progress message while the extraction call is
//! out, and the single error line when it fails.

use eframe::egui;

use crate::domain::ProcessingStatus;
use crate::ui::app_state::PrayerTimesApp;
use crate::ui::components::theme::colors;

pub fn render_upload_view(ui: &mut egui::Ui, app: &mut PrayerTimesApp) {
    ui.add_space(40.0);
    ui.vertical_centered(|ui| {
        egui::Frame::none()
            .fill(colors::CREAM)
            .stroke(egui::Stroke::new(1.0, colors::EMERALD_LIGHT))
            .rounding(egui::Rounding::same(12.0))
            .inner_margin(egui::Margin::same(24.0))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new("صوّر جدول الصلاة")
                        .font(egui::FontId::new(22.0, egui::FontFamily::Proportional))
                        .color(colors::EMERALD_DARK)
                        .strong(),
                );
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(
                        "ارفع صورة جدول مواقيت الصلاة الشهري وسنحوّلها إلى عرض يومي",
                    )
                    .color(colors::MUTED),
                );
                ui.add_space(16.0);

                if app.schedule.is_busy() {
                    ui.spinner();
                    if let Some(message) = &app.schedule.processing.message {
                        ui.add_space(8.0);
                        ui.label(egui::RichText::new(message).color(colors::EMERALD));
                    }
                } else {
                    let button = egui::Button::new(
                        egui::RichText::new("📷 اختر صورة الجدول")
                            .font(egui::FontId::new(16.0, egui::FontFamily::Proportional))
                            .color(egui::Color32::WHITE),
                    )
                    .fill(colors::EMERALD)
                    .rounding(egui::Rounding::same(8.0))
                    .min_size(egui::vec2(220.0, 44.0));

                    if ui.add(button).clicked() {
                        let picked = rfd::FileDialog::new()
                            .add_filter("صور", &["png", "jpg", "jpeg", "webp", "bmp", "gif"])
                            .pick_file();
                        if let Some(path) = picked {
                            app.start_upload(&path);
                        }
                    }
                }

                if app.schedule.processing.status == ProcessingStatus::Error {
                    if let Some(message) = &app.schedule.processing.message {
                        ui.add_space(12.0);
                        ui.colored_label(colors::ERROR_RED, message);
                    }
                }
            });
    });
}
