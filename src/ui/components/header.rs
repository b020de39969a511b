//! # Header Components
//!
//! App title bar with the two-phase reset control, and the
//! outdated-schedule warning banner.

use chrono::{Datelike, Local};
use eframe::egui;

use crate::domain::arabic_month_name;
use crate::ui::components::theme::colors;
use crate::ui::state::ScheduleState;

/// Title row. While a schedule is loaded it carries the reset control:
/// one click arms the confirmation, a second click confirms or cancels.
pub fn render_header(ui: &mut egui::Ui, schedule: &mut ScheduleState) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(
                egui::RichText::new("مواقيت صلاتي")
                    .font(egui::FontId::new(26.0, egui::FontFamily::Proportional))
                    .color(colors::EMERALD_DARK)
                    .strong(),
            );
            ui.label(
                egui::RichText::new("رَبِّ اجْعَلْنِي مُقِيمَ الصَّلَاةِ")
                    .font(egui::FontId::new(12.0, egui::FontFamily::Proportional))
                    .color(colors::MUTED),
            );
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if !schedule.has_schedule() {
                return;
            }

            if schedule.confirming_reset {
                ui.label(
                    egui::RichText::new("حذف الجدول؟")
                        .color(colors::ERROR_RED)
                        .strong(),
                );
                if ui
                    .button(egui::RichText::new("تأكيد").color(colors::ERROR_RED))
                    .clicked()
                {
                    schedule.confirm_reset();
                }
                if ui.button("إلغاء").clicked() {
                    schedule.cancel_reset();
                }
            } else if ui.button("جدول جديد").clicked() {
                schedule.request_reset();
            }
        });
    });
    ui.separator();
}

/// Warning banner for a schedule whose month has already passed. Only
/// called when `show_outdated_banner()` holds.
pub fn render_outdated_banner(ui: &mut egui::Ui, schedule: &ScheduleState) {
    let detected = schedule
        .metadata
        .as_ref()
        .map(|m| m.detected_month.clone())
        .unwrap_or_default();
    let current = arabic_month_name(Local::now().month());

    egui::Frame::none()
        .fill(colors::AMBER_LIGHT)
        .stroke(egui::Stroke::new(1.0, colors::AMBER))
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new("⚠ تنبيه: الجدول قديم")
                    .color(colors::WARNING_TEXT)
                    .strong(),
            );
            ui.label(
                egui::RichText::new(format!(
                    "يبدو أن الصورة تعود لشهر {}، بينما نحن الآن في شهر {}.",
                    detected, current
                ))
                .color(colors::WARNING_TEXT),
            );
        });
}
