//! # Daily View
//!
//! One day's card: the printed day label, the derived Gregorian date, and
//! the six prayer rows, with prev/next navigation bounded by the schedule
//! length. Empty or missing times render as a placeholder instead of
//! being rejected.

use chrono::Datelike;
use eframe::egui;

use crate::domain::{arabic_month_name, PrayerDay};
use crate::ui::components::theme::colors;
use crate::ui::state::ScheduleState;

const TIME_PLACEHOLDER: &str = "--:--";

pub fn render_daily_view(ui: &mut egui::Ui, schedule: &mut ScheduleState) {
    let Some(day) = schedule.current_day().cloned() else {
        return;
    };

    ui.vertical_centered(|ui| {
        egui::Frame::none()
            .fill(colors::CREAM)
            .stroke(egui::Stroke::new(1.0, colors::EMERALD_LIGHT))
            .rounding(egui::Rounding::same(12.0))
            .inner_margin(egui::Margin::same(16.0))
            .show(ui, |ui| {
                render_day_header(ui, schedule, &day);
                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                render_prayer_row(ui, "الفجر", &day.fajr);
                render_prayer_row(ui, "الشروق", &day.sunrise);
                render_prayer_row(ui, "الظهر", &day.dhuhr);
                render_prayer_row(ui, "العصر", &day.asr);
                render_prayer_row(ui, "المغرب", &day.maghrib);
                render_prayer_row(ui, "العشاء", &day.isha);
            });

        ui.add_space(8.0);
        ui.label(
            egui::RichText::new("تأكد دائمًا من تطابق الأوقات مع المساجد المحلية")
                .color(colors::MUTED)
                .font(egui::FontId::new(12.0, egui::FontFamily::Proportional)),
        );
    });
}

/// Navigation arrows around the day label and the derived date. The date
/// assumes row `i` is day `i + 1` of the current month; display only.
fn render_day_header(ui: &mut egui::Ui, schedule: &mut ScheduleState, day: &PrayerDay) {
    ui.horizontal(|ui| {
        // Right-to-left content: the "previous" arrow sits on the right.
        let prev = ui.add_enabled(
            schedule.has_previous_day(),
            egui::Button::new("▶").min_size(egui::vec2(32.0, 32.0)),
        );
        if prev.clicked() {
            schedule.advance_day(-1);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let next = ui.add_enabled(
                schedule.has_next_day(),
                egui::Button::new("◀").min_size(egui::vec2(32.0, 32.0)),
            );
            if next.clicked() {
                schedule.advance_day(1);
            }

            ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(&day.day_label)
                        .font(egui::FontId::new(20.0, egui::FontFamily::Proportional))
                        .color(colors::EMERALD_DARK)
                        .strong(),
                );
                if let Some(date) = schedule.view_date() {
                    ui.label(
                        egui::RichText::new(format!(
                            "{} {} {}",
                            date.day(),
                            arabic_month_name(date.month()),
                            date.year()
                        ))
                        .color(colors::MUTED),
                    );
                }
            });
        });
    });
}

fn render_prayer_row(ui: &mut egui::Ui, name: &str, time: &str) {
    let display = if time.trim().is_empty() {
        TIME_PLACEHOLDER
    } else {
        time
    };

    egui::Frame::none()
        .fill(egui::Color32::WHITE)
        .stroke(egui::Stroke::new(1.0, colors::EMERALD_LIGHT))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(name)
                        .font(egui::FontId::new(16.0, egui::FontFamily::Proportional))
                        .color(colors::EMERALD_DARK)
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(display)
                            .font(egui::FontId::new(18.0, egui::FontFamily::Monospace))
                            .color(colors::EMERALD),
                    );
                });
            });
        });
}
