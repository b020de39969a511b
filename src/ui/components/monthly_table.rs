//! # Monthly Table
//!
//! The whole schedule as a striped selectable table. Clicking a row
//! returns its index to the coordinator, which activates the day and
//! routes back to the daily view.

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::domain::PrayerDay;
use crate::ui::components::theme::colors;

const HEADERS: [&str; 7] = [
    "اليوم", "الفجر", "الشروق", "الظهر", "العصر", "المغرب", "العشاء",
];

/// Renders the table; returns the clicked row index, if any.
pub fn render_monthly_table(
    ui: &mut egui::Ui,
    days: &[PrayerDay],
    current_index: usize,
) -> Option<usize> {
    let mut selected = None;

    egui::ScrollArea::vertical().show(ui, |ui| {
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .sense(egui::Sense::click())
            .cell_layout(egui::Layout::centered_and_justified(
                egui::Direction::LeftToRight,
            ));
        for _ in HEADERS {
            table = table.column(Column::remainder().at_least(52.0));
        }

        table
            .header(28.0, |mut header| {
                for title in HEADERS {
                    header.col(|ui| {
                        ui.label(
                            egui::RichText::new(title)
                                .color(colors::EMERALD_DARK)
                                .strong(),
                        );
                    });
                }
            })
            .body(|mut body| {
                for (index, day) in days.iter().enumerate() {
                    body.row(26.0, |mut row| {
                        row.set_selected(index == current_index);

                        row.col(|ui| {
                            ui.label(egui::RichText::new(&day.day_label).strong());
                        });
                        for time in [
                            &day.fajr,
                            &day.sunrise,
                            &day.dhuhr,
                            &day.asr,
                            &day.maghrib,
                            &day.isha,
                        ] {
                            row.col(|ui| {
                                let text = if time.trim().is_empty() { "--:--" } else { time };
                                ui.label(text);
                            });
                        }

                        if row.response().clicked() {
                            selected = Some(index);
                        }
                    });
                }
            });
    });

    selected
}
