//! # App Coordinator Module
//!
//! The `eframe::App` implementation: polls the extraction channel, lays
//! out header / banner / view toggle / content, and keeps the bottom
//! ticker panel running.

use eframe::egui;

use crate::ui::app_state::PrayerTimesApp;
use crate::ui::components;
use crate::ui::state::ViewMode;

impl eframe::App for PrayerTimesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_extraction();

        // Keep the spinner and the ticker animating between input events.
        if self.schedule.is_busy() || self.extraction_in_flight() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::bottom("tasbih_ticker")
            .exact_height(40.0)
            .frame(egui::Frame::none().fill(components::theme::colors::EMERALD_DARK))
            .show(ctx, |ui| {
                components::ticker::render_ticker(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::header::render_header(ui, &mut self.schedule);

            if self.schedule.show_outdated_banner() {
                components::header::render_outdated_banner(ui, &self.schedule);
            }

            ui.add_space(8.0);

            if !self.schedule.has_schedule() {
                components::upload_view::render_upload_view(ui, self);
                return;
            }

            self.render_view_toggle(ui);
            ui.add_space(8.0);

            match self.view.mode {
                ViewMode::Daily => {
                    components::daily_view::render_daily_view(ui, &mut self.schedule);
                }
                ViewMode::Monthly => {
                    if let Some(index) = components::monthly_table::render_monthly_table(
                        ui,
                        &self.schedule.days,
                        self.schedule.current_day_index,
                    ) {
                        self.select_day_from_table(index);
                    }
                }
            }
        });
    }
}

impl PrayerTimesApp {
    /// The Daily / Monthly toggle row.
    fn render_view_toggle(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                let available = ui.available_width();
                ui.add_space((available - 240.0).max(0.0) / 2.0);

                if ui
                    .add_sized(
                        [120.0, 32.0],
                        egui::SelectableLabel::new(self.view.is_daily(), "عرض يومي"),
                    )
                    .clicked()
                {
                    self.view.show_daily();
                }
                if ui
                    .add_sized(
                        [120.0, 32.0],
                        egui::SelectableLabel::new(!self.view.is_daily(), "الجدول الكامل"),
                    )
                    .clicked()
                {
                    self.view.show_monthly();
                }
            });
        });
    }
}
