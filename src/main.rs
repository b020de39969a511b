use eframe::egui;
use log::{error, info};

mod domain;
mod extraction;
mod storage;
mod ui;

use ui::app_state::PrayerTimesApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    info!("Starting prayer times application");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 840.0]) // Portrait layout, like a printed schedule
            .with_min_inner_size([420.0, 640.0])
            .with_title("مواقيت صلاتي")
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "Prayer Times",
        options,
        Box::new(|cc| match PrayerTimesApp::new(cc) {
            Ok(app) => {
                info!("Successfully initialized prayer times app");
                Ok(Box::new(app))
            }
            Err(e) => {
                error!("Failed to initialize app: {}", e);
                Err(format!("Failed to initialize app: {}", e).into())
            }
        }),
    )
}
