//! # App State Module
//!
//! The central application struct: schedule state, view routing, and the
//! receiver for whatever extraction call is currently in flight. All UI
//! components render off this struct; all user actions mutate it through
//! the methods here.

use std::path::Path;
use std::sync::mpsc;

use log::{error, info};

use crate::domain::{ProcessingState, ProcessingStatus};
use crate::extraction::{spawn_extraction, ExtractionOutcome, GeminiClient};
use crate::storage::FileScheduleStore;
use crate::ui::state::{ScheduleState, ViewState};

/// Shown when the schedule image cannot be read from disk.
pub const MSG_FILE_UNREADABLE: &str = "تعذر قراءة ملف الصورة. يرجى اختيار صورة أخرى.";
/// Shown when the service key is missing from the environment.
pub const MSG_NO_API_KEY: &str = "لم يتم ضبط مفتاح الخدمة (GEMINI_API_KEY).";

/// Main application struct for the egui prayer times viewer.
pub struct PrayerTimesApp {
    pub schedule: ScheduleState,
    pub view: ViewState,

    /// Receiving end of the in-flight extraction call, polled each frame.
    /// At most one call is outstanding per session.
    pending_extraction: Option<mpsc::Receiver<ExtractionOutcome>>,
}

impl PrayerTimesApp {
    /// Create the app, restoring any persisted schedule.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, anyhow::Error> {
        info!("Initializing prayer times app");

        crate::ui::components::theme::setup_app_style(&cc.egui_ctx);

        let store = FileScheduleStore::new()?;
        let mut schedule = ScheduleState::new(Box::new(store));
        schedule.load_from_store();

        Ok(Self {
            schedule,
            view: ViewState::new(),
            pending_extraction: None,
        })
    }

    /// Kicks off an extraction for the picked image file. Rejected while
    /// a call is already in flight (the upload control is also disabled).
    pub fn start_upload(&mut self, path: &Path) {
        if self.pending_extraction.is_some() || self.schedule.is_busy() {
            return;
        }

        self.schedule.processing = ProcessingState {
            status: ProcessingStatus::Uploading,
            message: None,
        };

        let image = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to read image {}: {}", path.display(), e);
                self.schedule.processing = ProcessingState::error(MSG_FILE_UNREADABLE);
                return;
            }
        };

        let client = match GeminiClient::new() {
            Ok(client) => client,
            Err(e) => {
                error!("Extraction client unavailable: {}", e);
                self.schedule.processing = ProcessingState::error(MSG_NO_API_KEY);
                return;
            }
        };

        let mime_type = mime_type_for(path);
        info!("Uploading {} as {}", path.display(), mime_type);

        self.schedule.begin_upload();
        self.pending_extraction = Some(spawn_extraction(
            client,
            image,
            mime_type.to_string(),
            self.schedule.current_generation(),
        ));
    }

    /// Drains the extraction channel; called once per frame.
    pub fn poll_extraction(&mut self) {
        let Some(rx) = &self.pending_extraction else {
            return;
        };
        if let Ok(outcome) = rx.try_recv() {
            self.pending_extraction = None;
            self.schedule.apply_extraction(outcome);
            // A fresh schedule always opens on the daily card.
            self.view.show_daily();
        }
    }

    /// Row selection in the monthly table: activate the day and route
    /// back to the daily view.
    pub fn select_day_from_table(&mut self, index: usize) {
        self.schedule.select_day(index);
        self.view.show_daily();
    }

    pub fn extraction_in_flight(&self) -> bool {
        self.pending_extraction.is_some()
    }
}

/// Media type from the file extension; the picker restricts the choice to
/// image files, so an unknown extension just defaults to JPEG.
fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(mime_type_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_type_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("a.webp")), "image/webp");
        assert_eq!(mime_type_for(Path::new("schedule")), "image/jpeg");
    }
}
