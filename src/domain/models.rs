//! # Domain Models
//!
//! Core data types shared between the extraction client, the persistence
//! layer, and the UI state.
//!
//! The schedule data originates from a photographed table, so nothing here
//! is validated beyond shape: day labels are whatever was printed on the
//! page and times are free-form strings that the views render with a
//! placeholder when empty.

use serde::{Deserialize, Serialize};

/// One row of a printed prayer-times schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerDay {
    /// The date or day number as printed: "1", "Sat", "1 Ramadan", etc.
    /// Not guaranteed numeric or unique.
    #[serde(rename = "dayLabel")]
    pub day_label: String,
    #[serde(default)]
    pub fajr: String,
    #[serde(default)]
    pub sunrise: String,
    #[serde(default)]
    pub dhuhr: String,
    #[serde(default)]
    pub asr: String,
    #[serde(default)]
    pub maghrib: String,
    #[serde(default)]
    pub isha: String,
}

/// Extraction-time context about the detected schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// True if the schedule's month has already passed relative to the
    /// date embedded in the extraction prompt.
    #[serde(rename = "isOutdated")]
    pub is_outdated: bool,
    /// Month name as read from the image (Hijri or Gregorian).
    #[serde(rename = "detectedMonth")]
    pub detected_month: String,
}

/// The structured payload returned by the extraction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub metadata: ScheduleMetadata,
    pub days: Vec<PrayerDay>,
}

/// Lifecycle of the one long-running extraction call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    Idle,
    Uploading,
    Processing,
    Success,
    Error,
}

/// Status plus the user-facing message shown in the upload surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingState {
    pub status: ProcessingStatus,
    pub message: Option<String>,
}

impl ProcessingState {
    pub fn idle() -> Self {
        Self {
            status: ProcessingStatus::Idle,
            message: None,
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self {
            status: ProcessingStatus::Processing,
            message: Some(message.into()),
        }
    }

    pub fn success() -> Self {
        Self {
            status: ProcessingStatus::Success,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ProcessingStatus::Error,
            message: Some(message.into()),
        }
    }
}

/// Arabic month name for a 1-based Gregorian month number.
pub fn arabic_month_name(month: u32) -> &'static str {
    match month {
        1 => "يناير",
        2 => "فبراير",
        3 => "مارس",
        4 => "أبريل",
        5 => "مايو",
        6 => "يونيو",
        7 => "يوليو",
        8 => "أغسطس",
        9 => "سبتمبر",
        10 => "أكتوبر",
        11 => "نوفمبر",
        12 => "ديسمبر",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prayer_day_deserializes_with_missing_optional_times() {
        // The extraction schema only requires dayLabel, fajr and maghrib.
        let json = r#"{"dayLabel": "1", "fajr": "04:12", "maghrib": "19:03"}"#;
        let day: PrayerDay = serde_json::from_str(json).unwrap();
        assert_eq!(day.day_label, "1");
        assert_eq!(day.fajr, "04:12");
        assert_eq!(day.maghrib, "19:03");
        assert_eq!(day.sunrise, "");
        assert_eq!(day.isha, "");
    }

    #[test]
    fn test_metadata_uses_wire_field_names() {
        let meta = ScheduleMetadata {
            is_outdated: true,
            detected_month: "رمضان".to_string(),
        };
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["isOutdated"], true);
        assert_eq!(value["detectedMonth"], "رمضان");
    }

    #[test]
    fn test_arabic_month_name_covers_calendar() {
        assert_eq!(arabic_month_name(1), "يناير");
        assert_eq!(arabic_month_name(12), "ديسمبر");
        assert_eq!(arabic_month_name(13), "?");
    }
}
