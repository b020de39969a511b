//! # Schedule State Module
//!
//! The in-memory source of truth: the day rows, metadata, active day
//! index, processing status and reset-confirmation flag, plus every
//! transition between them. The persistence store is injected so tests
//! run against an in-memory fake.
//!
//! The schedule is replaced wholesale on a successful extraction or a
//! confirmed reset, never partially mutated. A generation counter tags
//! in-flight extraction calls; confirming a reset bumps it, so a stale
//! response landing afterwards is dropped instead of resurrecting the
//! cleared schedule.

use chrono::{Datelike, Local, NaiveDate};
use log::{info, warn};

use crate::domain::{PrayerDay, ProcessingState, ProcessingStatus, ScheduleMetadata};
use crate::extraction::{ExtractionError, ExtractionOutcome};
use crate::storage::ScheduleStore;

/// Status message while the extraction call is in flight.
pub const MSG_PROCESSING: &str = "جاري تحليل الصورة، وقراءة التاريخ، واستخراج الأوقات...";
/// Shown when the service finds no schedule rows in the image.
pub const MSG_NO_SCHEDULE: &str = "لم نتمكن من العثور على جدول صلاة في هذه الصورة.";
/// Shown for transport and malformed-response failures.
pub const MSG_SERVICE_ERROR: &str = "حدث خطأ في الاتصال بالخدمة. يرجى المحاولة مرة أخرى.";

/// Owns the schedule and mediates all transitions on it.
pub struct ScheduleState {
    store: Box<dyn ScheduleStore>,

    /// Row order equals the row order in the photographed table, assumed
    /// to be ascending day-of-month starting at 1.
    pub days: Vec<PrayerDay>,
    pub metadata: Option<ScheduleMetadata>,

    /// Active day, clamped to `[0, days.len() - 1]` whenever days exist.
    pub current_day_index: usize,
    pub processing: ProcessingState,

    /// Two-phase reset: the destructive action only runs while this is set.
    pub confirming_reset: bool,

    generation: u64,
}

impl ScheduleState {
    pub fn new(store: Box<dyn ScheduleStore>) -> Self {
        Self {
            store,
            days: Vec::new(),
            metadata: None,
            current_day_index: 0,
            processing: ProcessingState::idle(),
            confirming_reset: false,
            generation: 0,
        }
    }

    /// Startup load from the persistence store. Non-empty data flips the
    /// status to success and runs the default-day derivation.
    pub fn load_from_store(&mut self) {
        if let Some((days, metadata)) = self.store.load() {
            info!("Loaded persisted schedule with {} days", days.len());
            self.days = days;
            self.metadata = metadata;
            self.processing = ProcessingState::success();
            self.on_load_succeeded(Local::now().day());
        }
    }

    /// Whether an extraction call is outstanding. The upload control is
    /// disabled while this holds, so at most one call is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.processing.status,
            ProcessingStatus::Uploading | ProcessingStatus::Processing
        )
    }

    pub fn has_schedule(&self) -> bool {
        !self.days.is_empty()
    }

    /// The generation an extraction spawned now must carry.
    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    /// Marks the start of an extraction call.
    pub fn begin_upload(&mut self) {
        self.confirming_reset = false;
        self.processing = ProcessingState::processing(MSG_PROCESSING);
    }

    /// Applies the outcome of an extraction call. Outcomes from an older
    /// generation (the session was reset while the call was in flight)
    /// are dropped. On failure the prior schedule is left untouched.
    pub fn apply_extraction(&mut self, outcome: ExtractionOutcome) {
        self.apply_extraction_on(outcome, Local::now().day());
    }

    fn apply_extraction_on(&mut self, outcome: ExtractionOutcome, day_of_month: u32) {
        if outcome.generation != self.generation {
            warn!(
                "Dropping stale extraction outcome (generation {} != {})",
                outcome.generation, self.generation
            );
            return;
        }

        match outcome.result {
            Ok(result) => {
                info!(
                    "Extraction succeeded: {} days, month '{}', outdated={}",
                    result.days.len(),
                    result.metadata.detected_month,
                    result.metadata.is_outdated
                );
                self.days = result.days;
                self.metadata = Some(result.metadata);
                self.store.save(&self.days, self.metadata.as_ref());
                self.processing = ProcessingState::success();
                self.on_load_succeeded(day_of_month);
            }
            Err(e) => {
                warn!("Extraction failed: {}", e);
                let message = match e {
                    ExtractionError::EmptySchedule => MSG_NO_SCHEDULE,
                    ExtractionError::NoData
                    | ExtractionError::ParseFailure(_)
                    | ExtractionError::ServiceFailure(_) => MSG_SERVICE_ERROR,
                };
                self.processing = ProcessingState::error(message);
            }
        }
    }

    /// Default-day derivation, run exactly once per transition into
    /// success: pick the first row whose label digits match today's
    /// day-of-month, else assume row `i` is day `i + 1` and clamp.
    fn on_load_succeeded(&mut self, day_of_month: u32) {
        if self.days.is_empty() {
            return;
        }
        self.current_day_index = derived_day_index(&self.days, day_of_month);
        info!(
            "Default day index {} for day-of-month {}",
            self.current_day_index, day_of_month
        );
    }

    /// First phase of the reset flow; nothing is cleared yet.
    pub fn request_reset(&mut self) {
        self.confirming_reset = true;
    }

    /// Leaves schedule, metadata and storage untouched.
    pub fn cancel_reset(&mut self) {
        self.confirming_reset = false;
    }

    /// Second phase: clears schedule, metadata and persisted storage,
    /// resets the day index and status, and bumps the generation so any
    /// still-running extraction call lands as stale.
    pub fn confirm_reset(&mut self) {
        info!("Reset confirmed, clearing schedule");
        self.days.clear();
        self.metadata = None;
        self.store.clear();
        self.current_day_index = 0;
        self.processing = ProcessingState::idle();
        self.confirming_reset = false;
        self.generation += 1;
    }

    /// Clamps into bounds; no-op while the schedule is empty.
    pub fn select_day(&mut self, index: usize) {
        if self.days.is_empty() {
            return;
        }
        self.current_day_index = index.min(self.days.len() - 1);
    }

    /// Steps the active day by `delta`; no wraparound at either end.
    pub fn advance_day(&mut self, delta: i32) {
        if self.days.is_empty() {
            return;
        }
        let next = self.current_day_index as i64 + i64::from(delta);
        if next < 0 || next >= self.days.len() as i64 {
            return;
        }
        self.current_day_index = next as usize;
    }

    pub fn current_day(&self) -> Option<&PrayerDay> {
        self.days.get(self.current_day_index)
    }

    pub fn has_previous_day(&self) -> bool {
        self.current_day_index > 0
    }

    pub fn has_next_day(&self) -> bool {
        self.current_day_index + 1 < self.days.len()
    }

    /// Display date for the active row: first day of the current calendar
    /// month plus the row index. Used only for formatting, never stored.
    pub fn view_date(&self) -> Option<NaiveDate> {
        view_date_for(Local::now().date_naive(), self.current_day_index)
    }

    /// The outdated-schedule banner shows only for a non-empty schedule
    /// whose detected month has already passed.
    pub fn show_outdated_banner(&self) -> bool {
        self.has_schedule() && self.metadata.as_ref().is_some_and(|m| m.is_outdated)
    }
}

/// Row lookup for today's day-of-month: first label whose embedded digits
/// equal it, else `clamp(day_of_month - 1, 0, len - 1)`.
fn derived_day_index(days: &[PrayerDay], day_of_month: u32) -> usize {
    let found = days.iter().position(|d| {
        let digits: String = d
            .day_label
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        digits.parse::<u32>().map_or(false, |n| n == day_of_month)
    });

    match found {
        Some(index) => index,
        None => (day_of_month as usize)
            .saturating_sub(1)
            .min(days.len().saturating_sub(1)),
    }
}

/// Row `index` maps to day `index + 1` of the month `today` falls in.
fn view_date_for(today: NaiveDate, index: usize) -> Option<NaiveDate> {
    let first = today.with_day(1)?;
    first.checked_add_days(chrono::Days::new(index as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryScheduleStore;
    use std::rc::Rc;

    fn day(label: &str) -> PrayerDay {
        PrayerDay {
            day_label: label.to_string(),
            fajr: "04:12".to_string(),
            sunrise: "05:41".to_string(),
            dhuhr: "12:02".to_string(),
            asr: "15:29".to_string(),
            maghrib: "18:23".to_string(),
            isha: "19:47".to_string(),
        }
    }

    fn numbered_days(count: u32) -> Vec<PrayerDay> {
        (1..=count).map(|n| day(&n.to_string())).collect()
    }

    fn metadata(is_outdated: bool) -> ScheduleMetadata {
        ScheduleMetadata {
            is_outdated,
            detected_month: "شعبان".to_string(),
        }
    }

    fn state_with_store() -> (ScheduleState, Rc<MemoryScheduleStore>) {
        let store = Rc::new(MemoryScheduleStore::new());
        (ScheduleState::new(Box::new(store.clone())), store)
    }

    fn success_outcome(
        state: &ScheduleState,
        days: Vec<PrayerDay>,
        meta: ScheduleMetadata,
    ) -> ExtractionOutcome {
        ExtractionOutcome {
            generation: state.current_generation(),
            result: Ok(crate::domain::ExtractionResult {
                metadata: meta,
                days,
            }),
        }
    }

    #[test]
    fn test_select_day_clamps_to_bounds() {
        let (mut state, _) = state_with_store();
        state.days = numbered_days(5);

        state.select_day(99);
        assert_eq!(state.current_day_index, 4);
        state.select_day(2);
        assert_eq!(state.current_day_index, 2);
    }

    #[test]
    fn test_select_day_is_noop_on_empty_schedule() {
        let (mut state, _) = state_with_store();
        state.select_day(3);
        assert_eq!(state.current_day_index, 0);
    }

    #[test]
    fn test_advance_day_never_leaves_bounds() {
        let (mut state, _) = state_with_store();
        state.days = numbered_days(3);

        state.advance_day(-1);
        assert_eq!(state.current_day_index, 0, "no wraparound below zero");

        state.advance_day(1);
        state.advance_day(1);
        assert_eq!(state.current_day_index, 2);
        state.advance_day(1);
        assert_eq!(state.current_day_index, 2, "no wraparound past the end");
    }

    #[test]
    fn test_default_day_matches_label_digits() {
        // Scenario A: labels "1".."30", today is the 15th.
        let (mut state, _) = state_with_store();
        state.days = numbered_days(30);
        state.on_load_succeeded(15);
        assert_eq!(state.current_day_index, 14);
    }

    #[test]
    fn test_default_day_matches_labels_with_embedded_digits() {
        let (mut state, _) = state_with_store();
        state.days = vec![day("1 رمضان"), day("2 رمضان"), day("3 رمضان")];
        state.on_load_succeeded(2);
        assert_eq!(state.current_day_index, 1);
    }

    #[test]
    fn test_default_day_falls_back_to_clamped_row_index() {
        // Scenario B: no numeric labels, today is the 20th, 3 rows.
        let (mut state, _) = state_with_store();
        state.days = vec![day("Mon"), day("Tue"), day("Wed")];
        state.on_load_succeeded(20);
        assert_eq!(state.current_day_index, 2);
    }

    #[test]
    fn test_successful_extraction_replaces_and_persists() {
        let (mut state, store) = state_with_store();
        let outcome = success_outcome(&state, numbered_days(30), metadata(false));
        state.begin_upload();
        assert!(state.is_busy());
        state.apply_extraction_on(outcome, 15);

        assert_eq!(state.processing.status, ProcessingStatus::Success);
        assert_eq!(state.days.len(), 30);
        assert_eq!(state.current_day_index, 14);

        let (saved_days, saved_meta) = store.load().expect("schedule should be persisted");
        assert_eq!(saved_days.len(), 30);
        assert_eq!(saved_meta, Some(metadata(false)));
    }

    #[test]
    fn test_failed_extraction_sets_error_and_keeps_schedule() {
        let (mut state, _) = state_with_store();
        state.days = numbered_days(5);
        state.current_day_index = 3;

        state.begin_upload();
        state.apply_extraction_on(
            ExtractionOutcome {
                generation: state.current_generation(),
                result: Err(ExtractionError::ServiceFailure("timeout".to_string())),
            },
            15,
        );

        assert_eq!(state.processing.status, ProcessingStatus::Error);
        assert_eq!(state.processing.message.as_deref(), Some(MSG_SERVICE_ERROR));
        assert_eq!(state.days.len(), 5, "prior schedule untouched");
        assert_eq!(state.current_day_index, 3);
    }

    #[test]
    fn test_empty_extraction_reports_no_schedule_found() {
        let (mut state, _) = state_with_store();
        state.begin_upload();
        state.apply_extraction_on(
            ExtractionOutcome {
                generation: state.current_generation(),
                result: Err(ExtractionError::EmptySchedule),
            },
            15,
        );
        assert_eq!(state.processing.status, ProcessingStatus::Error);
        assert_eq!(state.processing.message.as_deref(), Some(MSG_NO_SCHEDULE));
    }

    #[test]
    fn test_stale_generation_outcome_is_dropped() {
        let (mut state, store) = state_with_store();
        state.days = numbered_days(3);
        let stale = success_outcome(&state, numbered_days(30), metadata(false));

        // Reset moves the session on before the outcome lands.
        state.request_reset();
        state.confirm_reset();
        state.apply_extraction_on(stale, 15);

        assert!(state.days.is_empty(), "stale result must not resurrect data");
        assert_eq!(state.processing.status, ProcessingStatus::Idle);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_cancel_reset_leaves_everything_untouched() {
        let (mut state, store) = state_with_store();
        let outcome = success_outcome(&state, numbered_days(10), metadata(true));
        state.apply_extraction_on(outcome, 4);

        state.request_reset();
        assert!(state.confirming_reset);
        state.cancel_reset();

        assert!(!state.confirming_reset);
        assert_eq!(state.days.len(), 10);
        assert_eq!(state.metadata, Some(metadata(true)));
        assert!(store.load().is_some());
    }

    #[test]
    fn test_confirm_reset_clears_state_and_storage() {
        let (mut state, store) = state_with_store();
        let outcome = success_outcome(&state, numbered_days(10), metadata(true));
        state.apply_extraction_on(outcome, 4);

        state.request_reset();
        state.confirm_reset();

        assert!(state.days.is_empty());
        assert_eq!(state.metadata, None);
        assert_eq!(state.current_day_index, 0);
        assert_eq!(state.processing.status, ProcessingStatus::Idle);
        assert!(!state.confirming_reset);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_load_from_store_restores_persisted_schedule() {
        let store = Rc::new(MemoryScheduleStore::with_data(
            numbered_days(31),
            Some(metadata(false)),
        ));
        let mut state = ScheduleState::new(Box::new(store));
        state.load_from_store();

        assert_eq!(state.processing.status, ProcessingStatus::Success);
        assert_eq!(state.days.len(), 31);
        // Derivation ran: with numeric labels the index matches today.
        let today = Local::now().day() as usize;
        assert_eq!(state.current_day_index, today - 1);
    }

    #[test]
    fn test_outdated_banner_predicate() {
        let (mut state, _) = state_with_store();
        assert!(!state.show_outdated_banner(), "empty schedule, no banner");

        state.days = numbered_days(3);
        state.metadata = Some(metadata(false));
        assert!(!state.show_outdated_banner());

        state.metadata = Some(metadata(true));
        assert!(state.show_outdated_banner());
    }

    #[test]
    fn test_view_date_maps_row_index_to_day_of_month() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 21).unwrap();
        assert_eq!(
            view_date_for(today, 0),
            NaiveDate::from_ymd_opt(2026, 5, 1)
        );
        assert_eq!(
            view_date_for(today, 14),
            NaiveDate::from_ymd_opt(2026, 5, 15)
        );
    }
}
