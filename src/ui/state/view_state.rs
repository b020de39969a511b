//! # View State Module
//!
//! Transient routing state: which of the two views is showing. Selecting
//! a row in the monthly table switches back to the daily view; there are
//! no other transitions.

/// The two ways to look at a loaded schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Daily,
    Monthly,
}

/// Routing state, re-initialized on startup and whenever the schedule is
/// replaced. Never persisted.
#[derive(Debug)]
pub struct ViewState {
    pub mode: ViewMode,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            mode: ViewMode::Daily,
        }
    }

    pub fn show_daily(&mut self) {
        self.mode = ViewMode::Daily;
    }

    pub fn show_monthly(&mut self) {
        self.mode = ViewMode::Monthly;
    }

    pub fn is_daily(&self) -> bool {
        self.mode == ViewMode::Daily
    }
}
