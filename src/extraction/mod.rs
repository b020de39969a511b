pub mod client;
pub mod worker;

pub use client::{ExtractionError, GeminiClient};
pub use worker::{spawn_extraction, ExtractionOutcome};
