//! Background worker for the extraction call.
//!
//! The UI thread never blocks on the network: each upload spawns one
//! thread that runs the blocking Gemini call and reports back over an
//! mpsc channel polled every frame. Outcomes carry the generation that
//! was current when the call was spawned, so a response that arrives
//! after the session has been reset is recognizably stale and dropped.

use std::sync::mpsc;
use std::thread;

use chrono::Local;
use log::{debug, info};

use crate::domain::ExtractionResult;
use crate::extraction::client::{ExtractionError, GeminiClient};

/// Result of one extraction call, tagged with its session generation.
#[derive(Debug)]
pub struct ExtractionOutcome {
    pub generation: u64,
    pub result: Result<ExtractionResult, ExtractionError>,
}

/// Runs the extraction on a dedicated thread and returns the receiving
/// end for the single outcome message.
pub fn spawn_extraction(
    client: GeminiClient,
    image: Vec<u8>,
    mime_type: String,
    generation: u64,
) -> mpsc::Receiver<ExtractionOutcome> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        info!("Extraction worker started (generation {})", generation);
        let today = Local::now().date_naive();
        let result = client.extract(&image, &mime_type, today);
        if tx.send(ExtractionOutcome { generation, result }).is_err() {
            // Receiver gone: the session no longer cares about this call.
            debug!(
                "Extraction outcome for generation {} had no receiver",
                generation
            );
        }
    });

    rx
}
