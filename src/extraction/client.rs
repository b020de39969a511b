//! Gemini API client for schedule extraction
//!
//! The one external-I/O boundary of the application: a single
//! `generateContent` request carrying the photographed schedule and a
//! fixed instruction, answered by a schema-constrained JSON document.
//! The call is blocking and runs on the worker thread in
//! [`crate::extraction::worker`], never on the UI thread.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

use crate::domain::ExtractionResult;

/// Efficient for vision tasks.
const GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Failure modes of one extraction call. All of them are converted to a
/// single localized status message at the call site; none is retried.
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    /// Transport or non-success HTTP status from the service.
    #[error("extraction service request failed: {0}")]
    ServiceFailure(String),
    /// The service answered but returned no text payload.
    #[error("no data returned from the extraction service")]
    NoData,
    /// The payload did not match the expected schedule schema.
    #[error("extraction response did not match the expected shape: {0}")]
    ParseFailure(String),
    /// A well-formed payload with zero day rows.
    #[error("no schedule rows found in the image")]
    EmptySchedule,
}

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    http_client: reqwest::blocking::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    InlineData {
        #[serde(rename = "inline_data")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable;
    /// `GEMINI_API_BASE` overrides the endpoint for testing.
    ///
    /// # Errors
    /// Returns an error if `GEMINI_API_KEY` is not set or HTTP client
    /// creation fails.
    pub fn new() -> Result<Self> {
        let api_key =
            env::var("GEMINI_API_KEY").context("GEMINI_API_KEY environment variable not set")?;

        let http_client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url =
            env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            http_client,
            base_url,
        })
    }

    /// Send the schedule image for extraction and parse the structured
    /// response. One request, no retry; repeatable from the caller's
    /// perspective.
    pub fn extract(
        &self,
        image: &[u8],
        mime_type: &str,
        today: NaiveDate,
    ) -> Result<ExtractionResult, ExtractionError> {
        let request = build_request(image, mime_type, today);

        info!(
            "Sending {} byte {} image for extraction",
            image.len(),
            mime_type
        );

        let response = self
            .http_client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, GEMINI_MODEL
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .map_err(|e| ExtractionError::ServiceFailure(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ExtractionError::ServiceFailure(e.to_string()))?;

        if !status.is_success() {
            return Err(ExtractionError::ServiceFailure(format!(
                "status {}: {}",
                status, body
            )));
        }

        parse_response(&body)
    }
}

/// Builds the full request body: image part, instruction part, and the
/// strict output schema.
fn build_request(image: &[u8], mime_type: &str, today: NaiveDate) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: BASE64.encode(image),
                    },
                },
                Part::Text {
                    text: extraction_prompt(today),
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    }
}

/// The fixed natural-language instruction, with today's date embedded so
/// the model can decide whether the schedule's month has already passed.
fn extraction_prompt(today: NaiveDate) -> String {
    let today = today.format("%B %-d, %Y");
    format!(
        r#"Analyze this image of a prayer times schedule (Salah times).

1. Identify the Month and Year written on the schedule (Hijri or Gregorian).
2. Compare it with today's date: "{today}".
3. If the schedule is for a MONTH that has already passed (e.g., today is May and schedule is April), mark 'isOutdated' as true. If it is the current month or a future month, 'isOutdated' is false.
4. Extract the data row by row for the entire month.

Return a JSON object with 'metadata' and 'days'.

Map the columns in 'days' to these exact keys:
- dayLabel: The date or day number shown.
- fajr: Fajr time.
- sunrise: Sunrise (Shuruq) time.
- dhuhr: Dhuhr time.
- asr: Asr time.
- maghrib: Maghrib time.
- isha: Isha time.

Ensure times are strings in "HH:MM" format."#
    )
}

/// The schema the service is required to answer with: `metadata` with both
/// fields, `days` entries with at least dayLabel, fajr and maghrib.
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "metadata": {
                "type": "OBJECT",
                "properties": {
                    "isOutdated": {
                        "type": "BOOLEAN",
                        "description": "True if the schedule is from a past month."
                    },
                    "detectedMonth": {
                        "type": "STRING",
                        "description": "The name of the month detected in the image."
                    }
                },
                "required": ["isOutdated", "detectedMonth"]
            },
            "days": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "dayLabel": { "type": "STRING" },
                        "fajr": { "type": "STRING" },
                        "sunrise": { "type": "STRING" },
                        "dhuhr": { "type": "STRING" },
                        "asr": { "type": "STRING" },
                        "maghrib": { "type": "STRING" },
                        "isha": { "type": "STRING" }
                    },
                    "required": ["dayLabel", "fajr", "maghrib"]
                }
            }
        },
        "required": ["metadata", "days"]
    })
}

/// Parses a successful HTTP body into the domain result, mapping each
/// failure mode onto the error taxonomy.
fn parse_response(body: &str) -> Result<ExtractionResult, ExtractionError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| ExtractionError::ParseFailure(e.to_string()))?;

    let text = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|content| content.parts.iter().find_map(|p| p.text.as_deref()))
        .filter(|t| !t.trim().is_empty())
        .ok_or(ExtractionError::NoData)?;

    let result: ExtractionResult =
        serde_json::from_str(text).map_err(|e| ExtractionError::ParseFailure(e.to_string()))?;

    if result.days.is_empty() {
        return Err(ExtractionError::EmptySchedule);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(days_json: &str) -> String {
        format!(
            r#"{{"candidates": [{{"content": {{"parts": [{{"text": "{{\"metadata\": {{\"isOutdated\": false, \"detectedMonth\": \"May\"}}, \"days\": {days}}}"}}]}}}}]}}"#,
            days = days_json.replace('"', "\\\"")
        )
    }

    #[test]
    fn test_request_body_shape() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 21).unwrap();
        let request = build_request(b"img-bytes", "image/jpeg", today);
        let value = serde_json::to_value(&request).unwrap();

        let parts = &value["contents"][0]["parts"];
        assert_eq!(parts[0]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[0]["inline_data"]["data"], BASE64.encode(b"img-bytes"));
        let prompt = parts[1]["text"].as_str().unwrap();
        assert!(prompt.contains("May 21, 2026"));
        assert!(prompt.contains("dayLabel"));

        let config = &value["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(
            config["responseSchema"]["properties"]["days"]["items"]["required"],
            serde_json::json!(["dayLabel", "fajr", "maghrib"])
        );
    }

    #[test]
    fn test_parse_response_success() {
        let body = payload(
            r#"[{"dayLabel": "1", "fajr": "04:12", "maghrib": "19:03"}, {"dayLabel": "2", "fajr": "04:11", "maghrib": "19:04"}]"#,
        );
        let result = parse_response(&body).unwrap();
        assert_eq!(result.days.len(), 2);
        assert_eq!(result.days[0].day_label, "1");
        assert_eq!(result.metadata.detected_month, "May");
        assert!(!result.metadata.is_outdated);
    }

    #[test]
    fn test_parse_response_without_candidates_is_no_data() {
        let err = parse_response(r#"{"candidates": []}"#).unwrap_err();
        assert!(matches!(err, ExtractionError::NoData));
    }

    #[test]
    fn test_parse_response_with_empty_text_is_no_data() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, ExtractionError::NoData));
    }

    #[test]
    fn test_parse_response_with_malformed_payload_is_parse_failure() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "not json"}]}}]}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, ExtractionError::ParseFailure(_)));
    }

    #[test]
    fn test_parse_response_with_zero_days_is_empty_schedule() {
        let body = payload("[]");
        let err = parse_response(&body).unwrap_err();
        assert!(matches!(err, ExtractionError::EmptySchedule));
    }

    #[test]
    fn test_client_creation_requires_api_key() {
        let original = env::var("GEMINI_API_KEY").ok();
        env::remove_var("GEMINI_API_KEY");

        if env::var("GEMINI_API_KEY").is_ok() {
            // Could not isolate the environment; skip rather than fail.
            if let Some(key) = original {
                env::set_var("GEMINI_API_KEY", key);
            }
            return;
        }

        let result = GeminiClient::new();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("GEMINI_API_KEY"));

        if let Some(key) = original {
            env::set_var("GEMINI_API_KEY", key);
        }
    }
}
