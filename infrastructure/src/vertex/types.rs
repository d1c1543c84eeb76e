//! Wire types for the Vertex AI `:predict` API
//!
//! Converts domain sampling settings into the request body and the JSON
//! response back into plain text.

use serde::{Deserialize, Serialize};
use simulacra_application::GeneratorError;
use simulacra_domain::SamplingConfig;

/// Longest error body echoed back into an error message
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Serialize)]
pub(crate) struct PredictRequest<'a> {
    instances: [PredictInstance<'a>; 1],
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    temperature: f32,
    max_output_tokens: u32,
    top_p: f32,
    top_k: u32,
}

impl<'a> PredictRequest<'a> {
    pub(crate) fn new(prompt: &'a str, config: &SamplingConfig) -> Self {
        Self {
            instances: [PredictInstance { prompt }],
            parameters: PredictParameters {
                temperature: config.temperature(),
                max_output_tokens: config.max_output_tokens(),
                top_p: config.top_p(),
                top_k: config.top_k(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extract the first prediction's text from a successful response body.
///
/// An empty `content` is returned as-is; whether that is acceptable is the
/// caller's decision.
pub(crate) fn parse_predict_response(body: &str) -> Result<String, GeneratorError> {
    let response: PredictResponse = serde_json::from_str(body)
        .map_err(|e| GeneratorError::MalformedResponse(e.to_string()))?;

    response
        .predictions
        .into_iter()
        .next()
        .map(|p| p.content)
        .ok_or_else(|| GeneratorError::MalformedResponse("response has no predictions".to_string()))
}

/// Best-effort human-readable message from an error response body
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }

    let trimmed = body.trim();
    if trimmed.len() <= MAX_ERROR_BODY {
        return trimmed.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}
