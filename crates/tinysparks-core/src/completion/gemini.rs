//! Gemini adapter -- [`CompletionService`] over the `generateContent` REST API.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::trait_def::{CompletionRequest, CompletionService, Credential};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: [Content<'a>; 1],
    system_instruction: SystemInstruction<'a>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct SystemInstruction<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, or `""` when there is none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// GeminiClient
// ---------------------------------------------------------------------------

/// HTTP client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Public Gemini API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    /// Create a client against `base_url`.
    ///
    /// `timeout` bounds each request end to end; `None` leaves the
    /// transport's own behavior in place.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(
        &self,
        credential: &Credential,
        request: &CompletionRequest,
    ) -> Result<String> {
        let body = GenerateContentBody {
            contents: [Content {
                role: "user",
                parts: [TextPart {
                    text: &request.prompt,
                }],
            }],
            system_instruction: SystemInstruction {
                parts: [TextPart {
                    text: &request.system_instruction,
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.response_schema,
            },
        };

        let url = self.endpoint(&request.model);
        debug!(model = %request.model, %url, "sending generateContent request");

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", credential.expose())
            .json(&body)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Gemini API error ({status}): {body}");
        }

        let parsed: GenerateContentResponse = resp
            .json()
            .await
            .context("failed to decode generateContent response")?;

        if parsed.candidates.is_empty() {
            debug!(prompt_feedback = ?parsed.prompt_feedback, "response has no candidates");
        } else if let Some(reason) = parsed.candidates[0].finish_reason.as_deref() {
            debug!(finish_reason = reason, "candidate finished");
        }

        Ok(parsed.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_joins_model_and_trims_slash() {
        let client = GeminiClient::new("http://localhost:9999/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999");
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn body_uses_api_field_names() {
        let schema = json!({"type": "ARRAY"});
        let body = GenerateContentBody {
            contents: [Content {
                role: "user",
                parts: [TextPart { text: "p" }],
            }],
            system_instruction: SystemInstruction {
                parts: [TextPart { text: "s" }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "p");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "s");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }

    #[test]
    fn text_concatenates_first_candidate_parts() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "[{\"a\":"}, {"text": "1}]"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(resp.text(), "[{\"a\":1}]");
    }

    #[test]
    fn text_is_empty_without_candidates() {
        let resp: GenerateContentResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert_eq!(resp.text(), "");
    }
}
