// Gemini generateContent client.
//
// Sends one JSON POST per advice request and parses the candidate text into
// a `DraftAdvice`. Every emitted event carries the request's generation
// counter so the receiving side can discard responses that a newer draft
// state has superseded.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::advisor::prompt;
use crate::advisor::{Advisor, AdviceRequest, AdvisorEvent, DraftAdvice};
use crate::config::Config;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// ---------------------------------------------------------------------------
// GeminiClient
// ---------------------------------------------------------------------------

/// Low-level generateContent client.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    team_count: u32,
    my_slot: u32,
    max_candidates: usize,
}

impl GeminiClient {
    /// Create a new client with the given API key and model identifier.
    pub fn new(api_key: String, model: String, team_count: u32, my_slot: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
            team_count,
            my_slot,
            max_candidates: 15,
        }
    }

    /// Override the endpoint base. Used by tests to point at a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Fetch advice for a request, returning the parsed payload.
    pub async fn fetch_advice(&self, request: &AdviceRequest) -> anyhow::Result<DraftAdvice> {
        if self.api_key.is_empty() {
            anyhow::bail!("API key not configured");
        }

        let system = prompt::system_prompt(self.team_count, self.my_slot);
        let user = prompt::build_advice_prompt(request, self.max_candidates);

        let body = serde_json::json!({
            "system_instruction": { "parts": [{ "text": system }] },
            "contents": [{ "parts": [{ "text": user }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        });

        let response = self
            .http
            .post(self.endpoint())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            debug!(%status, "advice request failed");
            anyhow::bail!("API returned status {status}: {}", summarize_error_body(&text));
        }

        let candidate = parse_candidate_text(&text)
            .ok_or_else(|| anyhow::anyhow!("response contained no candidate text"))?;
        let advice = parse_advice(&candidate)?;
        Ok(advice)
    }

    /// Fetch advice and deliver the outcome as an `AdvisorEvent` over `tx`.
    ///
    /// The `generation` counter is attached to every emitted event so the
    /// receiver can discard events from superseded requests.
    pub async fn request_advice(
        &self,
        request: &AdviceRequest,
        tx: mpsc::Sender<AdvisorEvent>,
        generation: u64,
    ) -> anyhow::Result<()> {
        match self.fetch_advice(request).await {
            Ok(advice) => {
                let _ = tx.send(AdvisorEvent::Advice { advice, generation }).await;
            }
            Err(error) => {
                warn!(?error, "advice request failed");
                let _ = tx
                    .send(AdvisorEvent::Error {
                        message: format!("{error:#}"),
                        generation,
                    })
                    .await;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Advisor for GeminiClient {
    async fn advise(&self, request: &AdviceRequest) -> anyhow::Result<DraftAdvice> {
        self.fetch_advice(request).await
    }
}

// ---------------------------------------------------------------------------
// AdvisorClient wrapper
// ---------------------------------------------------------------------------

/// High-level wrapper that is either an active Gemini client or disabled.
pub enum AdvisorClient {
    /// Remote advice is configured and ready.
    Active(GeminiClient),
    /// Remote advice is off (no API key, or disabled in config).
    Disabled,
}

impl AdvisorClient {
    /// Build an `AdvisorClient` from the application config.
    ///
    /// Returns `Active` only when the advisor is enabled and an API key is
    /// present in credentials.
    pub fn from_config(config: &Config) -> Self {
        if !config.advisor.enabled {
            return AdvisorClient::Disabled;
        }
        match &config.credentials.gemini_api_key {
            Some(key) if !key.is_empty() => AdvisorClient::Active(
                GeminiClient::new(
                    key.clone(),
                    config.advisor.model.clone(),
                    config.league.num_teams,
                    config.league.my_slot,
                )
                .with_max_candidates(config.advisor.max_candidates),
            ),
            _ => AdvisorClient::Disabled,
        }
    }

    /// Request advice, delegating to the inner client or immediately sending
    /// an error event if disabled.
    pub async fn request_advice(
        &self,
        request: &AdviceRequest,
        tx: mpsc::Sender<AdvisorEvent>,
        generation: u64,
    ) -> anyhow::Result<()> {
        match self {
            AdvisorClient::Active(client) => client.request_advice(request, tx, generation).await,
            AdvisorClient::Disabled => {
                let _ = tx
                    .send(AdvisorEvent::Error {
                        message: "advisor not configured".to_string(),
                        generation,
                    })
                    .await;
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Response parsing helpers
// ---------------------------------------------------------------------------

/// Extract the first candidate's text from a generateContent response body.
///
/// Expected shape:
/// `{ "candidates": [ { "content": { "parts": [ { "text": "..." } ] } } ] }`
pub(crate) fn parse_candidate_text(data: &str) -> Option<String> {
    let v: Value = serde_json::from_str(data).ok()?;
    v.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(|s| s.to_string())
}

/// Strip a wrapping Markdown code fence, if present. Models sometimes wrap
/// JSON in ```json fences despite the response MIME type.
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim()
}

/// Parse candidate text into a normalized `DraftAdvice`.
pub(crate) fn parse_advice(text: &str) -> anyhow::Result<DraftAdvice> {
    let advice: DraftAdvice = serde_json::from_str(strip_code_fences(text))?;
    Ok(DraftAdvice {
        positional_analysis: advice.positional_analysis.normalized(),
        ..advice
    })
}

/// Pull a short error description out of an API error body, falling back to
/// a truncated raw body.
fn summarize_error_body(body: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body) {
        if let Some(message) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }
        if let Some(status) = v
            .get("error")
            .and_then(|e| e.get("status"))
            .and_then(|s| s.as_str())
        {
            return status.to_string();
        }
    }
    body.chars().take(200).collect()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
