//! OpenAI-compatible review analyst
//!
//! One chat completion per analysis, with a strict JSON-schema response
//! format so the endpoint can only return a list of comments matching the
//! review schema. Anything else is an error.

use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use vigil_core::config::LlmConfig;
use vigil_core::{Comment, ReviewAnalyst};

/// Fixed instruction set for the reviewer
const SYSTEM_PROMPT: &str = "You are a strict senior code reviewer. \
Analyze the git diff provided below for:\n\
1. Security vulnerabilities (SQL injection, XSS, leaked secrets) - severity: critical\n\
2. Logic bugs and race conditions - severity: major\n\
3. Performance bottlenecks - severity: major\n\
4. Code style and best practices - severity: minor or nitpick\n\n\
Output a structured list of comments. Only comment on changed lines.\n\
If the code looks good, return an empty list.";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: &'static str,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Wrapper schema so the endpoint returns a list of comments
#[derive(Debug, Deserialize)]
struct ReviewResponse {
    #[serde(default)]
    comments: Vec<Comment>,
}

/// JSON schema for [`ReviewResponse`]
fn review_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "comments": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "file_path": { "type": "string" },
                        "line_number": { "type": "integer" },
                        "body": { "type": "string" },
                        "severity": {
                            "type": "string",
                            "enum": ["critical", "major", "minor", "nitpick"]
                        }
                    },
                    "required": ["file_path", "line_number", "body", "severity"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["comments"],
        "additionalProperties": false
    })
}

/// Review analyst backed by an OpenAI-compatible chat-completions endpoint
pub struct OpenAiAnalyst {
    client: reqwest::Client,
    config: LlmConfig,
    api_key: Option<String>,
}

impl OpenAiAnalyst {
    /// Create a new analyst
    ///
    /// A missing API key is not an error until an analysis is attempted,
    /// so read-only workflows (approval, inspection) work without one.
    pub fn new(config: LlmConfig, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("vigil/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn build_request<'a>(&'a self, repo: &str, diff: &str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("Repository: {}\nDiff:\n{}", repo, diff),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: "review_response",
                    strict: true,
                    schema: review_schema(),
                },
            },
        }
    }

    /// Analyze a diff and return the identified issues
    pub async fn analyze_diff(&self, repo: &str, diff: &str) -> Result<Vec<Comment>> {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let request = self.build_request(repo, diff);

        debug!(model = %self.config.model, repo, "Requesting diff analysis");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(Error::EmptyResponse)?;

        let parsed: ReviewResponse = serde_json::from_str(&content)
            .map_err(|e| Error::UnexpectedResponse(e.to_string()))?;

        info!(
            repo,
            count = parsed.comments.len(),
            "Diff analysis complete"
        );

        Ok(parsed.comments)
    }
}

#[async_trait]
impl ReviewAnalyst for OpenAiAnalyst {
    async fn analyze(&self, repo: &str, diff: &str) -> vigil_core::Result<Vec<Comment>> {
        self.analyze_diff(repo, diff)
            .await
            .map_err(|e| vigil_core::Error::Analysis(e.to_string()))
    }
}
