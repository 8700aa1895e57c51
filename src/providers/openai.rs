//! OpenAI `chat/completions` provider.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ChatFailure;
use crate::model::Message;
use crate::providers::http_errors::{request_failure, status_failure};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

fn chat_completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn to_openai_messages(messages: &[Message]) -> Vec<ChatMessage<'_>> {
    messages
        .iter()
        .map(|msg| ChatMessage {
            role: msg.role.as_str(),
            content: &msg.content,
        })
        .collect()
}

/// Sends one chat completion request and returns the first choice's raw content.
pub async fn chat(
    client: &Client,
    cfg: &Config,
    messages: &[Message],
    max_tokens: u32,
) -> Result<String, ChatFailure> {
    let Some(api_key) = cfg.api_key.as_deref().filter(|key| !key.trim().is_empty()) else {
        warn!("OPENAI_API_KEY is not set; skipping model request");
        return Err(ChatFailure::Authentication);
    };

    let api_url = chat_completions_url(&cfg.model_base_url);
    let body = ChatCompletionRequest {
        model: &cfg.model,
        messages: to_openai_messages(messages),
        max_tokens,
    };
    debug!(
        api_url = %api_url,
        model = %cfg.model,
        message_count = messages.len(),
        max_tokens,
        "sending openai chat request"
    );

    let response = client
        .post(&api_url)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await
        .map_err(|err| {
            warn!(
                api_url = %api_url,
                model = %cfg.model,
                error = %err,
                "openai request failed"
            );
            request_failure(&err)
        })?;

    let status = response.status();
    let response_body = response.text().await.map_err(|err| {
        warn!(
            api_url = %api_url,
            model = %cfg.model,
            status = %status,
            error = %err,
            "failed to read openai response body"
        );
        request_failure(&err)
    })?;

    if !status.is_success() {
        warn!(
            api_url = %api_url,
            model = %cfg.model,
            status = %status,
            response_body_len = response_body.len(),
            "openai returned non-success status"
        );
        return Err(status_failure(status, &response_body));
    }

    let parsed: ChatCompletionResponse = serde_json::from_str(&response_body).map_err(|err| {
        ChatFailure::unclassified(format!("Failed to parse model chat response: {err}"))
    })?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ChatFailure::unclassified("model response contained no choices"))?
        .message
        .content
        .ok_or_else(|| ChatFailure::unclassified("model response message had no content"))?;

    debug!(
        model = %cfg.model,
        response_len = content.len(),
        "received openai chat response"
    );
    Ok(content)
}
