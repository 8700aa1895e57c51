use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ChatFailure;
use crate::model::Message;
use crate::providers;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const MAX_TOKENS: u32 = 150;

pub type AskFuture<'a> = Pin<Box<dyn Future<Output = String> + 'a>>;

/// Anything that can turn a question into a printable answer.
pub trait Assistant {
    fn ask<'a>(&'a self, question: &'a str) -> AskFuture<'a>;
}

pub type ChatFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ChatFailure>> + 'a>>;

pub trait ChatBackend {
    fn chat<'a>(&'a self, messages: &'a [Message], max_tokens: u32) -> ChatFuture<'a>;
}

pub struct OpenAiBackend<'a> {
    client: &'a Client,
    cfg: &'a Config,
}

impl<'a> OpenAiBackend<'a> {
    pub fn new(client: &'a Client, cfg: &'a Config) -> Self {
        Self { client, cfg }
    }
}

impl ChatBackend for OpenAiBackend<'_> {
    fn chat<'a>(&'a self, messages: &'a [Message], max_tokens: u32) -> ChatFuture<'a> {
        Box::pin(providers::openai::chat(
            self.client,
            self.cfg,
            messages,
            max_tokens,
        ))
    }
}

pub struct AssistantClient<B> {
    backend: B,
}

impl<'a> AssistantClient<OpenAiBackend<'a>> {
    pub fn new(client: &'a Client, cfg: &'a Config) -> Self {
        Self::with_backend(OpenAiBackend::new(client, cfg))
    }
}

impl<B> AssistantClient<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }
}

impl<B> AssistantClient<B>
where
    B: ChatBackend,
{
    /// Asks a single-turn question. Failures are folded into the returned text.
    pub async fn ask(&self, question: &str) -> String {
        let messages = [Message::system(SYSTEM_PROMPT), Message::user(question)];

        match self.backend.chat(&messages, MAX_TOKENS).await {
            Ok(content) => {
                let answer = content.trim();
                debug!(answer_len = answer.len(), "assistant answered");
                answer.to_string()
            }
            Err(failure) => {
                warn!(kind = failure.kind(), error = %failure, "assistant request failed");
                failure.to_string()
            }
        }
    }
}

impl<B> Assistant for AssistantClient<B>
where
    B: ChatBackend,
{
    fn ask<'a>(&'a self, question: &'a str) -> AskFuture<'a> {
        Box::pin(AssistantClient::ask(self, question))
    }
}
