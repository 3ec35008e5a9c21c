// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{
    AssistantClient, AssistantReply, AssistantRequest, FunctionCall, add_transaction_declaration,
};
use crate::config::AssistantConfig;
use crate::models::{ChatMessage, Part};
use crate::utils::http_client;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    function_declarations: Vec<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<ChatMessage>,
    system_instruction: SystemInstruction,
    tools: Vec<Tool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    function_call: Option<FunctionCall>,
}

impl GenerateContentResponse {
    /// Calls take precedence over any text in the same candidate.
    pub fn into_reply(self) -> AssistantReply {
        let parts = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();
        let mut calls = Vec::new();
        let mut text = String::new();
        for part in parts {
            if let Some(call) = part.function_call {
                calls.push(call);
            } else if let Some(t) = part.text {
                text.push_str(&t);
            }
        }
        if calls.is_empty() {
            AssistantReply::Text(text)
        } else {
            AssistantReply::Calls(calls)
        }
    }
}

pub fn request_body(request: &AssistantRequest) -> Result<Value> {
    let body = GenerateContentRequest {
        contents: request.contents(),
        system_instruction: SystemInstruction {
            parts: vec![Part {
                text: request.system_instruction.clone(),
            }],
        },
        tools: vec![Tool {
            function_declarations: vec![add_transaction_declaration()],
        }],
    };
    serde_json::to_value(body).context("Serialize assistant request")
}

pub fn parse_response(body: &str) -> Result<AssistantReply> {
    let resp: GenerateContentResponse =
        serde_json::from_str(body).context("Malformed assistant response")?;
    Ok(resp.into_reply())
}

pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    url: String,
}

impl GeminiClient {
    pub fn new(config: &AssistantConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            anyhow!(
                "No assistant API key configured; run `hamster config set-key <KEY>` or set GEMINI_API_KEY"
            )
        })?;
        let url = format!(
            "{}/models/{}:generateContent",
            config.endpoint.trim_end_matches('/'),
            config.model
        );
        Ok(Self {
            http: http_client(Duration::from_secs(config.timeout_secs))?,
            api_key,
            url,
        })
    }
}

impl AssistantClient for GeminiClient {
    fn generate(&self, request: &AssistantRequest) -> Result<AssistantReply> {
        let body = request_body(request)?;
        log::debug!("POST {}", self.url);
        let resp = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .context("Assistant request failed")?
            .error_for_status()
            .context("Assistant service returned an error")?;
        let text = resp.text().context("Read assistant response")?;
        parse_response(&text)
    }
}
