// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chat-driven transaction entry.
//!
//! The assistant sees the whole conversation plus one callable action,
//! `addTransaction`. When it calls that action the arguments are checked and
//! turned into a [`TransactionInput`] before anything touches the ledger.

pub mod gemini;

use crate::error::{ChatError, ExtractionError};
use crate::models::{ChatMessage, Transaction, TransactionInput, TransactionType};
use crate::store::LedgerStore;
use crate::utils::fmt_amount;
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

pub const ADD_TRANSACTION: &str = "addTransaction";
pub const GREETING: &str = "안녕하세요! 오늘 얼마를 벌고 쓰셨나요? 🐹✨";
pub const FALLBACK_REPLY: &str = "죄송해요, 다시 말씀해 주시겠어요?";
pub const FAILURE_REPLY: &str = "앗, 오류가 발생했어요. 🐹💦";
pub const DEFAULT_CATEGORY: &str = "기타";
pub const DEFAULT_DESCRIPTION: &str = "AI 비서의 기록";

const INSTRUCTION: &str = "당신은 '부자 햄스터' 가계부 비서입니다. 친절하고 정중한 말투를 사용하세요. \
사용자가 내역을 말하면 addTransaction 도구를 사용하여 기록하세요.";

pub fn system_instruction(today: NaiveDate) -> String {
    format!(
        "{} 오늘 날짜는 {}입니다.",
        INSTRUCTION,
        today.format("%Y-%m-%d")
    )
}

/// Schema of the single action offered to the assistant.
pub fn add_transaction_declaration() -> Value {
    json!({
        "name": ADD_TRANSACTION,
        "description": "가계부에 새로운 지출이나 수입 항목을 추가합니다.",
        "parameters": {
            "type": "OBJECT",
            "properties": {
                "type": {
                    "type": "STRING",
                    "description": "항목 유형: INCOME (수입) 또는 EXPENSE (지출)",
                    "enum": ["INCOME", "EXPENSE"]
                },
                "category": {
                    "type": "STRING",
                    "description": "카테고리 (월급, 보너스, 식비, 교통 등)"
                },
                "amount": {
                    "type": "NUMBER",
                    "description": "금액 (원)"
                },
                "description": {
                    "type": "STRING",
                    "description": "간단한 설명"
                },
                "date": {
                    "type": "STRING",
                    "description": "날짜 (YYYY-MM-DD)"
                }
            },
            "required": ["type", "category", "amount", "date"]
        }
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

/// What the assistant answered: plain text, or structured action calls.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantReply {
    Text(String),
    Calls(Vec<FunctionCall>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantRequest {
    /// Turns before `message`, oldest first.
    pub history: Vec<ChatMessage>,
    pub message: String,
    pub system_instruction: String,
}

impl AssistantRequest {
    pub fn contents(&self) -> Vec<ChatMessage> {
        let mut all = self.history.clone();
        all.push(ChatMessage::user(self.message.clone()));
        all
    }
}

pub trait AssistantClient {
    fn generate(&self, request: &AssistantRequest) -> Result<AssistantReply>;
}

/// Stands in for a client that could not be set up (no API key, bad settings).
/// Every request fails with the setup error, so the chat shows the usual
/// failure reply instead of aborting.
#[derive(Debug, Clone)]
pub struct UnavailableClient {
    reason: String,
}

impl UnavailableClient {
    pub fn new(err: &anyhow::Error) -> Self {
        Self {
            reason: format!("{:#}", err),
        }
    }
}

impl AssistantClient for UnavailableClient {
    fn generate(&self, _request: &AssistantRequest) -> Result<AssistantReply> {
        Err(anyhow::anyhow!("Assistant unavailable: {}", self.reason))
    }
}

fn non_empty_str(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        other => Some(other.to_string()),
    }
}

fn amount_from(v: Option<&Value>) -> Result<Decimal, ExtractionError> {
    match v {
        None | Some(Value::Null) => Ok(Decimal::ZERO),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(Decimal::from(i))
            } else {
                n.as_f64()
                    .and_then(|f| Decimal::try_from(f).ok())
                    .ok_or_else(|| ExtractionError::InvalidAmount(n.to_string()))
            }
        }
        Some(Value::String(s)) => {
            let cleaned = s.trim().trim_end_matches('원').replace(',', "");
            if cleaned.is_empty() {
                return Ok(Decimal::ZERO);
            }
            cleaned
                .trim()
                .parse::<Decimal>()
                .map_err(|_| ExtractionError::InvalidAmount(s.clone()))
        }
        Some(other) => Err(ExtractionError::InvalidAmount(other.to_string())),
    }
}

/// Turns `addTransaction` arguments into a transaction input.
///
/// Missing fields fall back to EXPENSE / "기타" / 0 / today / "AI 비서의 기록";
/// fields that are present but malformed are rejected.
pub fn extract_transaction(args: &Value, today: NaiveDate) -> Result<TransactionInput, ExtractionError> {
    let obj = args.as_object().ok_or(ExtractionError::NotAnObject)?;

    let r#type = match non_empty_str(obj.get("type")) {
        None => TransactionType::Expense,
        Some(s) => s
            .parse::<TransactionType>()
            .map_err(|_| ExtractionError::UnknownType(s))?,
    };
    let category = non_empty_str(obj.get("category")).unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let amount = amount_from(obj.get("amount"))?;
    let date = match non_empty_str(obj.get("date")) {
        None => today,
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| ExtractionError::InvalidDate(s))?,
    };
    let description =
        non_empty_str(obj.get("description")).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    let input = TransactionInput {
        date,
        r#type,
        category,
        amount,
        description,
    };
    input.validate()?;
    Ok(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Sending,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    pub reply: String,
    pub recorded: Option<Transaction>,
    /// `Success` or `Failure`; the session itself is back to `Idle`.
    pub status: ChatState,
}

/// One conversation. History is append-only and resent in full each time.
#[derive(Debug, Clone)]
pub struct ChatSession {
    history: Vec<ChatMessage>,
    state: ChatState,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            history: vec![ChatMessage::model(GREETING)],
            state: ChatState::Idle,
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    /// Moves to `Sending` and records the user turn. Only one send may be in flight.
    pub fn begin(&mut self, text: &str, today: NaiveDate) -> Result<AssistantRequest, ChatError> {
        if self.state == ChatState::Sending {
            return Err(ChatError::Busy);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let request = AssistantRequest {
            history: self.history.clone(),
            message: text.to_string(),
            system_instruction: system_instruction(today),
        };
        self.history.push(ChatMessage::user(text));
        self.state = ChatState::Sending;
        Ok(request)
    }

    /// Applies the service result. The ledger is written at most once, and only
    /// for a valid `addTransaction` call.
    pub fn finish(
        &mut self,
        store: &mut LedgerStore,
        result: Result<AssistantReply>,
        today: NaiveDate,
    ) -> ChatOutcome {
        let (reply, recorded, status) = match result {
            Err(e) => {
                log::warn!("Assistant request failed: {:#}", e);
                (FAILURE_REPLY.to_string(), None, ChatState::Failure)
            }
            Ok(AssistantReply::Text(t)) => {
                let t = if t.trim().is_empty() {
                    FALLBACK_REPLY.to_string()
                } else {
                    t
                };
                (t, None, ChatState::Success)
            }
            Ok(AssistantReply::Calls(calls)) => {
                match calls.iter().find(|c| c.name == ADD_TRANSACTION) {
                    None => (FALLBACK_REPLY.to_string(), None, ChatState::Success),
                    Some(call) => record_call(store, call, today),
                }
            }
        };
        self.history.push(ChatMessage::model(reply.clone()));
        log::debug!("Chat turn finished with {:?}", status);
        self.state = ChatState::Idle;
        ChatOutcome {
            reply,
            recorded,
            status,
        }
    }

    pub fn send(
        &mut self,
        client: &dyn AssistantClient,
        store: &mut LedgerStore,
        text: &str,
        today: NaiveDate,
    ) -> Result<ChatOutcome, ChatError> {
        let request = self.begin(text, today)?;
        log::debug!(
            "Sending chat message with {} prior turns",
            request.history.len()
        );
        let result = client.generate(&request);
        Ok(self.finish(store, result, today))
    }
}

fn record_call(
    store: &mut LedgerStore,
    call: &FunctionCall,
    today: NaiveDate,
) -> (String, Option<Transaction>, ChatState) {
    let input = match extract_transaction(&call.args, today) {
        Ok(input) => input,
        Err(e) => {
            log::warn!("Rejected {} call {}: {}", ADD_TRANSACTION, call.args, e);
            return (FAILURE_REPLY.to_string(), None, ChatState::Failure);
        }
    };
    match store.add_transaction(input) {
        Ok(tx) => {
            let reply = format!(
                "{} 내역으로 {}원을 기록했어요! 🐹💎",
                tx.category,
                fmt_amount(tx.amount)
            );
            (reply, Some(tx), ChatState::Success)
        }
        Err(e) => {
            log::warn!("Could not record assistant transaction: {:#}", e);
            (FAILURE_REPLY.to_string(), None, ChatState::Failure)
        }
    }
}
