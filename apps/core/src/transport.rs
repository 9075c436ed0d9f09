use serde::{Deserialize, Serialize};

use crate::contract::{UiCommand, UiUpdate};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    InvalidCommand,
    IndexOutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("invalid json: {0}")]
    InvalidJson(String),
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("result index {index} out of range ({len} results)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl TransportError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidJson(_) => ErrorCode::InvalidJson,
            Self::InvalidCommand(_) => ErrorCode::InvalidCommand,
            Self::IndexOutOfRange { .. } => ErrorCode::IndexOutOfRange,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { update: UiUpdate },
    Err { error: ErrorResponse },
}

pub fn parse_command(line: &str) -> Result<UiCommand, TransportError> {
    let value: serde_json::Value = serde_json::from_str(line.trim())
        .map_err(|error| TransportError::InvalidJson(error.to_string()))?;
    serde_json::from_value(value).map_err(|error| TransportError::InvalidCommand(error.to_string()))
}

pub fn encode_update(update: UiUpdate) -> String {
    encode(&TransportResponse::Ok { update })
}

pub fn encode_error(error: &TransportError) -> String {
    encode(&TransportResponse::Err {
        error: ErrorResponse {
            code: error.code(),
            message: error.to_string(),
        },
    })
}

fn encode(response: &TransportResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|error| {
        format!(
            "{{\"status\":\"err\",\"error\":{{\"code\":\"invalid_json\",\"message\":{}}}}}",
            serde_json::Value::String(error.to_string())
        )
    })
}
