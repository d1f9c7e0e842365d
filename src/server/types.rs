//! Request and response bodies for the vault API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::vault::Secrets;

#[derive(Deserialize)]
pub struct VaultAccessRequest {
    pub password: String,
}

#[derive(Deserialize)]
pub struct SaveRequest {
    pub password: String,
    pub secrets: Secrets,
}

#[derive(Deserialize)]
pub struct UpdateRequest {
    pub password: String,
    pub key: String,
    pub value: Value,
}

#[derive(Deserialize)]
pub struct DeleteRequest {
    pub password: String,
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnlockResponse {
    pub success: bool,
    pub secrets: Secrets,
    pub last_updated: Option<DateTime<Utc>>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Returned by both update and delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetResponse {
    pub success: bool,
    pub key: String,
    pub value: Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub vault_exists: bool,
    pub salt_exists: bool,
    pub vault_size_bytes: u64,
    pub vault_encrypted: bool,
    pub endpoint: String,
    pub available_operations: Vec<String>,
}
