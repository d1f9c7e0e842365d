//! Axum handlers for the vault API.
//!
//! Key derivation and file I/O block, so every operation that touches
//! the vault runs on tokio's blocking pool.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::errors::Result;
use crate::server::error::{ApiError, ApiResult};
use crate::server::types::{
    DeleteRequest, GetResponse, MutationResponse, SaveRequest, SaveResponse, StatusResponse,
    UnlockResponse, UpdateRequest, VaultAccessRequest,
};
use crate::server::AppState;
use crate::vault::{ops, VaultStore};

/// Run a vault operation on the blocking pool and translate its error.
async fn run_blocking<T, F>(
    state: &AppState,
    operation: &'static str,
    f: F,
) -> std::result::Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&VaultStore) -> Result<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    let joined = tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| ApiError::internal(format!("{operation} error: task failed: {e}")))?;

    joined.map_err(|err| {
        let api = ApiError::from_vault(&err, operation);
        if api.code == 401 {
            tracing::warn!(operation, "vault authentication failed");
        } else if api.code >= 500 {
            tracing::error!(operation, error = %err, "vault operation failed");
        }
        api
    })
}

/// `POST /unlock`
pub async fn unlock(
    State(state): State<AppState>,
    Json(req): Json<VaultAccessRequest>,
) -> ApiResult<UnlockResponse> {
    let unlocked = run_blocking(&state, "Vault access", move |store| {
        ops::unlock(store, &req.password)
    })
    .await?;

    Ok(Json(UnlockResponse {
        success: true,
        secrets: unlocked.secrets,
        last_updated: unlocked.last_updated,
        count: unlocked.count,
    }))
}

/// `POST /save` — overwrites everything.
pub async fn save(
    State(state): State<AppState>,
    Json(req): Json<SaveRequest>,
) -> ApiResult<SaveResponse> {
    let saved = run_blocking(&state, "Save", move |store| {
        ops::save_all(store, &req.password, req.secrets)
    })
    .await?;

    Ok(Json(SaveResponse {
        success: true,
        message: "Secrets saved successfully".to_string(),
        count: saved.count,
        timestamp: saved.timestamp,
    }))
}

/// `POST /update`
pub async fn update(
    State(state): State<AppState>,
    Json(req): Json<UpdateRequest>,
) -> ApiResult<MutationResponse> {
    let key = req.key.clone();
    let timestamp = run_blocking(&state, "Update", move |store| {
        ops::update(store, &req.password, &req.key, req.value)
    })
    .await?;

    Ok(Json(MutationResponse {
        success: true,
        message: format!("Secret '{key}' updated successfully"),
        timestamp,
    }))
}

/// `POST /delete`
pub async fn delete(
    State(state): State<AppState>,
    Json(req): Json<DeleteRequest>,
) -> ApiResult<MutationResponse> {
    let key = req.key.clone();
    let timestamp = run_blocking(&state, "Delete", move |store| {
        ops::delete(store, &req.password, &req.key)
    })
    .await?;

    Ok(Json(MutationResponse {
        success: true,
        message: format!("Secret '{key}' deleted successfully"),
        timestamp,
    }))
}

/// `POST /get/{key}`
pub async fn get(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<VaultAccessRequest>,
) -> ApiResult<GetResponse> {
    let fetched = run_blocking(&state, "Get", move |store| {
        ops::get(store, &req.password, &key)
    })
    .await?;

    Ok(Json(GetResponse {
        success: true,
        key: fetched.key,
        value: fetched.value,
        timestamp: fetched.timestamp,
    }))
}

/// `GET /status` — no password, no decryption.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let status = ops::status(&state.store);

    Json(StatusResponse {
        vault_exists: status.vault_exists,
        salt_exists: status.salt_exists,
        vault_size_bytes: status.vault_size_bytes,
        vault_encrypted: status.vault_encrypted,
        endpoint: state.endpoint.clone(),
        available_operations: available_operations(),
    })
}

fn available_operations() -> Vec<String> {
    [
        "POST /unlock - Decrypt and view all secrets",
        "POST /save - Save all secrets (overwrites)",
        "POST /update - Update single secret",
        "POST /delete - Delete single secret",
        "POST /get/{key} - Get specific secret",
        "GET /status - This status endpoint",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}
