//! Ethereum JSON-RPC reader using `eth_call`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use num_bigint::BigUint;
use serde::Deserialize;

use super::ContractStateReader;
use crate::domain::Address;
use crate::error::IndexerError;

/// Selector of `totalSupply()`.
pub const TOTAL_SUPPLY_SELECTOR: &str = "0x18160ddd";

/// Selector of `totalAssets()`.
pub const TOTAL_ASSETS_SELECTOR: &str = "0x01e1d114";

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// [`ContractStateReader`] backed by a JSON-RPC node.
///
/// Every read is a single `eth_call` at block tag `latest`. No retries.
#[derive(Debug, Clone)]
pub struct RpcStateReader {
    client: reqwest::Client,
    url: String,
    next_id: Arc<AtomicU64>,
}

impl RpcStateReader {
    /// Creates a reader for the node at `url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::Internal`] if the HTTP client cannot be
    /// built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, IndexerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IndexerError::Internal(format!("rpc client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Returns the node URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call_uint(&self, contract: Address, selector: &str) -> Result<BigUint, IndexerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "eth_call",
            "params": [
                { "to": contract.to_string(), "data": selector },
                "latest"
            ],
        });

        tracing::debug!(%contract, selector, "eth_call");

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| IndexerError::ContractRead(format!("{selector} on {contract}: {e}")))?
            .json::<RpcResponse>()
            .await
            .map_err(|e| IndexerError::ContractRead(format!("{selector} on {contract}: {e}")))?;

        if let Some(err) = response.error {
            return Err(IndexerError::ContractRead(format!(
                "{selector} on {contract}: rpc error {}: {}",
                err.code, err.message
            )));
        }
        let result = response.result.ok_or_else(|| {
            IndexerError::ContractRead(format!("{selector} on {contract}: missing result"))
        })?;

        decode_uint256(&result)
            .map_err(|reason| IndexerError::ContractRead(format!("{selector} on {contract}: {reason}")))
    }
}

impl ContractStateReader for RpcStateReader {
    async fn total_supply(&self, contract: Address) -> Result<BigUint, IndexerError> {
        self.call_uint(contract, TOTAL_SUPPLY_SELECTOR).await
    }

    async fn total_assets(&self, contract: Address) -> Result<BigUint, IndexerError> {
        self.call_uint(contract, TOTAL_ASSETS_SELECTOR).await
    }
}

/// Decodes the first 32-byte ABI word of an `eth_call` result.
///
/// An empty result (`0x`) means the call hit an address without code or a
/// function the contract does not implement.
fn decode_uint256(result: &str) -> Result<BigUint, String> {
    let digits = result.strip_prefix("0x").unwrap_or(result);
    if digits.is_empty() {
        return Err("empty result".to_string());
    }
    let bytes = hex::decode(digits).map_err(|e| format!("invalid hex result: {e}"))?;
    let word = bytes
        .get(..32)
        .ok_or_else(|| format!("result too short: {} bytes", bytes.len()))?;
    Ok(BigUint::from_bytes_be(word))
}
