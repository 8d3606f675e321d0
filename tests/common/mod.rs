//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use num_bigint::BigUint;
use vsn_indexer::app_state::AppState;
use vsn_indexer::chain::{ContractState, FixedStateReader, StateReader};
use vsn_indexer::domain::{Address, EventBus, RawEvent};
use vsn_indexer::persistence::{InMemoryStore, Store};
use vsn_indexer::reducer::Reducer;
use vsn_indexer::service::{IngestService, QueryService};

/// VSN token address used by every fixture.
pub const VSN: &str = "0x1234567890123456789012345678901234567890";

/// sVSN vault address used by every fixture.
pub const SVSN: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";

/// `0x00…0n` as an address string.
pub fn account(n: u8) -> String {
    format!("0x{}{n:02x}", "00".repeat(19))
}

/// A transaction hash made of one repeated byte.
pub fn tx_hash(byte: u8) -> String {
    format!("0x{}", format!("{byte:02x}").repeat(32))
}

/// Parses an address literal.
pub fn address(literal: &str) -> Address {
    let Ok(address) = literal.parse() else {
        panic!("bad address literal {literal}");
    };
    address
}

/// Builds an envelope for `event` at `(block, log_index)` in transaction
/// `tx`.
pub fn envelope(
    contract: &str,
    block: u64,
    tx: u8,
    log_index: u32,
    event: &str,
    params: serde_json::Value,
) -> RawEvent {
    let json = serde_json::json!({
        "address": contract,
        "block": { "number": block.to_string(), "timestamp": (1_700_000_000 + block * 12).to_string() },
        "transaction": { "hash": tx_hash(tx) },
        "logIndex": log_index.to_string(),
        "event": event,
        "params": params,
    });
    let Ok(raw) = serde_json::from_value::<RawEvent>(json) else {
        panic!("fixture envelope should parse");
    };
    raw
}

/// Mint params.
pub fn mint_params(amount: u64) -> serde_json::Value {
    serde_json::json!({ "minter": account(1), "to": account(2), "amount": amount.to_string() })
}

/// Burn params.
pub fn burn_params(amount: u64) -> serde_json::Value {
    serde_json::json!({ "burner": account(3), "amount": amount.to_string() })
}

/// A reader reporting the given totals for both fixture contracts.
pub fn reader(total_supply: u64, total_assets: u64) -> FixedStateReader {
    let state = ContractState {
        total_supply: BigUint::from(total_supply),
        total_assets: BigUint::from(total_assets),
    };
    FixedStateReader::new()
        .with_state(address(VSN), state.clone())
        .with_state(address(SVSN), state)
}

/// An ingest service over a fresh in-memory store.
pub fn service(reader: FixedStateReader) -> IngestService<InMemoryStore, FixedStateReader> {
    IngestService::new(
        Reducer::new(InMemoryStore::new(), reader),
        EventBus::new(1024),
        Some(address(VSN)),
        Some(address(SVSN)),
    )
}

/// Full application state over in-memory backends.
pub fn app_state(reader: FixedStateReader) -> AppState {
    let store = Store::Memory(InMemoryStore::new());
    let event_bus = EventBus::new(1024);
    let ingest = Arc::new(IngestService::new(
        Reducer::new(store.clone(), StateReader::Fixed(reader)),
        event_bus.clone(),
        Some(address(VSN)),
        Some(address(SVSN)),
    ));
    AppState {
        ingest,
        query: QueryService::new(store),
        event_bus,
    }
}
