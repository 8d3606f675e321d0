//! Per-event records for every supported event of both contracts.

#![allow(clippy::panic)]

mod common;

use common::{SVSN, VSN, account, envelope, reader, service, tx_hash};
use vsn_indexer::domain::{Deployment, EntityKey, RawEvent};
use vsn_indexer::error::IndexerError;
use vsn_indexer::persistence::EntityStore;

fn role() -> String {
    tx_hash(0x77)
}

fn shared_params(event: &str) -> Option<serde_json::Value> {
    let params = match event {
        "Approval" => serde_json::json!({ "owner": account(1), "spender": account(2), "amount": "1" }),
        "Transfer" => serde_json::json!({ "from": account(1), "to": account(2), "amount": "1" }),
        "Paused" | "Unpaused" => serde_json::json!({ "account": account(1) }),
        "RoleAdminChanged" => serde_json::json!({
            "role": role(), "previousAdminRole": role(), "newAdminRole": role()
        }),
        "RoleGranted" | "RoleRevoked" => serde_json::json!({
            "role": role(), "account": account(1), "sender": account(2)
        }),
        _ => return None,
    };
    Some(params)
}

fn vsn_params(event: &str) -> serde_json::Value {
    if let Some(params) = shared_params(event) {
        return params;
    }
    match event {
        "Mint" => common::mint_params(5),
        "Burn" => common::burn_params(5),
        "EIP712DomainChanged" => serde_json::json!({}),
        "Initialized" => serde_json::json!({ "version": "1" }),
        "Upgraded" => serde_json::json!({ "implementation": account(9) }),
        other => panic!("no fixture for VSN event {other}"),
    }
}

fn svsn_params(event: &str) -> serde_json::Value {
    if let Some(params) = shared_params(event) {
        return params;
    }
    match event {
        "AssetsClaimed" => serde_json::json!({ "owner": account(1), "receiver": account(2), "assets": "3" }),
        "BpsYieldCapPerSecondUpdated" => serde_json::json!({
            "previousBpsYieldCapPerSecond": "1", "newBpsYieldCapPerSecond": "2"
        }),
        "CooldownDurationUpdated" | "MaximumRewardsCycleDurationUpdated" => {
            serde_json::json!({ "previousDuration": "60", "newDuration": "120" })
        }
        "CooldownStarted" => serde_json::json!({
            "owner": account(1), "assets": "3", "shares": "3", "cooldownEnd": "1700000600"
        }),
        "Deposit" => serde_json::json!({
            "caller": account(1), "owner": account(1), "assets": "3", "shares": "3"
        }),
        "DistributeRewards" => serde_json::json!({ "rewards": "3" }),
        "RewardsCycleCreated" => serde_json::json!({
            "rewardsCycleAmount": "3",
            "rewardsCycleEndTimestamp": "1700086400",
            "newBpsYieldCapPerSecond": "2"
        }),
        "Withdraw" => serde_json::json!({
            "caller": account(1), "receiver": account(2), "owner": account(1),
            "assets": "3", "shares": "3"
        }),
        "WithdrawSurplus" => serde_json::json!({ "receiver": account(2), "surplus": "3" }),
        other => panic!("no fixture for sVSN event {other}"),
    }
}

fn event_id(tx: u8, log_index: u32) -> String {
    format!("{}{}", tx_hash(tx), hex_le(log_index))
}

fn hex_le(log_index: u32) -> String {
    log_index
        .to_le_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[tokio::test]
async fn single_approval_produces_one_record() {
    let svc = service(reader(0, 0));
    let approval = envelope(
        VSN,
        1,
        0xa1,
        1,
        "Approval",
        serde_json::json!({ "owner": account(1), "spender": account(1), "amount": "234" }),
    );
    assert!(svc.ingest(Deployment::Vsn, vec![approval]).await.is_ok());

    let store = svc.reducer().store();
    assert_eq!(store.len().await, 1);

    let id = event_id(0xa1, 1);
    assert!(id.ends_with("01000000"));
    let key = EntityKey::new(Deployment::Vsn, "Approval", id.clone());
    let Ok(Some(json)) = store.load(&key).await else {
        panic!("approval should be stored under {id}");
    };
    assert_eq!(json["id"], id);
    assert_eq!(json["amount"], "234");
    assert_eq!(json["owner"], account(1));
    assert_eq!(json["spender"], account(1));
    assert_eq!(json["transactionHash"], tx_hash(0xa1));
}

#[tokio::test]
async fn every_vsn_event_is_recorded() {
    let svc = service(reader(1_000, 0));
    let names = vsn_indexer::domain::VsnEvent::NAMES;
    let batch: Vec<RawEvent> = names
        .iter()
        .zip(0u32..)
        .map(|(name, i)| envelope(VSN, 1, 0x01, i, name, vsn_params(name)))
        .collect();

    let Ok(outcome) = svc.ingest(Deployment::Vsn, batch).await else {
        panic!("all VSN events should process");
    };
    assert_eq!(outcome.processed, names.len());

    let store = svc.reducer().store();
    for (name, i) in names.iter().zip(0u32..) {
        let key = EntityKey::new(Deployment::Vsn, *name, event_id(0x01, i));
        assert!(
            matches!(store.load(&key).await, Ok(Some(_))),
            "{name} record missing"
        );
    }
}

#[tokio::test]
async fn every_svsn_event_is_recorded() {
    let svc = service(reader(1_000, 1_000));
    let names = vsn_indexer::domain::SvsnEvent::NAMES;
    let batch: Vec<RawEvent> = names
        .iter()
        .zip(0u32..)
        .map(|(name, i)| envelope(SVSN, 1, 0x02, i, name, svsn_params(name)))
        .collect();

    let Ok(outcome) = svc.ingest(Deployment::Svsn, batch).await else {
        panic!("all sVSN events should process");
    };
    assert_eq!(outcome.processed, names.len());

    let store = svc.reducer().store();
    for (name, i) in names.iter().zip(0u32..) {
        let key = EntityKey::new(Deployment::Svsn, *name, event_id(0x02, i));
        assert!(
            matches!(store.load(&key).await, Ok(Some(_))),
            "{name} record missing"
        );
    }
}

#[tokio::test]
async fn same_name_in_both_deployments_does_not_collide() {
    let svc = service(reader(0, 0));
    let params = shared_params("Transfer").unwrap_or_default();
    assert!(
        svc.ingest(
            Deployment::Vsn,
            vec![envelope(VSN, 1, 0x05, 0, "Transfer", params.clone())]
        )
        .await
        .is_ok()
    );
    assert!(
        svc.ingest(
            Deployment::Svsn,
            vec![envelope(SVSN, 1, 0x05, 0, "Transfer", params)]
        )
        .await
        .is_ok()
    );

    let store = svc.reducer().store();
    assert!(matches!(store.count(Deployment::Vsn, "Transfer").await, Ok(1)));
    assert!(matches!(store.count(Deployment::Svsn, "Transfer").await, Ok(1)));
}

#[tokio::test]
async fn malformed_events_write_nothing() {
    let svc = service(reader(0, 0));
    let cases = vec![
        envelope(VSN, 1, 0x01, 0, "Rebase", serde_json::json!({})),
        envelope(
            VSN,
            1,
            0x01,
            0,
            "Burn",
            serde_json::json!({ "burner": account(1), "amount": "5", "memo": "x" }),
        ),
        envelope(
            VSN,
            1,
            0x01,
            0,
            "Burn",
            serde_json::json!({ "burner": account(1) }),
        ),
        envelope(
            VSN,
            1,
            0x01,
            0,
            "Burn",
            serde_json::json!({ "burner": account(1), "amount": "-5" }),
        ),
    ];

    for raw in cases {
        let event = raw.event.clone();
        let result = svc.ingest(Deployment::Vsn, vec![raw]).await;
        assert!(
            matches!(result, Err(IndexerError::Decode(_))),
            "{event} should be rejected"
        );
    }
    assert!(svc.reducer().store().is_empty().await);
}

#[tokio::test]
async fn log_index_beyond_i32_is_rejected() {
    let svc = service(reader(0, 0));
    let mut raw = envelope(
        VSN,
        1,
        0x01,
        0,
        "Paused",
        serde_json::json!({ "account": account(1) }),
    );
    raw.log_index = num_bigint::BigUint::from(u32::MAX);

    let result = svc.ingest(Deployment::Vsn, vec![raw]).await;
    assert!(matches!(result, Err(IndexerError::Decode(_))));
}

#[tokio::test]
async fn foreign_emitter_is_rejected() {
    let svc = service(reader(0, 0));
    let raw = envelope(
        &account(0xee),
        1,
        0x01,
        0,
        "Paused",
        serde_json::json!({ "account": account(1) }),
    );
    let result = svc.ingest(Deployment::Vsn, vec![raw]).await;
    assert!(matches!(result, Err(IndexerError::ContractMismatch { .. })));
    assert!(svc.reducer().store().is_empty().await);
}
