//! Contract behaviour against both reference ledgers.
//!
//! Every scenario runs once over `MemoryLedger` and once over an on-disk
//! `SqliteLedger`, so the two backends are held to the same contract.

use fundledger::core::seed_records;
use fundledger::store::{Ledger, MemoryLedger, SqliteLedger};
use fundledger::{ContractConfig, ContractError, FundContract, FundRecord, TxContext};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn tech_fund() -> FundRecord {
    FundRecord::new("FUND9", "Tech Fund", "Dana", 1500.50, 15.0, 6)
}

async fn create_then_read(ledger: &dyn Ledger) {
    let ctx = TxContext::new("tx-create", ledger);
    let contract = FundContract::default();

    contract.create(&ctx, &tech_fund()).await.unwrap();

    let stored = contract.read(&ctx, "FUND9").await.unwrap();
    assert_eq!(stored.fund_id, "FUND9");
    assert_eq!(stored.name, "Tech Fund");
    assert_eq!(stored.investor, "Dana");
    assert_eq!(stored.amount, 1500.50);
    assert_eq!(stored.return_rate, 15.0);
    assert_eq!(stored.duration, 6);
}

async fn create_overwrites(ledger: &dyn Ledger) {
    let ctx = TxContext::new("tx-overwrite", ledger);
    let contract = FundContract::default();

    let first = FundRecord::new("F1", "Alpha", "Erin", 100.0, 1.0, 1);
    let second = FundRecord::new("F1", "Beta", "Frank", 200.25, 2.5, 2);
    contract.create(&ctx, &first).await.unwrap();
    contract.create(&ctx, &second).await.unwrap();

    assert_eq!(contract.read(&ctx, "F1").await.unwrap(), second);
}

async fn update_requires_existing(ledger: &dyn Ledger) {
    let ctx = TxContext::new("tx-update", ledger);
    let contract = FundContract::default();

    let err = contract.update(&ctx, &tech_fund()).await.unwrap_err();
    assert!(matches!(err, ContractError::NotFound { ref id } if id == "FUND9"));
    assert!(contract.list_all(&ctx).await.unwrap().is_empty());

    contract.create(&ctx, &tech_fund()).await.unwrap();
    let revised = FundRecord::new("FUND9", "Tech Fund II", "Dana", 1750.0, 14.25, 9);
    contract.update(&ctx, &revised).await.unwrap();
    assert_eq!(contract.read(&ctx, "FUND9").await.unwrap(), revised);
}

async fn delete_semantics(ledger: &dyn Ledger) {
    let ctx = TxContext::new("tx-delete", ledger);
    let contract = FundContract::default();

    // Absent ids delete cleanly.
    contract.delete(&ctx, "FUND404").await.unwrap();

    contract.create(&ctx, &tech_fund()).await.unwrap();
    contract.delete(&ctx, "FUND9").await.unwrap();

    let err = contract.read(&ctx, "FUND9").await.unwrap_err();
    assert!(err.is_not_found());

    contract.delete(&ctx, "FUND9").await.unwrap();
}

async fn seed_then_list(ledger: &dyn Ledger) {
    let ctx = TxContext::new("tx-seed", ledger);
    let contract = FundContract::default();

    contract.seed(&ctx).await.unwrap();

    let mut listed = contract.list_all(&ctx).await.unwrap();
    listed.sort_by(|a, b| a.fund_id.cmp(&b.fund_id));
    assert_eq!(listed, seed_records());
}

async fn list_follows_key_order(ledger: &dyn Ledger) {
    let ctx = TxContext::new("tx-order", ledger);
    let contract = FundContract::default();

    for id in ["FUND3", "FUND10", "FUND1", "FUND2"] {
        let record = FundRecord::new(id, "Fund", "Gail", 1.0, 1.0, 1);
        contract.create(&ctx, &record).await.unwrap();
    }

    let ids: Vec<String> = contract
        .list_all(&ctx)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.fund_id)
        .collect();
    assert_eq!(ids, vec!["FUND1", "FUND10", "FUND2", "FUND3"]);
}

async fn prefix_scan_covers_every_prefixed_key(ledger: &dyn Ledger) {
    let ctx = TxContext::new("tx-prefix", ledger);
    let contract = FundContract::new(ContractConfig::default().with_scan_prefix("FUND"));

    for id in ["FUNE1", "FUND\u{10FFFF}x", "FUNC1", "FUND1"] {
        let record = FundRecord::new(id, "Fund", "Hal", 1.0, 1.0, 1);
        contract.create(&ctx, &record).await.unwrap();
    }

    let ids: Vec<String> = contract
        .list_all(&ctx)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.fund_id)
        .collect();
    assert_eq!(ids, vec!["FUND1", "FUND\u{10FFFF}x"]);
}

async fn float_layout_survives_storage(ledger: &dyn Ledger) {
    let ctx = TxContext::new("tx-floats", ledger);
    let contract = FundContract::default();

    let record = FundRecord::new("FUND5", "Edge Fund", "Ida", -0.0, 0.000005, 3);
    contract.create(&ctx, &record).await.unwrap();

    let raw = ledger.get_state("FUND5").await.unwrap().unwrap();
    assert_eq!(
        &raw[..],
        br#"{"fundId":"FUND5","name":"Edge Fund","investor":"Ida","amount":-0,"returnRate":0.000005,"duration":3}"#
    );

    let stored = contract.read(&ctx, "FUND5").await.unwrap();
    assert!(stored.amount.is_sign_negative());
    assert_eq!(stored.return_rate, 0.000005);
}

macro_rules! ledger_tests {
    ($($name:ident),* $(,)?) => {
        mod memory {
            use super::*;
            $(
                #[tokio::test]
                async fn $name() {
                    init_tracing();
                    let ledger = MemoryLedger::new();
                    super::$name(&ledger).await;
                    assert_eq!(ledger.open_iterators(), 0);
                }
            )*
        }

        mod sqlite {
            use super::*;
            $(
                #[tokio::test]
                async fn $name() {
                    init_tracing();
                    let dir = tempfile::tempdir().unwrap();
                    let ledger = SqliteLedger::open(dir.path().join("ledger.db")).unwrap();
                    super::$name(&ledger).await;
                    assert_eq!(ledger.open_iterators(), 0);
                }
            )*
        }
    };
}

ledger_tests!(
    create_then_read,
    create_overwrites,
    update_requires_existing,
    delete_semantics,
    seed_then_list,
    list_follows_key_order,
    prefix_scan_covers_every_prefixed_key,
    float_layout_survives_storage,
);

#[tokio::test]
async fn sqlite_records_survive_reopen() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    let contract = FundContract::default();

    {
        let ledger = SqliteLedger::open(&path).unwrap();
        let ctx = TxContext::new("tx-write", &ledger);
        contract.seed(&ctx).await.unwrap();
    }

    let ledger = SqliteLedger::open(&path).unwrap();
    let ctx = TxContext::new("tx-read", &ledger);
    assert_eq!(contract.list_all(&ctx).await.unwrap(), seed_records());
}
