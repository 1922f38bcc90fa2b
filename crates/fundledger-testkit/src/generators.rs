//! Proptest generators for property-based testing.

use std::collections::BTreeMap;

use proptest::prelude::*;

use fundledger_core::FundRecord;

/// Generate a non-empty fund id.
pub fn fund_id() -> impl Strategy<Value = String> {
    prop_oneof![
        "FUND[0-9]{1,4}".prop_map(String::from),
        "\\PC{1,16}".prop_map(String::from),
    ]
}

/// Generate free text for names, including quotes and non-ASCII.
pub fn text() -> impl Strategy<Value = String> {
    any::<String>()
}

/// Generate a finite float across the whole magnitude range.
pub fn finite_f64() -> impl Strategy<Value = f64> {
    prop::num::f64::POSITIVE
        | prop::num::f64::NEGATIVE
        | prop::num::f64::NORMAL
        | prop::num::f64::SUBNORMAL
        | prop::num::f64::ZERO
}

/// Generate a realistic invested amount (two decimal places).
pub fn amount() -> impl Strategy<Value = f64> {
    (0i64..1_000_000_000).prop_map(|cents| cents as f64 / 100.0)
}

/// Generate a record with arbitrary field values.
pub fn fund_record() -> impl Strategy<Value = FundRecord> {
    (fund_id(), text(), text(), finite_f64(), finite_f64(), any::<i64>()).prop_map(
        |(fund_id, name, investor, amount, return_rate, duration)| FundRecord {
            fund_id,
            name,
            investor,
            amount,
            return_rate,
            duration,
        },
    )
}

/// Generate a record with values a real caller would send.
pub fn realistic_fund_record() -> impl Strategy<Value = FundRecord> {
    (
        "FUND[0-9]{1,4}",
        "[A-Z][a-z]{2,12}( [A-Z][a-z]{2,12}){0,2} Fund",
        "[A-Z][a-z]{2,10}",
        amount(),
        0.0f64..25.0,
        1i64..=360,
    )
        .prop_map(|(fund_id, name, investor, amount, return_rate, duration)| {
            FundRecord::new(fund_id, name, investor, amount, return_rate, duration)
        })
}

/// Generate up to `max` records with distinct ids, ordered by id.
pub fn fund_records(max: usize) -> impl Strategy<Value = Vec<FundRecord>> {
    prop::collection::btree_map(fund_id(), fund_record(), 0..=max).prop_map(
        |by_id: BTreeMap<String, FundRecord>| {
            by_id
                .into_iter()
                .map(|(id, mut record)| {
                    record.fund_id = id;
                    record
                })
                .collect()
        },
    )
}
