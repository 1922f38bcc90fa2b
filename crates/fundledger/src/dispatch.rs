//! Name-based invocation of contract functions.
//!
//! External callers address the contract by function name and pass every
//! argument as a string. This module parses those arguments into typed
//! values, runs the matching operation, and renders the result as a JSON
//! payload.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;

use fundledger_core::{encode_record, encode_records, FundRecord};

use crate::context::TxContext;
use crate::contract::FundContract;
use crate::error::{ContractError, Result};

/// The functions a caller can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    InitLedger,
    AddMutualFund,
    QueryMutualFund,
    UpdateMutualFund,
    DeleteMutualFund,
    QueryAllMutualFunds,
}

impl Function {
    /// Every function, in declaration order.
    pub const ALL: [Function; 6] = [
        Function::InitLedger,
        Function::AddMutualFund,
        Function::QueryMutualFund,
        Function::UpdateMutualFund,
        Function::DeleteMutualFund,
        Function::QueryAllMutualFunds,
    ];

    /// The name callers use for this function.
    pub fn name(&self) -> &'static str {
        match self {
            Function::InitLedger => "InitLedger",
            Function::AddMutualFund => "AddMutualFund",
            Function::QueryMutualFund => "QueryMutualFund",
            Function::UpdateMutualFund => "UpdateMutualFund",
            Function::DeleteMutualFund => "DeleteMutualFund",
            Function::QueryAllMutualFunds => "QueryAllMutualFunds",
        }
    }

    /// Number of string arguments the function takes.
    pub fn arity(&self) -> usize {
        match self {
            Function::InitLedger | Function::QueryAllMutualFunds => 0,
            Function::QueryMutualFund | Function::DeleteMutualFund => 1,
            Function::AddMutualFund | Function::UpdateMutualFund => 6,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Function {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self> {
        Function::ALL
            .into_iter()
            .find(|function| function.name() == s)
            .ok_or_else(|| ContractError::UnknownFunction(s.to_string()))
    }
}

/// Invoke `function` with string `args`.
///
/// Returns the response payload: the record JSON for `QueryMutualFund`, a
/// JSON array of records for `QueryAllMutualFunds`, and nothing for the
/// functions that only write.
pub async fn invoke<S: AsRef<str>>(
    contract: &FundContract,
    ctx: &TxContext<'_>,
    function: &str,
    args: &[S],
) -> Result<Option<Bytes>> {
    let function: Function = function.parse()?;
    if args.len() != function.arity() {
        return Err(ContractError::ArgumentCount {
            function: function.name(),
            expected: function.arity(),
            got: args.len(),
        });
    }

    tracing::debug!(tx_id = ctx.tx_id(), %function, "invoking");

    match function {
        Function::InitLedger => {
            contract.seed(ctx).await?;
            Ok(None)
        }
        Function::AddMutualFund => {
            contract.create(ctx, &parse_record(args)?).await?;
            Ok(None)
        }
        Function::QueryMutualFund => {
            let record = contract.read(ctx, args[0].as_ref()).await?;
            Ok(Some(encode_record(&record).map_err(ContractError::Payload)?))
        }
        Function::UpdateMutualFund => {
            contract.update(ctx, &parse_record(args)?).await?;
            Ok(None)
        }
        Function::DeleteMutualFund => {
            contract.delete(ctx, args[0].as_ref()).await?;
            Ok(None)
        }
        Function::QueryAllMutualFunds => {
            let records = contract.list_all(ctx).await?;
            Ok(Some(encode_records(&records).map_err(ContractError::Payload)?))
        }
    }
}

/// Build a record from `fundId, name, investor, amount, returnRate, duration`.
fn parse_record<S: AsRef<str>>(args: &[S]) -> Result<FundRecord> {
    Ok(FundRecord::new(
        args[0].as_ref(),
        args[1].as_ref(),
        args[2].as_ref(),
        parse_arg("amount", args[3].as_ref())?,
        parse_arg("returnRate", args[4].as_ref())?,
        parse_arg("duration", args[5].as_ref())?,
    ))
}

fn parse_arg<T: FromStr>(param: &'static str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ContractError::InvalidArgument {
            param,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundledger_store::MemoryLedger;

    const TECH_FUND: [&str; 6] = ["FUND9", "Tech Fund", "Dana", "1500.50", "15.0", "6"];

    #[test]
    fn test_function_names_roundtrip() {
        for function in Function::ALL {
            assert_eq!(function.name().parse::<Function>().unwrap(), function);
        }
        assert!(matches!(
            "queryMutualFund".parse::<Function>(),
            Err(ContractError::UnknownFunction(_))
        ));
    }

    #[tokio::test]
    async fn test_add_then_query() {
        let ledger = MemoryLedger::new();
        let ctx = TxContext::new("tx1", &ledger);
        let contract = FundContract::default();

        let payload = invoke(&contract, &ctx, "AddMutualFund", &TECH_FUND).await.unwrap();
        assert!(payload.is_none());

        let payload = invoke(&contract, &ctx, "QueryMutualFund", &["FUND9"])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            &payload[..],
            br#"{"fundId":"FUND9","name":"Tech Fund","investor":"Dana","amount":1500.5,"returnRate":15,"duration":6}"#
        );
    }

    #[tokio::test]
    async fn test_query_all_empty_is_empty_array() {
        let ledger = MemoryLedger::new();
        let ctx = TxContext::new("tx1", &ledger);
        let no_args: [&str; 0] = [];

        let payload = invoke(&FundContract::default(), &ctx, "QueryAllMutualFunds", &no_args)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(&payload[..], b"[]");
    }

    #[tokio::test]
    async fn test_init_then_query_all() {
        let ledger = MemoryLedger::new();
        let ctx = TxContext::new("tx1", &ledger);
        let contract = FundContract::default();
        let no_args: [&str; 0] = [];

        invoke(&contract, &ctx, "InitLedger", &no_args).await.unwrap();
        let payload = invoke(&contract, &ctx, "QueryAllMutualFunds", &no_args)
            .await
            .unwrap()
            .unwrap();

        let records: Vec<FundRecord> = serde_json::from_slice(&payload).unwrap();
        assert_eq!(records, fundledger_core::seed_records());
    }

    #[tokio::test]
    async fn test_argument_count_checked() {
        let ledger = MemoryLedger::new();
        let ctx = TxContext::new("tx1", &ledger);

        let err = invoke(&FundContract::default(), &ctx, "AddMutualFund", &["FUND9"])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::ArgumentCount { function: "AddMutualFund", expected: 6, got: 1 }
        ));
    }

    #[tokio::test]
    async fn test_numeric_arguments_validated() {
        let ledger = MemoryLedger::new();
        let ctx = TxContext::new("tx1", &ledger);
        let contract = FundContract::default();

        let mut args = TECH_FUND;
        args[3] = "a lot";
        let err = invoke(&contract, &ctx, "AddMutualFund", &args).await.unwrap_err();
        assert!(matches!(err, ContractError::InvalidArgument { param: "amount", .. }));

        let mut args = TECH_FUND;
        args[5] = "6.5";
        let err = invoke(&contract, &ctx, "AddMutualFund", &args).await.unwrap_err();
        assert!(matches!(err, ContractError::InvalidArgument { param: "duration", .. }));

        assert!(ledger.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_via_dispatch() {
        let ledger = MemoryLedger::new();
        let ctx = TxContext::new("tx1", &ledger);

        let err = invoke(&FundContract::default(), &ctx, "UpdateMutualFund", &TECH_FUND)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
