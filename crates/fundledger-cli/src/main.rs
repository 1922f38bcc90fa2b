//! fundledger: run one contract function against a ledger.
//!
//! ```text
//! fundledger --db funds.db InitLedger
//! fundledger --db funds.db AddMutualFund FUND9 "Tech Fund" Dana 1500.50 15.0 6
//! fundledger --db funds.db QueryAllMutualFunds
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fundledger::store::{Ledger, MemoryLedger, SqliteLedger};
use fundledger::{invoke, ContractConfig, FundContract, TxContext};

/// Invoke a mutual fund contract function.
#[derive(Parser, Debug)]
#[command(name = "fundledger")]
#[command(about = "Invoke a mutual fund contract function against a ledger")]
struct Args {
    /// SQLite ledger file
    #[arg(long, default_value = "fundledger.db")]
    db: PathBuf,

    /// Use a throwaway in-memory ledger instead of a file
    #[arg(long, conflicts_with = "db")]
    memory: bool,

    /// Only list records whose keys start with this prefix
    #[arg(long, default_value = "")]
    scan_prefix: String,

    /// Skip stored values that fail to decode when listing
    #[arg(long)]
    skip_undecodable: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Function name, e.g. QueryMutualFund
    function: String,

    /// Function arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

impl Args {
    fn contract_config(&self) -> ContractConfig {
        ContractConfig::default()
            .with_scan_prefix(self.scan_prefix.clone())
            .with_skip_undecodable(self.skip_undecodable)
    }

    fn open_ledger(&self) -> anyhow::Result<Box<dyn Ledger>> {
        if self.memory {
            return Ok(Box::new(MemoryLedger::new()));
        }
        let ledger = SqliteLedger::open(&self.db)
            .with_context(|| format!("failed to open ledger {}", self.db.display()))?;
        Ok(Box::new(ledger))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let ledger = args.open_ledger()?;
    let payload = run(&args, ledger.as_ref()).await?;

    if let Some(payload) = payload {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&payload)?;
        writeln!(stdout)?;
    }
    Ok(())
}

/// Run the requested function in a fresh transaction over `ledger`.
async fn run(args: &Args, ledger: &dyn Ledger) -> anyhow::Result<Option<Vec<u8>>> {
    let contract = FundContract::new(args.contract_config());
    let ctx = TxContext::new(tx_id(), ledger);

    tracing::info!(tx_id = ctx.tx_id(), function = %args.function, "invoking contract");

    let payload = invoke(&contract, &ctx, &args.function, &args.args)
        .await
        .with_context(|| format!("{} failed", args.function))?;
    Ok(payload.map(|bytes| bytes.to_vec()))
}

/// Logs go to stderr so stdout carries only the payload.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn tx_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("cli-{}", millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("fundledger").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_function_and_args() {
        let args = parse(&["--memory", "AddMutualFund", "FUND9", "Tech Fund", "Dana", "-1.5", "15", "6"]);
        assert!(args.memory);
        assert_eq!(args.function, "AddMutualFund");
        assert_eq!(args.args.len(), 6);
        assert_eq!(args.args[3], "-1.5");
    }

    #[test]
    fn test_memory_conflicts_with_db() {
        let argv = ["fundledger", "--memory", "--db", "x.db", "InitLedger"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_config_from_flags() {
        let args = parse(&["--scan-prefix", "FUND", "--skip-undecodable", "QueryAllMutualFunds"]);
        let config = args.contract_config();
        assert_eq!(config.scan_prefix, "FUND");
        assert!(config.skip_undecodable);
    }

    #[tokio::test]
    async fn test_runs_persist_across_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("funds.db");
        let db = db.to_str().unwrap();

        let args = parse(&["--db", db, "InitLedger"]);
        let ledger = args.open_ledger().unwrap();
        assert!(run(&args, ledger.as_ref()).await.unwrap().is_none());
        drop(ledger);

        let args = parse(&["--db", db, "QueryMutualFund", "FUND2"]);
        let ledger = args.open_ledger().unwrap();
        let payload = run(&args, ledger.as_ref()).await.unwrap().unwrap();
        assert_eq!(
            payload,
            br#"{"fundId":"FUND2","name":"Debt Income Fund","investor":"Bob","amount":5000,"returnRate":8,"duration":24}"#
        );
    }

    #[tokio::test]
    async fn test_errors_name_the_function() {
        let args = parse(&["--memory", "QueryMutualFund", "FUND404"]);
        let ledger = args.open_ledger().unwrap();
        let err = run(&args, ledger.as_ref()).await.unwrap_err();
        assert!(format!("{:#}", err).contains("mutual fund FUND404 does not exist"));
    }
}
