use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy_primitives::{Address, Bytes};
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use govern_migration::classify_hex;
use govern_migration_encoder::{
    encode_migration, facts::StaticFacts, subgraph::SubgraphClient, types::Dao,
};
use govern_migration_types::codec::to_hex;
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Build and inspect votes migrating an Aragon organization's treasury to its Govern executor.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the treasury from the vault subgraph and print the migration vote payload.
    Encode(EncodeArgs),
    /// Classify a call script and print the migration it describes, if any.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct EncodeArgs {
    /// Network whose vault subgraph is queried (mainnet, rinkeby).
    #[arg(long, env = "NETWORK", default_value = "mainnet")]
    network: String,

    /// Query this subgraph instead of the network's default one.
    #[arg(long, env = "SUBGRAPH_URL")]
    subgraph_url: Option<String>,

    /// Kernel address of the organization.
    #[arg(long, env = "DAO")]
    dao: Address,

    #[arg(long, env = "VOTING")]
    voting: Address,

    /// Vault or Agent app holding the funds.
    #[arg(long, env = "VAULT")]
    vault: Address,

    /// Govern executor receiving every asset.
    #[arg(long, env = "EXECUTOR")]
    executor: Address,

    /// Pay through this Finance app instead of transferring out of the vault.
    #[arg(long, env = "FINANCE")]
    finance: Option<Address>,

    /// Create the vote through this Token Manager.
    #[arg(long, env = "TOKEN_MANAGER")]
    token_manager: Option<Address>,

    /// Path to write a JSON report of the encoded vote (eg, migration.mainnet.json).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Call script, hex encoded (0x...).
    #[arg(long)]
    script: String,

    #[arg(long, env = "VAULT")]
    vault: Option<Address>,

    #[arg(long, env = "FINANCE")]
    finance: Option<Address>,

    /// Registered Govern executor. Repeat for several.
    #[arg(long = "executor")]
    executors: Vec<Address>,
}

impl EncodeArgs {
    fn dao(&self) -> Dao {
        Dao {
            address: self.dao,
            voting: self.voting,
            vault: self.vault,
            executor: self.executor,
            finance: self.finance,
            token_manager: self.token_manager,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Encode(args) => run_encode(args).await,
        Command::Inspect(args) => run_inspect(args),
    }
}

async fn run_encode(args: EncodeArgs) -> Result<()> {
    let dao = args.dao();
    let mut client = SubgraphClient::new();
    if let Some(ref url) = args.subgraph_url {
        client = client.with_endpoint(url.clone());
    }

    let payload = encode_migration(&client, &args.network, &dao)
        .await
        .with_context(|| format!("failed encoding migration for {}", dao.address))?;

    match payload {
        Some(ref payload) => {
            let target = dao.token_manager.unwrap_or(dao.voting);
            info!(%target, bytes = payload.len(), "encoded migration vote");
            println!("{}", to_hex(payload));
        }
        None => {
            warn!(vault = %dao.vault, "treasury is empty");
            println!("Nothing to migrate");
        }
    }

    if let Some(ref out) = args.out {
        let report = build_report(&args.network, &dao, payload.as_ref());
        write_json_atomic(out, &report)?;
        info!(path = %out.display(), "wrote report");
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    if args.vault.is_none() && args.finance.is_none() {
        return Err(anyhow!(
            "no app to check against: provide --vault and/or --finance (or set VAULT/FINANCE)"
        ));
    }
    let facts = args
        .executors
        .iter()
        .fold(StaticFacts::new(args.vault, args.finance), |facts, executor| {
            facts.with_executor(*executor)
        });

    let migration = classify_hex(&args.script, &facts).map(|script| script.to_migration());
    let out = serde_json::to_string_pretty(&migration).context("failed serialising migration")?;
    println!("{out}");
    Ok(())
}

fn build_report(network: &str, dao: &Dao, payload: Option<&Bytes>) -> Value {
    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let mut report = json!({
        "network": network,
        "dao": dao,
        "generated_at": now,
    });
    match payload {
        Some(payload) => {
            report["to"] = json!(dao.token_manager.unwrap_or(dao.voting));
            report["data"] = json!(to_hex(payload));
        }
        None => report["data"] = Value::Null,
    }
    report
}

fn write_json_atomic(path: &Path, value: &Value) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }

    let serialised =
        serde_json::to_string_pretty(value).context("failed serialising migration report")?;
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, serialised.as_bytes())
        .with_context(|| format!("failed writing temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("failed replacing {}", path.display()))?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use clap::CommandFactory;

    fn dao(token_manager: Option<Address>) -> Dao {
        Dao {
            address: address!("00000000000000000000000000000000000000d0"),
            voting: address!("00000000000000000000000000000000000000e0"),
            vault: address!("6e8d25b8d912827e19bb070153e48e38ddbe5c3a"),
            executor: address!("fbe66da8066711d53cf7b23f701f53f9814e8b9e"),
            finance: None,
            token_manager,
        }
    }

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_inspect_executors() {
        let cli = Cli::try_parse_from([
            "govern-migrate",
            "inspect",
            "--script",
            "0x00000001",
            "--vault",
            "0x6e8d25b8d912827e19bb070153e48e38ddbe5c3a",
            "--executor",
            "0xfbe66da8066711d53cf7b23f701f53f9814e8b9e",
            "--executor",
            "0x00000000000000000000000000000000000000e1",
        ])
        .unwrap();
        let Command::Inspect(args) = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(args.executors.len(), 2);
        assert_eq!(args.vault, Some(dao(None).vault));
    }

    #[test]
    fn report_targets_token_manager_when_present() {
        let payload = Bytes::from(vec![0xde, 0xad]);
        let tm = address!("00000000000000000000000000000000000000e7");

        let report = build_report("mainnet", &dao(Some(tm)), Some(&payload));
        assert_eq!(report["data"], "0xdead");
        assert_eq!(report["to"], json!(tm));

        let report = build_report("mainnet", &dao(None), Some(&payload));
        assert_eq!(report["to"], json!(dao(None).voting));

        let report = build_report("rinkeby", &dao(None), None);
        assert!(report["data"].is_null());
        assert!(report.get("to").is_none());
        assert_eq!(report["network"], "rinkeby");
    }

    #[test]
    fn writes_report_atomically() {
        let dir = std::env::temp_dir().join(format!("govern-migrate-{}", std::process::id()));
        let path = dir.join("report.json");
        let value = json!({ "network": "mainnet" });

        write_json_atomic(&path, &value).unwrap();
        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, value);
        assert!(!tmp_path_for(&path).exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
