//! Treasury balances from the Aragon vault subgraph.

use alloy_primitives::{Address, U256};
use govern_migration_types::codec::to_hex;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::types::DaoAsset;

/// Vault subgraph per supported network.
pub const SUBGRAPHS: &[(&str, &str)] = &[
    (
        "mainnet",
        "https://api.thegraph.com/subgraphs/name/aragon/aragon-vault-mainnet",
    ),
    (
        "rinkeby",
        "https://api.thegraph.com/subgraphs/name/aragon/aragon-vault-rinkeby",
    ),
];

#[derive(Debug, thiserror::Error)]
pub enum SubgraphError {
    #[error("Unknown network {0}")]
    UnknownNetwork(String),
    #[error("subgraph request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("subgraph query failed: {0}")]
    GraphQl(String),
    #[error("malformed subgraph response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid balance {balance:?} for token {token}")]
    InvalidBalance { token: Address, balance: String },
}

pub fn subgraph_url(network: &str) -> Result<&'static str, SubgraphError> {
    SUBGRAPHS
        .iter()
        .find(|(name, _)| *name == network)
        .map(|(_, url)| *url)
        .ok_or_else(|| SubgraphError::UnknownNetwork(network.to_string()))
}

/// GraphQL query for every token balance held by `vault`.
pub fn token_balances_query(vault: Address) -> String {
    format!(
        r#"{{
      tokenBalances (where: {{ vault: "{}" }}) {{
        balance
        token {{
          id
        }}
      }}
    }}"#,
        to_hex(vault.as_slice())
    )
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<TokenBalances>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenBalances {
    token_balances: Vec<TokenBalance>,
}

#[derive(Deserialize)]
struct TokenBalance {
    balance: String,
    token: TokenId,
}

#[derive(Deserialize)]
struct TokenId {
    id: Address,
}

/// Turn a `tokenBalances` response into the non-zero assets, in response order.
pub fn parse_assets(response: Value) -> Result<Vec<DaoAsset>, SubgraphError> {
    let response: GraphQlResponse = serde_json::from_value(response)?;
    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(SubgraphError::GraphQl(messages.join("; ")));
    }
    let Some(data) = response.data else {
        return Err(SubgraphError::GraphQl("response has no data".to_string()));
    };

    let mut assets = Vec::with_capacity(data.token_balances.len());
    for entry in data.token_balances {
        let amount = U256::from_str_radix(&entry.balance, 10).map_err(|_| {
            SubgraphError::InvalidBalance {
                token: entry.token.id,
                balance: entry.balance.clone(),
            }
        })?;
        if amount.is_zero() {
            continue;
        }
        assets.push(DaoAsset {
            token: entry.token.id,
            amount,
        });
    }
    Ok(assets)
}

/// Client for the vault subgraph.
#[derive(Clone, Debug, Default)]
pub struct SubgraphClient {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl SubgraphClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query `endpoint` instead of the per-network subgraph.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn endpoint_for(&self, network: &str) -> Result<String, SubgraphError> {
        match &self.endpoint {
            Some(endpoint) => Ok(endpoint.clone()),
            None => subgraph_url(network).map(str::to_string),
        }
    }

    /// Non-zero balances held by `vault` on `network`.
    pub async fn get_assets(
        &self,
        network: &str,
        vault: Address,
    ) -> Result<Vec<DaoAsset>, SubgraphError> {
        let url = self.endpoint_for(network)?;
        debug!(%url, %vault, "querying vault balances");
        let body = json!({ "query": token_balances_query(vault) });
        let response: Value = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        parse_assets(response)
    }
}
