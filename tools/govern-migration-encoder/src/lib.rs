//! Vote payload migrating every treasury asset of an Aragon organization to its Govern
//! executor.
//!
//! Funds are read from the vault subgraph. The produced payload is meant to be sent to the
//! Voting app (or to the Token Manager in front of it) and supports three layouts for the
//! transfers themselves:
//!  1. Vault: Voting may transfer the Vault's assets.
//!  2. Agent: same as 1, with an Agent app holding the assets.
//!  3. Finance: Voting executes payments on the Finance app, which may transfer the Vault's or
//!     Agent's assets.

pub mod encoder;
pub mod facts;
pub mod subgraph;
pub mod types;


use alloy_primitives::Bytes;
use tracing::info;

use crate::{
    encoder::{encode_migration_vote, encode_transfer_all_call_script},
    subgraph::{SubgraphClient, SubgraphError},
    types::{Dao, DaoAsset},
};

/// Vote payload moving `assets` to `dao.executor`, or `None` when there is nothing to move.
pub fn migration_payload(dao: &Dao, assets: &[DaoAsset]) -> Option<Bytes> {
    if assets.is_empty() {
        return None;
    }
    let script = encode_transfer_all_call_script(dao.route(), assets, dao.executor);
    Some(encode_migration_vote(dao, script, dao.executor))
}

/// Fetch the treasury on `network` and build the migration vote payload.
pub async fn encode_migration(
    client: &SubgraphClient,
    network: &str,
    dao: &Dao,
) -> Result<Option<Bytes>, SubgraphError> {
    let assets = client.get_assets(network, dao.vault).await?;
    info!(dao = %dao.address, assets = assets.len(), "fetched treasury");
    Ok(migration_payload(dao, &assets))
}
