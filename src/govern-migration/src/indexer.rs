//! Event-driven migration index.
//!
//! Handlers are fed chain events in order (at-least-once). Organizations and their apps come
//! from DAO factory and `NewAppProxy` events, executors from the Govern registry, and every
//! `StartVote` whose script classifies as a migration is recorded with its assets.

use std::collections::{btree_map::Entry, BTreeMap};

use alloy_primitives::{Address, Bytes, B256, U256};
use govern_migration_types::{codec::to_hex, MigrationTemplate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{apps::AppRole, errors::IndexerError, facts::StoreFacts, migration::classify};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoRecord {
    pub address: Address,
    pub voting: Option<Address>,
    pub vault: Option<Address>,
    pub finance: Option<Address>,
    pub created_at: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingRecord {
    pub address: Address,
    pub dao: Address,
    pub created_at: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorRecord {
    pub address: Address,
    pub queue: Address,
    pub created_at: u64,
}

/// Token moved by a migration. The zero address stands for native ETH.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenRecord {
    /// Record for a token whose metadata has not been resolved.
    pub fn unresolved(address: Address) -> Self {
        if address.is_zero() {
            return Self::ether();
        }
        Self {
            address,
            name: "unknown name".to_string(),
            symbol: "unknown symbol".to_string(),
            decimals: 0,
        }
    }

    pub fn ether() -> Self {
        Self {
            address: Address::ZERO,
            name: "ETH".to_string(),
            symbol: "ETH".to_string(),
            decimals: 18,
        }
    }

    pub fn is_ether(&self) -> bool {
        self.address.is_zero()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationAssetRecord {
    pub id: String,
    pub token: Address,
    pub amount: U256,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecord {
    pub id: String,
    pub voting: Address,
    pub vote_id: U256,
    pub executor: Address,
    pub creator: Address,
    pub metadata: String,
    pub script: Bytes,
    pub kind: MigrationTemplate,
    pub executed: bool,
    pub created_at: u64,
    pub executed_at: Option<u64>,
    pub dao_created_at: u64,
    pub assets: Vec<MigrationAssetRecord>,
}

/// `Voting.StartVote`, with the vote's execution script already fetched.
#[derive(Clone, Debug)]
pub struct StartVote {
    pub voting: Address,
    pub vote_id: U256,
    pub creator: Address,
    pub metadata: String,
    pub script: Bytes,
    pub timestamp: u64,
}

/// `Voting.ExecuteVote`.
#[derive(Clone, Copy, Debug)]
pub struct ExecuteVote {
    pub voting: Address,
    pub vote_id: U256,
    pub timestamp: u64,
}

/// `Kernel.NewAppProxy`.
#[derive(Clone, Copy, Debug)]
pub struct NewAppProxy {
    pub dao: Address,
    pub app_id: B256,
    pub proxy: Address,
    pub timestamp: u64,
}

/// `GovernRegistry.Registered`.
#[derive(Clone, Copy, Debug)]
pub struct Registered {
    pub executor: Address,
    pub queue: Address,
    pub timestamp: u64,
}

pub fn migration_id(voting: Address, vote_id: U256) -> String {
    format!("{}-{}", to_hex(voting.as_slice()), vote_id)
}

#[derive(Debug, Default)]
pub struct MigrationIndexer {
    daos: BTreeMap<Address, DaoRecord>,
    votings: BTreeMap<Address, VotingRecord>,
    executors: BTreeMap<Address, ExecutorRecord>,
    tokens: BTreeMap<Address, TokenRecord>,
    migrations: BTreeMap<String, MigrationRecord>,
}

impl MigrationIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// DAO factory / template deployments.
    pub fn handle_deploy_dao(&mut self, dao: Address, timestamp: u64) -> &DaoRecord {
        self.daos.entry(dao).or_insert_with(|| {
            info!(%dao, "tracking organization");
            DaoRecord {
                address: dao,
                voting: None,
                vault: None,
                finance: None,
                created_at: timestamp,
            }
        })
    }

    pub fn handle_new_app_proxy(&mut self, event: NewAppProxy) {
        let Some(role) = AppRole::from_app_id(event.app_id) else {
            return;
        };
        self.handle_deploy_dao(event.dao, event.timestamp);
        let Some(dao) = self.daos.get_mut(&event.dao) else {
            return;
        };

        match role {
            AppRole::Voting => {
                if dao.voting.is_some() {
                    debug!(dao = %event.dao, proxy = %event.proxy, "ignoring additional voting app");
                    return;
                }
                dao.voting = Some(event.proxy);
                self.votings
                    .entry(event.proxy)
                    .or_insert_with(|| VotingRecord {
                        address: event.proxy,
                        dao: event.dao,
                        created_at: event.timestamp,
                    });
            }
            AppRole::Vault => dao.vault = Some(event.proxy),
            AppRole::Finance => dao.finance = Some(event.proxy),
        }
        info!(dao = %event.dao, proxy = %event.proxy, ?role, "app installed");
    }

    pub fn handle_registered(&mut self, event: Registered) {
        info!(executor = %event.executor, queue = %event.queue, "executor registered");
        self.executors.insert(
            event.executor,
            ExecutorRecord {
                address: event.executor,
                queue: event.queue,
                created_at: event.timestamp,
            },
        );
    }

    /// Store resolved token metadata. Tokens first seen in a migration get
    /// [`TokenRecord::unresolved`] until this is called.
    pub fn register_token(&mut self, token: TokenRecord) {
        if token.is_ether() {
            return;
        }
        self.tokens.insert(token.address, token);
    }

    /// Record the vote as a migration if its script is one; returns the stored record.
    ///
    /// A replayed vote refreshes the record but keeps its execution state.
    pub fn handle_start_vote(
        &mut self,
        event: StartVote,
    ) -> Result<Option<&MigrationRecord>, IndexerError> {
        let Some(voting) = self.votings.get(&event.voting) else {
            warn!(voting = %event.voting, "vote started on untracked voting app");
            return Err(IndexerError::UnknownVoting(event.voting));
        };
        let Some(dao) = self.daos.get(&voting.dao) else {
            return Err(IndexerError::UnknownDao {
                voting: event.voting,
                dao: voting.dao,
            });
        };

        let facts = StoreFacts {
            dao,
            executors: &self.executors,
        };
        let Some(classified) = classify(&event.script, &facts) else {
            debug!(voting = %event.voting, vote_id = %event.vote_id, "vote is not a migration");
            return Ok(None);
        };

        let id = migration_id(event.voting, event.vote_id);
        let assets = classified
            .assets()
            .into_iter()
            .map(|asset| MigrationAssetRecord {
                id: format!("{id}-{}", to_hex(asset.token.as_slice())),
                token: asset.token,
                amount: asset.amount,
            })
            .collect::<Vec<_>>();
        for asset in &assets {
            self.tokens
                .entry(asset.token)
                .or_insert_with(|| TokenRecord::unresolved(asset.token));
        }
        info!(
            %id,
            executor = %classified.recipient(),
            kind = ?classified.template(),
            assets = assets.len(),
            "migration proposed"
        );

        let mut record = MigrationRecord {
            id: id.clone(),
            voting: event.voting,
            vote_id: event.vote_id,
            executor: classified.recipient(),
            creator: event.creator,
            metadata: event.metadata,
            script: event.script,
            kind: classified.template(),
            executed: false,
            created_at: event.timestamp,
            executed_at: None,
            dao_created_at: dao.created_at,
            assets,
        };
        let stored = match self.migrations.entry(id) {
            Entry::Occupied(mut entry) => {
                record.executed = entry.get().executed;
                record.executed_at = entry.get().executed_at;
                entry.insert(record);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(record),
        };
        Ok(Some(&*stored))
    }

    /// Mark a recorded migration executed. Returns whether the vote was a migration.
    pub fn handle_execute_vote(&mut self, event: ExecuteVote) -> bool {
        let id = migration_id(event.voting, event.vote_id);
        match self.migrations.get_mut(&id) {
            Some(migration) => {
                migration.executed = true;
                migration.executed_at = Some(event.timestamp);
                info!(%id, "migration executed");
                true
            }
            None => false,
        }
    }

    pub fn dao(&self, address: Address) -> Option<&DaoRecord> {
        self.daos.get(&address)
    }

    pub fn executor(&self, address: Address) -> Option<&ExecutorRecord> {
        self.executors.get(&address)
    }

    pub fn token(&self, address: Address) -> Option<&TokenRecord> {
        self.tokens.get(&address)
    }

    pub fn migration(&self, voting: Address, vote_id: U256) -> Option<&MigrationRecord> {
        self.migrations.get(&migration_id(voting, vote_id))
    }

    pub fn migrations(&self) -> impl Iterator<Item = &MigrationRecord> {
        self.migrations.values()
    }
}
