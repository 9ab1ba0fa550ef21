//! Static facts provider for off-chain classification.

use std::collections::BTreeSet;

use alloy_primitives::Address;

pub use govern_migration_types::MigrationFacts;

use crate::types::Dao;

/// Facts known up front rather than indexed: the organization's apps and an explicit set of
/// executors.
///
/// This can be used to check an encoded script (or one pulled from a vote) without an indexer.
#[derive(Clone, Debug, Default)]
pub struct StaticFacts {
    pub vault: Option<Address>,
    pub finance: Option<Address>,
    pub executors: BTreeSet<Address>,
}

impl StaticFacts {
    pub fn new(vault: Option<Address>, finance: Option<Address>) -> Self {
        Self {
            vault,
            finance,
            executors: BTreeSet::new(),
        }
    }

    /// Facts describing `dao`, trusting its own executor.
    pub fn for_dao(dao: &Dao) -> Self {
        Self::new(Some(dao.vault), dao.finance).with_executor(dao.executor)
    }

    pub fn with_executor(mut self, executor: Address) -> Self {
        self.executors.insert(executor);
        self
    }
}

impl MigrationFacts for StaticFacts {
    fn configured_vault(&self) -> Option<Address> {
        self.vault
    }

    fn configured_finance(&self) -> Option<Address> {
        self.finance
    }

    fn is_recognized_recipient(&self, recipient: Address) -> bool {
        self.executors.contains(&recipient)
    }
}
