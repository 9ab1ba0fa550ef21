use std::collections::BTreeMap;

use alloy_primitives::Address;
use govern_migration_types::MigrationFacts;

use crate::indexer::{DaoRecord, ExecutorRecord};

/// Facts for one organization, answered from the indexer's persisted records.
pub struct StoreFacts<'a> {
    pub dao: &'a DaoRecord,
    pub executors: &'a BTreeMap<Address, ExecutorRecord>,
}

impl MigrationFacts for StoreFacts<'_> {
    fn configured_vault(&self) -> Option<Address> {
        self.dao.vault
    }

    fn configured_finance(&self) -> Option<Address> {
        self.dao.finance
    }

    fn is_recognized_recipient(&self, recipient: Address) -> bool {
        self.executors.contains_key(&recipient)
    }
}
