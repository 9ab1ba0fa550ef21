use alloy_primitives::Address;

/// Externally resolved facts a migration script is classified against.
///
/// Implemented by the indexer store on one side and by static/mock providers off-chain. Lookups
/// are answered from already persisted data, so they are infallible.
pub trait MigrationFacts {
    /// Vault (or Agent) app installed in the organization, if any.
    fn configured_vault(&self) -> Option<Address> {
        None
    }

    /// Finance app installed in the organization, if any.
    fn configured_finance(&self) -> Option<Address> {
        None
    }

    /// Whether `recipient` is a registered Govern executor.
    fn is_recognized_recipient(&self, recipient: Address) -> bool;
}

impl<T: MigrationFacts + ?Sized> MigrationFacts for &T {
    fn configured_vault(&self) -> Option<Address> {
        (**self).configured_vault()
    }

    fn configured_finance(&self) -> Option<Address> {
        (**self).configured_finance()
    }

    fn is_recognized_recipient(&self, recipient: Address) -> bool {
        (**self).is_recognized_recipient(recipient)
    }
}
