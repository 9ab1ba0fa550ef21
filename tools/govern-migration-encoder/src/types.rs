use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Layout of the organization being migrated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dao {
    /// Kernel address.
    pub address: Address,
    pub voting: Address,
    /// Vault or Agent app holding the funds.
    pub vault: Address,
    /// Govern executor receiving every asset.
    pub executor: Address,
    /// When set, transfers are issued as Finance payments instead of direct Vault transfers.
    pub finance: Option<Address>,
    /// When set, the vote is created through the Token Manager forwarder.
    pub token_manager: Option<Address>,
}

impl Dao {
    pub fn route(&self) -> Route {
        match self.finance {
            Some(finance) => Route::Finance(finance),
            None => Route::Vault(self.vault),
        }
    }
}

/// Which app the asset transfers are issued against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Voting can transfer out of the Vault / Agent directly.
    Vault(Address),
    /// Voting pays through the Finance app.
    Finance(Address),
}

/// Non-zero treasury balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoAsset {
    pub token: Address,
    pub amount: U256,
}

/// One call of a call script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallAction {
    pub to: Address,
    pub data: Bytes,
}
