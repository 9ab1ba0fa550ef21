//! Aragon app ids (namehash of the aragonPM repo) recognised in `NewAppProxy` events.

use alloy_primitives::{b256, B256};

pub const VOTING_APP_ID: B256 =
    b256!("9fa3927f639745e587912d4b0fea7ef9013bf93fb907d29faeab57417ba6e1d4");
pub const VAULT_APP_ID: B256 =
    b256!("7e852e0fcfce6551c13800f1e7476f982525c2b5277ba14b24339c68416336d1");
pub const AGENT_APP_ID: B256 =
    b256!("9ac98dc5f995bf0211ed589ef022719d1487e5cb2bab505676f0d084c07cf89a");
pub const FINANCE_APP_ID: B256 =
    b256!("bf8491150dafc5dcaee5b861414dca922de09ccffa344964ae167212e8c673ae");

/// Role an installed app plays in a migration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppRole {
    Voting,
    /// Vault or Agent; both hold the treasury.
    Vault,
    Finance,
}

impl AppRole {
    pub fn from_app_id(app_id: B256) -> Option<Self> {
        if app_id == VOTING_APP_ID {
            Some(AppRole::Voting)
        } else if app_id == VAULT_APP_ID || app_id == AGENT_APP_ID {
            Some(AppRole::Vault)
        } else if app_id == FINANCE_APP_ID {
            Some(AppRole::Finance)
        } else {
            None
        }
    }
}
