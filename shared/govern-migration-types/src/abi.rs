//! Solidity ABI signatures of the Aragon apps a migration touches.
//!
//! Only the four calls the migration needs are declared; the selectors are derived at compile
//! time by `sol!`.

use alloy_sol_types::sol;

sol! {
    /// Vault and Agent apps.
    interface IVault {
        function transfer(address token, address to, uint256 value) external;
    }

    /// Finance app.
    interface IFinance {
        function newImmediatePayment(address token, address receiver, uint256 amount, string reference) external;
    }

    /// Voting app.
    interface IVoting {
        function newVote(bytes executionScript, string metadata, bool castVote, bool executesIfDecided)
            external
            returns (uint256 voteId);
    }

    /// Token Manager app (forwarder in front of Voting).
    interface ITokenManager {
        function forward(bytes evmScript) external;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{FINANCE_PAYMENT_SELECTOR, VAULT_TRANSFER_SELECTOR};
    use alloy_sol_types::SolCall;
    use sha3::{Digest, Keccak256};

    fn selector(signature: &str) -> [u8; 4] {
        let digest = Keccak256::digest(signature.as_bytes());
        let mut out = [0u8; 4];
        out.copy_from_slice(&digest[..4]);
        out
    }

    #[test]
    fn pinned_selectors_match_interfaces() {
        assert_eq!(IVault::transferCall::SELECTOR, VAULT_TRANSFER_SELECTOR);
        assert_eq!(IFinance::newImmediatePaymentCall::SELECTOR, FINANCE_PAYMENT_SELECTOR);
    }

    #[test]
    fn selectors_match_canonical_signatures() {
        assert_eq!(selector("transfer(address,address,uint256)"), VAULT_TRANSFER_SELECTOR);
        assert_eq!(
            selector("newImmediatePayment(address,address,uint256,string)"),
            FINANCE_PAYMENT_SELECTOR
        );
        assert_eq!(
            selector("newVote(bytes,string,bool,bool)"),
            IVoting::newVoteCall::SELECTOR
        );
        assert_eq!(selector("forward(bytes)"), ITokenManager::forwardCall::SELECTOR);
    }
}
