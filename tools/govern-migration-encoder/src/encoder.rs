use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use govern_migration_types::{
    abi::{IFinance, ITokenManager, IVault, IVoting},
    codec::encode_length,
    template::{CALL_SCRIPT_ID, MIGRATION_METADATA, PAYMENT_REFERENCE},
};

use crate::types::{CallAction, Dao, DaoAsset, Route};

/// Encode a call script from an ordered list of calls.
///
/// Layout: `0x00000001` then, per call, `to (20) || len(data) (u32 BE) || data`.
pub fn encode_call_script(actions: &[CallAction]) -> Bytes {
    let len = CALL_SCRIPT_ID.len()
        + actions
            .iter()
            .map(|action| 20 + 4 + action.data.len())
            .sum::<usize>();
    let mut buf = Vec::with_capacity(len);
    buf.extend_from_slice(&CALL_SCRIPT_ID);
    for action in actions {
        buf.extend_from_slice(action.to.as_slice());
        buf.extend_from_slice(&encode_length(action.data.len()));
        buf.extend_from_slice(&action.data);
    }
    buf.into()
}

/// `Vault.transfer(token, recipient, amount)`.
pub fn encode_transfer(token: Address, recipient: Address, amount: U256) -> Bytes {
    IVault::transferCall {
        token,
        to: recipient,
        value: amount,
    }
    .abi_encode()
    .into()
}

/// `Finance.newImmediatePayment(token, recipient, amount, PAYMENT_REFERENCE)`.
pub fn encode_payment(token: Address, recipient: Address, amount: U256) -> Bytes {
    IFinance::newImmediatePaymentCall {
        token,
        receiver: recipient,
        amount,
        reference: PAYMENT_REFERENCE.to_string(),
    }
    .abi_encode()
    .into()
}

/// `Voting.newVote(script, metadata, castVote, executesIfDecided)`.
pub fn encode_new_vote(
    script: Bytes,
    metadata: String,
    cast_vote: bool,
    executes_if_decided: bool,
) -> Bytes {
    IVoting::newVoteCall {
        executionScript: script,
        metadata,
        castVote: cast_vote,
        executesIfDecided: executes_if_decided,
    }
    .abi_encode()
    .into()
}

/// `TokenManager.forward(script)`.
pub fn encode_forward(script: Bytes) -> Bytes {
    ITokenManager::forwardCall { evmScript: script }
        .abi_encode()
        .into()
}

/// One transfer (or payment) per asset, all paying `recipient`, in asset order.
pub fn encode_transfer_all_call_script(route: Route, assets: &[DaoAsset], recipient: Address) -> Bytes {
    let actions: Vec<CallAction> = assets
        .iter()
        .map(|asset| match route {
            Route::Finance(finance) => CallAction {
                to: finance,
                data: encode_payment(asset.token, recipient, asset.amount),
            },
            Route::Vault(vault) => CallAction {
                to: vault,
                data: encode_transfer(asset.token, recipient, asset.amount),
            },
        })
        .collect();
    encode_call_script(&actions)
}

/// Metadata attached to the migration vote.
pub fn migration_metadata(executor: Address) -> String {
    format!("{MIGRATION_METADATA}: {}", executor.to_checksum(None))
}

/// Wrap a transfer script into the vote that executes it.
///
/// Organizations voting through a Token Manager get `forward(callScript([voting, newVote]))`;
/// everyone else gets the bare `newVote` calldata addressed to the Voting app.
pub fn encode_migration_vote(dao: &Dao, script: Bytes, executor: Address) -> Bytes {
    let vote = encode_new_vote(script, migration_metadata(executor), true, true);

    if dao.token_manager.is_none() {
        return vote;
    }
    let voting_script = encode_call_script(&[CallAction {
        to: dao.voting,
        data: vote,
    }]);
    encode_forward(voting_script)
}
