//! Call scripts observed on mainnet, plus builders for hand-made calls.

use alloy_primitives::{address, Address, U256};
use govern_migration_types::{
    codec::{encode_address, encode_length, encode_uint256, from_hex},
    template::{MigrationTemplate, CALL_SCRIPT_ID, PAYMENT_REFERENCE},
};

pub const VAULT: Address = address!("6e8d25b8d912827e19bb070153e48e38ddbe5c3a");
pub const FINANCE: Address = address!("73237ba75084d95ada526dcf27ccc9eb99b31747");
pub const EXECUTOR: Address = address!("fbe66da8066711d53cf7b23f701f53f9814e8b9e");
pub const TOKEN_A: Address = address!("5bc9be34f98eb072696d63b5be5d4d2f2c03d0ad");
pub const TOKEN_B: Address = address!("e9a083d88eed757b1d633321ce0519f432c6284d");

const VAULT_EXAMPLE: &str = "0x000000016e8d25b8d912827e19bb070153e48e38ddbe5c3a00000064beabacc80000000000000000000000005bc9be34f98eb072696d63b5be5d4d2f2c03d0ad000000000000000000000000fbe66da8066711d53cf7b23f701f53f9814e8b9e0000000000000000000000000000000000000000000001b1ae4d6e2ef50000006e8d25b8d912827e19bb070153e48e38ddbe5c3a00000064beabacc8000000000000000000000000e9a083d88eed757b1d633321ce0519f432c6284d000000000000000000000000fbe66da8066711d53cf7b23f701f53f9814e8b9e00000000000000000000000000000000000000000000003635c9adc5dea000006e8d25b8d912827e19bb070153e48e38ddbe5c3a00000064beabacc80000000000000000000000000000000000000000000000000000000000000000000000000000000000000000fbe66da8066711d53cf7b23f701f53f9814e8b9e00000000000000000000000000000000000000000000000001cdda4faccd0000";

const FINANCE_EXAMPLE: &str = "0x0000000173237ba75084d95ada526dcf27ccc9eb99b31747000000e4f63648460000000000000000000000005bc9be34f98eb072696d63b5be5d4d2f2c03d0ad000000000000000000000000fbe66da8066711d53cf7b23f701f53f9814e8b9e0000000000000000000000000000000000000000000001b1ae4d6e2ef5000000000000000000000000000000000000000000000000000000000000000000008000000000000000000000000000000000000000000000000000000000000000215472616e736665722066756e647320746f20676f7665726e206578656375746f720000000000000000000000000000000000000000000000000000000000000073237ba75084d95ada526dcf27ccc9eb99b31747000000e4f6364846000000000000000000000000e9a083d88eed757b1d633321ce0519f432c6284d000000000000000000000000fbe66da8066711d53cf7b23f701f53f9814e8b9e00000000000000000000000000000000000000000000003635c9adc5dea00000000000000000000000000000000000000000000000000000000000000000008000000000000000000000000000000000000000000000000000000000000000215472616e736665722066756e647320746f20676f7665726e206578656375746f7200000000000000000000000000000000000000000000000000000000000000";

pub fn vault_example_hex() -> &'static str {
    VAULT_EXAMPLE
}

pub fn vault_example() -> Vec<u8> {
    from_hex(VAULT_EXAMPLE).unwrap()
}

pub fn finance_example() -> Vec<u8> {
    from_hex(FINANCE_EXAMPLE).unwrap()
}

/// `n` ether in wei.
pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

/// Amounts carried by both examples, in call order (the finance one stops after two).
pub fn example_amounts() -> Vec<U256> {
    vec![
        ether(8_000),
        ether(1_000),
        U256::from(13u64) * U256::from(10u64).pow(U256::from(16u64)),
    ]
}

pub fn vault_call(target: Address, token: Address, recipient: Address, amount: U256) -> Vec<u8> {
    let mut call = Vec::with_capacity(MigrationTemplate::Vault.call_length());
    call.extend_from_slice(target.as_slice());
    call.extend_from_slice(&encode_length(MigrationTemplate::Vault.calldata_length() as usize));
    call.extend_from_slice(&MigrationTemplate::Vault.selector());
    call.extend_from_slice(&encode_address(token));
    call.extend_from_slice(&encode_address(recipient));
    call.extend_from_slice(&encode_uint256(amount));
    call
}

pub fn finance_call(target: Address, token: Address, recipient: Address, amount: U256) -> Vec<u8> {
    let mut call = Vec::with_capacity(MigrationTemplate::Finance.call_length());
    call.extend_from_slice(target.as_slice());
    call.extend_from_slice(&encode_length(MigrationTemplate::Finance.calldata_length() as usize));
    call.extend_from_slice(&MigrationTemplate::Finance.selector());
    call.extend_from_slice(&encode_address(token));
    call.extend_from_slice(&encode_address(recipient));
    call.extend_from_slice(&encode_uint256(amount));
    call.extend_from_slice(&encode_uint256(U256::from(0x80u64)));
    call.extend_from_slice(&encode_uint256(U256::from(PAYMENT_REFERENCE.len())));
    let mut data = [0u8; 64];
    data[..PAYMENT_REFERENCE.len()].copy_from_slice(PAYMENT_REFERENCE.as_bytes());
    call.extend_from_slice(&data);
    call
}

pub fn script(calls: &[Vec<u8>]) -> Vec<u8> {
    let mut out = CALL_SCRIPT_ID.to_vec();
    for call in calls {
        out.extend_from_slice(call);
    }
    out
}
