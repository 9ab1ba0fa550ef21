use core::ops::Range;

use serde::{Deserialize, Serialize};

/// EVM call script spec id (`CallsScript` executor).
pub const CALL_SCRIPT_ID: [u8; 4] = [0x00, 0x00, 0x00, 0x01];

/// `transfer(address,address,uint256)` on the Vault / Agent app.
pub const VAULT_TRANSFER_SELECTOR: [u8; 4] = [0xbe, 0xab, 0xac, 0xc8];
/// `newImmediatePayment(address,address,uint256,string)` on the Finance app.
pub const FINANCE_PAYMENT_SELECTOR: [u8; 4] = [0xf6, 0x36, 0x48, 0x46];

/// Reference attached to every finance payment of a migration.
pub const PAYMENT_REFERENCE: &str = "Transfer funds to govern executor";
/// Prefix of the metadata attached to the migration vote.
pub const MIGRATION_METADATA: &str = "Migrate all funds to govern executor";

// Byte ranges inside a single call of either template:
//
// [ target | calldata length | selector | token word | recipient word | amount word | reference... ]
// [   20   |        4        |    4     |     32     |       32       |      32     |  finance: 128 ]
pub const TARGET_RANGE: Range<usize> = 0..20;
pub const CALLDATA_LENGTH_RANGE: Range<usize> = 20..24;
pub const SELECTOR_RANGE: Range<usize> = 24..28;
pub const TOKEN_RANGE: Range<usize> = 40..60;
pub const RECIPIENT_RANGE: Range<usize> = 72..92;
pub const AMOUNT_RANGE: Range<usize> = 92..124;
/// Head word holding the offset of the dynamic `reference` string (finance only).
pub const REFERENCE_OFFSET_RANGE: Range<usize> = 124..156;
/// Length word of the `reference` string (finance only).
pub const REFERENCE_LENGTH_RANGE: Range<usize> = 156..188;
/// Padded data words of the `reference` string (finance only).
pub const REFERENCE_DATA_RANGE: Range<usize> = 188..252;

/// Expected value of the reference offset word: four head words.
pub const REFERENCE_OFFSET: u64 = 0x80;

/// The two per-call layouts a migration script may be built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum MigrationTemplate {
    /// Voting transfers straight out of the Vault / Agent app.
    Vault = 1,
    /// Voting issues immediate payments through the Finance app.
    Finance = 2,
}

impl MigrationTemplate {
    /// Classification order.
    pub const ALL: [MigrationTemplate; 2] = [MigrationTemplate::Vault, MigrationTemplate::Finance];

    /// Bytes taken by one call of this template (target + length + calldata).
    pub const fn call_length(self) -> usize {
        match self {
            MigrationTemplate::Vault => 124,
            MigrationTemplate::Finance => 252,
        }
    }

    /// Declared calldata length of every call of this template.
    pub const fn calldata_length(self) -> u32 {
        match self {
            MigrationTemplate::Vault => 0x64,
            MigrationTemplate::Finance => 0xe4,
        }
    }

    pub const fn selector(self) -> [u8; 4] {
        match self {
            MigrationTemplate::Vault => VAULT_TRANSFER_SELECTOR,
            MigrationTemplate::Finance => FINANCE_PAYMENT_SELECTOR,
        }
    }

    /// Persisted migration type code (`0` is reserved for "not a migration").
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MigrationTemplate {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MigrationTemplate::Vault),
            2 => Ok(MigrationTemplate::Finance),
            _ => Err(()),
        }
    }
}
