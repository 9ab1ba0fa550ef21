use alloy_primitives::Address;
use govern_migration_types::CodecError;

/// Structural reasons a call script does not fit a migration template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("script too short for a call script header ({0} bytes)")]
    TooShort(usize),
    #[error("unknown call script spec id {0:02x?}")]
    UnknownSpecId([u8; 4]),
    #[error("body of {len} bytes is not a multiple of {stride}")]
    LengthMismatch { len: usize, stride: usize },
    #[error("{actual} of {expected} calls share the first call's target")]
    HeterogeneousTargets { expected: usize, actual: usize },
    #[error("call {index}: calldata length {actual:#x}")]
    CalldataLength { index: usize, actual: u32 },
    #[error("call {index}: selector {actual:02x?}")]
    Selector { index: usize, actual: [u8; 4] },
    #[error("call {index}: malformed payment reference")]
    Reference { index: usize },
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Reasons a structurally valid script is not a sanctioned migration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("organization has no app configured for this template")]
    TargetNotConfigured,
    #[error("script carries no calls")]
    NoCalls,
    #[error("calls target {actual}, configured app is {expected}")]
    TargetMismatch { expected: Address, actual: Address },
    #[error("call {index} pays {actual}, first call pays {expected}")]
    RecipientMismatch {
        index: usize,
        expected: Address,
        actual: Address,
    },
    #[error("recipient {0} is not a registered executor")]
    UnrecognizedRecipient(Address),
}

/// Why a template did not match; only ever logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Mismatch {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors surfaced by the indexer handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexerError {
    #[error("vote emitted by unknown voting app {0}")]
    UnknownVoting(Address),
    #[error("voting app {voting} belongs to unknown organization {dao}")]
    UnknownDao { voting: Address, dao: Address },
}
