//! Shared types for Govern migration call scripts (encoder and indexer).

pub mod abi;
pub mod codec;
pub mod facts;
pub mod template;

pub use codec::CodecError;
pub use facts::MigrationFacts;
pub use template::MigrationTemplate;
