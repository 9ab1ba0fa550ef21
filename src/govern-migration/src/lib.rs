//! Recognition of Aragon treasury migration votes.
//!
//! Design notes:
//! - The classifier is a total, pure function over arbitrary bytes: vote scripts come from chain
//!   events and must never crash the indexing pipeline.
//! - Which apps an organization has and which executors are registered are external facts,
//!   supplied through [`MigrationFacts`].
//! - Field extraction is only available on a [`ClassifiedScript`], which only the classifier
//!   can produce.

pub mod apps;
pub mod decoder;
pub mod errors;
pub mod evaluator;
pub mod facts;
pub mod indexer;
pub mod migration;

#[cfg(test)]
mod fixtures;

pub use govern_migration_types::{MigrationFacts, MigrationTemplate};
pub use indexer::MigrationIndexer;
pub use migration::{classify, classify_hex, migration_type, ClassifiedScript, MigratedAsset, Migration};
